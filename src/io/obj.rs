//! Wavefront OBJ loading via `tobj`, with MTL-resolved materials.

use std::path::Path;

use crate::error::{RenderError, RenderResult};
use crate::geometry::model::Model;
use crate::geometry::vertex::Vertex;
use crate::math::{Color, Vec2, Vec3};
use crate::resources::arena::ResourceArena;
use crate::resources::handle::MaterialHandle;
use crate::resources::material::Material;

/// Loads an OBJ (plus companion MTL, if referenced) from `path`, appending
/// its vertex/index buffers into `arena` and returning one `Model` per
/// loaded `tobj` mesh along with the material handle resolved for it.
///
/// `tobj` triangulates n-gons by fan internally (`triangulate: true`), so
/// every index buffer produced here is already triangle-list.
pub fn load_obj(arena: &mut ResourceArena, path: &Path) -> RenderResult<Vec<(Model, MaterialHandle)>> {
    let load_options = tobj::LoadOptions {
        triangulate: true,
        single_index: true,
        ..Default::default()
    };

    let (models, materials_result) = tobj::load_obj(path, &load_options).map_err(|e| RenderError::MeshParse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let materials = materials_result.map_err(|e| RenderError::MeshParse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let material_handles: Vec<MaterialHandle> = materials
        .iter()
        .map(|m| arena.store_material(convert_material(m)))
        .collect();

    let mut out = Vec::with_capacity(models.len());

    for model in models {
        let mesh = &model.mesh;
        let vertex_count = mesh.positions.len() / 3;

        let mut vertices = Vec::with_capacity(vertex_count);
        for i in 0..vertex_count {
            let position = Vec3::new(mesh.positions[i * 3] as f64, mesh.positions[i * 3 + 1] as f64, mesh.positions[i * 3 + 2] as f64);
            let normal = if mesh.normals.len() >= (i + 1) * 3 {
                Vec3::new(mesh.normals[i * 3] as f64, mesh.normals[i * 3 + 1] as f64, mesh.normals[i * 3 + 2] as f64)
            } else {
                Vec3::new(0.0, 0.0, 1.0)
            };
            let uv = if mesh.texcoords.len() >= (i + 1) * 2 {
                Vec2::new(mesh.texcoords[i * 2] as f64, mesh.texcoords[i * 2 + 1] as f64)
            } else {
                Vec2::new(0.0, 0.0)
            };
            let color = if mesh.vertex_color.len() >= (i + 1) * 3 {
                Color::new(mesh.vertex_color[i * 3], mesh.vertex_color[i * 3 + 1], mesh.vertex_color[i * 3 + 2], 1.0)
            } else {
                Color::new(1.0, 1.0, 1.0, 1.0)
            };
            vertices.push(Vertex::new(position, normal, uv, color));
        }

        let vb = arena.alloc_vertex_buffer();
        arena.set_vertex_buffer(vb, vertices);

        let ib = arena.alloc_index_buffer();
        let ib_start = 0;
        let ib_end = mesh.indices.len();
        arena.set_index_buffer(ib, mesh.indices.clone());

        let material_handle = mesh
            .material_id
            .and_then(|idx| material_handles.get(idx).copied())
            .unwrap_or_else(MaterialHandle::invalid);

        out.push((Model { vertex_buffer: vb, index_buffer: ib, ib_start, ib_end }, material_handle));
    }

    Ok(out)
}

fn convert_material(m: &tobj::Material) -> Material {
    let ka = m.ambient.map(|c| Color::new(c[0], c[1], c[2], 1.0)).unwrap_or(Color::new(1.0, 1.0, 1.0, 1.0));
    let kd = m.diffuse.map(|c| Color::new(c[0], c[1], c[2], 1.0)).unwrap_or(Color::new(1.0, 1.0, 1.0, 1.0));
    let ks = m.specular.map(|c| Color::new(c[0], c[1], c[2], 1.0)).unwrap_or(Color::new(0.0, 0.0, 0.0, 1.0));
    let ns = m.shininess.map(|v| v as f64);
    let tr = m.dissolve.map(|d| 1.0 - d as f64).unwrap_or(0.0).max(0.0);

    Material {
        ka,
        kd,
        ks,
        ke: Color::new(0.0, 0.0, 0.0, 1.0),
        ns,
        tr,
        texture: None,
        wrap_mode: crate::resources::material::WrapMode::Wrap,
    }
}
