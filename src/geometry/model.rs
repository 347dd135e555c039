//! Model (shared, immutable geometry) and ModelInstance (a placed,
//! compiled copy with its own world-space triangle cache and octree).

use crate::geometry::octree::Octree;
use crate::geometry::triangle::Triangle;
use crate::geometry::vertex::Vertex;
use crate::math::{Aabb, Mat4};
use crate::resources::arena::ResourceArena;
use crate::resources::handle::{IndexBufferHandle, MaterialHandle, VertexBufferHandle};

/// A range `[ib_start, ib_end)` into an index buffer, plus the vertex
/// buffer it indexes. Shared and immutable across instances.
#[derive(Debug, Clone, Copy)]
pub struct Model {
    pub vertex_buffer: VertexBufferHandle,
    pub index_buffer: IndexBufferHandle,
    pub ib_start: usize,
    pub ib_end: usize,
}

pub struct ModelInstance {
    pub transform: Mat4,
    pub tri_cache: Vec<Triangle>,
    pub octree: Octree,
    pub aabb: Aabb,
    /// Used when the source mesh carried no per-triangle material.
    pub default_material: MaterialHandle,
    pub cull_backfaces: bool,
}

impl ModelInstance {
    /// Compiles a `Model`'s referenced triangles into world space via
    /// `transform`, then builds an octree over the result.
    pub fn create(
        arena: &ResourceArena,
        model: &Model,
        transform: Mat4,
        default_material: MaterialHandle,
        cull_backfaces: bool,
        octree_leaf_max: usize,
        octree_max_depth: u32,
    ) -> ModelInstance {
        let vertices = arena
            .vertex_buffer(model.vertex_buffer)
            .expect("model references a valid vertex buffer");
        let indices = arena
            .index_buffer(model.index_buffer)
            .expect("model references a valid index buffer");

        let normal_matrix = transform.fixed_view::<3, 3>(0, 0).try_inverse().map(|m| m.transpose());

        let transform_vertex = |v: &Vertex| -> Vertex {
            let pos4 = transform * crate::math::Vec4::new(v.position.x, v.position.y, v.position.z, 1.0);
            let position = crate::math::Vec3::new(pos4.x, pos4.y, pos4.z);
            let normal = match normal_matrix {
                Some(nm) => (nm * v.normal).normalize(),
                None => v.normal,
            };
            Vertex { position, normal, uv: v.uv, color: v.color }
        };

        let mut tri_cache = Vec::with_capacity((model.ib_end - model.ib_start) / 3);
        let mut i = model.ib_start;
        while i + 2 < model.ib_end {
            let v0 = transform_vertex(&vertices[indices[i] as usize]);
            let v1 = transform_vertex(&vertices[indices[i + 1] as usize]);
            let v2 = transform_vertex(&vertices[indices[i + 2] as usize]);
            tri_cache.push(Triangle::new(v0, v1, v2, default_material));
            i += 3;
        }

        let octree = Octree::build(&tri_cache, octree_leaf_max, octree_max_depth);
        let aabb = *octree.aabb();

        ModelInstance {
            transform,
            tri_cache,
            octree,
            aabb,
            default_material,
            cull_backfaces,
        }
    }
}
