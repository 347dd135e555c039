//! A small, explicitly little-endian binary mesh format ("mdl"), used for
//! pre-triangulated meshes that skip OBJ/MTL parsing entirely.
//!
//! Layout (all integers/floats little-endian):
//!
//! ```text
//! magic:          [u8; 4]   b"HMDL"
//! version:        u32       currently 1
//! vertex_count:   u32
//! index_count:    u32
//! vertices:       vertex_count * Vertex   (position, normal, uv, color; all f32)
//! indices:        index_count * u32
//! ```
//!
//! Earlier ad-hoc dumps of this data carried no magic or version field, so
//! a stray byte-order mismatch between producer and consumer silently
//! corrupted geometry instead of failing to load; this format's header is
//! the fix.

use std::io::{Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::error::{RenderError, RenderResult};
use crate::geometry::model::Model;
use crate::geometry::vertex::Vertex;
use crate::math::{Color, Vec2, Vec3};
use crate::resources::arena::ResourceArena;

const MAGIC: [u8; 4] = *b"HMDL";
const VERSION: u32 = 1;

pub fn write_mdl<W: Write>(writer: &mut W, vertices: &[Vertex], indices: &[u32]) -> RenderResult<()> {
    let io_err = |source: std::io::Error| RenderError::Io { path: "<mdl writer>".into(), source };

    writer.write_all(&MAGIC).map_err(io_err)?;
    writer.write_u32::<LittleEndian>(VERSION).map_err(io_err)?;
    writer.write_u32::<LittleEndian>(vertices.len() as u32).map_err(io_err)?;
    writer.write_u32::<LittleEndian>(indices.len() as u32).map_err(io_err)?;

    for v in vertices {
        writer.write_f32::<LittleEndian>(v.position.x as f32).map_err(io_err)?;
        writer.write_f32::<LittleEndian>(v.position.y as f32).map_err(io_err)?;
        writer.write_f32::<LittleEndian>(v.position.z as f32).map_err(io_err)?;
        writer.write_f32::<LittleEndian>(v.normal.x as f32).map_err(io_err)?;
        writer.write_f32::<LittleEndian>(v.normal.y as f32).map_err(io_err)?;
        writer.write_f32::<LittleEndian>(v.normal.z as f32).map_err(io_err)?;
        writer.write_f32::<LittleEndian>(v.uv.x as f32).map_err(io_err)?;
        writer.write_f32::<LittleEndian>(v.uv.y as f32).map_err(io_err)?;
        writer.write_f32::<LittleEndian>(v.color.x).map_err(io_err)?;
        writer.write_f32::<LittleEndian>(v.color.y).map_err(io_err)?;
        writer.write_f32::<LittleEndian>(v.color.z).map_err(io_err)?;
        writer.write_f32::<LittleEndian>(v.color.w).map_err(io_err)?;
    }

    for &idx in indices {
        writer.write_u32::<LittleEndian>(idx).map_err(io_err)?;
    }

    Ok(())
}

pub fn read_mdl<R: Read>(reader: &mut R, arena: &mut ResourceArena) -> RenderResult<Model> {
    let io_err = |source: std::io::Error| RenderError::Io { path: "<mdl reader>".into(), source };

    let mut magic = [0u8; 4];
    reader.read_exact(&mut magic).map_err(io_err)?;
    if magic != MAGIC {
        return Err(RenderError::UnsupportedFormat(format!("bad mdl magic: {magic:?}")));
    }

    let version = reader.read_u32::<LittleEndian>().map_err(io_err)?;
    if version != VERSION {
        return Err(RenderError::UnsupportedFormat(format!("unsupported mdl version: {version}")));
    }

    let vertex_count = reader.read_u32::<LittleEndian>().map_err(io_err)? as usize;
    let index_count = reader.read_u32::<LittleEndian>().map_err(io_err)? as usize;

    let mut vertices = Vec::with_capacity(vertex_count);
    for _ in 0..vertex_count {
        let position = Vec3::new(
            reader.read_f32::<LittleEndian>().map_err(io_err)? as f64,
            reader.read_f32::<LittleEndian>().map_err(io_err)? as f64,
            reader.read_f32::<LittleEndian>().map_err(io_err)? as f64,
        );
        let normal = Vec3::new(
            reader.read_f32::<LittleEndian>().map_err(io_err)? as f64,
            reader.read_f32::<LittleEndian>().map_err(io_err)? as f64,
            reader.read_f32::<LittleEndian>().map_err(io_err)? as f64,
        );
        let uv = Vec2::new(
            reader.read_f32::<LittleEndian>().map_err(io_err)? as f64,
            reader.read_f32::<LittleEndian>().map_err(io_err)? as f64,
        );
        let color = Color::new(
            reader.read_f32::<LittleEndian>().map_err(io_err)?,
            reader.read_f32::<LittleEndian>().map_err(io_err)?,
            reader.read_f32::<LittleEndian>().map_err(io_err)?,
            reader.read_f32::<LittleEndian>().map_err(io_err)?,
        );
        vertices.push(Vertex::new(position, normal, uv, color));
    }

    let mut indices = Vec::with_capacity(index_count);
    for _ in 0..index_count {
        indices.push(reader.read_u32::<LittleEndian>().map_err(io_err)?);
    }

    let vb = arena.alloc_vertex_buffer();
    arena.set_vertex_buffer(vb, vertices);
    let ib = arena.alloc_index_buffer();
    let ib_end = indices.len();
    arena.set_index_buffer(ib, indices);

    Ok(Model { vertex_buffer: vb, index_buffer: ib, ib_start: 0, ib_end })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_mesh() -> (Vec<Vertex>, Vec<u32>) {
        let vertex = |p: Vec3| Vertex::new(p, Vec3::new(0.0, 0.0, 1.0), Vec2::new(0.0, 0.0), Color::new(1.0, 1.0, 1.0, 1.0));
        (
            vec![
                vertex(Vec3::new(-1.0, -1.0, 0.0)),
                vertex(Vec3::new(1.0, -1.0, 0.0)),
                vertex(Vec3::new(0.0, 1.0, 0.0)),
            ],
            vec![0, 1, 2],
        )
    }

    #[test]
    fn round_trips_vertices_and_indices() {
        let (vertices, indices) = sample_mesh();
        let mut buf = Vec::new();
        write_mdl(&mut buf, &vertices, &indices).unwrap();

        let mut arena = ResourceArena::new();
        let mut cursor = std::io::Cursor::new(buf);
        let model = read_mdl(&mut cursor, &mut arena).unwrap();

        let read_back = arena.vertex_buffer(model.vertex_buffer).unwrap();
        assert_eq!(read_back.len(), 3);
        assert!((read_back[2].position - Vec3::new(0.0, 1.0, 0.0)).norm() < 1e-5);

        let read_indices = arena.index_buffer(model.index_buffer).unwrap();
        assert_eq!(read_indices, &[0, 1, 2]);
    }

    #[test]
    fn rejects_bad_magic() {
        let mut buf = vec![b'X', b'X', b'X', b'X'];
        buf.extend_from_slice(&1u32.to_le_bytes());
        let mut arena = ResourceArena::new();
        let mut cursor = std::io::Cursor::new(buf);
        assert!(read_mdl(&mut cursor, &mut arena).is_err());
    }

    #[test]
    fn rejects_unknown_version() {
        let mut buf = Vec::new();
        buf.extend_from_slice(&MAGIC);
        buf.extend_from_slice(&99u32.to_le_bytes());
        let mut arena = ResourceArena::new();
        let mut cursor = std::io::Cursor::new(buf);
        assert!(read_mdl(&mut cursor, &mut arena).is_err());
    }
}
