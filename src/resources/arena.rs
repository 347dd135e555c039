//! Append-only resource arena: owns vertex/index buffers, models,
//! materials and textures, and hands out dense handles. Frozen (by
//! convention — nothing below enforces it at the type level, matching the
//! original tool's comment-only contract) once rendering starts.

use crate::geometry::model::Model;
use crate::geometry::vertex::Vertex;
use crate::resources::handle::{Handle, IndexBufferHandle, MaterialHandle, ModelHandle, TextureHandle, VertexBufferHandle};
use crate::resources::material::Material;
use crate::resources::texture::Texture;

#[derive(Default)]
pub struct ResourceArena {
    vertex_buffers: Vec<Vec<Vertex>>,
    index_buffers: Vec<Vec<u32>>,
    models: Vec<Model>,
    materials: Vec<Material>,
    textures: Vec<Texture>,
}

impl ResourceArena {
    pub fn new() -> ResourceArena {
        ResourceArena::default()
    }

    pub fn alloc_vertex_buffer(&mut self) -> VertexBufferHandle {
        self.vertex_buffers.push(Vec::new());
        Handle::new((self.vertex_buffers.len() - 1) as u32)
    }

    pub fn alloc_index_buffer(&mut self) -> IndexBufferHandle {
        self.index_buffers.push(Vec::new());
        Handle::new((self.index_buffers.len() - 1) as u32)
    }

    pub fn push_vertex(&mut self, vb: VertexBufferHandle, vertex: Vertex) {
        self.vertex_buffers[vb.index() as usize].push(vertex);
    }

    pub fn push_index(&mut self, ib: IndexBufferHandle, index: u32) {
        self.index_buffers[ib.index() as usize].push(index);
    }

    pub fn set_vertex_buffer(&mut self, vb: VertexBufferHandle, vertices: Vec<Vertex>) {
        self.vertex_buffers[vb.index() as usize] = vertices;
    }

    pub fn set_index_buffer(&mut self, ib: IndexBufferHandle, indices: Vec<u32>) {
        self.index_buffers[ib.index() as usize] = indices;
    }

    pub fn vertex_buffer(&self, vb: VertexBufferHandle) -> Option<&[Vertex]> {
        self.vertex_buffers.get(vb.index() as usize).map(Vec::as_slice)
    }

    pub fn index_buffer(&self, ib: IndexBufferHandle) -> Option<&[u32]> {
        self.index_buffers.get(ib.index() as usize).map(Vec::as_slice)
    }

    pub fn alloc_model(&mut self, model: Model) -> ModelHandle {
        self.models.push(model);
        Handle::new((self.models.len() - 1) as u32)
    }

    pub fn model(&self, handle: ModelHandle) -> Option<&Model> {
        self.models.get(handle.index() as usize)
    }

    pub fn store_material(&mut self, material: Material) -> MaterialHandle {
        self.materials.push(material);
        Handle::new((self.materials.len() - 1) as u32)
    }

    /// Returns `None` for an invalid handle (the "no material assigned"
    /// sentinel); callers fall back to `Material::default()`.
    pub fn material(&self, handle: MaterialHandle) -> Option<&Material> {
        if !handle.is_valid() {
            return None;
        }
        self.materials.get(handle.index() as usize)
    }

    pub fn store_texture(&mut self, texture: Texture) -> TextureHandle {
        self.textures.push(texture);
        Handle::new((self.textures.len() - 1) as u32)
    }

    pub fn texture(&self, handle: TextureHandle) -> Option<&Texture> {
        if !handle.is_valid() {
            debug_assert!(false, "lookup with invalid texture handle");
            return None;
        }
        self.textures.get(handle.index() as usize)
    }
}
