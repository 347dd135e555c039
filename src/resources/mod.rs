//! Resource arena (C2): append-only storage for vertex buffers, index
//! buffers, models, materials and textures, addressed by opaque handles.

pub mod arena;
pub mod handle;
pub mod material;
pub mod texture;

pub use self::arena::ResourceArena;
pub use self::handle::Handle;
pub use self::material::Material;
pub use self::texture::Texture;
