//! Mesh I/O: Wavefront OBJ (via `tobj`) and a custom little-endian binary
//! format ("mdl", via `byteorder`). Both loaders append into a caller's
//! `ResourceArena` and return a `Model` ready for `ModelInstance::create`.

pub mod mdl;
pub mod obj;
