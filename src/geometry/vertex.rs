//! Vertex: immutable mesh-space vertex attributes.

use crate::math::{Color, Vec2, Vec3};

#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub uv: Vec2,
    pub color: Color,
}

impl Vertex {
    pub fn new(position: Vec3, normal: Vec3, uv: Vec2, color: Color) -> Vertex {
        Vertex { position, normal, uv, color }
    }
}
