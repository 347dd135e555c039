//! Math kernel: vectors, matrices, AABBs, barycentric/interpolation
//! primitives and color blending. Everything here is double precision,
//! matching the original tool's `vec3d`/`mat4x4d` convention.

pub mod aabb;
pub mod barycentric;
pub mod color;

pub use self::aabb::Aabb;
pub use self::barycentric::{barycentric_of, interpolate3};
pub use self::color::{color, Color};

use nalgebra::{Matrix4, Vector2, Vector3, Vector4};

pub type Vec2 = Vector2<f64>;
pub type Vec3 = Vector3<f64>;
pub type Vec4 = Vector4<f64>;
pub type Mat4 = Matrix4<f64>;

/// Reflects `v` about the unit normal `n`: `v - 2 * dot(v, n) * n`.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(&n) * n
}

#[inline]
pub fn saturate(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}
