//! Barycentric coordinates and the `Interpolate` convenience used to blend
//! vertex attributes across a triangle, specialized to the concrete
//! attribute types this renderer needs instead of a generic associated
//! type.

use super::Vec3;

/// Computes barycentric weights `(a, b, c)` of `p` with respect to triangle
/// `(v0, v1, v2)`, projected onto the triangle's own plane. Degenerate
/// (zero-area) triangles return `(0, 0, 0)`.
pub fn barycentric_of(p: Vec3, v0: Vec3, v1: Vec3, v2: Vec3) -> Vec3 {
    let e0 = v1 - v0;
    let e1 = v2 - v0;
    let e2 = p - v0;

    let d00 = e0.dot(&e0);
    let d01 = e0.dot(&e1);
    let d11 = e1.dot(&e1);
    let d20 = e2.dot(&e0);
    let d21 = e2.dot(&e1);

    let denom = d00 * d11 - d01 * d01;
    if denom.abs() < 1e-14 {
        return Vec3::new(0.0, 0.0, 0.0);
    }

    let v = (d11 * d20 - d01 * d21) / denom;
    let w = (d00 * d21 - d01 * d20) / denom;
    let u = 1.0 - v - w;

    Vec3::new(u, v, w)
}

/// Interpolates three scalar-like values by barycentric weight.
pub fn interpolate3<T>(bary: Vec3, a: T, b: T, c: T) -> T
where
    T: std::ops::Mul<f64, Output = T> + std::ops::Add<Output = T>,
{
    a * bary.x + b * bary.y + c * bary.z
}
