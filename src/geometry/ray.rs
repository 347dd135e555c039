//! Rays and the Moller-Trumbore ray/triangle test.

use crate::geometry::triangle::Triangle;
use crate::math::Vec3;

const TRIANGLE_EPSILON: f64 = 1e-7;

#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
    pub max_t: f64,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3, max_t: f64) -> Ray {
        Ray { origin, direction, max_t }
    }

    /// Builds a ray from `origin` toward `target`, with `max_t = 1.0` so the
    /// segment stops exactly at the target (used for shadow rays).
    pub fn towards(origin: Vec3, target: Vec3) -> Ray {
        Ray {
            origin,
            direction: target - origin,
            max_t: 1.0,
        }
    }

    pub fn point(&self, t: f64) -> Vec3 {
        self.origin + t * self.direction
    }

    pub fn is_direction_zero(&self) -> bool {
        self.direction.norm_squared() == 0.0
    }
}

/// Moller-Trumbore ray/triangle intersection.
///
/// Returns `(t, is_back_face)` on a hit. A back face has its geometric
/// normal pointing into the ray direction (`dot(dir, n) > 0`).
/// Back-face culling is left to the caller.
pub fn ray_triangle_intersect(ray: &Ray, tri: &Triangle) -> Option<(f64, bool)> {
    if ray.is_direction_zero() {
        return None;
    }

    let edge1 = tri.v1.position - tri.v0.position;
    let edge2 = tri.v2.position - tri.v0.position;

    let p = ray.direction.cross(&edge2);
    let det = edge1.dot(&p);

    if det.abs() < TRIANGLE_EPSILON {
        return None;
    }

    let inv_det = 1.0 / det;
    let t_vec = ray.origin - tri.v0.position;
    let u = t_vec.dot(&p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = t_vec.cross(&edge1);
    let v = ray.direction.dot(&q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = edge2.dot(&q) * inv_det;
    if t < 0.0 || t > ray.max_t {
        return None;
    }

    let is_back_face = ray.direction.dot(&tri.n) > 0.0;

    Some((t, is_back_face))
}
