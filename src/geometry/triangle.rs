//! Compiled, world-space triangles.

use crate::geometry::vertex::Vertex;
use crate::math::{Aabb, Vec3};
use crate::resources::handle::MaterialHandle;

#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    pub v0: Vertex,
    pub v1: Vertex,
    pub v2: Vertex,
    /// Unit face normal: `normalize(cross(v1.pos - v0.pos, v2.pos - v0.pos))`.
    pub n: Vec3,
    pub material: MaterialHandle,
    pub centroid: Vec3,
}

impl Triangle {
    pub fn new(v0: Vertex, v1: Vertex, v2: Vertex, material: MaterialHandle) -> Triangle {
        let edge1 = v1.position - v0.position;
        let edge2 = v2.position - v0.position;
        let n = edge1.cross(&edge2).normalize();
        let centroid = (v0.position + v1.position + v2.position) / 3.0;

        Triangle { v0, v1, v2, n, material, centroid }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_points(&[self.v0.position, self.v1.position, self.v2.position])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{Color, Vec2};
    use crate::resources::handle::MaterialHandle;

    #[test]
    fn normal_is_unit_and_matches_winding() {
        let vertex = |p: Vec3| Vertex::new(p, Vec3::new(0.0, 0.0, 1.0), Vec2::new(0.0, 0.0), Color::new(1.0, 1.0, 1.0, 1.0));
        let t = Triangle::new(
            vertex(Vec3::new(-1.0, -1.0, 0.0)),
            vertex(Vec3::new(1.0, -1.0, 0.0)),
            vertex(Vec3::new(0.0, 1.0, 0.0)),
            MaterialHandle::invalid(),
        );
        assert!((t.n.norm() - 1.0).abs() < 1e-9);
        assert!((t.n - Vec3::new(0.0, 0.0, 1.0)).norm() < 1e-9);
    }
}
