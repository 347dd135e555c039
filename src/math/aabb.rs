//! Axis-aligned bounding boxes and the slab-method ray/AABB test.

use super::Vec3;
use crate::geometry::ray::Ray;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Default for Aabb {
    fn default() -> Aabb {
        Aabb::empty()
    }
}

impl Aabb {
    pub fn empty() -> Aabb {
        Aabb {
            min: Vec3::new(f64::MAX, f64::MAX, f64::MAX),
            max: Vec3::new(f64::MIN, f64::MIN, f64::MIN),
        }
    }

    pub fn from_points(points: &[Vec3]) -> Aabb {
        let mut bounds = Aabb::empty();
        for &p in points {
            bounds.expand_point(p);
        }
        bounds
    }

    pub fn expand_point(&mut self, p: Vec3) {
        self.min = self.min.inf(&p);
        self.max = self.max.sup(&p);
    }

    pub fn expand(&mut self, other: &Aabb) {
        self.min = self.min.inf(&other.min);
        self.max = self.max.sup(&other.max);
    }

    pub fn center(&self) -> Vec3 {
        0.5 * (self.min + self.max)
    }

    pub fn contains_point(&self, p: Vec3) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }

    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// Splits this box into its 8 equal octants, in the fixed order
    /// (-x-y-z, +x-y-z, -x+y-z, +x+y-z, -x-y+z, +x-y+z, -x+y+z, +x+y+z).
    pub fn octants(&self) -> [Aabb; 8] {
        let c = self.center();
        let mut out = [Aabb::empty(); 8];
        for (i, item) in out.iter_mut().enumerate() {
            let lo_x = (i & 1) == 0;
            let lo_y = (i & 2) == 0;
            let lo_z = (i & 4) == 0;
            let min = Vec3::new(
                if lo_x { self.min.x } else { c.x },
                if lo_y { self.min.y } else { c.y },
                if lo_z { self.min.z } else { c.z },
            );
            let max = Vec3::new(
                if lo_x { c.x } else { self.max.x },
                if lo_y { c.y } else { self.max.y },
                if lo_z { c.z } else { self.max.z },
            );
            *item = Aabb { min, max };
        }
        out
    }

    /// Slab-method ray/AABB intersection. Degenerate axes (zero direction
    /// component) are treated as an infinite slab if the origin lies
    /// within it, else a miss.
    pub fn intersect(&self, ray: &Ray) -> Option<(f64, f64)> {
        let mut t_near = f64::MIN;
        let mut t_far = f64::MAX;

        for axis in 0..3 {
            let origin = ray.origin[axis];
            let dir = ray.direction[axis];
            let min = self.min[axis];
            let max = self.max[axis];

            if dir == 0.0 {
                if origin < min || origin > max {
                    return None;
                }
                continue;
            }

            let inv_dir = 1.0 / dir;
            let mut t0 = (min - origin) * inv_dir;
            let mut t1 = (max - origin) * inv_dir;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }

            t_near = t_near.max(t0);
            t_far = t_far.min(t1);

            if t_near > t_far {
                return None;
            }
        }

        Some((t_near, t_far))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ray_through_center_hits() {
        let bounds = Aabb {
            min: Vec3::new(-1.0, -1.0, -1.0),
            max: Vec3::new(1.0, 1.0, 1.0),
        };
        let ray = Ray::new(Vec3::new(-5.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0), f64::MAX);
        let (t0, t1) = bounds.intersect(&ray).expect("should hit");
        assert!((t0 - 4.0).abs() < 1e-9);
        assert!((t1 - 6.0).abs() < 1e-9);
    }

    #[test]
    fn ray_missing_box() {
        let bounds = Aabb {
            min: Vec3::new(-1.0, -1.0, -1.0),
            max: Vec3::new(1.0, 1.0, 1.0),
        };
        let ray = Ray::new(Vec3::new(-5.0, 5.0, 0.0), Vec3::new(1.0, 0.0, 0.0), f64::MAX);
        assert!(bounds.intersect(&ray).is_none());
    }

    #[test]
    fn degenerate_axis_origin_inside_slab() {
        let bounds = Aabb {
            min: Vec3::new(-1.0, -1.0, -1.0),
            max: Vec3::new(1.0, 1.0, 1.0),
        };
        let ray = Ray::new(Vec3::new(-5.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0), f64::MAX);
        assert!(bounds.intersect(&ray).is_some());
    }

    #[test]
    fn octants_cover_parent_and_share_center() {
        let bounds = Aabb {
            min: Vec3::new(0.0, 0.0, 0.0),
            max: Vec3::new(2.0, 2.0, 2.0),
        };
        let octants = bounds.octants();
        let mut union = Aabb::empty();
        for o in &octants {
            union.expand(o);
        }
        assert!((union.min - bounds.min).norm() < 1e-9);
        assert!((union.max - bounds.max).norm() < 1e-9);
    }
}
