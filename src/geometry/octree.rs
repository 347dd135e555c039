//! Per-model-instance octree over a triangle cache's centroids.
//!
//! Build policy: subdivide a node into 8 equal octants when it
//! holds more than `leaf_max` triangles *and* its depth is below
//! `max_depth`. A triangle is assigned to every child whose AABB it
//! overlaps; ties on a split plane go to the lower-coordinate child (which
//! falls out naturally from `Aabb::overlaps` using `<=`/`>=` against the
//! octant boundary computed from the parent's center).

use smallvec::SmallVec;

use crate::geometry::ray::Ray;
use crate::geometry::triangle::Triangle;
use crate::math::Aabb;

enum Node {
    Leaf(SmallVec<[u32; 8]>),
    Interior(Box<[Octree; 8]>),
}

pub struct Octree {
    aabb: Aabb,
    depth: u32,
    node: Node,
}

impl Octree {
    pub fn build(triangles: &[Triangle], leaf_max: usize, max_depth: u32) -> Octree {
        let boxes: Vec<Aabb> = triangles.iter().map(Triangle::aabb).collect();
        let mut root_aabb = Aabb::empty();
        for b in &boxes {
            root_aabb.expand(b);
        }

        let indices: Vec<u32> = (0..triangles.len() as u32).collect();
        Self::build_node(root_aabb, &boxes, indices, 0, leaf_max, max_depth)
    }

    fn build_node(
        aabb: Aabb,
        boxes: &[Aabb],
        indices: Vec<u32>,
        depth: u32,
        leaf_max: usize,
        max_depth: u32,
    ) -> Octree {
        if indices.len() <= leaf_max || depth >= max_depth {
            return Octree {
                aabb,
                depth,
                node: Node::Leaf(indices.into_iter().collect()),
            };
        }

        let octants = aabb.octants();
        let mut buckets: [Vec<u32>; 8] = Default::default();

        for &idx in &indices {
            let tri_box = boxes[idx as usize];
            for (slot, octant) in octants.iter().enumerate() {
                if octant.overlaps(&tri_box) {
                    buckets[slot].push(idx);
                }
            }
        }

        let children: Vec<Octree> = octants
            .into_iter()
            .zip(buckets.into_iter())
            .map(|(octant_box, bucket)| {
                Self::build_node(octant_box, boxes, bucket, depth + 1, leaf_max, max_depth)
            })
            .collect();

        let children: Box<[Octree; 8]> = match children.try_into() {
            Ok(arr) => arr,
            Err(_) => unreachable!("exactly 8 octants always produced"),
        };

        Octree {
            aabb,
            depth,
            node: Node::Interior(children),
        }
    }

    pub fn aabb(&self) -> &Aabb {
        &self.aabb
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn children(&self) -> &[Octree] {
        match &self.node {
            Node::Interior(children) => children.as_slice(),
            Node::Leaf(_) => &[],
        }
    }

    /// Collects candidate triangle indices whose leaf AABBs the ray
    /// intersects. May contain duplicates; callers re-test and keep the
    /// closest hit, so duplicates are harmless.
    pub fn query(&self, ray: &Ray, out: &mut Vec<u32>) {
        if self.aabb.intersect(ray).is_none() {
            return;
        }

        match &self.node {
            Node::Leaf(indices) => out.extend(indices.iter().copied()),
            Node::Interior(children) => {
                for child in children.iter() {
                    child.query(ray, out);
                }
            }
        }
    }

    /// Visits every reachable leaf's triangle indices, used by the octree's
    /// own invariant test (every triangle reachable from at least one leaf).
    fn collect_leaf_indices(&self, out: &mut std::collections::HashSet<u32>) {
        match &self.node {
            Node::Leaf(indices) => out.extend(indices.iter().copied()),
            Node::Interior(children) => {
                for child in children.iter() {
                    child.collect_leaf_indices(out);
                }
            }
        }
    }
}

/// Verifies every triangle centroid lies inside the tree's root AABB and is
/// reachable from at least one leaf.
pub fn validate_coverage(tree: &Octree, triangle_count: usize) -> bool {
    let mut reachable = std::collections::HashSet::new();
    tree.collect_leaf_indices(&mut reachable);
    (0..triangle_count as u32).all(|i| reachable.contains(&i))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::vertex::Vertex;
    use crate::math::{Color, Vec2, Vec3};
    use crate::resources::handle::MaterialHandle;

    fn grid_triangles(n: usize) -> Vec<Triangle> {
        let vertex = |p: Vec3| Vertex::new(p, Vec3::new(0.0, 0.0, 1.0), Vec2::new(0.0, 0.0), Color::new(1.0, 1.0, 1.0, 1.0));
        (0..n)
            .map(|i| {
                let x = i as f64 * 3.0;
                Triangle::new(
                    vertex(Vec3::new(x - 1.0, -1.0, 0.0)),
                    vertex(Vec3::new(x + 1.0, -1.0, 0.0)),
                    vertex(Vec3::new(x, 1.0, 0.0)),
                    MaterialHandle::invalid(),
                )
            })
            .collect()
    }

    #[test]
    fn every_triangle_reachable_from_a_leaf() {
        let triangles = grid_triangles(50);
        let tree = Octree::build(&triangles, 4, 6);
        assert!(validate_coverage(&tree, triangles.len()));
    }

    #[test]
    fn root_aabb_contains_every_triangle() {
        let triangles = grid_triangles(30);
        let tree = Octree::build(&triangles, 4, 6);
        for t in &triangles {
            let tri_box = t.aabb();
            assert!(tree.aabb().contains_point(tri_box.min));
            assert!(tree.aabb().contains_point(tri_box.max));
        }
    }

    #[test]
    fn query_finds_triangle_under_ray() {
        let triangles = grid_triangles(40);
        let tree = Octree::build(&triangles, 4, 6);

        // Triangle index 20 is centered around x = 60.
        let ray = Ray::new(Vec3::new(60.0, 0.0, -5.0), Vec3::new(0.0, 0.0, 1.0), f64::MAX);
        let mut candidates = Vec::new();
        tree.query(&ray, &mut candidates);
        assert!(candidates.contains(&20));
    }

    #[test]
    fn shallow_tree_stays_a_single_leaf() {
        let triangles = grid_triangles(3);
        let tree = Octree::build(&triangles, 8, 6);
        assert!(tree.children().is_empty());
    }
}
