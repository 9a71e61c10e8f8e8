//! Bounding Volume Hierarchy (BVH) acceleration structure.
//!
//! Binary tree over boxed primitives. Every primitive keeps the index it was
//! inserted with, so that the tree picks the same hit as a linear search of
//! the original list: nearest `t`, and on equal `t` the lowest index.

use crate::intersectable::{Intersectable, Intersection};
use lumen_math::{Aabb, Interval, Ray};

/// Maximum primitives per leaf node before splitting.
const LEAF_MAX_SIZE: usize = 4;

/// A primitive with its insertion index.
pub type IndexedObject = (usize, Box<dyn Intersectable>);

/// BVH node - either a branch with two children or a leaf with primitives.
pub enum BvhNode {
    /// Internal node with two children.
    Branch {
        left: Box<BvhNode>,
        right: Box<BvhNode>,
        bbox: Aabb,
    },
    /// Leaf node with a small number of primitives.
    Leaf { objects: Vec<IndexedObject>, bbox: Aabb },
    /// Empty node (for edge cases).
    Empty,
}

impl BvhNode {
    /// Create a BVH from a list of intersectable objects.
    pub fn new(objects: Vec<Box<dyn Intersectable>>) -> Self {
        if objects.is_empty() {
            return BvhNode::Empty;
        }
        let count = objects.len();
        let node = Self::build(objects.into_iter().enumerate().collect());
        log::debug!("Built BVH over {} primitives, depth {}", count, node.depth());
        node
    }

    /// Recursive BVH construction.
    ///
    /// Median split: sort by centroid on the axis with the widest centroid
    /// spread, split in half, recurse. The sort is stable, so equal
    /// centroids keep insertion order.
    fn build(mut objects: Vec<IndexedObject>) -> Self {
        let n = objects.len();

        let bounds = objects.iter().fold(Aabb::EMPTY, |acc, (_, o)| {
            Aabb::surrounding(&acc, &o.bounding_box())
        });

        if n <= LEAF_MAX_SIZE {
            return BvhNode::Leaf {
                objects,
                bbox: bounds,
            };
        }

        let centroid_bounds = objects.iter().fold(Aabb::EMPTY, |acc, (_, o)| {
            let c = o.bounding_box().centroid();
            Aabb::surrounding(&acc, &Aabb::from_points(c, c))
        });
        let axis = centroid_bounds.longest_axis();

        objects.sort_by(|(_, a), (_, b)| {
            let a_val = a.bounding_box().centroid()[axis];
            let b_val = b.bounding_box().centroid()[axis];
            a_val
                .partial_cmp(&b_val)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let right_objects = objects.split_off(n / 2);
        let left = Self::build(objects);
        let right = Self::build(right_objects);

        BvhNode::Branch {
            left: Box::new(left),
            right: Box::new(right),
            bbox: bounds,
        }
    }

    /// Number of levels below and including this node.
    pub fn depth(&self) -> usize {
        match self {
            BvhNode::Empty => 0,
            BvhNode::Leaf { .. } => 1,
            BvhNode::Branch { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    /// Nearest hit together with the insertion index of the primitive.
    fn nearest<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<(usize, Intersection<'a>)> {
        match self {
            BvhNode::Empty => None,

            BvhNode::Leaf { objects, bbox } => {
                if !bbox.hit(ray, ray_t) {
                    return None;
                }

                let mut best: Option<(usize, Intersection<'a>)> = None;
                for (index, object) in objects {
                    let max = best.map_or(ray_t.max, |(_, b)| b.t);
                    if let Some(hit) = object.intersect(ray, ray_t.with_max(max)) {
                        best = closer(best, Some((*index, hit)));
                    }
                }
                best
            }

            BvhNode::Branch { left, right, bbox } => {
                if !bbox.hit(ray, ray_t) {
                    return None;
                }

                let hit_left = left.nearest(ray, ray_t);

                // Right side only needs to reach the left hit; `with_max` is
                // inclusive so an equal-t hit still gets a chance on index
                let right_max = hit_left.map_or(ray_t.max, |(_, h)| h.t);
                let hit_right = right.nearest(ray, ray_t.with_max(right_max));

                closer(hit_left, hit_right)
            }
        }
    }
}

/// Pick the nearer hit; on equal `t` the lower insertion index.
fn closer<'a>(
    a: Option<(usize, Intersection<'a>)>,
    b: Option<(usize, Intersection<'a>)>,
) -> Option<(usize, Intersection<'a>)> {
    match (a, b) {
        (Some(x), Some(y)) => {
            if y.1.t < x.1.t || (y.1.t == x.1.t && y.0 < x.0) {
                Some(y)
            } else {
                Some(x)
            }
        }
        (x, None) => x,
        (None, y) => y,
    }
}

impl Intersectable for BvhNode {
    fn intersect<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<Intersection<'a>> {
        self.nearest(ray, ray_t).map(|(_, hit)| hit)
    }

    fn bounding_box(&self) -> Aabb {
        match self {
            BvhNode::Empty => Aabb::EMPTY,
            BvhNode::Leaf { bbox, .. } => *bbox,
            BvhNode::Branch { bbox, .. } => *bbox,
        }
    }
}
