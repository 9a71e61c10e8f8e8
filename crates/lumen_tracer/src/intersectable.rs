//! Intersectable trait and Intersection record for ray-object queries.

use std::fmt;

use crate::Material;
use lumen_math::{Aabb, Interval, Ray, Vec2, Vec3};

/// Record of a ray-object intersection.
///
/// Borrowed from the scene: it lives only as long as the trace call that
/// produced it.
#[derive(Clone, Copy)]
pub struct Intersection<'a> {
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Unit surface normal. Not flipped toward the ray; the sign of
    /// `normal . direction` tells entering from exiting.
    pub normal: Vec3,
    /// Texture coordinates (barycentric alpha/beta for triangles)
    pub uv: Vec2,
    /// Material at the intersection point
    pub material: &'a dyn Material,
    /// The primitive that was hit
    pub primitive: &'a dyn Intersectable,
}

impl<'a> Intersection<'a> {
    /// Point of intersection along `ray`.
    #[inline]
    pub fn point(&self, ray: &Ray) -> Vec3 {
        ray.at(self.t)
    }
}

impl fmt::Debug for Intersection<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Intersection")
            .field("t", &self.t)
            .field("normal", &self.normal)
            .field("uv", &self.uv)
            .finish_non_exhaustive()
    }
}

/// Trait for objects that can be hit by rays.
pub trait Intersectable: Send + Sync {
    /// Nearest hit with `t` inside `ray_t` (inclusive at the far end).
    ///
    /// Hits at or below `RAY_EPSILON` are never reported.
    fn intersect<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<Intersection<'a>>;

    /// Get the axis-aligned bounding box of this object.
    fn bounding_box(&self) -> Aabb;
}

/// A list of intersectable objects, searched linearly.
///
/// This is the reference nearest-hit search: the nearest `t` wins, and on
/// a tie the object added first wins.
pub struct IntersectableList {
    objects: Vec<Box<dyn Intersectable>>,
    bbox: Aabb,
}

impl IntersectableList {
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            bbox: Aabb::EMPTY,
        }
    }

    /// Add an object to the list.
    pub fn add(&mut self, object: Box<dyn Intersectable>) {
        self.bbox = Aabb::surrounding(&self.bbox, &object.bounding_box());
        self.objects.push(object);
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Default for IntersectableList {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Vec<Box<dyn Intersectable>>> for IntersectableList {
    fn from(objects: Vec<Box<dyn Intersectable>>) -> Self {
        let mut list = Self::new();
        for object in objects {
            list.add(object);
        }
        list
    }
}

impl Intersectable for IntersectableList {
    fn intersect<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<Intersection<'a>> {
        let objects = self.objects.iter().map(|o| o.as_ref() as &'a dyn Intersectable);
        nearest_of(objects, ray, ray_t)
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

/// Linear nearest-hit search over `objects`, earliest object wins ties.
pub(crate) fn nearest_of<'a, I>(objects: I, ray: &Ray, ray_t: Interval) -> Option<Intersection<'a>>
where
    I: IntoIterator<Item = &'a dyn Intersectable>,
{
    let mut closest: Option<Intersection<'a>> = None;

    for object in objects {
        let max = closest.map_or(ray_t.max, |c| c.t);
        if let Some(hit) = object.intersect(ray, ray_t.with_max(max)) {
            if closest.map_or(true, |c| hit.t < c.t) {
                closest = Some(hit);
            }
        }
    }

    closest
}
