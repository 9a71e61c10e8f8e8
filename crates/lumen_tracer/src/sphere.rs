//! Sphere primitive for ray tracing.

use crate::{
    intersectable::{Intersectable, Intersection},
    Material,
};
use lumen_math::{Aabb, Interval, Ray, Vec2, Vec3, RAY_EPSILON};
use std::f32::consts::PI;

/// A sphere primitive.
pub struct Sphere<M: Material> {
    center: Vec3,
    radius: f32,
    material: M,
    bbox: Aabb,
}

impl<M: Material> Sphere<M> {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f32, material: M) -> Self {
        let radius = radius.max(0.0);
        let rvec = Vec3::splat(radius);
        let bbox = Aabb::from_points(center - rvec, center + rvec);

        Self {
            center,
            radius,
            material,
            bbox,
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Get the UV coordinates for a point on the unit sphere.
    fn sphere_uv(p: Vec3) -> Vec2 {
        // theta: angle down from +Y
        // phi: angle around Y axis from +X
        let theta = (-p.y).clamp(-1.0, 1.0).acos();
        let phi = (-p.z).atan2(p.x) + PI;

        Vec2::new(phi / (2.0 * PI), theta / PI)
    }
}

impl<M: Material + 'static> Intersectable for Sphere<M> {
    fn intersect<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<Intersection<'a>> {
        if self.radius <= 0.0 {
            return None;
        }

        let oc = self.center - ray.origin();
        let a = ray.direction().length_squared();
        if a == 0.0 {
            return None;
        }
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();
        let accept = |t: f32| t > RAY_EPSILON && ray_t.contains(t);

        // Find the nearest root in the acceptable range
        let mut root = (h - sqrtd) / a;
        if !accept(root) {
            root = (h + sqrtd) / a;
            if !accept(root) {
                return None;
            }
        }

        let outward_normal = (ray.at(root) - self.center) / self.radius;

        Some(Intersection {
            t: root,
            normal: outward_normal,
            uv: Self::sphere_uv(outward_normal),
            material: &self.material,
            primitive: self,
        })
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::PhongMaterial;
    use lumen_math::RayKind;

    fn unit_sphere() -> Sphere<PhongMaterial> {
        Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, PhongMaterial::default())
    }

    #[test]
    fn test_sphere_hit() {
        let ray = Ray::new(Vec3::ZERO, -Vec3::Z, RayKind::Visibility);
        let sphere = unit_sphere();
        let hit = sphere.intersect(&ray, Interval::ray(RAY_EPSILON));

        let hit = hit.unwrap();
        assert!((hit.t - 0.5).abs() < 0.001); // Should hit at t=0.5
        assert!((hit.normal - Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn test_sphere_miss() {
        // Ray pointing away from sphere
        let ray = Ray::new(Vec3::ZERO, Vec3::Y, RayKind::Visibility);
        assert!(unit_sphere().intersect(&ray, Interval::ray(RAY_EPSILON)).is_none());
    }

    #[test]
    fn test_hit_from_inside_keeps_outward_normal() {
        let sphere = unit_sphere();
        let ray = Ray::new(sphere.center(), -Vec3::Z, RayKind::Refraction);
        let hit = sphere.intersect(&ray, Interval::ray(RAY_EPSILON)).unwrap();

        assert!((hit.t - 0.5).abs() < 1e-5);
        // Exiting: the normal points along the ray
        assert!(hit.normal.dot(ray.direction()) > 0.0);
    }

    #[test]
    fn test_surface_origin_does_not_self_hit() {
        let sphere = unit_sphere();
        let p = Vec3::new(0.0, 0.0, -0.5);
        let ray = Ray::new(p, Vec3::new(0.0, 1.0, 1.0), RayKind::Shadow);
        assert!(sphere.intersect(&ray, Interval::ray(RAY_EPSILON)).is_none());
    }
}
