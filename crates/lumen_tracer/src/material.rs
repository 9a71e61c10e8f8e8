//! Material trait for local shading and secondary-ray coefficients.

use crate::{intersectable::Intersection, Scene};
use lumen_core::PhongMaterial;
use lumen_math::{Ray, Vec3};

/// Color type alias (RGB, linear, not clamped)
pub type Color = Vec3;

/// What the integrator needs to know about a surface.
///
/// `shade` gives the local (emissive + ambient + direct) term. The
/// remaining methods give the coefficients the integrator uses to weight
/// reflected and refracted rays, and the factor a shadow ray passes through.
pub trait Material: Send + Sync {
    /// Local illumination at `isect`, seen along `ray`.
    fn shade(&self, scene: &Scene, ray: &Ray, isect: &Intersection) -> Color;

    /// Mirror reflectivity at the hit.
    fn reflectivity(&self, isect: &Intersection) -> Color;

    /// Transmissivity at the hit.
    fn transmissivity(&self, isect: &Intersection) -> Color;

    /// Index of refraction at the hit.
    fn refractive_index(&self, isect: &Intersection) -> f32;

    /// Ambient coefficient, also used as the shadow pass-through factor.
    fn ambient(&self, isect: &Intersection) -> Color;

    fn is_reflective(&self) -> bool;

    fn is_transparent(&self) -> bool;
}

impl Material for PhongMaterial {
    fn shade(&self, scene: &Scene, ray: &Ray, isect: &Intersection) -> Color {
        let p = isect.point(ray);
        let view = -ray.direction();

        // Light the side the viewer is on
        let normal = if isect.normal.dot(view) < 0.0 {
            -isect.normal
        } else {
            isect.normal
        };

        let mut color = self.ke + self.ka * scene.ambient();

        for light in scene.lights() {
            let l = light.direction(p);
            let n_dot_l = normal.dot(l);
            if n_dot_l <= 0.0 {
                continue;
            }

            let r = reflect(-l, normal);
            let specular = r.dot(view).max(0.0).powf(self.shininess);

            let attenuation =
                light.shadow_attenuation(scene, p) * light.distance_attenuation(p);

            color += light.color() * attenuation * (self.kd * n_dot_l + self.ks * specular);
        }

        color
    }

    fn reflectivity(&self, _isect: &Intersection) -> Color {
        self.kr
    }

    fn transmissivity(&self, _isect: &Intersection) -> Color {
        self.kt
    }

    fn refractive_index(&self, _isect: &Intersection) -> f32 {
        self.index
    }

    fn ambient(&self, _isect: &Intersection) -> Color {
        self.ka
    }

    fn is_reflective(&self) -> bool {
        PhongMaterial::is_reflective(self)
    }

    fn is_transparent(&self) -> bool {
        PhongMaterial::is_transparent(self)
    }
}

/// Mirror `d` about `n`: `d - 2(n.d)n`.
#[inline]
pub fn reflect(d: Vec3, n: Vec3) -> Vec3 {
    d - 2.0 * n.dot(d) * n
}

/// Refract unit direction `d` at a surface with unit normal `normal`.
///
/// The side is picked from `normal . d`: a positive sign means the ray is
/// leaving the medium, so the normal is flipped and the ratio becomes
/// `1 / index`; otherwise the ratio is `index`. Returns `None` on total
/// internal reflection and for a non-positive index.
///
/// The direction is `(eta cos_i - cos_t) N - eta d`, with `cos_i = N . d`
/// taken under the chosen normal.
pub fn refract(d: Vec3, normal: Vec3, index: f32) -> Option<Vec3> {
    if index <= 0.0 || !index.is_finite() {
        return None;
    }

    let (normal, eta) = if normal.dot(d) > 0.0 {
        (-normal, 1.0 / index)
    } else {
        (normal, index)
    };

    let cos_i = normal.dot(d);
    let cos_t2 = 1.0 - eta * eta * (1.0 - cos_i * cos_i);
    if cos_t2 < 0.0 {
        return None;
    }

    let cos_t = cos_t2.sqrt();
    ((eta * cos_i - cos_t) * normal - eta * d).try_normalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reflect() {
        let d = Vec3::new(1.0, -1.0, 0.0).normalize();
        let r = reflect(d, Vec3::Y);
        assert!((r - Vec3::new(1.0, 1.0, 0.0).normalize()).length() < 1e-6);
    }

    #[test]
    fn test_refract_straight_through() {
        let t = refract(-Vec3::Y, Vec3::Y, 1.5).unwrap();
        assert!((t + Vec3::Y).length() < 1e-6);
    }

    #[test]
    fn test_refract_entering_direction() {
        let d = Vec3::new(0.3, -1.0, 0.0).normalize();

        // Ratio 0.8: tangential part is -0.8 d.x, normal part is -cos_t
        let t = refract(d, Vec3::Y, 0.8).unwrap();
        let expected = Vec3::new(-0.8 * d.x, -(1.0 - 0.64 * d.x * d.x).sqrt(), 0.0);
        assert!((t - expected).length() < 1e-5);
        assert!((t.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_refract_exiting_flips_normal_and_ratio() {
        let d = Vec3::new(0.3, -1.0, 0.0).normalize();

        // Normal points along d: the ray is leaving, so N becomes +Y and the
        // ratio becomes 1 / 0.8
        let t = refract(d, -Vec3::Y, 0.8).unwrap();
        let eta = 1.0 / 0.8;
        let expected = Vec3::new(-eta * d.x, -(1.0 - eta * eta * d.x * d.x).sqrt(), 0.0);
        assert!((t - expected).length() < 1e-5);
        assert!((t.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_total_internal_reflection() {
        // sin(theta) = 0.8 > 1 / 1.5
        let d = Vec3::new(0.8, -0.6, 0.0);
        assert!(refract(d, Vec3::Y, 1.5).is_none());

        // sin(theta) = 0.6 < 1 / 1.5 still refracts
        let d = Vec3::new(0.6, -0.8, 0.0);
        assert!(refract(d, Vec3::Y, 1.5).is_some());
    }

    #[test]
    fn test_non_positive_index_never_refracts() {
        assert!(refract(-Vec3::Y, Vec3::Y, 0.0).is_none());
        assert!(refract(-Vec3::Y, Vec3::Y, -1.0).is_none());
    }
}
