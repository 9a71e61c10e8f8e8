//! Phong material coefficients.
//!
//! These are plain data. The shading math that uses them lives in
//! `lumen_tracer`, which implements its `Material` trait for this type.

use lumen_math::Vec3;
use serde::{Deserialize, Serialize};

/// Coefficients of the Whitted/Phong local illumination model.
///
/// All color-valued terms are per-channel RGB in [0, 1] by convention, but
/// nothing here clamps them.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhongMaterial {
    /// Emissive color
    pub ke: Vec3,
    /// Ambient reflectance (also the pass-through factor for shadow rays)
    pub ka: Vec3,
    /// Specular reflectance
    pub ks: Vec3,
    /// Diffuse reflectance
    pub kd: Vec3,
    /// Mirror reflectivity
    pub kr: Vec3,
    /// Transmissivity
    pub kt: Vec3,
    /// Phong exponent
    pub shininess: f32,
    /// Index of refraction
    pub index: f32,
}

impl Default for PhongMaterial {
    fn default() -> Self {
        Self {
            ke: Vec3::ZERO,
            ka: Vec3::ZERO,
            ks: Vec3::ZERO,
            kd: Vec3::splat(0.5),
            kr: Vec3::ZERO,
            kt: Vec3::ZERO,
            shininess: 0.0,
            index: 1.0,
        }
    }
}

impl PhongMaterial {
    /// A plain diffuse material.
    pub fn diffuse(kd: Vec3) -> Self {
        Self {
            kd,
            ..Default::default()
        }
    }

    /// A material that only emits `color`.
    pub fn emissive(color: Vec3) -> Self {
        Self {
            ke: color,
            kd: Vec3::ZERO,
            ..Default::default()
        }
    }

    /// A perfect mirror with no local shading.
    pub fn mirror() -> Self {
        Self {
            kd: Vec3::ZERO,
            kr: Vec3::ONE,
            ..Default::default()
        }
    }

    /// A clear dielectric with index of refraction `index`.
    pub fn glass(index: f32) -> Self {
        Self {
            kd: Vec3::ZERO,
            kt: Vec3::ONE,
            index,
            ..Default::default()
        }
    }

    pub fn with_ambient(mut self, ka: Vec3) -> Self {
        self.ka = ka;
        self
    }

    pub fn with_specular(mut self, ks: Vec3, shininess: f32) -> Self {
        self.ks = ks;
        self.shininess = shininess;
        self
    }

    pub fn with_reflectivity(mut self, kr: Vec3) -> Self {
        self.kr = kr;
        self
    }

    pub fn with_transmissivity(mut self, kt: Vec3, index: f32) -> Self {
        self.kt = kt;
        self.index = index;
        self
    }

    /// True if reflection rays should be spawned.
    pub fn is_reflective(&self) -> bool {
        self.kr != Vec3::ZERO
    }

    /// True if refraction rays should be spawned and shadow rays pass through.
    pub fn is_transparent(&self) -> bool {
        self.kt != Vec3::ZERO
    }

    /// Equal-weight blend of several materials.
    ///
    /// Used to give a face the average of its per-vertex materials.
    /// Returns the default material for an empty slice.
    pub fn average(materials: &[PhongMaterial]) -> PhongMaterial {
        if materials.is_empty() {
            return PhongMaterial::default();
        }

        let w = 1.0 / materials.len() as f32;
        materials.iter().fold(
            PhongMaterial {
                ke: Vec3::ZERO,
                ka: Vec3::ZERO,
                ks: Vec3::ZERO,
                kd: Vec3::ZERO,
                kr: Vec3::ZERO,
                kt: Vec3::ZERO,
                shininess: 0.0,
                index: 0.0,
            },
            |acc, m| PhongMaterial {
                ke: acc.ke + m.ke * w,
                ka: acc.ka + m.ka * w,
                ks: acc.ks + m.ks * w,
                kd: acc.kd + m.kd * w,
                kr: acc.kr + m.kr * w,
                kt: acc.kt + m.kt * w,
                shininess: acc.shininess + m.shininess * w,
                index: acc.index + m.index * w,
            },
        )
    }
}
