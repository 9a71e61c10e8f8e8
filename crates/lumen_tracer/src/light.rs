//! Light sources and their attenuation model.

use crate::{Color, Scene};
use lumen_math::{Ray, RayKind, Vec3};
use serde::{Deserialize, Serialize};

/// A light in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Light {
    /// Infinitely far away; every point sees it along the same direction.
    Directional {
        color: Color,
        /// Direction the light travels in
        orientation: Vec3,
    },
    /// Positioned light with `1 / (constant + linear d + quadratic d^2)` falloff.
    Point {
        color: Color,
        position: Vec3,
        #[serde(default = "default_constant")]
        constant: f32,
        #[serde(default)]
        linear: f32,
        #[serde(default)]
        quadratic: f32,
    },
}

fn default_constant() -> f32 {
    1.0
}

impl Light {
    pub fn directional(color: Color, orientation: Vec3) -> Self {
        Light::Directional {
            color,
            orientation: orientation.normalize_or_zero(),
        }
    }

    /// A point light with no falloff.
    pub fn point(color: Color, position: Vec3) -> Self {
        Light::Point {
            color,
            position,
            constant: 1.0,
            linear: 0.0,
            quadratic: 0.0,
        }
    }

    /// Set the falloff coefficients. No effect on directional lights.
    pub fn with_attenuation(mut self, c0: f32, c1: f32, c2: f32) -> Self {
        if let Light::Point {
            constant,
            linear,
            quadratic,
            ..
        } = &mut self
        {
            *constant = c0;
            *linear = c1;
            *quadratic = c2;
        }
        self
    }

    pub fn color(&self) -> Color {
        match self {
            Light::Directional { color, .. } | Light::Point { color, .. } => *color,
        }
    }

    /// Falloff with distance from `p`, in (0, 1].
    pub fn distance_attenuation(&self, p: Vec3) -> f32 {
        match self {
            Light::Directional { .. } => 1.0,
            Light::Point {
                position,
                constant,
                linear,
                quadratic,
                ..
            } => {
                let d = p.distance(*position);
                let denom = constant + linear * d + quadratic * d * d;
                if denom <= 0.0 || !denom.is_finite() {
                    return 1.0;
                }
                (1.0 / denom).min(1.0)
            }
        }
    }

    /// Unit direction from `p` toward the light.
    pub fn direction(&self, p: Vec3) -> Vec3 {
        match self {
            Light::Directional { orientation, .. } => (-*orientation).normalize_or_zero(),
            Light::Point { position, .. } => (*position - p).normalize_or_zero(),
        }
    }

    /// Fraction of the light that reaches `p`, per channel in [0, 1].
    ///
    /// An opaque occluder blocks everything. A transparent one lets its
    /// ambient coefficient through. The light color is not applied here.
    pub fn shadow_attenuation(&self, scene: &Scene, p: Vec3) -> Color {
        let shadow_ray = Ray::new(p, self.direction(p), RayKind::Shadow);

        let Some(hit) = scene.nearest_intersection(&shadow_ray) else {
            return Color::ONE;
        };

        // Occluders at or past a point light are behind it
        if let Light::Point { position, .. } = self {
            if hit.t >= p.distance(*position) {
                return Color::ONE;
            }
        }

        if !hit.material.is_transparent() {
            return Color::ZERO;
        }

        hit.material.ambient(&hit).clamp(Color::ZERO, Color::ONE)
    }
}
