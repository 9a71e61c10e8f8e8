use crate::Vec3;

/// Why a ray was cast.
///
/// Carried for diagnostics only; it never changes how a ray is intersected.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum RayKind {
    Visibility,
    Shadow,
    Reflection,
    Refraction,
}

/// A ray in 3D space with origin, unit direction, and a purpose tag.
///
/// Rays are immutable once built: `origin + t * direction` is the only
/// thing you can ask of them.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    origin: Vec3,
    direction: Vec3,
    kind: RayKind,
}

impl Ray {
    /// Create a new ray. The direction is normalized.
    ///
    /// A zero-length direction is kept as zero so that it can never hit
    /// anything instead of poisoning later math with NaN.
    pub fn new(origin: Vec3, direction: Vec3, kind: RayKind) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
            kind,
        }
    }

    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    #[inline]
    pub fn kind(&self) -> RayKind {
        self.kind
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}
