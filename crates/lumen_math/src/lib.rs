// Re-export glam for convenience
pub use glam::*;

// Lumen math types
mod aabb;
mod interval;
mod ray;
pub use aabb::Aabb;
pub use interval::Interval;
pub use ray::{Ray, RayKind};

/// Minimum parametric distance accepted for a hit.
///
/// Rejects self-intersection of secondary rays leaving a surface.
pub const RAY_EPSILON: f32 = 1e-4;
