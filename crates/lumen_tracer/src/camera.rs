//! Pinhole camera for ray generation.

use lumen_math::{Ray, RayKind, Vec3};

/// Camera for generating rays into the scene.
///
/// Normalized image coordinates run from (0, 0) at the bottom-left of the
/// image plane to (1, 1) at the top-right.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    eye: Vec3,
    look_at: Vec3,
    up: Vec3,
    /// Vertical field of view in degrees
    fov_y: f32,
    aspect: f32,

    // Cached basis (set by update_basis())
    look: Vec3,
    u: Vec3,
    v: Vec3,
}

impl Camera {
    /// Create a camera at `eye` looking at `look_at`.
    pub fn new(eye: Vec3, look_at: Vec3, up: Vec3, fov_y: f32, aspect: f32) -> Self {
        let mut camera = Self {
            eye,
            look_at,
            up,
            fov_y,
            aspect,
            look: -Vec3::Z,
            u: Vec3::X,
            v: Vec3::Y,
        };
        camera.update_basis();
        camera
    }

    /// Set camera position.
    pub fn with_position(mut self, eye: Vec3, look_at: Vec3, up: Vec3) -> Self {
        self.eye = eye;
        self.look_at = look_at;
        self.up = up;
        self.update_basis();
        self
    }

    /// Set the vertical field of view in degrees.
    pub fn with_fov(mut self, fov_y: f32) -> Self {
        self.fov_y = fov_y;
        self.update_basis();
        self
    }

    /// Match the image plane to a new image shape.
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
        self.update_basis();
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect
    }

    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    /// Ray from the eye through normalized image coordinates `(x, y)`.
    pub fn ray_through(&self, x: f32, y: f32) -> Ray {
        let dir = self.look + (x - 0.5) * self.u + (y - 0.5) * self.v;
        Ray::new(self.eye, dir, RayKind::Visibility)
    }

    fn update_basis(&mut self) {
        self.look = (self.look_at - self.eye).try_normalize().unwrap_or(-Vec3::Z);

        // Fall back to any perpendicular when `up` is parallel to the view
        let right = self
            .look
            .cross(self.up)
            .try_normalize()
            .unwrap_or_else(|| self.look.any_orthonormal_vector());
        let up = right.cross(self.look);

        let aspect = if self.aspect.is_finite() && self.aspect > 0.0 {
            self.aspect
        } else {
            1.0
        };
        let height = 2.0 * (self.fov_y.to_radians() / 2.0).tan();

        self.v = up * height;
        self.u = right * height * aspect;
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO, -Vec3::Z, Vec3::Y, 90.0, 1.0)
    }
}
