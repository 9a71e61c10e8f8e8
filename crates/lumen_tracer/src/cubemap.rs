//! Cube-map environment, sampled when a ray escapes the scene.

use std::sync::Arc;

use crate::Color;
use lumen_core::{Texture, TextureCache, TextureResult};
use lumen_math::Vec3;

/// Faces of a cube map, in storage order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CubeFace {
    PositiveX,
    NegativeX,
    PositiveY,
    NegativeY,
    PositiveZ,
    NegativeZ,
}

impl CubeFace {
    pub const ALL: [CubeFace; 6] = [
        CubeFace::PositiveX,
        CubeFace::NegativeX,
        CubeFace::PositiveY,
        CubeFace::NegativeY,
        CubeFace::PositiveZ,
        CubeFace::NegativeZ,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// Six textures around the scene.
///
/// Faces follow the OpenGL cube-map layout: a direction picks the face of
/// its largest component, and the other two components give the texture
/// coordinates on that face.
#[derive(Debug, Clone)]
pub struct CubeMap {
    faces: [Arc<Texture>; 6],
}

impl CubeMap {
    /// Build from textures in `CubeFace::ALL` order.
    pub fn new(faces: [Arc<Texture>; 6]) -> Self {
        Self { faces }
    }

    /// The same color in every direction.
    pub fn uniform(color: Color) -> Self {
        let texture = Arc::new(Texture::solid_color(color));
        Self::new(std::array::from_fn(|_| Arc::clone(&texture)))
    }

    /// Load six images, in `CubeFace::ALL` order, through `cache`.
    pub fn load(paths: [&str; 6], cache: &mut TextureCache) -> TextureResult<Self> {
        let [px, nx, py, ny, pz, nz] = paths;
        Ok(Self::new([
            cache.load(px)?,
            cache.load(nx)?,
            cache.load(py)?,
            cache.load(ny)?,
            cache.load(pz)?,
            cache.load(nz)?,
        ]))
    }

    pub fn face(&self, face: CubeFace) -> &Texture {
        &self.faces[face.index()]
    }

    /// Environment color seen along `dir`.
    pub fn color(&self, dir: Vec3) -> Color {
        let abs = dir.abs();

        let (face, major, sc, tc) = if abs.x >= abs.y && abs.x >= abs.z {
            if dir.x >= 0.0 {
                (CubeFace::PositiveX, abs.x, -dir.z, -dir.y)
            } else {
                (CubeFace::NegativeX, abs.x, dir.z, -dir.y)
            }
        } else if abs.y >= abs.z {
            if dir.y >= 0.0 {
                (CubeFace::PositiveY, abs.y, dir.x, dir.z)
            } else {
                (CubeFace::NegativeY, abs.y, dir.x, -dir.z)
            }
        } else if dir.z >= 0.0 {
            (CubeFace::PositiveZ, abs.z, dir.x, -dir.y)
        } else {
            (CubeFace::NegativeZ, abs.z, -dir.x, -dir.y)
        };

        if major <= 0.0 || !major.is_finite() {
            return Color::ZERO;
        }

        let u = 0.5 * (sc / major + 1.0);
        let v = 0.5 * (tc / major + 1.0);
        self.faces[face.index()].sample(u, v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tagged() -> CubeMap {
        // Each face a different solid color
        let colors = [
            Vec3::X,
            Vec3::new(0.5, 0.0, 0.0),
            Vec3::Y,
            Vec3::new(0.0, 0.5, 0.0),
            Vec3::Z,
            Vec3::new(0.0, 0.0, 0.5),
        ];
        CubeMap::new(colors.map(|c| Arc::new(Texture::solid_color(c))))
    }

    #[test]
    fn test_uniform_cubemap() {
        let map = CubeMap::uniform(Vec3::new(0.2, 0.4, 0.6));
        for dir in [Vec3::X, -Vec3::Y, Vec3::new(0.3, -0.2, 0.9)] {
            assert!((map.color(dir) - Vec3::new(0.2, 0.4, 0.6)).length() < 1e-6);
        }
    }

    #[test]
    fn test_major_axis_selects_face() {
        let map = tagged();
        assert_eq!(map.color(Vec3::new(2.0, 0.5, -0.1)), Vec3::X);
        assert_eq!(map.color(Vec3::new(-2.0, 0.5, -0.1)), Vec3::new(0.5, 0.0, 0.0));
        assert_eq!(map.color(Vec3::new(0.1, 3.0, 0.2)), Vec3::Y);
        assert_eq!(map.color(Vec3::new(0.1, -3.0, 0.2)), Vec3::new(0.0, 0.5, 0.0));
        assert_eq!(map.color(Vec3::new(0.1, 0.2, 1.0)), Vec3::Z);
        assert_eq!(map.color(Vec3::new(0.1, 0.2, -1.0)), Vec3::new(0.0, 0.0, 0.5));
    }

    #[test]
    fn test_face_coordinates() {
        // Left column black, right column white on the -Z face
        let gradient = Arc::new(Texture::new(2, 1, vec![Vec3::ZERO, Vec3::ONE], "gradient"));
        let black = Arc::new(Texture::solid_color(Vec3::ZERO));
        let mut faces: [Arc<Texture>; 6] = std::array::from_fn(|_| Arc::clone(&black));
        faces[CubeFace::NegativeZ as usize] = gradient;
        let map = CubeMap::new(faces);

        // Looking down -Z, +X is on the left of the face image
        assert!(map.color(Vec3::new(0.999, 0.0, -1.0)).x < 0.01);
        assert!(map.color(Vec3::new(-0.999, 0.0, -1.0)).x > 0.99);
    }

    #[test]
    fn test_zero_direction_is_black() {
        assert_eq!(tagged().color(Vec3::ZERO), Color::ZERO);
    }

    #[test]
    fn test_load_missing_faces_fails() {
        let mut cache = TextureCache::with_base_dir("/nonexistent");
        let paths = ["px.png", "nx.png", "py.png", "ny.png", "pz.png", "nz.png"];
        assert!(CubeMap::load(paths, &mut cache).is_err());
    }
}
