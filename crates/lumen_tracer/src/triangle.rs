//! Ray-triangle intersection.
//!
//! Plane intersection followed by a same-sign test on three signed
//! sub-triangle areas. The areas double as barycentric coordinates, which
//! are used to interpolate vertex normals.

use lumen_core::DEGENERATE_AREA_EPSILON;
use lumen_math::{Interval, Ray, Vec3, RAY_EPSILON};

/// Below this `|n . d|` the ray is treated as parallel to the plane.
pub const PARALLEL_EPSILON: f32 = 1e-8;

/// Geometric result of a triangle hit, before a material is attached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleHit {
    /// Parameter t along the ray
    pub t: f32,
    /// Barycentric weights (alpha, beta, gamma) of vertices (a, b, c); sum to 1
    pub barycentric: Vec3,
    /// Interpolated unit normal (face normal if no vertex normals were given)
    pub normal: Vec3,
    /// Unit geometric normal, from the winding of (a, b, c)
    pub face_normal: Vec3,
}

/// Intersect `ray` with triangle `vertices`.
///
/// Returns `None` for parallel rays, hits at or behind `RAY_EPSILON`, hits
/// outside `ray_t`, points outside the triangle and zero-area triangles.
pub fn intersect_triangle(
    ray: &Ray,
    ray_t: Interval,
    vertices: [Vec3; 3],
    normals: Option<[Vec3; 3]>,
) -> Option<TriangleHit> {
    let [a, b, c] = vertices;

    let cross = (b - a).cross(c - a);
    let face_normal = cross.try_normalize()?;

    let denom = face_normal.dot(ray.direction());
    if denom.abs() < PARALLEL_EPSILON {
        return None;
    }

    let t = (face_normal.dot(a) - face_normal.dot(ray.origin())) / denom;
    if t <= RAY_EPSILON || !ray_t.contains(t) {
        return None;
    }

    let p = ray.at(t);

    let alpha = (c - b).cross(p - b).dot(face_normal);
    let beta = (a - c).cross(p - c).dot(face_normal);
    let gamma = (b - a).cross(p - a).dot(face_normal);

    if alpha < 0.0 || beta < 0.0 || gamma < 0.0 {
        return None;
    }

    let area = cross.dot(face_normal);
    if area <= DEGENERATE_AREA_EPSILON {
        return None;
    }

    let barycentric = Vec3::new(alpha, beta, gamma) / area;

    let normal = match normals {
        Some([na, nb, nc]) => (na * barycentric.x + nb * barycentric.y + nc * barycentric.z)
            .try_normalize()
            .unwrap_or(face_normal),
        None => face_normal,
    };

    Some(TriangleHit {
        t,
        barycentric,
        normal,
        face_normal,
    })
}
