//! Triangle meshes as intersectable geometry.
//!
//! `Trimesh::build` turns a validated `Mesh` into faces that share one
//! vertex buffer. The mesh can be searched as a whole (linear, nearest hit),
//! or split into its faces so a `BvhNode` can index them individually.

use std::sync::Arc;

use crate::{
    intersectable::{nearest_of, Intersectable, Intersection},
    triangle::intersect_triangle,
};
use lumen_core::{Mesh, MeshError, MeshResult, PhongMaterial};
use lumen_math::{Aabb, Interval, Ray, Vec2, Vec3};

/// Vertex data shared by every face of one mesh.
#[derive(Debug)]
struct MeshGeometry {
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
}

/// A face that was left out of the intersectable set, and why.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceRejection {
    pub face: usize,
    pub error: MeshError,
}

/// One triangle of a `Trimesh`.
pub struct TrimeshFace {
    geometry: Arc<MeshGeometry>,
    ids: [usize; 3],
    material: PhongMaterial,
    bbox: Aabb,
}

impl TrimeshFace {
    /// Vertex indices into the parent mesh.
    pub fn indices(&self) -> [usize; 3] {
        self.ids
    }

    pub fn material(&self) -> &PhongMaterial {
        &self.material
    }

    fn vertices(&self) -> [Vec3; 3] {
        self.ids.map(|i| self.geometry.positions[i])
    }

    fn vertex_normals(&self) -> [Vec3; 3] {
        self.ids.map(|i| self.geometry.normals[i])
    }
}

impl Intersectable for TrimeshFace {
    fn intersect<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<Intersection<'a>> {
        let hit = intersect_triangle(ray, ray_t, self.vertices(), Some(self.vertex_normals()))?;

        Some(Intersection {
            t: hit.t,
            normal: hit.normal,
            uv: Vec2::new(hit.barycentric.x, hit.barycentric.y),
            material: &self.material,
            primitive: self,
        })
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

/// A triangle mesh ready for intersection.
pub struct Trimesh {
    faces: Vec<TrimeshFace>,
    rejected: Vec<FaceRejection>,
    bbox: Aabb,
}

impl Trimesh {
    /// Build intersectable faces from a mesh description.
    ///
    /// Per-vertex array mismatches fail the whole mesh. Faces with bad
    /// indices or zero area are skipped and reported by `rejected_faces`;
    /// the rest of the mesh is still usable. Missing vertex normals are
    /// generated here, once.
    pub fn build(mut mesh: Mesh) -> MeshResult<Self> {
        mesh.validate()?;
        mesh.ensure_normals();

        let mut accepted = Vec::with_capacity(mesh.faces.len());
        let mut rejected = Vec::new();

        for face_index in 0..mesh.faces.len() {
            match mesh.check_face(face_index) {
                Ok(()) => accepted.push(face_index),
                Err(error) => {
                    log::warn!("Skipping face: {}", error);
                    rejected.push(FaceRejection {
                        face: face_index,
                        error,
                    });
                }
            }
        }

        let materials: Vec<PhongMaterial> = accepted
            .iter()
            .map(|&i| mesh.face_material(&mesh.faces[i]))
            .collect();
        let ids: Vec<[usize; 3]> = accepted
            .iter()
            .map(|&i| mesh.faces[i].indices.map(|v| v as usize))
            .collect();

        let geometry = Arc::new(MeshGeometry {
            normals: mesh.normals.take().unwrap_or_default(),
            positions: std::mem::take(&mut mesh.positions),
        });

        let faces: Vec<TrimeshFace> = ids
            .into_iter()
            .zip(materials)
            .map(|(ids, material)| {
                let [a, b, c] = ids.map(|i| geometry.positions[i]);
                TrimeshFace {
                    geometry: Arc::clone(&geometry),
                    ids,
                    material,
                    bbox: Aabb::from_triangle(a, b, c),
                }
            })
            .collect();

        let bbox = faces
            .iter()
            .fold(Aabb::EMPTY, |acc, f| Aabb::surrounding(&acc, &f.bbox));

        log::debug!(
            "Built trimesh: {} vertices, {} faces ({} rejected)",
            geometry.positions.len(),
            faces.len(),
            rejected.len()
        );

        Ok(Self {
            faces,
            rejected,
            bbox,
        })
    }

    pub fn faces(&self) -> &[TrimeshFace] {
        &self.faces
    }

    /// Faces that were dropped at build time.
    pub fn rejected_faces(&self) -> &[FaceRejection] {
        &self.rejected
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Split into individually boxed faces, in face order.
    pub fn into_faces(self) -> Vec<Box<dyn Intersectable>> {
        self.faces
            .into_iter()
            .map(|f| Box::new(f) as Box<dyn Intersectable>)
            .collect()
    }
}

impl Intersectable for Trimesh {
    /// Linear search over all faces; on equal `t` the earlier face wins.
    fn intersect<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<Intersection<'a>> {
        let faces = self.faces.iter().map(|f| f as &'a dyn Intersectable);
        nearest_of(faces, ray, ray_t)
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}
