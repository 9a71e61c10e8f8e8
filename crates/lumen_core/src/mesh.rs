//! Triangle mesh description.
//!
//! A `Mesh` is what a scene loader produces: positions, optional per-vertex
//! normals and materials, and indexed faces. It is checked here once, at
//! build time, so the tracer never has to second-guess it per ray.

use lumen_math::{Aabb, Vec3};
use thiserror::Error;

use crate::material::PhongMaterial;

/// Faces whose doubled area falls at or below this are treated as degenerate.
pub const DEGENERATE_AREA_EPSILON: f32 = 1e-10;

/// Structural problems with a mesh.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeshError {
    #[error("Bad mesh: {normals} normals for {vertices} vertices")]
    NormalCountMismatch { normals: usize, vertices: usize },

    #[error("Bad mesh: {materials} materials for {vertices} vertices")]
    MaterialCountMismatch { materials: usize, vertices: usize },

    #[error("Face {face} references vertex {index}, but the mesh has {vertex_count} vertices")]
    FaceIndexOutOfRange {
        face: usize,
        index: u32,
        vertex_count: usize,
    },

    #[error("Face {face} is degenerate (zero area)")]
    DegenerateFace { face: usize },

    #[error("Face {face} does not exist; the mesh has {face_count} faces")]
    FaceNotFound { face: usize, face_count: usize },
}

/// Result type for mesh operations.
pub type MeshResult<T> = Result<T, MeshError>;

/// One triangle of a mesh.
#[derive(Clone, Debug, PartialEq)]
pub struct Face {
    /// Vertex indices, counter-clockwise seen from the front
    pub indices: [u32; 3],
    /// Per-face material override
    pub material: Option<PhongMaterial>,
}

impl Face {
    pub fn new(a: u32, b: u32, c: u32) -> Self {
        Self {
            indices: [a, b, c],
            material: None,
        }
    }

    pub fn with_material(mut self, material: PhongMaterial) -> Self {
        self.material = Some(material);
        self
    }
}

/// An indexed triangle mesh.
#[derive(Clone, Debug)]
pub struct Mesh {
    /// Vertex positions (one Vec3 per vertex)
    pub positions: Vec<Vec3>,

    /// Vertex normals (optional - generated by `ensure_normals`)
    pub normals: Option<Vec<Vec3>>,

    /// Per-vertex materials (optional)
    pub vertex_materials: Option<Vec<PhongMaterial>>,

    /// Triangles
    pub faces: Vec<Face>,

    /// Material for faces with no override and no per-vertex materials
    pub material: PhongMaterial,
}

impl Mesh {
    /// Create a mesh with no faces yet.
    pub fn new(positions: Vec<Vec3>, material: PhongMaterial) -> Self {
        Self {
            positions,
            normals: None,
            vertex_materials: None,
            faces: Vec::new(),
            material,
        }
    }

    pub fn with_normals(mut self, normals: Vec<Vec3>) -> Self {
        self.normals = Some(normals);
        self
    }

    pub fn with_vertex_materials(mut self, materials: Vec<PhongMaterial>) -> Self {
        self.vertex_materials = Some(materials);
        self
    }

    /// Append a face. Fails if any index is out of range.
    pub fn add_face(&mut self, face: Face) -> MeshResult<()> {
        let face_index = self.faces.len();
        self.check_indices(face_index, &face)?;
        self.faces.push(face);
        Ok(())
    }

    /// Check that per-vertex arrays match the vertex count.
    pub fn validate(&self) -> MeshResult<()> {
        let vertices = self.positions.len();

        if let Some(materials) = &self.vertex_materials {
            if materials.len() != vertices {
                return Err(MeshError::MaterialCountMismatch {
                    materials: materials.len(),
                    vertices,
                });
            }
        }

        if let Some(normals) = &self.normals {
            if normals.len() != vertices {
                return Err(MeshError::NormalCountMismatch {
                    normals: normals.len(),
                    vertices,
                });
            }
        }

        Ok(())
    }

    fn check_indices(&self, face_index: usize, face: &Face) -> MeshResult<()> {
        let vertex_count = self.positions.len();
        match face.indices.iter().find(|&&i| i as usize >= vertex_count) {
            Some(&index) => Err(MeshError::FaceIndexOutOfRange {
                face: face_index,
                index,
                vertex_count,
            }),
            None => Ok(()),
        }
    }

    /// Check one face: indices in range and non-zero area.
    pub fn check_face(&self, face_index: usize) -> MeshResult<()> {
        let face = self
            .faces
            .get(face_index)
            .ok_or(MeshError::FaceNotFound {
                face: face_index,
                face_count: self.faces.len(),
            })?;
        self.check_indices(face_index, face)?;

        let [a, b, c] = self.face_positions(face);
        if (b - a).cross(c - a).length() <= DEGENERATE_AREA_EPSILON {
            return Err(MeshError::DegenerateFace { face: face_index });
        }

        Ok(())
    }

    /// Positions of a face's corners. Indices must already be checked.
    pub fn face_positions(&self, face: &Face) -> [Vec3; 3] {
        face.indices.map(|i| self.positions[i as usize])
    }

    /// Unit geometric normal of a face, or None if it is degenerate.
    pub fn face_normal(&self, face: &Face) -> Option<Vec3> {
        let [a, b, c] = self.face_positions(face);
        (b - a).cross(c - a).try_normalize()
    }

    /// Generate per-vertex normals if the mesh has none.
    ///
    /// Calling this again is a no-op.
    pub fn ensure_normals(&mut self) {
        if self.normals.is_none() {
            self.compute_normals();
        }
    }

    /// Compute vertex normals by averaging the unit normals of the valid
    /// faces sharing each vertex, each face weighted equally.
    ///
    /// Vertices used by no valid face keep a zero normal; the triangle test
    /// falls back to the face normal when an interpolated normal vanishes.
    pub fn compute_normals(&mut self) {
        let vertex_count = self.positions.len();
        let mut normals = vec![Vec3::ZERO; vertex_count];
        let mut face_counts = vec![0u32; vertex_count];

        for face_index in 0..self.faces.len() {
            if self.check_face(face_index).is_err() {
                continue;
            }

            let face = &self.faces[face_index];
            let Some(face_normal) = self.face_normal(face) else {
                continue;
            };

            for &i in &face.indices {
                normals[i as usize] += face_normal;
                face_counts[i as usize] += 1;
            }
        }

        for (normal, &count) in normals.iter_mut().zip(&face_counts) {
            if count > 0 {
                *normal /= count as f32;
            }
        }

        log::debug!(
            "Generated {} vertex normals from {} faces",
            vertex_count,
            self.faces.len()
        );

        self.normals = Some(normals);
    }

    /// Material a face is shaded with.
    ///
    /// Face override first, then the average of its per-vertex materials,
    /// then the mesh default.
    pub fn face_material(&self, face: &Face) -> PhongMaterial {
        if let Some(material) = face.material {
            return material;
        }

        match &self.vertex_materials {
            Some(materials) => {
                let corners = face.indices.map(|i| materials[i as usize]);
                PhongMaterial::average(&corners)
            }
            None => self.material,
        }
    }

    /// Axis-aligned bounds of all positions.
    pub fn bounds(&self) -> Aabb {
        if self.positions.is_empty() {
            return Aabb::EMPTY;
        }

        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);

        for pos in &self.positions {
            min = min.min(*pos);
            max = max.max(*pos);
        }

        Aabb::from_points(min, max)
    }

    /// Check if the mesh has normals.
    pub fn has_normals(&self) -> bool {
        self.normals.is_some()
    }

    /// Get the number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.faces.len()
    }

    /// Get the number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }
}
