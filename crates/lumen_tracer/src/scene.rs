//! Scene: geometry, lights, camera and environment, read-only while tracing.

use crate::{
    intersectable::{Intersectable, IntersectableList, Intersection},
    trimesh::{FaceRejection, Trimesh},
    BvhNode, Camera, Color, CubeMap, Light,
};
use lumen_core::{Mesh, MeshResult};
use lumen_math::{Interval, Ray, Vec3, RAY_EPSILON};

/// Everything a trace needs to know about the world.
pub struct Scene {
    world: Box<dyn Intersectable>,
    lights: Vec<Light>,
    camera: Camera,
    ambient: Color,
    environment: Option<CubeMap>,
    rejected_faces: Vec<FaceRejection>,
}

impl Scene {
    /// Nearest hit along `ray` past `RAY_EPSILON`.
    pub fn nearest_intersection(&self, ray: &Ray) -> Option<Intersection<'_>> {
        self.world.intersect(ray, Interval::ray(RAY_EPSILON))
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Scene-wide ambient intensity.
    pub fn ambient(&self) -> Color {
        self.ambient
    }

    pub fn has_environment(&self) -> bool {
        self.environment.is_some()
    }

    /// Environment color along `dir`, if a cube map is set.
    pub fn environment_color(&self, dir: Vec3) -> Option<Color> {
        self.environment.as_ref().map(|env| env.color(dir))
    }

    /// Mesh faces dropped while building the scene.
    pub fn rejected_faces(&self) -> &[FaceRejection] {
        &self.rejected_faces
    }
}

/// Collects objects and settings, then freezes them into a `Scene`.
pub struct SceneBuilder {
    objects: Vec<Box<dyn Intersectable>>,
    lights: Vec<Light>,
    camera: Camera,
    ambient: Color,
    environment: Option<CubeMap>,
    rejected_faces: Vec<FaceRejection>,
    use_bvh: bool,
}

impl SceneBuilder {
    pub fn new(camera: Camera) -> Self {
        Self {
            objects: Vec::new(),
            lights: Vec::new(),
            camera,
            ambient: Color::ZERO,
            environment: None,
            rejected_faces: Vec::new(),
            use_bvh: true,
        }
    }

    pub fn add_object(mut self, object: impl Intersectable + 'static) -> Self {
        self.objects.push(Box::new(object));
        self
    }

    /// Add every usable face of `mesh`.
    ///
    /// Fails only when the mesh as a whole is malformed; bad faces are
    /// skipped and kept in `Scene::rejected_faces`.
    pub fn add_mesh(mut self, mesh: Mesh) -> MeshResult<Self> {
        let trimesh = Trimesh::build(mesh)?;
        self.rejected_faces
            .extend(trimesh.rejected_faces().iter().cloned());
        self.objects.extend(trimesh.into_faces());
        Ok(self)
    }

    pub fn add_light(mut self, light: Light) -> Self {
        self.lights.push(light);
        self
    }

    pub fn with_ambient(mut self, ambient: Color) -> Self {
        self.ambient = ambient;
        self
    }

    pub fn with_environment(mut self, environment: CubeMap) -> Self {
        self.environment = Some(environment);
        self
    }

    /// Index the objects in a BVH (default) or search them linearly.
    pub fn with_bvh(mut self, use_bvh: bool) -> Self {
        self.use_bvh = use_bvh;
        self
    }

    pub fn build(self) -> Scene {
        let count = self.objects.len();
        let world: Box<dyn Intersectable> = if self.use_bvh {
            Box::new(BvhNode::new(self.objects))
        } else {
            Box::new(IntersectableList::from(self.objects))
        };

        log::debug!(
            "Built scene: {} primitives, {} lights, {} rejected faces, bvh: {}",
            count,
            self.lights.len(),
            self.rejected_faces.len(),
            self.use_bvh
        );

        Scene {
            world,
            lights: self.lights,
            camera: self.camera,
            ambient: self.ambient,
            environment: self.environment,
            rejected_faces: self.rejected_faces,
        }
    }
}
