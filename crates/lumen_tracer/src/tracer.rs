//! Recursive Whitted-style ray tracer.
//!
//! Implements:
//! - Recursive reflection and refraction with a depth budget
//! - Sub-pixel antialiasing patterns
//! - An 8-bit RGB output buffer, filled per pixel or in parallel buckets

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rayon::prelude::*;
use thiserror::Error;

use crate::{
    bucket::{generate_buckets, render_bucket, BucketResult},
    material::{reflect, refract},
    Color, ConfigError, RenderConfig, Scene,
};
use lumen_math::{Ray, RayKind, Vec3};

/// Errors that can stop a full-image render.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to build render thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Render cancelled after {done} of {total} buckets")]
    Cancelled { done: usize, total: usize },
}

pub type RenderResult<T> = Result<T, RenderError>;

/// One ray cast by the integrator, as seen by `RayTracer::trace_with_log`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayRecord {
    pub kind: RayKind,
    pub origin: Vec3,
    pub direction: Vec3,
    /// Depth budget the ray was traced with
    pub depth: i32,
    /// Distance to the nearest hit, `None` on a miss or an exhausted budget
    pub t: Option<f32>,
}

/// Summary of a finished render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStats {
    pub pixels: usize,
    pub buckets: usize,
    pub elapsed: Duration,
}

/// Sink for integrator rays. `()` drops them.
trait RayLog {
    fn record(&mut self, ray: &Ray, depth: i32, t: Option<f32>);
}

impl RayLog for () {
    #[inline]
    fn record(&mut self, _ray: &Ray, _depth: i32, _t: Option<f32>) {}
}

impl RayLog for Vec<RayRecord> {
    fn record(&mut self, ray: &Ray, depth: i32, t: Option<f32>) {
        self.push(RayRecord {
            kind: ray.kind(),
            origin: ray.origin(),
            direction: ray.direction(),
            depth,
            t,
        });
    }
}

/// Owns the loaded scene, the render settings and the output buffer.
pub struct RayTracer {
    scene: Option<Arc<Scene>>,
    config: RenderConfig,
    buffer: Vec<u8>,
    buffer_width: u32,
    buffer_height: u32,
}

impl RayTracer {
    /// Create a tracer with a zeroed buffer sized from `config`.
    pub fn new(config: RenderConfig) -> Self {
        let mut tracer = Self {
            scene: None,
            buffer: Vec::new(),
            buffer_width: 0,
            buffer_height: 0,
            config,
        };
        tracer.trace_setup(tracer.config.width, tracer.config.height);
        tracer
    }

    /// Replace the current scene.
    pub fn load_scene(&mut self, scene: Scene) {
        self.scene = Some(Arc::new(scene));
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_deref()
    }

    pub fn scene_loaded(&self) -> bool {
        self.scene.is_some()
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Replace the render settings. The buffer is resized on the next
    /// `render` or `trace_setup`.
    pub fn set_config(&mut self, config: RenderConfig) {
        self.config = config;
    }

    /// Prepare the buffer for a `width` x `height` image.
    ///
    /// Reallocates when the size changes and zero-fills in every case.
    pub fn trace_setup(&mut self, width: u32, height: u32) {
        if self.buffer_width != width || self.buffer_height != height {
            self.buffer_width = width;
            self.buffer_height = height;
            self.buffer = vec![0; width as usize * height as usize * 3];
        } else {
            self.buffer.fill(0);
        }
    }

    /// Row-major RGB bytes with their width and height.
    ///
    /// Row `j` holds image coordinate `y = j / height`, so row 0 is the
    /// bottom of the picture.
    pub fn buffer(&self) -> (&[u8], u32, u32) {
        (&self.buffer, self.buffer_width, self.buffer_height)
    }

    /// Aspect ratio of the loaded camera, 1 without a scene.
    pub fn aspect_ratio(&self) -> f32 {
        self.scene
            .as_ref()
            .map_or(1.0, |scene| scene.camera().aspect_ratio())
    }

    /// Color seen along `ray` with `depth` bounces left, unclamped.
    pub fn trace_ray(&self, ray: &Ray, depth: i32) -> Color {
        match &self.scene {
            Some(scene) => trace_ray(scene, ray, depth, &mut ()),
            None => Color::ZERO,
        }
    }

    /// Clamped color through normalized image coordinates `(x, y)`.
    pub fn trace(&self, x: f32, y: f32) -> Color {
        match &self.scene {
            Some(scene) => self.trace_in(scene, x, y, &mut ()),
            None => Color::ZERO,
        }
    }

    /// Like `trace`, also returning every ray the integrator cast.
    pub fn trace_with_log(&self, x: f32, y: f32) -> (Color, Vec<RayRecord>) {
        let mut log = Vec::new();
        let color = match &self.scene {
            Some(scene) => self.trace_in(scene, x, y, &mut log),
            None => Color::ZERO,
        };
        (color, log)
    }

    fn trace_in<L: RayLog>(&self, scene: &Scene, x: f32, y: f32, log: &mut L) -> Color {
        let ray = scene.camera().ray_through(x, y);
        let color = trace_ray(scene, &ray, self.config.max_depth, log);
        color.clamp(Color::ZERO, Color::ONE)
    }

    /// Antialiased color of pixel `(i, j)`, without touching the buffer.
    pub fn sample_pixel(&self, i: u32, j: u32) -> Color {
        if !self.scene_loaded() || self.buffer_width == 0 || self.buffer_height == 0 {
            return Color::ZERO;
        }

        let width = self.buffer_width as f32;
        let height = self.buffer_height as f32;
        let x = i as f32 / width;
        let y = j as f32 / height;

        let offsets = self.config.antialiasing.offsets();
        let sum = offsets.iter().fold(Color::ZERO, |acc, &(dx, dy)| {
            acc + self.trace(x + dx / width, y + dy / height)
        });

        sum / offsets.len() as f32
    }

    /// Trace pixel `(i, j)` and store it in the buffer.
    ///
    /// Returns black and writes nothing when no scene is loaded or the
    /// pixel is outside the buffer.
    pub fn trace_pixel(&mut self, i: u32, j: u32) -> Color {
        if !self.scene_loaded() || i >= self.buffer_width || j >= self.buffer_height {
            return Color::ZERO;
        }

        let color = self.sample_pixel(i, j);
        self.write_pixel(i, j, color);
        color
    }

    fn write_pixel(&mut self, i: u32, j: u32, color: Color) {
        let offset = (i as usize + j as usize * self.buffer_width as usize) * 3;
        self.buffer[offset..offset + 3].copy_from_slice(&quantize(color));
    }

    /// Render the whole image in parallel buckets.
    ///
    /// Checks `cancel` before each bucket starts. Buckets that finished
    /// before cancellation are still written to the buffer.
    pub fn render(&mut self, cancel: &AtomicBool) -> RenderResult<RenderStats> {
        self.config.validate()?;

        let start = Instant::now();
        let (width, height) = (self.config.width, self.config.height);
        self.trace_setup(width, height);

        if !self.scene_loaded() {
            log::warn!("No scene loaded; the image stays black");
            return Ok(RenderStats {
                pixels: 0,
                buckets: 0,
                elapsed: start.elapsed(),
            });
        }

        let buckets = generate_buckets(width, height, self.config.bucket_size);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.threads.unwrap_or(0))
            .build()?;

        log::info!(
            "Rendering {}x{} in {} buckets on {} threads ({:?} antialiasing, depth {})",
            width,
            height,
            buckets.len(),
            pool.current_num_threads(),
            self.config.antialiasing,
            self.config.max_depth
        );

        let tracer = &*self;
        let results: Vec<BucketResult> = pool.install(|| {
            buckets
                .par_iter()
                .filter_map(|bucket| {
                    if cancel.load(Ordering::Relaxed) {
                        return None;
                    }
                    Some(render_bucket(tracer, bucket))
                })
                .collect()
        });

        let mut pixels = 0;
        for result in &results {
            let bucket = result.bucket;
            for (k, color) in result.pixels.iter().enumerate() {
                let k = k as u32;
                self.write_pixel(bucket.x + k % bucket.width, bucket.y + k / bucket.width, *color);
            }
            pixels += result.pixels.len();
        }

        if results.len() < buckets.len() {
            log::info!("Render cancelled: {}/{} buckets", results.len(), buckets.len());
            return Err(RenderError::Cancelled {
                done: results.len(),
                total: buckets.len(),
            });
        }

        let elapsed = start.elapsed();
        log::info!("Rendered {} pixels in {:.2?}", pixels, elapsed);

        Ok(RenderStats {
            pixels,
            buckets: results.len(),
            elapsed,
        })
    }
}

/// The recursive integrator.
///
/// The depth check comes before any geometry work, so a call tree started
/// at depth `d` is at most `d + 2` rays deep.
fn trace_ray<L: RayLog>(scene: &Scene, ray: &Ray, depth: i32, log: &mut L) -> Color {
    let hit = if depth < 0 {
        None
    } else {
        scene.nearest_intersection(ray)
    };

    let Some(isect) = hit else {
        log.record(ray, depth, None);
        return scene
            .environment_color(ray.direction())
            .map_or(Color::ZERO, finite_or_zero);
    };
    log.record(ray, depth, Some(isect.t));

    let material = isect.material;
    let p = isect.point(ray);
    let mut color = material.shade(scene, ray, &isect);

    if material.is_reflective() {
        let reflected = Ray::new(p, reflect(ray.direction(), isect.normal), RayKind::Reflection);
        color += trace_ray(scene, &reflected, depth - 1, log) * material.reflectivity(&isect);
    }

    if material.is_transparent() {
        let index = material.refractive_index(&isect);
        // None on total internal reflection: only the other terms contribute
        if let Some(dir) = refract(ray.direction(), isect.normal, index) {
            let refracted = Ray::new(p, dir, RayKind::Refraction);
            color += trace_ray(scene, &refracted, depth - 1, log) * material.transmissivity(&isect);
        }
    }

    finite_or_zero(color)
}

/// Replace NaN and infinite channels with zero.
fn finite_or_zero(color: Color) -> Color {
    let channel = |c: f32| if c.is_finite() { c } else { 0.0 };
    Color::new(channel(color.x), channel(color.y), channel(color.z))
}

/// `floor(255 c)` per channel of a color already clamped to [0, 1].
fn quantize(color: Color) -> [u8; 3] {
    let byte = |c: f32| (255.0 * c.clamp(0.0, 1.0)).floor() as u8;
    [byte(color.x), byte(color.y), byte(color.z)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AntiAliasing, Camera, CubeMap, Light, SceneBuilder, Sphere};
    use lumen_core::{Face, Mesh, PhongMaterial};

    /// Two-triangle quad from four corners, wound counter-clockwise.
    fn quad(corners: [Vec3; 4], material: PhongMaterial) -> Mesh {
        let mut mesh = Mesh::new(corners.to_vec(), material);
        mesh.add_face(Face::new(0, 1, 2)).unwrap();
        mesh.add_face(Face::new(0, 2, 3)).unwrap();
        mesh
    }

    /// 2x2 floor at y = 0 facing +Y.
    fn floor(material: PhongMaterial) -> Mesh {
        quad(
            [
                Vec3::new(-1.0, 0.0, -1.0),
                Vec3::new(-1.0, 0.0, 1.0),
                Vec3::new(1.0, 0.0, 1.0),
                Vec3::new(1.0, 0.0, -1.0),
            ],
            material,
        )
    }

    /// Off the floor's diagonal, so the center ray lands inside one face.
    const TARGET: Vec3 = Vec3::new(0.25, 0.0, -0.5);

    fn looking_down(height: f32) -> Camera {
        Camera::new(TARGET + Vec3::Y * height, TARGET, Vec3::Z, 45.0, 1.0)
    }

    fn tracer_with(scene: Scene, config: RenderConfig) -> RayTracer {
        let mut tracer = RayTracer::new(config);
        tracer.load_scene(scene);
        tracer
    }

    #[test]
    fn test_lit_quad_matches_local_shading() {
        let scene = SceneBuilder::new(looking_down(3.0))
            .add_mesh(floor(PhongMaterial::default()))
            .unwrap()
            .add_light(Light::point(Color::ONE, TARGET + Vec3::Y * 2.0))
            .build();

        let ray = scene.camera().ray_through(0.5, 0.5);
        let isect = scene.nearest_intersection(&ray).unwrap();
        let local = isect.material.shade(&scene, &ray, &isect);

        let light = scene.lights()[0];
        assert_eq!(light.distance_attenuation(isect.point(&ray)), 1.0);
        assert_eq!(light.shadow_attenuation(&scene, isect.point(&ray)), Color::ONE);

        let tracer = tracer_with(scene, RenderConfig::default());
        let color = tracer.trace(0.5, 0.5);

        assert!((color - local).length() < 1e-6);
        assert!((color - Vec3::splat(0.5)).length() < 1e-5);
    }

    #[test]
    fn test_trace_pixel_quantizes() {
        let scene = SceneBuilder::new(looking_down(3.0))
            .add_mesh(floor(PhongMaterial::default()))
            .unwrap()
            .add_light(Light::point(Color::ONE, TARGET + Vec3::Y * 2.0))
            .build();
        let mut tracer = tracer_with(scene, RenderConfig::default().with_resolution(2, 2));

        // Pixel (1, 1) of a 2x2 image is the image center
        tracer.trace_pixel(1, 1);
        let (buffer, width, _) = tracer.buffer();
        let offset = (1 + width as usize) * 3;
        assert_eq!(&buffer[offset..offset + 3], &[127, 127, 127]);
        assert_eq!(&buffer[..3], &[0, 0, 0]);
    }

    #[test]
    fn test_mirror_reflects_environment() {
        let sky = Vec3::new(0.2, 0.4, 0.6);
        let camera = Camera::new(TARGET + Vec3::new(0.0, 1.0, 1.0), TARGET, Vec3::Y, 30.0, 1.0);
        let scene = SceneBuilder::new(camera)
            .add_mesh(floor(PhongMaterial::mirror()))
            .unwrap()
            .with_environment(CubeMap::uniform(sky))
            .build();
        let tracer = tracer_with(scene, RenderConfig::default());

        let (color, rays) = tracer.trace_with_log(0.5, 0.5);
        assert!((color - sky).length() < 1e-5);
        assert_eq!(rays.len(), 2);
        assert_eq!(rays[1].kind, RayKind::Reflection);
        assert_eq!(rays[1].t, None);
    }

    #[test]
    fn test_antialiasing_hard_edge_is_gray() {
        // White emitter covering x >= 0 at z = -1
        let emitter = quad(
            [
                Vec3::new(0.0, -2.0, -1.0),
                Vec3::new(2.0, -2.0, -1.0),
                Vec3::new(2.0, 2.0, -1.0),
                Vec3::new(0.0, 2.0, -1.0),
            ],
            PhongMaterial::emissive(Color::ONE),
        );
        let scene = SceneBuilder::new(Camera::default())
            .add_mesh(emitter)
            .unwrap()
            .build();
        let config = RenderConfig::default()
            .with_resolution(2, 2)
            .with_antialiasing(AntiAliasing::Grid2x2);
        let mut tracer = tracer_with(scene, config);

        // Pixel (1, 1) straddles the edge: two of four samples land on it
        let color = tracer.trace_pixel(1, 1);
        assert!((color - Vec3::splat(0.5)).length() < 1e-5);

        let (buffer, _, _) = tracer.buffer();
        assert_eq!(&buffer[9..12], &[127, 127, 127]);
    }

    #[test]
    fn test_negative_depth_is_black() {
        let scene = SceneBuilder::new(looking_down(3.0))
            .add_mesh(floor(PhongMaterial::emissive(Color::ONE)))
            .unwrap()
            .build();
        let tracer = tracer_with(scene, RenderConfig::default().with_max_depth(-1));

        assert_eq!(tracer.trace(0.5, 0.5), Color::ZERO);

        let ray = Ray::new(TARGET + Vec3::Y * 3.0, -Vec3::Y, RayKind::Visibility);
        assert_eq!(tracer.trace_ray(&ray, -1), Color::ZERO);
        assert_eq!(tracer.trace_ray(&ray, 0), Color::ONE);
    }

    #[test]
    fn test_negative_depth_sees_environment() {
        let scene = SceneBuilder::new(looking_down(3.0))
            .add_mesh(floor(PhongMaterial::emissive(Color::ONE)))
            .unwrap()
            .with_environment(CubeMap::uniform(Vec3::splat(0.25)))
            .build();
        let tracer = tracer_with(scene, RenderConfig::default().with_max_depth(-1));

        assert_eq!(tracer.trace(0.5, 0.5), Vec3::splat(0.25));
    }

    #[test]
    fn test_recursion_depth_is_bounded() {
        // Two facing mirrors; a vertical ray bounces until the budget runs out
        let ceiling = quad(
            [
                Vec3::new(-1.0, 2.0, -1.0),
                Vec3::new(1.0, 2.0, -1.0),
                Vec3::new(1.0, 2.0, 1.0),
                Vec3::new(-1.0, 2.0, 1.0),
            ],
            PhongMaterial::mirror(),
        );
        let scene = SceneBuilder::new(looking_down(1.0))
            .add_mesh(floor(PhongMaterial::mirror()))
            .unwrap()
            .add_mesh(ceiling)
            .unwrap()
            .build();
        let tracer = tracer_with(scene, RenderConfig::default().with_max_depth(3));

        let (_, rays) = tracer.trace_with_log(0.5, 0.5);
        let depths: Vec<i32> = rays.iter().map(|r| r.depth).collect();
        assert_eq!(depths, vec![3, 2, 1, 0, -1]);
        assert_eq!(rays[4].t, None);
    }

    #[test]
    fn test_total_internal_reflection_spawns_no_refraction() {
        let glass = PhongMaterial::glass(1.5);
        let big_floor = quad(
            [
                Vec3::new(-10.0, 0.0, -10.0),
                Vec3::new(-10.0, 0.0, 10.0),
                Vec3::new(10.0, 0.0, 10.0),
                Vec3::new(10.0, 0.0, -10.0),
            ],
            glass,
        );

        // Grazing view: sin(theta) = 3 / sqrt(10) > 1 / 1.5
        let camera = Camera::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(3.0, 0.0, 0.0), Vec3::Y, 30.0, 1.0);
        let scene = SceneBuilder::new(camera)
            .add_mesh(big_floor.clone())
            .unwrap()
            .build();
        let tracer = tracer_with(scene, RenderConfig::default());

        let (_, rays) = tracer.trace_with_log(0.5, 0.5);
        assert_eq!(rays.len(), 1);
        assert!(rays.iter().all(|r| r.kind != RayKind::Refraction));

        // Head-on, the same surface refracts
        let scene = SceneBuilder::new(looking_down(1.0))
            .add_mesh(big_floor)
            .unwrap()
            .build();
        let tracer = tracer_with(scene, RenderConfig::default());

        let (_, rays) = tracer.trace_with_log(0.5, 0.5);
        assert_eq!(rays.len(), 2);
        assert_eq!(rays[1].kind, RayKind::Refraction);
    }

    #[test]
    fn test_refraction_adds_transmitted_environment() {
        let env = Vec3::new(0.2, 0.4, 0.6);
        let glass = PhongMaterial::glass(1.5)
            .with_transmissivity(Vec3::splat(0.5), 1.5)
            .with_ambient(Vec3::splat(0.5));
        let scene = SceneBuilder::new(looking_down(1.0))
            .add_mesh(floor(glass))
            .unwrap()
            .with_ambient(Vec3::splat(0.2))
            .with_environment(CubeMap::uniform(env))
            .build();

        let ray = scene.camera().ray_through(0.5, 0.5);
        let isect = scene.nearest_intersection(&ray).unwrap();
        let local = isect.material.shade(&scene, &ray, &isect);
        assert!((local - Vec3::splat(0.1)).length() < 1e-6);

        let tracer = tracer_with(scene, RenderConfig::default());
        let expected = local + Vec3::splat(0.5) * env;

        assert!((tracer.trace_ray(&ray, 5) - expected).length() < 1e-5);
        assert!((tracer.trace(0.5, 0.5) - Vec3::new(0.2, 0.3, 0.4)).length() < 1e-5);
    }

    #[test]
    fn test_refraction_leaving_a_sphere() {
        // Eye inside a glass sphere, looking straight down, off-center
        let eye = Vec3::new(0.5, 0.0, 0.0);
        let camera = Camera::new(eye, eye - Vec3::Y, Vec3::Z, 45.0, 1.0);
        let scene = SceneBuilder::new(camera)
            .add_object(Sphere::new(Vec3::ZERO, 1.0, PhongMaterial::glass(1.5)))
            .build();
        let tracer = tracer_with(scene, RenderConfig::default());

        let (_, rays) = tracer.trace_with_log(0.5, 0.5);
        assert_eq!(rays.len(), 2);
        assert_eq!(rays[1].kind, RayKind::Refraction);

        // Outward normal points along the ray: flip it, ratio 1 / 1.5
        let d = -Vec3::Y;
        let hit = Vec3::new(0.5, -(0.75f32).sqrt(), 0.0);
        let normal = -hit;
        let eta = 1.0 / 1.5;
        let cos_i = normal.dot(d);
        let cos_t = (1.0 - eta * eta * (1.0 - cos_i * cos_i)).sqrt();
        let expected = ((eta * cos_i - cos_t) * normal - eta * d).normalize();

        assert!((rays[1].origin - hit).length() < 1e-4);
        assert!((rays[1].direction - expected).length() < 1e-4);
        assert_eq!(rays[1].t, None);
    }

    #[test]
    fn test_no_scene_is_black() {
        let mut tracer = RayTracer::new(RenderConfig::default().with_resolution(4, 4));

        assert!(!tracer.scene_loaded());
        assert_eq!(tracer.trace(0.5, 0.5), Color::ZERO);
        assert_eq!(tracer.trace_pixel(1, 1), Color::ZERO);
        assert_eq!(tracer.aspect_ratio(), 1.0);
        assert!(tracer.buffer().0.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_trace_setup_resizes_and_clears() {
        let scene = SceneBuilder::new(looking_down(3.0))
            .add_mesh(floor(PhongMaterial::emissive(Color::ONE)))
            .unwrap()
            .build();
        let mut tracer = tracer_with(scene, RenderConfig::default().with_resolution(2, 2));

        tracer.trace_pixel(1, 1);
        assert!(tracer.buffer().0.iter().any(|&b| b != 0));

        tracer.trace_setup(2, 2);
        assert!(tracer.buffer().0.iter().all(|&b| b == 0));

        tracer.trace_setup(3, 1);
        let (buffer, width, height) = tracer.buffer();
        assert_eq!((buffer.len(), width, height), (9, 3, 1));
    }

    #[test]
    fn test_render_fills_buffer() {
        let _ = env_logger::builder().is_test(true).try_init();

        let scene = SceneBuilder::new(looking_down(0.5))
            .add_mesh(floor(PhongMaterial::emissive(Color::ONE)))
            .unwrap()
            .build();
        let config = RenderConfig::default()
            .with_resolution(10, 6)
            .with_bucket_size(4)
            .with_threads(2);
        let mut tracer = tracer_with(scene, config);

        let stats = tracer.render(&AtomicBool::new(false)).unwrap();
        assert_eq!(stats.pixels, 60);
        assert_eq!(stats.buckets, 6);
        assert!(tracer.buffer().0.iter().all(|&b| b == 255));
    }

    #[test]
    fn test_render_cancelled() {
        let scene = SceneBuilder::new(looking_down(0.5))
            .add_mesh(floor(PhongMaterial::emissive(Color::ONE)))
            .unwrap()
            .build();
        let mut tracer = tracer_with(scene, RenderConfig::default().with_resolution(8, 8).with_bucket_size(4));

        let err = tracer.render(&AtomicBool::new(true)).unwrap_err();
        assert!(matches!(err, RenderError::Cancelled { done: 0, total: 4 }));
        assert!(tracer.buffer().0.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_finite_or_zero() {
        let color = finite_or_zero(Vec3::new(f32::NAN, 0.5, f32::INFINITY));
        assert_eq!(color, Vec3::new(0.0, 0.5, 0.0));
        assert_eq!(quantize(Vec3::new(1.0, 0.999, 0.0)), [255, 254, 0]);
    }
}
