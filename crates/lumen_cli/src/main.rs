//! Lumen command-line renderer.
//!
//! Usage:
//!   lumen [config.json] [output.png]
//!   lumen --ray <x> <y> [config.json]
//!
//! Renders a built-in demo scene. The second form traces one ray through
//! normalized image coordinates and prints every ray the tracer cast.

use std::env;
use std::sync::atomic::AtomicBool;

use anyhow::{bail, Context, Result};
use lumen_core::{Face, Mesh, MeshResult, PhongMaterial};
use lumen_math::Vec3;
use lumen_tracer::{Camera, CubeMap, Light, RayTracer, RenderConfig, Scene, SceneBuilder, Sphere};

const DEFAULT_OUTPUT: &str = "lumen.png";

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();

    if args.first().map(String::as_str) == Some("--ray") {
        let (x, y) = match (args.get(1), args.get(2)) {
            (Some(x), Some(y)) => (
                x.parse::<f32>().context("x must be a number")?,
                y.parse::<f32>().context("y must be a number")?,
            ),
            _ => bail!("Usage: lumen --ray <x> <y> [config.json]"),
        };
        let config = load_config(args.get(3).map(String::as_str))?;
        return debug_ray(config, x, y);
    }

    let config = load_config(args.first().map(String::as_str))?;
    let output = args.get(1).map_or(DEFAULT_OUTPUT, String::as_str);

    render(config, output)
}

fn load_config(path: Option<&str>) -> Result<RenderConfig> {
    match path {
        Some(path) => {
            let config = RenderConfig::from_json_file(path)
                .with_context(|| format!("Loading render config {}", path))?;
            log::info!("Loaded config from {}", path);
            Ok(config)
        }
        None => Ok(RenderConfig::default()),
    }
}

fn tracer_for(config: RenderConfig) -> Result<RayTracer> {
    let mut scene = demo_scene().context("Building demo scene")?;
    scene
        .camera_mut()
        .set_aspect(config.width as f32 / config.height.max(1) as f32);

    for rejection in scene.rejected_faces() {
        log::warn!("Face {} not rendered: {}", rejection.face, rejection.error);
    }

    let mut tracer = RayTracer::new(config);
    tracer.load_scene(scene);
    Ok(tracer)
}

fn render(config: RenderConfig, output: &str) -> Result<()> {
    let mut tracer = tracer_for(config)?;

    let stats = tracer.render(&AtomicBool::new(false))?;
    log::info!(
        "{} pixels in {} buckets, {:.2?}",
        stats.pixels,
        stats.buckets,
        stats.elapsed
    );

    let (buffer, width, height) = tracer.buffer();
    let image = image::RgbImage::from_raw(width, height, buffer.to_vec())
        .context("Render buffer does not match its dimensions")?;

    // Buffer row 0 is the bottom of the picture
    image::imageops::flip_vertical(&image)
        .save(output)
        .with_context(|| format!("Saving {}", output))?;

    log::info!("Saved {}", output);
    Ok(())
}

fn debug_ray(config: RenderConfig, x: f32, y: f32) -> Result<()> {
    let tracer = tracer_for(config)?;
    let (color, rays) = tracer.trace_with_log(x, y);

    println!("Color at ({}, {}): {:?}", x, y, color);
    for ray in &rays {
        let hit = ray
            .t
            .map_or_else(|| "miss".to_string(), |t| format!("t = {:.4}", t));
        println!(
            "  [{:>2}] {:?} from {:?} along {:?}: {}",
            ray.depth, ray.kind, ray.origin, ray.direction, hit
        );
    }
    Ok(())
}

/// A reflective floor, a glass pyramid and a sphere under two lights.
fn demo_scene() -> MeshResult<Scene> {
    let camera = Camera::default()
        .with_position(Vec3::new(0.0, 1.6, 4.0), Vec3::new(0.0, 0.4, 0.0), Vec3::Y)
        .with_fov(40.0);

    let floor_material = PhongMaterial::diffuse(Vec3::splat(0.4))
        .with_ambient(Vec3::splat(0.1))
        .with_reflectivity(Vec3::splat(0.3));

    let sphere_material = PhongMaterial::diffuse(Vec3::new(0.7, 0.15, 0.1))
        .with_ambient(Vec3::new(0.1, 0.02, 0.02))
        .with_specular(Vec3::splat(0.6), 48.0);

    let scene = SceneBuilder::new(camera)
        .with_ambient(Vec3::splat(0.3))
        .with_environment(CubeMap::uniform(Vec3::new(0.55, 0.7, 0.9)))
        .add_light(
            Light::point(Vec3::splat(0.9), Vec3::new(2.0, 4.0, 3.0)).with_attenuation(1.0, 0.02, 0.01),
        )
        .add_light(Light::directional(Vec3::splat(0.3), Vec3::new(-0.3, -1.0, -0.4)))
        .add_mesh(floor(floor_material))?
        .add_mesh(pyramid(Vec3::new(-0.8, 0.0, -0.3)))?
        .add_object(Sphere::new(Vec3::new(0.9, 0.5, 0.2), 0.5, sphere_material))
        .build();

    Ok(scene)
}

fn floor(material: PhongMaterial) -> Mesh {
    let size = 6.0;
    let mut mesh = Mesh::new(
        vec![
            Vec3::new(-size, 0.0, -size),
            Vec3::new(-size, 0.0, size),
            Vec3::new(size, 0.0, size),
            Vec3::new(size, 0.0, -size),
        ],
        material,
    );
    mesh.faces = vec![Face::new(0, 1, 2), Face::new(0, 2, 3)];
    mesh.with_normals(vec![Vec3::Y; 4])
}

/// Square pyramid of glass, each corner tinted, one side frosted.
fn pyramid(base: Vec3) -> Mesh {
    let glass = PhongMaterial::glass(1.5)
        .with_ambient(Vec3::splat(0.6))
        .with_specular(Vec3::splat(0.8), 64.0)
        .with_reflectivity(Vec3::splat(0.1));
    let tint = |t: Vec3| PhongMaterial {
        kt: t,
        ..glass
    };

    let positions = [
        Vec3::new(-0.5, 0.0, -0.5),
        Vec3::new(0.5, 0.0, -0.5),
        Vec3::new(0.5, 0.0, 0.5),
        Vec3::new(-0.5, 0.0, 0.5),
        Vec3::new(0.0, 1.0, 0.0),
    ]
    .map(|p| p + base);

    let mut mesh = Mesh::new(positions.to_vec(), glass).with_vertex_materials(vec![
        tint(Vec3::new(0.9, 0.95, 1.0)),
        tint(Vec3::new(0.95, 0.9, 1.0)),
        tint(Vec3::new(1.0, 0.95, 0.9)),
        tint(Vec3::new(0.9, 1.0, 0.95)),
        tint(Vec3::ONE),
    ]);

    let frosted = glass
        .with_transmissivity(Vec3::splat(0.6), 1.5)
        .with_ambient(Vec3::splat(0.3));

    mesh.faces = vec![
        Face::new(0, 4, 1),
        Face::new(1, 4, 2),
        Face::new(2, 4, 3).with_material(frosted),
        Face::new(3, 4, 0),
        Face::new(0, 1, 2),
        Face::new(0, 2, 3),
    ];
    mesh
}
