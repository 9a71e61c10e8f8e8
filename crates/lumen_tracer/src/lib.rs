//! Lumen Tracer - Whitted-style recursive ray tracing.
//!
//! Casts one or more rays per pixel, finds the nearest surface, shades it
//! with a local Phong model, and recurses along mirror and refraction
//! directions until the depth budget runs out.

mod bucket;
mod bvh;
mod camera;
mod config;
mod cubemap;
mod intersectable;
mod light;
mod material;
mod scene;
mod sphere;
mod tracer;
pub mod triangle;
mod trimesh;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use bvh::BvhNode;
pub use camera::Camera;
pub use config::{AntiAliasing, ConfigError, ConfigResult, RenderConfig};
pub use cubemap::{CubeMap, CubeFace};
pub use intersectable::{Intersectable, IntersectableList, Intersection};
pub use light::Light;
pub use material::{reflect, refract, Color, Material};
pub use scene::{Scene, SceneBuilder};
pub use sphere::Sphere;
pub use tracer::{RayRecord, RayTracer, RenderError, RenderResult, RenderStats};
pub use trimesh::{FaceRejection, Trimesh, TrimeshFace};

/// Re-export the math and scene description types callers need.
pub use lumen_core::{Face, Mesh, MeshError, PhongMaterial};
pub use lumen_math::{Aabb, Interval, Ray, RayKind, Vec2, Vec3, RAY_EPSILON};
