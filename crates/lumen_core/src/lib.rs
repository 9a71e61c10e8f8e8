//! Lumen Core - scene description data for the Lumen ray tracer.
//!
//! This crate provides:
//!
//! - **Meshes**: `Mesh`, `Face`, structural validation and normal generation
//! - **Materials**: `PhongMaterial` coefficients
//! - **Textures**: image loading and caching for environment maps
//!
//! Nothing here traces rays; `lumen_tracer` consumes these types.

pub mod material;
pub mod mesh;
pub mod texture;

// Re-export commonly used types
pub use material::PhongMaterial;
pub use mesh::{Face, Mesh, MeshError, MeshResult, DEGENERATE_AREA_EPSILON};
pub use texture::{Texture, TextureCache, TextureError, TextureResult};
