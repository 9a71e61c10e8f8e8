//! Render configuration.

use std::path::Path;

use crate::bucket::DEFAULT_BUCKET_SIZE;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from loading or validating a `RenderConfig`.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid render config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to read render config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Image dimensions must be non-zero (got {width}x{height})")]
    ZeroDimension { width: u32, height: u32 },

    #[error("Bucket size must be non-zero")]
    ZeroBucketSize,

    #[error("Thread count must be non-zero")]
    ZeroThreads,
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Sub-pixel sampling pattern.
///
/// Offsets are in pixels, relative to the pixel's sample point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AntiAliasing {
    /// One sample per pixel
    #[default]
    None,
    /// Corners of a one-pixel square
    #[serde(rename = "2x2")]
    Grid2x2,
    /// Three by three grid at half-pixel spacing
    #[serde(rename = "3x3")]
    Grid3x3,
    /// Quarter-pixel 5x5 grid without its center row and column
    #[serde(rename = "ring16")]
    Ring16,
}

impl AntiAliasing {
    /// Pattern by numeric level: 2, 3 and 4 select the grids, anything else
    /// is a single sample.
    pub fn from_level(level: u8) -> Self {
        match level {
            2 => AntiAliasing::Grid2x2,
            3 => AntiAliasing::Grid3x3,
            4 => AntiAliasing::Ring16,
            _ => AntiAliasing::None,
        }
    }

    /// Sample offsets in pixels.
    pub fn offsets(&self) -> Vec<(f32, f32)> {
        let steps: &[f32] = match self {
            AntiAliasing::None => return vec![(0.0, 0.0)],
            AntiAliasing::Grid2x2 => &[-0.5, 0.5],
            AntiAliasing::Grid3x3 => &[-0.5, 0.0, 0.5],
            AntiAliasing::Ring16 => &[-0.5, -0.25, 0.25, 0.5],
        };

        steps
            .iter()
            .flat_map(|&dx| steps.iter().map(move |&dy| (dx, dy)))
            .collect()
    }

    pub fn sample_count(&self) -> usize {
        match self {
            AntiAliasing::None => 1,
            AntiAliasing::Grid2x2 => 4,
            AntiAliasing::Grid3x3 => 9,
            AntiAliasing::Ring16 => 16,
        }
    }
}

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Recursion budget for reflection and refraction rays
    pub max_depth: i32,
    pub antialiasing: AntiAliasing,
    /// Bucket edge length in pixels
    pub bucket_size: u32,
    /// Worker threads; `None` uses rayon's default
    pub threads: Option<usize>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 256,
            height: 256,
            max_depth: 5,
            antialiasing: AntiAliasing::None,
            bucket_size: DEFAULT_BUCKET_SIZE,
            threads: None,
        }
    }
}

impl RenderConfig {
    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_max_depth(mut self, max_depth: i32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_antialiasing(mut self, antialiasing: AntiAliasing) -> Self {
        self.antialiasing = antialiasing;
        self
    }

    pub fn with_bucket_size(mut self, bucket_size: u32) -> Self {
        self.bucket_size = bucket_size;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    /// Parse and validate a JSON config. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let config: RenderConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::ZeroDimension {
                width: self.width,
                height: self.height,
            });
        }
        if self.bucket_size == 0 {
            return Err(ConfigError::ZeroBucketSize);
        }
        if self.threads == Some(0) {
            return Err(ConfigError::ZeroThreads);
        }
        if self.max_depth < 0 {
            log::warn!(
                "max_depth {} is negative; every ray will return the background",
                self.max_depth
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets_match_sample_count() {
        for aa in [
            AntiAliasing::None,
            AntiAliasing::Grid2x2,
            AntiAliasing::Grid3x3,
            AntiAliasing::Ring16,
        ] {
            assert_eq!(aa.offsets().len(), aa.sample_count());
        }
    }

    #[test]
    fn test_ring16_skips_center_lines() {
        let offsets = AntiAliasing::Ring16.offsets();
        assert!(offsets.iter().all(|&(dx, dy)| dx != 0.0 && dy != 0.0));
        assert!(offsets.contains(&(-0.25, 0.5)));
    }

    #[test]
    fn test_from_level() {
        assert_eq!(AntiAliasing::from_level(0), AntiAliasing::None);
        assert_eq!(AntiAliasing::from_level(2), AntiAliasing::Grid2x2);
        assert_eq!(AntiAliasing::from_level(3), AntiAliasing::Grid3x3);
        assert_eq!(AntiAliasing::from_level(4), AntiAliasing::Ring16);
        assert_eq!(AntiAliasing::from_level(9), AntiAliasing::None);
    }

    #[test]
    fn test_json_defaults_missing_fields() {
        let config = RenderConfig::from_json_str(r#"{ "width": 64, "antialiasing": "3x3" }"#).unwrap();
        assert_eq!(config.width, 64);
        assert_eq!(config.height, 256);
        assert_eq!(config.antialiasing, AntiAliasing::Grid3x3);
        assert_eq!(config.max_depth, 5);
    }

    #[test]
    fn test_validate_rejects_zero_sizes() {
        let err = RenderConfig::from_json_str(r#"{ "height": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroDimension { width: 256, height: 0 }));

        let config = RenderConfig::default().with_bucket_size(0);
        assert!(matches!(config.validate(), Err(ConfigError::ZeroBucketSize)));

        let config = RenderConfig::default().with_threads(0);
        assert!(matches!(config.validate(), Err(ConfigError::ZeroThreads)));
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(
            RenderConfig::from_json_str("{ width: }"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            RenderConfig::from_json_file("/nonexistent/render.json"),
            Err(ConfigError::Io { .. })
        ));
    }
}
