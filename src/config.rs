//! Processor configuration with documented defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{BrickifyError, Result};

/// Brick columns in a generated level.
pub const DEFAULT_GRID_WIDTH: u32 = 20;
/// Brick rows in a generated level.
pub const DEFAULT_GRID_HEIGHT: u32 = 15;
/// Resize budget along the binding dimension, per grid cell.
pub const DEFAULT_PIXELS_PER_CELL: u32 = 50;
/// Alpha above which a pixel counts as opaque.
pub const DEFAULT_THRESHOLD: u8 = 128;
/// Contrast factor applied after loading.
pub const DEFAULT_CONTRAST_BOOST: f32 = 1.2;
/// Opaque fraction a cell must exceed to hold a brick.
pub const DEFAULT_DENSITY_CUTOFF: f64 = 0.3;
/// Largest resized edge, `grid_* * pixels_per_cell`, in pixels.
pub const MAX_RESIZE_EDGE: u32 = 16_384;

/// Configuration for the image to level conversion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessorConfig {
    /// Number of brick columns
    pub grid_width: u32,
    /// Number of brick rows
    pub grid_height: u32,
    /// Pixels per grid cell used when fitting the image
    pub pixels_per_cell: u32,
    /// Alpha threshold (0-255) for brick placement
    pub threshold: u8,
    /// Contrast enhancement factor
    pub contrast_boost: f32,
    /// Minimum opaque-pixel fraction for a brick
    pub density_cutoff: f64,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        ProcessorConfig {
            grid_width: DEFAULT_GRID_WIDTH,
            grid_height: DEFAULT_GRID_HEIGHT,
            pixels_per_cell: DEFAULT_PIXELS_PER_CELL,
            threshold: DEFAULT_THRESHOLD,
            contrast_boost: DEFAULT_CONTRAST_BOOST,
            density_cutoff: DEFAULT_DENSITY_CUTOFF,
        }
    }
}

impl ProcessorConfig {
    /// Read a JSON config file. Missing fields keep their defaults.
    pub fn read_config(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: ProcessorConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(BrickifyError::Config(format!(
                "grid must be non-empty, got {}x{}",
                self.grid_width, self.grid_height
            )));
        }
        if self.pixels_per_cell == 0 {
            return Err(BrickifyError::Config("pixels_per_cell must be positive".into()));
        }
        for (name, cells) in [("grid_width", self.grid_width), ("grid_height", self.grid_height)] {
            self.resize_edge(cells).filter(|&edge| edge <= MAX_RESIZE_EDGE).ok_or_else(|| {
                BrickifyError::Config(format!(
                    "{} x pixels_per_cell ({} x {}) exceeds {} pixels",
                    name, cells, self.pixels_per_cell, MAX_RESIZE_EDGE
                ))
            })?;
        }
        if !self.contrast_boost.is_finite() || self.contrast_boost < 0.0 {
            return Err(BrickifyError::Config(format!(
                "contrast_boost must be a non-negative number, got {}",
                self.contrast_boost
            )));
        }
        if !(0.0..1.0).contains(&self.density_cutoff) {
            return Err(BrickifyError::Config(format!(
                "density_cutoff must be in [0, 1), got {}",
                self.density_cutoff
            )));
        }
        Ok(())
    }

    /// Pixel length spent on `cells` grid cells, `None` on overflow.
    pub fn resize_edge(&self, cells: u32) -> Option<u32> {
        cells.checked_mul(self.pixels_per_cell)
    }

    /// Grid aspect ratio (columns over rows).
    pub fn grid_aspect(&self) -> f64 {
        self.grid_width as f64 / self.grid_height as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = ProcessorConfig::default();
        assert_eq!(config.grid_width, 20);
        assert_eq!(config.grid_height, 15);
        assert_eq!(config.pixels_per_cell, 50);
        assert_eq!(config.threshold, 128);
        assert_eq!(config.contrast_boost, 1.2);
        assert_eq!(config.density_cutoff, 0.3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: ProcessorConfig =
            serde_json::from_str(r#"{"grid_width": 32, "threshold": 10}"#).unwrap();
        assert_eq!(config.grid_width, 32);
        assert_eq!(config.threshold, 10);
        assert_eq!(config.grid_height, DEFAULT_GRID_HEIGHT);
        assert_eq!(config.pixels_per_cell, DEFAULT_PIXELS_PER_CELL);
    }

    #[test]
    fn rejects_empty_grid_and_bad_cutoff() {
        let config = ProcessorConfig { grid_height: 0, ..Default::default() };
        assert!(matches!(config.validate(), Err(BrickifyError::Config(_))));

        let config = ProcessorConfig { density_cutoff: 1.0, ..Default::default() };
        assert!(config.validate().is_err());

        let config = ProcessorConfig { contrast_boost: f32::NAN, ..Default::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_oversized_resize() {
        let config = ProcessorConfig {
            grid_width: 100_000_000,
            grid_height: 100_000_000,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(BrickifyError::Config(_))));
        assert_eq!(config.resize_edge(config.grid_width), None);

        let config = ProcessorConfig { grid_height: 10_000, ..Default::default() };
        assert!(config.validate().is_err());

        // 327 * 50 = 16_350 still fits
        let config = ProcessorConfig { grid_width: 327, ..Default::default() };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn read_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"grid_width": 10, "grid_height": 5}"#).unwrap();

        let config = ProcessorConfig::read_config(&path).unwrap();
        assert_eq!((config.grid_width, config.grid_height), (10, 5));
        assert_eq!(config.grid_aspect(), 2.0);

        std::fs::write(&path, r#"{"grid_width": 0}"#).unwrap();
        assert!(ProcessorConfig::read_config(&path).is_err());
    }
}
