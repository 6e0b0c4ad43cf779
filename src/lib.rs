//! Logo image to Breakout brick-grid converter.

pub mod buffer;
pub mod chunk;
pub mod classify;
pub mod config;
pub mod enhance;
pub mod level;
pub mod palette;

#[cfg(not(target_arch = "wasm32"))]
pub mod batch;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use buffer::PixelBuffer;
pub use chunk::{Cell, CellSampler};
pub use config::ProcessorConfig;
pub use level::{Brick, LevelDescription};
pub use palette::ColorName;

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BrickifyError {
    #[error("Image not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),
    #[error("Corrupt image: {0}")]
    Corrupt(String),
    #[error("Cannot write {}: {source}", path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid level: {0}")]
    InvalidLevel(String),
    #[error("Config error: {0}")]
    Config(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reason an image could not be turned into a [`PixelBuffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadErrorKind {
    NotFound,
    UnsupportedFormat,
    Corrupt,
}

impl BrickifyError {
    /// The load-failure classification, if this error came from image loading.
    pub fn load_kind(&self) -> Option<LoadErrorKind> {
        match self {
            BrickifyError::NotFound(_) => Some(LoadErrorKind::NotFound),
            BrickifyError::UnsupportedFormat(_) => Some(LoadErrorKind::UnsupportedFormat),
            BrickifyError::Corrupt(_) => Some(LoadErrorKind::Corrupt),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, BrickifyError>;

/// Turns images into level descriptions using one processor configuration.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    config: ProcessorConfig,
}

impl Converter {
    pub fn new(config: ProcessorConfig) -> Self {
        Self { config }
    }

    pub fn with_grid(mut self, width: u32, height: u32) -> Self {
        self.config.grid_width = width;
        self.config.grid_height = height;
        self
    }

    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.config.threshold = threshold;
        self
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// Load `path` and build the level for `service_name`.
    pub fn convert(&self, path: impl AsRef<Path>, service_name: &str) -> Result<LevelDescription> {
        self.config.validate()?;
        let path = path.as_ref();
        let buffer = buffer::load(path, None, &self.config).map_err(|e| {
            log::warn!("Error loading image {}: {}", path.display(), e);
            e
        })?;
        let source_image = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(self.convert_buffer(&buffer, service_name, source_image))
    }

    /// Build a level from an already normalized buffer.
    pub fn convert_buffer(
        &self,
        buffer: &PixelBuffer,
        service_name: &str,
        source_image: impl Into<String>,
    ) -> LevelDescription {
        let sampler = CellSampler::new(buffer, self.config.grid_width, self.config.grid_height);

        let bricks: Vec<Brick> = sampler
            .cells()
            .filter(|cell| {
                classify::should_place(cell, self.config.threshold, self.config.density_cutoff)
            })
            .map(|cell| Brick::new(cell.grid_x, cell.grid_y, classify::classify(&cell)))
            .collect();

        log::debug!("{}: {} bricks", service_name, bricks.len());

        LevelDescription {
            name: service_name.to_string(),
            description: format!("AWS {} Service Logo", service_name),
            grid_width: self.config.grid_width,
            grid_height: self.config.grid_height,
            bricks,
            source_image: source_image.into(),
        }
    }
}
