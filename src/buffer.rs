//! Image loading, RGBA normalization and aspect-preserving resize.

use std::io::ErrorKind;
use std::path::Path;

use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageError, ImageReader, RgbaImage};
use ndarray::{Array3, ArrayView3};

use crate::config::ProcessorConfig;
use crate::enhance::enhance_contrast;
use crate::{BrickifyError, Result};

const CHANNELS: usize = 4;
const ALPHA: usize = 3;

/// RGBA pixels laid out as `[height][width][4]`.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    pixels: Array3<u8>,
}

impl PixelBuffer {
    pub fn from_rgba(image: RgbaImage) -> Result<Self> {
        let (w, h) = image.dimensions();
        let pixels = Array3::from_shape_vec((h as usize, w as usize, CHANNELS), image.into_raw())
            .map_err(|e| BrickifyError::Corrupt(e.to_string()))?;
        Ok(Self { pixels })
    }

    /// Buffer filled with a single RGBA value.
    pub fn filled(width: usize, height: usize, rgba: [u8; 4]) -> Self {
        let pixels = Array3::from_shape_fn((height, width, CHANNELS), |(_, _, c)| rgba[c]);
        Self { pixels }
    }

    pub fn width(&self) -> usize {
        self.pixels.dim().1
    }

    pub fn height(&self) -> usize {
        self.pixels.dim().0
    }

    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let p = self.pixels.slice(ndarray::s![y, x, ..]);
        [p[0], p[1], p[2], p[ALPHA]]
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, rgba: [u8; 4]) {
        for (c, value) in rgba.into_iter().enumerate() {
            self.pixels[[y, x, c]] = value;
        }
    }

    pub fn view(&self) -> ArrayView3<'_, u8> {
        self.pixels.view()
    }
}

/// Load an image and normalize it for sampling.
///
/// With `target_size` the image is stretched to exactly that size; otherwise
/// it is fitted to the grid by [`fit_dimensions`]. Contrast is boosted last.
pub fn load(
    path: impl AsRef<Path>,
    target_size: Option<(u32, u32)>,
    config: &ProcessorConfig,
) -> Result<PixelBuffer> {
    let path = path.as_ref();
    let image = ImageReader::open(path)
        .map_err(|e| open_error(path, e))?
        .with_guessed_format()
        .map_err(|e| open_error(path, e))?
        .decode()
        .map_err(|e| decode_error(path, e))?;
    normalize(image, target_size, config)
}

/// Same as [`load`] for an in-memory encoded image.
pub fn load_bytes(
    bytes: &[u8],
    target_size: Option<(u32, u32)>,
    config: &ProcessorConfig,
) -> Result<PixelBuffer> {
    let image =
        image::load_from_memory(bytes).map_err(|e| decode_error(Path::new("<memory>"), e))?;
    normalize(image, target_size, config)
}

/// Convert to RGBA, resize and enhance a decoded image.
pub fn normalize(
    image: DynamicImage,
    target_size: Option<(u32, u32)>,
    config: &ProcessorConfig,
) -> Result<PixelBuffer> {
    let rgba = image.to_rgba8();
    let (w, h) = match target_size {
        Some((w, h)) if w > 0 && h > 0 => (w, h),
        Some((w, h)) => {
            return Err(BrickifyError::Corrupt(format!("invalid target size {}x{}", w, h)))
        }
        None => fit_dimensions(rgba.width(), rgba.height(), config)?,
    };
    log::debug!("resizing {}x{} -> {}x{}", rgba.width(), rgba.height(), w, h);

    let resized = imageops::resize(&rgba, w, h, FilterType::Lanczos3);
    PixelBuffer::from_rgba(enhance_contrast(&resized, config.contrast_boost))
}

/// Output size that keeps the source aspect ratio and spends
/// `pixels_per_cell` pixels per grid cell on the binding dimension.
pub fn fit_dimensions(width: u32, height: u32, config: &ProcessorConfig) -> Result<(u32, u32)> {
    if width == 0 || height == 0 {
        return Err(BrickifyError::Corrupt(format!("zero-sized image {}x{}", width, height)));
    }
    let aspect = width as f64 / height as f64;

    let edge = |cells: u32| {
        config.resize_edge(cells).ok_or_else(|| {
            BrickifyError::Config(format!(
                "{} cells x {} pixels per cell overflows",
                cells, config.pixels_per_cell
            ))
        })
    };

    if aspect > config.grid_aspect() {
        let out_w = edge(config.grid_width)?;
        let out_h = (out_w as f64 / aspect).round().max(1.0) as u32;
        Ok((out_w, out_h))
    } else {
        let out_h = edge(config.grid_height)?;
        let out_w = (out_h as f64 * aspect).round().max(1.0) as u32;
        Ok((out_w, out_h))
    }
}

fn open_error(path: &Path, err: std::io::Error) -> BrickifyError {
    match err.kind() {
        ErrorKind::NotFound | ErrorKind::PermissionDenied => {
            BrickifyError::NotFound(path.to_path_buf())
        }
        _ => BrickifyError::Corrupt(format!("{}: {}", path.display(), err)),
    }
}

fn decode_error(path: &Path, err: ImageError) -> BrickifyError {
    match err {
        ImageError::IoError(e) => open_error(path, e),
        ImageError::Unsupported(e) => {
            BrickifyError::UnsupportedFormat(format!("{}: {}", path.display(), e))
        }
        e => BrickifyError::Corrupt(format!("{}: {}", path.display(), e)),
    }
}
