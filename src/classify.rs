//! Per-cell brick decision and color classification.

use crate::chunk::Cell;
use crate::palette::{self, ColorName};

/// Whether a cell holds enough opaque content for a brick.
///
/// Counts pixels with alpha above `threshold` and places a brick when their
/// share of the cell is strictly greater than `density_cutoff`. Empty cells
/// never place a brick.
pub fn should_place(cell: &Cell<'_>, threshold: u8, density_cutoff: f64) -> bool {
    let total = cell.pixel_count();
    if total == 0 {
        return false;
    }
    let opaque = cell.rgba().filter(|p| p[3] > threshold).count();
    opaque as f64 / total as f64 > density_cutoff
}

/// Mean RGB over pixels with any opacity, or `None` if all are transparent.
pub fn mean_rgb(cell: &Cell<'_>) -> Option<[f64; 3]> {
    let mut sum = [0u64; 3];
    let mut count = 0u64;
    for p in cell.rgba().filter(|p| p[3] > 0) {
        for c in 0..3 {
            sum[c] += p[c] as u64;
        }
        count += 1;
    }
    (count > 0).then(|| sum.map(|s| s as f64 / count as f64))
}

/// Palette color nearest to the cell's mean visible color.
pub fn classify(cell: &Cell<'_>) -> ColorName {
    match mean_rgb(cell) {
        Some(rgb) => palette::nearest(rgb),
        None => ColorName::default(),
    }
}
