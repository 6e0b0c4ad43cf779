//! Grid sampling - splits a pixel buffer into one cell per brick slot.

use ndarray::{s, ArrayView3};

use crate::buffer::PixelBuffer;

/// One grid slot's pixels, `[start_x, end_x) × [start_y, end_y)`.
#[derive(Debug, Clone)]
pub struct Cell<'a> {
    pub grid_x: u32,
    pub grid_y: u32,
    pub start_x: usize,
    pub end_x: usize,
    pub start_y: usize,
    pub end_y: usize,
    pixels: ArrayView3<'a, u8>,
}

impl<'a> Cell<'a> {
    pub fn pixels(&self) -> &ArrayView3<'a, u8> {
        &self.pixels
    }

    pub fn pixel_count(&self) -> usize {
        (self.end_x - self.start_x) * (self.end_y - self.start_y)
    }

    pub fn is_empty(&self) -> bool {
        self.pixel_count() == 0
    }

    /// RGBA values of every pixel in the cell, row by row.
    pub fn rgba(&self) -> impl Iterator<Item = [u8; 4]> + '_ {
        self.pixels.rows().into_iter().map(|p| [p[0], p[1], p[2], p[3]])
    }
}

pub struct CellSampler<'a> {
    buffer: &'a PixelBuffer,
    cols: u32,
    rows: u32,
    cell_w: f64,
    cell_h: f64,
}

impl<'a> CellSampler<'a> {
    pub fn new(buffer: &'a PixelBuffer, cols: u32, rows: u32) -> Self {
        let cell_w = buffer.width() as f64 / cols as f64;
        let cell_h = buffer.height() as f64 / rows as f64;
        Self { buffer, cols, rows, cell_w, cell_h }
    }

    pub fn cell_size(&self) -> (f64, f64) {
        (self.cell_w, self.cell_h)
    }

    /// Cell at (col, row). The last column and row run to the buffer edge.
    pub fn get_cell(&self, col: u32, row: u32) -> Cell<'a> {
        let (start_x, end_x) = span(col, self.cols, self.cell_w, self.buffer.width());
        let (start_y, end_y) = span(row, self.rows, self.cell_h, self.buffer.height());
        let pixels = self.buffer_view().slice_move(s![start_y..end_y, start_x..end_x, ..]);

        Cell { grid_x: col, grid_y: row, start_x, end_x, start_y, end_y, pixels }
    }

    /// Every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell<'a>> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| self.get_cell(col, row)))
    }

    fn buffer_view(&self) -> ArrayView3<'a, u8> {
        self.buffer.view()
    }
}

fn span(index: u32, count: u32, size: f64, limit: usize) -> (usize, usize) {
    let start = ((index as f64 * size).floor() as usize).min(limit);
    let end = if index + 1 == count {
        limit
    } else {
        (((index + 1) as f64 * size).floor() as usize).min(limit)
    };
    (start, end.max(start))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn even_division_gives_equal_cells() {
        let buffer = PixelBuffer::filled(100, 75, [0, 0, 0, 255]);
        let sampler = CellSampler::new(&buffer, 20, 15);
        assert_eq!(sampler.cell_size(), (5.0, 5.0));

        let cell = sampler.get_cell(3, 2);
        assert_eq!((cell.start_x, cell.end_x, cell.start_y, cell.end_y), (15, 20, 10, 15));
        assert_eq!(cell.pixel_count(), 25);
        assert_eq!(cell.pixels().dim(), (5, 5, 4));
    }

    #[test]
    fn cells_tile_buffer_without_gaps() {
        let buffer = PixelBuffer::filled(23, 11, [0, 0, 0, 255]);
        let sampler = CellSampler::new(&buffer, 4, 3);

        let total: usize = sampler.cells().map(|c| c.pixel_count()).sum();
        assert_eq!(total, 23 * 11);

        let last = sampler.get_cell(3, 2);
        assert_eq!((last.end_x, last.end_y), (23, 11));
        for col in 0..3 {
            assert_eq!(sampler.get_cell(col, 0).end_x, sampler.get_cell(col + 1, 0).start_x);
        }
    }

    #[test]
    fn uneven_rows_end_at_next_row_start() {
        // 250 / 15 rows = 16.67 pixels per row
        let buffer = PixelBuffer::filled(1000, 250, [0, 0, 0, 255]);
        let sampler = CellSampler::new(&buffer, 20, 15);

        let row1 = sampler.get_cell(0, 1);
        assert_eq!((row1.start_y, row1.end_y), (16, 33));
        assert_eq!(sampler.get_cell(0, 2).start_y, 33);
        assert_eq!(sampler.get_cell(0, 14).end_y, 250);
    }

    #[test]
    fn row_major_order() {
        let buffer = PixelBuffer::filled(6, 4, [0, 0, 0, 255]);
        let sampler = CellSampler::new(&buffer, 3, 2);
        let order: Vec<(u32, u32)> = sampler.cells().map(|c| (c.grid_x, c.grid_y)).collect();
        assert_eq!(order, vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]);
    }

    #[test]
    fn grid_larger_than_buffer_yields_empty_cells() {
        let buffer = PixelBuffer::filled(2, 2, [0, 0, 0, 255]);
        let sampler = CellSampler::new(&buffer, 5, 5);
        let cells: Vec<_> = sampler.cells().collect();
        assert_eq!(cells.len(), 25);
        assert!(cells.iter().any(|c| c.is_empty()));
        assert_eq!(cells.iter().map(|c| c.pixel_count()).sum::<usize>(), 4);
    }

    #[test]
    fn rgba_iterates_cell_pixels() {
        let mut buffer = PixelBuffer::filled(4, 2, [0, 0, 0, 0]);
        buffer.set_pixel(3, 1, [9, 8, 7, 6]);
        let sampler = CellSampler::new(&buffer, 2, 1);
        let pixels: Vec<[u8; 4]> = sampler.get_cell(1, 0).rgba().collect();
        assert_eq!(pixels.len(), 4);
        assert_eq!(pixels[3], [9, 8, 7, 6]);
    }
}
