use image::RgbaImage;

use crate::{
    augment::{AugmentRng, Augmenter},
    foundation::{core::Grid, error::SynthResult},
};

/// Partitions the image into a grid and swaps cells with random neighbours.
///
/// The image is centre-padded with transparent black so every cell has the same size,
/// shuffled, and cropped back, so output dimensions always match the input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Jigsaw {
    pub grid: Grid,
    pub max_steps: u32,
}

impl Jigsaw {
    pub fn new(grid: Grid, max_steps: u32) -> Self {
        Self { grid, max_steps }
    }
}

impl Augmenter for Jigsaw {
    fn name(&self) -> &'static str {
        "jigsaw"
    }

    fn augment(&self, image: &mut RgbaImage, rng: &mut AugmentRng) -> SynthResult<()> {
        self.grid.validate()?;
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Ok(());
        }

        let destinations = destinations(self.grid, self.max_steps, rng);
        let moved = destinations
            .iter()
            .enumerate()
            .filter(|(i, d)| *i != **d)
            .count();
        tracing::debug!(
            rows = self.grid.rows,
            cols = self.grid.cols,
            moved,
            "jigsaw destinations"
        );

        *image = apply_destinations(image, self.grid, &destinations);
        Ok(())
    }
}

/// For every cell (row-major), the index of the cell its content moves to.
///
/// Each cell gets a step budget in `0..=max_steps`. On every step, a cell with budget
/// left picks one of its four neighbours (clamped at the border) and swaps contents
/// with it if that neighbour also has budget left; both budgets are then spent.
pub fn destinations(grid: Grid, max_steps: u32, rng: &mut AugmentRng) -> Vec<usize> {
    let rows = grid.rows as usize;
    let cols = grid.cols as usize;
    let cells = grid.cells();

    let mut budget: Vec<u32> = (0..cells)
        .map(|_| rng.below(max_steps as usize + 1) as u32)
        .collect();
    let mut dest: Vec<usize> = (0..cells).collect();

    for _ in 0..max_steps {
        for y in 0..rows {
            for x in 0..cols {
                let i = y * cols + x;
                let dir = rng.below(4);
                if budget[i] == 0 {
                    continue;
                }
                let (ty, tx) = match dir {
                    0 => (y.saturating_sub(1), x),
                    1 => (y, (x + 1).min(cols - 1)),
                    2 => ((y + 1).min(rows - 1), x),
                    _ => (y, x.saturating_sub(1)),
                };
                let j = ty * cols + tx;
                if i == j || budget[j] == 0 {
                    continue;
                }
                dest.swap(i, j);
                budget[i] -= 1;
                budget[j] -= 1;
            }
        }
    }

    dest
}

/// Move cell `i`'s pixels to cell `destinations[i]`.
///
/// The padded canvas is a whole number of cells; padding is split between both sides of
/// each axis (the extra pixel of an odd split goes right or bottom).
pub fn apply_destinations(src: &RgbaImage, grid: Grid, destinations: &[usize]) -> RgbaImage {
    let (width, height) = src.dimensions();
    let cell_w = width.div_ceil(grid.cols);
    let cell_h = height.div_ceil(grid.rows);
    let pad_left = i64::from((cell_w * grid.cols - width) / 2);
    let pad_top = i64::from((cell_h * grid.rows - height) / 2);
    let (w, h) = (i64::from(width), i64::from(height));

    let mut out = RgbaImage::new(width, height);
    for (i, &d) in destinations.iter().enumerate() {
        let (sy, sx) = (i as u32 / grid.cols, i as u32 % grid.cols);
        let (dy, dx) = (d as u32 / grid.cols, d as u32 % grid.cols);

        for oy in 0..cell_h {
            let ty = i64::from(dy * cell_h + oy) - pad_top;
            if ty < 0 || ty >= h {
                continue;
            }
            let fy = i64::from(sy * cell_h + oy) - pad_top;
            for ox in 0..cell_w {
                let tx = i64::from(dx * cell_w + ox) - pad_left;
                if tx < 0 || tx >= w {
                    continue;
                }
                let fx = i64::from(sx * cell_w + ox) - pad_left;
                // Source pixels outside the image belong to the transparent padding.
                if (0..w).contains(&fx) && (0..h).contains(&fy) {
                    out.put_pixel(tx as u32, ty as u32, *src.get_pixel(fx as u32, fy as u32));
                }
            }
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/augment/jigsaw.rs"]
mod tests;
