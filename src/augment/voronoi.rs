use image::RgbaImage;

use crate::{
    augment::{AugmentRng, Augmenter},
    foundation::{core::UniformRange, error::SynthResult},
};

/// Voronoi cells around a regular grid of points, each replaced by its mean colour.
///
/// The grid has `round(rows_frac * height)` x `round(cols_frac * width)` points (at
/// least one per axis), evenly spaced away from the borders. With a regular point set
/// the cells are axis-aligned, so membership is the nearest point per axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Voronoi {
    pub rows_frac: UniformRange,
    pub cols_frac: UniformRange,
    /// Probability that a cell is replaced by its average colour.
    pub p_replace: f64,
}

impl Augmenter for Voronoi {
    fn name(&self) -> &'static str {
        "voronoi"
    }

    fn augment(&self, image: &mut RgbaImage, rng: &mut AugmentRng) -> SynthResult<()> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Ok(());
        }

        let n_rows = points_along(rng.uniform(self.rows_frac), height);
        let n_cols = points_along(rng.uniform(self.cols_frac), width);
        tracing::debug!(n_rows, n_cols, p_replace = self.p_replace, "voronoi grid");

        let row_of: Vec<usize> = (0..height).map(|y| nearest_point(y, height, n_rows)).collect();
        let col_of: Vec<usize> = (0..width).map(|x| nearest_point(x, width, n_cols)).collect();

        let cells = n_rows * n_cols;
        let mut sums = vec![[0u64; 4]; cells];
        let mut counts = vec![0u64; cells];
        for (x, y, px) in image.enumerate_pixels() {
            let cell = row_of[y as usize] * n_cols + col_of[x as usize];
            for c in 0..4 {
                sums[cell][c] += u64::from(px[c]);
            }
            counts[cell] += 1;
        }

        let replace: Vec<bool> = (0..cells).map(|_| rng.chance(self.p_replace)).collect();
        let means: Vec<[u8; 4]> = sums
            .iter()
            .zip(&counts)
            .map(|(sum, &n)| {
                let n = n.max(1);
                let mut m = [0u8; 4];
                for c in 0..4 {
                    m[c] = ((sum[c] + n / 2) / n) as u8;
                }
                m
            })
            .collect();

        for (x, y, px) in image.enumerate_pixels_mut() {
            let cell = row_of[y as usize] * n_cols + col_of[x as usize];
            if replace[cell] {
                px.0 = means[cell];
            }
        }
        Ok(())
    }
}

fn points_along(frac: f64, extent: u32) -> usize {
    ((frac * f64::from(extent)).round() as usize).clamp(1, extent as usize)
}

/// Points sit at `k * extent / (n + 1)` for `k = 1..=n`; returns the 0-based nearest.
fn nearest_point(i: u32, extent: u32, n: usize) -> usize {
    let spacing = f64::from(extent) / (n as f64 + 1.0);
    let center = f64::from(i) + 0.5;
    let k = (center / spacing).round() as i64 - 1;
    k.clamp(0, n as i64 - 1) as usize
}

#[cfg(test)]
#[path = "../../tests/unit/augment/voronoi.rs"]
mod tests;
