use std::f64::consts::TAU;

use image::{Rgba, RgbaImage};

use crate::{
    augment::{AugmentRng, Augmenter},
    foundation::{core::IntRange, error::SynthResult},
};

/// Average pooling in polar space: rings and wedges about the centre get flattened.
///
/// The polar buffer has one row per angle step (`height` rows over a full turn) and one
/// column per radius step (`width` columns out to the corner distance). Sampling in both
/// directions is nearest-neighbour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PolarPool {
    pub kernel: IntRange,
}

impl Augmenter for PolarPool {
    fn name(&self) -> &'static str {
        "polar_pool"
    }

    fn augment(&self, image: &mut RgbaImage, rng: &mut AugmentRng) -> SynthResult<()> {
        self.kernel.validate("polar_pool kernel")?;
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Ok(());
        }

        let k = rng.uniform_int(self.kernel).max(1);
        tracing::debug!(kernel = k, "polar pooling");

        let warp = PolarWarp::new(width, height);
        let polar = warp.warp(image);
        let pooled = average_pool(&polar, k);
        *image = warp.unwarp(&pooled);
        Ok(())
    }
}

struct PolarWarp {
    width: u32,
    height: u32,
    cx: f64,
    cy: f64,
    max_radius: f64,
}

impl PolarWarp {
    fn new(width: u32, height: u32) -> Self {
        let cx = f64::from(width) / 2.0;
        let cy = f64::from(height) / 2.0;
        Self {
            width,
            height,
            cx,
            cy,
            max_radius: (cx * cx + cy * cy).sqrt().max(1.0),
        }
    }

    fn warp(&self, src: &RgbaImage) -> RgbaImage {
        let (w, h) = (self.width, self.height);
        RgbaImage::from_fn(w, h, |ri, ai| {
            let r = (f64::from(ri) + 0.5) / f64::from(w) * self.max_radius;
            let theta = (f64::from(ai) + 0.5) / f64::from(h) * TAU;
            let x = (self.cx + r * theta.cos()).floor();
            let y = (self.cy + r * theta.sin()).floor();
            if x < 0.0 || y < 0.0 || x >= f64::from(w) || y >= f64::from(h) {
                Rgba([0, 0, 0, 0])
            } else {
                *src.get_pixel(x as u32, y as u32)
            }
        })
    }

    fn unwarp(&self, polar: &RgbaImage) -> RgbaImage {
        let (w, h) = (self.width, self.height);
        RgbaImage::from_fn(w, h, |x, y| {
            let dx = f64::from(x) + 0.5 - self.cx;
            let dy = f64::from(y) + 0.5 - self.cy;
            let r = (dx * dx + dy * dy).sqrt();
            let theta = dy.atan2(dx).rem_euclid(TAU);
            let ri = ((r / self.max_radius * f64::from(w)).floor() as u32).min(w - 1);
            let ai = ((theta / TAU * f64::from(h)).floor() as u32).min(h - 1);
            *polar.get_pixel(ri, ai)
        })
    }
}

/// Replace each `k x k` block (clipped at the edges) with its rounded mean.
fn average_pool(src: &RgbaImage, k: u32) -> RgbaImage {
    let (w, h) = src.dimensions();
    let mut out = src.clone();
    if k <= 1 {
        return out;
    }

    for by in (0..h).step_by(k as usize) {
        for bx in (0..w).step_by(k as usize) {
            let (ey, ex) = ((by + k).min(h), (bx + k).min(w));
            let mut sum = [0u64; 4];
            for y in by..ey {
                for x in bx..ex {
                    let px = src.get_pixel(x, y);
                    for c in 0..4 {
                        sum[c] += u64::from(px[c]);
                    }
                }
            }
            let n = u64::from((ey - by) * (ex - bx));
            let mut mean = [0u8; 4];
            for c in 0..4 {
                mean[c] = ((sum[c] + n / 2) / n) as u8;
            }
            for y in by..ey {
                for x in bx..ex {
                    out.put_pixel(x, y, Rgba(mean));
                }
            }
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/augment/polar_pool.rs"]
mod tests;
