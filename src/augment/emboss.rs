use image::RgbaImage;

use crate::{
    augment::{AugmentRng, Augmenter},
    foundation::{core::UniformRange, error::SynthResult},
};

/// Relief shading: a 3x3 emboss kernel blended with identity by `alpha`.
///
/// `alpha` and `strength` are sampled once per call. All four channels, alpha included,
/// are convolved with the same kernel and reflect-101 borders.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Emboss {
    pub alpha: UniformRange,
    pub strength: UniformRange,
}

impl Augmenter for Emboss {
    fn name(&self) -> &'static str {
        "emboss"
    }

    fn augment(&self, image: &mut RgbaImage, rng: &mut AugmentRng) -> SynthResult<()> {
        self.alpha.validate_within("emboss alpha", 0.0, 1.0)?;
        self.strength.validate("emboss strength")?;

        let alpha = rng.uniform(self.alpha);
        let strength = rng.uniform(self.strength);
        tracing::debug!(alpha, strength, "emboss parameters");

        let kernel = emboss_kernel(alpha, strength);
        *image = convolve3x3(image, &kernel);
        Ok(())
    }
}

/// `(1 - alpha) * identity + alpha * emboss(strength)`, row-major.
pub fn emboss_kernel(alpha: f64, strength: f64) -> [f64; 9] {
    let s = strength;
    let effect = [
        -1.0 - s,
        -s,
        0.0,
        -s,
        1.0,
        s,
        0.0,
        s,
        1.0 + s,
    ];
    let mut identity = [0.0; 9];
    identity[4] = 1.0;

    let mut k = [0.0; 9];
    for i in 0..9 {
        k[i] = (1.0 - alpha) * identity[i] + alpha * effect[i];
    }
    k
}

/// Correlate every channel with a 3x3 kernel (no flip), rounding and saturating to u8.
pub fn convolve3x3(src: &RgbaImage, kernel: &[f64; 9]) -> RgbaImage {
    let (width, height) = src.dimensions();
    let mut out = src.clone();
    if width == 0 || height == 0 {
        return out;
    }

    let w = width as i64;
    let h = height as i64;
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0.0f64; 4];
            for ky in -1..=1i64 {
                let sy = reflect101(y + ky, h);
                for kx in -1..=1i64 {
                    let sx = reflect101(x + kx, w);
                    let kw = kernel[((ky + 1) * 3 + (kx + 1)) as usize];
                    let px = src.get_pixel(sx as u32, sy as u32);
                    for c in 0..4 {
                        acc[c] += kw * f64::from(px[c]);
                    }
                }
            }
            let dst = out.get_pixel_mut(x as u32, y as u32);
            for c in 0..4 {
                dst[c] = acc[c].round().clamp(0.0, 255.0) as u8;
            }
        }
    }
    out
}

/// Border mirroring without repeating the edge sample (`dcb|abcd|cba`).
fn reflect101(i: i64, n: i64) -> i64 {
    if n == 1 {
        return 0;
    }
    let mut i = i;
    while i < 0 || i >= n {
        if i < 0 {
            i = -i;
        }
        if i >= n {
            i = 2 * (n - 1) - i;
        }
    }
    i
}

#[cfg(test)]
#[path = "../../tests/unit/augment/emboss.rs"]
mod tests;
