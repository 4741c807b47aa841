//! Pixel-distortion augmenters.
//!
//! Every augmenter mutates an RGBA image in place and draws its stochastic parameters
//! from an explicit [`AugmentRng`], so a run is reproducible from its seed.

use image::RgbaImage;
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::foundation::{
    core::{Grid, IntRange, UniformRange},
    error::{SynthError, SynthResult},
};

pub mod emboss;
pub mod jigsaw;
pub mod polar_pool;
pub mod voronoi;

pub use emboss::Emboss;
pub use jigsaw::Jigsaw;
pub use polar_pool::PolarPool;
pub use voronoi::Voronoi;

/// A single augmentation pass.
pub trait Augmenter {
    /// Short stable name used in logs.
    fn name(&self) -> &'static str;

    /// Apply the augmentation to `image` in place. Output dimensions equal input dimensions.
    fn augment(&self, image: &mut RgbaImage, rng: &mut AugmentRng) -> SynthResult<()>;
}

/// Seeded random source shared by the augmentation passes of one run.
#[derive(Clone, Debug)]
pub struct AugmentRng {
    seed: u64,
    inner: StdRng,
}

impl AugmentRng {
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed,
            inner: StdRng::seed_from_u64(seed),
        }
    }

    /// Draw a fresh seed from the thread RNG. The seed is kept so the run can be replayed.
    pub fn from_entropy() -> Self {
        Self::seeded(rand::rng().random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform sample from the closed interval.
    pub fn uniform(&mut self, range: UniformRange) -> f64 {
        if range.lo >= range.hi {
            return range.lo;
        }
        self.inner.random_range(range.lo..=range.hi)
    }

    /// Uniform integer sample from the closed interval.
    pub fn uniform_int(&mut self, range: IntRange) -> u32 {
        if range.lo >= range.hi {
            return range.lo;
        }
        self.inner.random_range(range.lo..=range.hi)
    }

    /// Uniform index in `0..n`; `n` must be > 0.
    pub fn below(&mut self, n: usize) -> usize {
        self.inner.random_range(0..n)
    }

    /// True with probability `p` (clamped to `[0, 1]`, NaN counts as 0).
    pub fn chance(&mut self, p: f64) -> bool {
        if p.is_nan() {
            return false;
        }
        self.inner.random_bool(p.clamp(0.0, 1.0))
    }
}

/// Serializable description of an augmenter, as stored in pipeline configuration.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AugmenterSpec {
    /// Grid tile shuffle.
    Jigsaw {
        rows: u32,
        cols: u32,
        #[serde(default = "default_max_steps")]
        max_steps: u32,
    },
    /// Relief shading with sampled blend alpha and strength.
    Emboss {
        alpha: UniformRange,
        strength: UniformRange,
    },
    /// Regular-grid Voronoi cells replaced by their mean colour.
    Voronoi {
        rows_frac: UniformRange,
        cols_frac: UniformRange,
        #[serde(default = "default_p_replace")]
        p_replace: f64,
    },
    /// Average pooling applied in polar coordinates.
    PolarPool { kernel: IntRange },
}

fn default_max_steps() -> u32 {
    1
}

fn default_p_replace() -> f64 {
    1.0
}

impl AugmenterSpec {
    /// The reference chain: a 7x7 jigsaw followed by emboss.
    pub fn default_chain() -> Vec<Self> {
        vec![
            Self::Jigsaw {
                rows: 7,
                cols: 7,
                max_steps: 1,
            },
            Self::Emboss {
                alpha: UniformRange { lo: 0.0, hi: 1.0 },
                strength: UniformRange { lo: 0.5, hi: 1.0 },
            },
        ]
    }

    pub fn validate(&self) -> SynthResult<()> {
        match self {
            Self::Jigsaw { rows, cols, .. } => Grid {
                rows: *rows,
                cols: *cols,
            }
            .validate(),
            Self::Emboss { alpha, strength } => {
                alpha.validate_within("emboss alpha", 0.0, 1.0)?;
                strength.validate_within("emboss strength", 0.0, f64::MAX)
            }
            Self::Voronoi {
                rows_frac,
                cols_frac,
                p_replace,
            } => {
                rows_frac.validate_within("voronoi rows_frac", 0.0, 1.0)?;
                cols_frac.validate_within("voronoi cols_frac", 0.0, 1.0)?;
                if !(0.0..=1.0).contains(p_replace) {
                    return Err(SynthError::validation(
                        "voronoi p_replace must lie within [0, 1]",
                    ));
                }
                Ok(())
            }
            Self::PolarPool { kernel } => {
                kernel.validate("polar_pool kernel")?;
                if kernel.lo == 0 {
                    return Err(SynthError::validation("polar_pool kernel must be >= 1"));
                }
                Ok(())
            }
        }
    }

    pub fn build(&self) -> SynthResult<Box<dyn Augmenter>> {
        self.validate()?;
        let aug: Box<dyn Augmenter> = match *self {
            Self::Jigsaw {
                rows,
                cols,
                max_steps,
            } => Box::new(Jigsaw::new(Grid { rows, cols }, max_steps)),
            Self::Emboss { alpha, strength } => Box::new(Emboss { alpha, strength }),
            Self::Voronoi {
                rows_frac,
                cols_frac,
                p_replace,
            } => Box::new(Voronoi {
                rows_frac,
                cols_frac,
                p_replace,
            }),
            Self::PolarPool { kernel } => Box::new(PolarPool { kernel }),
        };
        Ok(aug)
    }
}

#[cfg(test)]
#[path = "../tests/unit/augment/spec.rs"]
mod tests;
