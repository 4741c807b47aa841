//! Synthesis turns a numbered set of source images into a single piece of generative art.
//!
//! # Pipeline overview
//!
//! 1. **Seed blend**: sources 1 and 2 are alpha-blended into the accumulator (`new.png`).
//! 2. **Fold**: every remaining source is blended on top of the accumulator, which is
//!    persisted and read back after each step.
//! 3. **Final composite**: the last background/overlay pair is re-blended evenly and
//!    smoothed with a mode filter, then tagged with print resolution metadata.
//! 4. **Augment**: a chain of pixel distortions (by default a jigsaw shuffle and an
//!    emboss) produces `finalproduct.png`.
//!
//! All knobs live in [`PipelineConfig`]; stochastic passes draw from a seed that is
//! reported back so any run can be replayed.
#![forbid(unsafe_code)]

mod assets;
mod effects;
mod encode;
mod foundation;

/// Pixel-distortion augmenters and their serializable specs.
pub mod augment;
/// Pipeline configuration and the stage driver.
pub mod pipeline;

pub use assets::decode::{decode_rgba, load_rgba};
pub use assets::source::SourceLayout;
pub use augment::{
    AugmentRng, Augmenter, AugmenterSpec, Emboss, Jigsaw, PolarPool, Voronoi,
};
pub use effects::blend::{blend, blend_channel, blend_in_place};
pub use effects::mode_filter::mode_filter;
pub use encode::artifact::{ensure_parent_dir, read_png_dpi, save_png};
pub use foundation::core::{Dpi, Grid, IntRange, UniformRange};
pub use foundation::error::{SynthError, SynthResult};
pub use pipeline::config::PipelineConfig;
pub use pipeline::driver::{
    BlendPair, PipelineOutcome, PipelineReport, augment_passes, final_composite, fold,
    run_pipeline, seed_blend,
};
