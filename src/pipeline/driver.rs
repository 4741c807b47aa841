use std::path::{Path, PathBuf};

use image::RgbaImage;

use crate::{
    assets::{decode::load_rgba, source::SourceLayout},
    augment::AugmentRng,
    effects::{blend::blend, mode_filter::mode_filter},
    encode::artifact::save_png,
    foundation::error::{SynthError, SynthResult},
    pipeline::config::PipelineConfig,
};

/// Result of a pipeline invocation that did not fail.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PipelineOutcome {
    /// Both artifacts were written.
    Completed(PipelineReport),
    /// The source directory is absent; nothing was read or written.
    MissingInput {
        /// Human-readable description of the expected layout.
        guidance: String,
    },
}

/// Summary of a completed run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PipelineReport {
    pub intermediate: PathBuf,
    pub final_artifact: PathBuf,
    pub width: u32,
    pub height: u32,
    /// Number of source images read (seed pair included).
    pub sources_used: u32,
    /// Seed the augmentation passes drew from; rerun with it to reproduce the output.
    pub seed: u64,
}

/// The background/overlay operands of the most recent blend.
///
/// The re-blend after the fold loop reuses this pair rather than reading new sources.
#[derive(Clone, Debug)]
pub struct BlendPair {
    pub background: RgbaImage,
    pub overlay: RgbaImage,
}

/// Run the whole pipeline: precondition, seed blend, fold, final composite, augmentations.
///
/// A missing source directory is reported as [`PipelineOutcome::MissingInput`]. Any other
/// failure aborts the run; artifacts already written stay as last saved.
pub fn run_pipeline(cfg: &PipelineConfig) -> SynthResult<PipelineOutcome> {
    cfg.validate()?;

    let layout = cfg.source_layout();
    if !layout.is_present() {
        tracing::info!(dir = %layout.dir().display(), "source directory missing");
        return Ok(PipelineOutcome::MissingInput {
            guidance: layout.guidance(cfg.source_count()),
        });
    }

    let mut rng = match cfg.seed {
        Some(seed) => AugmentRng::seeded(seed),
        None => AugmentRng::from_entropy(),
    };
    tracing::info!(seed = rng.seed(), "augmentation seed");

    let pair = seed_blend(cfg, &layout)?;
    let pair = fold(cfg, &layout, pair)?;
    let composite = final_composite(cfg, &pair)?;
    let (width, height) = composite.dimensions();
    augment_passes(cfg, &mut rng)?;

    Ok(PipelineOutcome::Completed(PipelineReport {
        intermediate: cfg.intermediate_path(),
        final_artifact: cfg.final_path(),
        width,
        height,
        sources_used: cfg.source_count(),
        seed: rng.seed(),
    }))
}

/// Blend sources 1 and 2 and persist the accumulator.
#[tracing::instrument(skip_all)]
pub fn seed_blend(cfg: &PipelineConfig, layout: &SourceLayout) -> SynthResult<BlendPair> {
    let background = load_rgba(&layout.path_for(1))?;
    let overlay = load_rgba(&layout.path_for(2))?;
    let blended = blend(&background, &overlay, cfg.fold_ratio)?;
    save_png(&cfg.intermediate_path(), &blended, None)?;

    let (width, height) = blended.dimensions();
    tracing::info!(width, height, ratio = cfg.fold_ratio, "seed blend written");
    Ok(BlendPair {
        background,
        overlay,
    })
}

/// Fold sources `fold_lower..fold_upper` into the accumulator.
///
/// Each iteration reads the accumulator back from disk, so it is persisted after every
/// blend. Returns the operands of the last blend performed (`initial` if none ran).
#[tracing::instrument(skip_all, fields(lower = cfg.fold_lower, upper = cfg.fold_upper))]
pub fn fold(
    cfg: &PipelineConfig,
    layout: &SourceLayout,
    initial: BlendPair,
) -> SynthResult<BlendPair> {
    let accumulator = cfg.intermediate_path();
    let mut pair = initial;
    for index in cfg.fold_lower..cfg.fold_upper {
        let background = load_rgba(&accumulator)?;
        let overlay = load_rgba(&layout.path_for(index))?;
        let blended = blend(&background, &overlay, cfg.fold_ratio)?;
        save_png(&accumulator, &blended, None)?;
        tracing::info!(index, ratio = cfg.fold_ratio, "folded source");

        pair = BlendPair {
            background,
            overlay,
        };
    }
    Ok(pair)
}

/// Re-blend the last pair at `final_ratio`, mode-filter, and persist with DPI metadata.
#[tracing::instrument(skip_all, fields(ratio = cfg.final_ratio, size = cfg.mode_filter_size))]
pub fn final_composite(cfg: &PipelineConfig, pair: &BlendPair) -> SynthResult<RgbaImage> {
    let blended = blend(&pair.background, &pair.overlay, cfg.final_ratio)?;
    let filtered = mode_filter(&blended, cfg.mode_filter_size)?;
    save_png(&cfg.intermediate_path(), &filtered, Some(cfg.dpi))?;
    tracing::info!(path = %cfg.intermediate_path().display(), "final composite written");
    Ok(filtered)
}

/// Apply each configured augmenter in order, each reading the previous pass's output
/// from disk and overwriting the final artifact.
#[tracing::instrument(skip_all, fields(passes = cfg.augmenters.len()))]
pub fn augment_passes(cfg: &PipelineConfig, rng: &mut AugmentRng) -> SynthResult<()> {
    let intermediate = cfg.intermediate_path();
    let final_path = cfg.final_path();
    if cfg.augmenters.is_empty() {
        let img = load_rgba(&intermediate)?;
        return save_png(&final_path, &img, Some(cfg.dpi));
    }

    for (pass, spec) in cfg.augmenters.iter().enumerate() {
        let input: &Path = if pass == 0 {
            &intermediate
        } else {
            &final_path
        };
        let mut img = load_rgba(input)?;
        let dims = img.dimensions();

        let augmenter = spec.build()?;
        augmenter.augment(&mut img, rng)?;
        if img.dimensions() != dims {
            return Err(SynthError::augment(format!(
                "{} changed dimensions from {}x{} to {}x{}",
                augmenter.name(),
                dims.0,
                dims.1,
                img.width(),
                img.height()
            )));
        }

        save_png(&final_path, &img, Some(cfg.dpi))?;
        tracing::info!(pass, name = augmenter.name(), "augmentation pass written");
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/driver.rs"]
mod tests;
