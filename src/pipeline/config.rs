use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context;

use crate::{
    assets::source::SourceLayout,
    augment::AugmenterSpec,
    foundation::{
        core::Dpi,
        error::{SynthError, SynthResult},
    },
};

/// Every knob of the blend-and-augment pipeline.
///
/// The defaults reproduce the reference run: six sources `scraped_art/1.jpg` through
/// `6.jpg`, folded at 0.25, re-blended at 0.5, mode-filtered with size 15, then a 7x7
/// jigsaw and an emboss pass, with outputs `new.png` and `finalproduct.png` at 300 DPI.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Directory holding the numbered source images.
    pub input_dir: PathBuf,
    /// Extension of the source images, without the dot.
    pub source_ext: String,
    /// Directory the two artifacts are written to.
    pub work_dir: PathBuf,
    /// File name of the accumulator artifact.
    pub intermediate_name: String,
    /// File name of the augmented artifact.
    pub final_name: String,
    /// First source index folded into the accumulator (inclusive).
    pub fold_lower: u32,
    /// Loop bound (exclusive); the last source used is `fold_upper - 1`.
    pub fold_upper: u32,
    /// Overlay weight for the seed blend and every fold iteration.
    pub fold_ratio: f32,
    /// Overlay weight of the re-blend after the loop.
    pub final_ratio: f32,
    /// Neighbourhood size of the mode filter.
    pub mode_filter_size: u32,
    /// Resolution tag of the filtered and augmented artifacts.
    pub dpi: Dpi,
    /// Augmentation seed. `None` draws one from entropy (reported after the run).
    pub seed: Option<u64>,
    /// Augmentation passes, applied in order.
    pub augmenters: Vec<AugmenterSpec>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("scraped_art"),
            source_ext: "jpg".to_string(),
            work_dir: PathBuf::from("."),
            intermediate_name: "new.png".to_string(),
            final_name: "finalproduct.png".to_string(),
            fold_lower: 3,
            fold_upper: 7,
            fold_ratio: 0.25,
            final_ratio: 0.5,
            mode_filter_size: 15,
            dpi: Dpi(300),
            seed: None,
            augmenters: AugmenterSpec::default_chain(),
        }
    }
}

impl PipelineConfig {
    /// Load a JSON configuration file. Missing fields take their defaults.
    pub fn from_path(path: &Path) -> SynthResult<Self> {
        let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_reader(BufReader::new(f))
            .with_context(|| format!("parse config JSON '{}'", path.display()))?;
        Ok(cfg)
    }

    pub fn from_json_str(s: &str) -> SynthResult<Self> {
        let cfg: Self = serde_json::from_str(s).context("parse config JSON")?;
        Ok(cfg)
    }

    pub fn validate(&self) -> SynthResult<()> {
        if self.fold_lower < 3 {
            return Err(SynthError::validation(
                "fold_lower must be >= 3 (sources 1 and 2 form the seed blend)",
            ));
        }
        if self.fold_upper < self.fold_lower {
            return Err(SynthError::validation("fold_upper must be >= fold_lower"));
        }
        for (name, ratio) in [
            ("fold_ratio", self.fold_ratio),
            ("final_ratio", self.final_ratio),
        ] {
            if !ratio.is_finite() || !(0.0..=1.0).contains(&ratio) {
                return Err(SynthError::validation(format!(
                    "{name} must be finite and within [0, 1]"
                )));
            }
        }
        if self.mode_filter_size == 0 {
            return Err(SynthError::validation("mode_filter_size must be > 0"));
        }
        Dpi::new(self.dpi.0)?;
        for (name, value) in [
            ("source_ext", &self.source_ext),
            ("intermediate_name", &self.intermediate_name),
            ("final_name", &self.final_name),
        ] {
            if value.trim().is_empty() {
                return Err(SynthError::validation(format!("{name} must be non-empty")));
            }
        }
        if self.intermediate_name == self.final_name {
            return Err(SynthError::validation(
                "intermediate_name and final_name must differ",
            ));
        }
        for spec in &self.augmenters {
            spec.validate()?;
        }
        Ok(())
    }

    pub fn source_layout(&self) -> SourceLayout {
        SourceLayout::new(&self.input_dir, &self.source_ext)
    }

    /// Number of sources consumed: the seed pair plus every folded index.
    pub fn source_count(&self) -> u32 {
        self.fold_upper.saturating_sub(1).max(2)
    }

    pub fn intermediate_path(&self) -> PathBuf {
        self.work_dir.join(&self.intermediate_name)
    }

    pub fn final_path(&self) -> PathBuf {
        self.work_dir.join(&self.final_name)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/config.rs"]
mod tests;
