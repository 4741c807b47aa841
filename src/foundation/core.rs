use crate::foundation::error::{SynthError, SynthResult};

/// Print resolution written as PNG `pHYs` metadata. Never affects pixel dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Dpi(pub u32);

impl Dpi {
    const METERS_PER_INCH: f64 = 0.0254;

    pub fn new(dots: u32) -> SynthResult<Self> {
        if dots == 0 {
            return Err(SynthError::validation("dpi must be > 0"));
        }
        Ok(Self(dots))
    }

    /// Pixels per metre, rounded the way PNG writers conventionally store it.
    pub fn pixels_per_meter(self) -> u32 {
        (f64::from(self.0) / Self::METERS_PER_INCH).round() as u32
    }

    pub fn from_pixels_per_meter(ppm: u32) -> Self {
        Self((f64::from(ppm) * Self::METERS_PER_INCH).round() as u32)
    }
}

impl Default for Dpi {
    fn default() -> Self {
        Self(300)
    }
}

/// Rows x columns partition of an image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Grid {
    pub rows: u32,
    pub cols: u32,
}

impl Grid {
    pub fn new(rows: u32, cols: u32) -> SynthResult<Self> {
        let grid = Self { rows, cols };
        grid.validate()?;
        Ok(grid)
    }

    pub fn validate(self) -> SynthResult<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(SynthError::validation("grid rows/cols must be > 0"));
        }
        Ok(())
    }

    pub fn cells(self) -> usize {
        self.rows as usize * self.cols as usize
    }
}

/// Closed interval `[lo, hi]` that stochastic parameters are drawn from.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct UniformRange {
    pub lo: f64,
    pub hi: f64,
}

impl UniformRange {
    pub fn new(lo: f64, hi: f64) -> SynthResult<Self> {
        let range = Self { lo, hi };
        range.validate("range")?;
        Ok(range)
    }

    /// A degenerate range that always samples `v`.
    pub fn fixed(v: f64) -> Self {
        Self { lo: v, hi: v }
    }

    pub fn validate(self, field: &str) -> SynthResult<()> {
        if !self.lo.is_finite() || !self.hi.is_finite() {
            return Err(SynthError::validation(format!(
                "{field} bounds must be finite"
            )));
        }
        if self.lo > self.hi {
            return Err(SynthError::validation(format!(
                "{field} lower bound must be <= upper bound"
            )));
        }
        Ok(())
    }

    pub fn validate_within(self, field: &str, min: f64, max: f64) -> SynthResult<()> {
        self.validate(field)?;
        let bounds = Self { lo: min, hi: max };
        if !bounds.contains(self.lo) || !bounds.contains(self.hi) {
            return Err(SynthError::validation(format!(
                "{field} must lie within [{min}, {max}]"
            )));
        }
        Ok(())
    }

    pub fn contains(self, v: f64) -> bool {
        self.lo <= v && v <= self.hi
    }
}

/// Integer counterpart of [`UniformRange`], inclusive on both ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct IntRange {
    pub lo: u32,
    pub hi: u32,
}

impl IntRange {
    pub fn validate(self, field: &str) -> SynthResult<()> {
        if self.lo > self.hi {
            return Err(SynthError::validation(format!(
                "{field} lower bound must be <= upper bound"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
