use image::RgbaImage;

use crate::foundation::error::{SynthError, SynthResult};

/// Linear interpolation of one channel: `a + ratio * (b - a)`, truncated and clamped.
///
/// `ratio = 0` yields `a`, `ratio = 1` yields `b`. Ratios outside `[0, 1]` extrapolate.
pub fn blend_channel(a: u8, b: u8, ratio: f32) -> u8 {
    let v = f32::from(a) + ratio * (f32::from(b) - f32::from(a));
    if v <= 0.0 {
        0
    } else if v >= 255.0 {
        255
    } else {
        v as u8
    }
}

/// Alpha-blend two equally sized RGBA images; every channel, including alpha, is mixed.
pub fn blend(background: &RgbaImage, overlay: &RgbaImage, ratio: f32) -> SynthResult<RgbaImage> {
    let mut out = background.clone();
    blend_in_place(&mut out, overlay, ratio)?;
    Ok(out)
}

/// In-place variant of [`blend`]: `dst = blend(dst, overlay, ratio)`.
pub fn blend_in_place(dst: &mut RgbaImage, overlay: &RgbaImage, ratio: f32) -> SynthResult<()> {
    if !ratio.is_finite() {
        return Err(SynthError::blend("blend ratio must be finite"));
    }
    if dst.dimensions() != overlay.dimensions() {
        let (dw, dh) = dst.dimensions();
        let (ow, oh) = overlay.dimensions();
        return Err(SynthError::blend(format!(
            "images do not match: background is {dw}x{dh}, overlay is {ow}x{oh}"
        )));
    }

    for (d, o) in dst.iter_mut().zip(overlay.iter()) {
        *d = blend_channel(*d, *o, ratio);
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/effects/blend.rs"]
mod tests;
