use std::path::Path;

use anyhow::Context;
use image::RgbaImage;

use crate::foundation::error::SynthResult;

/// Decode an image file and convert it to straight (non-premultiplied) RGBA8.
///
/// The container format is sniffed from the file contents, so a PNG saved with a
/// `.jpg` name still decodes. Sources without an alpha channel come back opaque.
pub fn load_rgba(path: &Path) -> SynthResult<RgbaImage> {
    let bytes = std::fs::read(path).with_context(|| format!("open image '{}'", path.display()))?;
    let img = decode_rgba(&bytes).with_context(|| format!("decode image '{}'", path.display()))?;
    Ok(img)
}

/// Decode encoded image bytes and convert to straight RGBA8.
pub fn decode_rgba(bytes: &[u8]) -> SynthResult<RgbaImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    Ok(dyn_img.to_rgba8())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
