use std::{
    fs::File,
    io::{BufWriter, Cursor},
    path::Path,
};

use anyhow::Context;
use image::RgbaImage;

use crate::foundation::{core::Dpi, error::SynthResult};

/// Encode `img` as an 8-bit RGBA PNG at `path`, overwriting any existing file.
///
/// When `dpi` is set a `pHYs` chunk is written (pixels per metre). The tag is metadata
/// only: pixel dimensions are exactly those of `img`.
pub fn save_png(path: &Path, img: &RgbaImage, dpi: Option<Dpi>) -> SynthResult<()> {
    ensure_parent_dir(path)?;

    let file =
        File::create(path).with_context(|| format!("create png '{}'", path.display()))?;
    let (width, height) = img.dimensions();

    let mut encoder = png::Encoder::new(BufWriter::new(file), width, height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    if let Some(dpi) = dpi {
        let ppm = dpi.pixels_per_meter();
        encoder.set_pixel_dims(Some(png::PixelDimensions {
            xppu: ppm,
            yppu: ppm,
            unit: png::Unit::Meter,
        }));
    }

    let mut writer = encoder
        .write_header()
        .with_context(|| format!("write png header '{}'", path.display()))?;
    writer
        .write_image_data(img.as_raw())
        .with_context(|| format!("write png data '{}'", path.display()))?;
    writer
        .finish()
        .with_context(|| format!("finish png '{}'", path.display()))?;

    tracing::debug!(path = %path.display(), width, height, dpi = dpi.map(|d| d.0), "wrote png");
    Ok(())
}

/// Read the `pHYs` resolution of a PNG file, if it carries one in metre units.
pub fn read_png_dpi(path: &Path) -> SynthResult<Option<Dpi>> {
    let bytes = std::fs::read(path).with_context(|| format!("read png '{}'", path.display()))?;
    let decoder = png::Decoder::new(Cursor::new(bytes));
    let reader = decoder
        .read_info()
        .with_context(|| format!("read png info '{}'", path.display()))?;

    let dpi = match reader.info().pixel_dims {
        Some(dims) if matches!(dims.unit, png::Unit::Meter) => {
            if dims.xppu != dims.yppu {
                tracing::warn!(
                    path = %path.display(),
                    xppu = dims.xppu,
                    yppu = dims.yppu,
                    "anisotropic pHYs, reporting horizontal resolution"
                );
            }
            Some(Dpi::from_pixels_per_meter(dims.xppu))
        }
        _ => None,
    };
    Ok(dpi)
}

/// Create `path`'s parent directory if it is missing.
pub fn ensure_parent_dir(path: &Path) -> SynthResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/artifact.rs"]
mod tests;
