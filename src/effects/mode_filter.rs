use image::RgbaImage;

use crate::foundation::error::{SynthError, SynthResult};

/// Winning counts at or below this keep the original value (no clear majority).
const MIN_MODE_COUNT: u32 = 2;

/// Neighbourhood-majority smoothing.
///
/// Each channel is filtered independently. The window is `size x size` (radius
/// `size / 2`), clipped at the image borders. The most frequent value wins, the lowest
/// value on ties; if it occurs no more than twice the source value is kept.
pub fn mode_filter(src: &RgbaImage, size: u32) -> SynthResult<RgbaImage> {
    if size == 0 {
        return Err(SynthError::validation("mode filter size must be > 0"));
    }
    let (width, height) = src.dimensions();
    let mut out = src.clone();
    if width == 0 || height == 0 {
        return Ok(out);
    }

    let r = (size / 2) as i64;
    let w = i64::from(width);
    let h = i64::from(height);
    let data = src.as_raw();
    let dst: &mut [u8] = &mut out;

    let mut hist = vec![[0u32; 256]; 4];
    for y in 0..h {
        let y0 = (y - r).max(0);
        let y1 = (y + r).min(h - 1);

        for channel in hist.iter_mut() {
            channel.fill(0);
        }
        for x in 0..=r.min(w - 1) {
            add_column(&mut hist, data, w, x, y0, y1, 1);
        }

        for x in 0..w {
            let idx = ((y * w + x) as usize) * 4;
            for (c, channel) in hist.iter().enumerate() {
                let (value, count) = majority(channel);
                dst[idx + c] = if count > MIN_MODE_COUNT {
                    value
                } else {
                    data[idx + c]
                };
            }

            let leaving = x - r;
            if leaving >= 0 {
                add_column(&mut hist, data, w, leaving, y0, y1, -1);
            }
            let entering = x + r + 1;
            if entering < w {
                add_column(&mut hist, data, w, entering, y0, y1, 1);
            }
        }
    }

    Ok(out)
}

fn add_column(hist: &mut [[u32; 256]], data: &[u8], w: i64, x: i64, y0: i64, y1: i64, sign: i32) {
    for yy in y0..=y1 {
        let idx = ((yy * w + x) as usize) * 4;
        for (c, channel) in hist.iter_mut().enumerate() {
            let slot = &mut channel[data[idx + c] as usize];
            if sign > 0 {
                *slot += 1;
            } else {
                *slot -= 1;
            }
        }
    }
}

fn majority(channel: &[u32; 256]) -> (u8, u32) {
    let mut best = 0usize;
    let mut best_count = channel[0];
    for (value, &count) in channel.iter().enumerate().skip(1) {
        if count > best_count {
            best = value;
            best_count = count;
        }
    }
    (best as u8, best_count)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/mode_filter.rs"]
mod tests;
