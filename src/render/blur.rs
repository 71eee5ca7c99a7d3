use crate::foundation::error::{RenderError, RenderResult};

/// Separable Gaussian kernel in Q16 fixed point; weights sum to exactly `1 << 16`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct BlurKernel {
    weights: Vec<u32>,
}

impl BlurKernel {
    /// Kernel for `sigma` device pixels, truncated at three sigma.
    pub(crate) fn gaussian(sigma: f64) -> RenderResult<Self> {
        if !sigma.is_finite() || sigma < 0.0 {
            return Err(RenderError::invalid_parameter(
                "blur sigma must be finite and >= 0",
            ));
        }
        let radius = (sigma * 3.0).ceil() as i64;
        if radius == 0 {
            return Ok(Self {
                weights: vec![1 << 16],
            });
        }

        let denom = 2.0 * sigma * sigma;
        let weights_f: Vec<f64> = (-radius..=radius)
            .map(|i| {
                let x = i as f64;
                (-x * x / denom).exp()
            })
            .collect();
        let sum: f64 = weights_f.iter().sum();

        let mut weights: Vec<u32> = weights_f
            .iter()
            .map(|wf| ((wf / sum) * 65536.0).round().clamp(0.0, 65536.0) as u32)
            .collect();
        let acc: i64 = weights.iter().map(|&w| i64::from(w)).sum();
        let delta = 65536 - acc;
        if delta != 0 {
            let mid = weights.len() / 2;
            weights[mid] = (i64::from(weights[mid]) + delta).clamp(0, 65536) as u32;
        }
        Ok(Self { weights })
    }

    pub(crate) fn radius(&self) -> usize {
        self.weights.len() / 2
    }
}

/// Blur a premultiplied RGBA8 buffer in place. Pixels outside the buffer count as transparent.
///
/// Only the bounding box of non-transparent pixels, grown by the kernel radius, is processed.
pub(crate) fn blur_rgba8_premul_in_place(
    rgba: &mut [u8],
    width: u32,
    height: u32,
    kernel: &BlurKernel,
) -> RenderResult<()> {
    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| RenderError::invalid_parameter("blur buffer size overflow"))?;
    if rgba.len() != expected {
        return Err(RenderError::invalid_parameter(
            "blur expects a buffer of width*height*4 bytes",
        ));
    }
    if kernel.weights.len() == 1 {
        return Ok(());
    }
    let Some((x0, y0, x1, y1)) = alpha_bounds(rgba, width, height) else {
        return Ok(());
    };

    let r = kernel.radius();
    let region = Region {
        x0: x0.saturating_sub(r),
        y0: y0.saturating_sub(r),
        x1: (x1 + r).min(width as usize),
        y1: (y1 + r).min(height as usize),
        stride: width as usize,
    };

    let mut tmp = vec![0u8; region.width() * region.height() * 4];
    horizontal_pass(rgba, &mut tmp, &region, &kernel.weights);
    vertical_pass(&tmp, rgba, &region, &kernel.weights);
    Ok(())
}

struct Region {
    x0: usize,
    y0: usize,
    x1: usize,
    y1: usize,
    stride: usize,
}

impl Region {
    fn width(&self) -> usize {
        self.x1 - self.x0
    }

    fn height(&self) -> usize {
        self.y1 - self.y0
    }
}

/// Half-open bounds `(x0, y0, x1, y1)` of pixels with non-zero alpha.
fn alpha_bounds(rgba: &[u8], width: u32, height: u32) -> Option<(usize, usize, usize, usize)> {
    let (w, h) = (width as usize, height as usize);
    let mut bounds: Option<(usize, usize, usize, usize)> = None;
    for y in 0..h {
        let row = &rgba[y * w * 4..(y + 1) * w * 4];
        let Some(first) = row.chunks_exact(4).position(|px| px[3] != 0) else {
            continue;
        };
        let last = w - 1 - row.chunks_exact(4).rev().position(|px| px[3] != 0).unwrap_or(0);
        bounds = Some(match bounds {
            None => (first, y, last + 1, y + 1),
            Some((bx0, by0, bx1, _)) => (bx0.min(first), by0, bx1.max(last + 1), y + 1),
        });
    }
    bounds
}

// Source is the full surface; destination is the region-sized scratch buffer.
fn horizontal_pass(src: &[u8], dst: &mut [u8], region: &Region, k: &[u32]) {
    let radius = (k.len() / 2) as isize;
    let rw = region.width();
    for y in region.y0..region.y1 {
        for x in region.x0..region.x1 {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let sx = x as isize + ki as isize - radius;
                if sx < region.x0 as isize || sx >= region.x1 as isize {
                    continue;
                }
                let idx = (y * region.stride + sx as usize) * 4;
                for c in 0..4 {
                    acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out = ((y - region.y0) * rw + (x - region.x0)) * 4;
            for c in 0..4 {
                dst[out + c] = q16_to_u8(acc[c]);
            }
        }
    }
}

// Source is the scratch buffer; destination is the full surface.
fn vertical_pass(src: &[u8], dst: &mut [u8], region: &Region, k: &[u32]) {
    let radius = (k.len() / 2) as isize;
    let rw = region.width();
    let rh = region.height() as isize;
    for y in 0..rh {
        for x in 0..rw {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let sy = y + ki as isize - radius;
                if sy < 0 || sy >= rh {
                    continue;
                }
                let idx = (sy as usize * rw + x) * 4;
                for c in 0..4 {
                    acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out = ((region.y0 + y as usize) * region.stride + region.x0 + x) * 4;
            for c in 0..4 {
                dst[out + c] = q16_to_u8(acc[c]);
            }
        }
    }
}

fn q16_to_u8(acc: u64) -> u8 {
    ((acc + 32768) >> 16).min(255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/blur.rs"]
mod tests;
