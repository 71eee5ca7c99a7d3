use crate::foundation::core::{Canvas, Rgba8Premul};
use crate::foundation::error::{RenderError, RenderResult};
use crate::foundation::math::unpremultiply_rgba8_in_place;

/// Finished raster: premultiplied RGBA8, row-major, tightly packed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Surface {
    canvas: Canvas,
    rgba8_premul: Vec<u8>,
}

impl Surface {
    pub fn new_transparent(canvas: Canvas) -> Self {
        Self {
            canvas,
            rgba8_premul: vec![0; canvas.pixel_count() * 4],
        }
    }

    pub fn from_premul(canvas: Canvas, rgba8_premul: Vec<u8>) -> RenderResult<Self> {
        if rgba8_premul.len() != canvas.pixel_count() * 4 {
            return Err(RenderError::invalid_parameter(format!(
                "surface buffer has {} bytes, expected {}",
                rgba8_premul.len(),
                canvas.pixel_count() * 4
            )));
        }
        Ok(Self {
            canvas,
            rgba8_premul,
        })
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn width(&self) -> u32 {
        self.canvas.width
    }

    pub fn height(&self) -> u32 {
        self.canvas.height
    }

    pub fn as_premul_bytes(&self) -> &[u8] {
        &self.rgba8_premul
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8Premul> {
        if x >= self.canvas.width || y >= self.canvas.height {
            return None;
        }
        let idx = ((y as usize) * (self.canvas.width as usize) + (x as usize)) * 4;
        let px = &self.rgba8_premul[idx..idx + 4];
        Some(Rgba8Premul {
            r: px[0],
            g: px[1],
            b: px[2],
            a: px[3],
        })
    }

    /// Straight-alpha copy, the layout image encoders expect.
    pub fn to_straight_rgba(&self) -> Vec<u8> {
        let mut out = self.rgba8_premul.clone();
        unpremultiply_rgba8_in_place(&mut out);
        out
    }

    /// Stable content hash over size and pixels.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = xxhash_rust::xxh3::Xxh3::new();
        hasher.update(&self.canvas.width.to_le_bytes());
        hasher.update(&self.canvas.height.to_le_bytes());
        hasher.update(&self.rgba8_premul);
        hasher.digest()
    }

    /// Box-filter downsample by an integer `factor`; both edges must divide evenly.
    pub fn downsample(&self, factor: u32) -> RenderResult<Surface> {
        if factor == 0 || self.canvas.width % factor != 0 || self.canvas.height % factor != 0 {
            return Err(RenderError::invalid_parameter(format!(
                "cannot downsample {}x{} by {factor}",
                self.canvas.width, self.canvas.height
            )));
        }
        if factor == 1 {
            return Ok(self.clone());
        }
        let out_canvas = Canvas::new(self.canvas.width / factor, self.canvas.height / factor)?;
        let (sw, f) = (self.canvas.width as usize, factor as usize);
        let area = (f * f) as u32;
        let mut out = Vec::with_capacity(out_canvas.pixel_count() * 4);
        for oy in 0..out_canvas.height as usize {
            for ox in 0..out_canvas.width as usize {
                let mut acc = [0u32; 4];
                for y in oy * f..(oy + 1) * f {
                    let row = y * sw;
                    for x in ox * f..(ox + 1) * f {
                        let idx = (row + x) * 4;
                        for c in 0..4 {
                            acc[c] += u32::from(self.rgba8_premul[idx + c]);
                        }
                    }
                }
                out.extend(acc.map(|v| ((v + area / 2) / area) as u8));
            }
        }
        Surface::from_premul(out_canvas, out)
    }

    /// Mean absolute per-channel difference, in `0..=255`.
    pub fn mean_abs_diff(&self, other: &Surface) -> RenderResult<f64> {
        if self.canvas != other.canvas {
            return Err(RenderError::invalid_parameter(
                "surfaces differ in size and cannot be compared",
            ));
        }
        let total: u64 = self
            .rgba8_premul
            .iter()
            .zip(&other.rgba8_premul)
            .map(|(&a, &b)| u64::from(a.abs_diff(b)))
            .sum();
        Ok(total as f64 / self.rgba8_premul.len().max(1) as f64)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
