use std::sync::Arc;

use anyhow::Context;

use crate::foundation::error::{RenderError, RenderResult};
use crate::foundation::math::premultiply_rgba8_in_place;

/// Decoded user image in premultiplied RGBA8 form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreparedImage {
    /// Intrinsic width in pixels.
    pub width: u32,
    /// Intrinsic height in pixels.
    pub height: u32,
    /// Row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl PreparedImage {
    /// Wrap already-premultiplied pixels. The buffer length must be `width * height * 4`.
    pub fn from_premul(width: u32, height: u32, rgba8_premul: Vec<u8>) -> RenderResult<Self> {
        if width == 0 || height == 0 {
            return Err(RenderError::invalid_parameter(
                "image width and height must be > 0",
            ));
        }
        let expected = (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4);
        if rgba8_premul.len() != expected {
            return Err(RenderError::invalid_parameter(format!(
                "image buffer has {} bytes, expected {expected}",
                rgba8_premul.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba8_premul),
        })
    }

    pub fn size(&self) -> (f64, f64) {
        (f64::from(self.width), f64::from(self.height))
    }

    /// New image with `f` applied to every straight-alpha pixel.
    pub(crate) fn map_straight(&self, mut f: impl FnMut([u8; 4]) -> [u8; 4]) -> Self {
        let mut bytes = self.rgba8_premul.as_ref().clone();
        crate::foundation::math::unpremultiply_rgba8_in_place(&mut bytes);
        for px in bytes.chunks_exact_mut(4) {
            let out = f([px[0], px[1], px[2], px[3]]);
            px.copy_from_slice(&out);
        }
        premultiply_rgba8_in_place(&mut bytes);
        Self {
            width: self.width,
            height: self.height,
            rgba8_premul: Arc::new(bytes),
        }
    }
}

/// Decode encoded image bytes (PNG, JPEG, ...) and convert to premultiplied RGBA8.
pub fn decode_image(bytes: &[u8]) -> RenderResult<PreparedImage> {
    let dyn_img = image::load_from_memory(bytes)
        .context("decode image from memory")
        .map_err(|e| RenderError::image_decode(format!("{e:#}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    PreparedImage::from_premul(width, height, rgba8_premul)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
