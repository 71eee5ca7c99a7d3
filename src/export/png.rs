use std::io::Cursor;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context;

use crate::assets::fonts::FontBook;
use crate::designs::RenderParameters;
use crate::foundation::error::{RenderError, RenderResult};
use crate::render::pipeline::render;
use crate::render::surface::Surface;

/// Encoded PNG plus the filename offered for download.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportedImage {
    pub bytes: Vec<u8>,
    pub filename: String,
}

/// Encode `surface` as `<app>-<unix ms>.png` using the current wall clock.
pub fn export_png(surface: &Surface, app: &str) -> RenderResult<ExportedImage> {
    let ms = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| RenderError::export(format!("system clock before unix epoch: {e}")))?
        .as_millis();
    export_png_at(surface, app, ms as u64)
}

/// Encode `surface` with an explicit timestamp in the filename.
#[tracing::instrument(skip(surface), fields(width = surface.width(), height = surface.height()))]
pub fn export_png_at(surface: &Surface, app: &str, unix_ms: u64) -> RenderResult<ExportedImage> {
    if !is_app_slug(app) {
        return Err(RenderError::export(format!(
            "app name '{app}' must be lowercase letters and dashes"
        )));
    }
    let bytes = encode_png(surface).map_err(|e| RenderError::export(format!("{e:#}")))?;
    let filename = format!("{app}-{unix_ms}.png");
    tracing::debug!(%filename, bytes = bytes.len(), "encoded png");
    Ok(ExportedImage { bytes, filename })
}

/// Re-render `params` at `factor` device pixels per logical unit. Detail is painted at the
/// target size, never upscaled from a preview.
pub fn render_hd(
    params: &RenderParameters,
    fonts: &FontBook,
    factor: u32,
) -> RenderResult<Surface> {
    if factor == 0 {
        return Err(RenderError::invalid_parameter("export factor must be >= 1"));
    }
    render(params, fonts, f64::from(factor))
}

fn is_app_slug(app: &str) -> bool {
    !app.is_empty() && app.bytes().all(|b| b.is_ascii_lowercase() || b == b'-')
}

fn encode_png(surface: &Surface) -> anyhow::Result<Vec<u8>> {
    let img = image::RgbaImage::from_raw(
        surface.width(),
        surface.height(),
        surface.to_straight_rgba(),
    )
    .context("surface buffer does not match its size")?;
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .context("encode png")?;
    Ok(buf)
}

#[cfg(test)]
#[path = "../../tests/unit/export/png.rs"]
mod tests;
