use crate::foundation::error::{RenderError, RenderResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Largest surface edge the CPU rasterizer accepts.
pub const MAX_SURFACE_EDGE: u32 = u16::MAX as u32;

/// Pixel dimensions of a raster surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> RenderResult<Self> {
        if width == 0 || height == 0 {
            return Err(RenderError::invalid_parameter(
                "canvas width and height must be > 0",
            ));
        }
        if width > MAX_SURFACE_EDGE || height > MAX_SURFACE_EDGE {
            return Err(RenderError::invalid_parameter(format!(
                "canvas {width}x{height} exceeds {MAX_SURFACE_EDGE} px per edge"
            )));
        }
        Ok(Self { width, height })
    }

    /// Same aspect, every edge multiplied by `factor`.
    pub fn scaled(self, factor: u32) -> RenderResult<Self> {
        let w = self.width.checked_mul(factor);
        let h = self.height.checked_mul(factor);
        match (w, h) {
            (Some(w), Some(h)) => Self::new(w, h),
            _ => Err(RenderError::invalid_parameter("canvas scale overflow")),
        }
    }

    pub fn pixel_count(self) -> usize {
        (self.width as usize).saturating_mul(self.height as usize)
    }

    pub(crate) fn as_u16(self) -> (u16, u16) {
        // `new` guarantees both edges fit.
        (self.width as u16, self.height as u16)
    }
}

/// Size of a design in its own logical units.
///
/// Every design constant is expressed in these units; the painter maps them onto device pixels
/// with a single uniform scale so previews and exports render the same proportions.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LogicalSize {
    pub width: f64,
    pub height: f64,
}

impl LogicalSize {
    pub fn new(width: f64, height: f64) -> RenderResult<Self> {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(RenderError::invalid_parameter(
                "logical size must be finite and > 0",
            ));
        }
        Ok(Self { width, height })
    }

    pub fn aspect(self) -> f64 {
        self.width / self.height
    }

    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    /// Device canvas for this logical size at `factor` pixels per unit.
    pub fn to_canvas(self, factor: f64) -> RenderResult<Canvas> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(RenderError::invalid_parameter(
                "render scale must be finite and > 0",
            ));
        }
        let w = (self.width * factor).round();
        let h = (self.height * factor).round();
        if w > f64::from(MAX_SURFACE_EDGE) || h > f64::from(MAX_SURFACE_EDGE) {
            return Err(RenderError::invalid_parameter(format!(
                "canvas {w}x{h} exceeds {MAX_SURFACE_EDGE} px per edge"
            )));
        }
        Canvas::new(w.max(1.0) as u32, h.max(1.0) as u32)
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8Premul {
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
