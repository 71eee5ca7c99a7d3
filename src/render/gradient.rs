use smallvec::SmallVec;

use crate::assets::color::Color;
use crate::foundation::core::{Affine, Point};
use crate::foundation::math::clamp_u8;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    pub offset: f64,
    pub color: Color,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GradientShape {
    /// Color varies along `start -> end`, constant across it.
    Linear { start: Point, end: Point },
    /// Concentric circles: `r0` maps to offset 0 and `r1` to offset 1.
    Radial { center: Point, r0: f64, r1: f64 },
}

/// Multi-stop gradient in local (logical) coordinates.
///
/// Colors are interpolated in premultiplied space and padded beyond the end stops, so fading to
/// `transparent` never darkens.
#[derive(Clone, Debug, PartialEq)]
pub struct Gradient {
    shape: GradientShape,
    stops: SmallVec<[GradientStop; 4]>,
}

impl Gradient {
    pub fn linear(start: impl Into<Point>, end: impl Into<Point>) -> Self {
        Self {
            shape: GradientShape::Linear {
                start: start.into(),
                end: end.into(),
            },
            stops: SmallVec::new(),
        }
    }

    pub fn radial(center: impl Into<Point>, r0: f64, r1: f64) -> Self {
        Self {
            shape: GradientShape::Radial {
                center: center.into(),
                r0,
                r1,
            },
            stops: SmallVec::new(),
        }
    }

    /// Add a stop. Stops are kept sorted by offset; equal offsets keep insertion order.
    pub fn with_stop(mut self, offset: f64, color: Color) -> Self {
        let offset = offset.clamp(0.0, 1.0);
        let at = self.stops.partition_point(|s| s.offset <= offset);
        self.stops.insert(at, GradientStop { offset, color });
        self
    }

    /// Stops spread evenly over `[0, 1]`, first color at 0 and last at 1.
    pub fn with_even_stops(mut self, colors: &[Color]) -> Self {
        let n = colors.len();
        for (i, &c) in colors.iter().enumerate() {
            let offset = if n <= 1 { 0.0 } else { i as f64 / (n - 1) as f64 };
            self = self.with_stop(offset, c);
        }
        self
    }

    pub fn shape(&self) -> GradientShape {
        self.shape
    }

    pub fn stops(&self) -> &[GradientStop] {
        &self.stops
    }

    /// Degenerate gradients paint nothing.
    pub fn is_degenerate(&self) -> bool {
        if self.stops.is_empty() {
            return true;
        }
        match self.shape {
            GradientShape::Linear { start, end } => (end - start).hypot2() == 0.0,
            GradientShape::Radial { r0, r1, .. } => r0 == r1 || r0 < 0.0 || r1 < 0.0,
        }
    }

    /// Gradient offset at `p`, clamped to `[0, 1]`.
    pub fn offset_at(&self, p: Point) -> f64 {
        let t = match self.shape {
            GradientShape::Linear { start, end } => {
                let d = end - start;
                let len2 = d.hypot2();
                if len2 == 0.0 {
                    0.0
                } else {
                    (p - start).dot(d) / len2
                }
            }
            GradientShape::Radial { center, r0, r1 } => {
                if r1 == r0 {
                    0.0
                } else {
                    ((p - center).hypot() - r0) / (r1 - r0)
                }
            }
        };
        t.clamp(0.0, 1.0)
    }

    /// Premultiplied RGBA8 color at offset `t`.
    pub fn color_at(&self, t: f64) -> [u8; 4] {
        let Some(first) = self.stops.first() else {
            return [0; 4];
        };
        if t <= first.offset {
            return premul_f64(first.color).map(clamp_u8);
        }
        for pair in self.stops.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t <= b.offset {
                let span = b.offset - a.offset;
                let k = if span <= 0.0 { 1.0 } else { (t - a.offset) / span };
                let ca = premul_f64(a.color);
                let cb = premul_f64(b.color);
                return [0, 1, 2, 3].map(|i| clamp_u8(ca[i] + (cb[i] - ca[i]) * k));
            }
        }
        let last = self.stops[self.stops.len() - 1];
        premul_f64(last.color).map(clamp_u8)
    }

    /// Rasterize into a premultiplied RGBA8 tile of `width x height` device pixels whose top-left
    /// sits at device `origin`. `device_to_local` maps device points into gradient space.
    pub(crate) fn rasterize(
        &self,
        device_to_local: Affine,
        origin: (f64, f64),
        width: u32,
        height: u32,
    ) -> Vec<u8> {
        let mut bytes = vec![0u8; (width as usize) * (height as usize) * 4];
        for y in 0..height {
            for x in 0..width {
                let device = Point::new(
                    origin.0 + f64::from(x) + 0.5,
                    origin.1 + f64::from(y) + 0.5,
                );
                let c = self.color_at(self.offset_at(device_to_local * device));
                let idx = ((y as usize) * (width as usize) + (x as usize)) * 4;
                bytes[idx..idx + 4].copy_from_slice(&c);
            }
        }
        bytes
    }
}

fn premul_f64(c: Color) -> [f64; 4] {
    let a = f64::from(c.a) / 255.0;
    [
        f64::from(c.r) * a,
        f64::from(c.g) * a,
        f64::from(c.b) * a,
        f64::from(c.a),
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/render/gradient.rs"]
mod tests;
