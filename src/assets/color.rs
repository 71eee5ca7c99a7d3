use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::{RenderError, RenderResult};
use crate::foundation::math::clamp_u8;

/// Straight-alpha sRGB color as it appears in design parameters.
///
/// Parses the CSS forms the design pages use: `#rgb`, `#rrggbb`, `#rrggbbaa`,
/// `rgb(r, g, b)`, `rgba(r, g, b, a)` and the keywords `transparent`, `white`, `black`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Const constructor from a `0xRRGGBB` literal, used by the static catalogs.
    pub const fn hex(rgb: u32) -> Self {
        Self::rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }

    /// Replace alpha with `alpha` in `0..=1`.
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self {
            a: clamp_u8(alpha.clamp(0.0, 1.0) * 255.0),
            ..self
        }
    }

    /// Multiply the existing alpha by `factor` in `0..=1` (canvas `globalAlpha`).
    pub fn fade(self, factor: f64) -> Self {
        Self {
            a: clamp_u8(f64::from(self.a) * factor.clamp(0.0, 1.0)),
            ..self
        }
    }

    pub fn alpha_f64(self) -> f64 {
        f64::from(self.a) / 255.0
    }

    pub fn to_premul(self) -> Rgba8Premul {
        Rgba8Premul::from_straight_rgba(self.r, self.g, self.b, self.a)
    }

    pub(crate) fn to_cpu(self) -> vello_cpu::peniko::Color {
        vello_cpu::peniko::Color::from_rgba8(self.r, self.g, self.b, self.a)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(
                f,
                "#{:02x}{:02x}{:02x}{:02x}",
                self.r, self.g, self.b, self.a
            )
        }
    }
}

impl FromStr for Color {
    type Err = RenderError;

    fn from_str(s: &str) -> RenderResult<Self> {
        let s = s.trim();
        let lower = s.to_ascii_lowercase();
        match lower.as_str() {
            "transparent" => return Ok(Self::TRANSPARENT),
            "white" => return Ok(Self::WHITE),
            "black" => return Ok(Self::BLACK),
            _ => {}
        }
        if let Some(hex) = lower.strip_prefix('#') {
            return parse_hex(hex);
        }
        if let Some(body) = lower
            .strip_prefix("rgba(")
            .or_else(|| lower.strip_prefix("rgb("))
        {
            let body = body.strip_suffix(')').ok_or_else(|| {
                RenderError::invalid_parameter(format!("unterminated color function \"{s}\""))
            })?;
            return parse_rgb_fn(body);
        }
        Err(RenderError::invalid_parameter(format!(
            "unrecognized color \"{s}\""
        )))
    }
}

fn parse_hex(hex: &str) -> RenderResult<Color> {
    fn nibble(c: u8) -> Option<u8> {
        (c as char).to_digit(16).map(|v| v as u8)
    }
    let bad = || RenderError::invalid_parameter(format!("invalid hex color \"#{hex}\""));

    let digits = hex
        .bytes()
        .map(nibble)
        .collect::<Option<Vec<u8>>>()
        .ok_or_else(bad)?;
    let pair = |i: usize| digits[i] << 4 | digits[i + 1];
    match digits.len() {
        3 => Ok(Color::rgb(
            digits[0] * 17,
            digits[1] * 17,
            digits[2] * 17,
        )),
        6 => Ok(Color::rgb(pair(0), pair(2), pair(4))),
        8 => Ok(Color::rgba(pair(0), pair(2), pair(4), pair(6))),
        _ => Err(bad()),
    }
}

fn parse_rgb_fn(body: &str) -> RenderResult<Color> {
    let parts: Vec<&str> = body.split(',').map(str::trim).collect();
    let num = |p: &str| -> RenderResult<f64> {
        p.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| RenderError::invalid_parameter(format!("invalid color channel \"{p}\"")))
    };
    match parts.as_slice() {
        [r, g, b] => Ok(Color::rgb(
            clamp_u8(num(r)?),
            clamp_u8(num(g)?),
            clamp_u8(num(b)?),
        )),
        [r, g, b, a] => Ok(Color::rgba(
            clamp_u8(num(r)?),
            clamp_u8(num(g)?),
            clamp_u8(num(b)?),
            clamp_u8(num(a)?.clamp(0.0, 1.0) * 255.0),
        )),
        _ => Err(RenderError::invalid_parameter(
            "rgb()/rgba() take 3 or 4 channels",
        )),
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Text(String),
            RgbaObj {
                r: f64,
                g: f64,
                b: f64,
                #[serde(default = "one")]
                a: f64,
            },
            Arr(Vec<f64>),
        }

        fn one() -> f64 {
            1.0
        }

        fn unit(v: f64) -> u8 {
            clamp_u8(v.clamp(0.0, 1.0) * 255.0)
        }

        match Repr::deserialize(deserializer)? {
            Repr::Text(s) => s.parse().map_err(serde::de::Error::custom),
            Repr::RgbaObj { r, g, b, a } => Ok(Color::rgba(unit(r), unit(g), unit(b), unit(a))),
            Repr::Arr(v) => match v.as_slice() {
                [r, g, b] => Ok(Color::rgb(unit(*r), unit(*g), unit(*b))),
                [r, g, b, a] => Ok(Color::rgba(unit(*r), unit(*g), unit(*b), unit(*a))),
                _ => Err(serde::de::Error::custom(
                    "rgba array must have len 3 ([r,g,b]) or 4 ([r,g,b,a])",
                )),
            },
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/color.rs"]
mod tests;
