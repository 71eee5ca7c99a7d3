//! Procedural wallpapers: twenty-three seeded generators over a palette, sized by output
//! resolution.
//!
//! Every generator works in output pixels with `k = width / 1920` as the reference scale, so the
//! same seed produces the same composition at every resolution. Random draws happen in a fixed
//! order per style; labels consume their draws whether or not a font is available.

use std::f64::consts::PI;

use kurbo::{Circle, Ellipse, Line, Shape};
use serde::{Deserialize, Serialize};

use crate::assets::color::Color;
use crate::assets::decode::PreparedImage;
use crate::designs::{polygon, polyline};
use crate::foundation::core::{Affine, BezPath, LogicalSize, Point, Rect};
use crate::foundation::error::{RenderError, RenderResult};
use crate::random::prng::{Seed, SeededRng};
use crate::render::gradient::Gradient;
use crate::render::grain::{film_grain, screen_gradient};
use crate::render::painter::StrokeStyle;
use crate::render::pipeline::{DesignPainter, PaintCx, Stage, TextRun};

/// Width every generator's constants were tuned against.
const REFERENCE_WIDTH: f64 = 1920.0;
const GRID_STEP: f64 = 50.0;
const MONO: &str = "monospace";
/// Control-point distance for a quarter circle drawn as one cubic.
const KAPPA: f64 = 0.552_284_749_8;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resolution {
    #[serde(rename = "1080", alias = "1080p")]
    FullHd,
    #[default]
    #[serde(rename = "4k")]
    Uhd4k,
    #[serde(rename = "8k")]
    Uhd8k,
    #[serde(rename = "phone")]
    Phone,
}

impl Resolution {
    /// Output size in pixels; also the logical size of the design.
    pub fn size(self) -> (u32, u32) {
        match self {
            Self::FullHd => (1920, 1080),
            Self::Uhd4k => (3840, 2160),
            Self::Uhd8k => (7680, 4320),
            Self::Phone => (1170, 2532),
        }
    }

    /// Wire name, as it appears in presets.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FullHd => "1080",
            Self::Uhd4k => "4k",
            Self::Uhd8k => "8k",
            Self::Phone => "phone",
        }
    }
}

/// Named palettes. The last color is the background.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Palette {
    #[default]
    Default,
    Classic,
    Cyberpunk,
    Vaporwave,
    Matrix,
    Ocean,
    Mono,
    Forerunner,
    Unsc,
    PipboyAmber,
    PipboyGreen,
    CyberRed,
    /// Uses `WallpaperParams::custom_colors`.
    Custom,
}

macro_rules! palette {
    ($($hex:literal),+ $(,)?) => {
        const { &[$(Color::hex($hex)),+] }
    };
}

impl Palette {
    /// Catalog colors; empty for `Custom`.
    pub fn colors(self) -> &'static [Color] {
        match self {
            Self::Default => palette!(0x10b981, 0x3b82f6, 0x050505),
            Self::Classic => palette!(0xf87171, 0xfb923c, 0x34d399),
            Self::Cyberpunk => palette!(0xfcee0a, 0x00ff9f, 0x050505, 0xffffff),
            Self::Vaporwave => palette!(0xff71ce, 0x01cdfe, 0x05ffa1, 0xb967ff, 0xfffb96),
            Self::Matrix => palette!(0x00ff41, 0x008f11, 0x003b00, 0x0d0208),
            Self::Ocean => palette!(0x0ea5e9, 0x2dd4bf, 0x1e1b4b, 0xf0f9ff),
            Self::Mono => palette!(0xffffff, 0xa3a3a3, 0x404040, 0x000000),
            Self::Forerunner => palette!(0x00f2ff, 0x0066ff, 0x001a33, 0x050505),
            Self::Unsc => palette!(0x94ff44, 0x3d5c1a, 0x1a240d, 0x050505),
            Self::PipboyAmber => palette!(0xffb642, 0x8a5d00, 0x211500, 0x050505),
            Self::PipboyGreen => palette!(0x18e73c, 0x005c00, 0x001a00, 0x050505),
            Self::CyberRed => palette!(0xff003c, 0x00fff9, 0x1a1a1a, 0x050505),
            Self::Custom => &[],
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WallpaperStyle {
    #[default]
    Bauhaus,
    Circuit,
    Flow,
    /// Falling katakana columns.
    Rain,
    Brutalist,
    Glitch,
    Solar,
    Nodes,
    Mesh,
    /// Hex dump streams.
    Echo,
    Iso,
    /// Random-walk strokes.
    #[serde(rename = "noise", alias = "organic")]
    Organic,
    Typematrix,
    /// Fixed terminal layout; only the radar blips, gauges and scan band are seeded.
    Pipboy,
    Stellar,
    Circles,
    Pixel,
    Biohelix,
    Fluent,
    Docs,
    Nightcity,
    Global,
    Schematic,
}

impl WallpaperStyle {
    /// Every style, in catalog order.
    pub const ALL: [Self; 23] = [
        Self::Bauhaus,
        Self::Circuit,
        Self::Flow,
        Self::Rain,
        Self::Brutalist,
        Self::Glitch,
        Self::Solar,
        Self::Nodes,
        Self::Mesh,
        Self::Echo,
        Self::Iso,
        Self::Organic,
        Self::Typematrix,
        Self::Pipboy,
        Self::Stellar,
        Self::Circles,
        Self::Pixel,
        Self::Biohelix,
        Self::Fluent,
        Self::Docs,
        Self::Nightcity,
        Self::Global,
        Self::Schematic,
    ];
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WallpaperParams {
    pub style: WallpaperStyle,
    /// 0..=100; drives element counts and cell sizes.
    pub complexity: u8,
    /// 0..=50; film grain strength.
    pub noise: u8,
    pub preset: Palette,
    pub custom_colors: Vec<Color>,
    pub resolution: Resolution,
}

impl Default for WallpaperParams {
    fn default() -> Self {
        Self {
            style: WallpaperStyle::Bauhaus,
            complexity: 50,
            noise: 15,
            preset: Palette::Default,
            custom_colors: Palette::Default.colors().to_vec(),
            resolution: Resolution::Uhd4k,
        }
    }
}

impl WallpaperParams {
    /// Active palette, never empty.
    pub fn colors(&self) -> RenderResult<&[Color]> {
        let colors = match self.preset {
            Palette::Custom => self.custom_colors.as_slice(),
            named => named.colors(),
        };
        if colors.is_empty() {
            return Err(RenderError::invalid_parameter("wallpaper palette is empty"));
        }
        Ok(colors)
    }

    fn scene<'p>(&'p self, logical: LogicalSize, seed: &Seed) -> RenderResult<Scene<'p>> {
        Ok(Scene {
            w: logical.width,
            h: logical.height,
            k: logical.width / REFERENCE_WIDTH,
            complexity: f64::from(self.complexity.min(100)),
            ink: Ink {
                colors: self.colors()?,
            },
            draft: seed.to_string().chars().take(4).collect::<String>().to_uppercase(),
            resolution: self.resolution,
        })
    }

    fn paint_base(&self, cx: &mut PaintCx<'_>) -> RenderResult<()> {
        let bg = self.colors()?.last().copied().unwrap_or(Color::BLACK);
        let area = cx.logical.rect();
        cx.painter.fill_color(&area, bg);

        let (w, h) = (area.width(), area.height());
        let faint = Color::WHITE.with_alpha(0.03);
        let thin = StrokeStyle::new(1.0);
        let mut columns = BezPath::new();
        let mut x = 0.0;
        while x < w {
            columns.move_to((x, 0.0));
            columns.line_to((x, h));
            x += GRID_STEP;
        }
        let mut rows = BezPath::new();
        let mut y = 0.0;
        while y < h {
            rows.move_to((0.0, y));
            rows.line_to((w, y));
            y += GRID_STEP;
        }
        cx.painter.stroke_color(&columns, &thin, faint);
        cx.painter.stroke_color(&rows, &thin, faint);
        Ok(())
    }

    fn paint_grain(&self, cx: &mut PaintCx<'_>) -> RenderResult<()> {
        let noise = f64::from(self.noise);
        let rng = &mut cx.rng;
        cx.painter.with_pixels(|px, _| film_grain(px, rng, noise))
    }
}

/// Palette roles.
#[derive(Clone, Copy)]
struct Ink<'p> {
    colors: &'p [Color],
}

impl Ink<'_> {
    fn bg(&self) -> Color {
        self.colors[self.colors.len() - 1]
    }

    fn main(&self) -> Color {
        self.colors[0]
    }

    fn accent(&self) -> Color {
        self.colors.get(1).copied().unwrap_or(self.colors[0])
    }

    /// Any color but the background, unless the palette has only one.
    fn pick(&self, rng: &mut SeededRng) -> Color {
        let span = (self.colors.len() - 1) as f64;
        self.colors[(rng.next_f64() * span) as usize]
    }
}

/// Number of integers `i >= 0` with `i < limit`.
fn steps_below(limit: f64) -> u32 {
    if limit > 0.0 { limit.ceil() as u32 } else { 0 }
}

fn label(
    cx: &mut PaintCx<'_>,
    text: &str,
    size: f64,
    bold: bool,
    color: Color,
    at: (f64, f64),
) -> RenderResult<()> {
    let size = size.floor();
    if size < 1.0 {
        return Ok(());
    }
    let run = TextRun::new(MONO, size, color).bold(bold);
    cx.fill_text(text, &run, Point::from(at)).map(drop)
}

fn fill_rect(cx: &mut PaintCx<'_>, x: f64, y: f64, w: f64, h: f64, color: Color) {
    cx.painter
        .fill_color(&Rect::new(x, y, x + w, y + h), color);
}

/// Advance of `text` in the face `label` would draw it with.
fn mono_width(cx: &mut PaintCx<'_>, text: &str, size: f64, bold: bool) -> RenderResult<f64> {
    let run = TextRun::new(MONO, size.floor().max(1.0), Color::WHITE).bold(bold);
    cx.measure(text, &run)
}

/// Run `f` under `frame`; the transform is restored even when `f` fails.
fn framed(
    cx: &mut PaintCx<'_>,
    frame: Affine,
    f: impl FnOnce(&mut PaintCx<'_>) -> RenderResult<()>,
) -> RenderResult<()> {
    cx.painter.save();
    cx.painter.concat(frame);
    let out = f(cx);
    cx.painter.restore();
    out
}

/// Leading uppercase base-16 digits of a fraction in `[0, 1)`. Shorter when the expansion
/// terminates early, empty for zero.
fn hex_fraction(mut value: f64, digits: usize) -> String {
    let mut out = String::with_capacity(digits);
    for _ in 0..digits {
        if value <= 0.0 {
            break;
        }
        value *= 16.0;
        let digit = value.floor();
        value -= digit;
        if let Some(c) = char::from_digit(digit as u32, 16) {
            out.push(c.to_ascii_uppercase());
        }
    }
    out
}

/// Horizontal lines every `gap` units across the scene.
fn scanlines(w: f64, h: f64, gap: f64) -> BezPath {
    let mut path = BezPath::new();
    let mut y = 0.0;
    while y < h {
        path.move_to((0.0, y));
        path.line_to((w, y));
        y += gap;
    }
    path
}

struct Scene<'p> {
    w: f64,
    h: f64,
    k: f64,
    complexity: f64,
    ink: Ink<'p>,
    /// Seed prefix stamped on drafting headers.
    draft: String,
    resolution: Resolution,
}

impl Scene<'_> {
    fn center(&self) -> Point {
        Point::new(self.w / 2.0, self.h / 2.0)
    }

    fn fill_background(&self, cx: &mut PaintCx<'_>) {
        cx.painter
            .fill_color(&Rect::new(0.0, 0.0, self.w, self.h), self.ink.bg());
    }

    fn paint(&self, style: WallpaperStyle, cx: &mut PaintCx<'_>) -> RenderResult<()> {
        match style {
            WallpaperStyle::Bauhaus => self.bauhaus(cx),
            WallpaperStyle::Circuit => self.circuit(cx),
            WallpaperStyle::Flow => self.flow(cx),
            WallpaperStyle::Brutalist => self.brutalist(cx),
            WallpaperStyle::Glitch => self.glitch(cx),
            WallpaperStyle::Solar => self.solar(cx),
            WallpaperStyle::Nodes => self.nodes(cx),
            WallpaperStyle::Mesh => self.mesh(cx),
            WallpaperStyle::Iso => self.iso(cx),
            WallpaperStyle::Organic => self.organic(cx),
            WallpaperStyle::Stellar => self.stellar(cx),
            WallpaperStyle::Circles => self.circles(cx),
            WallpaperStyle::Pixel => self.pixel(cx),
            WallpaperStyle::Biohelix => self.biohelix(cx),
            WallpaperStyle::Fluent => self.fluent(cx),
            WallpaperStyle::Rain => self.rain(cx),
            WallpaperStyle::Echo => self.echo(cx),
            WallpaperStyle::Typematrix => self.typematrix(cx),
            WallpaperStyle::Pipboy => self.pipboy(cx),
            WallpaperStyle::Docs => self.docs(cx),
            WallpaperStyle::Nightcity => self.nightcity(cx),
            WallpaperStyle::Global => self.global(cx),
            WallpaperStyle::Schematic => self.schematic(cx),
        }
    }

    fn bauhaus(&self, cx: &mut PaintCx<'_>) -> RenderResult<()> {
        let cells = (5.0 + self.complexity / 10.0).floor();
        let rows = cells * (self.h / self.w);
        let cell_w = self.w / cells;
        let cell_h = self.h / rows;
        let size = cell_w * 0.8;
        let half = size / 2.0;

        for x in 0..cells as u32 {
            for y in 0..steps_below(rows) {
                if !cx.rng.above(0.4) {
                    continue;
                }
                let color = self.ink.pick(&mut cx.rng).fade(0.8);
                let shape = (cx.rng.next_f64() * 4.0).floor() as u8;
                let turns = (cx.rng.next_f64() * 4.0).floor();
                let frame = Affine::translate((
                    f64::from(x) * cell_w + cell_w / 2.0,
                    f64::from(y) * cell_h + cell_h / 2.0,
                )) * Affine::rotate(turns * PI / 2.0);

                cx.painter.scoped(|p| {
                    p.concat(frame);
                    match shape {
                        0 => p.fill_color(&Rect::new(-half, -half, half, half), color),
                        1 => p.fill_color(&Circle::new((0.0, 0.0), half), color),
                        2 => p.fill_color(
                            &polygon(&[(-half, half), (half, half), (0.0, -half)]),
                            color,
                        ),
                        _ => p.fill_color(&quarter_bite(half), color),
                    }
                    Ok(())
                })?;
            }
        }
        Ok(())
    }

    fn circuit(&self, cx: &mut PaintCx<'_>) -> RenderResult<()> {
        let lines = 20 + self.complexity as u32;
        for _ in 0..lines {
            let x = (cx.rng.next_f64() * 20.0).floor() * (self.w / 20.0);
            let y = (cx.rng.next_f64() * 20.0).floor() * (self.h / 20.0);
            let length = (100.0 + cx.rng.next_f64() * 400.0) * self.k;
            let horizontal = cx.rng.above(0.5);
            let color = self.ink.pick(&mut cx.rng);
            let width = 2.0 + cx.rng.next_f64() * 4.0;

            let end = if horizontal {
                (x + length, y)
            } else {
                (x, y + length)
            };
            cx.painter
                .stroke_color(&Line::new((x, y), end), &StrokeStyle::new(width), color);
            if cx.rng.above(0.5) {
                cx.painter
                    .fill_color(&Circle::new((x, y), width * 2.0), color);
            }
        }
        Ok(())
    }

    fn flow(&self, cx: &mut PaintCx<'_>) -> RenderResult<()> {
        let nodes = 10 + (self.complexity / 2.0) as u32;
        let mut glows = Vec::with_capacity(nodes as usize);
        for _ in 0..nodes {
            let x = cx.rng.next_f64() * self.w;
            let y = cx.rng.next_f64() * self.h;
            let radius = (50.0 + cx.rng.next_f64() * 300.0) * self.k;
            let color = self.ink.pick(&mut cx.rng);
            let gradient = Gradient::radial((x, y), 0.0, radius)
                .with_stop(0.0, color)
                .with_stop(1.0, Color::TRANSPARENT);
            glows.push((Circle::new((x, y), radius).bounding_box(), gradient));
        }

        let to_device = cx.painter.transform();
        let to_local = to_device.inverse();
        cx.painter.with_pixels(|px, canvas| {
            for (bounds, gradient) in &glows {
                let device = to_device.transform_rect_bbox(*bounds);
                screen_gradient(px, canvas, to_local, device, gradient);
            }
        })
    }

    fn brutalist(&self, cx: &mut PaintCx<'_>) -> RenderResult<()> {
        let count = (5.0 + self.complexity / 5.0).floor() as u32;
        for _ in 0..count {
            let w = (cx.rng.next_f64() * 400.0 + 100.0) * self.k;
            let h = (cx.rng.next_f64() * 400.0 + 100.0) * (self.h / 1080.0);
            let x = cx.rng.next_f64() * (self.w - w);
            let y = cx.rng.next_f64() * (self.h - h);
            let color = self.ink.pick(&mut cx.rng);
            fill_rect(cx, x, y, w, h, color.fade(0.9));

            let id = (cx.rng.next_f64() * 10_000.0).floor();
            let text = format!("BLOCK_ID_{id}");
            let white = Color::WHITE.fade(0.9);
            label(cx, &text, 12.0 * self.k, false, white, (x + 10.0, y + 20.0))?;
        }
        Ok(())
    }

    fn glitch(&self, cx: &mut PaintCx<'_>) -> RenderResult<()> {
        let count = 20 + self.complexity as u32;
        for _ in 0..count {
            let x = cx.rng.next_f64() * self.w;
            let y = cx.rng.next_f64() * self.h;
            let w = cx.rng.next_f64() * self.w * 0.5;
            let h = (cx.rng.next_f64() * 20.0 + 2.0) * (self.h / 1080.0);
            let color = self.ink.pick(&mut cx.rng);
            let alpha = cx.rng.next_f64() * 0.8;

            let bar = Rect::new(x - w / 2.0, y, x + w / 2.0, y + h);
            cx.painter.fill_color(&bar, color.fade(alpha));
            if cx.rng.above(0.8) {
                let edge = Color::WHITE.fade(alpha);
                cx.painter.stroke_color(&bar, &StrokeStyle::new(1.0), edge);
            }
        }
        Ok(())
    }

    fn solar(&self, cx: &mut PaintCx<'_>) -> RenderResult<()> {
        let center = self.center();
        let rays = 20 + self.complexity as u32;
        for _ in 0..rays {
            let angle = (cx.rng.next_f64() * 360.0).to_radians();
            let length = cx.rng.next_f64() * self.w * 0.8;
            let color = self.ink.pick(&mut cx.rng);
            let width = 1.0 + cx.rng.next_f64() * 10.0;
            let alpha = 0.3 + cx.rng.next_f64() * 0.5;

            let tip = center + kurbo::Vec2::from_angle(angle) * length;
            cx.painter.stroke_color(
                &Line::new(center, tip),
                &StrokeStyle::new(width),
                color.fade(alpha),
            );
        }
        Ok(())
    }

    fn nodes(&self, cx: &mut PaintCx<'_>) -> RenderResult<()> {
        let count = 10 + (self.complexity / 2.0) as u32;
        let points: Vec<(Point, Color)> = (0..count)
            .map(|_| {
                let x = cx.rng.next_f64() * self.w;
                let y = cx.rng.next_f64() * self.h;
                (Point::new(x, y), self.ink.pick(&mut cx.rng))
            })
            .collect();

        let thin = StrokeStyle::new(1.0);
        for (i, &(p, color)) in points.iter().enumerate() {
            for &(q, _) in &points[i + 1..] {
                if p.distance(q) < self.w * 0.3 {
                    cx.painter
                        .stroke_color(&Line::new(p, q), &thin, color.fade(0.2));
                }
            }
            cx.painter
                .fill_color(&Circle::new(p, 4.0), color.fade(0.8));
            if cx.rng.above(0.7) {
                let text = format!("NODE_{i:X}");
                let white = Color::WHITE.fade(0.8);
                label(cx, &text, 10.0 * self.k, false, white, (p.x + 10.0, p.y + 10.0))?;
            }
        }
        Ok(())
    }

    fn mesh(&self, cx: &mut PaintCx<'_>) -> RenderResult<()> {
        let size = (80.0 + (100.0 - self.complexity)) * self.k;
        let rows = self.h / size + 1.0;
        let cols = self.w / size + 1.0;
        let rise = size * 3f64.sqrt();
        let thin = StrokeStyle::new(1.0);

        for r in 0..steps_below(rows) {
            for c in 0..steps_below(cols) {
                let x = f64::from(c) * size * 1.5;
                let y = f64::from(r) * rise + if c % 2 == 0 { 0.0 } else { rise / 2.0 };
                let alpha = 0.1 + cx.rng.next_f64() * 0.4;
                let corners: Vec<(f64, f64)> = (0..6)
                    .map(|a| {
                        let angle = f64::from(a) * PI / 3.0;
                        (x + size * angle.cos(), y + size * angle.sin())
                    })
                    .collect();
                let hex = polygon(&corners);
                if cx.rng.above(0.8) {
                    let fill = self.ink.pick(&mut cx.rng);
                    cx.painter.fill_color(&hex, fill.fade(alpha));
                }
                cx.painter
                    .stroke_color(&hex, &thin, self.ink.main().fade(alpha));
            }
        }
        Ok(())
    }

    fn iso(&self, cx: &mut PaintCx<'_>) -> RenderResult<()> {
        let size = (60.0 + (100.0 - self.complexity)) * self.k;
        let cols = self.w / size + 2.0;
        let rows = self.h / (size * 0.5) + 2.0;
        let thin = StrokeStyle::new(1.0);

        for i in 0..steps_below(rows) {
            for j in 0..steps_below(cols) {
                let shift = if i % 2 == 0 { 0.5 } else { 0.0 };
                let x = (f64::from(j) - shift) * size;
                let y = f64::from(i) * size * 0.25;
                if !cx.rng.above(0.6) {
                    continue;
                }
                let color = self.ink.pick(&mut cx.rng);
                let alpha = 0.4 + cx.rng.next_f64() * 0.4;
                let diamond = polygon(&[
                    (x, y),
                    (x + size * 0.5, y + size * 0.25),
                    (x, y + size * 0.5),
                    (x - size * 0.5, y + size * 0.25),
                ]);
                cx.painter.fill_color(&diamond, color.fade(alpha));
                if cx.rng.above(0.8) {
                    cx.painter
                        .stroke_color(&diamond, &thin, Color::WHITE.fade(alpha));
                }
            }
        }
        Ok(())
    }

    fn organic(&self, cx: &mut PaintCx<'_>) -> RenderResult<()> {
        let paths = (5.0 + self.complexity / 10.0).floor() as u32;
        for _ in 0..paths {
            let mut x = cx.rng.next_f64() * self.w;
            let mut y = cx.rng.next_f64() * self.h;
            let color = self.ink.pick(&mut cx.rng);
            let width = 1.0 + cx.rng.next_f64() * 5.0;

            let mut walk = Vec::with_capacity(101);
            walk.push((x, y));
            for _ in 0..100 {
                x += cx.rng.jitter(150.0);
                y += cx.rng.jitter(150.0);
                walk.push((x, y));
            }
            let stroke = StrokeStyle::new(width);
            cx.painter
                .stroke_color(&polyline(&walk), &stroke, color.fade(0.3));
        }
        Ok(())
    }

    fn stellar(&self, cx: &mut PaintCx<'_>) -> RenderResult<()> {
        self.fill_background(cx);
        let center = self.center();
        let (main, accent) = (self.ink.main(), self.ink.accent());

        let hairline = StrokeStyle::new(0.5);
        for r in 1..6 {
            let ring = Circle::new(center, self.w / 10.0 * f64::from(r));
            cx.painter.stroke_color(&ring, &hairline, main.fade(0.1));
        }
        for a in 0..12 {
            let tip = center + kurbo::Vec2::from_angle(f64::from(a) * PI / 6.0) * self.w;
            cx.painter
                .stroke_color(&Line::new(center, tip), &hairline, main.fade(0.1));
        }

        let count = 50 + self.complexity as u32;
        let stars: Vec<(Point, f64, Color)> = (0..count)
            .map(|_| {
                let x = cx.rng.next_f64() * self.w;
                let y = cx.rng.next_f64() * self.h;
                let size = cx.rng.next_f64() * 3.0 + 1.0;
                let color = if cx.rng.above(0.8) { accent } else { Color::WHITE };
                (Point::new(x, y), size, color)
            })
            .collect();

        let thin = StrokeStyle::new(1.0);
        for (i, &(p, _, _)) in stars.iter().enumerate() {
            for &(q, _, _) in &stars[i + 1..] {
                if p.distance(q) < self.w * 0.15 {
                    cx.painter
                        .stroke_color(&Line::new(p, q), &thin, main.fade(0.15));
                }
            }
        }
        for (i, &(p, size, color)) in stars.iter().enumerate() {
            cx.painter
                .fill_color(&Circle::new(p, size), color.fade(0.8));
            if cx.rng.above(0.9) {
                let text = format!("STAR_{i:X}");
                let ink = color.fade(0.4);
                label(cx, &text, 10.0 * self.k, false, ink, (p.x + 8.0, p.y + 8.0))?;
            }
        }

        for _ in 0..3 {
            let rotation = cx.rng.next_f64() * PI;
            let rx = (cx.rng.next_f64() * 400.0 + 200.0) * self.k;
            let ry = (cx.rng.next_f64() * 200.0 + 100.0) * self.k;
            let orbit = Ellipse::new(center, (rx, ry), rotation);
            cx.painter.stroke_color(&orbit, &thin, accent.fade(0.2));
        }

        let ink = main.fade(0.6);
        for _ in 0..4 {
            let x = cx.rng.next_f64() * self.w;
            let y = cx.rng.next_f64() * self.h;
            let sector = (cx.rng.next_f64() * 9999.0).floor();
            let text = format!("[SECTOR_{sector:04}]");
            label(cx, &text, 12.0 * self.k, true, ink, (x, y))?;
            fill_rect(cx, x, y + 5.0, 100.0, 1.0, ink);
        }
        Ok(())
    }

    fn circles(&self, cx: &mut PaintCx<'_>) -> RenderResult<()> {
        self.fill_background(cx);
        let (main, accent) = (self.ink.main(), self.ink.accent());
        let base = self.w.min(self.h);
        let unit = base / 1000.0;

        let count = (5.0 + self.complexity / 5.0).floor() as u32;
        for _ in 0..count {
            let x = cx.rng.next_f64() * self.w;
            let y = cx.rng.next_f64() * self.h;
            let radius = (cx.rng.next_f64() * 200.0 + 50.0) * unit;
            let color = if cx.rng.above(0.5) { main } else { accent };
            let width = 1.0 + cx.rng.next_f64() * 3.0;
            let mut alpha = 0.2 + cx.rng.next_f64() * 0.4;
            let stroke = StrokeStyle::new(width);

            cx.painter
                .stroke_color(&Circle::new((x, y), radius), &stroke, color.fade(alpha));
            if cx.rng.above(0.5) {
                alpha = 0.1;
                cx.painter
                    .fill_color(&Circle::new((x, y), radius * 0.8), color.fade(alpha));
            }
            if cx.rng.above(0.7) {
                let dashed = stroke.clone().with_dashes(&[5.0, 5.0]);
                cx.painter.stroke_color(
                    &Circle::new((x, y), radius + 10.0),
                    &dashed,
                    color.fade(alpha),
                );
            }
            if cx.rng.above(0.6) {
                let ink = color.fade(0.6);
                let size = 10.0 * unit;
                let text = format!("RAD: {}px", radius.floor());
                label(cx, &text, size, false, ink, (x + radius + 5.0, y))?;
                let phi = (cx.rng.next_f64() * 360.0).floor();
                let text = format!("PHI: {phi}\u{b0}");
                label(cx, &text, size, false, ink, (x + radius + 5.0, y + 12.0))?;
                cx.painter
                    .stroke_color(&Line::new((x, y), (x + radius, y)), &stroke, ink);
            }
        }

        let center = self.center();
        let heavy = StrokeStyle::new(10.0);
        cx.painter.stroke_color(
            &Circle::new(center, base * 0.35),
            &heavy,
            main.fade(0.1),
        );
        cx.painter.stroke_color(
            &Circle::new(center, base * 0.37),
            &heavy.with_dashes(&[2.0, 10.0]),
            main.fade(0.3),
        );
        Ok(())
    }

    fn pixel(&self, cx: &mut PaintCx<'_>) -> RenderResult<()> {
        self.fill_background(cx);
        let (main, accent) = (self.ink.main(), self.ink.accent());
        let ps = ((100.0 - self.complexity / 1.5 + 10.0) * self.k).floor().max(1.0);
        let cols = (self.w / ps).ceil() as u32;
        let rows = (self.h / ps).ceil() as u32;
        // Labels below reuse whichever fill the grid used last.
        let mut last_fill = self.ink.bg();

        for x in 0..cols {
            for y in 0..rows {
                let r = cx.rng.next_f64();
                let (px, py) = (f64::from(x) * ps, f64::from(y) * ps);
                if r > 0.7 {
                    last_fill = if r > 0.9 { accent } else { main };
                    let alpha = 0.2 + cx.rng.next_f64() * 0.5;
                    fill_rect(cx, px, py, ps, ps, last_fill.fade(alpha));
                } else if r > 0.5 {
                    last_fill = main;
                    let sub = ps / 4.0;
                    let mut checker = BezPath::new();
                    for i in 0..4 {
                        for j in 0..4 {
                            if (i + j) % 2 == 0 {
                                let sx = px + f64::from(i) * sub;
                                let sy = py + f64::from(j) * sub;
                                let cell = Rect::new(sx, sy, sx + sub, sy + sub);
                                checker.extend(cell.path_elements(0.1));
                            }
                        }
                    }
                    cx.painter.fill_color(&checker, main.fade(0.1));
                } else if r < 0.05 {
                    last_fill = Color::WHITE;
                    let mid = ps / 2.0;
                    let s = ps * 0.2;
                    let ink = Color::WHITE.fade(0.8);
                    fill_rect(cx, px + mid - s / 2.0, py + 2.0, s, ps - 4.0, ink);
                    fill_rect(cx, px + 2.0, py + mid - s / 2.0, ps - 4.0, s, ink);
                }
            }
        }

        let thin = StrokeStyle::new(1.0);
        for _ in 0..3 {
            if !cx.rng.above(0.5) {
                continue;
            }
            let ly = cx.rng.next_f64() * self.h;
            cx.painter.stroke_color(
                &Line::new((0.0, ly), (self.w, ly)),
                &thin,
                Color::WHITE.fade(0.1),
            );
            let sector = (cx.rng.next_f64() * 1000.0).floor();
            let text = format!("PX_SECTOR_{sector}");
            let ink = last_fill.fade(0.1);
            label(cx, &text, 10.0 * self.k, false, ink, (10.0, ly - 5.0))?;
        }
        Ok(())
    }

    fn biohelix(&self, cx: &mut PaintCx<'_>) -> RenderResult<()> {
        self.fill_background(cx);
        let (main, accent) = (self.ink.main(), self.ink.accent());
        let strands = (3.0 + self.complexity / 15.0).floor() as u32;
        let spacing = self.w / f64::from(strands + 1);
        // Rungs of the first strand are hairlines; later ones inherit the strand width.
        let mut rung_width = 1.0;

        for s in 0..strands {
            let center_x = spacing * f64::from(s + 1);
            let wave = (40.0 + cx.rng.next_f64() * 60.0) * self.k;
            let freq = 0.005 + cx.rng.next_f64() * 0.01;
            let color = if cx.rng.above(0.5) { main } else { accent };
            let at = |y: f64, phase: f64| center_x + (y * freq + phase).sin() * wave;

            let rung = StrokeStyle::new(rung_width);
            let mut y = 0.0;
            while y < self.h {
                let (x1, x2) = (at(y, 0.0), at(y, PI));
                cx.painter
                    .stroke_color(&Line::new((x1, y), (x2, y)), &rung, color.fade(0.3));
                if cx.rng.above(0.8) {
                    let base = ["A", "T", "C", "G"][(cx.rng.next_f64() * 4.0) as usize];
                    let white = Color::WHITE.fade(0.3);
                    label(cx, base, 8.0 * self.k, false, white, ((x1 + x2) / 2.0, y))?;
                }
                y += 30.0;
            }

            rung_width = 3.0;
            let strand = StrokeStyle::new(3.0);
            for phase in [0.0, PI] {
                let mut points = Vec::new();
                let mut y = 0.0;
                while y < self.h {
                    points.push((at(y, phase), y));
                    y += 5.0;
                }
                cx.painter
                    .stroke_color(&polyline(&points), &strand, color.fade(0.8));
            }

            let ink = color.fade(0.5);
            let size = 12.0 * self.k;
            let x = center_x + wave + 20.0;
            let top = 100.0 + f64::from(s) * 100.0;
            label(cx, &format!("GEN_STRAND_0x{s:X}"), size, true, ink, (x, top))?;
            let stability = 90.0 + cx.rng.next_f64() * 10.0;
            let text = format!("SEQ_STABILITY: {stability:.2}%");
            label(cx, &text, size, true, ink, (x, top + 15.0))?;
        }
        Ok(())
    }

    fn fluent(&self, cx: &mut PaintCx<'_>) -> RenderResult<()> {
        self.fill_background(cx);
        let (main, accent) = (self.ink.main(), self.ink.accent());
        let rows = (3.0 + self.complexity / 20.0).floor();
        let cols = (rows * (self.w / self.h)).floor();
        if cols < 1.0 {
            return Ok(());
        }
        let (tile_w, tile_h) = (self.w / cols, self.h / rows);
        let (w, h) = (tile_w - 20.0, tile_h - 20.0);
        let thin = StrokeStyle::new(1.0);

        for x in 0..cols as u32 {
            for y in 0..rows as u32 {
                if !cx.rng.above(0.3) {
                    continue;
                }
                let left = f64::from(x) * tile_w + 10.0;
                let top = f64::from(y) * tile_h + 10.0;
                let color = if cx.rng.above(0.7) { accent } else { main };
                let alpha = 0.1 + cx.rng.next_f64() * 0.3;

                let surface = Rect::new(left, top, left + w, top + h);
                let acrylic = Gradient::linear((left, top), (left + w, top + h))
                    .with_stop(0.0, color.fade(alpha))
                    .with_stop(1.0, Color::TRANSPARENT);
                cx.painter.fill(&surface, &acrylic.into())?;

                let edge = 0.05 + cx.rng.next_f64() * 0.1;
                cx.painter
                    .stroke_color(&surface, &thin, Color::WHITE.fade(edge));

                if cx.rng.above(0.6) {
                    let white = Color::WHITE.fade(0.4);
                    let text = format!("TILE_0x{:X}", x * y);
                    label(cx, &text, 10.0 * self.k, false, white, (left + 10.0, top + 20.0))?;
                    if cx.rng.above(0.5) {
                        fill_rect(cx, left + 10.0, top + 30.0, w * 0.3, 2.0, white);
                    }
                }
            }
        }
        Ok(())
    }

    fn rain(&self, cx: &mut PaintCx<'_>) -> RenderResult<()> {
        let size = 20.0 * self.k;
        let columns = (self.w / 25.0).floor() as u32;
        for i in 0..columns {
            let x = f64::from(i) * 25.0;
            let y = cx.rng.next_f64() * self.h;
            let len = 5.0 + cx.rng.next_f64() * 20.0;
            for j in 0..steps_below(len) {
                let alpha = 1.0 - f64::from(j) / len;
                let color = self.ink.pick(&mut cx.rng);
                let code = 0x30a0 + (cx.rng.next_f64() * 96.0) as u32;
                let glyph = char::from_u32(code).unwrap_or('\u{30a0}');
                let mut buf = [0; 4];
                let at = (x, y + f64::from(j) * 25.0);
                label(cx, glyph.encode_utf8(&mut buf), size, false, color.fade(alpha), at)?;
            }
        }
        Ok(())
    }

    fn echo(&self, cx: &mut PaintCx<'_>) -> RenderResult<()> {
        let streams = 10 + (self.complexity / 2.0) as u32;
        let size = 14.0 * self.k;
        let edge = StrokeStyle::new(0.5);
        for _ in 0..streams {
            let x = cx.rng.next_f64() * self.w;
            let y = cx.rng.next_f64() * self.h;
            let color = self.ink.pick(&mut cx.rng);
            let dump = (0..20)
                .map(|_| format!("{:02x}", (cx.rng.next_f64() * 256.0) as u8))
                .collect::<Vec<_>>()
                .join(" ");
            let mut frame = Affine::translate((x, y));
            if cx.rng.above(0.5) {
                frame *= Affine::rotate(PI / 2.0);
            }
            let boxed = cx.rng.above(0.8);

            framed(cx, frame, |cx| {
                label(cx, &format!(">> {dump}"), size, true, color.fade(0.6), (0.0, 0.0))?;
                if boxed {
                    let width = mono_width(cx, &dump, size, true)? + 40.0;
                    let outline = Rect::from_origin_size((-5.0, -15.0), (width, 20.0));
                    cx.painter
                        .stroke_color(&outline, &edge, Color::WHITE.fade(0.6));
                }
                Ok(())
            })?;
        }
        Ok(())
    }

    fn typematrix(&self, cx: &mut PaintCx<'_>) -> RenderResult<()> {
        const TAGS: [&str; 7] = [
            "SYS_CORE",
            "DATA_STREAM",
            "VOID_0",
            "NULL_PTR",
            "AUTH_OK",
            "FETCH_META",
            "DECRYPT",
        ];
        let items = 20 + self.complexity as u32;
        let thin = StrokeStyle::new(1.0);
        for _ in 0..items {
            let x = cx.rng.next_f64() * self.w;
            let y = cx.rng.next_f64() * self.h;
            let color = self.ink.pick(&mut cx.rng);
            let size = ((10.0 + cx.rng.next_f64() * 40.0) * self.k).floor();
            let bold = cx.rng.above(0.5);
            let ink = color.fade(0.5 + cx.rng.next_f64() * 0.5);
            let text = if cx.rng.above(0.3) {
                (*cx.rng.pick(&TAGS)).to_owned()
            } else {
                hex_fraction(cx.rng.next_f64(), 8)
            };

            label(cx, &text, size, bold, ink, (x, y))?;
            if cx.rng.above(0.7) {
                let width = mono_width(cx, &text, size, bold)? + 10.0;
                let frame = Rect::from_origin_size((x - 5.0, y - size), (width, size + 5.0));
                cx.painter.stroke_color(&frame, &thin, ink);
            }
        }
        Ok(())
    }

    fn pipboy(&self, cx: &mut PaintCx<'_>) -> RenderResult<()> {
        const LOG: [&str; 7] = [
            "FEZ_CODEX_OS v4.0.2",
            "MEMORY_BANK: OK",
            "RAD_LEVEL: 0.02 mSv",
            "LOCATION: NEW_VEGAS_STRIP",
            "SIGNAL: INTERCEPTED",
            "ENCRYPTION: ACTIVE",
            "USER: COURIER_SIX",
        ];
        self.fill_background(cx);
        let main = self.ink.main();
        let (w, h, k) = (self.w, self.h, self.k);

        cx.painter.stroke_color(
            &scanlines(w, h, 4.0),
            &StrokeStyle::new(0.5),
            main.fade(0.1),
        );

        for (i, tab) in ["STAT", "INV", "DATA", "MAP", "RADIO"].into_iter().enumerate() {
            let x = 100.0 + i as f64 * (w / 6.0);
            label(cx, tab, 24.0 * k, true, main, (x, 80.0))?;
            if tab == "DATA" {
                let width = mono_width(cx, tab, 24.0 * k, true)?;
                fill_rect(cx, x - 10.0, 90.0, width + 20.0, 4.0, main);
            }
        }
        fill_rect(cx, 50.0, 100.0, w - 100.0, 2.0, main);

        let radar = Point::new(w * 0.75, h * 0.5);
        let radius = 200.0 * k;
        let ring = StrokeStyle::new(2.0);
        cx.painter
            .stroke_color(&Circle::new(radar, radius), &ring, main);
        for r in 1..4 {
            let inner = Circle::new(radar, radius / 4.0 * f64::from(r));
            cx.painter.stroke_color(&inner, &ring, main.fade(0.3));
        }
        for _ in 0..5 {
            let bx = radar.x + cx.rng.jitter(radius * 1.5);
            let by = radar.y + cx.rng.jitter(radius * 1.5);
            fill_rect(cx, bx, by, 8.0, 8.0, main.fade(0.8));
        }

        for (i, entry) in LOG.iter().enumerate() {
            let top = 250.0 + i as f64 * 50.0;
            label(cx, &format!("> {entry}"), 18.0 * k, false, main.fade(0.9), (100.0, top))?;
            fill_rect(cx, 100.0, top + 10.0, 300.0, 10.0, main.fade(0.2));
            let level = cx.rng.next_f64() * 300.0;
            fill_rect(cx, 100.0, top + 10.0, level, 10.0, main.fade(0.7));
        }

        let scan_y = cx.rng.next_f64() * h;
        let band = Gradient::linear((0.0, scan_y - 50.0), (0.0, scan_y))
            .with_stop(0.0, Color::TRANSPARENT)
            .with_stop(1.0, main.fade(0.15));
        cx.painter
            .fill(&Rect::new(0.0, scan_y - 100.0, w, scan_y), &band.into())?;

        let heavy = StrokeStyle::new(4.0);
        let cp = 40.0;
        let top_left = polyline(&[(cp, cp + 50.0), (cp, cp), (cp + 50.0, cp)]);
        let bottom_right = polyline(&[
            (w - cp, h - cp - 50.0),
            (w - cp, h - cp),
            (w - cp - 50.0, h - cp),
        ]);
        cx.painter.stroke_color(&top_left, &heavy, main);
        cx.painter.stroke_color(&bottom_right, &heavy, main);

        let compass_y = h - 150.0;
        let dim = main.fade(0.6);
        fill_rect(cx, 100.0, compass_y, w - 200.0, 2.0, dim);
        for i in 0..=20u32 {
            let x = 100.0 + f64::from(i) * ((w - 200.0) / 20.0);
            let tick = if i % 5 == 0 { 15.0 } else { 8.0 };
            fill_rect(cx, x, compass_y - tick, 2.0, tick, dim);
            if i % 5 == 0 {
                let heading = ["W", "NW", "N", "NE", "E"][(i / 5) as usize];
                label(cx, heading, 14.0 * k, false, dim, (x - 5.0, compass_y - 25.0))?;
            }
        }

        let (vx, vy) = (100.0, 650.0);
        cx.painter
            .stroke_color(&Rect::new(vx, vy, vx + 200.0, vy + 200.0), &heavy, main);
        label(cx, "F.C.D.X. STATUS", 12.0 * k, true, main, (vx, vy - 10.0))?;
        let mut figure = BezPath::new();
        figure.extend(Circle::new((vx + 100.0, vy + 80.0), 40.0).path_elements(0.1));
        for (from, to) in [
            ((vx + 100.0, vy + 120.0), (vx + 100.0, vy + 180.0)),
            ((vx + 100.0, vy + 140.0), (vx + 60.0, vy + 110.0)),
            ((vx + 100.0, vy + 140.0), (vx + 140.0, vy + 110.0)),
        ] {
            figure.move_to(from);
            figure.line_to(to);
        }
        cx.painter.stroke_color(&figure, &heavy, main);
        label(cx, "DISCONN", 12.0 * k, true, main, (vx + 50.0, vy + 195.0))?;

        let faint = main.fade(0.4);
        for (text, at) in [
            ("AP: 85/85", (w - 200.0, h - 80.0)),
            ("HP: 240/240", (w - 200.0, h - 60.0)),
            ("VOLTAGE: 1.2V", (100.0, h - 80.0)),
            ("OS_BUILD: 0.8.7", (100.0, h - 60.0)),
        ] {
            label(cx, text, 10.0 * k, false, faint, at)?;
        }
        Ok(())
    }

    fn docs(&self, cx: &mut PaintCx<'_>) -> RenderResult<()> {
        self.fill_background(cx);
        let (main, accent) = (self.ink.main(), self.ink.accent());
        let count = (5.0 + self.complexity / 10.0).floor() as u32;
        let (paper_w, paper_h) = (400.0 * self.k, 550.0 * self.k);
        let paper = Rect::new(-paper_w / 2.0, -paper_h / 2.0, paper_w / 2.0, paper_h / 2.0);
        // Near-even grid over the scene's aspect ratio.
        let cols = (f64::from(count) * (self.w / self.h)).sqrt().ceil().max(1.0);
        let rows = (f64::from(count) / cols).ceil();
        let (cell_w, cell_h) = (self.w / cols, self.h / rows);
        let thin = StrokeStyle::new(1.0);
        let stamp_ink = Color::hex(0xf87171).fade(0.6);

        let mut drawn = 0;
        for r in 0..rows as u32 {
            for c in 0..cols as u32 {
                if drawn >= count {
                    break;
                }
                let x = (f64::from(c) + 0.5) * cell_w + cx.rng.jitter(cell_w * 0.4);
                let y = (f64::from(r) + 0.5) * cell_h + cx.rng.jitter(cell_h * 0.4);
                let tilt = Affine::rotate(cx.rng.jitter(30.0).to_radians());
                let color = if cx.rng.above(0.5) { main } else { accent };

                // Drop shadow offset in scene units, not along the tilt.
                framed(cx, Affine::translate((x + 10.0, y + 10.0)) * tilt, |cx| {
                    cx.painter.blurred(15.0, |layer| {
                        layer.fill_color(&paper, Color::BLACK.fade(0.025));
                        Ok(())
                    })
                })?;

                framed(cx, Affine::translate((x, y)) * tilt, |cx| {
                    cx.painter.fill_color(&paper, Color::WHITE.fade(0.05));
                    cx.painter
                        .stroke_color(&paper, &thin, Color::WHITE.fade(0.1));

                    let left = paper.x0 + 20.0;
                    let ink = color.fade(0.8);
                    let id = hex_fraction(cx.rng.next_f64(), 4);
                    let header = format!("FILE_ID: 0x{id}");
                    label(cx, &header, 14.0 * self.k, true, ink, (left, paper.y0 + 30.0))?;
                    fill_rect(cx, left, paper.y0 + 40.0, paper_w - 40.0, 2.0, ink);

                    for j in 0..15 {
                        let width = (paper_w - 40.0) * (0.3 + cx.rng.next_f64() * 0.7);
                        let top = paper.y0 + 70.0 + f64::from(j) * 25.0;
                        fill_rect(cx, left, top, width, 4.0, color.fade(0.3));
                    }

                    if !cx.rng.above(0.6) {
                        return Ok(());
                    }
                    let text = if cx.rng.above(0.5) {
                        "CONFIDENTIAL"
                    } else {
                        "CLASSIFIED"
                    };
                    let size = 20.0 * self.k;
                    framed(cx, Affine::rotate((-15.0f64).to_radians()), |cx| {
                        let tw = mono_width(cx, text, size, true)?;
                        let origin = (-tw / 2.0 - 10.0, paper_h / 4.0 - 25.0);
                        let border = Rect::from_origin_size(origin, (tw + 20.0, 40.0));
                        cx.painter
                            .stroke_color(&border, &StrokeStyle::new(2.0), stamp_ink);
                        label(cx, text, size, true, stamp_ink, (-tw / 2.0, paper_h / 4.0 + 5.0))
                    })
                })?;
                drawn += 1;
            }
        }
        Ok(())
    }

    fn nightcity(&self, cx: &mut PaintCx<'_>) -> RenderResult<()> {
        self.fill_background(cx);
        let (main, accent) = (self.ink.main(), self.ink.accent());
        let k = self.k;
        let thin = StrokeStyle::new(1.0);
        cx.painter
            .stroke_color(&scanlines(self.w, self.h, 2.0), &thin, main.fade(0.05));

        let panels = (3.0 + self.complexity / 20.0).floor() as u32;
        let slant = Affine::new([1.0, 0.0, 0.2, 1.0, 0.0, 0.0]);
        for _ in 0..panels {
            let x = cx.rng.next_f64() * self.w;
            let y = cx.rng.next_f64() * self.h;
            let w = (300.0 + cx.rng.next_f64() * 600.0) * k;
            let h = (200.0 + cx.rng.next_f64() * 400.0) * k;
            framed(cx, Affine::translate((x, y)) * slant, |cx| {
                let panel = Rect::new(0.0, 0.0, w, h);
                cx.painter.fill_color(&panel, main.fade(0.02));
                cx.painter.stroke_color(&panel, &thin, main.fade(0.1));
                Ok(())
            })?;
        }

        let glitches = 10 + (self.complexity / 2.0) as u32;
        for _ in 0..glitches {
            let x = cx.rng.next_f64() * self.w;
            let y = cx.rng.next_f64() * self.h;
            let w = cx.rng.next_f64() * 400.0 * k;
            let h = (2.0 + cx.rng.next_f64() * 10.0) * k;
            let color = if cx.rng.above(0.5) { main } else { accent };
            fill_rect(cx, x, y, w, h, color.fade(0.4));
            fill_rect(cx, x + 5.0, y + 2.0, w, h, Color::WHITE.fade(0.2));
        }

        label(cx, "BREACH_STATUS: NOMINAL", 40.0 * k, true, main.fade(0.8), (100.0, 150.0))?;
        let node = hex_fraction(cx.rng.next_f64(), 6);
        let readouts = [
            format!("NC_NET_NODE: 0x{node}"),
            "SYSTEM_AUTHORIZATION: OK".to_owned(),
            "BIOMONITOR_SYNC: ACTIVE".to_owned(),
            "RAM_USAGE: 42.8 GB".to_owned(),
            "CYBER_DECK: MILITECH_PARELINE".to_owned(),
        ];
        let size = 12.0 * k;
        for (i, line) in readouts.iter().enumerate() {
            let at = (100.0, 200.0 + i as f64 * 25.0);
            label(cx, &format!(">> {line}"), size, false, main.fade(0.6), at)?;
        }

        if cx.rng.above(0.7) {
            framed(cx, Affine::translate((self.w - 400.0, 100.0)), |cx| {
                fill_rect(cx, 0.0, 0.0, 300.0, 60.0, Color::hex(0xff003c).fade(0.9));
                // Set in the readout font.
                label(cx, "SAMURAI_LINK: OK", size, false, Color::BLACK.fade(0.9), (20.0, 40.0))
            })?;
        }

        let dots = self.complexity as u32;
        for _ in 0..dots {
            let x = cx.rng.next_f64() * self.w;
            let y = cx.rng.next_f64() * self.h;
            cx.painter
                .fill_color(&Circle::new((x, y), 1.0), Color::WHITE.fade(0.1));
        }
        Ok(())
    }

    fn global(&self, cx: &mut PaintCx<'_>) -> RenderResult<()> {
        self.fill_background(cx);
        let (main, accent) = (self.ink.main(), self.ink.accent());
        let center = self.center();
        let radius = self.w.min(self.h) * 0.4;
        let thin = StrokeStyle::new(1.0);

        cx.painter
            .stroke_color(&Circle::new(center, radius), &thin, main.fade(0.3));
        let graticule = main.fade(0.1);
        for i in 1..6 {
            let theta = f64::from(i) / 6.0 * PI;
            let rx = radius * theta.sin();
            let y = center.y + radius * theta.cos();
            let parallel = Ellipse::new((center.x, y), (rx, rx * 0.2), 0.0);
            cx.painter.stroke_color(&parallel, &thin, graticule);
        }
        for i in 0..6 {
            let rx = radius * (f64::from(i) / 6.0 * PI).sin();
            let meridian = Ellipse::new(center, (rx, radius), 0.0);
            cx.painter.stroke_color(&meridian, &thin, graticule);
        }

        let count = 20 + (self.complexity / 2.0) as u32;
        let nodes: Vec<(Point, Color)> = (0..count)
            .map(|_| {
                let angle = cx.rng.next_f64() * PI * 2.0;
                let dist = cx.rng.next_f64().sqrt() * radius;
                let color = if cx.rng.above(0.7) { accent } else { main };
                (center + kurbo::Vec2::from_angle(angle) * dist, color)
            })
            .collect();

        for (i, &(p, color)) in nodes.iter().enumerate() {
            cx.painter.fill_color(&Circle::new(p, 3.0), color.fade(0.8));
            for &(q, _) in &nodes[i + 1..] {
                if p.distance(q) < radius * 0.8 && cx.rng.above(0.8) {
                    let bend = kurbo::Vec2::new(cx.rng.jitter(50.0), cx.rng.jitter(50.0));
                    let mut arc = BezPath::new();
                    arc.move_to(p);
                    arc.quad_to(p.midpoint(q) + bend, q);
                    cx.painter.stroke_color(&arc, &thin, color.fade(0.2));
                }
            }
            if cx.rng.above(0.9) {
                let text = format!("LOC_{},{}", p.x.floor(), p.y.floor());
                let white = Color::WHITE.fade(0.4);
                label(cx, &text, 9.0 * self.k, false, white, (p.x + 8.0, p.y + 8.0))?;
            }
        }

        let hud = main.fade(0.6);
        let size = 12.0 * self.k;
        let bottom = self.h;
        label(cx, "PLANETARY_NETWORK_SCAN: ACTIVE", size, true, hud, (50.0, bottom - 50.0))?;
        let detected = format!("NODES_DETECTED: {count}");
        label(cx, &detected, size, true, hud, (50.0, bottom - 35.0))?;

        // Sector frames keep the last node's stroke color.
        let frame_ink = nodes.last().map_or(main, |&(_, c)| c).fade(0.6);
        let right = self.w - 150.0;
        for (x, y) in [(50.0, 50.0), (right, 50.0), (right, bottom - 50.0)] {
            cx.painter
                .stroke_color(&Rect::new(x, y, x + 100.0, y + 20.0), &thin, frame_ink);
            let sector = (cx.rng.next_f64() * 99.0).floor();
            label(cx, &format!("SEC_{sector}"), 10.0 * self.k, false, hud, (x + 5.0, y + 14.0))?;
        }
        Ok(())
    }

    fn schematic(&self, cx: &mut PaintCx<'_>) -> RenderResult<()> {
        self.fill_background(cx);
        let (main, accent) = (self.ink.main(), self.ink.accent());
        let hair = StrokeStyle::new(0.5);
        let step = 40.0 * self.k;
        let major = step * 5.0;
        let weight = |at: f64| if at % major == 0.0 { 0.15 } else { 0.05 };

        let mut x = 0.0;
        while x < self.w {
            let line = Line::new((x, 0.0), (x, self.h));
            cx.painter.stroke_color(&line, &hair, main.fade(weight(x)));
            x += step;
        }
        let mut y = 0.0;
        while y < self.h {
            let line = Line::new((0.0, y), (self.w, y));
            cx.painter.stroke_color(&line, &hair, main.fade(weight(y)));
            y += step;
        }

        let center = self.center();
        let components = (2.0 + self.complexity / 25.0).floor() as u32;
        let size = 10.0 * self.k;
        let outline = StrokeStyle::new(2.0);
        let thin = StrokeStyle::new(1.0);
        for _ in 0..components {
            let x = center.x + cx.rng.jitter(self.w * 0.6);
            let y = center.y + cx.rng.jitter(self.h * 0.6);
            let w = (200.0 + cx.rng.next_f64() * 400.0) * self.k;
            let h = (150.0 + cx.rng.next_f64() * 300.0) * self.k;
            let color = if cx.rng.above(0.5) { main } else { accent };

            framed(cx, Affine::translate((x, y)), |cx| {
                let body = Rect::new(-w / 2.0, -h / 2.0, w / 2.0, h / 2.0);
                cx.painter.stroke_color(&body, &outline, color.fade(0.8));

                let mut hatch = BezPath::new();
                let mut j = body.x0;
                while j < body.x1 {
                    hatch.move_to((j, body.y0));
                    hatch.line_to((j + 20.0, body.y1));
                    j += 10.0;
                }
                cx.painter.stroke_color(&hatch, &outline, color.fade(0.1));

                let Rect { x0, y0, x1, y1 } = body;
                let mut dims = BezPath::new();
                for (from, to) in [
                    ((x0, y0 - 20.0), (x1, y0 - 20.0)),
                    ((x0, y0 - 25.0), (x0, y0 - 15.0)),
                    ((x1, y0 - 25.0), (x1, y0 - 15.0)),
                    ((x1 + 20.0, y0), (x1 + 20.0, y1)),
                    ((x1 + 15.0, y0), (x1 + 25.0, y0)),
                    ((x1 + 15.0, y1), (x1 + 25.0, y1)),
                ] {
                    dims.move_to(from);
                    dims.line_to(to);
                }
                let dim = color.fade(0.4);
                cx.painter.stroke_color(&dims, &thin, dim);

                label(cx, &format!("{}mm", w.floor()), size, false, dim, (-15.0, y0 - 30.0))?;
                let upright = Affine::translate((x1 + 35.0, 0.0)) * Affine::rotate(PI / 2.0);
                framed(cx, upright, |cx| {
                    label(cx, &format!("{}mm", h.floor()), size, false, dim, (-15.0, 0.0))
                })?;

                let module = hex_fraction(cx.rng.next_f64(), 4);
                let tag = format!("MOD_0x{module}");
                label(cx, &tag, size, false, color.fade(0.7), (x0, y1 + 20.0))
            })?;
        }

        let header = main.fade(0.9);
        cx.painter
            .stroke_color(&Rect::new(50.0, 50.0, 450.0, 150.0), &outline, header);
        let title = "ENGINEERING_ARCHIVE // SCHEMATIC";
        label(cx, title, 16.0 * self.k, true, header, (70.0, 85.0))?;
        let draft = format!("DRAFT_VER: {}", self.draft);
        label(cx, &draft, size, false, header, (70.0, 110.0))?;
        let spec = format!("ARCH_SPEC: {}", self.resolution.as_str().to_uppercase());
        label(cx, &spec, size, false, header, (70.0, 125.0))
    }
}

/// Square with its upper-right corner replaced by a quarter circle, closed along the diagonal.
fn quarter_bite(half: f64) -> BezPath {
    let mut path = BezPath::new();
    path.move_to((-half, -half));
    path.line_to((0.0, -half));
    path.curve_to((KAPPA * half, -half), (half, -KAPPA * half), (half, 0.0));
    path.line_to((-half, half));
    path.close_path();
    path
}

impl DesignPainter for WallpaperParams {
    fn logical_size(&self, _image: Option<&PreparedImage>) -> RenderResult<LogicalSize> {
        let (w, h) = self.resolution.size();
        LogicalSize::new(f64::from(w), f64::from(h))
    }

    fn stages(&self) -> &'static [Stage] {
        &[Stage::Base, Stage::Procedural, Stage::Grain]
    }

    fn paint_stage(&self, stage: Stage, cx: &mut PaintCx<'_>) -> RenderResult<()> {
        match stage {
            Stage::Base => self.paint_base(cx),
            Stage::Procedural => self.scene(cx.logical, cx.seed)?.paint(self.style, cx),
            Stage::Grain => self.paint_grain(cx),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/designs/wallpaper.rs"]
mod tests;
