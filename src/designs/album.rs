use kurbo::{Circle, Line};
use serde::{Deserialize, Serialize};

use crate::assets::color::Color;
use crate::assets::decode::PreparedImage;
use crate::designs::{draw_cover, polyline, quad_round_rect};
use crate::foundation::core::{Affine, BezPath, LogicalSize, Point, Rect};
use crate::foundation::error::RenderResult;
use crate::foundation::math::clamp_u8;
use crate::layout::align::HorizontalAlign;
use crate::render::gradient::Gradient;
use crate::render::grain::{NoiseTile, overlay_noise};
use crate::render::painter::{Painter, StrokeStyle};
use crate::render::pipeline::{DesignPainter, PaintCx, Stage, TextRun};

/// Album covers are laid out on a 1000 x 1000 square.
pub const ALBUM_EDGE: f64 = 1000.0;
/// Export edge of the master render, in pixels.
pub const ALBUM_EXPORT_EDGE: u32 = 3000;

const GRID_STEP: f64 = 50.0;
const NOISE_TILE: usize = 256;
const FRAME_PAD: f64 = 40.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlbumStyle {
    #[default]
    Brutalist,
    Elite,
    Glassy,
    Detective,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundMode {
    Color,
    #[default]
    Generative,
    Waves,
    Topo,
    Glass,
}

/// What selecting a style resets. `None` leaves the current value alone.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StyleDefaults {
    pub bg_mode: BackgroundMode,
    pub primary: Option<Color>,
    pub accent: Color,
    pub title: (&'static str, f64),
    pub artist: (&'static str, f64),
}

impl AlbumStyle {
    pub fn defaults(self) -> StyleDefaults {
        match self {
            Self::Brutalist => StyleDefaults {
                bg_mode: BackgroundMode::Generative,
                primary: Some(Color::hex(0x050505)),
                accent: Color::hex(0x10b981),
                title: ("JetBrains Mono", 60.0),
                artist: ("JetBrains Mono", 24.0),
            },
            Self::Elite => StyleDefaults {
                bg_mode: BackgroundMode::Color,
                primary: Some(Color::hex(0xf5f5f5)),
                accent: Color::hex(0x050505),
                title: ("Playfair Display", 80.0),
                artist: ("Inter", 18.0),
            },
            Self::Glassy => StyleDefaults {
                bg_mode: BackgroundMode::Glass,
                primary: None,
                accent: Color::WHITE,
                title: ("Playfair Display", 70.0),
                artist: ("Arvo", 22.0),
            },
            Self::Detective => StyleDefaults {
                bg_mode: BackgroundMode::Topo,
                primary: Some(Color::hex(0x2b1d12)),
                accent: Color::hex(0xd2a679),
                title: ("Arvo", 50.0),
                artist: ("Space Mono", 20.0),
            },
        }
    }
}

/// One typography slot; position in percent of the cover, size in logical units.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextSlot {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub font: String,
    pub align: HorizontalAlign,
}

impl TextSlot {
    fn new(text: &str, (x, y): (f64, f64), size: f64, align: HorizontalAlign) -> Self {
        Self {
            text: text.to_owned(),
            x,
            y,
            size,
            font: "JetBrains Mono".to_owned(),
            align,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumInputs {
    pub album_title: TextSlot,
    pub artist_name: TextSlot,
    pub label_name: TextSlot,
    pub catalog_no: TextSlot,
}

impl Default for AlbumInputs {
    fn default() -> Self {
        Self {
            album_title: TextSlot::new(
                "NEURAL_NETWORK_SYMPHONY",
                (50.0, 40.0),
                60.0,
                HorizontalAlign::Center,
            ),
            artist_name: TextSlot::new(
                "FEZCODE_EXTRACT",
                (50.0, 50.0),
                24.0,
                HorizontalAlign::Center,
            ),
            label_name: TextSlot::new(
                "© 2025 FEZCODEX RECORDS",
                (50.0, 92.0),
                10.0,
                HorizontalAlign::Center,
            ),
            catalog_no: TextSlot::new("FCX-049-LP", (92.0, 50.0), 10.0, HorizontalAlign::Vertical),
        }
    }
}

impl AlbumInputs {
    /// Slots in paint order.
    pub fn slots(&self) -> [&TextSlot; 4] {
        [
            &self.album_title,
            &self.artist_name,
            &self.label_name,
            &self.catalog_no,
        ]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Barcode,
    Polaroid,
    Sticker,
    Frame,
}

/// Decorative element centered at (`x`, `y`) percent, sized in percent of the cover edge.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlbumAsset {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: AssetKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Degrees, clockwise.
    pub rotation: f64,
    pub opacity: f64,
}

impl Default for AlbumAsset {
    fn default() -> Self {
        Self::new(AssetKind::Frame)
    }
}

impl AlbumAsset {
    pub fn new(kind: AssetKind) -> Self {
        Self {
            id: 0,
            kind,
            x: 50.0,
            y: 50.0,
            width: 20.0,
            height: 20.0,
            rotation: 0.0,
            opacity: 1.0,
        }
    }
}

/// Album cover parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AlbumParams {
    pub style: AlbumStyle,
    pub bg_mode: BackgroundMode,
    pub primary_color: Color,
    pub accent_color: Color,
    pub noise_opacity: f64,
    pub grid_opacity: f64,
    pub inputs: AlbumInputs,
    pub assets: Vec<AlbumAsset>,
}

impl Default for AlbumParams {
    fn default() -> Self {
        let mut params = Self {
            style: AlbumStyle::Brutalist,
            bg_mode: BackgroundMode::Generative,
            primary_color: Color::BLACK,
            accent_color: Color::WHITE,
            noise_opacity: 0.05,
            grid_opacity: 0.1,
            inputs: AlbumInputs::default(),
            assets: Vec::new(),
        };
        params.set_style(AlbumStyle::Brutalist);
        params
    }
}

impl AlbumParams {
    /// Switch style and reset background, palette and title/artist typography to its defaults.
    pub fn set_style(&mut self, style: AlbumStyle) {
        let d = style.defaults();
        self.style = style;
        self.bg_mode = d.bg_mode;
        if let Some(primary) = d.primary {
            self.primary_color = primary;
        }
        self.accent_color = d.accent;
        (self.inputs.album_title.font, self.inputs.album_title.size) =
            (d.title.0.to_owned(), d.title.1);
        (self.inputs.artist_name.font, self.inputs.artist_name.size) =
            (d.artist.0.to_owned(), d.artist.1);
    }

    fn paint_background(&self, cx: &mut PaintCx<'_>) -> RenderResult<()> {
        // Drawn first so every mode consumes the stream the same way.
        let phase = cx.rng.next_f64();
        let area = cx.logical.rect();
        let (w, h) = (area.width(), area.height());
        cx.painter.fill_color(&area, self.primary_color);

        let thin = StrokeStyle::new(1.0);
        match self.bg_mode {
            BackgroundMode::Color => {}
            BackgroundMode::Glass => {
                let sweep = Gradient::linear((0.0, 0.0), (w, h))
                    .with_stop(0.0, Color::hex(0x6366f1))
                    .with_stop(0.5, Color::hex(0xa855f7))
                    .with_stop(1.0, Color::hex(0xec4899));
                cx.painter.fill(&area, &sweep.into())?;
                for (center, radius, color) in [
                    ((w * 0.2, h * 0.2), 300.0, Color::hex(0xc084fc)),
                    ((w * 0.8, h * 0.1), 250.0, Color::hex(0xfacc15)),
                ] {
                    let blob = blurred_disk(center.into(), radius, 80.0, color, 0.4);
                    let reach = Circle::new(center, radius + 3.0 * 80.0);
                    cx.painter.fill(&reach, &blob.into())?;
                }
            }
            BackgroundMode::Waves => {
                for i in 0..50 {
                    let base = h * (f64::from(i) / 50.0);
                    let mut points = vec![(0.0, base)];
                    let mut x = 0.0;
                    while x < w {
                        let y = base + (x * 0.01 + f64::from(i) + phase).sin() * 50.0;
                        points.push((x, y));
                        x += 10.0;
                    }
                    cx.painter
                        .stroke_color(&polyline(&points), &thin, self.accent_color);
                }
            }
            BackgroundMode::Topo => {
                let ring = self.accent_color.fade(0.3);
                for i in 0..20 {
                    let r = f64::from(i) * 50.0 + phase * 100.0;
                    cx.painter
                        .stroke_color(&Circle::new((w / 2.0, h / 2.0), r), &thin, ring);
                }
            }
            BackgroundMode::Generative => {
                let outline = self.accent_color.fade(0.2);
                for _ in 0..10 {
                    let x = cx.rng.next_f64() * w;
                    let y = cx.rng.next_f64() * h;
                    let r = Rect::new(x, y, x + 200.0, y + 200.0);
                    cx.painter.stroke_color(&r, &thin, outline);
                }
            }
        }
        Ok(())
    }

    fn paint_image(&self, cx: &mut PaintCx<'_>) -> RenderResult<()> {
        let Some(image) = cx.image else {
            return Ok(());
        };
        let area = cx.logical.rect();
        if self.style == AlbumStyle::Detective {
            let filtered = image.map_straight(detective_filter);
            draw_cover(cx, &filtered, area, 0.8)
        } else {
            draw_cover(cx, image, area, 1.0)
        }
    }

    fn paint_grid(&self, cx: &mut PaintCx<'_>) {
        if self.grid_opacity <= 0.0 {
            return;
        }
        let (w, h) = (cx.logical.width, cx.logical.height);
        let mut grid = BezPath::new();
        let mut x = 0.0;
        while x <= w {
            grid.move_to((x, 0.0));
            grid.line_to((x, h));
            x += GRID_STEP;
        }
        let mut y = 0.0;
        while y <= h {
            grid.move_to((0.0, y));
            grid.line_to((w, y));
            y += GRID_STEP;
        }
        cx.painter.stroke_color(
            &grid,
            &StrokeStyle::new(1.0),
            self.accent_color.fade(self.grid_opacity),
        );
    }

    fn paint_asset(&self, asset: &AlbumAsset, cx: &mut PaintCx<'_>) -> RenderResult<()> {
        let (w, h) = (cx.logical.width, cx.logical.height);
        let aw = asset.width / 100.0 * w;
        let ah = asset.height / 100.0 * h;
        let local = Affine::translate((asset.x / 100.0 * w, asset.y / 100.0 * h))
            * Affine::rotate(asset.rotation.to_radians());
        let opacity = asset.opacity.clamp(0.0, 1.0) as f32;

        match asset.kind {
            AssetKind::Barcode => paint_barcode(cx, local, aw, ah, opacity),
            AssetKind::Polaroid => cx.painter.scoped(|p| {
                p.concat(local);
                p.group(opacity, |p| paint_polaroid(p, aw, ah))
            }),
            AssetKind::Sticker => {
                let sticker = Gradient::radial((0.0, 0.0), 0.0, aw / 2.0)
                    .with_stop(0.0, Color::WHITE)
                    .with_stop(0.5, self.accent_color)
                    .with_stop(1.0, self.primary_color);
                cx.painter.scoped(|p| {
                    p.concat(local);
                    p.with_opacity(opacity, |p| {
                        let disc = Circle::new((0.0, 0.0), aw / 2.0);
                        p.fill(&disc, &sticker.into())?;
                        p.stroke_color(
                            &disc,
                            &StrokeStyle::new(2.0),
                            Color::rgba(255, 255, 255, 128),
                        );
                        Ok(())
                    })
                })
            }
            AssetKind::Frame => {
                let s = aw / 4.0;
                let (l, t, r, b) = (-aw / 2.0, -ah / 2.0, aw / 2.0, ah / 2.0);
                let corners = [
                    [(l, t + s), (l, t), (l + s, t)],
                    [(r - s, t), (r, t), (r, t + s)],
                    [(l, b - s), (l, b), (l + s, b)],
                    [(r - s, b), (r, b), (r, b - s)],
                ];
                let accent = self.accent_color;
                cx.painter.scoped(|p| {
                    p.concat(local);
                    p.with_opacity(opacity, |p| {
                        for corner in &corners {
                            p.stroke_color(&polyline(corner), &StrokeStyle::new(2.0), accent);
                        }
                        Ok(())
                    })
                })
            }
        }
    }

    fn paint_text(&self, cx: &mut PaintCx<'_>) -> RenderResult<()> {
        let color = if self.style == AlbumStyle::Glassy {
            Color::WHITE
        } else {
            self.accent_color
        };
        let (w, h) = (cx.logical.width, cx.logical.height);
        for slot in self.inputs.slots() {
            if slot.size <= 0.0 || !slot.size.is_finite() {
                continue;
            }
            let run = TextRun::new(&slot.font, slot.size, color)
                .bold(self.style == AlbumStyle::Brutalist)
                .aligned(slot.align);
            let anchor = Point::new(slot.x / 100.0 * w, slot.y / 100.0 * h);
            cx.fill_text(&slot.text.to_uppercase(), &run, anchor)?;
        }
        Ok(())
    }

    fn paint_noise(&self, cx: &mut PaintCx<'_>) -> RenderResult<()> {
        if self.noise_opacity <= 0.0 {
            return Ok(());
        }
        let tile = NoiseTile::new(&mut cx.rng, NOISE_TILE);
        let device_to_local = cx.painter.transform().inverse();
        let opacity = self.noise_opacity;
        cx.painter.with_pixels(|px, canvas| {
            overlay_noise(px, canvas, device_to_local, &tile, opacity);
        })
    }

    fn paint_frame(&self, cx: &mut PaintCx<'_>) {
        let (w, h) = (cx.logical.width, cx.logical.height);
        let inner = Rect::new(FRAME_PAD, FRAME_PAD, w - FRAME_PAD, h - FRAME_PAD);
        let accent = self.accent_color;
        match self.style {
            AlbumStyle::Glassy => {
                cx.painter.stroke_color(
                    &quad_round_rect(inner, 60.0),
                    &StrokeStyle::new(10.0),
                    accent,
                );
            }
            AlbumStyle::Brutalist => {
                cx.painter
                    .stroke_color(&inner, &StrokeStyle::new(10.0), accent);
                let mut cross = BezPath::new();
                for line in [
                    Line::new((w / 2.0, 0.0), (w / 2.0, FRAME_PAD)),
                    Line::new((w / 2.0, h), (w / 2.0, h - FRAME_PAD)),
                    Line::new((0.0, h / 2.0), (FRAME_PAD, h / 2.0)),
                    Line::new((w, h / 2.0), (w - FRAME_PAD, h / 2.0)),
                ] {
                    cross.move_to(line.p0);
                    cross.line_to(line.p1);
                }
                cx.painter
                    .stroke_color(&cross, &StrokeStyle::new(2.0), accent);
            }
            AlbumStyle::Detective => {
                let dashed = StrokeStyle::new(4.0).with_dashes(&[20.0, 10.0]);
                cx.painter.stroke_color(&inner, &dashed, accent);
            }
            AlbumStyle::Elite => {}
        }
    }
}

/// White label with seeded bars of 1 to 4 units and a nine-digit number under them.
fn paint_barcode(
    cx: &mut PaintCx<'_>,
    local: Affine,
    aw: f64,
    ah: f64,
    opacity: f32,
) -> RenderResult<()> {
    let body = Rect::new(-aw / 2.0, -ah / 2.0, aw / 2.0, ah / 2.0);
    let mut bars = Vec::new();
    let mut bx = -aw / 2.0 + 5.0;
    while bx < aw / 2.0 - 5.0 {
        let bar = 1.0 + (cx.rng.next_f64() * 4.0).floor();
        if cx.rng.above(0.3) {
            bars.push(Rect::new(bx, -ah / 2.0 + 5.0, bx + bar, ah / 2.0 - 10.0));
        }
        bx += bar + (1.0 + cx.rng.next_f64() * 2.0);
    }
    let digits = ((cx.rng.next_f64() * 1e9).floor() as u64).to_string();

    cx.painter.save();
    cx.painter.concat(local);
    let out = cx
        .painter
        .with_opacity(opacity, |p| {
            p.fill_color(&body, Color::WHITE);
            for bar in &bars {
                p.fill_color(bar, Color::BLACK);
            }
            Ok(())
        })
        .and_then(|()| {
            if ah <= 0.0 {
                return Ok(());
            }
            let ink = Color::BLACK.fade(f64::from(opacity));
            let run =
                TextRun::new("JetBrains Mono", ah / 8.0, ink).aligned(HorizontalAlign::Center);
            cx.fill_text(&digits, &run, Point::new(0.0, ah / 2.0 - 2.0))
                .map(|_| ())
        });
    cx.painter.restore();
    out
}

fn paint_polaroid(p: &mut Painter, aw: f64, ah: f64) -> RenderResult<()> {
    let body = Rect::new(-aw / 2.0, -ah / 2.0, aw / 2.0, ah / 2.0);
    p.blurred(10.0, |shadow| {
        shadow.fill_color(&body, Color::rgba(0, 0, 0, 128));
        Ok(())
    })?;
    p.fill_color(&body, Color::hex(0xfefefe));

    let inner_w = aw * 0.85;
    let inner_h = ah * 0.75;
    let top = -ah / 2.0 + (aw - inner_w) / 2.0;
    p.fill_color(
        &Rect::new(-inner_w / 2.0, top, inner_w / 2.0, top + inner_h),
        Color::hex(0x111111),
    );
    let note_y = ah / 2.0 - 15.0;
    let note = Line::new((-inner_w / 2.0, note_y), (inner_w / 2.0, note_y));
    p.stroke_color(&note, &StrokeStyle::new(1.0), Color::hex(0xeeeeee));
    Ok(())
}

/// Radial approximation of a disk blurred with a Gaussian of `sigma`, at `alpha`.
fn blurred_disk(center: Point, radius: f64, sigma: f64, color: Color, alpha: f64) -> Gradient {
    const STOPS: usize = 24;
    let reach = radius + 3.0 * sigma;
    let mut gradient = Gradient::radial(center, 0.0, reach);
    for k in 0..=STOPS {
        let r = reach * k as f64 / STOPS as f64;
        let coverage = normal_cdf((radius - r) / sigma);
        gradient = gradient.with_stop(r / reach, color.with_alpha(alpha * coverage));
    }
    gradient
}

fn normal_cdf(z: f64) -> f64 {
    // Abramowitz and Stegun 7.1.26.
    let x = z.abs() / std::f64::consts::SQRT_2;
    let t = 1.0 / (1.0 + 0.327_591_1 * x);
    let poly = t
        * (0.254_829_592
            + t * (-0.284_496_736
                + t * (1.421_413_741 + t * (-1.453_152_027 + t * 1.061_405_429))));
    let erf = 1.0 - poly * (-x * x).exp();
    if z >= 0.0 {
        0.5 * (1.0 + erf)
    } else {
        0.5 * (1.0 - erf)
    }
}

/// `grayscale(100%) sepia(50%) contrast(150%)` on one straight-alpha pixel.
pub(crate) fn detective_filter(px: [u8; 4]) -> [u8; 4] {
    let [r, g, b, a] = px.map(|c| f64::from(c) / 255.0);
    let gray = 0.2126 * r + 0.7152 * g + 0.0722 * b;

    let keep = 0.5;
    let sepia = [
        [0.393 + 0.607 * keep, 0.769 - 0.769 * keep, 0.189 - 0.189 * keep],
        [0.349 - 0.349 * keep, 0.686 + 0.314 * keep, 0.168 - 0.168 * keep],
        [0.272 - 0.272 * keep, 0.534 - 0.534 * keep, 0.131 + 0.869 * keep],
    ];
    let toned = sepia.map(|row| (row[0] * gray + row[1] * gray + row[2] * gray).min(1.0));
    let contrast = |c: f64| clamp_u8(((c - 0.5) * 1.5 + 0.5).clamp(0.0, 1.0) * 255.0);
    [contrast(toned[0]), contrast(toned[1]), contrast(toned[2]), clamp_u8(a * 255.0)]
}

impl DesignPainter for AlbumParams {
    fn logical_size(&self, _image: Option<&PreparedImage>) -> RenderResult<LogicalSize> {
        LogicalSize::new(ALBUM_EDGE, ALBUM_EDGE)
    }

    fn stages(&self) -> &'static [Stage] {
        &[
            Stage::Base,
            Stage::Image,
            Stage::Procedural,
            Stage::Text,
            Stage::Grain,
            Stage::Frame,
        ]
    }

    fn paint_stage(&self, stage: Stage, cx: &mut PaintCx<'_>) -> RenderResult<()> {
        match stage {
            Stage::Base => self.paint_background(cx),
            Stage::Image => self.paint_image(cx),
            Stage::Procedural => {
                self.paint_grid(cx);
                for asset in &self.assets {
                    cx.painter.set_transform(cx.base_transform());
                    self.paint_asset(asset, cx)?;
                }
                Ok(())
            }
            Stage::Text => self.paint_text(cx),
            Stage::Grain => self.paint_noise(cx),
            Stage::Frame => {
                self.paint_frame(cx);
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/designs/album.rs"]
mod tests;
