use serde::{Deserialize, Serialize};

use crate::assets::color::Color;
use crate::assets::decode::PreparedImage;
use crate::designs::{draw_cover, positive};
use crate::foundation::core::{Affine, BezPath, LogicalSize, Point, Rect};
use crate::foundation::error::RenderResult;
use crate::layout::align::{HorizontalAlign, line_origin_x};
use crate::layout::wrap::{TextMeasure, wrap_lines};
use crate::render::gradient::Gradient;
use crate::render::grain::{paper_grain, tint_atop};
use crate::render::pipeline::{DesignPainter, PaintCx, Stage, TextBaseline, TextRun};

const DEFAULT_TEXT: &str = "The only way to deal with an unfree world is to become so absolutely \
free that your very existence is an act of rebellion.";

/// How the quote body is dressed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStyle {
    #[default]
    Standard,
    /// A filled box per line in the text color, glyphs in the background color.
    Wordbox,
    /// Same painting as `Standard`; selected by the typewriter preset.
    Typewriter,
    /// Torn paper sheet with drop shadow, grain and an aged vignette.
    Newspaper,
}

/// Quote card parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuoteParams {
    pub text: String,
    pub author: String,
    pub width: f64,
    pub height: f64,
    pub background_color: Color,
    pub text_color: Color,
    pub font_family: String,
    pub font_size: f64,
    /// CSS weight; 600 and above selects the bold face.
    pub font_weight: u16,
    pub text_align: HorizontalAlign,
    pub padding: f64,
    pub line_height: f64,
    pub overlay_opacity: f64,
    pub overlay_color: Color,
    #[serde(alias = "theme")]
    pub style: QuoteStyle,
}

impl Default for QuoteParams {
    fn default() -> Self {
        Self {
            text: DEFAULT_TEXT.to_owned(),
            author: "Albert Camus".to_owned(),
            width: 1080.0,
            height: 1080.0,
            background_color: Color::WHITE,
            text_color: Color::BLACK,
            font_family: "Inter".to_owned(),
            font_size: 48.0,
            font_weight: 800,
            text_align: HorizontalAlign::Left,
            padding: 80.0,
            line_height: 1.2,
            overlay_opacity: 0.0,
            overlay_color: Color::BLACK,
            style: QuoteStyle::Standard,
        }
    }
}

/// Named looks that overwrite font, colors, weight, style and alignment in one step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuotePreset {
    Modern,
    Typewriter,
    Genius,
    Pastoral,
    Highlighted,
    Newspaper,
}

impl QuotePreset {
    pub const ALL: [QuotePreset; 6] = [
        Self::Modern,
        Self::Typewriter,
        Self::Genius,
        Self::Pastoral,
        Self::Highlighted,
        Self::Newspaper,
    ];

    pub fn apply(self, params: &mut QuoteParams) {
        let (family, bg, fg, weight, style, align) = match self {
            Self::Modern => (
                "Inter",
                0xffffff,
                0x000000,
                800,
                QuoteStyle::Standard,
                HorizontalAlign::Left,
            ),
            Self::Typewriter => (
                "Courier New",
                0xf4f4f0,
                0x333333,
                400,
                QuoteStyle::Typewriter,
                HorizontalAlign::Left,
            ),
            Self::Genius => (
                "Inter",
                0x000000,
                0xffffff,
                900,
                QuoteStyle::Standard,
                HorizontalAlign::Left,
            ),
            Self::Pastoral => (
                "Playfair Display",
                0xe3dcd2,
                0x2c3e50,
                500,
                QuoteStyle::Standard,
                HorizontalAlign::Center,
            ),
            Self::Highlighted => (
                "Oswald",
                0xffffff,
                0x000000,
                700,
                QuoteStyle::Wordbox,
                HorizontalAlign::Center,
            ),
            Self::Newspaper => (
                "Playfair Display",
                0xfdf6e3,
                0x1a1a1a,
                700,
                QuoteStyle::Newspaper,
                HorizontalAlign::Left,
            ),
        };
        params.font_family = family.to_owned();
        params.background_color = Color::hex(bg);
        params.text_color = Color::hex(fg);
        params.font_weight = weight;
        params.style = style;
        params.text_align = align;
        params.overlay_opacity = 0.0;
    }
}

/// One positioned line; `y` is the top of the line box.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct PlacedLine {
    pub(crate) text: String,
    pub(crate) x: f64,
    pub(crate) y: f64,
    pub(crate) width: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct QuoteBlock {
    pub(crate) lines: Vec<PlacedLine>,
    /// Top of the author line.
    pub(crate) author_y: f64,
}

const PAPER_INSET: f64 = 60.0;
const TORN_STEP: f64 = 5.0;
const TORN_JITTER: f64 = 8.0;

impl QuoteParams {
    fn is_bold(&self) -> bool {
        self.font_weight >= 600
    }

    fn has_author(&self) -> bool {
        !self.author.is_empty()
    }

    fn body_run(&self) -> TextRun<'_> {
        TextRun::new(&self.font_family, self.font_size, self.text_color)
            .bold(self.is_bold())
            .baseline(TextBaseline::Top)
    }

    fn author_run(&self) -> TextRun<'_> {
        self.body_run().italic(true)
    }

    /// Wraps the body inside the padding and centers the block vertically, raised by
    /// `0.8 * font_size` when an author line follows.
    pub(crate) fn layout_block(
        &self,
        logical: LogicalSize,
        measure: &mut impl TextMeasure,
    ) -> QuoteBlock {
        let step = self.font_size * self.line_height;
        let (left, right) = (self.padding, logical.width - self.padding);
        let wrapped = wrap_lines(measure, &self.text, right - left);
        let total = wrapped.len() as f64 * step;

        let mut start_y = (logical.height - total) / 2.0;
        if self.has_author() {
            start_y -= self.font_size * 0.8;
        }

        let lines = wrapped
            .into_iter()
            .enumerate()
            .map(|(i, text)| {
                let width = measure.measure(&text);
                PlacedLine {
                    x: line_origin_x(self.text_align, width, left, right),
                    y: start_y + i as f64 * step,
                    width,
                    text,
                }
            })
            .collect();

        QuoteBlock {
            lines,
            author_y: start_y + total + self.font_size * 1.5,
        }
    }

    fn paint_newspaper(&self, cx: &mut PaintCx<'_>) -> RenderResult<()> {
        let (w, h) = (cx.logical.width, cx.logical.height);
        let sheet = torn_sheet(w, h, &mut || cx.rng.jitter(TORN_JITTER));

        let shadow = Color::rgba(0, 0, 0, 153);
        cx.painter.blurred(25.0 / 2.0, |layer| {
            layer.concat(Affine::translate((10.0, 15.0)));
            layer.fill_color(&sheet, shadow);
            Ok(())
        })?;
        cx.painter.fill_color(&sheet, self.background_color);

        let rng = &mut cx.rng;
        cx.painter.with_pixels(|px, _| paper_grain(px, rng, 20.0))?;

        let vignette = Gradient::radial((w / 2.0, h / 2.0), w / 3.0, w * 0.8)
            .with_stop(0.0, Color::TRANSPARENT)
            .with_stop(1.0, Color::rgba(139, 69, 19, 51));
        let device_to_local = cx.painter.transform().inverse();
        cx.painter
            .with_pixels(|px, canvas| tint_atop(px, canvas, device_to_local, &vignette))
    }

    fn paint_text(&self, cx: &mut PaintCx<'_>) -> RenderResult<()> {
        positive("font size", self.font_size)?;
        let body = self.body_run();
        let logical = cx.logical;

        let mut measure = cx.measurer(&body);
        let block = self.layout_block(logical, &mut measure);
        measure.finish()?;

        for line in &block.lines {
            if self.style == QuoteStyle::Wordbox {
                let pad = self.font_size * 0.2;
                let bx = Rect::new(
                    line.x - pad,
                    line.y - pad,
                    line.x + line.width + pad,
                    line.y - pad + self.font_size * self.line_height,
                );
                cx.painter.fill_color(&bx, self.text_color);
                let inverted = TextRun {
                    color: self.background_color,
                    ..body.clone()
                };
                cx.fill_text(&line.text, &inverted, Point::new(line.x, line.y))?;
            } else {
                cx.fill_text(&line.text, &body, Point::new(line.x, line.y))?;
            }
        }

        if self.has_author() {
            let author = format!("- {}", self.author);
            let run = TextRun {
                size: self.font_size * 0.5,
                ..self.author_run()
            };
            let width = cx.measure(&author, &run)?;
            let x = line_origin_x(
                self.text_align,
                width,
                self.padding,
                logical.width - self.padding,
            );
            cx.fill_text(&author, &run, Point::new(x, block.author_y))?;
        }
        Ok(())
    }
}

/// Closed sheet outline inset from the edges, every vertex jittered along the edge normal.
/// Draws happen in path order: top, right, bottom, left.
pub(crate) fn torn_sheet(w: f64, h: f64, jitter: &mut impl FnMut() -> f64) -> BezPath {
    let (x0, y0, x1, y1) = (PAPER_INSET, PAPER_INSET, w - PAPER_INSET, h - PAPER_INSET);
    let steps = |from: f64, to: f64| ((to - from) / TORN_STEP).floor().max(-1.0) as i64;

    let mut path = BezPath::new();
    path.move_to((x0, y0));
    for i in 0..=steps(x0, x1) {
        path.line_to((x0 + i as f64 * TORN_STEP, y0 + jitter()));
    }
    for i in 0..=steps(y0, y1) {
        path.line_to((x1 + jitter(), y0 + i as f64 * TORN_STEP));
    }
    for i in 0..=steps(x0, x1) {
        path.line_to((x1 - i as f64 * TORN_STEP, y1 + jitter()));
    }
    for i in 0..=steps(y0, y1) {
        path.line_to((x0 + jitter(), y1 - i as f64 * TORN_STEP));
    }
    path.close_path();
    path
}

impl DesignPainter for QuoteParams {
    fn logical_size(&self, _image: Option<&PreparedImage>) -> RenderResult<LogicalSize> {
        LogicalSize::new(
            positive("quote width", self.width)?,
            positive("quote height", self.height)?,
        )
    }

    fn stages(&self) -> &'static [Stage] {
        &[Stage::Base, Stage::Image, Stage::Overlay, Stage::Text]
    }

    fn paint_stage(&self, stage: Stage, cx: &mut PaintCx<'_>) -> RenderResult<()> {
        let area = cx.logical.rect();
        match stage {
            Stage::Base if self.style == QuoteStyle::Newspaper => self.paint_newspaper(cx),
            Stage::Base => {
                cx.painter.fill_color(&area, self.background_color);
                Ok(())
            }
            Stage::Image => match cx.image {
                Some(image) => draw_cover(cx, image, area, 1.0),
                None => Ok(()),
            },
            Stage::Overlay => {
                if self.overlay_opacity > 0.0 {
                    cx.painter
                        .fill_color(&area, self.overlay_color.fade(self.overlay_opacity));
                }
                Ok(())
            }
            Stage::Text => self.paint_text(cx),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/designs/quote.rs"]
mod tests;
