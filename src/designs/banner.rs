use serde::{Deserialize, Serialize};

use crate::assets::color::Color;
use crate::assets::decode::PreparedImage;
use crate::designs::positive;
use crate::foundation::core::{LogicalSize, Point, Rect};
use crate::foundation::error::RenderResult;
use crate::layout::align::HorizontalAlign;
use crate::render::gradient::Gradient;
use crate::render::pipeline::{DesignPainter, PaintCx, Stage, TextBaseline, TextRun};

/// Size used when no image is loaded.
pub const PLACEHOLDER_SIZE: (f64, f64) = (1280.0, 720.0);
const PLACEHOLDER_FILL: Color = Color::hex(0x111111);
const GLOW_BLUR: f64 = 20.0;
/// Band height in multiples of the font size.
const BAND_EM: f64 = 2.5;

/// Souls-style banner over a user image.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BannerParams {
    pub text: String,
    pub font_size: f64,
    pub text_color: Color,
    pub glow_color: Color,
    pub overlay_opacity: f64,
    /// Extra advance between characters; 0 draws the text as one run.
    pub letter_spacing: f64,
    /// Vertical center of the band, percent of the height.
    pub y_offset: f64,
    pub show_overlay: bool,
    pub font_family: String,
    /// CSS weight; 600 and above selects the bold face.
    pub font_weight: u16,
}

impl Default for BannerParams {
    fn default() -> Self {
        let mut params = Self {
            text: String::new(),
            font_size: 0.0,
            text_color: Color::WHITE,
            glow_color: Color::WHITE,
            overlay_opacity: 0.0,
            letter_spacing: 0.0,
            y_offset: 50.0,
            show_overlay: true,
            font_family: String::new(),
            font_weight: 400,
        };
        BannerPreset::EnemyFelled.apply(&mut params);
        params
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BannerPreset {
    YouDied,
    EnemyFelled,
    BonfireLit,
    Wasted,
}

impl BannerPreset {
    pub const ALL: [BannerPreset; 4] = [
        Self::YouDied,
        Self::EnemyFelled,
        Self::BonfireLit,
        Self::Wasted,
    ];

    /// Overwrites text, colors, font, spacing and band opacity. Position and band visibility stay.
    pub fn apply(self, params: &mut BannerParams) {
        let (text, fg, glow, size, family, weight, spacing, opacity) = match self {
            Self::YouDied => ("YOU DIED", 0x9d0a0a, 0xff0000, 120.0, "Cinzel", 400, 10.0, 0.5),
            Self::EnemyFelled => (
                "ENEMY FELLED",
                0xe8c227,
                0xffea00,
                100.0,
                "Cinzel",
                700,
                5.0,
                0.4,
            ),
            Self::BonfireLit => ("BONFIRE LIT", 0xffb347, 0xff8c00, 100.0, "Cinzel", 400, 5.0, 0.4),
            Self::Wasted => ("WASTED", 0x9d0a0a, 0x000000, 120.0, "Pricedown", 900, 2.0, 0.5),
        };
        params.text = text.to_owned();
        params.text_color = Color::hex(fg);
        params.glow_color = Color::hex(glow);
        params.font_size = size;
        params.font_family = family.to_owned();
        params.font_weight = weight;
        params.letter_spacing = spacing;
        params.overlay_opacity = opacity;
    }
}

impl BannerParams {
    fn center_y(&self, logical: LogicalSize) -> f64 {
        logical.height * self.y_offset / 100.0
    }

    /// Dark band behind the text, faded out over its outer fifths.
    pub(crate) fn band(&self, logical: LogicalSize) -> (Rect, Gradient) {
        let half = self.font_size * BAND_EM / 2.0;
        let y = self.center_y(logical);
        let shade = Color::BLACK.with_alpha(self.overlay_opacity);
        let gradient = Gradient::linear((0.0, y - half), (0.0, y + half))
            .with_stop(0.0, Color::TRANSPARENT)
            .with_stop(0.2, shade)
            .with_stop(0.8, shade)
            .with_stop(1.0, Color::TRANSPARENT);
        (Rect::new(0.0, y - half, logical.width, y + half), gradient)
    }

    fn run(&self) -> TextRun<'_> {
        TextRun::new(&self.font_family, self.font_size, self.text_color)
            .bold(self.font_weight >= 600)
            .baseline(TextBaseline::Middle)
            .glow(self.glow_color, GLOW_BLUR)
    }

    fn paint_text(&self, cx: &mut PaintCx<'_>) -> RenderResult<()> {
        positive("banner font size", self.font_size)?;
        let x = cx.logical.width / 2.0;
        let y = self.center_y(cx.logical);
        let run = self.run();

        if self.letter_spacing <= 0.0 {
            let centered = run.aligned(HorizontalAlign::Center);
            return cx.fill_text(&self.text, &centered, Point::new(x, y)).map(drop);
        }

        let mut buf = [0u8; 4];
        let advances = self
            .text
            .chars()
            .map(|ch| cx.measure(ch.encode_utf8(&mut buf), &run))
            .collect::<RenderResult<Vec<_>>>()?;
        let width = cx.measure(&self.text, &run)?;
        let anchors = spread_anchors(x, width, &advances, self.letter_spacing);
        let centered = run.aligned(HorizontalAlign::Center);
        for (ch, at) in self.text.chars().zip(anchors) {
            cx.fill_text(ch.encode_utf8(&mut buf), &centered, Point::new(at, y))?;
        }
        Ok(())
    }
}

/// Anchors for characters spread `spacing` apart around `center_x`. The pen starts half the
/// spaced width left of center and each character is centered on its own anchor, so the line
/// sits half a first glyph left of true center.
fn spread_anchors(center_x: f64, text_width: f64, advances: &[f64], spacing: f64) -> Vec<f64> {
    let gaps = advances.len().saturating_sub(1) as f64;
    let mut pen = center_x - (text_width + gaps * spacing) / 2.0;
    advances
        .iter()
        .map(|advance| {
            let at = pen;
            pen += advance + spacing;
            at
        })
        .collect()
}

impl DesignPainter for BannerParams {
    fn logical_size(&self, image: Option<&PreparedImage>) -> RenderResult<LogicalSize> {
        match image {
            Some(image) => {
                let (w, h) = image.size();
                LogicalSize::new(w, h)
            }
            None => LogicalSize::new(PLACEHOLDER_SIZE.0, PLACEHOLDER_SIZE.1),
        }
    }

    fn stages(&self) -> &'static [Stage] {
        &[Stage::Base, Stage::Image, Stage::Overlay, Stage::Text]
    }

    fn paint_stage(&self, stage: Stage, cx: &mut PaintCx<'_>) -> RenderResult<()> {
        let area = cx.logical.rect();
        match stage {
            Stage::Base if cx.image.is_none() => {
                cx.painter.fill_color(&area, PLACEHOLDER_FILL);
                Ok(())
            }
            Stage::Image => match cx.image {
                // The surface is the image's own size; no fitting needed.
                Some(image) => cx.painter.draw_image(image, area, area, 1.0),
                None => Ok(()),
            },
            Stage::Overlay if self.show_overlay && self.overlay_opacity > 0.0 => {
                positive("banner font size", self.font_size)?;
                let (band, gradient) = self.band(cx.logical);
                cx.painter.fill(&band, &gradient.into())
            }
            Stage::Text => self.paint_text(cx),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/designs/banner.rs"]
mod tests;
