//! Trading-card face on a 420 x 750 logical canvas.

use kurbo::Size;
use serde::{Deserialize, Serialize};

use crate::assets::color::Color;
use crate::assets::decode::PreparedImage;
use crate::designs::{polygon, polyline, quad_round_rect};
use crate::foundation::core::{BezPath, LogicalSize, Point, Rect};
use crate::foundation::error::RenderResult;
use crate::layout::align::HorizontalAlign;
use crate::layout::cover::cover_source_rect;
use crate::render::gradient::Gradient;
use crate::render::painter::StrokeStyle;
use crate::render::pipeline::{DesignPainter, PaintCx, Stage, TextRun};

pub const CARD_WIDTH: f64 = 420.0;
pub const CARD_HEIGHT: f64 = 750.0;
/// Resolution multiplier of the downloadable card.
pub const CARD_EXPORT_SCALE: f64 = 3.0;

const FONT: &str = "Arvo";
const GRID_STEP: f64 = 40.0;
const HEADER_Y: f64 = 20.0;
const HEADER_H: f64 = 50.0;
const IMAGE_BOX: Rect = Rect::new(25.0, 85.0, CARD_WIDTH - 25.0, 285.0);
const CORNER: f64 = 15.0;
const FIELD_TOP: f64 = 305.0;
const FIELD_H: f64 = 25.0;
const FIELD_STEP: f64 = 35.0;
const LABEL_W: f64 = 100.0;
const DESCRIPTION_H: f64 = 80.0;
const DESCRIPTION_LINE: f64 = 16.0;

const CYAN: Color = Color::hex(0x00ffff);
const HOT_PINK: Color = Color::hex(0xff0055);

/// Background gradients, labelled as shown in the picker.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardBackground {
    #[default]
    #[serde(rename = "Techno 1")]
    Techno1,
    #[serde(rename = "Techno 2")]
    Techno2,
    #[serde(rename = "Techno 3")]
    Techno3,
    #[serde(rename = "Techno 4")]
    Techno4,
    #[serde(rename = "Techno 5")]
    Techno5,
    #[serde(rename = "Techno 6")]
    Techno6,
    #[serde(rename = "Techno 7")]
    Techno7,
    #[serde(rename = "Techno 8")]
    Techno8,
    #[serde(rename = "Techno 9")]
    Techno9,
    #[serde(rename = "Techno 10")]
    Techno10,
    #[serde(rename = "Techno 11")]
    Techno11,
    #[serde(rename = "Techno 12")]
    Techno12,
    #[serde(rename = "Techno 13")]
    Techno13,
    #[serde(rename = "Techno 14")]
    Techno14,
    #[serde(rename = "Techno 15")]
    Techno15,
    #[serde(rename = "Techno 16")]
    Techno16,
    #[serde(rename = "Techno 17")]
    Techno17,
    #[serde(rename = "Techno 18")]
    Techno18,
    #[serde(rename = "Techno 19")]
    Techno19,
    #[serde(rename = "Techno 20")]
    Techno20,
}

macro_rules! stops {
    ($($hex:literal),+ $(,)?) => {
        const { &[$(Color::hex($hex)),+] }
    };
}

impl CardBackground {
    pub const ALL: [CardBackground; 20] = [
        Self::Techno1,
        Self::Techno2,
        Self::Techno3,
        Self::Techno4,
        Self::Techno5,
        Self::Techno6,
        Self::Techno7,
        Self::Techno8,
        Self::Techno9,
        Self::Techno10,
        Self::Techno11,
        Self::Techno12,
        Self::Techno13,
        Self::Techno14,
        Self::Techno15,
        Self::Techno16,
        Self::Techno17,
        Self::Techno18,
        Self::Techno19,
        Self::Techno20,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Techno1 => "Cyberpunk (Pink/Blue)",
            Self::Techno2 => "Matrix (Green/Black)",
            Self::Techno3 => "Synthwave (Purple/Orange)",
            Self::Techno4 => "Industrial (Grey/Cyan)",
            Self::Techno5 => "Void (Dark Blue/Black)",
            Self::Techno6 => "Neon Hazard (Green/Dark)",
            Self::Techno7 => "Code Red (Red/Black)",
            Self::Techno8 => "Electric Blue (Blue/Deep Blue)",
            Self::Techno9 => "Digital Gold (Gold/Black)",
            Self::Techno10 => "Dark Matter (Purple/Black)",
            Self::Techno11 => "Lights (Light Blue/Lilac Ash)",
            Self::Techno12 => "Holographic Rust (Oxidized Steel/Digital Amber)",
            Self::Techno13 => "Void Whisper (Abyssal Indigo/Ethereal Lavender)",
            Self::Techno14 => "Bio-Hazard (Dark Green/Neon Green)",
            Self::Techno15 => "Plasma (Dark Red/Orange/Yellow)",
            Self::Techno16 => "Frozen Mainframe (Dark Blue/Ice Blue)",
            Self::Techno17 => "Retrowave Grid (Blue/Pink)",
            Self::Techno18 => "Obsidian Glass (Black/Grey)",
            Self::Techno19 => "Black",
            Self::Techno20 => "Cyber Spectrum (6-Color)",
        }
    }

    /// Gradient colors, spread evenly along the card diagonal.
    pub fn colors(self) -> &'static [Color] {
        match self {
            Self::Techno1 => stops!(0xff00cc, 0x333399),
            Self::Techno2 => stops!(0x00ff00, 0x000000),
            Self::Techno3 => stops!(0x833ab4, 0xfd1d1d, 0xfcb045),
            Self::Techno4 => stops!(0x2c3e50, 0x4ca1af),
            Self::Techno5 => stops!(0x000046, 0x1cb5e0),
            Self::Techno6 => stops!(0x39ff14, 0x222222),
            Self::Techno7 => stops!(0x8b0000, 0x000000),
            Self::Techno8 => stops!(0x0066ff, 0x000033),
            Self::Techno9 => stops!(0xffd700, 0x1a1a1a),
            Self::Techno10 => stops!(0x240046, 0x000000),
            Self::Techno11 => stops!(0x96c3ce, 0xa79ab2),
            Self::Techno12 => stops!(0x2c3e50, 0xf39c12),
            Self::Techno13 => stops!(0x0a031f, 0xc6a5d6),
            Self::Techno14 => stops!(0x1a2a1a, 0x39ff14),
            Self::Techno15 => stops!(0x800000, 0xff4500, 0xffff00),
            Self::Techno16 => stops!(0x0f2027, 0x203a43, 0x2c5364),
            Self::Techno17 => stops!(0x3f5efb, 0xfc466b),
            Self::Techno18 => stops!(0x000000, 0x434343),
            Self::Techno19 => stops!(0x000000, 0x000000),
            Self::Techno20 => stops!(0xff0000, 0xffff00, 0x00ff00, 0x00ffff, 0x0000ff, 0xff00ff),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CardParams {
    pub card_name: String,
    pub hp: String,
    pub background: CardBackground,
    pub generation: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub attack: String,
    pub defense: String,
    pub cost: String,
    pub description: String,
    pub illustrator: String,
    pub card_number: String,
    pub total_cards: String,
    /// Date printed in the footer, verbatim.
    pub issued_on: String,
}

impl Default for CardParams {
    fn default() -> Self {
        Self {
            card_name: "Cyber Dragon".to_owned(),
            hp: "250".to_owned(),
            background: CardBackground::Techno1,
            generation: "Gen 5 - Neo Tokyo".to_owned(),
            kind: "Machine / Dragon".to_owned(),
            attack: "Photon Blast".to_owned(),
            defense: "Titanium Plating".to_owned(),
            cost: "500 Credits".to_owned(),
            description: "A mechanical dragon forged in the neon fires of the cybernetic \
                underworld. It patrols the data streams, incinerating viruses with concentrated \
                light."
                .to_owned(),
            illustrator: "Fezcodex".to_owned(),
            card_number: "001".to_owned(),
            total_cards: "100".to_owned(),
            issued_on: "2025-01-01".to_owned(),
        }
    }
}

impl CardParams {
    /// Label, value and accent of the five stat rows, top to bottom.
    pub fn fields(&self) -> [(&'static str, &str, Color); 5] {
        [
            ("GENERATION", &self.generation, Color::hex(0x00ff00)),
            ("TYPE", &self.kind, Color::hex(0xffff00)),
            ("ATTACK", &self.attack, HOT_PINK),
            ("DEFENSE", &self.defense, Color::hex(0x00aaff)),
            ("COST", &self.cost, Color::hex(0xff9900)),
        ]
    }

    pub fn footer(&self) -> String {
        format!(
            "{} | FEZCODEX | {}/{}",
            self.issued_on, self.card_number, self.total_cards
        )
    }

    fn paint_body(&self, cx: &mut PaintCx<'_>) -> RenderResult<()> {
        let area = cx.logical.rect();
        let fill = Gradient::linear((0.0, 0.0), (area.x1, area.y1))
            .with_even_stops(self.background.colors());
        cx.painter.fill(&quad_round_rect(area, 15.0), &fill.into())
    }

    fn paint_panels(&self, cx: &mut PaintCx<'_>) {
        let (w, h) = (cx.logical.width, cx.logical.height);

        // The grid runs over the whole canvas, rounded corners included.
        let mut grid = BezPath::new();
        let mut x = 0.0;
        while x < w {
            grid.move_to((x, 0.0));
            grid.line_to((x, h));
            x += GRID_STEP;
        }
        let mut y = 0.0;
        while y < h {
            grid.move_to((0.0, y));
            grid.line_to((w, y));
            y += GRID_STEP;
        }
        cx.painter
            .stroke_color(&grid, &StrokeStyle::new(1.0), Color::WHITE.with_alpha(0.1));

        let plate = Color::BLACK.with_alpha(0.6);
        let edge = StrokeStyle::new(2.0);
        let bottom = HEADER_Y + HEADER_H;
        let name_plate = polygon(&[
            (20.0, HEADER_Y),
            (w - 140.0, HEADER_Y),
            (w - 120.0, bottom),
            (20.0, bottom),
        ]);
        cx.painter.fill_color(&name_plate, plate);
        cx.painter.stroke_color(&name_plate, &edge, CYAN);
        let hp_plate = polygon(&[
            (w - 110.0, HEADER_Y),
            (w - 20.0, HEADER_Y),
            (w - 20.0, bottom),
            (w - 130.0, bottom),
        ]);
        cx.painter.fill_color(&hp_plate, plate);
        cx.painter.stroke_color(&hp_plate, &edge, HOT_PINK);

        cx.painter
            .fill_color(&IMAGE_BOX.inflate(2.0, 2.0), Color::BLACK);

        let mut top = FIELD_TOP;
        for (i, (_, _, color)) in self.fields().into_iter().enumerate() {
            let label = Rect::new(25.0, top, 25.0 + LABEL_W, top + FIELD_H);
            cx.painter.fill_color(&label, Color::BLACK.with_alpha(0.7));
            // The first box inherits the image corners' width; the rest inherit the contour's.
            let width = if i == 0 { 2.0 } else { 3.0 };
            cx.painter
                .stroke_color(&label, &StrokeStyle::new(width), color);
            let value = Rect::new(label.x1 + 5.0, top, w - 25.0, top + FIELD_H);
            cx.painter
                .fill_color(&value, Color::WHITE.with_alpha(0.1));
            top += FIELD_STEP;
        }

        let description = description_box(w);
        cx.painter
            .fill_color(&description, Color::BLACK.with_alpha(0.5));
        cx.painter.stroke_color(
            &description,
            &StrokeStyle::new(3.0),
            Color::WHITE.with_alpha(0.3),
        );
    }

    fn paint_image(&self, cx: &mut PaintCx<'_>) -> RenderResult<()> {
        match cx.image {
            Some(image) => {
                let (iw, ih) = image.size();
                let src = cover_source_rect(Size::new(iw, ih), IMAGE_BOX)?;
                cx.painter.draw_image(image, src, IMAGE_BOX, 1.0)
            }
            None => {
                cx.painter.fill_color(&IMAGE_BOX, Color::hex(0x222222));
                let run = TextRun::new(FONT, 16.0, Color::hex(0x555555))
                    .aligned(HorizontalAlign::Center);
                let center = IMAGE_BOX.center();
                cx.fill_text("UPLOAD IMAGE", &run, center).map(drop)
            }
        }
    }

    fn paint_text(&self, cx: &mut PaintCx<'_>) -> RenderResult<()> {
        let w = cx.logical.width;
        let baseline = HEADER_Y + 32.0;

        let name = TextRun::new(FONT, 22.0, CYAN).bold(true).glow(CYAN, 8.0);
        cx.fill_text(&self.card_name.to_uppercase(), &name, Point::new(35.0, baseline))?;
        let hp = TextRun::new(FONT, 20.0, HOT_PINK)
            .bold(true)
            .aligned(HorizontalAlign::Right)
            .glow(HOT_PINK, 8.0);
        cx.fill_text(&format!("HP {}", self.hp), &hp, Point::new(w - 35.0, baseline))?;

        let mut top = FIELD_TOP;
        for (label, value, color) in self.fields() {
            let caption = TextRun::new(FONT, 12.0, color)
                .bold(true)
                .aligned(HorizontalAlign::Center);
            cx.fill_text(label, &caption, Point::new(25.0 + LABEL_W / 2.0, top + 17.0))?;
            let contoured = TextRun::new(FONT, 14.0, color)
                .bold(true)
                .contour(Color::BLACK, 3.0);
            cx.fill_text(value, &contoured, Point::new(25.0 + LABEL_W + 15.0, top + 17.0))?;
            top += FIELD_STEP;
        }

        let body = TextRun::new(FONT, 12.0, Color::hex(0xcccccc));
        let area = description_box(w);
        let lines = cx.wrap(&self.description, &body, w - 70.0)?;
        for (i, line) in lines.iter().enumerate() {
            let y = area.y0 + 20.0 + i as f64 * DESCRIPTION_LINE;
            cx.fill_text(line, &body, Point::new(35.0, y))?;
        }

        let footer_y = cx.logical.height - 20.0;
        let small = TextRun::new(FONT, 10.0, Color::WHITE);
        let credit = format!("ILLUS: {}", self.illustrator.to_uppercase());
        cx.fill_text(&credit, &small, Point::new(25.0, footer_y))?;
        let info = small.aligned(HorizontalAlign::Right);
        cx.fill_text(&self.footer(), &info, Point::new(w - 25.0, footer_y))
            .map(drop)
    }

    fn paint_frame(&self, cx: &mut PaintCx<'_>) {
        let (w, h) = (cx.logical.width, cx.logical.height);
        cx.painter.stroke_color(
            &quad_round_rect(Rect::new(4.0, 4.0, w - 4.0, h - 4.0), 12.0),
            &StrokeStyle::new(8.0),
            Color::BLACK.with_alpha(0.6),
        );
        cx.painter.stroke_color(
            &quad_round_rect(Rect::new(10.0, 10.0, w - 10.0, h - 10.0), 10.0),
            &StrokeStyle::new(2.0),
            Color::WHITE.with_alpha(0.5),
        );

        let Rect { x0, y0, x1, y1 } = IMAGE_BOX;
        let edge = StrokeStyle::new(2.0);
        for corner in [
            [(x0, y0 + CORNER), (x0, y0), (x0 + CORNER, y0)],
            [(x1 - CORNER, y0), (x1, y0), (x1, y0 + CORNER)],
            [(x0, y1 - CORNER), (x0, y1), (x0 + CORNER, y1)],
            [(x1 - CORNER, y1), (x1, y1), (x1, y1 - CORNER)],
        ] {
            cx.painter.stroke_color(&polyline(&corner), &edge, CYAN);
        }
    }
}

/// Description panel below the five fields.
fn description_box(w: f64) -> Rect {
    let top = FIELD_TOP + 5.0 * FIELD_STEP + 5.0;
    Rect::new(25.0, top, w - 25.0, top + DESCRIPTION_H)
}

impl DesignPainter for CardParams {
    fn logical_size(&self, _image: Option<&PreparedImage>) -> RenderResult<LogicalSize> {
        LogicalSize::new(CARD_WIDTH, CARD_HEIGHT)
    }

    fn stages(&self) -> &'static [Stage] {
        &[
            Stage::Base,
            Stage::Procedural,
            Stage::Image,
            Stage::Text,
            Stage::Frame,
        ]
    }

    fn paint_stage(&self, stage: Stage, cx: &mut PaintCx<'_>) -> RenderResult<()> {
        match stage {
            Stage::Base => self.paint_body(cx),
            Stage::Procedural => {
                self.paint_panels(cx);
                Ok(())
            }
            Stage::Image => self.paint_image(cx),
            Stage::Text => self.paint_text(cx),
            Stage::Frame => {
                self.paint_frame(cx);
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/designs/card.rs"]
mod tests;
