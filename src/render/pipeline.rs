use crate::assets::color::Color;
use crate::assets::decode::PreparedImage;
use crate::assets::fonts::{FontBook, FontFace, FontVariant, ShapedLine, TextLayoutEngine};
use crate::designs::RenderParameters;
use crate::foundation::core::{Affine, Canvas, LogicalSize, Point};
use crate::foundation::error::{RenderError, RenderResult};
use crate::layout::align::{HorizontalAlign, anchor_offset_x, run_frame};
use crate::layout::wrap::{TextMeasure, wrap_lines};
use crate::random::prng::{Seed, SeededRng};
use crate::render::painter::Painter;
use crate::render::surface::Surface;

/// Ordered paint stages. Each design lists the stages it runs, in its own order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Solid, gradient or procedural background.
    Base,
    /// User image, cover-fitted.
    Image,
    /// Grids, generative shapes, decorative assets.
    Procedural,
    /// Flat color overlay for contrast.
    Overlay,
    Text,
    /// Per-pixel noise passes.
    Grain,
    /// Borders and frames drawn over everything else.
    Frame,
}

/// One design's painter, dispatched per stage.
pub(crate) trait DesignPainter {
    /// Size of the design in logical units; may depend on the user image.
    fn logical_size(&self, image: Option<&PreparedImage>) -> RenderResult<LogicalSize>;

    fn stages(&self) -> &'static [Stage];

    fn paint_stage(&self, stage: Stage, cx: &mut PaintCx<'_>) -> RenderResult<()>;
}

/// Where the anchor sits vertically relative to a line of text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum TextBaseline {
    Top,
    Middle,
    #[default]
    Alphabetic,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Glow {
    pub(crate) color: Color,
    /// Canvas-style shadow blur; the Gaussian sigma is half of it.
    pub(crate) blur: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Contour {
    pub(crate) color: Color,
    pub(crate) width: f64,
}

/// Font and paint for one run of text.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct TextRun<'s> {
    pub(crate) family: &'s str,
    pub(crate) size: f64,
    pub(crate) bold: bool,
    pub(crate) italic: bool,
    pub(crate) color: Color,
    pub(crate) align: HorizontalAlign,
    pub(crate) baseline: TextBaseline,
    pub(crate) glow: Option<Glow>,
    pub(crate) contour: Option<Contour>,
}

impl<'s> TextRun<'s> {
    pub(crate) fn new(family: &'s str, size: f64, color: Color) -> Self {
        Self {
            family,
            size,
            bold: false,
            italic: false,
            color,
            align: HorizontalAlign::Left,
            baseline: TextBaseline::Alphabetic,
            glow: None,
            contour: None,
        }
    }

    pub(crate) fn bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    pub(crate) fn italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    pub(crate) fn aligned(mut self, align: HorizontalAlign) -> Self {
        self.align = align;
        self
    }

    pub(crate) fn baseline(mut self, baseline: TextBaseline) -> Self {
        self.baseline = baseline;
        self
    }

    pub(crate) fn glow(mut self, color: Color, blur: f64) -> Self {
        self.glow = (blur > 0.0).then_some(Glow { color, blur });
        self
    }

    pub(crate) fn contour(mut self, color: Color, width: f64) -> Self {
        self.contour = Some(Contour { color, width });
        self
    }

    fn variant(&self) -> FontVariant {
        FontVariant::from_flags(self.bold, self.italic)
    }
}

/// Advance per character used for layout when the font book has no face.
const FALLBACK_ADVANCE_EM: f64 = 0.6;

/// Everything a design needs while painting one surface.
pub(crate) struct PaintCx<'a> {
    pub(crate) painter: Painter,
    pub(crate) rng: SeededRng,
    pub(crate) seed: &'a Seed,
    pub(crate) image: Option<&'a PreparedImage>,
    pub(crate) logical: LogicalSize,
    fonts: &'a FontBook,
    text: &'a mut TextLayoutEngine,
    warned_missing_font: bool,
}

impl<'a> PaintCx<'a> {
    pub(crate) fn new(
        canvas: Canvas,
        logical: LogicalSize,
        seed: &'a Seed,
        image: Option<&'a PreparedImage>,
        fonts: &'a FontBook,
        text: &'a mut TextLayoutEngine,
    ) -> Self {
        let mut painter = Painter::new(canvas);
        painter.set_transform(Affine::scale(f64::from(canvas.width) / logical.width));
        Self {
            painter,
            rng: SeededRng::new(seed),
            seed,
            image,
            logical,
            fonts,
            text,
            warned_missing_font: false,
        }
    }

    /// Base transform: logical units to device pixels.
    pub(crate) fn base_transform(&self) -> Affine {
        Affine::scale(f64::from(self.painter.canvas().width) / self.logical.width)
    }

    fn face(&mut self, run: &TextRun<'_>) -> Option<FontFace> {
        let face = self.fonts.resolve(run.family, run.variant()).cloned();
        if face.is_none() && !self.warned_missing_font {
            tracing::warn!(family = run.family, "no font available; text is skipped");
            self.warned_missing_font = true;
        }
        face
    }

    fn shape(&mut self, text: &str, run: &TextRun<'_>) -> RenderResult<Option<ShapedLine>> {
        if text.is_empty() {
            return Ok(None);
        }
        let Some(face) = self.face(run) else {
            return Ok(None);
        };
        self.text.shape_line(text, &face, run.size).map(Some)
    }

    /// Advance width of `text` in logical units. Without a font, a fixed advance per character
    /// keeps layout stable.
    pub(crate) fn measure(&mut self, text: &str, run: &TextRun<'_>) -> RenderResult<f64> {
        match self.face(run) {
            Some(face) => self.text.measure(text, &face, run.size),
            None => Ok(text.chars().count() as f64 * run.size * FALLBACK_ADVANCE_EM),
        }
    }

    /// Greedy word wrap measured with the run's font.
    pub(crate) fn wrap(
        &mut self,
        text: &str,
        run: &TextRun<'_>,
        max_width: f64,
    ) -> RenderResult<Vec<String>> {
        let mut measure = self.measurer(run);
        let lines = wrap_lines(&mut measure, text, max_width);
        measure.finish()?;
        Ok(lines)
    }

    /// [`TextMeasure`] over this context's fonts, for layout code written against the trait.
    pub(crate) fn measurer<'c, 'r, 's>(
        &'c mut self,
        run: &'r TextRun<'s>,
    ) -> FontMeasure<'c, 'a, 'r, 's> {
        FontMeasure {
            cx: self,
            run,
            error: None,
        }
    }

    /// Draw one line of text at `anchor` (logical units) and return its advance width.
    pub(crate) fn fill_text(
        &mut self,
        text: &str,
        run: &TextRun<'_>,
        anchor: Point,
    ) -> RenderResult<f64> {
        let Some(line) = self.shape(text, run)? else {
            return self.measure(text, run);
        };
        let frame = run_frame(run.align, anchor);
        let origin = Point::new(
            anchor_offset_x(run.align, line.width),
            baseline_offset(run.baseline, &line),
        );

        self.painter.scoped(|p| {
            p.concat(frame);
            if let Some(glow) = run.glow {
                p.blurred(glow.blur / 2.0, |layer| {
                    layer.draw_text_line(&line, origin, glow.color);
                    Ok(())
                })?;
            }
            if let Some(contour) = run.contour {
                p.stroke_text_line(&line, origin, contour.color, contour.width);
            }
            p.draw_text_line(&line, origin, run.color);
            Ok(())
        })?;
        Ok(line.width)
    }
}

fn baseline_offset(baseline: TextBaseline, line: &ShapedLine) -> f64 {
    match baseline {
        TextBaseline::Top => -(line.baseline - line.ascent),
        TextBaseline::Middle => -(line.baseline - (line.ascent - line.descent) / 2.0),
        TextBaseline::Alphabetic => -line.baseline,
    }
}

/// Font-backed [`TextMeasure`]. The first shaping error is kept and reported by `finish`.
pub(crate) struct FontMeasure<'c, 'a, 'r, 's> {
    cx: &'c mut PaintCx<'a>,
    run: &'r TextRun<'s>,
    error: Option<RenderError>,
}

impl FontMeasure<'_, '_, '_, '_> {
    pub(crate) fn finish(self) -> RenderResult<()> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl TextMeasure for FontMeasure<'_, '_, '_, '_> {
    fn measure(&mut self, text: &str) -> f64 {
        if self.error.is_some() {
            return f64::INFINITY;
        }
        match self.cx.measure(text, self.run) {
            Ok(w) => w,
            Err(e) => {
                self.error = Some(e);
                f64::INFINITY
            }
        }
    }
}

/// Render `params` at `scale` device pixels per logical unit.
#[tracing::instrument(skip(params, fonts), fields(app = params.design.app_name()))]
pub fn render(params: &RenderParameters, fonts: &FontBook, scale: f64) -> RenderResult<Surface> {
    let mut engine = TextLayoutEngine::new();
    render_with(params, fonts, &mut engine, Target::Scale(scale))
}

/// Render `params` onto a surface of exactly `canvas` pixels. The design is scaled uniformly by
/// `canvas.width / logical width`.
#[tracing::instrument(skip(params, fonts), fields(app = params.design.app_name()))]
pub fn render_into(
    params: &RenderParameters,
    fonts: &FontBook,
    canvas: Canvas,
) -> RenderResult<Surface> {
    let mut engine = TextLayoutEngine::new();
    render_with(params, fonts, &mut engine, Target::Canvas(canvas))
}

#[derive(Clone, Copy, Debug)]
pub(crate) enum Target {
    Scale(f64),
    Canvas(Canvas),
}

pub(crate) fn render_with(
    params: &RenderParameters,
    fonts: &FontBook,
    engine: &mut TextLayoutEngine,
    target: Target,
) -> RenderResult<Surface> {
    let design = params.design.painter();
    let image = params.image.as_deref();
    let logical = design.logical_size(image)?;
    let canvas = match target {
        Target::Scale(scale) => logical.to_canvas(scale)?,
        Target::Canvas(canvas) => canvas,
    };
    tracing::debug!(
        width = canvas.width,
        height = canvas.height,
        "painting design"
    );

    let mut cx = PaintCx::new(
        canvas,
        logical,
        &params.seed,
        image,
        fonts,
        engine,
    );
    for &stage in design.stages() {
        cx.painter.set_transform(cx.base_transform());
        design.paint_stage(stage, &mut cx)?;
    }
    cx.painter.finish()
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
