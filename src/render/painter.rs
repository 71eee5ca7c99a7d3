use std::sync::Arc;

use kurbo::{Cap, Join, Shape, Stroke, StrokeOpts};
use smallvec::SmallVec;

use crate::assets::color::Color;
use crate::assets::decode::PreparedImage;
use crate::assets::fonts::ShapedLine;
use crate::foundation::core::{Affine, BezPath, Canvas, Point, Rect};
use crate::foundation::error::{RenderError, RenderResult};
use crate::foundation::math::{premultiply_rgba8_in_place, unpremultiply_rgba8_in_place};
use crate::layout::cover::rect_to_rect;
use crate::render::blur::{BlurKernel, blur_rgba8_premul_in_place};
use crate::render::composite::over_in_place;
use crate::render::gradient::Gradient;
use crate::render::surface::Surface;

/// Fill source for shapes.
#[derive(Clone, Debug, PartialEq)]
pub enum Paint {
    Solid(Color),
    Gradient(Gradient),
}

impl From<Color> for Paint {
    fn from(c: Color) -> Self {
        Self::Solid(c)
    }
}

impl From<Gradient> for Paint {
    fn from(g: Gradient) -> Self {
        Self::Gradient(g)
    }
}

/// Stroke parameters in local units. Defaults follow the 2D canvas: miter joins with limit 10,
/// butt caps, no dashes.
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeStyle {
    pub width: f64,
    pub join: Join,
    pub cap: Cap,
    pub dashes: SmallVec<[f64; 4]>,
}

impl StrokeStyle {
    pub fn new(width: f64) -> Self {
        Self {
            width,
            join: Join::Miter,
            cap: Cap::Butt,
            dashes: SmallVec::new(),
        }
    }

    pub fn with_dashes(mut self, pattern: &[f64]) -> Self {
        self.dashes = pattern.iter().copied().collect();
        self
    }

    pub fn with_cap(mut self, cap: Cap) -> Self {
        self.cap = cap;
        self
    }

    pub fn with_join(mut self, join: Join) -> Self {
        self.join = join;
        self
    }
}

/// Immediate-mode drawing surface over a `vello_cpu` context.
///
/// Draw calls accumulate in the context and are rasterized lazily. Operations that need the
/// pixels (`with_pixels`, `blurred`, `group`, `finish`) first commit pending work: the context is
/// rendered into a cleared scratch pixmap, which is then composited source-over onto the committed
/// pixels. Committing inside `with_opacity` is rejected because the layer would be split.
pub struct Painter {
    canvas: Canvas,
    ctx: vello_cpu::RenderContext,
    committed: vello_cpu::Pixmap,
    scratch: vello_cpu::Pixmap,
    transform: Affine,
    saved: Vec<Affine>,
    open_layers: usize,
    pending: bool,
}

impl Painter {
    pub fn new(canvas: Canvas) -> Self {
        let (w, h) = canvas.as_u16();
        Self {
            canvas,
            ctx: vello_cpu::RenderContext::new(w, h),
            committed: vello_cpu::Pixmap::new(w, h),
            scratch: vello_cpu::Pixmap::new(w, h),
            transform: Affine::IDENTITY,
            saved: Vec::new(),
            open_layers: 0,
            pending: false,
        }
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn transform(&self) -> Affine {
        self.transform
    }

    pub fn set_transform(&mut self, transform: Affine) {
        self.transform = transform;
    }

    /// Post-multiply the current transform (`current * local`).
    pub fn concat(&mut self, local: Affine) {
        self.transform *= local;
    }

    pub fn save(&mut self) {
        self.saved.push(self.transform);
    }

    pub fn restore(&mut self) {
        if let Some(t) = self.saved.pop() {
            self.transform = t;
        }
    }

    /// Run `f` with the transform saved and restored around it.
    pub fn scoped<T>(&mut self, f: impl FnOnce(&mut Self) -> RenderResult<T>) -> RenderResult<T> {
        self.save();
        let out = f(self);
        self.restore();
        out
    }

    /// Device pixels per local unit under the current transform.
    pub fn device_scale(&self) -> f64 {
        self.transform.determinant().abs().sqrt()
    }

    fn tolerance(&self) -> f64 {
        0.1 / self.device_scale().max(1e-6)
    }

    pub fn fill(&mut self, shape: &impl Shape, paint: &Paint) -> RenderResult<()> {
        let path = shape.to_path(self.tolerance());
        match paint {
            Paint::Solid(color) => {
                self.fill_solid(&path, *color);
                Ok(())
            }
            Paint::Gradient(gradient) => self.fill_gradient(&path, gradient),
        }
    }

    pub fn fill_color(&mut self, shape: &impl Shape, color: Color) {
        let path = shape.to_path(self.tolerance());
        self.fill_solid(&path, color);
    }

    pub fn stroke(
        &mut self,
        shape: &impl Shape,
        style: &StrokeStyle,
        paint: &Paint,
    ) -> RenderResult<()> {
        if !style.width.is_finite() || style.width <= 0.0 {
            return Ok(());
        }
        let tolerance = self.tolerance();
        let stroke = Stroke::new(style.width)
            .with_join(style.join)
            .with_caps(style.cap)
            .with_miter_limit(10.0)
            .with_dashes(0.0, style.dashes.iter().copied());
        let outline = kurbo::stroke(
            shape.path_elements(tolerance),
            &stroke,
            &StrokeOpts::default(),
            tolerance,
        );
        match paint {
            Paint::Solid(color) => {
                self.fill_solid(&outline, *color);
                Ok(())
            }
            Paint::Gradient(gradient) => self.fill_gradient(&outline, gradient),
        }
    }

    pub fn stroke_color(&mut self, shape: &impl Shape, style: &StrokeStyle, color: Color) {
        // Solid strokes cannot fail.
        let _ = self.stroke(shape, style, &Paint::Solid(color));
    }

    fn fill_solid(&mut self, path: &BezPath, color: Color) {
        if color.a == 0 {
            return;
        }
        self.ctx.set_transform(affine_to_cpu(self.transform));
        self.ctx
            .set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(color.to_cpu());
        self.ctx.fill_path(&bezpath_to_cpu(path));
        self.pending = true;
    }

    fn fill_gradient(&mut self, path: &BezPath, gradient: &Gradient) -> RenderResult<()> {
        if gradient.is_degenerate() || self.transform.determinant() == 0.0 {
            return Ok(());
        }
        let device_path = self.transform * path.clone();
        let surface = Rect::new(
            0.0,
            0.0,
            f64::from(self.canvas.width),
            f64::from(self.canvas.height),
        );
        let bounds = device_path.bounding_box().expand().intersect(surface);
        if bounds.width() < 1.0 || bounds.height() < 1.0 {
            return Ok(());
        }

        let (w, h) = (bounds.width() as u32, bounds.height() as u32);
        let tile = gradient.rasterize(self.transform.inverse(), (bounds.x0, bounds.y0), w, h);
        let paint = image_paint(&tile, w, h)?;

        let origin = Affine::translate((bounds.x0, bounds.y0));
        self.ctx.set_transform(affine_to_cpu(origin));
        self.ctx
            .set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(paint);
        self.ctx
            .fill_path(&bezpath_to_cpu(&(origin.inverse() * device_path)));
        self.pending = true;
        Ok(())
    }

    /// Draw the `src` region of `image` (image pixels) into `dst` (local units).
    pub fn draw_image(
        &mut self,
        image: &PreparedImage,
        src: Rect,
        dst: Rect,
        opacity: f32,
    ) -> RenderResult<()> {
        if opacity <= 0.0 || src.area() <= 0.0 || dst.area() <= 0.0 {
            return Ok(());
        }
        let paint = image_paint(&image.rgba8_premul, image.width, image.height)?;
        self.ctx
            .set_transform(affine_to_cpu(self.transform * rect_to_rect(src, dst)));
        self.ctx
            .set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(paint);
        if opacity < 1.0 {
            self.ctx.push_opacity_layer(opacity);
        }
        self.ctx
            .fill_rect(&vello_cpu::kurbo::Rect::new(src.x0, src.y0, src.x1, src.y1));
        if opacity < 1.0 {
            self.ctx.pop_layer();
        }
        self.pending = true;
        Ok(())
    }

    /// Draw a shaped line with its layout box's top-left at `origin`.
    pub(crate) fn draw_text_line(&mut self, line: &ShapedLine, origin: Point, color: Color) {
        if color.a == 0 {
            return;
        }
        self.ctx.set_transform(affine_to_cpu(
            self.transform * Affine::translate(origin.to_vec2()),
        ));
        self.ctx
            .set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(color.to_cpu());
        for layout_line in line.layout.lines() {
            for item in layout_line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                self.ctx
                    .glyph_run(&line.font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        self.pending = true;
    }

    /// Stroke the glyph outlines of a shaped line, `width` in local units.
    pub(crate) fn stroke_text_line(
        &mut self,
        line: &ShapedLine,
        origin: Point,
        color: Color,
        width: f64,
    ) {
        if color.a == 0 || width <= 0.0 {
            return;
        }
        self.ctx.set_transform(affine_to_cpu(
            self.transform * Affine::translate(origin.to_vec2()),
        ));
        self.ctx
            .set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(color.to_cpu());
        self.ctx.set_stroke(
            vello_cpu::kurbo::Stroke::new(width)
                .with_join(vello_cpu::kurbo::Join::Round)
                .with_caps(vello_cpu::kurbo::Cap::Round),
        );
        for layout_line in line.layout.lines() {
            for item in layout_line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                self.ctx
                    .glyph_run(&line.font)
                    .font_size(run.run().font_size())
                    .stroke_glyphs(glyphs);
            }
        }
        self.pending = true;
    }

    /// Draw primitives issued by `f` at `opacity`. `f` must not read back pixels.
    pub fn with_opacity(
        &mut self,
        opacity: f32,
        f: impl FnOnce(&mut Self) -> RenderResult<()>,
    ) -> RenderResult<()> {
        let opacity = opacity.clamp(0.0, 1.0);
        if opacity >= 1.0 {
            return f(self);
        }
        self.ctx.push_opacity_layer(opacity);
        self.open_layers += 1;
        let out = f(self);
        self.open_layers -= 1;
        self.ctx.pop_layer();
        self.pending = true;
        out
    }

    /// Paint `f` offscreen and composite the result at `opacity`. Unlike `with_opacity`, `f`
    /// may use blurs and pixel passes.
    pub fn group(
        &mut self,
        opacity: f32,
        f: impl FnOnce(&mut Painter) -> RenderResult<()>,
    ) -> RenderResult<()> {
        let mut layer = self.offscreen();
        f(&mut layer)?;
        layer.commit()?;
        self.commit()?;
        over_in_place(
            self.committed.data_as_u8_slice_mut(),
            layer.committed.data_as_u8_slice(),
            opacity,
        )
    }

    /// Paint `f` offscreen, blur it by `sigma` local units and composite it source-over.
    pub fn blurred(
        &mut self,
        sigma: f64,
        f: impl FnOnce(&mut Painter) -> RenderResult<()>,
    ) -> RenderResult<()> {
        let kernel = BlurKernel::gaussian(sigma * self.device_scale())?;
        let mut layer = self.offscreen();
        f(&mut layer)?;
        layer.commit()?;
        blur_rgba8_premul_in_place(
            layer.committed.data_as_u8_slice_mut(),
            self.canvas.width,
            self.canvas.height,
            &kernel,
        )?;
        self.commit()?;
        over_in_place(
            self.committed.data_as_u8_slice_mut(),
            layer.committed.data_as_u8_slice(),
            1.0,
        )
    }

    /// Read-modify-write of the committed pixels as straight-alpha RGBA8.
    pub fn with_pixels(&mut self, f: impl FnOnce(&mut [u8], Canvas)) -> RenderResult<()> {
        self.commit()?;
        let canvas = self.canvas;
        let data = self.committed.data_as_u8_slice_mut();
        unpremultiply_rgba8_in_place(data);
        f(data, canvas);
        premultiply_rgba8_in_place(data);
        Ok(())
    }

    pub fn finish(mut self) -> RenderResult<Surface> {
        self.commit()?;
        Surface::from_premul(self.canvas, self.committed.data_as_u8_slice().to_vec())
    }

    fn offscreen(&self) -> Painter {
        let mut layer = Painter::new(self.canvas);
        layer.transform = self.transform;
        layer
    }

    fn commit(&mut self) -> RenderResult<()> {
        if self.open_layers > 0 {
            return Err(RenderError::invalid_parameter(
                "cannot read back pixels inside an opacity layer",
            ));
        }
        if !self.pending {
            return Ok(());
        }
        self.ctx.flush();
        self.scratch.data_as_u8_slice_mut().fill(0);
        self.ctx.render_to_pixmap(&mut self.scratch);
        over_in_place(
            self.committed.data_as_u8_slice_mut(),
            self.scratch.data_as_u8_slice(),
            1.0,
        )?;
        self.ctx.reset();
        self.pending = false;
        Ok(())
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn image_paint(rgba8_premul: &[u8], width: u32, height: u32) -> RenderResult<vello_cpu::Image> {
    let w: u16 = width
        .try_into()
        .map_err(|_| RenderError::invalid_parameter("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| RenderError::invalid_parameter("image height exceeds u16"))?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(RenderError::invalid_parameter(
            "image byte length does not match its size",
        ));
    }

    let mut may_have_opacities = false;
    let pixels = rgba8_premul
        .chunks_exact(4)
        .map(|px| {
            may_have_opacities |= px[3] != 255;
            vello_cpu::peniko::color::PremulRgba8 {
                r: px[0],
                g: px[1],
                b: px[2],
                a: px[3],
            }
        })
        .collect();
    let pixmap = vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, may_have_opacities);

    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/painter.rs"]
mod tests;
