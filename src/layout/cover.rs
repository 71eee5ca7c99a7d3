use kurbo::Size;

use crate::foundation::core::{Affine, Rect};
use crate::foundation::error::{RenderError, RenderResult};

fn check(src: Size, dst: Rect) -> RenderResult<()> {
    let ok = |v: f64| v.is_finite() && v > 0.0;
    if !(ok(src.width) && ok(src.height)) {
        return Err(RenderError::invalid_parameter(format!(
            "cover source size must be finite and > 0, got {}x{}",
            src.width, src.height
        )));
    }
    if !(ok(dst.width()) && ok(dst.height()) && dst.x0.is_finite() && dst.y0.is_finite()) {
        return Err(RenderError::invalid_parameter(
            "cover destination box must be finite with positive size",
        ));
    }
    Ok(())
}

/// Scale-and-offset cover: the full image scaled to cover `dst`, centered.
///
/// The result overflows `dst` along one axis by the same amount on both sides; the caller clips.
pub fn cover_dest_rect(src: Size, dst: Rect) -> RenderResult<Rect> {
    check(src, dst)?;
    let img_ratio = src.width / src.height;
    let box_ratio = dst.width() / dst.height();
    let (w, h) = if img_ratio > box_ratio {
        (dst.height() * img_ratio, dst.height())
    } else {
        (dst.width(), dst.width() / img_ratio)
    };
    let x = dst.x0 + (dst.width() - w) / 2.0;
    let y = dst.y0 + (dst.height() - h) / 2.0;
    Ok(Rect::new(x, y, x + w, y + h))
}

/// Source-crop cover: the centered sub-rectangle of the image with `dst`'s aspect ratio.
///
/// Always lies inside `[0, width] x [0, height]` of the source.
pub fn cover_source_rect(src: Size, dst: Rect) -> RenderResult<Rect> {
    check(src, dst)?;
    let src_ratio = src.width / src.height;
    let dst_ratio = dst.width() / dst.height();
    let (sw, sh) = if src_ratio > dst_ratio {
        (src.height * dst_ratio, src.height)
    } else {
        (src.width, src.width / dst_ratio)
    };
    let sx = ((src.width - sw) / 2.0).max(0.0);
    let sy = ((src.height - sh) / 2.0).max(0.0);
    Ok(Rect::new(
        sx,
        sy,
        (sx + sw).min(src.width),
        (sy + sh).min(src.height),
    ))
}

/// Affine mapping the rectangle `from` onto `to`.
pub fn rect_to_rect(from: Rect, to: Rect) -> Affine {
    let sx = to.width() / from.width();
    let sy = to.height() / from.height();
    Affine::translate((to.x0, to.y0))
        * Affine::scale_non_uniform(sx, sy)
        * Affine::translate((-from.x0, -from.y0))
}

#[cfg(test)]
#[path = "../../tests/unit/layout/cover.rs"]
mod tests;
