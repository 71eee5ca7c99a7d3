use crate::foundation::error::{RenderError, RenderResult};
use crate::foundation::math::mul_div255_u8;

pub(crate) type PremulPx = [u8; 4];

/// Source-over of premultiplied pixels, with `src` scaled by `opacity`.
pub(crate) fn over(dst: PremulPx, src: PremulPx, opacity: f32) -> PremulPx {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255_u8(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }
    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = sa.saturating_add(mul_div255_u8(u16::from(dst[3]), inv));
    for i in 0..3 {
        let sc = mul_div255_u8(u16::from(src[i]), op);
        let dc = mul_div255_u8(u16::from(dst[i]), inv);
        out[i] = sc.saturating_add(dc);
    }
    out
}

pub(crate) fn over_in_place(dst: &mut [u8], src: &[u8], opacity: f32) -> RenderResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(RenderError::invalid_parameter(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        if s[3] == 0 {
            continue;
        }
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], opacity);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Source-atop of a straight-alpha color over a straight-alpha pixel: the destination keeps its
/// coverage, transparent pixels stay untouched.
pub(crate) fn atop_straight(dst: [u8; 4], src: [u8; 4]) -> [u8; 4] {
    if dst[3] == 0 || src[3] == 0 {
        return dst;
    }
    let sa = u16::from(src[3]);
    let inv = 255 - sa;
    [
        mul_div255_u8(u16::from(src[0]), sa).saturating_add(mul_div255_u8(u16::from(dst[0]), inv)),
        mul_div255_u8(u16::from(src[1]), sa).saturating_add(mul_div255_u8(u16::from(dst[1]), inv)),
        mul_div255_u8(u16::from(src[2]), sa).saturating_add(mul_div255_u8(u16::from(dst[2]), inv)),
        dst[3],
    ]
}

/// Screen blend of a straight-alpha color onto a straight-alpha pixel, composited source-over.
pub(crate) fn screen_straight(dst: [u8; 4], src: [u8; 4]) -> [u8; 4] {
    if src[3] == 0 {
        return dst;
    }
    let sa = f64::from(src[3]) / 255.0;
    let da = f64::from(dst[3]) / 255.0;
    let out_a = sa + da * (1.0 - sa);
    let mut out = [0u8; 4];
    for i in 0..3 {
        let s = f64::from(src[i]) / 255.0;
        let d = f64::from(dst[i]) / 255.0;
        let screened = s + d - s * d;
        let premul = sa * (1.0 - da) * s + sa * da * screened + (1.0 - sa) * da * d;
        out[i] = (premul / out_a * 255.0).round().clamp(0.0, 255.0) as u8;
    }
    out[3] = (out_a * 255.0).round() as u8;
    out
}

/// Overlay blend of one straight channel: multiply in the shadows, screen in the highlights.
pub(crate) fn overlay_channel(base: u8, blend: u8) -> u8 {
    let (b, s) = (u16::from(base), u16::from(blend));
    if b < 128 {
        mul_div255_u8(2 * b, s)
    } else {
        (255 - mul_div255_u8(2 * (255 - b), 255 - s) as u16) as u8
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
