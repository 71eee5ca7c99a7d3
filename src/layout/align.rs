use serde::{Deserialize, Serialize};

use crate::foundation::core::{Affine, Point};

/// Per-line horizontal alignment. `Vertical` rotates the run by 90 degrees around its anchor
/// and centers it there.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HorizontalAlign {
    #[default]
    Left,
    Center,
    Right,
    Vertical,
}

/// Where a block of lines sits vertically inside its area.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockAnchor {
    #[default]
    Top,
    Center,
}

/// Left edge of one line inside the horizontal span `[left, right]`.
///
/// Resolved from this line's own width, so centered or right-aligned blocks stagger.
pub fn line_origin_x(align: HorizontalAlign, line_width: f64, left: f64, right: f64) -> f64 {
    match align {
        HorizontalAlign::Left => left,
        HorizontalAlign::Center | HorizontalAlign::Vertical => (left + right - line_width) / 2.0,
        HorizontalAlign::Right => right - line_width,
    }
}

/// Offset from an anchor point to the left edge of a run of `width`.
pub fn anchor_offset_x(align: HorizontalAlign, width: f64) -> f64 {
    match align {
        HorizontalAlign::Left => 0.0,
        HorizontalAlign::Center | HorizontalAlign::Vertical => -width / 2.0,
        HorizontalAlign::Right => -width,
    }
}

/// Top of a block of `line_count` lines inside `[top, top + height]`.
pub fn block_top(
    anchor: BlockAnchor,
    line_count: usize,
    line_height: f64,
    top: f64,
    height: f64,
) -> f64 {
    match anchor {
        BlockAnchor::Top => top,
        BlockAnchor::Center => top + (height - line_count as f64 * line_height) / 2.0,
    }
}

/// Local frame for a run anchored at `anchor`. Vertical runs read top to bottom.
pub fn run_frame(align: HorizontalAlign, anchor: Point) -> Affine {
    let frame = Affine::translate(anchor.to_vec2());
    if align == HorizontalAlign::Vertical {
        frame * Affine::rotate(std::f64::consts::FRAC_PI_2)
    } else {
        frame
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/align.rs"]
mod tests;
