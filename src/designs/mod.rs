//! Per-app parameter sets and painters.
//!
//! Every design carries its own explicit parameters; [`Design`] is tagged by `app` in JSON.

use std::sync::Arc;

use kurbo::Size;
use serde::{Deserialize, Serialize};

use crate::assets::decode::PreparedImage;
use crate::foundation::core::{BezPath, Rect};
use crate::foundation::error::{RenderError, RenderResult};
use crate::layout::cover::cover_dest_rect;
use crate::random::prng::Seed;
use crate::render::pipeline::{DesignPainter, PaintCx};

pub mod album;
pub mod banner;
pub mod card;
pub mod quote;
pub mod wallpaper;

pub use album::AlbumParams;
pub use banner::BannerParams;
pub use card::CardParams;
pub use quote::QuoteParams;
pub use wallpaper::WallpaperParams;

/// Everything one render reads. Replaced wholesale between renders.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RenderParameters {
    #[serde(default)]
    pub seed: Seed,
    pub design: Design,
    /// Decoded user image. Runtime only; never persisted.
    #[serde(skip)]
    pub image: Option<Arc<PreparedImage>>,
}

impl RenderParameters {
    pub fn new(seed: impl Into<Seed>, design: impl Into<Design>) -> Self {
        Self {
            seed: seed.into(),
            design: design.into(),
            image: None,
        }
    }

    pub fn with_image(mut self, image: PreparedImage) -> Self {
        self.image = Some(Arc::new(image));
        self
    }
}

/// One variant per app.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "app", rename_all = "kebab-case")]
pub enum Design {
    Quote(QuoteParams),
    Album(AlbumParams),
    Wallpaper(WallpaperParams),
    SoulsBanner(BannerParams),
    TcgCard(CardParams),
}

impl Design {
    /// Slug used in export filenames.
    pub fn app_name(&self) -> &'static str {
        match self {
            Self::Quote(_) => "quote",
            Self::Album(_) => "album",
            Self::Wallpaper(_) => "wallpaper",
            Self::SoulsBanner(_) => "souls-banner",
            Self::TcgCard(_) => "tcg-card",
        }
    }

    /// Fixed key of this design's single preset slot.
    pub fn preset_key(&self) -> &'static str {
        match self {
            Self::Quote(_) => "quote_preset",
            Self::Album(_) => "album_preset",
            Self::Wallpaper(_) => "wallpaper_preset",
            Self::SoulsBanner(_) => "souls_banner_preset",
            Self::TcgCard(_) => "tcg_card_preset",
        }
    }

    pub(crate) fn painter(&self) -> &dyn DesignPainter {
        match self {
            Self::Quote(p) => p,
            Self::Album(p) => p,
            Self::Wallpaper(p) => p,
            Self::SoulsBanner(p) => p,
            Self::TcgCard(p) => p,
        }
    }
}

/// `value` if it is finite and > 0.
pub(crate) fn positive(what: &str, value: f64) -> RenderResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(RenderError::invalid_parameter(format!(
            "{what} must be finite and > 0, got {value}"
        )))
    }
}

/// Scale-and-offset cover of `image` over `area`; the overflow is clipped by the surface.
pub(crate) fn draw_cover(
    cx: &mut PaintCx<'_>,
    image: &PreparedImage,
    area: Rect,
    opacity: f32,
) -> RenderResult<()> {
    let (w, h) = image.size();
    let dst = cover_dest_rect(Size::new(w, h), area)?;
    cx.painter
        .draw_image(image, Rect::new(0.0, 0.0, w, h), dst, opacity)
}

/// Rectangle with quadratic-curve corners of radius `r`.
pub(crate) fn quad_round_rect(rect: Rect, r: f64) -> BezPath {
    let Rect { x0, y0, x1, y1 } = rect;
    let mut path = BezPath::new();
    path.move_to((x0 + r, y0));
    path.line_to((x1 - r, y0));
    path.quad_to((x1, y0), (x1, y0 + r));
    path.line_to((x1, y1 - r));
    path.quad_to((x1, y1), (x1 - r, y1));
    path.line_to((x0 + r, y1));
    path.quad_to((x0, y1), (x0, y1 - r));
    path.line_to((x0, y0 + r));
    path.quad_to((x0, y0), (x0 + r, y0));
    path.close_path();
    path
}

/// Open polyline through `points`.
pub(crate) fn polyline(points: &[(f64, f64)]) -> BezPath {
    let mut path = BezPath::new();
    if let Some((&first, rest)) = points.split_first() {
        path.move_to(first);
        for &p in rest {
            path.line_to(p);
        }
    }
    path
}

/// Closed polygon through `points`.
pub(crate) fn polygon(points: &[(f64, f64)]) -> BezPath {
    let mut path = polyline(points);
    path.close_path();
    path
}

macro_rules! impl_into_design {
    ($($params:ty => $variant:ident),* $(,)?) => {
        $(impl From<$params> for Design {
            fn from(p: $params) -> Self {
                Self::$variant(p)
            }
        })*
    };
}

impl_into_design!(
    QuoteParams => Quote,
    AlbumParams => Album,
    WallpaperParams => Wallpaper,
    BannerParams => SoulsBanner,
    CardParams => TcgCard,
);

#[cfg(test)]
#[path = "../../tests/unit/designs/mod.rs"]
mod tests;
