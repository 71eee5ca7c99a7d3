//! canvasforge paints generative raster designs on the CPU.
//!
//! Five designs share one pipeline: a quote card, an album cover, a wallpaper, a souls-style
//! banner and a trading card. Every design is laid out in its own logical units and painted at
//! any scale, so previews and high resolution exports show the same picture.
//!
//! - Describe a render with [`RenderParameters`] (seed + [`Design`] + optional image)
//! - Paint it with [`render`] / [`render_into`], or drive it through a [`RenderSession`]
//! - Encode the [`Surface`] with [`export_png`]
//!
//! All randomness comes from a [`SeededRng`], so equal parameters give equal pixels.
#![forbid(unsafe_code)]

mod foundation;

pub mod assets;
pub mod designs;
pub mod export;
pub mod layout;
pub mod random;
pub mod render;
pub mod session;

pub use crate::foundation::core::{
    Affine, Canvas, LogicalSize, MAX_SURFACE_EDGE, Point, Rect, Rgba8Premul,
};
pub use crate::foundation::error::{RenderError, RenderResult};
pub use kurbo::Size;

pub use crate::assets::color::Color;
pub use crate::assets::decode::{PreparedImage, decode_image};
pub use crate::assets::fonts::{FontBook, FontFace, FontVariant};
pub use crate::designs::{
    AlbumParams, BannerParams, CardParams, Design, QuoteParams, RenderParameters, WallpaperParams,
};
pub use crate::export::png::{ExportedImage, export_png, export_png_at, render_hd};
pub use crate::export::preset::{FilePresetStore, MemoryPresetStore, PresetStore};
pub use crate::layout::align::HorizontalAlign;
pub use crate::layout::cover::{cover_dest_rect, cover_source_rect};
pub use crate::layout::wrap::{MonospaceMeasure, TextMeasure, wrap_lines};
pub use crate::random::prng::{Seed, SeededRng};
pub use crate::render::pipeline::{render, render_into};
pub use crate::render::surface::Surface;
pub use crate::session::{GenerationToken, RenderSession, RenderTicket, SessionRender};
