//! Stateful render driver for an interactive editor.
//!
//! Renders are synchronous. The one suspension point is loading the user image: [`begin`]
//! hands out a [`RenderTicket`] and [`complete_image_load`] finishes it once the bytes arrive.
//! Each render or `begin` bumps a generation counter, so a load that completes after a newer
//! request is discarded instead of overwriting the newer preview.
//!
//! [`begin`]: RenderSession::begin
//! [`complete_image_load`]: RenderSession::complete_image_load

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::assets::decode::decode_image;
use crate::assets::fonts::{FontBook, TextLayoutEngine};
use crate::designs::RenderParameters;
use crate::export::png::{ExportedImage, export_png_at};
use crate::foundation::error::{RenderError, RenderResult};
use crate::render::pipeline::{Target, render_with};
use crate::render::surface::Surface;

/// Snapshot of the session generation at the time a request was issued.
#[derive(Clone, Debug)]
pub struct GenerationToken {
    counter: Arc<AtomicU64>,
    generation: u64,
}

impl GenerationToken {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// False once the session has issued a newer request. Loaders may poll this to abandon work.
    pub fn is_current(&self) -> bool {
        self.counter.load(Ordering::Acquire) == self.generation
    }
}

/// Pending render waiting for its image bytes.
#[derive(Clone, Debug)]
pub struct RenderTicket {
    params: RenderParameters,
    scale: f64,
    token: GenerationToken,
}

impl RenderTicket {
    pub fn token(&self) -> &GenerationToken {
        &self.token
    }

    pub fn params(&self) -> &RenderParameters {
        &self.params
    }
}

/// Result of a completed image load.
#[derive(Debug)]
pub struct SessionRender {
    pub surface: Surface,
    /// Set when the image could not be decoded and the design was painted without it.
    pub notice: Option<RenderError>,
}

pub struct RenderSession {
    fonts: FontBook,
    engine: TextLayoutEngine,
    generation: Arc<AtomicU64>,
}

impl RenderSession {
    pub fn new(fonts: FontBook) -> Self {
        Self {
            fonts,
            engine: TextLayoutEngine::new(),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn fonts(&self) -> &FontBook {
        &self.fonts
    }

    /// Token for the latest request.
    pub fn current(&self) -> GenerationToken {
        GenerationToken {
            counter: Arc::clone(&self.generation),
            generation: self.generation.load(Ordering::Acquire),
        }
    }

    fn advance(&self) -> GenerationToken {
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        GenerationToken {
            counter: Arc::clone(&self.generation),
            generation,
        }
    }

    /// Render immediately with whatever image `params` already carries. Supersedes pending
    /// tickets.
    pub fn render(&mut self, params: &RenderParameters, scale: f64) -> RenderResult<Surface> {
        self.advance();
        render_with(params, &self.fonts, &mut self.engine, Target::Scale(scale))
    }

    /// Start a render whose image is still loading.
    pub fn begin(&mut self, params: RenderParameters, scale: f64) -> RenderTicket {
        let token = self.advance();
        tracing::debug!(generation = token.generation, "image load started");
        RenderTicket {
            params,
            scale,
            token,
        }
    }

    /// Finish `ticket` with the loaded bytes. Returns `None` when a newer request has been issued
    /// since the ticket was handed out. Undecodable bytes fall back to the design's image-less
    /// rendering and are reported in [`SessionRender::notice`].
    #[tracing::instrument(skip(self, ticket, bytes), fields(generation = ticket.token.generation))]
    pub fn complete_image_load(
        &mut self,
        ticket: RenderTicket,
        bytes: &[u8],
    ) -> RenderResult<Option<SessionRender>> {
        if !ticket.token.is_current() {
            tracing::debug!("stale image load discarded");
            return Ok(None);
        }
        let RenderTicket { params, scale, .. } = ticket;
        let (params, notice) = match decode_image(bytes) {
            Ok(image) => (params.with_image(image), None),
            Err(e) => {
                tracing::warn!(error = %e, "image decode failed; rendering without it");
                (RenderParameters { image: None, ..params }, Some(e))
            }
        };
        let surface = render_with(&params, &self.fonts, &mut self.engine, Target::Scale(scale))?;
        Ok(Some(SessionRender { surface, notice }))
    }

    /// Render at `factor` pixels per logical unit and encode as `<app>-<unix_ms>.png`.
    pub fn export_hd(
        &mut self,
        params: &RenderParameters,
        factor: u32,
        app: &str,
        unix_ms: u64,
    ) -> RenderResult<ExportedImage> {
        if factor == 0 {
            return Err(RenderError::invalid_parameter("export factor must be >= 1"));
        }
        let surface = render_with(
            params,
            &self.fonts,
            &mut self.engine,
            Target::Scale(f64::from(factor)),
        )?;
        export_png_at(&surface, app, unix_ms)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/mod.rs"]
mod tests;
