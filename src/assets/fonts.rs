use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use crate::foundation::error::{RenderError, RenderResult};

/// Raw bytes of one font face (TTF/OTF), identified by a content hash.
#[derive(Clone, Debug)]
pub struct FontFace {
    bytes: Arc<Vec<u8>>,
    key: u64,
}

impl FontFace {
    pub fn from_bytes(bytes: Vec<u8>) -> RenderResult<Self> {
        if bytes.is_empty() {
            return Err(RenderError::invalid_parameter("font bytes are empty"));
        }
        let key = xxhash_rust::xxh3::xxh3_64(&bytes);
        Ok(Self {
            bytes: Arc::new(bytes),
            key,
        })
    }

    pub fn load(path: impl AsRef<Path>) -> RenderResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .with_context(|| format!("read font file '{}'", path.display()))?;
        Self::from_bytes(bytes)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub(crate) fn key(&self) -> u64 {
        self.key
    }
}

impl PartialEq for FontFace {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.bytes == other.bytes
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontVariant {
    Regular,
    Bold,
    Italic,
    BoldItalic,
}

impl FontVariant {
    pub fn from_flags(bold: bool, italic: bool) -> Self {
        match (bold, italic) {
            (false, false) => Self::Regular,
            (true, false) => Self::Bold,
            (false, true) => Self::Italic,
            (true, true) => Self::BoldItalic,
        }
    }

    /// Variants to try, best match first.
    fn fallback_chain(self) -> &'static [FontVariant] {
        match self {
            Self::Regular => &[Self::Regular, Self::Bold, Self::Italic, Self::BoldItalic],
            Self::Bold => &[Self::Bold, Self::Regular, Self::BoldItalic, Self::Italic],
            Self::Italic => &[Self::Italic, Self::Regular, Self::BoldItalic, Self::Bold],
            Self::BoldItalic => &[Self::BoldItalic, Self::Bold, Self::Italic, Self::Regular],
        }
    }
}

#[derive(Clone, Debug, Default)]
struct FontFamily {
    faces: HashMap<FontVariant, FontFace>,
}

/// Family name to font faces, injected into every render.
///
/// Lookups are case-insensitive. A request for a family that is not present falls back to the
/// default family, then to the first family by name, so a book with a single face renders every
/// text slot of every design.
#[derive(Clone, Debug, Default)]
pub struct FontBook {
    families: BTreeMap<String, FontFamily>,
    default_family: Option<String>,
}

impl FontBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, family: &str, variant: FontVariant, face: FontFace) -> &mut Self {
        self.families
            .entry(family.trim().to_lowercase())
            .or_default()
            .faces
            .insert(variant, face);
        self
    }

    pub fn with_face(mut self, family: &str, variant: FontVariant, face: FontFace) -> Self {
        self.insert(family, variant, face);
        self
    }

    pub fn set_default_family(&mut self, family: &str) -> &mut Self {
        self.default_family = Some(family.trim().to_lowercase());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }

    pub fn families(&self) -> impl Iterator<Item = &str> {
        self.families.keys().map(String::as_str)
    }

    /// Best face for `family` in `variant`, or `None` when the book is empty.
    pub fn resolve(&self, family: &str, variant: FontVariant) -> Option<&FontFace> {
        let wanted = family.trim().to_lowercase();
        let candidates = [
            self.families.get(&wanted),
            self.default_family
                .as_ref()
                .and_then(|d| self.families.get(d)),
            self.families.values().next(),
        ];
        candidates.into_iter().flatten().find_map(|fam| {
            variant
                .fallback_chain()
                .iter()
                .find_map(|v| fam.faces.get(v))
        })
    }
}

/// One shaped line of text, positioned with its layout box at the origin.
pub(crate) struct ShapedLine {
    pub(crate) layout: parley::Layout<()>,
    pub(crate) font: vello_cpu::peniko::FontData,
    pub(crate) width: f64,
    pub(crate) ascent: f64,
    pub(crate) descent: f64,
    pub(crate) baseline: f64,
}

#[derive(Clone)]
struct RegisteredFace {
    family_name: String,
    info: Option<parley::fontique::FontInfo>,
    font: vello_cpu::peniko::FontData,
}

/// Stateful helper that shapes single lines of text with Parley.
///
/// Faces are registered once per content hash and reused across renders.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
    registered: HashMap<u64, RegisteredFace>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    pub(crate) fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            registered: HashMap::new(),
        }
    }

    fn register(&mut self, face: &FontFace) -> RenderResult<RegisteredFace> {
        if let Some(r) = self.registered.get(&face.key()) {
            return Ok(r.clone());
        }

        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(face.bytes().to_vec()), None);
        let (family_id, infos) = families.first().ok_or_else(|| {
            RenderError::invalid_parameter("no font families registered from font bytes")
        })?;
        let family_name = self
            .font_ctx
            .collection
            .family_name(*family_id)
            .ok_or_else(|| RenderError::invalid_parameter("registered font family has no name"))?
            .to_string();

        let registered = RegisteredFace {
            family_name,
            info: infos.first().cloned(),
            font: vello_cpu::peniko::FontData::new(
                vello_cpu::peniko::Blob::from(face.bytes().to_vec()),
                0,
            ),
        };
        tracing::debug!(family = %registered.family_name, "registered font face");
        self.registered.insert(face.key(), registered.clone());
        Ok(registered)
    }

    /// Shape `text` as a single unbroken line.
    pub(crate) fn shape_line(
        &mut self,
        text: &str,
        face: &FontFace,
        size_px: f64,
    ) -> RenderResult<ShapedLine> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(RenderError::invalid_parameter(
                "text size must be finite and > 0",
            ));
        }
        let size_px = size_px as f32;
        let face = self.register(face)?;

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(face.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        // Pin the registered face when a family ships several weights or styles.
        if let Some(info) = &face.info {
            builder.push_default(parley::style::StyleProperty::FontWeight(info.weight()));
            builder.push_default(parley::style::StyleProperty::FontStyle(info.style()));
        }

        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);

        let (ascent, descent, baseline) = layout
            .lines()
            .next()
            .map(|line| {
                let m = line.metrics();
                (
                    f64::from(m.ascent),
                    f64::from(m.descent),
                    f64::from(m.baseline),
                )
            })
            .unwrap_or_else(|| {
                let size = f64::from(size_px);
                (size * 0.8, size * 0.2, size * 0.8)
            });
        let width = f64::from(layout.width());

        Ok(ShapedLine {
            layout,
            font: face.font,
            width,
            ascent,
            descent,
            baseline,
        })
    }

    pub(crate) fn measure(
        &mut self,
        text: &str,
        face: &FontFace,
        size_px: f64,
    ) -> RenderResult<f64> {
        if text.is_empty() {
            return Ok(0.0);
        }
        Ok(self.shape_line(text, face, size_px)?.width)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fonts.rs"]
mod tests;
