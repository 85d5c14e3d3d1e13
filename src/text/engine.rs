use std::borrow::Cow;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::foundation::error::{QuotegenxError, QuotegenxResult};
use crate::text::fonts::{FONT_DIR_ENV, FaceEntry, FontBook, ResolvedFace, font_files_in};
use crate::text::measure::{FixedAdvanceMeasure, FontSpec, TextMeasure};

const MEASURE_CACHE_LIMIT: usize = 4096;

/// Glyph positioned relative to the start of its line, `y` relative to the baseline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapedGlyph {
    pub id: u32,
    pub x: f32,
    pub y: f32,
}

/// One shaped line of text ready to be drawn with the face it was shaped with.
#[derive(Clone, Debug)]
pub struct ShapedLine {
    pub glyphs: Vec<ShapedGlyph>,
    pub width: f64,
    pub size_px: f32,
    pub face: ResolvedFace,
}

/// Font registry plus Parley contexts used for measuring and shaping.
pub struct TextEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
    book: FontBook,
    fallback_metrics: FixedAdvanceMeasure,
    measure_cache: HashMap<(usize, u32, String), f64>,
}

impl Default for TextEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TextEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextEngine")
            .field("faces", &self.book.len())
            .finish_non_exhaustive()
    }
}

impl TextEngine {
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            book: FontBook::new(),
            fallback_metrics: FixedAdvanceMeasure::default(),
            measure_cache: HashMap::new(),
        }
    }

    pub fn book(&self) -> &FontBook {
        &self.book
    }

    pub fn has_fonts(&self) -> bool {
        !self.book.is_empty()
    }

    /// Register every face in a TTF/OTF/TTC file. Returns the number of faces added.
    pub fn register_font_bytes(&mut self, bytes: Vec<u8>) -> QuotegenxResult<usize> {
        let data = Arc::new(bytes);
        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::new(data.clone()), None);

        let mut added = 0;
        for (family_id, infos) in families {
            let family = self
                .font_ctx
                .collection
                .family_name(family_id)
                .ok_or_else(|| QuotegenxError::font("registered font family has no name"))?
                .to_string();
            for info in infos {
                self.book.add_face(FaceEntry {
                    family: family.clone(),
                    weight: info.weight().value().round().clamp(1.0, 1000.0) as u16,
                    italic: !matches!(info.style(), parley::fontique::FontStyle::Normal),
                    index: info.index(),
                    data: data.clone(),
                });
                added += 1;
            }
        }

        if added == 0 {
            return Err(QuotegenxError::font("no font faces found in font data"));
        }
        Ok(added)
    }

    /// Register all font files in `dir`. Unreadable or invalid files are skipped with a warning.
    #[tracing::instrument(skip(self), fields(dir = %dir.display()))]
    pub fn load_dir(&mut self, dir: &Path) -> QuotegenxResult<usize> {
        let mut added = 0;
        for path in font_files_in(dir)? {
            let result = std::fs::read(&path)
                .map_err(|e| QuotegenxError::font(format!("read {}: {e}", path.display())))
                .and_then(|bytes| self.register_font_bytes(bytes));
            match result {
                Ok(n) => added += n,
                Err(err) => tracing::warn!(path = %path.display(), %err, "skipping font file"),
            }
        }
        tracing::debug!(faces = added, "fonts loaded");
        Ok(added)
    }

    /// Load fonts from `$QUOTEGENX_FONT_DIR` when it is set.
    pub fn load_env_fonts(&mut self) -> QuotegenxResult<usize> {
        match std::env::var_os(FONT_DIR_ENV) {
            Some(dir) if !dir.is_empty() => self.load_dir(Path::new(&dir)),
            _ => Ok(0),
        }
    }

    /// Resolve the face `font` will be measured and drawn with.
    ///
    /// Must succeed before any measurement that should use real metrics; on a fallback face the
    /// caller is told via [`ResolvedFace::fallback`] and a warning is logged.
    pub fn ensure_ready(&mut self, font: &FontSpec) -> QuotegenxResult<ResolvedFace> {
        let resolved = self.book.resolve(font).ok_or_else(|| {
            QuotegenxError::font(format!("no fonts registered to satisfy `{font}`"))
        })?;
        if resolved.fallback {
            tracing::warn!(
                requested = %font.family,
                using = %resolved.face.family,
                "font family unavailable, using fallback face"
            );
        }
        Ok(resolved)
    }

    /// Shape `text` on a single line.
    pub fn shape_line(&mut self, font: &FontSpec, text: &str) -> QuotegenxResult<ShapedLine> {
        let face = self.ensure_ready(font)?;
        let layout = self.build_layout(&face, font.size_px, text)?;

        let mut glyphs = Vec::new();
        for line in layout.lines() {
            let baseline = line.metrics().baseline;
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                glyphs.extend(run.positioned_glyphs().map(|g| ShapedGlyph {
                    id: g.id,
                    x: g.x,
                    y: g.y - baseline,
                }));
            }
        }

        Ok(ShapedLine {
            glyphs,
            width: f64::from(layout.full_width()),
            size_px: font.size_px,
            face,
        })
    }

    fn build_layout(
        &mut self,
        face: &ResolvedFace,
        size_px: f32,
        text: &str,
    ) -> QuotegenxResult<parley::Layout<()>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(QuotegenxError::validation(
                "font size must be finite and > 0",
            ));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(face.face.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::FontWeight(
            parley::style::FontWeight::new(f32::from(face.face.weight)),
        ));
        if face.face.italic {
            builder.push_default(parley::style::StyleProperty::FontStyle(
                parley::style::FontStyle::Italic,
            ));
        }

        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

impl TextMeasure for TextEngine {
    /// Shaped advance width, or fixed-advance metrics when no font can be resolved.
    fn measure(&mut self, font: &FontSpec, text: &str) -> f64 {
        let Some(face) = self.book.resolve(font) else {
            return self.fallback_metrics.measure(font, text);
        };

        let key = (face.slot, font.size_px.to_bits(), text.to_string());
        if let Some(w) = self.measure_cache.get(&key) {
            return *w;
        }

        let width = match self.build_layout(&face, font.size_px, text) {
            Ok(layout) => f64::from(layout.full_width()),
            Err(err) => {
                tracing::warn!(%err, "text measurement failed, using fallback metrics");
                return self.fallback_metrics.measure(font, text);
            }
        };
        if self.measure_cache.len() >= MEASURE_CACHE_LIMIT {
            self.measure_cache.clear();
        }
        self.measure_cache.insert(key, width);
        width
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/engine.rs"]
mod tests;
