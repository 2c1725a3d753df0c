//! Generation cycles: one snapshot in, one ordered batch out
//!
//! A glyph cycle resolves the font once, measures every symbol to fix the
//! shared baseline, then rasterizes the symbols in sequence order. A progress
//! cycle evaluates the shape once per frame fraction. An item the backend
//! cannot draw is recorded as skipped and the rest of the batch continues.

use std::sync::Arc;

use wfsprite_core::{
    config::{GlyphSnapshot, ProgressSnapshot},
    error::{Result, SpriteError, ValidationError},
    sequence::label_for,
    shape::{frame_fractions, progress_label},
    traits::{FontRef, Shaper},
    types::{Batch, BatchMode, GeneratedItem, SkippedItem},
};
use wfsprite_fontdb::{FontResolver, StyleRequest};
use wfsprite_render_skia::{
    glyph::GlyphDecoration, svg::svg_description, FontMeasurer, FontMetricsResolver,
    GlyphRasterizer, GlyphStyle, Outliner, ProgressShapeRasterizer,
};
use wfsprite_shape_hr::HarfrustShaper;

/// The frozen input of one cycle
#[derive(Debug, Clone, PartialEq)]
pub enum CycleRequest {
    Glyphs(GlyphSnapshot),
    Progress(ProgressSnapshot),
}

impl CycleRequest {
    pub fn mode(&self) -> BatchMode {
        match self {
            CycleRequest::Glyphs(_) => BatchMode::Glyphs,
            CycleRequest::Progress(_) => BatchMode::Progress,
        }
    }
}

/// Runs generation cycles against one font database and shaper
pub struct Engine {
    resolver: FontResolver,
    shaper: Arc<dyn Shaper>,
}

impl Engine {
    /// Start building an engine
    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    /// System fonts and harfrust shaping
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// The font database, e.g. to load extra font files
    pub fn resolver_mut(&mut self) -> &mut FontResolver {
        &mut self.resolver
    }

    /// Run whichever cycle `request` describes
    pub fn run(&mut self, request: &CycleRequest) -> Result<Batch> {
        match request {
            CycleRequest::Glyphs(snapshot) => self.generate_glyphs(snapshot),
            CycleRequest::Progress(snapshot) => self.generate_progress(snapshot),
        }
    }

    /// One texture per symbol, all sharing one baseline
    pub fn generate_glyphs(&mut self, snapshot: &GlyphSnapshot) -> Result<Batch> {
        if snapshot.symbols.is_empty() {
            return Err(ValidationError::EmptySequence.into());
        }

        let resolved = self.resolver.resolve(&StyleRequest::new(
            snapshot.font_family.as_str(),
            snapshot.bold,
            snapshot.italic,
        ))?;
        let style = GlyphStyle {
            size: snapshot.font_size,
            features: snapshot.features.clone(),
            variations: resolved.variations(&snapshot.variations, snapshot.weight_pinned),
            synthetic_bold: resolved.synthesis.bold,
            synthetic_italic: resolved.synthesis.italic,
        };
        let font: Arc<dyn FontRef> = resolved.font.clone();
        let outliner = Outliner::new(font, self.shaper.as_ref(), style);

        let measurer = FontMeasurer::new(&outliner);
        let baseline = FontMetricsResolver::resolve(
            &measurer,
            &snapshot.symbols,
            snapshot.height,
            snapshot.v_offset,
        )?;

        let rasterizer =
            GlyphRasterizer::new(&outliner, snapshot.width, snapshot.height, snapshot.color)
                .with_decoration(GlyphDecoration {
                    underline: snapshot.underline,
                    outline_only: snapshot.outline_only,
                    outline_thickness: snapshot.outline_thickness,
                })
                .with_h_offset(snapshot.h_offset);

        let mut items = Vec::with_capacity(snapshot.symbols.len());
        let mut skipped = Vec::new();
        for (index, symbol) in snapshot.symbols.iter().enumerate() {
            let label = label_for(symbol);
            match rasterizer.rasterize(symbol, baseline) {
                Ok(raster) => {
                    let svg = match svg_description(snapshot, &resolved.family, symbol, baseline) {
                        Ok(svg) => Some(svg),
                        Err(e) => {
                            log::debug!("No vector description for {label}: {e}");
                            None
                        },
                    };
                    items.push(GeneratedItem {
                        index,
                        source_symbol: Some(symbol.clone()),
                        label,
                        raster,
                        svg,
                    });
                },
                Err(e) => skipped.push(skip(index, label, &e)),
            }
        }

        log::info!(
            "Generated {} glyph textures with '{}' (common_y {:.2}, {} skipped)",
            items.len(),
            resolved.family,
            baseline.common_y,
            skipped.len()
        );
        Ok(Batch {
            mode: BatchMode::Glyphs,
            items,
            skipped,
            baseline: Some(baseline),
            prefix: snapshot.prefix.clone(),
            suffix: snapshot.suffix.clone(),
        })
    }

    /// `steps + 1` frames from empty to full
    pub fn generate_progress(&self, snapshot: &ProgressSnapshot) -> Result<Batch> {
        let rasterizer = ProgressShapeRasterizer::new(snapshot.width, snapshot.height);

        let fractions = frame_fractions(snapshot.steps);
        let mut items = Vec::with_capacity(fractions.len());
        let mut skipped = Vec::new();
        for (index, p) in fractions.into_iter().enumerate() {
            let label = progress_label(p);
            match rasterizer.rasterize(&snapshot.shape, &snapshot.fill, snapshot.background, p) {
                Ok(raster) => items.push(GeneratedItem {
                    index,
                    source_symbol: None,
                    label,
                    raster,
                    svg: None,
                }),
                Err(e) => skipped.push(skip(index, label, &e)),
            }
        }

        log::info!(
            "Generated {} {} progress frames ({} skipped)",
            items.len(),
            snapshot.shape.kind(),
            skipped.len()
        );
        Ok(Batch {
            mode: BatchMode::Progress,
            items,
            skipped,
            baseline: None,
            prefix: snapshot.prefix.clone(),
            suffix: snapshot.suffix.clone(),
        })
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

fn skip(index: usize, label: String, error: &SpriteError) -> SkippedItem {
    log::warn!("Skipping item {index} ({label}): {error}");
    SkippedItem {
        index,
        label,
        reason: error.to_string(),
    }
}

/// Assemble an engine piece by piece
#[derive(Default)]
pub struct EngineBuilder {
    resolver: Option<FontResolver>,
    shaper: Option<Arc<dyn Shaper>>,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Font database to resolve families against (default: system fonts)
    pub fn resolver(mut self, resolver: FontResolver) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Who turns symbols into glyphs (default: harfrust)
    pub fn shaper(mut self, shaper: Arc<dyn Shaper>) -> Self {
        self.shaper = Some(shaper);
        self
    }

    pub fn build(self) -> Engine {
        Engine {
            resolver: self.resolver.unwrap_or_else(FontResolver::system),
            shaper: self.shaper.unwrap_or_else(|| Arc::new(HarfrustShaper::new())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wfsprite_core::{
        config::{GlyphSpriteConfig, ProgressTextureConfig},
        error::FontLoadError,
    };

    fn offline_engine() -> Engine {
        Engine::builder().resolver(FontResolver::default()).build()
    }

    #[test]
    fn default_progress_cycle_has_eleven_frames() {
        let snapshot = ProgressTextureConfig::default().snapshot().unwrap();
        let batch = offline_engine().generate_progress(&snapshot).unwrap();
        assert_eq!(batch.mode, BatchMode::Progress);
        assert_eq!(batch.len(), 11);
        assert!(batch.skipped.is_empty());
        assert!(batch.baseline.is_none());
        let indices: Vec<usize> = batch.items.iter().map(|i| i.index).collect();
        assert_eq!(indices, (0..=10).collect::<Vec<_>>());
        assert_eq!(batch.items[0].label, "0%");
        assert_eq!(batch.items[10].label, "100%");
        for item in &batch.items {
            assert_eq!((item.raster.width, item.raster.height), (100, 100));
        }
    }

    #[test]
    fn progress_cycle_is_deterministic() {
        let snapshot = ProgressTextureConfig::default().snapshot().unwrap();
        let engine = offline_engine();
        let a = engine.generate_progress(&snapshot).unwrap();
        let b = engine.generate_progress(&snapshot).unwrap();
        for (x, y) in a.items.iter().zip(&b.items) {
            assert_eq!(x.raster, y.raster);
        }
    }

    #[test]
    fn glyph_cycle_without_fonts_fails_to_load() {
        let snapshot = GlyphSpriteConfig::default().snapshot().unwrap();
        let err = offline_engine().generate_glyphs(&snapshot).unwrap_err();
        assert!(matches!(err, SpriteError::FontLoad(FontLoadError::SystemFontNotFound(_))));
    }

    #[test]
    fn empty_symbol_list_is_rejected() {
        let mut snapshot = GlyphSpriteConfig::default().snapshot().unwrap();
        snapshot.symbols.clear();
        let err = offline_engine().generate_glyphs(&snapshot).unwrap_err();
        assert!(matches!(err, SpriteError::Validation(ValidationError::EmptySequence)));
    }

    #[test]
    fn requests_know_their_mode() {
        let glyphs = CycleRequest::Glyphs(GlyphSpriteConfig::default().snapshot().unwrap());
        let progress =
            CycleRequest::Progress(ProgressTextureConfig::default().snapshot().unwrap());
        assert_eq!(glyphs.mode(), BatchMode::Glyphs);
        assert_eq!(progress.mode(), BatchMode::Progress);
    }
}
