//! Shaped symbol outlines in pixel space
//!
//! Coordinates are y-up and relative to the pen origin on the alphabetic
//! baseline, exactly as skrifa draws them. Synthetic italic is baked into the
//! path as a horizontal shear; synthetic bold is applied later as a stroke.

use std::sync::Arc;

use kurbo::{BezPath, Rect, Shape};
use skrifa::MetadataProvider;
use wfsprite_core::{
    error::{RenderError, Result},
    traits::{FontRef, Shaper},
    ShapingParams,
};

use crate::build_location;

/// Horizontal shear used when no italic face exists
pub const SYNTHETIC_SKEW: f32 = 0.2;

/// Everything that changes how a symbol's outline looks
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphStyle {
    pub size: f32,
    pub features: Vec<(String, u32)>,
    pub variations: Vec<(String, f32)>,
    pub synthetic_bold: bool,
    pub synthetic_italic: bool,
}

impl GlyphStyle {
    /// Width of the stroke that fakes bold, 0 for real faces
    pub fn bold_stroke(&self) -> f32 {
        if self.synthetic_bold {
            (self.size / 32.0).max(0.5)
        } else {
            0.0
        }
    }
}

/// One symbol traced into a single path
#[derive(Debug, Clone)]
pub struct SymbolOutline {
    pub path: BezPath,
    /// Shaped advance in pixels
    pub advance: f32,
    /// Ink bounds, `None` for blank symbols such as a space
    pub ink: Option<Rect>,
}

/// Shapes symbols and traces their glyph outlines
pub struct Outliner<'a> {
    font: Arc<dyn FontRef>,
    shaper: &'a dyn Shaper,
    style: GlyphStyle,
    location: skrifa::instance::Location,
}

impl<'a> Outliner<'a> {
    pub fn new(font: Arc<dyn FontRef>, shaper: &'a dyn Shaper, style: GlyphStyle) -> Self {
        let location = build_location(&font, &style.variations);
        Self {
            font,
            shaper,
            style,
            location,
        }
    }

    pub fn style(&self) -> &GlyphStyle {
        &self.style
    }

    pub fn font(&self) -> &Arc<dyn FontRef> {
        &self.font
    }

    pub(crate) fn location(&self) -> &skrifa::instance::Location {
        &self.location
    }

    /// Shape `symbol` and trace every glyph into one path
    pub fn outline(&self, symbol: &str) -> Result<SymbolOutline> {
        let params = ShapingParams {
            size: self.style.size,
            features: self.style.features.clone(),
            variations: self.style.variations.clone(),
            ..Default::default()
        };
        let shaped = self.shaper.shape(symbol, self.font.clone(), &params)?;

        let font_ref =
            skrifa::FontRef::new(self.font.data()).map_err(|_| RenderError::InvalidFont)?;
        let outlines = font_ref.outline_glyphs();
        let size = skrifa::instance::Size::new(self.style.size);
        let skew = if self.style.synthetic_italic {
            SYNTHETIC_SKEW as f64
        } else {
            0.0
        };

        let mut path = BezPath::new();
        for glyph in &shaped.glyphs {
            let outline = outlines
                .get(skrifa::GlyphId::new(glyph.id))
                .ok_or(RenderError::GlyphNotFound(glyph.id))?;
            let mut pen = PathPen {
                path: &mut path,
                offset_x: glyph.x as f64,
                offset_y: glyph.y as f64,
                skew,
            };
            let settings = skrifa::outline::DrawSettings::unhinted(size, &self.location);
            outline
                .draw(settings, &mut pen)
                .map_err(|_| RenderError::OutlineExtractionFailed)?;
        }

        let ink = if path.elements().is_empty() {
            None
        } else {
            let bbox = path.bounding_box();
            if !(bbox.x0.is_finite()
                && bbox.y0.is_finite()
                && bbox.x1.is_finite()
                && bbox.y1.is_finite())
            {
                return Err(RenderError::PathBuildingFailed.into());
            }
            Some(bbox)
        };

        log::debug!(
            "Outlined {:?}: {} glyphs, advance {:.2}, ink {:?}",
            symbol,
            shaped.glyphs.len(),
            shaped.advance_width,
            ink
        );

        Ok(SymbolOutline {
            path,
            advance: shaped.advance_width,
            ink,
        })
    }
}

/// Bridge between skrifa's outline commands and kurbo's path format
///
/// Places each glyph at its shaped position and applies the italic shear.
struct PathPen<'a> {
    path: &'a mut BezPath,
    offset_x: f64,
    offset_y: f64,
    skew: f64,
}

impl PathPen<'_> {
    fn map(&self, x: f32, y: f32) -> (f64, f64) {
        let y = y as f64 + self.offset_y;
        (x as f64 + self.offset_x + self.skew * y, y)
    }
}

impl skrifa::outline::OutlinePen for PathPen<'_> {
    fn move_to(&mut self, x: f32, y: f32) {
        let p = self.map(x, y);
        self.path.move_to(p);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let p = self.map(x, y);
        self.path.line_to(p);
    }

    fn quad_to(&mut self, cx0: f32, cy0: f32, x: f32, y: f32) {
        let c = self.map(cx0, cy0);
        let p = self.map(x, y);
        self.path.quad_to(c, p);
    }

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        let c0 = self.map(cx0, cy0);
        let c1 = self.map(cx1, cy1);
        let p = self.map(x, y);
        self.path.curve_to(c0, c1, p);
    }

    fn close(&mut self) {
        self.path.close_path();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skrifa::outline::OutlinePen;

    #[test]
    fn pen_applies_offset_and_shear() {
        let mut path = BezPath::new();
        let mut pen = PathPen {
            path: &mut path,
            offset_x: 10.0,
            offset_y: 0.0,
            skew: 0.2,
        };
        pen.move_to(0.0, 0.0);
        pen.line_to(0.0, 10.0);
        pen.close();
        let bbox = path.bounding_box();
        assert!((bbox.x0 - 10.0).abs() < 1e-9);
        assert!((bbox.x1 - 12.0).abs() < 1e-9);
        assert!((bbox.y1 - 10.0).abs() < 1e-9);
    }

    #[test]
    fn bold_stroke_scales_with_size() {
        let mut style = GlyphStyle {
            size: 64.0,
            features: Vec::new(),
            variations: Vec::new(),
            synthetic_bold: false,
            synthetic_italic: false,
        };
        assert_eq!(style.bold_stroke(), 0.0);
        style.synthetic_bold = true;
        assert_eq!(style.bold_stroke(), 2.0);
    }
}
