//! Glyph sprite rasterization
//!
//! Each symbol is drawn into its own fixed `W x H` box. The shaped run is
//! centered horizontally on `W/2 + h_offset`; its alphabetic baseline sits on
//! the batch-wide `common_y`, so every sprite of a sequence lines up.
//!
//! Coverage is built in a [`Mask`] first. Synthetic bold and underline add to
//! the mask, outline-only mode turns it into a ring, and only then is the
//! color applied.

use skrifa::MetadataProvider;
use tiny_skia::{FillRule, LineJoin, Mask, PathBuilder, Rect, Stroke, Transform};
use wfsprite_core::{
    error::{RenderError, Result},
    types::{Baseline, BitmapData, BitmapFormat},
    Color,
};

use crate::{morphology, outline::Outliner, to_skia_path};

/// Decorations applied on top of the outline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphDecoration {
    pub underline: bool,
    pub outline_only: bool,
    /// Ring width in pixels when `outline_only` is set
    pub outline_thickness: f32,
}

impl Default for GlyphDecoration {
    fn default() -> Self {
        Self {
            underline: false,
            outline_only: false,
            outline_thickness: 2.0,
        }
    }
}

/// Draws single symbols into fixed-size RGBA boxes
pub struct GlyphRasterizer<'a> {
    outliner: &'a Outliner<'a>,
    width: u32,
    height: u32,
    color: Color,
    decoration: GlyphDecoration,
    h_offset: f32,
}

impl<'a> GlyphRasterizer<'a> {
    pub fn new(outliner: &'a Outliner<'a>, width: u32, height: u32, color: Color) -> Self {
        Self {
            outliner,
            width,
            height,
            color,
            decoration: GlyphDecoration::default(),
            h_offset: 0.0,
        }
    }

    pub fn with_decoration(mut self, decoration: GlyphDecoration) -> Self {
        self.decoration = decoration;
        self
    }

    pub fn with_h_offset(mut self, h_offset: f32) -> Self {
        self.h_offset = h_offset;
        self
    }

    /// Render `symbol` with its baseline on `baseline.common_y`
    pub fn rasterize(&self, symbol: &str, baseline: Baseline) -> Result<BitmapData> {
        let (width, height) = (self.width, self.height);
        let mut mask = Mask::new(width, height).ok_or(RenderError::InvalidDimensions { width, height })?;

        let outline = self.outliner.outline(symbol)?;
        let origin_x = width as f32 / 2.0 + self.h_offset - outline.advance / 2.0;
        // Font space is y-up; flip it onto the box and move the pen origin to the baseline
        let transform = Transform::from_scale(1.0, -1.0).post_translate(origin_x, baseline.common_y);

        if let Some(path) = to_skia_path(&outline.path) {
            mask.fill_path(&path, FillRule::Winding, true, transform);

            let bold = self.outliner.style().bold_stroke();
            if bold > 0.0 {
                let stroke = Stroke {
                    width: bold,
                    line_join: LineJoin::Round,
                    ..Default::default()
                };
                let grown = path.stroke(&stroke, 1.0).ok_or(RenderError::PathBuildingFailed)?;
                mask.fill_path(&grown, FillRule::Winding, true, transform);
            }
        }

        if self.decoration.underline {
            self.draw_underline(&mut mask, origin_x, outline.advance, baseline.common_y);
        }

        if self.decoration.outline_only {
            morphology::outline_ring(&mut mask, self.decoration.outline_thickness);
        }

        Ok(colorize(&mask, self.color))
    }

    fn draw_underline(&self, mask: &mut Mask, origin_x: f32, advance: f32, common_y: f32) {
        let style = self.outliner.style();
        let (offset, thickness) = underline_metrics(self.outliner, style.size);
        let rect = match Rect::from_xywh(origin_x, common_y - offset, advance.max(1.0), thickness) {
            Some(rect) => rect,
            None => {
                log::debug!("Skipping degenerate underline");
                return;
            },
        };
        let path = PathBuilder::from_rect(rect);
        mask.fill_path(&path, FillRule::Winding, true, Transform::identity());
    }
}

/// Underline position and thickness in pixels, from the font or a size-based guess
fn underline_metrics(outliner: &Outliner<'_>, size: f32) -> (f32, f32) {
    let from_font = skrifa::FontRef::new(outliner.font().data())
        .ok()
        .and_then(|font| {
            font.metrics(skrifa::instance::Size::new(size), outliner.location())
                .underline
        })
        .filter(|decoration| decoration.thickness > 0.0);
    match from_font {
        Some(decoration) => (decoration.offset, decoration.thickness),
        None => (-size * 0.1, (size / 20.0).max(1.0)),
    }
}

/// Straight-alpha RGBA from coverage and one color
fn colorize(mask: &Mask, color: Color) -> BitmapData {
    let mut data = Vec::with_capacity(mask.data().len() * 4);
    for &coverage in mask.data() {
        let alpha = ((coverage as u32 * color.a as u32 + 127) / 255) as u8;
        if alpha == 0 {
            data.extend_from_slice(&[0, 0, 0, 0]);
        } else {
            data.extend_from_slice(&[color.r, color.g, color.b, alpha]);
        }
    }
    BitmapData {
        width: mask.width(),
        height: mask.height(),
        format: BitmapFormat::Rgba8,
        data,
    }
}
