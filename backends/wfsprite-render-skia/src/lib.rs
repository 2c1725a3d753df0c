//! Skia Renderer - every wfsprite texture is rasterized here via tiny-skia
//!
//! Two kinds of textures come out of this crate:
//!
//! - **Glyph sprites**: a shaped symbol's skrifa outlines, anchored on the
//!   batch baseline, optionally emboldened, skewed, underlined or reduced to
//!   an outline ring ([`glyph`])
//! - **Progress frames**: an arc, disk or segment at one progress fraction,
//!   with a solid or gradient foreground over an optional track ([`progress`])
//!
//! The shared baseline of a glyph batch is found by [`metrics`].

pub mod glyph;
pub mod gradient;
pub mod metrics;
pub mod morphology;
pub mod outline;
pub mod progress;
pub mod svg;

pub use glyph::GlyphRasterizer;
pub use metrics::{FontMeasurer, FontMetricsResolver};
pub use outline::{GlyphStyle, Outliner};
pub use progress::ProgressShapeRasterizer;

use std::sync::Arc;

use kurbo::{BezPath, PathEl};
use tiny_skia::{Path, PathBuilder, Pixmap};
use wfsprite_core::{
    traits::FontRef,
    types::{BitmapData, BitmapFormat},
};

/// Build variation location from the active axis values
pub(crate) fn build_location(
    font: &Arc<dyn FontRef>,
    variations: &[(String, f32)],
) -> skrifa::instance::Location {
    use skrifa::MetadataProvider;

    if variations.is_empty() {
        return skrifa::instance::Location::default();
    }

    let font_ref = match skrifa::FontRef::new(font.data()) {
        Ok(f) => f,
        Err(_) => return skrifa::instance::Location::default(),
    };

    let settings: Vec<(&str, f32)> = variations
        .iter()
        .map(|(tag, value)| (tag.as_str(), *value))
        .collect();

    font_ref.axes().location(settings)
}

/// Translate kurbo's path format into tiny-skia's native format
pub(crate) fn to_skia_path(path: &BezPath) -> Option<Path> {
    let mut builder = PathBuilder::new();
    for element in path.elements() {
        match *element {
            PathEl::MoveTo(p) => builder.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => builder.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(ctrl, end) => {
                builder.quad_to(ctrl.x as f32, ctrl.y as f32, end.x as f32, end.y as f32)
            },
            PathEl::CurveTo(c1, c2, end) => builder.cubic_to(
                c1.x as f32,
                c1.y as f32,
                c2.x as f32,
                c2.y as f32,
                end.x as f32,
                end.y as f32,
            ),
            PathEl::ClosePath => builder.close(),
        }
    }
    builder.finish()
}

/// Convert a premultiplied pixmap into straight RGBA output
pub(crate) fn pixmap_to_bitmap(pixmap: &Pixmap) -> BitmapData {
    let mut data = Vec::with_capacity(pixmap.pixels().len() * 4);
    for px in pixmap.pixels() {
        let c = px.demultiply();
        if c.alpha() == 0 {
            data.extend_from_slice(&[0, 0, 0, 0]);
        } else {
            data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }
    }
    BitmapData {
        width: pixmap.width(),
        height: pixmap.height(),
        format: BitmapFormat::Rgba8,
        data,
    }
}
