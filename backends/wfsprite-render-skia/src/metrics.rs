//! One shared baseline for a whole glyph batch
//!
//! Every symbol is measured from its real ink, not from the font's nominal
//! ascender. The tallest ascent and the deepest descent of the batch are
//! centered in the box, so mixed sets like `0-9:` and `Ag` line up on one
//! baseline and never clip.

use wfsprite_core::{
    error::{Result, ValidationError},
    traits::Measurer,
    types::{Baseline, InkExtent},
};

use crate::outline::Outliner;

/// Measures ink through the same outlines the rasterizer draws
pub struct FontMeasurer<'a> {
    outliner: &'a Outliner<'a>,
}

impl<'a> FontMeasurer<'a> {
    pub fn new(outliner: &'a Outliner<'a>) -> Self {
        Self { outliner }
    }
}

impl Measurer for FontMeasurer<'_> {
    fn ink_extent(&self, symbol: &str) -> Result<InkExtent> {
        let outline = self.outliner.outline(symbol)?;
        // Synthetic bold grows the ink by half the stroke on every side
        let grow = self.outliner.style().bold_stroke() / 2.0;
        Ok(match outline.ink {
            Some(ink) => InkExtent {
                ascent: (ink.y1 as f32 + grow).max(0.0),
                descent: (-ink.y0 as f32 + grow).max(0.0),
                advance: outline.advance,
            },
            None => InkExtent {
                ascent: 0.0,
                descent: 0.0,
                advance: outline.advance,
            },
        })
    }
}

/// Finds the baseline shared by every texture of a cycle
pub struct FontMetricsResolver;

impl FontMetricsResolver {
    /// Measure every symbol and center the combined ink extent in a box of `height`
    ///
    /// A symbol that cannot be measured is left out of the maxima.
    pub fn resolve(
        measurer: &dyn Measurer,
        symbols: &[String],
        height: u32,
        v_offset: f32,
    ) -> Result<Baseline> {
        if symbols.is_empty() {
            return Err(ValidationError::EmptySequence.into());
        }

        let mut max_ascent = 0.0f32;
        let mut max_descent = 0.0f32;
        for symbol in symbols {
            match measurer.ink_extent(symbol) {
                Ok(extent) => {
                    max_ascent = max_ascent.max(extent.ascent);
                    max_descent = max_descent.max(extent.descent);
                },
                Err(e) => log::warn!("Could not measure {symbol:?}: {e}"),
            }
        }

        let common_y = common_y(max_ascent, max_descent, height, v_offset);
        log::debug!(
            "Baseline for {} symbols: ascent {:.2}, descent {:.2}, common_y {:.2}",
            symbols.len(),
            max_ascent,
            max_descent,
            common_y
        );
        Ok(Baseline { common_y })
    }
}

/// `(H - (ascent + descent)) / 2 + ascent + v_offset`
pub fn common_y(max_ascent: f32, max_descent: f32, height: u32, v_offset: f32) -> f32 {
    let total = max_ascent + max_descent;
    (height as f32 - total) / 2.0 + max_ascent + v_offset
}
