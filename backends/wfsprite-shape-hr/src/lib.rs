//! Pure Rust shaping backend using harfrust
//!
//! Every symbol of a glyph batch is shaped once for measuring and once for
//! drawing. User feature toggles (`tnum`, `lnum`, `onum`, `kern`) and the active
//! variation coordinates are handed to harfrust unchanged.

use std::sync::Arc;

use harfrust::{
    Direction as HrDirection, Feature, FontRef as HrFontRef, GlyphBuffer, ShaperData,
    ShaperInstance, Tag, UnicodeBuffer, Variation,
};

use wfsprite_core::{
    error::{Result, ShapingError},
    traits::{FontRef, Shaper},
    types::{Direction, PositionedGlyph, ShapingResult},
    ShapingParams,
};

/// Text shaping powered by harfrust
#[derive(Debug, Default, Clone, Copy)]
pub struct HarfrustShaper;

impl HarfrustShaper {
    pub fn new() -> Self {
        Self
    }

    fn to_hr_direction(dir: Direction) -> HrDirection {
        match dir {
            Direction::LeftToRight => HrDirection::LeftToRight,
            Direction::RightToLeft => HrDirection::RightToLeft,
        }
    }

    /// Parse a 4-character tag string into a harfrust Tag
    fn parse_tag(tag_str: &str) -> Option<Tag> {
        if tag_str.len() == 4 {
            let bytes = tag_str.as_bytes();
            Some(Tag::new(&[bytes[0], bytes[1], bytes[2], bytes[3]]))
        } else {
            log::debug!("Ignoring malformed tag '{tag_str}'");
            None
        }
    }

    /// cmap-only layout for fonts that carry no tables (test doubles)
    fn fallback_shape(
        &self,
        text: &str,
        font: &Arc<dyn FontRef>,
        params: &ShapingParams,
    ) -> ShapingResult {
        let mut glyphs = Vec::new();
        let mut x_offset = 0.0;
        let scale = params.size / font.units_per_em().max(1) as f32;

        for (cluster, ch) in text.char_indices() {
            if let Some(glyph_id) = font.glyph_id(ch) {
                let advance = font.advance_width(glyph_id) * scale;
                glyphs.push(PositionedGlyph {
                    id: glyph_id,
                    x: x_offset,
                    y: 0.0,
                    advance,
                    cluster: cluster as u32,
                });
                x_offset += advance;
            }
        }

        ShapingResult {
            glyphs,
            advance_width: x_offset,
            advance_height: params.size,
            direction: params.direction,
        }
    }

    /// Extract positioned glyphs from harfrust's GlyphBuffer
    fn extract_glyphs(buffer: &GlyphBuffer, ppem: f32, upem: u16) -> (Vec<PositionedGlyph>, f32) {
        let mut glyphs = Vec::new();
        let mut x_offset = 0.0;
        let scale = ppem / upem.max(1) as f32;

        let positions = buffer.glyph_positions();
        let infos = buffer.glyph_infos();

        for (info, pos) in infos.iter().zip(positions.iter()) {
            glyphs.push(PositionedGlyph {
                id: info.glyph_id,
                x: x_offset + (pos.x_offset as f32 * scale),
                y: pos.y_offset as f32 * scale,
                advance: pos.x_advance as f32 * scale,
                cluster: info.cluster,
            });

            x_offset += pos.x_advance as f32 * scale;
        }

        (glyphs, x_offset)
    }
}

impl Shaper for HarfrustShaper {
    fn name(&self) -> &'static str {
        "Harfrust"
    }

    fn shape(
        &self,
        text: &str,
        font: Arc<dyn FontRef>,
        params: &ShapingParams,
    ) -> Result<ShapingResult> {
        if text.is_empty() {
            return Ok(ShapingResult {
                glyphs: Vec::new(),
                advance_width: 0.0,
                advance_height: params.size,
                direction: params.direction,
            });
        }

        let font_data = font.data();
        if font_data.is_empty() {
            return Ok(self.fallback_shape(text, &font, params));
        }

        let hr_font = HrFontRef::new(font_data).map_err(|_| ShapingError::InvalidFont)?;
        let shaper_data = ShaperData::new(&hr_font);

        let instance = if !params.variations.is_empty() {
            let variations: Vec<Variation> = params
                .variations
                .iter()
                .filter_map(|(tag_str, value)| {
                    Self::parse_tag(tag_str).map(|tag| Variation { tag, value: *value })
                })
                .collect();
            Some(ShaperInstance::from_variations(&hr_font, variations))
        } else {
            None
        };

        let mut builder = shaper_data.shaper(&hr_font);
        if let Some(ref inst) = instance {
            builder = builder.instance(Some(inst));
        }
        builder = builder.point_size(Some(params.size));
        let shaper = builder.build();

        let mut buffer = UnicodeBuffer::new();
        buffer.push_str(text);
        buffer.set_direction(Self::to_hr_direction(params.direction));

        let features: Vec<Feature> = params
            .features
            .iter()
            .filter_map(|(name, value)| {
                Self::parse_tag(name).map(|tag| Feature {
                    tag,
                    value: *value,
                    start: 0,
                    end: u32::MAX,
                })
            })
            .collect();

        let output = shaper.shape(buffer, &features);

        let upem = font.units_per_em();
        let (glyphs, advance_width) = Self::extract_glyphs(&output, params.size, upem);
        log::debug!(
            "Shaped {:?} into {} glyphs, advance {:.2}",
            text,
            glyphs.len(),
            advance_width
        );

        Ok(ShapingResult {
            glyphs,
            advance_width,
            advance_height: params.size,
            direction: params.direction,
        })
    }
}
