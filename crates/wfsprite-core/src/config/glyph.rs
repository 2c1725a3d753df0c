//! Character-sprite mode settings

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{parse_bool, parse_dimension, parse_offset, parse_positive, FieldSet};
use crate::axes::{find_axis, VariationAxisController, AXES};
use crate::color::Color;
use crate::error::ValidationError;
use crate::sequence::tokenize;

/// Default outline ring width in pixels
pub const DEFAULT_OUTLINE_THICKNESS: f32 = 2.0;

/// File prefix used when the configured one is empty
pub const DEFAULT_GLYPH_PREFIX: &str = "char";

/// OpenType feature toggles exposed to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureFlags {
    pub tnum: bool,
    pub lnum: bool,
    pub onum: bool,
    pub kern: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            tnum: true,
            lnum: false,
            onum: false,
            kern: true,
        }
    }
}

impl FeatureFlags {
    fn entries(&self) -> [(&'static str, bool); 4] {
        [
            ("tnum", self.tnum),
            ("lnum", self.lnum),
            ("onum", self.onum),
            ("kern", self.kern),
        ]
    }

    /// Every toggle with an explicit on/off value for the shaper
    pub fn shaping_features(&self) -> Vec<(String, u32)> {
        self.entries()
            .iter()
            .map(|(tag, on)| (tag.to_string(), u32::from(*on)))
            .collect()
    }

    /// CSS `font-feature-settings` value: enabled toggles, or `normal`
    pub fn settings_string(&self) -> String {
        let on: Vec<String> = self
            .entries()
            .iter()
            .filter(|(_, on)| *on)
            .map(|(tag, _)| format!("\"{tag}\" 1"))
            .collect();
        if on.is_empty() {
            "normal".to_string()
        } else {
            on.join(", ")
        }
    }
}

/// Draft settings of the character-sprite mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlyphSpriteConfig {
    /// Family name, or an `http(s)://` stylesheet URL
    pub font_family: String,
    pub font_size: f32,
    pub color: Color,
    pub width: u32,
    pub height: u32,
    pub sequence: String,
    pub prefix: String,
    pub suffix: String,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub outline_only: bool,
    pub outline_thickness: f32,
    pub features: FeatureFlags,
    pub variations: VariationAxisController,
    pub h_offset: f32,
    pub v_offset: f32,
}

impl Default for GlyphSpriteConfig {
    fn default() -> Self {
        Self {
            font_family: "Inter".to_string(),
            font_size: 48.0,
            color: Color::white(),
            width: 40,
            height: 60,
            sequence: "0123456789-".to_string(),
            prefix: DEFAULT_GLYPH_PREFIX.to_string(),
            suffix: String::new(),
            bold: false,
            italic: false,
            underline: false,
            outline_only: false,
            outline_thickness: DEFAULT_OUTLINE_THICKNESS,
            features: FeatureFlags::default(),
            variations: VariationAxisController::default(),
            h_offset: 0.0,
            v_offset: 0.0,
        }
    }
}

/// Every externally settable field of [`GlyphSpriteConfig`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlyphField {
    FontFamily,
    FontSize,
    Color,
    Width,
    Height,
    Sequence,
    Prefix,
    Suffix,
    Bold,
    Italic,
    Underline,
    OutlineOnly,
    OutlineThickness,
    Tnum,
    Lnum,
    Onum,
    Kern,
    VariableFont,
    /// `axis.<tag>` for one catalog axis
    Axis(&'static str),
    HOffset,
    VOffset,
}

impl GlyphField {
    const SCALARS: [GlyphField; 20] = [
        GlyphField::FontFamily,
        GlyphField::FontSize,
        GlyphField::Color,
        GlyphField::Width,
        GlyphField::Height,
        GlyphField::Sequence,
        GlyphField::Prefix,
        GlyphField::Suffix,
        GlyphField::Bold,
        GlyphField::Italic,
        GlyphField::Underline,
        GlyphField::OutlineOnly,
        GlyphField::OutlineThickness,
        GlyphField::Tnum,
        GlyphField::Lnum,
        GlyphField::Onum,
        GlyphField::Kern,
        GlyphField::VariableFont,
        GlyphField::HOffset,
        GlyphField::VOffset,
    ];

    /// All fields, axes last in catalog order
    pub fn all() -> Vec<GlyphField> {
        let mut fields = Self::SCALARS.to_vec();
        fields.extend(AXES.iter().map(|axis| GlyphField::Axis(axis.tag)));
        fields
    }

    pub fn name(&self) -> String {
        let name = match self {
            GlyphField::FontFamily => "font_family",
            GlyphField::FontSize => "font_size",
            GlyphField::Color => "color",
            GlyphField::Width => "width",
            GlyphField::Height => "height",
            GlyphField::Sequence => "sequence",
            GlyphField::Prefix => "prefix",
            GlyphField::Suffix => "suffix",
            GlyphField::Bold => "bold",
            GlyphField::Italic => "italic",
            GlyphField::Underline => "underline",
            GlyphField::OutlineOnly => "outline_only",
            GlyphField::OutlineThickness => "outline_thickness",
            GlyphField::Tnum => "tnum",
            GlyphField::Lnum => "lnum",
            GlyphField::Onum => "onum",
            GlyphField::Kern => "kern",
            GlyphField::VariableFont => "variable_font",
            GlyphField::Axis(tag) => return format!("axis.{tag}"),
            GlyphField::HOffset => "h_offset",
            GlyphField::VOffset => "v_offset",
        };
        name.to_string()
    }
}

impl fmt::Display for GlyphField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl FromStr for GlyphField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(tag) = s.strip_prefix("axis.") {
            return find_axis(tag)
                .map(|axis| GlyphField::Axis(axis.tag))
                .ok_or_else(|| ValidationError::UnknownAxis(tag.to_string()));
        }
        Self::SCALARS
            .iter()
            .copied()
            .find(|field| field.name() == s)
            .ok_or_else(|| ValidationError::UnknownField(s.to_string()))
    }
}

impl GlyphSpriteConfig {
    /// Parse `raw` into one field; the draft is untouched on error
    pub fn set(&mut self, field: GlyphField, raw: &str) -> Result<(), ValidationError> {
        match field {
            GlyphField::FontFamily => self.font_family = raw.trim().to_string(),
            GlyphField::FontSize => self.font_size = parse_positive("font_size", raw)?,
            GlyphField::Color => self.color = raw.parse()?,
            GlyphField::Width => self.width = parse_dimension("width", raw)?,
            GlyphField::Height => self.height = parse_dimension("height", raw)?,
            GlyphField::Sequence => self.sequence = raw.to_string(),
            GlyphField::Prefix => self.prefix = raw.to_string(),
            GlyphField::Suffix => self.suffix = raw.to_string(),
            GlyphField::Bold => self.bold = parse_bool("bold", raw)?,
            GlyphField::Italic => self.italic = parse_bool("italic", raw)?,
            GlyphField::Underline => self.underline = parse_bool("underline", raw)?,
            GlyphField::OutlineOnly => self.outline_only = parse_bool("outline_only", raw)?,
            GlyphField::OutlineThickness => {
                self.outline_thickness = parse_positive("outline_thickness", raw)?
            },
            GlyphField::Tnum => self.features.tnum = parse_bool("tnum", raw)?,
            GlyphField::Lnum => self.features.lnum = parse_bool("lnum", raw)?,
            GlyphField::Onum => self.features.onum = parse_bool("onum", raw)?,
            GlyphField::Kern => self.features.kern = parse_bool("kern", raw)?,
            GlyphField::VariableFont => {
                if parse_bool("variable_font", raw)? {
                    self.variations.enable();
                } else {
                    self.variations.disable();
                }
            },
            GlyphField::Axis(tag) => {
                self.variations.set(tag, raw)?;
            },
            GlyphField::HOffset => self.h_offset = parse_offset(raw),
            GlyphField::VOffset => self.v_offset = parse_offset(raw),
        }
        Ok(())
    }

    /// Validate and freeze the values one cycle reads
    pub fn snapshot(&self) -> Result<GlyphSnapshot, ValidationError> {
        if !(self.font_size.is_finite() && self.font_size > 0.0) {
            return Err(ValidationError::NotPositive {
                field: "font_size",
                value: self.font_size as f64,
            });
        }
        if self.width == 0 {
            return Err(ValidationError::NotPositive {
                field: "width",
                value: 0.0,
            });
        }
        if self.height == 0 {
            return Err(ValidationError::NotPositive {
                field: "height",
                value: 0.0,
            });
        }
        if self.outline_only
            && !(self.outline_thickness.is_finite() && self.outline_thickness > 0.0)
        {
            return Err(ValidationError::NotPositive {
                field: "outline_thickness",
                value: self.outline_thickness as f64,
            });
        }

        let symbols = tokenize(&self.sequence);
        if symbols.is_empty() {
            return Err(ValidationError::EmptySequence);
        }

        let prefix = if self.prefix.is_empty() {
            DEFAULT_GLYPH_PREFIX.to_string()
        } else {
            self.prefix.clone()
        };

        Ok(GlyphSnapshot {
            font_family: self.font_family.clone(),
            font_size: self.font_size,
            color: self.color,
            width: self.width,
            height: self.height,
            symbols,
            prefix,
            suffix: self.suffix.clone(),
            bold: self.bold,
            italic: self.italic,
            underline: self.underline,
            outline_only: self.outline_only,
            outline_thickness: self.outline_thickness,
            features: self.features.shaping_features(),
            feature_settings: self.features.settings_string(),
            variations: self.variations.active_variations(),
            variation_settings: self.variations.settings_string(),
            weight_pinned: self.variations.pins("wght"),
            h_offset: self.h_offset,
            v_offset: self.v_offset,
        })
    }
}

impl FieldSet for GlyphSpriteConfig {
    fn field_names() -> Vec<String> {
        GlyphField::all().iter().map(GlyphField::name).collect()
    }

    fn set_field(&mut self, name: &str, raw: &str) -> Result<(), ValidationError> {
        let field: GlyphField = name.parse()?;
        self.set(field, raw)
    }
}

/// Immutable per-cycle view of [`GlyphSpriteConfig`]
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphSnapshot {
    pub font_family: String,
    pub font_size: f32,
    pub color: Color,
    pub width: u32,
    pub height: u32,
    pub symbols: Vec<String>,
    pub prefix: String,
    pub suffix: String,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub outline_only: bool,
    pub outline_thickness: f32,
    pub features: Vec<(String, u32)>,
    pub feature_settings: String,
    pub variations: Vec<(String, f32)>,
    pub variation_settings: String,
    /// The user set `wght` explicitly, so bold must not override it
    pub weight_pinned: bool,
    pub h_offset: f32,
    pub v_offset: f32,
}
