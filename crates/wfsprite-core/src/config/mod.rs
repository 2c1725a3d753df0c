//! Per-mode configuration drafts and their immutable snapshots
//!
//! A draft is mutated freely between cycles: loaded from JSON, then patched with
//! `field=value` overrides. `snapshot()` validates it and freezes the values a
//! generation cycle reads.

pub mod glyph;
pub mod progress;

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::{Result, SpriteError, ValidationError};

pub use glyph::{FeatureFlags, GlyphField, GlyphSnapshot, GlyphSpriteConfig};
pub use progress::{FillType, ProgressField, ProgressSnapshot, ProgressTextureConfig, ShapeStyle};

/// A draft whose fields can be set by external name
pub trait FieldSet {
    /// Every name `set_field` accepts
    fn field_names() -> Vec<String>;

    /// Parse `raw` into the named field; the draft is untouched on error
    fn set_field(&mut self, name: &str, raw: &str) -> std::result::Result<(), ValidationError>;
}

/// Read a JSON draft; missing keys keep their defaults
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path)?;
    log::debug!("Loading config from {}", path.display());
    serde_json::from_str(&text)
        .map_err(|e| SpriteError::ConfigError(format!("{}: {e}", path.display())))
}

/// Split a `field=value` override
pub fn parse_assignment(arg: &str) -> std::result::Result<(&str, &str), ValidationError> {
    arg.split_once('=')
        .map(|(k, v)| (k.trim(), v))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| ValidationError::InvalidValue {
            field: "set",
            value: arg.to_string(),
        })
}

/// Apply overrides in order, stopping at the first rejected one
pub fn apply_overrides<T: FieldSet>(
    draft: &mut T,
    overrides: &[String],
) -> std::result::Result<(), ValidationError> {
    for arg in overrides {
        let (name, raw) = parse_assignment(arg)?;
        draft.set_field(name, raw)?;
    }
    Ok(())
}

/// Required positive number (size, radius, thickness)
pub(crate) fn parse_positive(
    field: &'static str,
    raw: &str,
) -> std::result::Result<f32, ValidationError> {
    let value: f32 = raw.trim().parse().map_err(|_| ValidationError::NotANumber {
        field,
        value: raw.to_string(),
    })?;
    if !value.is_finite() {
        return Err(ValidationError::NotANumber {
            field,
            value: raw.to_string(),
        });
    }
    if value <= 0.0 {
        return Err(ValidationError::NotPositive {
            field,
            value: value as f64,
        });
    }
    Ok(value)
}

/// Required positive pixel count (width, height)
pub(crate) fn parse_dimension(
    field: &'static str,
    raw: &str,
) -> std::result::Result<u32, ValidationError> {
    let value = parse_positive(field, raw)?.round();
    if value < 1.0 || value > u32::MAX as f32 {
        return Err(ValidationError::NotPositive {
            field,
            value: value as f64,
        });
    }
    Ok(value as u32)
}

/// Required count that may be zero (steps)
pub(crate) fn parse_count(
    field: &'static str,
    raw: &str,
) -> std::result::Result<u32, ValidationError> {
    let value: f64 = raw.trim().parse().map_err(|_| ValidationError::NotANumber {
        field,
        value: raw.to_string(),
    })?;
    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError::InvalidValue {
            field,
            value: raw.to_string(),
        });
    }
    Ok(value.round().min(u32::MAX as f64) as u32)
}

/// Offset-like number: empty or non-numeric input means 0
pub(crate) fn parse_offset(raw: &str) -> f32 {
    raw.trim()
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

pub(crate) fn parse_bool(
    field: &'static str,
    raw: &str,
) -> std::result::Result<bool, ValidationError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ValidationError::InvalidValue {
            field,
            value: raw.to_string(),
        }),
    }
}
