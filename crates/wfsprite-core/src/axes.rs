//! Variable-font axis catalog and the controller that keeps axis values valid
//!
//! Every stored value, seeded defaults included, is snapped to the axis step
//! and clamped into `[min, max]`. Rejected input leaves the state untouched.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// One registered design axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariationAxis {
    pub tag: &'static str,
    pub name: &'static str,
    pub min: f32,
    pub max: f32,
    pub default: f32,
}

/// The axes the tool knows how to drive, in display order
pub const AXES: [VariationAxis; 7] = [
    VariationAxis { tag: "wght", name: "Weight", min: 100.0, max: 1000.0, default: 400.0 },
    VariationAxis { tag: "wdth", name: "Width", min: 25.0, max: 200.0, default: 100.0 },
    VariationAxis { tag: "opsz", name: "Optical Size", min: 6.0, max: 144.0, default: 14.0 },
    VariationAxis { tag: "slnt", name: "Slant", min: -15.0, max: 0.0, default: 0.0 },
    VariationAxis { tag: "ital", name: "Italic", min: 0.0, max: 1.0, default: 0.0 },
    VariationAxis { tag: "GRAD", name: "Grade", min: -200.0, max: 150.0, default: 0.0 },
    VariationAxis { tag: "ROND", name: "Roundness", min: 0.0, max: 100.0, default: 0.0 },
];

/// Look an axis up by its four-letter tag (case sensitive, `GRAD` is not `grad`)
pub fn find_axis(tag: &str) -> Option<&'static VariationAxis> {
    AXES.iter().find(|axis| axis.tag == tag)
}

fn catalog_position(tag: &str) -> usize {
    AXES.iter().position(|axis| axis.tag == tag).unwrap_or(AXES.len())
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

impl VariationAxis {
    pub fn is_binary(&self) -> bool {
        self.tag == "ital"
    }

    /// Snap granularity: one hundredth of the range, at least 0.1
    pub fn step(&self) -> f32 {
        if self.is_binary() {
            return 1.0;
        }
        let raw = (self.max as f64 - self.min as f64) / 100.0;
        round_to(raw.max(0.1), 2) as f32
    }

    /// Snap to the step grid and clamp into range
    pub fn normalize(&self, value: f32) -> f32 {
        let value = value as f64;
        let snapped = if self.is_binary() {
            if value >= 0.5 {
                1.0
            } else {
                0.0
            }
        } else {
            let step = self.step() as f64;
            round_to((value / step).round() * step, 4)
        };
        (snapped as f32).clamp(self.min, self.max)
    }

    /// The default as the controller stores it, on the step grid
    pub fn normalized_default(&self) -> f32 {
        self.normalize(self.default)
    }

    /// Parse user input and normalize it
    pub fn parse(&self, raw: &str) -> Result<f32, ValidationError> {
        let trimmed = raw.trim();
        let not_a_number = || ValidationError::NotANumber {
            field: self.tag,
            value: raw.to_string(),
        };
        if trimmed.is_empty() {
            return Err(not_a_number());
        }
        let value: f32 = trimmed.parse().map_err(|_| not_a_number())?;
        if !value.is_finite() {
            return Err(not_a_number());
        }
        Ok(self.normalize(value))
    }

    /// Display form: integers for `ital`, otherwise trimmed fixed decimals
    pub fn format(&self, value: f32) -> String {
        if self.is_binary() {
            return format!("{}", value.round() as i32);
        }
        let decimals = if self.step() < 1.0 { 2 } else { 1 };
        let fixed = format!("{:.*}", decimals, value);
        let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
        if trimmed == "-0" {
            "0".to_string()
        } else {
            trimmed.to_string()
        }
    }
}

/// Active variable-font settings of a glyph config
///
/// When disabled no variations reach the backend, whatever values are stored.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "RawAxisSettings", into = "RawAxisSettings")]
pub struct VariationAxisController {
    enabled: bool,
    values: IndexMap<String, f32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct RawAxisSettings {
    enabled: bool,
    values: IndexMap<String, f32>,
}

impl TryFrom<RawAxisSettings> for VariationAxisController {
    type Error = ValidationError;

    fn try_from(raw: RawAxisSettings) -> Result<Self, Self::Error> {
        let mut controller = VariationAxisController {
            enabled: raw.enabled,
            values: IndexMap::new(),
        };
        for (tag, value) in raw.values {
            controller.set_value(&tag, value)?;
        }
        Ok(controller)
    }
}

impl From<VariationAxisController> for RawAxisSettings {
    fn from(controller: VariationAxisController) -> Self {
        RawAxisSettings {
            enabled: controller.enabled,
            values: controller.values,
        }
    }
}

impl VariationAxisController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn catalog() -> &'static [VariationAxis] {
        &AXES
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Turn variations on, seeding every axis without a value with its default
    pub fn enable(&mut self) {
        self.enabled = true;
        for axis in AXES.iter() {
            self.values
                .entry(axis.tag.to_string())
                .or_insert_with(|| axis.normalized_default());
        }
        self.sort();
    }

    /// Stop passing variations; stored values are kept for the next `enable`
    pub fn disable(&mut self) {
        self.enabled = false;
    }

    pub fn value(&self, tag: &str) -> Option<f32> {
        self.values.get(tag).copied()
    }

    /// Parse, normalize and store user input for one axis
    pub fn set(&mut self, tag: &str, raw: &str) -> Result<f32, ValidationError> {
        let axis = find_axis(tag).ok_or_else(|| ValidationError::UnknownAxis(tag.to_string()))?;
        let value = axis.parse(raw)?;
        self.store(axis, value);
        Ok(value)
    }

    /// Normalize and store a numeric value for one axis
    pub fn set_value(&mut self, tag: &str, value: f32) -> Result<f32, ValidationError> {
        let axis = find_axis(tag).ok_or_else(|| ValidationError::UnknownAxis(tag.to_string()))?;
        if !value.is_finite() {
            return Err(ValidationError::NotANumber {
                field: axis.tag,
                value: value.to_string(),
            });
        }
        let value = axis.normalize(value);
        self.store(axis, value);
        Ok(value)
    }

    /// Restore the normalized default of one axis
    pub fn reset(&mut self, tag: &str) -> Result<f32, ValidationError> {
        let axis = find_axis(tag).ok_or_else(|| ValidationError::UnknownAxis(tag.to_string()))?;
        let value = axis.normalized_default();
        self.store(axis, value);
        Ok(value)
    }

    fn store(&mut self, axis: &VariationAxis, value: f32) {
        self.values.insert(axis.tag.to_string(), value);
        self.sort();
    }

    fn sort(&mut self) {
        self.values
            .sort_by(|a, _, b, _| catalog_position(a).cmp(&catalog_position(b)));
    }

    /// Whether the user pinned an explicit value for `tag` while enabled
    pub fn pins(&self, tag: &str) -> bool {
        self.enabled && self.values.contains_key(tag)
    }

    /// Coordinates handed to the shaper and outline backend
    pub fn active_variations(&self) -> Vec<(String, f32)> {
        if !self.enabled {
            return Vec::new();
        }
        self.values
            .iter()
            .map(|(tag, value)| (tag.clone(), *value))
            .collect()
    }

    /// CSS `font-variation-settings` value
    pub fn settings_string(&self) -> String {
        let active = self.active_variations();
        if active.is_empty() {
            return "normal".to_string();
        }
        active
            .iter()
            .map(|(tag, value)| {
                let shown = find_axis(tag)
                    .map(|axis| axis.format(*value))
                    .unwrap_or_else(|| value.to_string());
                format!("\"{tag}\" {shown}")
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}
