//! Progress-texture mode settings

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{parse_count, parse_dimension, parse_offset, parse_positive, FieldSet};
use crate::color::Color;
use crate::error::ValidationError;
use crate::gradient::{Fill, Gradient, GradientKind};
use crate::shape::{LineCap, Point, ProgressShape};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeStyle {
    #[default]
    Arc,
    Circle,
    Line,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillType {
    #[default]
    Solid,
    Gradient,
}

fn parse_keyword<T: for<'de> Deserialize<'de>>(
    field: &'static str,
    raw: &str,
) -> Result<T, ValidationError> {
    let quoted = format!("\"{}\"", raw.trim().to_ascii_lowercase());
    serde_json::from_str(&quoted).map_err(|_| ValidationError::InvalidValue {
        field,
        value: raw.to_string(),
    })
}

/// Draft settings of the progress-texture mode
///
/// Geometry is kept flat for every style so switching styles loses nothing;
/// [`ProgressTextureConfig::shape`] picks the fields the current style uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressTextureConfig {
    pub style: ShapeStyle,
    pub width: u32,
    pub height: u32,
    pub center_x: f32,
    pub center_y: f32,
    pub radius: f32,
    pub thickness: f32,
    pub start_angle: f32,
    pub end_angle: f32,
    pub steps: u32,
    pub color: Color,
    /// Background track; `None` draws no track
    pub bg_color: Option<Color>,
    pub fill_type: FillType,
    /// End color of the two-stop shorthand, used when `gradient` is absent
    pub gradient_color: Color,
    /// Full multi-stop gradient
    pub gradient: Option<Gradient>,
    pub gradient_kind: Option<GradientKind>,
    pub gradient_angle: Option<f32>,
    pub line_cap: LineCap,
    pub start_x: f32,
    pub start_y: f32,
    pub end_x: f32,
    pub end_y: f32,
    pub prefix: String,
    pub suffix: String,
}

impl Default for ProgressTextureConfig {
    fn default() -> Self {
        Self {
            style: ShapeStyle::Arc,
            width: 100,
            height: 100,
            center_x: 50.0,
            center_y: 50.0,
            radius: 40.0,
            thickness: 10.0,
            start_angle: -90.0,
            end_angle: 270.0,
            steps: 10,
            color: Color::rgb(255, 0, 0),
            bg_color: Some(Color::rgba(255, 255, 255, 26)),
            fill_type: FillType::Solid,
            gradient_color: Color::rgb(0, 255, 0),
            gradient: None,
            gradient_kind: None,
            gradient_angle: None,
            line_cap: LineCap::Round,
            start_x: 10.0,
            start_y: 50.0,
            end_x: 90.0,
            end_y: 50.0,
            prefix: "progress".to_string(),
            suffix: String::new(),
        }
    }
}

/// Every externally settable field of [`ProgressTextureConfig`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressField {
    Style,
    Width,
    Height,
    CenterX,
    CenterY,
    Radius,
    Thickness,
    StartAngle,
    EndAngle,
    Steps,
    Color,
    BgColor,
    FillType,
    GradientColor,
    GradientKind,
    GradientAngle,
    LineCap,
    StartX,
    StartY,
    EndX,
    EndY,
    Prefix,
    Suffix,
}

impl ProgressField {
    pub const ALL: [ProgressField; 23] = [
        ProgressField::Style,
        ProgressField::Width,
        ProgressField::Height,
        ProgressField::CenterX,
        ProgressField::CenterY,
        ProgressField::Radius,
        ProgressField::Thickness,
        ProgressField::StartAngle,
        ProgressField::EndAngle,
        ProgressField::Steps,
        ProgressField::Color,
        ProgressField::BgColor,
        ProgressField::FillType,
        ProgressField::GradientColor,
        ProgressField::GradientKind,
        ProgressField::GradientAngle,
        ProgressField::LineCap,
        ProgressField::StartX,
        ProgressField::StartY,
        ProgressField::EndX,
        ProgressField::EndY,
        ProgressField::Prefix,
        ProgressField::Suffix,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ProgressField::Style => "style",
            ProgressField::Width => "width",
            ProgressField::Height => "height",
            ProgressField::CenterX => "center_x",
            ProgressField::CenterY => "center_y",
            ProgressField::Radius => "radius",
            ProgressField::Thickness => "thickness",
            ProgressField::StartAngle => "start_angle",
            ProgressField::EndAngle => "end_angle",
            ProgressField::Steps => "steps",
            ProgressField::Color => "color",
            ProgressField::BgColor => "bg_color",
            ProgressField::FillType => "fill_type",
            ProgressField::GradientColor => "gradient_color",
            ProgressField::GradientKind => "gradient_kind",
            ProgressField::GradientAngle => "gradient_angle",
            ProgressField::LineCap => "line_cap",
            ProgressField::StartX => "start_x",
            ProgressField::StartY => "start_y",
            ProgressField::EndX => "end_x",
            ProgressField::EndY => "end_y",
            ProgressField::Prefix => "prefix",
            ProgressField::Suffix => "suffix",
        }
    }
}

impl fmt::Display for ProgressField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ProgressField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|field| field.name() == s)
            .ok_or_else(|| ValidationError::UnknownField(s.to_string()))
    }
}

impl ProgressTextureConfig {
    /// Parse `raw` into one field; the draft is untouched on error
    pub fn set(&mut self, field: ProgressField, raw: &str) -> Result<(), ValidationError> {
        match field {
            ProgressField::Style => self.style = parse_keyword("style", raw)?,
            ProgressField::Width => self.width = parse_dimension("width", raw)?,
            ProgressField::Height => self.height = parse_dimension("height", raw)?,
            ProgressField::CenterX => self.center_x = parse_offset(raw),
            ProgressField::CenterY => self.center_y = parse_offset(raw),
            ProgressField::Radius => self.radius = parse_positive("radius", raw)?,
            ProgressField::Thickness => self.thickness = parse_positive("thickness", raw)?,
            ProgressField::StartAngle => self.start_angle = parse_offset(raw),
            ProgressField::EndAngle => self.end_angle = parse_offset(raw),
            ProgressField::Steps => self.steps = parse_count("steps", raw)?,
            ProgressField::Color => self.color = raw.parse()?,
            ProgressField::BgColor => {
                let trimmed = raw.trim();
                self.bg_color = if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
                    None
                } else {
                    Some(trimmed.parse()?)
                };
            },
            ProgressField::FillType => self.fill_type = parse_keyword("fill_type", raw)?,
            ProgressField::GradientColor => self.gradient_color = raw.parse()?,
            ProgressField::GradientKind => {
                self.gradient_kind = Some(parse_keyword("gradient_kind", raw)?)
            },
            ProgressField::GradientAngle => self.gradient_angle = Some(parse_offset(raw)),
            ProgressField::LineCap => self.line_cap = parse_keyword("line_cap", raw)?,
            ProgressField::StartX => self.start_x = parse_offset(raw),
            ProgressField::StartY => self.start_y = parse_offset(raw),
            ProgressField::EndX => self.end_x = parse_offset(raw),
            ProgressField::EndY => self.end_y = parse_offset(raw),
            ProgressField::Prefix => self.prefix = raw.to_string(),
            ProgressField::Suffix => self.suffix = raw.to_string(),
        }
        Ok(())
    }

    /// The shape the current style draws
    pub fn shape(&self) -> ProgressShape {
        let center = Point::new(self.center_x, self.center_y);
        match self.style {
            ShapeStyle::Arc => ProgressShape::Arc {
                center,
                radius: self.radius,
                thickness: self.thickness,
                start_angle: self.start_angle,
                end_angle: self.end_angle,
                cap: self.line_cap,
            },
            ShapeStyle::Circle => ProgressShape::Circle {
                center,
                radius: self.radius,
            },
            ShapeStyle::Line => ProgressShape::Line {
                start: Point::new(self.start_x, self.start_y),
                end: Point::new(self.end_x, self.end_y),
                thickness: self.thickness,
                cap: self.line_cap,
            },
        }
    }

    /// The gradient drawn in gradient mode
    ///
    /// Without a full gradient the shorthand expands to `color -> gradient_color`:
    /// radial for circles, linear along the segment for lines, linear otherwise.
    pub fn gradient(&self) -> Gradient {
        let mut gradient = match &self.gradient {
            Some(gradient) => gradient.clone(),
            None => {
                let kind = match self.style {
                    ShapeStyle::Circle => GradientKind::Radial,
                    _ => GradientKind::Linear,
                };
                let mut g = Gradient::two_color(kind, self.color, self.gradient_color);
                if self.style == ShapeStyle::Line {
                    let (dx, dy) = (self.end_x - self.start_x, self.end_y - self.start_y);
                    if dx != 0.0 || dy != 0.0 {
                        g.set_angle(dy.atan2(dx).to_degrees());
                    }
                }
                g
            },
        };
        if let Some(kind) = self.gradient_kind {
            gradient.set_kind(kind);
        }
        if let Some(angle) = self.gradient_angle {
            gradient.set_angle(angle);
        }
        gradient
    }

    pub fn fill(&self) -> Fill {
        match self.fill_type {
            FillType::Solid => Fill::Solid(self.color),
            FillType::Gradient => Fill::Gradient(self.gradient()),
        }
    }

    /// Validate and freeze the values one cycle reads
    pub fn snapshot(&self) -> Result<ProgressSnapshot, ValidationError> {
        if self.width == 0 || self.height == 0 {
            return Err(ValidationError::NotPositive {
                field: if self.width == 0 { "width" } else { "height" },
                value: 0.0,
            });
        }
        let positive = |field: &'static str, value: f32| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ValidationError::NotPositive {
                    field,
                    value: value as f64,
                })
            }
        };
        match self.style {
            ShapeStyle::Arc => {
                positive("radius", self.radius)?;
                positive("thickness", self.thickness)?;
            },
            ShapeStyle::Circle => positive("radius", self.radius)?,
            ShapeStyle::Line => positive("thickness", self.thickness)?,
        }

        let fill = self.fill();
        if let Fill::Gradient(gradient) = &fill {
            gradient.resolved_stops()?;
        }

        Ok(ProgressSnapshot {
            width: self.width,
            height: self.height,
            shape: self.shape(),
            fill,
            background: self.bg_color.filter(|c| !c.is_transparent()),
            steps: self.steps.max(1),
            prefix: self.prefix.clone(),
            suffix: self.suffix.clone(),
        })
    }
}

impl FieldSet for ProgressTextureConfig {
    fn field_names() -> Vec<String> {
        ProgressField::ALL
            .iter()
            .map(|f| f.name().to_string())
            .collect()
    }

    fn set_field(&mut self, name: &str, raw: &str) -> Result<(), ValidationError> {
        let field: ProgressField = name.parse()?;
        self.set(field, raw)
    }
}

/// Immutable per-cycle view of [`ProgressTextureConfig`]
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressSnapshot {
    pub width: u32,
    pub height: u32,
    pub shape: ProgressShape,
    pub fill: Fill,
    /// Track color; transparent tracks are already dropped
    pub background: Option<Color>,
    pub steps: u32,
    pub prefix: String,
    pub suffix: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_snapshot_as_arc() {
        let snap = ProgressTextureConfig::default().snapshot().unwrap();
        assert_eq!(snap.steps, 10);
        assert_eq!(snap.prefix, "progress");
        assert_eq!(snap.fill, Fill::Solid(Color::rgb(255, 0, 0)));
        assert_eq!(snap.background, Some(Color::rgba(255, 255, 255, 26)));
        assert!(matches!(snap.shape, ProgressShape::Arc { .. }));
    }

    #[test]
    fn shorthand_expands_to_two_stops() {
        let mut cfg = ProgressTextureConfig::default();
        cfg.set(ProgressField::FillType, "gradient").unwrap();
        cfg.set(ProgressField::Style, "circle").unwrap();
        let snap = cfg.snapshot().unwrap();
        match snap.fill {
            Fill::Gradient(g) => {
                assert_eq!(g.kind(), GradientKind::Radial);
                assert_eq!(g.stops().len(), 2);
                assert_eq!(g.stops()[0].color, Color::rgb(255, 0, 0));
                assert_eq!(g.stops()[1].color, Color::rgb(0, 255, 0));
            },
            other => panic!("unexpected fill {other:?}"),
        }
    }

    #[test]
    fn line_shorthand_follows_segment() {
        let mut cfg = ProgressTextureConfig::default();
        cfg.set(ProgressField::Style, "line").unwrap();
        cfg.set(ProgressField::EndX, "10").unwrap();
        cfg.set(ProgressField::EndY, "90").unwrap();
        assert!((cfg.gradient().angle() - 90.0).abs() < 1e-4);
    }

    #[test]
    fn transparent_track_is_dropped() {
        let mut cfg = ProgressTextureConfig::default();
        cfg.set(ProgressField::BgColor, "transparent").unwrap();
        assert_eq!(cfg.snapshot().unwrap().background, None);
        cfg.set(ProgressField::BgColor, "").unwrap();
        assert_eq!(cfg.bg_color, None);
    }

    #[test]
    fn required_fields_reject() {
        let mut cfg = ProgressTextureConfig::default();
        assert!(cfg.set(ProgressField::Radius, "x").is_err());
        assert!(cfg.set(ProgressField::Steps, "many").is_err());
        assert!(cfg.set(ProgressField::Style, "hexagon").is_err());
        assert_eq!(cfg, ProgressTextureConfig::default());
        cfg.set(ProgressField::CenterX, "").unwrap();
        assert_eq!(cfg.center_x, 0.0);
    }

    #[test]
    fn field_names_parse() {
        for field in ProgressField::ALL {
            assert_eq!(field.name().parse::<ProgressField>().unwrap(), field);
        }
    }

    #[test]
    fn line_cap_keywords() {
        let mut cfg = ProgressTextureConfig::default();
        cfg.set(ProgressField::LineCap, "Square").unwrap();
        assert_eq!(cfg.line_cap, LineCap::Square);
    }
}
