//! Multi-stop gradient model
//!
//! Stops stay sorted by offset after every mutation and a gradient never loses
//! its last two stops. Geometry is derived per frame from the box and the shape.

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::ValidationError;
use crate::shape::Point;

/// Default direction, degrees clockwise from +x
pub const DEFAULT_ANGLE: f32 = 45.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientKind {
    #[default]
    Linear,
    Radial,
    Conic,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub offset: f32,
    pub color: Color,
}

impl GradientStop {
    pub fn new(offset: f32, color: Color) -> Self {
        Self { offset, color }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGradient", into = "RawGradient")]
pub struct Gradient {
    kind: GradientKind,
    angle: f32,
    stops: Vec<GradientStop>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawGradient {
    #[serde(default)]
    kind: GradientKind,
    #[serde(default = "default_angle")]
    angle: f32,
    stops: Vec<GradientStop>,
}

fn default_angle() -> f32 {
    DEFAULT_ANGLE
}

impl TryFrom<RawGradient> for Gradient {
    type Error = ValidationError;

    fn try_from(raw: RawGradient) -> Result<Self, Self::Error> {
        if raw.stops.len() < 2 {
            return Err(ValidationError::TooFewStops(raw.stops.len()));
        }
        let mut gradient = Gradient {
            kind: raw.kind,
            angle: raw.angle,
            stops: raw.stops,
        };
        gradient.sort();
        Ok(gradient)
    }
}

impl From<Gradient> for RawGradient {
    fn from(gradient: Gradient) -> Self {
        RawGradient {
            kind: gradient.kind,
            angle: gradient.angle,
            stops: gradient.stops,
        }
    }
}

/// Paint of a progress foreground
#[derive(Debug, Clone, PartialEq)]
pub enum Fill {
    Solid(Color),
    Gradient(Gradient),
}

/// Where a resolved gradient sits in box pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GradientGeometry {
    Linear { start: Point, end: Point },
    Radial { center: Point, radius: f32 },
    /// Sweeps clockwise one full turn starting at `start_angle` degrees
    Conic { center: Point, start_angle: f32 },
}

impl Gradient {
    /// `from` at offset 0, `to` at offset 1
    pub fn two_color(kind: GradientKind, from: Color, to: Color) -> Self {
        Self {
            kind,
            angle: DEFAULT_ANGLE,
            stops: vec![GradientStop::new(0.0, from), GradientStop::new(1.0, to)],
        }
    }

    pub fn kind(&self) -> GradientKind {
        self.kind
    }

    pub fn set_kind(&mut self, kind: GradientKind) {
        self.kind = kind;
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn set_angle(&mut self, angle: f32) {
        self.angle = angle;
    }

    pub fn stops(&self) -> &[GradientStop] {
        &self.stops
    }

    fn sort(&mut self) {
        self.stops.sort_by(|a, b| a.offset.total_cmp(&b.offset));
    }

    /// Insert a stop; returns its index after re-sorting
    pub fn add_stop(&mut self, offset: f32, color: Color) -> usize {
        self.stops.push(GradientStop::new(offset, color));
        self.sort();
        // the new stop is the last one among equal offsets after a stable sort
        self.stops
            .iter()
            .rposition(|s| s.offset.total_cmp(&offset).is_eq() && s.color == color)
            .unwrap_or(self.stops.len() - 1)
    }

    /// Edit one stop in place, then re-sort
    pub fn update_stop(
        &mut self,
        index: usize,
        offset: Option<f32>,
        color: Option<Color>,
    ) -> Result<(), ValidationError> {
        let len = self.stops.len();
        let stop = self
            .stops
            .get_mut(index)
            .ok_or(ValidationError::StopOutOfRange { index, len })?;
        if let Some(offset) = offset {
            stop.offset = offset;
        }
        if let Some(color) = color {
            stop.color = color;
        }
        self.sort();
        Ok(())
    }

    /// Remove one stop; refused when only two remain
    pub fn remove_stop(&mut self, index: usize) -> Result<GradientStop, ValidationError> {
        let len = self.stops.len();
        if index >= len {
            return Err(ValidationError::StopOutOfRange { index, len });
        }
        if len < 3 {
            return Err(ValidationError::TooFewStops(len - 1));
        }
        Ok(self.stops.remove(index))
    }

    /// Stops ready for drawing, offsets clamped into `[0, 1]`
    pub fn resolved_stops(&self) -> Result<Vec<GradientStop>, ValidationError> {
        if self.stops.len() < 2 {
            return Err(ValidationError::TooFewStops(self.stops.len()));
        }
        let mut stops: Vec<GradientStop> = self
            .stops
            .iter()
            .map(|s| GradientStop::new(s.offset.clamp(0.0, 1.0), s.color))
            .collect();
        stops.sort_by(|a, b| a.offset.total_cmp(&b.offset));
        Ok(stops)
    }

    /// Interpolated color at `t`; outside the stops the end colors extend
    pub fn color_at(&self, t: f32) -> Color {
        let stops = &self.stops;
        let (first, last) = match (stops.first(), stops.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Color::transparent(),
        };
        let t = t.clamp(0.0, 1.0);
        if t <= first.offset.clamp(0.0, 1.0) {
            return first.color;
        }
        if t >= last.offset.clamp(0.0, 1.0) {
            return last.color;
        }
        for pair in stops.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let (ao, bo) = (a.offset.clamp(0.0, 1.0), b.offset.clamp(0.0, 1.0));
            if t >= ao && t <= bo {
                if bo - ao <= f32::EPSILON {
                    return b.color;
                }
                return a.color.lerp(b.color, (t - ao) / (bo - ao));
            }
        }
        last.color
    }

    /// Place the gradient for a `width` x `height` box and a shape
    pub fn geometry(
        &self,
        width: f32,
        height: f32,
        shape_center: Point,
        shape_radius: f32,
    ) -> GradientGeometry {
        match self.kind {
            GradientKind::Linear => {
                let theta = self.angle.to_radians();
                let (sin, cos) = theta.sin_cos();
                let half = ((width * cos).abs() + (height * sin).abs()) / 2.0;
                let center = Point::new(width / 2.0, height / 2.0);
                GradientGeometry::Linear {
                    start: Point::new(center.x - cos * half, center.y - sin * half),
                    end: Point::new(center.x + cos * half, center.y + sin * half),
                }
            },
            GradientKind::Radial => GradientGeometry::Radial {
                center: shape_center,
                radius: width.max(height).max(2.0 * shape_radius) / 2.0,
            },
            GradientKind::Conic => GradientGeometry::Conic {
                center: shape_center,
                start_angle: self.angle,
            },
        }
    }
}

impl Default for Gradient {
    fn default() -> Self {
        Self::two_color(GradientKind::Linear, Color::rgb(255, 0, 0), Color::rgb(0, 255, 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red() -> Color {
        Color::rgb(255, 0, 0)
    }

    fn blue() -> Color {
        Color::rgb(0, 0, 255)
    }

    #[test]
    fn stops_sorted_after_add_and_update() {
        let mut g = Gradient::two_color(GradientKind::Linear, red(), blue());
        let idx = g.add_stop(0.5, Color::white());
        assert_eq!(idx, 1);
        g.update_stop(0, Some(0.9), None).unwrap();
        let offsets: Vec<f32> = g.stops().iter().map(|s| s.offset).collect();
        assert_eq!(offsets, vec![0.5, 0.9, 1.0]);
    }

    #[test]
    fn never_below_two_stops() {
        let mut g = Gradient::two_color(GradientKind::Linear, red(), blue());
        assert_eq!(g.remove_stop(0), Err(ValidationError::TooFewStops(1)));
        g.add_stop(0.3, Color::white());
        assert!(g.remove_stop(1).is_ok());
        assert_eq!(g.stops().len(), 2);
        assert!(matches!(
            g.remove_stop(5),
            Err(ValidationError::StopOutOfRange { index: 5, len: 2 })
        ));
    }

    #[test]
    fn resolve_clamps_offsets() {
        let mut g = Gradient::two_color(GradientKind::Linear, red(), blue());
        g.update_stop(1, Some(1.7), None).unwrap();
        g.update_stop(0, Some(-0.5), None).unwrap();
        let stops = g.resolved_stops().unwrap();
        assert_eq!(stops[0].offset, 0.0);
        assert_eq!(stops[1].offset, 1.0);
    }

    #[test]
    fn color_interpolation() {
        let g = Gradient::two_color(GradientKind::Linear, Color::black(), Color::white());
        assert_eq!(g.color_at(0.0), Color::black());
        assert_eq!(g.color_at(1.0), Color::white());
        assert_eq!(g.color_at(0.5), Color::rgb(128, 128, 128));
        assert_eq!(g.color_at(-3.0), Color::black());
    }

    #[test]
    fn duplicate_offsets_are_tolerated() {
        let mut g = Gradient::two_color(GradientKind::Linear, red(), blue());
        g.add_stop(0.5, Color::white());
        g.add_stop(0.5, Color::black());
        assert_eq!(g.stops().len(), 4);
        assert_eq!(g.color_at(0.75), Color::black().lerp(blue(), 0.5));
    }

    #[test]
    fn linear_geometry_spans_box() {
        let mut g = Gradient::default();
        g.set_angle(0.0);
        match g.geometry(100.0, 60.0, Point::new(0.0, 0.0), 10.0) {
            GradientGeometry::Linear { start, end } => {
                assert!((start.x - 0.0).abs() < 1e-4);
                assert!((end.x - 100.0).abs() < 1e-4);
                assert!((start.y - 30.0).abs() < 1e-4);
            },
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn radial_radius_covers_shape() {
        let mut g = Gradient::default();
        g.set_kind(GradientKind::Radial);
        let center = Point::new(50.0, 50.0);
        assert_eq!(
            g.geometry(100.0, 80.0, center, 40.0),
            GradientGeometry::Radial { center, radius: 50.0 }
        );
        assert_eq!(
            g.geometry(100.0, 80.0, center, 70.0),
            GradientGeometry::Radial { center, radius: 70.0 }
        );
    }

    #[test]
    fn deserialize_sorts_and_validates() {
        let g: Gradient = serde_json::from_str(
            r##"{"kind":"conic","stops":[{"offset":1,"color":"#0000ff"},{"offset":0,"color":"#ff0000"}]}"##,
        )
        .unwrap();
        assert_eq!(g.kind(), GradientKind::Conic);
        assert_eq!(g.angle(), DEFAULT_ANGLE);
        assert_eq!(g.stops()[0].color, red());

        let one: Result<Gradient, _> =
            serde_json::from_str(r##"{"stops":[{"offset":0,"color":"#ff0000"}]}"##);
        assert!(one.is_err());
    }
}
