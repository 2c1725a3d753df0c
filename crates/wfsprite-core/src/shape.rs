//! Progress indicator geometry
//!
//! Angles are degrees, measured clockwise from +x in box coordinates (y down).

use serde::{Deserialize, Serialize};

/// A point in box pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn lerp(self, other: Point, t: f32) -> Point {
        Point::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    pub fn distance(self, other: Point) -> f32 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// How stroke ends are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineCap {
    #[default]
    Round,
    Butt,
    Square,
}

/// The indicator drawn on every frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "style", rename_all = "lowercase")]
pub enum ProgressShape {
    /// Stroked ring segment; the foreground sweeps from `start_angle` towards `end_angle`
    Arc {
        center: Point,
        radius: f32,
        thickness: f32,
        start_angle: f32,
        end_angle: f32,
        cap: LineCap,
    },
    /// Filled disk whose foreground radius grows with progress
    Circle { center: Point, radius: f32 },
    /// Stroked segment growing from `start` to `end`
    Line {
        start: Point,
        end: Point,
        thickness: f32,
        cap: LineCap,
    },
}

/// Largest sweep drawn for an arc, in degrees
pub const MAX_SWEEP: f32 = 360.0;

impl ProgressShape {
    pub fn kind(&self) -> &'static str {
        match self {
            ProgressShape::Arc { .. } => "arc",
            ProgressShape::Circle { .. } => "circle",
            ProgressShape::Line { .. } => "line",
        }
    }

    /// Where radial and conic gradients are centered
    pub fn center(&self) -> Point {
        match self {
            ProgressShape::Arc { center, .. } | ProgressShape::Circle { center, .. } => *center,
            ProgressShape::Line { start, end, .. } => start.lerp(*end, 0.5),
        }
    }

    /// Radius used to size radial gradients
    pub fn radius(&self) -> f32 {
        match self {
            ProgressShape::Arc { radius, .. } | ProgressShape::Circle { radius, .. } => *radius,
            ProgressShape::Line { start, end, .. } => start.distance(*end) / 2.0,
        }
    }

    /// Full track sweep, clamped to one turn either way
    pub fn track_sweep(&self) -> Option<f32> {
        match self {
            ProgressShape::Arc {
                start_angle,
                end_angle,
                ..
            } => Some((end_angle - start_angle).clamp(-MAX_SWEEP, MAX_SWEEP)),
            _ => None,
        }
    }

    /// Foreground sweep at progress `p`
    pub fn sweep_at(&self, p: f32) -> Option<f32> {
        match self {
            ProgressShape::Arc {
                start_angle,
                end_angle,
                ..
            } => Some(((end_angle - start_angle) * p).clamp(-MAX_SWEEP, MAX_SWEEP)),
            _ => None,
        }
    }
}

/// Progress fraction of every frame: `N + 1` values `i / N`, with `N` at least 1
pub fn frame_fractions(steps: u32) -> Vec<f32> {
    let n = steps.max(1);
    (0..=n).map(|i| i as f32 / n as f32).collect()
}

/// Preview label of a progress frame
pub fn progress_label(p: f32) -> String {
    format!("{}%", (p * 100.0).round() as i64)
}
