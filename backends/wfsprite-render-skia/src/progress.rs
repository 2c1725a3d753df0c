//! Progress frame rasterization
//!
//! A frame is the shape's track in the background color, with the
//! foreground at progress `p` painted over it. Both are turned into a
//! coverage mask first so solid and gradient fills share one code path.

use tiny_skia::{FillRule, LineCap as SkiaLineCap, Mask, Path, PathBuilder, Pixmap, Stroke, Transform};
use wfsprite_core::{
    error::{RenderError, Result},
    gradient::Fill,
    shape::{LineCap, Point, ProgressShape},
    types::BitmapData,
    Color,
};

use crate::{gradient::paint_masked, pixmap_to_bitmap, to_skia_path};

/// Arc flattening tolerance in pixels
const ARC_TOLERANCE: f64 = 0.1;

/// Geometry that still has to become coverage
enum Figure {
    Filled(Path),
    Stroked { path: Path, width: f32, cap: LineCap },
}

/// Draws one progress frame per call
#[derive(Debug, Clone, Copy)]
pub struct ProgressShapeRasterizer {
    width: u32,
    height: u32,
}

impl ProgressShapeRasterizer {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Render `shape` at progress `p`, over the track when `background` is set
    pub fn rasterize(
        &self,
        shape: &ProgressShape,
        fill: &Fill,
        background: Option<Color>,
        p: f32,
    ) -> Result<BitmapData> {
        let (width, height) = (self.width, self.height);
        let mut pixmap =
            Pixmap::new(width, height).ok_or(RenderError::InvalidDimensions { width, height })?;
        let p = p.clamp(0.0, 1.0);

        if let Some(color) = background.filter(|c| !c.is_transparent()) {
            if let Some(track) = figure(shape, 1.0, true) {
                let mask = self.coverage(&track)?;
                paint_masked(&mut pixmap, &Fill::Solid(color), &mask, shape.center(), shape.radius())?;
            }
        }

        match figure(shape, p, false) {
            Some(foreground) => {
                let mask = self.coverage(&foreground)?;
                paint_masked(&mut pixmap, fill, &mask, shape.center(), shape.radius())?;
            },
            None => log::trace!("Empty {} foreground at p={p}", shape.kind()),
        }

        Ok(pixmap_to_bitmap(&pixmap))
    }

    fn coverage(&self, figure: &Figure) -> Result<Mask> {
        let mut mask = Mask::new(self.width, self.height).ok_or(RenderError::InvalidDimensions {
            width: self.width,
            height: self.height,
        })?;
        match figure {
            Figure::Filled(path) => {
                mask.fill_path(path, FillRule::Winding, true, Transform::identity());
            },
            Figure::Stroked { path, width, cap } => {
                let stroke = Stroke {
                    width: *width,
                    line_cap: skia_cap(*cap),
                    ..Default::default()
                };
                let outline = path.stroke(&stroke, 1.0).ok_or(RenderError::PathBuildingFailed)?;
                mask.fill_path(&outline, FillRule::Winding, true, Transform::identity());
            },
        }
        Ok(mask)
    }
}

fn skia_cap(cap: LineCap) -> SkiaLineCap {
    match cap {
        LineCap::Round => SkiaLineCap::Round,
        LineCap::Butt => SkiaLineCap::Butt,
        LineCap::Square => SkiaLineCap::Square,
    }
}

/// The track (`track = true`) or the foreground at `p`; `None` when it has no extent
fn figure(shape: &ProgressShape, p: f32, track: bool) -> Option<Figure> {
    match shape {
        ProgressShape::Arc {
            center,
            radius,
            thickness,
            start_angle,
            cap,
            ..
        } => {
            let sweep = if track {
                shape.track_sweep()?
            } else {
                shape.sweep_at(p)?
            };
            if sweep.abs() <= f32::EPSILON || *radius <= 0.0 {
                return None;
            }
            let path = arc_path(*center, *radius, *start_angle, sweep)?;
            Some(Figure::Stroked {
                path,
                width: *thickness,
                cap: *cap,
            })
        },
        ProgressShape::Circle { center, radius } => {
            let r = radius * p;
            if r <= 0.0 {
                return None;
            }
            PathBuilder::from_circle(center.x, center.y, r).map(Figure::Filled)
        },
        ProgressShape::Line {
            start,
            end,
            thickness,
            cap,
        } => {
            let to = start.lerp(*end, p);
            if start.distance(to) <= f32::EPSILON {
                return None;
            }
            let mut builder = PathBuilder::new();
            builder.move_to(start.x, start.y);
            builder.line_to(to.x, to.y);
            builder.finish().map(|path| Figure::Stroked {
                path,
                width: *thickness,
                cap: *cap,
            })
        },
    }
}

/// Circular arc in box space; positive sweeps run clockwise on screen
fn arc_path(center: Point, radius: f32, start_angle: f32, sweep: f32) -> Option<Path> {
    use kurbo::Shape;

    let arc = kurbo::Arc {
        center: kurbo::Point::new(center.x as f64, center.y as f64),
        radii: kurbo::Vec2::new(radius as f64, radius as f64),
        start_angle: (start_angle as f64).to_radians(),
        sweep_angle: (sweep as f64).to_radians(),
        x_rotation: 0.0,
    };
    to_skia_path(&arc.to_path(ARC_TOLERANCE))
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::rgb(255, 0, 0);
    const TRACK: Color = Color::rgba(255, 255, 255, 26);

    fn arc() -> ProgressShape {
        ProgressShape::Arc {
            center: Point::new(50.0, 50.0),
            radius: 40.0,
            thickness: 10.0,
            start_angle: -90.0,
            end_angle: 270.0,
            cap: LineCap::Round,
        }
    }

    fn render(shape: &ProgressShape, background: Option<Color>, p: f32) -> BitmapData {
        ProgressShapeRasterizer::new(100, 100)
            .rasterize(shape, &Fill::Solid(RED), background, p)
            .unwrap()
    }

    fn is_red(px: [u8; 4]) -> bool {
        px[0] > 240 && px[1] < 15 && px[2] < 15 && px[3] > 240
    }

    #[test]
    fn zero_progress_draws_only_the_track() {
        let bmp = render(&arc(), Some(TRACK), 0.0);
        let top = bmp.pixel(50, 10).unwrap();
        assert!((20..=32).contains(&top[3]), "track alpha {}", top[3]);
        assert!(!is_red(top));
        assert!(bmp.data.chunks_exact(4).all(|px| px[3] < 40));
    }

    #[test]
    fn zero_progress_without_background_is_blank() {
        assert!(render(&arc(), None, 0.0).is_blank());
        assert!(render(&arc(), Some(Color::transparent()), 0.0).is_blank());
    }

    #[test]
    fn half_arc_covers_clockwise_half() {
        let bmp = render(&arc(), Some(TRACK), 0.5);
        assert!(is_red(bmp.pixel(50, 10).unwrap()));
        assert!(is_red(bmp.pixel(90, 50).unwrap()));
        assert!(!is_red(bmp.pixel(10, 50).unwrap()));
        assert!(bmp.pixel(10, 50).unwrap()[3] > 0);
    }

    #[test]
    fn full_arc_closes_the_ring() {
        let bmp = render(&arc(), None, 1.0);
        for (x, y) in [(50, 10), (90, 50), (50, 90), (10, 50)] {
            assert!(is_red(bmp.pixel(x, y).unwrap()), "pixel ({x}, {y})");
        }
        assert!(bmp.pixel(50, 50).unwrap()[3] == 0);
    }

    #[test]
    fn circle_grows_from_center() {
        let shape = ProgressShape::Circle {
            center: Point::new(50.0, 50.0),
            radius: 40.0,
        };
        let half = render(&shape, Some(TRACK), 0.5);
        assert!(is_red(half.pixel(50, 50).unwrap()));
        let ring = half.pixel(50, 20).unwrap();
        assert!(!is_red(ring) && ring[3] > 0);

        let full = render(&shape, None, 1.0);
        assert!(is_red(full.pixel(50, 20).unwrap()));
        assert_eq!(full.pixel(0, 0).unwrap()[3], 0);
    }

    #[test]
    fn line_grows_from_start() {
        let shape = ProgressShape::Line {
            start: Point::new(10.0, 50.0),
            end: Point::new(90.0, 50.0),
            thickness: 10.0,
            cap: LineCap::Butt,
        };
        let bmp = render(&shape, Some(TRACK), 0.5);
        assert!(is_red(bmp.pixel(30, 50).unwrap()));
        let rest = bmp.pixel(70, 50).unwrap();
        assert!(!is_red(rest) && rest[3] > 0);
        assert_eq!(bmp.pixel(50, 10).unwrap()[3], 0);
    }

    #[test]
    fn invalid_box_is_an_error() {
        let err = ProgressShapeRasterizer::new(0, 10).rasterize(&arc(), &Fill::Solid(RED), None, 1.0);
        assert!(err.is_err());
    }
}
