//! Painting solid and gradient fills through a coverage mask

use tiny_skia::{
    ColorU8, FillRule, Mask, Paint, PathBuilder, Pixmap, PixmapPaint, Rect, SpreadMode,
    Transform,
};
use wfsprite_core::{
    error::{RenderError, Result},
    gradient::{Fill, Gradient, GradientGeometry, GradientStop},
    shape::Point,
    Color,
};

pub(crate) fn skia_color(color: Color) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(color.r, color.g, color.b, color.a)
}

fn skia_point(p: Point) -> tiny_skia::Point {
    tiny_skia::Point::from_xy(p.x, p.y)
}

fn convert_stops(stops: &[GradientStop]) -> Vec<tiny_skia::GradientStop> {
    stops
        .iter()
        .map(|stop| tiny_skia::GradientStop::new(stop.offset, skia_color(stop.color)))
        .collect()
}

/// Fill the whole pixmap with `fill`, clipped by `mask`
///
/// `shape_center` and `shape_radius` place radial and conic gradients.
pub fn paint_masked(
    pixmap: &mut Pixmap,
    fill: &Fill,
    mask: &Mask,
    shape_center: Point,
    shape_radius: f32,
) -> Result<()> {
    let (width, height) = (pixmap.width(), pixmap.height());
    let rect = Rect::from_xywh(0.0, 0.0, width as f32, height as f32)
        .ok_or(RenderError::InvalidDimensions { width, height })?;

    let gradient = match fill {
        Fill::Solid(color) => {
            fill_solid(pixmap, rect, *color, mask);
            return Ok(());
        },
        Fill::Gradient(gradient) => gradient,
    };

    let stops = gradient.resolved_stops()?;
    let geometry = gradient.geometry(width as f32, height as f32, shape_center, shape_radius);
    let shader = match geometry {
        GradientGeometry::Linear { start, end } => tiny_skia::LinearGradient::new(
            skia_point(start),
            skia_point(end),
            convert_stops(&stops),
            SpreadMode::Pad,
            Transform::identity(),
        ),
        GradientGeometry::Radial { center, radius } => tiny_skia::RadialGradient::new(
            skia_point(center),
            skia_point(center),
            radius.max(0.001),
            convert_stops(&stops),
            SpreadMode::Pad,
            Transform::identity(),
        ),
        GradientGeometry::Conic {
            center,
            start_angle,
        } => {
            let layer = conic_layer(width, height, gradient, center, start_angle)?;
            pixmap.draw_pixmap(
                0,
                0,
                layer.as_ref(),
                &PixmapPaint::default(),
                Transform::identity(),
                Some(mask),
            );
            return Ok(());
        },
    };

    match shader {
        Some(shader) => {
            let paint = Paint {
                shader,
                anti_alias: true,
                ..Default::default()
            };
            let path = PathBuilder::from_rect(rect);
            pixmap.fill_path(
                &path,
                &paint,
                FillRule::Winding,
                Transform::identity(),
                Some(mask),
            );
        },
        None => {
            // Degenerate geometry, e.g. a zero-size box
            log::debug!("Gradient shader unavailable, filling with the first stop");
            fill_solid(pixmap, rect, stops[0].color, mask);
        },
    }
    Ok(())
}

fn fill_solid(pixmap: &mut Pixmap, rect: Rect, color: Color, mask: &Mask) {
    let mut paint = Paint::default();
    paint.set_color(skia_color(color));
    paint.anti_alias = true;
    pixmap.fill_rect(rect, &paint, Transform::identity(), Some(mask));
}

/// Sweep gradient evaluated per pixel; tiny-skia has no sweep shader
fn conic_layer(
    width: u32,
    height: u32,
    gradient: &Gradient,
    center: Point,
    start_angle: f32,
) -> Result<Pixmap> {
    let mut layer = Pixmap::new(width, height).ok_or(RenderError::PixmapCreationFailed)?;
    let w = width as usize;
    for (i, px) in layer.pixels_mut().iter_mut().enumerate() {
        let x = (i % w) as f32 + 0.5;
        let y = (i / w) as f32 + 0.5;
        let t = conic_position(x - center.x, y - center.y, start_angle);
        let c = gradient.color_at(t);
        *px = ColorU8::from_rgba(c.r, c.g, c.b, c.a).premultiply();
    }
    Ok(layer)
}

/// Fraction of a clockwise turn from `start_angle` to the direction `(dx, dy)`
pub(crate) fn conic_position(dx: f32, dy: f32, start_angle: f32) -> f32 {
    let angle = dy.atan2(dx).to_degrees();
    (angle - start_angle).rem_euclid(360.0) / 360.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use wfsprite_core::gradient::GradientKind;

    fn full_mask(w: u32, h: u32) -> Mask {
        let mut mask = Mask::new(w, h).unwrap();
        mask.data_mut().fill(255);
        mask
    }

    fn rgba(pixmap: &Pixmap, x: u32, y: u32) -> [u8; 4] {
        let c = pixmap.pixel(x, y).unwrap().demultiply();
        [c.red(), c.green(), c.blue(), c.alpha()]
    }

    #[test]
    fn conic_positions_go_clockwise() {
        assert!((conic_position(1.0, 0.0, 0.0) - 0.0).abs() < 1e-6);
        assert!((conic_position(0.0, 1.0, 0.0) - 0.25).abs() < 1e-6);
        assert!((conic_position(-1.0, 0.0, 0.0) - 0.5).abs() < 1e-6);
        assert!((conic_position(0.0, -1.0, -90.0) - 0.0).abs() < 1e-6);
    }

    #[test]
    fn solid_fill_respects_mask() {
        let mut pixmap = Pixmap::new(4, 4).unwrap();
        let mut mask = Mask::new(4, 4).unwrap();
        mask.data_mut()[0] = 255;
        let fill = Fill::Solid(Color::rgb(0, 0, 255));
        paint_masked(&mut pixmap, &fill, &mask, Point::new(2.0, 2.0), 2.0).unwrap();
        assert_eq!(rgba(&pixmap, 0, 0), [0, 0, 255, 255]);
        assert_eq!(rgba(&pixmap, 3, 3)[3], 0);
    }

    #[test]
    fn linear_gradient_runs_left_to_right() {
        let mut pixmap = Pixmap::new(100, 10).unwrap();
        let mut gradient =
            Gradient::two_color(GradientKind::Linear, Color::rgb(255, 0, 0), Color::rgb(0, 0, 255));
        gradient.set_angle(0.0);
        let fill = Fill::Gradient(gradient);
        paint_masked(&mut pixmap, &fill, &full_mask(100, 10), Point::new(50.0, 5.0), 40.0)
            .unwrap();
        let left = rgba(&pixmap, 0, 5);
        let right = rgba(&pixmap, 99, 5);
        assert!(left[0] > 240 && left[2] < 15);
        assert!(right[2] > 240 && right[0] < 15);
    }

    #[test]
    fn conic_gradient_is_drawn_through_mask() {
        let mut pixmap = Pixmap::new(20, 20).unwrap();
        let mut gradient =
            Gradient::two_color(GradientKind::Conic, Color::rgb(255, 0, 0), Color::rgb(0, 0, 255));
        gradient.set_angle(0.0);
        let fill = Fill::Gradient(gradient);
        paint_masked(&mut pixmap, &fill, &full_mask(20, 20), Point::new(10.0, 10.0), 8.0)
            .unwrap();
        // just clockwise of the start direction the first stop dominates
        let start = rgba(&pixmap, 19, 11);
        // just counter-clockwise of it the turn is nearly complete
        let end = rgba(&pixmap, 19, 8);
        assert!(start[0] > start[2]);
        assert!(end[2] > end[0]);
        assert!(pixmap.pixels().iter().all(|p| p.alpha() == 255));
    }

    #[test]
    fn radial_gradient_starts_at_shape_center() {
        let mut pixmap = Pixmap::new(40, 40).unwrap();
        let gradient =
            Gradient::two_color(GradientKind::Radial, Color::rgb(255, 0, 0), Color::rgb(0, 0, 255));
        let fill = Fill::Gradient(gradient);
        paint_masked(&mut pixmap, &fill, &full_mask(40, 40), Point::new(20.0, 20.0), 10.0)
            .unwrap();
        let center = rgba(&pixmap, 20, 20);
        let corner = rgba(&pixmap, 0, 0);
        assert!(center[0] > 230);
        assert!(corner[2] > corner[0]);
    }
}
