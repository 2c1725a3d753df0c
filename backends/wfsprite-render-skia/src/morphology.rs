//! Coverage-mask morphology for outline-only glyphs

use tiny_skia::Mask;

/// Grow coverage by `radius` pixels with an anti-aliased disk
pub fn dilate(coverage: &[u8], width: u32, height: u32, radius: f32) -> Vec<u8> {
    let (w, h) = (width as i64, height as i64);
    let mut out = coverage.to_vec();
    if radius <= 0.0 {
        return out;
    }

    let reach = radius.ceil() as i64 + 1;
    let mut kernel = Vec::new();
    for dy in -reach..=reach {
        for dx in -reach..=reach {
            let d = ((dx * dx + dy * dy) as f32).sqrt();
            let weight = (radius + 1.0 - d).clamp(0.0, 1.0);
            if weight > 0.0 {
                kernel.push((dx, dy, weight));
            }
        }
    }

    for y in 0..h {
        for x in 0..w {
            let mut best = 0.0f32;
            for &(dx, dy, weight) in &kernel {
                let (nx, ny) = (x + dx, y + dy);
                if nx < 0 || ny < 0 || nx >= w || ny >= h {
                    continue;
                }
                let c = coverage[(ny * w + nx) as usize] as f32 * weight;
                if c > best {
                    best = c;
                    if best >= 255.0 {
                        break;
                    }
                }
            }
            out[(y * w + x) as usize] = best.round() as u8;
        }
    }
    out
}

/// `outer * (1 - inner)` per pixel
pub fn subtract(outer: &[u8], inner: &[u8]) -> Vec<u8> {
    outer
        .iter()
        .zip(inner)
        .map(|(&o, &i)| ((o as u32 * (255 - i as u32) + 127) / 255) as u8)
        .collect()
}

/// Replace a filled silhouette by a ring of constant `thickness` around it
pub fn outline_ring(mask: &mut Mask, thickness: f32) {
    let (width, height) = (mask.width(), mask.height());
    let original = mask.data().to_vec();
    let grown = dilate(&original, width, height, thickness);
    let ring = subtract(&grown, &original);
    mask.data_mut().copy_from_slice(&ring);
}
