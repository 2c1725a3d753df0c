//! Shaping with whatever font the machine has; skipped when none is installed

use std::sync::Arc;

use wfsprite_core::{traits::FontRef, traits::Shaper, ShapingParams};
use wfsprite_fontdb::{FontResolver, StyleRequest};
use wfsprite_shape_hr::HarfrustShaper;

fn system_font() -> Option<Arc<dyn FontRef>> {
    let mut resolver = FontResolver::system();
    resolver.set_fetch_remote(false);
    match resolver.resolve(&StyleRequest::new("sans-serif", false, false)) {
        Ok(resolved) => Some(resolved.font as Arc<dyn FontRef>),
        Err(_) => {
            eprintln!("skipping: no system fonts installed");
            None
        },
    }
}

#[test]
fn digits_shape_to_real_glyphs() {
    let Some(font) = system_font() else {
        return;
    };
    if "0123".chars().any(|c| font.glyph_id(c).is_none()) {
        eprintln!("skipping: fallback font has no digits");
        return;
    }

    let params = ShapingParams {
        size: 48.0,
        features: vec![("tnum".to_string(), 1), ("kern".to_string(), 1)],
        ..Default::default()
    };
    let shaped = HarfrustShaper::new().shape("0123", font, &params).unwrap();
    assert_eq!(shaped.glyphs.len(), 4);
    assert!(shaped.advance_width > 0.0);
    assert!(shaped.glyphs.iter().all(|g| g.id > 0));
}

#[test]
fn shaping_is_deterministic() {
    let Some(font) = system_font() else {
        return;
    };
    let shaper = HarfrustShaper::new();
    let params = ShapingParams::default();
    let a = shaper.shape("AV-", font.clone(), &params).unwrap();
    let b = shaper.shape("AV-", font, &params).unwrap();
    assert_eq!(a.glyphs, b.glyphs);
}
