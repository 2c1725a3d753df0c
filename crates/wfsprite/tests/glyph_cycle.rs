//! Full glyph cycles against installed fonts; skipped when none is usable

use wfsprite::prelude::*;
use wfsprite::fontdb::FontResolver;

fn engine() -> Option<Engine> {
    let mut resolver = FontResolver::system();
    resolver.set_fetch_remote(false);
    if resolver.face_count() == 0 {
        eprintln!("skipping: no system fonts installed");
        return None;
    }
    Some(Engine::builder().resolver(resolver).build())
}

fn snapshot(sequence: &str) -> wfsprite::core::config::GlyphSnapshot {
    let mut config = GlyphSpriteConfig::default();
    config.font_family = "sans-serif".to_string();
    config.sequence = sequence.to_string();
    config.snapshot().unwrap()
}

#[test]
fn two_symbols_give_two_items_in_order() {
    let Some(mut engine) = engine() else { return };
    let batch = match engine.generate_glyphs(&snapshot("AB")) {
        Ok(batch) => batch,
        Err(e) => {
            eprintln!("skipping: {e}");
            return;
        },
    };
    let indices: Vec<usize> = batch.items.iter().map(|i| i.index).collect();
    assert_eq!(indices, vec![0, 1]);
    assert_eq!(batch.items[0].source_symbol.as_deref(), Some("A"));
    assert!(batch.baseline.is_some());
    for item in &batch.items {
        assert_eq!((item.raster.width, item.raster.height), (40, 60));
        assert!(item.svg.as_deref().is_some_and(|svg| svg.contains("<text")));
    }
}

#[test]
fn unchanged_snapshot_regenerates_identically() {
    let Some(mut engine) = engine() else { return };
    let snap = snapshot("0123456789-");
    let (Ok(first), Ok(second)) = (engine.generate_glyphs(&snap), engine.generate_glyphs(&snap))
    else {
        return;
    };
    assert_eq!(first.baseline, second.baseline);
    assert_eq!(first.len(), second.len());
    for (a, b) in first.items.iter().zip(&second.items) {
        assert_eq!(a.raster, b.raster);
        assert_eq!(a.svg, b.svg);
    }
}

#[test]
fn list_notation_and_space_labels() {
    let Some(mut engine) = engine() else { return };
    let Ok(batch) = engine.generate_glyphs(&snapshot("10, ,11")) else {
        return;
    };
    // a lone space in list notation is trimmed away
    let labels: Vec<&str> = batch.items.iter().map(|i| i.label.as_str()).collect();
    assert_eq!(labels, vec!["10", "11"]);

    let Ok(batch) = engine.generate_glyphs(&snapshot("1 2")) else {
        return;
    };
    assert_eq!(batch.items[1].label, "space");
    assert!(batch.items[1].raster.is_blank());
}

#[test]
fn exported_archive_uses_prefix_and_suffix() {
    let Some(engine) = engine() else { return };
    let mut session = Session::new(engine, BatchMode::Glyphs);
    session.set_field("font_family", "sans-serif").unwrap();
    session.set_field("sequence", "12").unwrap();
    session.set_field("suffix", "_w").unwrap();
    if session.regenerate().is_err() {
        return;
    }
    let archive = session.export().unwrap();
    assert!(archive.file_name.starts_with("miband_assets_"));

    let reader = zip::ZipArchive::new(std::io::Cursor::new(archive.bytes)).unwrap();
    let mut names: Vec<&str> = reader.file_names().collect();
    names.sort_unstable();
    assert_eq!(
        names,
        vec![
            "watchface_assets/",
            "watchface_assets/char_0_w.png",
            "watchface_assets/char_1_w.png",
        ]
    );
}
