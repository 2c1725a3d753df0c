//! Vector description of a glyph sprite
//!
//! The same box, anchor and styling the rasterizer uses, written as one SVG
//! `<text>` element. Outline mode adds a dilate-then-cut filter that matches
//! the raster ring. It accompanies each glyph item as a preview artifact.

use std::fmt::Write;

use wfsprite_core::{
    config::GlyphSnapshot,
    error::{RenderError, Result},
    types::Baseline,
};

/// Escape the five XML special characters
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// SVG document for `symbol` drawn with `snapshot` in the resolved `family`
pub fn svg_description(
    snapshot: &GlyphSnapshot,
    family: &str,
    symbol: &str,
    baseline: Baseline,
) -> Result<String> {
    let (width, height) = (snapshot.width, snapshot.height);
    let x = width as f32 / 2.0 + snapshot.h_offset;
    let color = snapshot.color.to_hex();

    let tabular = snapshot
        .features
        .iter()
        .any(|(tag, value)| tag == "tnum" && *value != 0);
    let mut style = format!("font-feature-settings: {};", snapshot.feature_settings);
    if tabular {
        style.push_str(" font-variant-numeric: tabular-nums;");
    }
    write!(style, " font-variation-settings: {};", snapshot.variation_settings)
        .map_err(|_| RenderError::PathBuildingFailed)?;

    let mut svg = String::new();
    writeln!(
        &mut svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    )
    .map_err(|_| RenderError::PathBuildingFailed)?;

    // Outline mode keeps the glyph filled and cuts the ring out of its dilation
    let filter_attr = if snapshot.outline_only {
        writeln!(
            &mut svg,
            r#"  <defs><filter id="ring" x="-50%" y="-50%" width="200%" height="200%"><feMorphology in="SourceGraphic" operator="dilate" radius="{}" result="grown"/><feComposite in="grown" in2="SourceGraphic" operator="out"/></filter></defs>"#,
            snapshot.outline_thickness
        )
        .map_err(|_| RenderError::PathBuildingFailed)?;
        r#" filter="url(#ring)""#
    } else {
        ""
    };

    writeln!(
        &mut svg,
        r#"  <text x="{:.2}" y="{:.2}" text-anchor="middle" dominant-baseline="alphabetic" font-family="{}" font-size="{}" font-weight="{}" font-style="{}" text-decoration="{}" fill="{}"{} style="{}">{}</text>"#,
        x,
        baseline.common_y,
        escape_xml(family),
        snapshot.font_size,
        if snapshot.bold { "bold" } else { "normal" },
        if snapshot.italic { "italic" } else { "normal" },
        if snapshot.underline { "underline" } else { "none" },
        color,
        filter_attr,
        escape_xml(&style),
        escape_xml(symbol)
    )
    .map_err(|_| RenderError::PathBuildingFailed)?;
    writeln!(&mut svg, "</svg>").map_err(|_| RenderError::PathBuildingFailed)?;
    Ok(svg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wfsprite_core::config::GlyphSpriteConfig;

    fn snapshot() -> GlyphSnapshot {
        GlyphSpriteConfig::default().snapshot().unwrap()
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(escape_xml(r#"<a&"b'>"#), "&lt;a&amp;&quot;b&#39;&gt;");
        assert_eq!(escape_xml("42"), "42");
    }

    #[test]
    fn text_is_anchored_on_box_center_and_baseline() {
        let svg = svg_description(&snapshot(), "Inter", "7", Baseline { common_y: 41.5 }).unwrap();
        assert!(svg.contains(r#"x="20.00""#));
        assert!(svg.contains(r#"y="41.50""#));
        assert!(svg.contains(r#"font-family="Inter""#));
        assert!(svg.contains(">7</text>"));
        assert!(svg.contains("tabular-nums"));
        assert!(svg.contains("font-variation-settings: normal;"));
        assert!(svg.contains(r##"fill="#ffffff""##));
        assert!(!svg.contains("<filter"));
    }

    #[test]
    fn outline_mode_cuts_a_dilated_ring() {
        let mut snap = snapshot();
        snap.outline_only = true;
        snap.underline = true;
        let svg = svg_description(&snap, "Inter", "<", Baseline { common_y: 40.0 }).unwrap();
        assert!(svg.contains(r#"<feMorphology in="SourceGraphic" operator="dilate" radius="2""#));
        assert!(svg.contains(r#"<feComposite in="grown" in2="SourceGraphic" operator="out"/>"#));
        assert!(svg.contains(r##"fill="#ffffff" filter="url(#ring)""##));
        assert!(!svg.contains("stroke"));
        assert!(svg.contains(r#"text-decoration="underline""#));
        assert!(svg.contains(">&lt;</text>"));
    }
}
