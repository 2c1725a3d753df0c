//! Subcommand implementations

pub mod axes;
pub mod fields;
pub mod generate;
pub mod watch;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use wfsprite::{
    core::{
        config::{apply_overrides, load_json, FieldSet},
        types::Batch,
    },
    Engine,
};

/// Defaults, then the config file, then `--set` overrides
pub(crate) fn load_draft<T>(config: Option<&Path>, overrides: &[String]) -> Result<T>
where
    T: DeserializeOwned + Default + FieldSet,
{
    let mut draft = match config {
        Some(path) => load_json(path).with_context(|| format!("reading {}", path.display()))?,
        None => T::default(),
    };
    apply_overrides(&mut draft, overrides).context("applying --set overrides")?;
    Ok(draft)
}

/// An engine over system fonts plus any extra font files
pub(crate) fn build_engine(font_files: &[PathBuf], offline: bool) -> Result<Engine> {
    let mut engine = Engine::new();
    let resolver = engine.resolver_mut();
    resolver.set_fetch_remote(!offline);
    for path in font_files {
        resolver
            .load_font_file(path)
            .with_context(|| format!("loading font {}", path.display()))?;
    }
    Ok(engine)
}

/// One line per item, then the skipped ones
pub(crate) fn print_summary(batch: &Batch) {
    for item in &batch.items {
        let blank = if item.raster.is_blank() { "  (blank)" } else { "" };
        println!(
            "  [{:>3}] {:<8} {}x{}{}",
            item.index, item.label, item.raster.width, item.raster.height, blank
        );
    }
    for skipped in &batch.skipped {
        println!("  [{:>3}] {:<8} skipped: {}", skipped.index, skipped.label, skipped.reason);
    }
    match batch.baseline {
        Some(baseline) => println!(
            "{} items, {} skipped, baseline at y={:.2}",
            batch.len(),
            batch.skipped.len(),
            baseline.common_y
        ),
        None => println!("{} items, {} skipped", batch.len(), batch.skipped.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use wfsprite::core::config::ProgressTextureConfig;

    fn temp_config(name: &str, json: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "wfsprite_cli_{}_{}.json",
            name,
            std::process::id()
        ));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(json.as_bytes()).unwrap();
        path
    }

    #[test]
    fn overrides_win_over_file() {
        let path = temp_config("overrides", r#"{"steps": 4, "prefix": "ring"}"#);
        let draft: ProgressTextureConfig =
            load_draft(Some(&path), &["steps=2".to_string()]).unwrap();
        assert_eq!(draft.steps, 2);
        assert_eq!(draft.prefix, "ring");
        assert_eq!(draft.width, ProgressTextureConfig::default().width);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn bad_override_is_reported() {
        let err = load_draft::<ProgressTextureConfig>(None, &["radius=wide".to_string()])
            .unwrap_err();
        assert!(format!("{err:#}").contains("radius"));
    }

    #[test]
    fn broken_file_names_the_path() {
        let path = temp_config("broken", "{ not json");
        let err = load_draft::<ProgressTextureConfig>(Some(&path), &[]).unwrap_err();
        assert!(format!("{err:#}").contains("wfsprite_cli_broken"));
        let _ = std::fs::remove_file(path);
    }
}
