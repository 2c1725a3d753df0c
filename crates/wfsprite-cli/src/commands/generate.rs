//! `glyphs` and `progress`: one cycle, one archive

use std::path::Path;

use anyhow::{Context, Result};
use wfsprite::{
    core::{
        config::{GlyphSpriteConfig, ProgressTextureConfig},
        types::{Batch, BatchMode},
    },
    export::BatchExporter,
    fontdb::FontResolver,
    Engine, Session,
};

use super::{build_engine, load_draft, print_summary};
use crate::cli::{GlyphsArgs, ProgressArgs};

pub fn run_glyphs(args: &GlyphsArgs, quiet: bool) -> Result<()> {
    let draft: GlyphSpriteConfig =
        load_draft(args.source.config.as_deref(), &args.source.set)?;
    if args.source.dump_config {
        println!("{}", serde_json::to_string_pretty(&draft)?);
        return Ok(());
    }

    let engine = build_engine(&args.font_file, args.offline)?;
    let mut session = Session::new(engine, BatchMode::Glyphs);
    *session.glyph_config_mut() = draft;
    finish(&mut session, &args.source.output, quiet)?;

    if args.preview_svg {
        if let Some(batch) = session.last_batch() {
            write_svgs(batch, &args.source.output)?;
        }
    }
    Ok(())
}

pub fn run_progress(args: &ProgressArgs, quiet: bool) -> Result<()> {
    let draft: ProgressTextureConfig =
        load_draft(args.source.config.as_deref(), &args.source.set)?;
    if args.source.dump_config {
        println!("{}", serde_json::to_string_pretty(&draft)?);
        return Ok(());
    }

    // progress frames never touch a font
    let engine = Engine::builder().resolver(FontResolver::default()).build();
    let mut session = Session::new(engine, BatchMode::Progress);
    *session.progress_config_mut() = draft;
    finish(&mut session, &args.source.output, quiet)
}

fn finish(session: &mut Session, output: &Path, quiet: bool) -> Result<()> {
    let batch = session.regenerate().context("generation failed")?;
    if !quiet {
        print_summary(batch);
    }
    let path = session.export_to_dir(output)?;
    println!("{}", path.display());
    Ok(())
}

/// `{prefix}_{index}{suffix}.svg` per item that has a description
fn write_svgs(batch: &Batch, dir: &Path) -> Result<()> {
    let names = BatchExporter::new();
    for item in &batch.items {
        let Some(svg) = &item.svg else {
            continue;
        };
        let entry = names.entry_name(&batch.prefix, item.index, &batch.suffix);
        let path = dir.join(Path::new(&entry).with_extension("svg"));
        std::fs::write(&path, svg).with_context(|| format!("writing {}", path.display()))?;
        log::debug!("Wrote {}", path.display());
    }
    Ok(())
}
