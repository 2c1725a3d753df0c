//! `watch`: regenerate an archive each time the config file settles
//!
//! The file is polled for a new modification time. Every change is reloaded and
//! handed to the session's debouncer, so a burst of saves yields one cycle.
//! A config that fails to parse or validate is reported and the previous
//! archive stays the latest one.

use std::path::Path;
use std::thread;
use std::time::{Duration, Instant, SystemTime};

use anyhow::{bail, Context, Result};
use wfsprite::{
    core::{
        config::{GlyphSpriteConfig, ProgressTextureConfig},
        types::BatchMode,
    },
    Session,
};

use super::{build_engine, load_draft, print_summary};
use crate::cli::WatchArgs;

pub fn run(args: &WatchArgs, quiet: bool) -> Result<()> {
    let mode = BatchMode::from(args.mode);
    let engine = build_engine(&args.font_file, args.offline)?;
    let mut session =
        Session::with_quiet_period(engine, mode, Duration::from_millis(args.debounce_ms));
    let poll = Duration::from_millis(args.poll_ms.max(1));

    log::info!("Watching {} ({mode:?})", args.config.display());
    let mut seen: Option<SystemTime> = None;
    loop {
        let modified = modified_time(&args.config)?;
        if seen != Some(modified) {
            seen = Some(modified);
            if !reload(&mut session, &args.config) && args.once {
                bail!("{} did not produce a valid config", args.config.display());
            }
        }

        match cycle(&mut session, &args.output, quiet)? {
            Some(true) if args.once => return Ok(()),
            Some(false) if args.once => bail!("generation failed"),
            _ => {},
        }

        let sleep = session
            .next_deadline()
            .map(|due| due.saturating_duration_since(Instant::now()).min(poll))
            .unwrap_or(poll);
        thread::sleep(sleep);
    }
}

fn modified_time(path: &Path) -> Result<SystemTime> {
    std::fs::metadata(path)
        .and_then(|meta| meta.modified())
        .with_context(|| format!("watching {}", path.display()))
}

/// Load the file into the active draft and schedule a cycle; false when rejected
fn reload(session: &mut Session, path: &Path) -> bool {
    let loaded = match session.mode() {
        BatchMode::Glyphs => load_draft::<GlyphSpriteConfig>(Some(path), &[])
            .map(|draft| *session.glyph_config_mut() = draft),
        BatchMode::Progress => load_draft::<ProgressTextureConfig>(Some(path), &[])
            .map(|draft| *session.progress_config_mut() = draft),
    };
    if let Err(e) = loaded {
        log::warn!("{e:#}");
        return false;
    }
    match session.request_regeneration(Instant::now()) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("Not regenerating: {e}");
            false
        },
    }
}

/// Run a due cycle; `Some(true)` once an archive was written
fn cycle(session: &mut Session, output: &Path, quiet: bool) -> Result<Option<bool>> {
    match session.tick(Instant::now()) {
        None => return Ok(None),
        Some(Ok(batch)) => {
            if !quiet {
                print_summary(batch);
            }
        },
        Some(Err(e)) => {
            log::warn!("Generation failed: {e}");
            return Ok(Some(false));
        },
    }
    let path = session.export_to_dir(output)?;
    println!("{}", path.display());
    Ok(Some(true))
}
