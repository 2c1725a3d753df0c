//! An editing session: drafts, debounced cycles and the last good batch
//!
//! Drafts are edited freely; a cycle freezes the active draft into a snapshot
//! first. A cycle that fails (invalid settings, no usable font) leaves the
//! previous batch in place, and export always reads the last completed batch.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use wfsprite_core::{
    config::{FieldSet, GlyphSpriteConfig, ProgressTextureConfig},
    error::{ExportError, Result, ValidationError},
    types::{Batch, BatchMode},
};
use wfsprite_export::{BatchExporter, ExportedArchive};

use crate::{
    engine::{CycleRequest, Engine},
    scheduler::{Debouncer, DEFAULT_QUIET_PERIOD},
};

pub struct Session {
    engine: Engine,
    mode: BatchMode,
    glyphs: GlyphSpriteConfig,
    progress: ProgressTextureConfig,
    scheduler: Debouncer<CycleRequest>,
    last: Option<Batch>,
    exporter: BatchExporter,
}

impl Session {
    pub fn new(engine: Engine, mode: BatchMode) -> Self {
        Self::with_quiet_period(engine, mode, DEFAULT_QUIET_PERIOD)
    }

    pub fn with_quiet_period(engine: Engine, mode: BatchMode, quiet: Duration) -> Self {
        Self {
            engine,
            mode,
            glyphs: GlyphSpriteConfig::default(),
            progress: ProgressTextureConfig::default(),
            scheduler: Debouncer::new(quiet),
            last: None,
            exporter: BatchExporter::new(),
        }
    }

    pub fn mode(&self) -> BatchMode {
        self.mode
    }

    /// Switch modes; a pending request for the other mode is dropped
    pub fn set_mode(&mut self, mode: BatchMode) {
        if self.mode != mode {
            self.scheduler.cancel();
            self.mode = mode;
        }
    }

    pub fn glyph_config(&self) -> &GlyphSpriteConfig {
        &self.glyphs
    }

    pub fn glyph_config_mut(&mut self) -> &mut GlyphSpriteConfig {
        &mut self.glyphs
    }

    pub fn progress_config(&self) -> &ProgressTextureConfig {
        &self.progress
    }

    pub fn progress_config_mut(&mut self) -> &mut ProgressTextureConfig {
        &mut self.progress
    }

    pub fn engine_mut(&mut self) -> &mut Engine {
        &mut self.engine
    }

    /// Set a field of the active draft by its external name
    pub fn set_field(&mut self, name: &str, raw: &str) -> std::result::Result<(), ValidationError> {
        match self.mode {
            BatchMode::Glyphs => self.glyphs.set_field(name, raw),
            BatchMode::Progress => self.progress.set_field(name, raw),
        }
    }

    /// Freeze the active draft
    pub fn snapshot(&self) -> std::result::Result<CycleRequest, ValidationError> {
        Ok(match self.mode {
            BatchMode::Glyphs => CycleRequest::Glyphs(self.glyphs.snapshot()?),
            BatchMode::Progress => CycleRequest::Progress(self.progress.snapshot()?),
        })
    }

    /// Run a cycle now and keep its batch
    pub fn regenerate(&mut self) -> Result<&Batch> {
        let request = self.snapshot()?;
        self.run(&request)
    }

    /// Schedule a cycle after the quiet period; invalid drafts are rejected immediately
    pub fn request_regeneration(&mut self, now: Instant) -> std::result::Result<(), ValidationError> {
        let request = self.snapshot()?;
        if self.scheduler.request(request, now) {
            log::debug!("Replaced pending regeneration");
        }
        Ok(())
    }

    /// Run the pending cycle if its quiet period has passed
    pub fn tick(&mut self, now: Instant) -> Option<Result<&Batch>> {
        let request = self.scheduler.poll(now)?;
        Some(self.run(&request))
    }

    pub fn is_pending(&self) -> bool {
        self.scheduler.is_pending()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduler.deadline()
    }

    /// The last batch a cycle completed
    pub fn last_batch(&self) -> Option<&Batch> {
        self.last.as_ref()
    }

    /// Archive of the last completed batch
    pub fn export(&self) -> Result<ExportedArchive> {
        let batch = self.last.as_ref().ok_or(ExportError::EmptyBatch)?;
        self.exporter.export(batch)
    }

    /// Save the archive of the last completed batch into `dir`
    pub fn export_to_dir(&self, dir: &Path) -> Result<PathBuf> {
        let batch = self.last.as_ref().ok_or(ExportError::EmptyBatch)?;
        self.exporter.write_to_dir(batch, dir)
    }

    fn run(&mut self, request: &CycleRequest) -> Result<&Batch> {
        match self.engine.run(request) {
            Ok(batch) => Ok(self.last.insert(batch)),
            Err(e) => {
                log::warn!("Generation failed, keeping the previous batch: {e}");
                Err(e)
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wfsprite_core::SpriteError;
    use wfsprite_fontdb::FontResolver;

    fn session(mode: BatchMode) -> Session {
        let engine = Engine::builder().resolver(FontResolver::default()).build();
        Session::new(engine, mode)
    }

    #[test]
    fn invalid_field_keeps_previous_batch() {
        let mut session = session(BatchMode::Progress);
        assert_eq!(session.regenerate().unwrap().len(), 11);

        session.set_field("steps", "4").unwrap();
        assert!(session.set_field("radius", "wide").is_err());
        assert_eq!(session.regenerate().unwrap().len(), 5);

        session.progress_config_mut().width = 0;
        assert!(matches!(session.regenerate(), Err(SpriteError::Validation(_))));
        assert_eq!(session.last_batch().map(Batch::len), Some(5));
    }

    #[test]
    fn failed_font_load_keeps_previous_batch() {
        let mut session = session(BatchMode::Progress);
        session.regenerate().unwrap();
        session.set_mode(BatchMode::Glyphs);
        assert!(session.regenerate().is_err());
        assert_eq!(session.last_batch().map(|b| b.mode), Some(BatchMode::Progress));
    }

    #[test]
    fn debounced_requests_run_latest_snapshot() {
        let start = Instant::now();
        let mut session = session(BatchMode::Progress);
        session.request_regeneration(start).unwrap();
        session.set_field("steps", "2").unwrap();
        session
            .request_regeneration(start + Duration::from_millis(50))
            .unwrap();

        assert!(session.tick(start + Duration::from_millis(100)).is_none());
        let batch = session
            .tick(start + Duration::from_millis(150))
            .unwrap()
            .unwrap();
        assert_eq!(batch.len(), 3);
        assert!(!session.is_pending());
    }

    #[test]
    fn invalid_request_is_rejected_synchronously() {
        let mut session = session(BatchMode::Glyphs);
        session.set_field("sequence", "").unwrap();
        assert_eq!(
            session.request_regeneration(Instant::now()),
            Err(ValidationError::EmptySequence)
        );
        assert!(!session.is_pending());
    }

    #[test]
    fn export_needs_a_batch() {
        let mut session = session(BatchMode::Progress);
        assert!(session.export().is_err());
        session.regenerate().unwrap();
        let archive = session.export().unwrap();
        assert!(archive.file_name.starts_with("progress_textures_"));
        assert!(archive.file_name.ends_with(".zip"));
    }
}
