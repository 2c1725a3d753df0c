//! Packaging a whole batch into one downloadable archive
//!
//! Layout: one top-level folder per mode, one `{prefix}_{index}{suffix}.png`
//! entry per item. Names derive from the item index alone, so two items can
//! never collide whatever the symbols are.

use std::fs;
use std::path::{Path, PathBuf};

use wfsprite_core::{
    error::{ExportError, Result},
    traits::{ArchiveWriter, Exporter},
    types::{Batch, BatchMode},
};

use crate::{archive::ZipArchiveWriter, png::PngExporter};

/// A finished archive and the file name it should be saved under
#[derive(Debug, Clone)]
pub struct ExportedArchive {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Turns batches into archives of encoded textures
pub struct BatchExporter {
    exporter: Box<dyn Exporter>,
}

impl BatchExporter {
    /// PNG entries
    pub fn new() -> Self {
        Self::with_exporter(Box::new(PngExporter::new()))
    }

    pub fn with_exporter(exporter: Box<dyn Exporter>) -> Self {
        Self { exporter }
    }

    /// `{prefix}_{index}{suffix}.{extension}`
    pub fn entry_name(&self, prefix: &str, index: usize, suffix: &str) -> String {
        format!("{prefix}_{index}{suffix}.{}", self.exporter.extension())
    }

    /// `{stem}_{millis}.zip`
    pub fn archive_name(mode: BatchMode, millis: i64) -> String {
        format!("{}_{millis}.zip", mode.archive_stem())
    }

    /// Encode every item of `batch` into `writer`, named with the timestamp `millis`
    pub fn build_archive(
        &self,
        batch: &Batch,
        mut writer: Box<dyn ArchiveWriter>,
        millis: i64,
    ) -> Result<ExportedArchive> {
        if batch.is_empty() {
            return Err(ExportError::EmptyBatch.into());
        }

        let folder = batch.mode.folder();
        writer.add_directory(&format!("{folder}/"))?;
        for item in &batch.items {
            let bytes = self.exporter.export(&item.raster)?;
            let name = self.entry_name(&batch.prefix, item.index, &batch.suffix);
            writer.add_file(&format!("{folder}/{name}"), &bytes)?;
        }

        let file_name = Self::archive_name(batch.mode, millis);
        log::info!(
            "Packed {} {} into {file_name}",
            batch.len(),
            self.exporter.name()
        );
        Ok(ExportedArchive {
            file_name,
            bytes: writer.finish()?,
        })
    }

    /// Zip archive stamped with the current time
    pub fn export(&self, batch: &Batch) -> Result<ExportedArchive> {
        let millis = chrono::Utc::now().timestamp_millis();
        self.build_archive(batch, Box::new(ZipArchiveWriter::new()), millis)
    }

    /// Export and save into `dir`, returning the archive path
    pub fn write_to_dir(&self, batch: &Batch, dir: &Path) -> Result<PathBuf> {
        let archive = self.export(batch)?;
        fs::create_dir_all(dir)
            .map_err(|e| ExportError::WriteFailed(format!("{}: {e}", dir.display())))?;
        let path = dir.join(&archive.file_name);
        fs::write(&path, &archive.bytes)
            .map_err(|e| ExportError::WriteFailed(format!("{}: {e}", path.display())))?;
        log::info!("Wrote {}", path.display());
        Ok(path)
    }
}

impl Default for BatchExporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wfsprite_core::types::{BitmapData, GeneratedItem};

    fn batch(mode: BatchMode, count: usize) -> Batch {
        Batch {
            mode,
            items: (0..count)
                .map(|index| GeneratedItem {
                    index,
                    source_symbol: None,
                    label: index.to_string(),
                    raster: BitmapData::transparent(4, 4),
                    svg: None,
                })
                .collect(),
            skipped: Vec::new(),
            baseline: None,
            prefix: "progress".to_string(),
            suffix: "_s".to_string(),
        }
    }

    #[test]
    fn names_follow_layout() {
        let exporter = BatchExporter::new();
        assert_eq!(exporter.entry_name("char", 3, ""), "char_3.png");
        assert_eq!(exporter.entry_name("progress", 10, "_big"), "progress_10_big.png");
        assert_eq!(
            BatchExporter::archive_name(BatchMode::Glyphs, 1700000000123),
            "miband_assets_1700000000123.zip"
        );
        assert_eq!(
            BatchExporter::archive_name(BatchMode::Progress, 5),
            "progress_textures_5.zip"
        );
    }

    #[test]
    fn empty_batch_is_refused() {
        let err = BatchExporter::new().export(&batch(BatchMode::Glyphs, 0)).unwrap_err();
        assert!(err.to_string().contains("Nothing to export"));
    }

    #[test]
    fn archive_holds_one_entry_per_item() {
        let archive = BatchExporter::new()
            .build_archive(
                &batch(BatchMode::Progress, 3),
                Box::new(ZipArchiveWriter::new()),
                42,
            )
            .unwrap();
        assert_eq!(archive.file_name, "progress_textures_42.zip");

        let reader = zip::ZipArchive::new(std::io::Cursor::new(archive.bytes)).unwrap();
        let mut names: Vec<&str> = reader.file_names().collect();
        names.sort_unstable();
        assert_eq!(
            names,
            vec![
                "progress_assets/",
                "progress_assets/progress_0_s.png",
                "progress_assets/progress_1_s.png",
                "progress_assets/progress_2_s.png",
            ]
        );
    }
}
