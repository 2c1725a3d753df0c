//! In-memory zip archives

use std::io::{Cursor, Write};

use zip::{write::SimpleFileOptions, CompressionMethod, ZipWriter};

use wfsprite_core::{
    error::{ExportError, Result},
    traits::ArchiveWriter,
};

/// Builds a zip archive in memory
pub struct ZipArchiveWriter {
    zip: ZipWriter<Cursor<Vec<u8>>>,
    options: SimpleFileOptions,
}

impl ZipArchiveWriter {
    pub fn new() -> Self {
        Self {
            zip: ZipWriter::new(Cursor::new(Vec::new())),
            options: SimpleFileOptions::default().compression_method(CompressionMethod::Deflated),
        }
    }
}

impl Default for ZipArchiveWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ArchiveWriter for ZipArchiveWriter {
    fn add_directory(&mut self, name: &str) -> Result<()> {
        self.zip
            .add_directory(name, self.options)
            .map_err(|e| ExportError::WriteFailed(format!("directory {name}: {e}")))?;
        Ok(())
    }

    fn add_file(&mut self, path: &str, bytes: &[u8]) -> Result<()> {
        self.zip
            .start_file(path, self.options)
            .map_err(|e| ExportError::WriteFailed(format!("entry {path}: {e}")))?;
        self.zip
            .write_all(bytes)
            .map_err(|e| ExportError::WriteFailed(format!("entry {path}: {e}")))?;
        Ok(())
    }

    fn finish(self: Box<Self>) -> Result<Vec<u8>> {
        let cursor = self
            .zip
            .finish()
            .map_err(|e| ExportError::WriteFailed(format!("archive: {e}")))?;
        Ok(cursor.into_inner())
    }
}
