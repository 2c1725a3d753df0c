//! The contracts between the engine and its backends
//!
//! - [`FontRef`] - Your window into font data and metrics
//! - [`Shaper`] - Where symbols become positioned glyphs
//! - [`Measurer`] - Ink extents used to find the shared baseline
//! - [`Exporter`] - Where bitmaps become file bytes
//! - [`ArchiveWriter`] - Where named byte blobs become one archive

use crate::{error::Result, types::*, ShapingParams};
use std::sync::Arc;

/// Your key to unlocking font secrets
///
/// ```ignore
/// struct MyFont {
///     data: Vec<u8>,
/// }
///
/// impl FontRef for MyFont {
///     fn data(&self) -> &[u8] {
///         &self.data
///     }
///
///     fn units_per_em(&self) -> u16 {
///         1000
///     }
///
///     fn glyph_id(&self, ch: char) -> Option<GlyphId> {
///         Some(42)
///     }
///
///     fn advance_width(&self, glyph_id: GlyphId) -> f32 {
///         500.0
///     }
/// }
/// ```
pub trait FontRef: Send + Sync {
    /// Raw font bytes as they live in the file
    fn data(&self) -> &[u8];

    /// The font's internal coordinate system scale
    fn units_per_em(&self) -> u16;

    /// Find the glyph that represents this character
    ///
    /// Returns None when the font doesn't contain this character.
    fn glyph_id(&self, ch: char) -> Option<GlyphId>;

    /// How wide this glyph stands in font units
    fn advance_width(&self, glyph_id: GlyphId) -> f32;

    /// Variation axis tags this face exposes (empty for static fonts)
    fn axis_tags(&self) -> Vec<String> {
        Vec::new()
    }

    /// Family name the face was resolved to, for logs and labels
    fn family_name(&self) -> Option<String> {
        None
    }
}

/// Where symbols learn their positions
pub trait Shaper: Send + Sync {
    /// Identify yourself in logs and error messages
    fn name(&self) -> &'static str;

    /// Transform characters into positioned glyphs
    fn shape(
        &self,
        text: &str,
        font: Arc<dyn FontRef>,
        params: &ShapingParams,
    ) -> Result<ShapingResult>;
}

/// Measures the real ink of one symbol under a fixed style
///
/// The baseline resolver only needs this, so the arithmetic can be exercised
/// without loading a font.
pub trait Measurer {
    fn ink_extent(&self, symbol: &str) -> Result<InkExtent>;
}

/// The final step: bitmaps become file bytes
pub trait Exporter: Send + Sync {
    /// Who are you?
    fn name(&self) -> &'static str;

    /// Encode one texture as bytes
    fn export(&self, bitmap: &BitmapData) -> Result<Vec<u8>>;

    /// What file extension should be used?
    fn extension(&self) -> &'static str;

    /// What MIME type identifies your format?
    fn mime_type(&self) -> &'static str;
}

/// Write named byte blobs into one archive
pub trait ArchiveWriter {
    /// Create a directory entry such as `assets/`
    fn add_directory(&mut self, name: &str) -> Result<()>;

    /// Add one file at `path` (slash separated, relative to the archive root)
    fn add_file(&mut self, path: &str, bytes: &[u8]) -> Result<()>;

    /// Close the archive and hand back its bytes
    fn finish(self: Box<Self>) -> Result<Vec<u8>>;
}
