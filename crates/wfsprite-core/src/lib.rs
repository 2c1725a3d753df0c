//! wfsprite core: the data that flows from a settings snapshot to a batch of textures
//!
//! A generation cycle always follows the same route:
//!
//! 1. **Snapshot** - a mutable draft config is validated and frozen
//! 2. **Measure** - every symbol is shaped once to find one shared baseline
//! 3. **Rasterize** - each symbol or progress step becomes a fixed-size RGBA bitmap
//! 4. **Export** - the batch becomes named PNG entries inside one archive
//!
//! This crate holds the models every stage shares: the variable-font axis
//! catalog, the gradient model, sequence tokenization, per-mode configs and
//! the traits that backends implement.
//!
//! ```rust
//! use wfsprite_core::sequence::tokenize;
//!
//! assert_eq!(tokenize("0,1,2,10,11"), vec!["0", "1", "2", "10", "11"]);
//! assert_eq!(tokenize("AB").len(), 2);
//! ```

pub mod axes;
pub mod color;
pub mod config;
pub mod error;
pub mod gradient;
pub mod sequence;
pub mod shape;
pub mod traits;

#[cfg(test)]
mod proptests;

pub use color::Color;
pub use error::{Result, SpriteError, ValidationError};
pub use traits::{ArchiveWriter, Exporter, FontRef, Measurer, Shaper};

/// The data structures passed between stages
pub mod types {
    /// Unique identifier for a glyph within a font
    pub type GlyphId = u32;

    /// Which way the text flows
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Direction {
        LeftToRight,
        RightToLeft,
    }

    /// A glyph that knows exactly where it belongs
    #[derive(Debug, Clone, PartialEq)]
    pub struct PositionedGlyph {
        pub id: GlyphId,
        pub x: f32,
        pub y: f32,
        pub advance: f32,
        pub cluster: u32,
    }

    /// What emerges after shaping: glyphs positioned and ready to render
    #[derive(Debug, Clone)]
    pub struct ShapingResult {
        pub glyphs: Vec<PositionedGlyph>,
        pub advance_width: f32,
        pub advance_height: f32,
        pub direction: Direction,
    }

    /// Raw pixel data of one texture
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct BitmapData {
        pub width: u32,
        pub height: u32,
        pub format: BitmapFormat,
        pub data: Vec<u8>,
    }

    impl BitmapData {
        /// Fully transparent RGBA bitmap
        pub fn transparent(width: u32, height: u32) -> Self {
            Self {
                width,
                height,
                format: BitmapFormat::Rgba8,
                data: vec![0; width as usize * height as usize * 4],
            }
        }

        /// Straight-alpha RGBA of pixel (x, y), if the bitmap is RGBA8 and the pixel exists
        pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
            if self.format != BitmapFormat::Rgba8 || x >= self.width || y >= self.height {
                return None;
            }
            let i = (y as usize * self.width as usize + x as usize) * 4;
            let px = self.data.get(i..i + 4)?;
            Some([px[0], px[1], px[2], px[3]])
        }

        /// True when no pixel carries any alpha
        pub fn is_blank(&self) -> bool {
            match self.format {
                BitmapFormat::Rgba8 => self.data.chunks_exact(4).all(|px| px[3] == 0),
                BitmapFormat::Gray8 => self.data.iter().all(|&v| v == 0),
            }
        }
    }

    /// How pixels are arranged in the bitmap
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum BitmapFormat {
        Rgba8,
        Gray8,
    }

    /// Ink extent of one shaped symbol, relative to the alphabetic baseline
    ///
    /// `ascent` grows upwards and `descent` downwards; both are zero for blank ink.
    #[derive(Debug, Clone, Copy, PartialEq, Default)]
    pub struct InkExtent {
        pub ascent: f32,
        pub descent: f32,
        pub advance: f32,
    }

    /// Shared vertical baseline of a glyph batch, in box pixels from the top
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct Baseline {
        pub common_y: f32,
    }

    /// Which plugin mode produced a batch
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum BatchMode {
        Glyphs,
        Progress,
    }

    impl BatchMode {
        /// Top-level folder inside the archive
        pub fn folder(&self) -> &'static str {
            match self {
                BatchMode::Glyphs => "watchface_assets",
                BatchMode::Progress => "progress_assets",
            }
        }

        /// Archive file name stem, completed with a millisecond timestamp
        pub fn archive_stem(&self) -> &'static str {
            match self {
                BatchMode::Glyphs => "miband_assets",
                BatchMode::Progress => "progress_textures",
            }
        }
    }

    /// One texture of a batch
    #[derive(Debug, Clone)]
    pub struct GeneratedItem {
        pub index: usize,
        /// The symbol this glyph texture was drawn from; `None` for progress frames
        pub source_symbol: Option<String>,
        /// Preview label (`space`, `A`, `40%`)
        pub label: String,
        pub raster: BitmapData,
        /// Vector description composed before rasterization (glyph mode only)
        pub svg: Option<String>,
    }

    /// An item the backend failed to draw; the rest of the batch continues
    #[derive(Debug, Clone, PartialEq)]
    pub struct SkippedItem {
        pub index: usize,
        pub label: String,
        pub reason: String,
    }

    /// Ordered result of one generation cycle
    #[derive(Debug, Clone)]
    pub struct Batch {
        pub mode: BatchMode,
        pub items: Vec<GeneratedItem>,
        pub skipped: Vec<SkippedItem>,
        /// Shared glyph baseline of the cycle; `None` for progress batches
        pub baseline: Option<Baseline>,
        /// File name parts, `{prefix}_{index}{suffix}.png`
        pub prefix: String,
        pub suffix: String,
    }

    impl Batch {
        pub fn is_empty(&self) -> bool {
            self.items.is_empty()
        }

        pub fn len(&self) -> usize {
            self.items.len()
        }
    }

    /// What the font resolver actually found for a style request
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct FaceSynthesis {
        /// No bold face and no usable `wght` axis: embolden the outlines
        pub bold: bool,
        /// No italic or oblique face: skew the outlines
        pub italic: bool,
    }
}

/// How shaping should behave
#[derive(Debug, Clone)]
pub struct ShapingParams {
    pub size: f32,
    pub direction: types::Direction,
    /// OpenType features like [("tnum", 1), ("kern", 0)]
    pub features: Vec<(String, u32)>,
    /// Variable font coordinates like [("wght", 700.0)]
    pub variations: Vec<(String, f32)>,
}

impl Default for ShapingParams {
    fn default() -> Self {
        Self {
            size: 48.0,
            direction: types::Direction::LeftToRight,
            features: Vec::new(),
            variations: Vec::new(),
        }
    }
}
