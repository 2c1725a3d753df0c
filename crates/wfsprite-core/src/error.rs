//! Error types for wfsprite

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SpriteError>;

/// Main error type for wfsprite
#[derive(Debug, Error)]
pub enum SpriteError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Font loading failed: {0}")]
    FontLoad(#[from] FontLoadError),

    #[error("Shaping failed: {0}")]
    ShapingFailed(#[from] ShapingError),

    #[error("Rendering failed: {0}")]
    RenderingFailed(#[from] RenderError),

    #[error("Export failed: {0}")]
    ExportFailed(#[from] ExportError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Problems with a configuration snapshot that stop a generation cycle
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' requires a number, got '{value}'")]
    NotANumber { field: &'static str, value: String },

    #[error("Field '{field}' must be positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Invalid value for '{field}': {value}")]
    InvalidValue { field: &'static str, value: String },

    #[error("Sequence produced no items")]
    EmptySequence,

    #[error("Gradient needs at least 2 stops, got {0}")]
    TooFewStops(usize),

    #[error("Gradient stop index {index} out of range ({len} stops)")]
    StopOutOfRange { index: usize, len: usize },

    #[error("Unknown variation axis: {0}")]
    UnknownAxis(String),

    #[error("Invalid color: {0}")]
    InvalidColor(String),
}

/// Font loading errors
#[derive(Debug, Error)]
pub enum FontLoadError {
    #[error("Font file not found: {0}")]
    FileNotFound(String),

    #[error("Invalid font data")]
    InvalidData,

    #[error("System font not found: {0}")]
    SystemFontNotFound(String),

    #[error("Remote font unavailable: {0}")]
    Remote(String),
}

/// Shaping errors
#[derive(Debug, Error)]
pub enum ShapingError {
    #[error("Invalid font data for shaping")]
    InvalidFont,

    #[error("Backend error: {0}")]
    BackendError(String),
}

/// Rendering errors
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Invalid font data")]
    InvalidFont,

    #[error("Glyph {0} not found")]
    GlyphNotFound(u32),

    #[error("Outline extraction failed")]
    OutlineExtractionFailed,

    #[error("Path building failed")]
    PathBuildingFailed,

    #[error("Pixmap creation failed")]
    PixmapCreationFailed,

    #[error("Backend error: {0}")]
    BackendError(String),
}

/// Export errors
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Nothing to export")]
    EmptyBatch,

    #[error("Encoding failed: {0}")]
    EncodingFailed(String),

    #[error("Write failed: {0}")]
    WriteFailed(String),
}
