//! Export for wfsprite: PNG textures packed into one zip archive per batch

pub mod archive;
pub mod batch;
pub mod png;

pub use archive::ZipArchiveWriter;
pub use batch::{BatchExporter, ExportedArchive};
pub use png::{encode_bitmap_to_png, PngExporter};
