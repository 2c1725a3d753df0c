//! wfsprite - watchface texture generation
//!
//! Two kinds of asset sets come out of one engine:
//!
//! 1. **Glyph sprites**: one fixed-size texture per symbol of a sequence, all
//!    sharing a baseline measured from the whole set
//! 2. **Progress frames**: `steps + 1` textures of an arc, disk or segment
//!    filling from 0% to 100%
//!
//! A [`Session`] holds the editable drafts, debounces regeneration requests and
//! keeps the last completed [`Batch`](wfsprite_core::types::Batch), which is what
//! gets exported as a zip archive of PNG files.
//!
//! ```no_run
//! use wfsprite::{Engine, Session};
//! use wfsprite::core::types::BatchMode;
//!
//! let mut session = Session::new(Engine::new(), BatchMode::Glyphs);
//! session.set_field("sequence", "0123456789:")?;
//! session.regenerate()?;
//! let path = session.export_to_dir(std::path::Path::new("out"))?;
//! println!("wrote {}", path.display());
//! # Ok::<(), wfsprite::core::SpriteError>(())
//! ```

pub mod engine;
pub mod scheduler;
pub mod session;

pub use engine::{CycleRequest, Engine, EngineBuilder};
pub use scheduler::{Debouncer, DEFAULT_QUIET_PERIOD};
pub use session::Session;

pub use wfsprite_core as core;
pub use wfsprite_export as export;
pub use wfsprite_fontdb as fontdb;

/// Common imports for typical usage
pub mod prelude {
    pub use crate::{CycleRequest, Engine, Session};
    pub use wfsprite_core::{
        config::{FieldSet, GlyphSpriteConfig, ProgressTextureConfig},
        error::{Result, SpriteError, ValidationError},
        types::{Batch, BatchMode, GeneratedItem},
        Color,
    };
}
