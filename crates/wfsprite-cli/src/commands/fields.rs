use anyhow::Result;
use wfsprite::core::config::{FieldSet, GlyphSpriteConfig, ProgressTextureConfig};

use crate::cli::{FieldsArgs, Mode};

pub fn run(args: &FieldsArgs) -> Result<()> {
    let names = match args.mode {
        Mode::Glyphs => GlyphSpriteConfig::field_names(),
        Mode::Progress => ProgressTextureConfig::field_names(),
    };
    for name in names {
        println!("{name}");
    }
    Ok(())
}
