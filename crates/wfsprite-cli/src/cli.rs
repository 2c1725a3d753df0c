//! CLI argument definitions using Clap v4

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use wfsprite::core::types::BatchMode;

/// wfsprite - watchface glyph sprites and progress textures
#[derive(Parser, Debug)]
#[command(name = "wfsprite")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log debug details (wins over `--quiet`)
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// Only log warnings and errors, skip the item summary
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate one glyph sprite per symbol of a sequence
    #[command(alias = "g")]
    Glyphs(GlyphsArgs),

    /// Generate progress frames from 0% to 100%
    #[command(alias = "p")]
    Progress(ProgressArgs),

    /// List the variable-font axis catalog
    Axes,

    /// List the field names `--set` accepts
    Fields(FieldsArgs),

    /// Regenerate whenever a config file changes
    Watch(WatchArgs),
}

/// Which kind of batch to generate
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    Glyphs,
    Progress,
}

impl From<Mode> for BatchMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Glyphs => BatchMode::Glyphs,
            Mode::Progress => BatchMode::Progress,
        }
    }
}

/// Options shared by every generating command
#[derive(Args, Debug)]
pub struct SourceArgs {
    /// JSON config file; missing keys keep their defaults
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Field override applied after the config file, e.g. `--set steps=20`
    #[arg(short = 's', long = "set", value_name = "FIELD=VALUE", action = ArgAction::Append)]
    pub set: Vec<String>,

    /// Directory the zip archive is written to
    #[arg(short = 'o', long = "output", default_value = ".")]
    pub output: PathBuf,

    /// Print the effective config as JSON and exit
    #[arg(long = "dump-config")]
    pub dump_config: bool,
}

/// Arguments for the glyphs command
#[derive(Args, Debug)]
pub struct GlyphsArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Extra font file to register before resolving the family
    #[arg(short = 'f', long = "font-file", action = ArgAction::Append)]
    pub font_file: Vec<PathBuf>,

    /// Never download fonts named by stylesheet URLs
    #[arg(long = "offline")]
    pub offline: bool,

    /// Also write each item's SVG description next to the archive
    #[arg(long = "preview-svg")]
    pub preview_svg: bool,
}

/// Arguments for the progress command
#[derive(Args, Debug)]
pub struct ProgressArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

/// Arguments for the fields command
#[derive(Args, Debug)]
pub struct FieldsArgs {
    #[arg(value_enum)]
    pub mode: Mode,
}

/// Arguments for the watch command
#[derive(Args, Debug)]
pub struct WatchArgs {
    #[arg(value_enum)]
    pub mode: Mode,

    /// Config file to watch
    #[arg(short = 'c', long = "config")]
    pub config: PathBuf,

    /// Directory archives are written to
    #[arg(short = 'o', long = "output", default_value = ".")]
    pub output: PathBuf,

    /// Extra font file to register before resolving the family
    #[arg(short = 'f', long = "font-file", action = ArgAction::Append)]
    pub font_file: Vec<PathBuf>,

    /// Never download fonts named by stylesheet URLs
    #[arg(long = "offline")]
    pub offline: bool,

    /// How often the config file is checked, in milliseconds
    #[arg(long = "poll-ms", default_value = "250")]
    pub poll_ms: u64,

    /// Quiet period before a change is regenerated, in milliseconds
    #[arg(long = "debounce-ms", default_value = "100")]
    pub debounce_ms: u64,

    /// Stop after the first cycle
    #[arg(long = "once")]
    pub once: bool,
}
