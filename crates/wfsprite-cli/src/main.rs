//! wfsprite CLI - generate watchface texture archives from the command line

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match &cli.command {
        Commands::Glyphs(args) => commands::generate::run_glyphs(args, cli.quiet),
        Commands::Progress(args) => commands::generate::run_progress(args, cli.quiet),
        Commands::Axes => commands::axes::run(),
        Commands::Fields(args) => commands::fields::run(args),
        Commands::Watch(args) => commands::watch::run(args, cli.quiet),
    }
}
