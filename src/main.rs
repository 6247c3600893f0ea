mod cli;
mod commands;
mod config;
mod engine;
mod manifest;
mod payload;
mod state;
mod ui;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use cli::{Cli, Commands};
use std::io;

/// Global context for the application
pub struct Context {
    pub verbose: u8,
    pub quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(if cli.quiet {
            log::LevelFilter::Error
        } else {
            log_level
        })
        .format_timestamp(None)
        .init();

    let ctx = Context {
        verbose: cli.verbose,
        quiet: cli.quiet,
    };

    match cli.command {
        Commands::Plan => commands::plan::run(&ctx, &cli.manifest),
        Commands::Apply { dry_run } => commands::apply::run(&ctx, &cli.manifest, dry_run),
        Commands::Destroy { yes } => commands::destroy::run(&ctx, yes),
        Commands::Import { name, id } => commands::import::run(&ctx, &cli.manifest, &name, id),
        Commands::List { remote } => commands::list::run(&ctx, remote),
        Commands::Validate => commands::validate::run(&ctx, &cli.manifest),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "vigil", &mut io::stdout());
            Ok(())
        }
    }
}
