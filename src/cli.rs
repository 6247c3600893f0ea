use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "vigil")]
#[command(version)]
#[command(about = "Declarative management of remote monitors", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Manifest file describing the desired monitors
    #[arg(short, long, default_value = "vigil.toml", global = true)]
    pub manifest: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show what apply would change, without touching anything
    Plan,

    /// Reconcile remote monitors with the manifest
    Apply {
        /// Show what would be done without making remote calls
        #[arg(long)]
        dry_run: bool,
    },

    /// Delete every tracked monitor
    Destroy {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Adopt an existing remote monitor into tracked state
    Import {
        /// Declared name to track the monitor under
        name: String,

        /// Remote monitor id
        id: i64,
    },

    /// List tracked monitors and their remote state
    List {
        /// Fetch the server's monitor list instead of reading local state
        #[arg(long)]
        remote: bool,
    },

    /// Check the manifest without contacting the server
    Validate,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
