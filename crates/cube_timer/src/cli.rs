//! Command-line interface for cube_timer.

use clap::{Parser, Subcommand};

/// Cube Timer - WCA-style scramble service and spacebar timer
#[derive(Parser, Debug)]
#[command(name = "cube_timer")]
#[command(about = "Scramble service and terminal timer for speedcubing", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the scramble HTTP service
    Serve {
        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<std::path::PathBuf>,

        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides config and PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Run the terminal timer
    Tui {
        /// Scramble service URL. If not provided, scrambles are generated locally.
        #[arg(long)]
        server_url: Option<String>,

        /// Moves per scramble
        #[arg(short, long, default_value = "20")]
        length: usize,
    },

    /// Print scrambles to stdout, one per line
    Generate {
        /// Moves per scramble
        #[arg(default_value = "20")]
        length: usize,

        /// Number of scrambles
        #[arg(short, long, default_value = "1")]
        count: usize,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },
}
