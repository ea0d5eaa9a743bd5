//! Command-line interface definitions using clap

use clap::{Parser, Subcommand};

/// Shortener - map URLs to short keys
#[derive(Parser)]
#[command(name = "shortener")]
#[command(version)]
#[command(about = "Allocate short keys for URLs and look them up again", long_about = None)]
pub struct Cli {
    /// Configuration file path (default: config.toml)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Allocate a short key for a URL and store it
    Add {
        /// Target URL (must be absolute, e.g. https://example.com/page)
        target_url: String,
    },

    /// Print the URL stored under a key
    Get {
        /// Short key
        key: String,
    },

    /// List all short links
    List {
        /// Print as a JSON object instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print the number of stored short links
    Count,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Configuration management commands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: config.example.toml)
        output_path: Option<String>,
    },
}
