//! CLI interface module
//!
//! A thin caller over the allocator and the store. Parsing lives in
//! [`crate::cli`]; this module runs the parsed command.

pub mod commands;

use std::fmt;

use crate::cli::{Commands, ConfigCommands};
use crate::errors::ShortenerError;
use crate::system::lifetime::startup::StartupContext;

#[derive(Debug)]
pub enum CliError {
    StorageError(String),
    InvalidUrl(String),
    NotFound(String),
    CommandError(String),
}

impl CliError {
    /// Format as simple output
    pub fn format_simple(&self) -> String {
        match self {
            CliError::StorageError(msg) => format!("Storage error: {}", msg),
            CliError::InvalidUrl(msg) => format!("Invalid URL: {}", msg),
            CliError::NotFound(msg) => msg.clone(),
            CliError::CommandError(msg) => format!("Command error: {}", msg),
        }
    }

    /// Format as colored output
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        match self {
            CliError::StorageError(msg) => {
                format!("{} {}", "Storage error:".red().bold(), msg.white())
            }
            CliError::InvalidUrl(msg) => {
                format!("{} {}", "Invalid URL:".yellow().bold(), msg.white())
            }
            CliError::NotFound(msg) => format!("{} {}", "✗".red().bold(), msg.white()),
            CliError::CommandError(msg) => {
                format!("{} {}", "Command error:".red().bold(), msg.white())
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CliError {}

impl From<ShortenerError> for CliError {
    fn from(err: ShortenerError) -> Self {
        match err {
            ShortenerError::Validation(msg) => CliError::InvalidUrl(msg),
            ShortenerError::Storage(msg) | ShortenerError::FatalStartup(msg) => {
                CliError::StorageError(msg)
            }
            other => CliError::CommandError(other.format_simple()),
        }
    }
}

/// Commands that need no store.
pub fn run_offline(command: &Commands) -> Option<Result<(), CliError>> {
    match command {
        Commands::Config {
            action: ConfigCommands::Generate { output_path },
        } => Some(commands::generate_config(output_path.as_deref())),
        _ => None,
    }
}

/// Run a store-backed command.
pub async fn run_cli(command: Commands, ctx: &StartupContext) -> Result<(), CliError> {
    match command {
        Commands::Add { target_url } => commands::add_link(&ctx.allocator, &target_url).await,
        Commands::Get { key } => commands::get_link(ctx.store.as_ref(), &key).await,
        Commands::List { json } => commands::list_links(ctx.store.as_ref(), json).await,
        Commands::Count => commands::count_links(ctx.store.as_ref()).await,
        Commands::Config { .. } => run_offline(&command)
            .unwrap_or_else(|| Err(CliError::CommandError("unsupported command".to_string()))),
    }
}
