//! # edgerules CLI Module
//!
//! This module implements the CLI interface for edgerules.
//!
//! ## Available Commands
//!
//! - `validate` - Load and validate the transformation document
//! - `rules` - List validated rules
//! - `check` - Which candidate targets are reachable from a source
//! - `vocabulary` - List the active entity types
//! - `serve` - Start the read-only HTTP query server

mod commands;

use crate::config::{ConfigPaths, DEFAULT_CONFIG_PATH};
use clap::{Parser, Subcommand};
use edgerules_core::TransformError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// edgerules - transformation rule engine
///
/// Validates which transformations between asset types are permitted and
/// answers reachability queries against the validated rules.
#[derive(Parser, Debug)]
#[command(name = "edgerules")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the transformation document (YAML or TOML)
    #[arg(
        short,
        long,
        global = true,
        env = "EDGERULES_CONFIG",
        default_value = DEFAULT_CONFIG_PATH
    )]
    pub config: PathBuf,

    /// Newline-separated entity type list replacing the built-in vocabulary
    #[arg(long, global = true, env = "EDGERULES_VOCABULARY")]
    pub vocabulary: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load and validate the transformation document
    Validate,

    /// List validated rules
    Rules {
        /// Only rules of this source, in precedence order
        #[arg(short, long)]
        source: Option<String>,
    },

    /// Check which targets are reachable from a source
    Check {
        /// Source entity type
        #[arg(short, long)]
        source: String,

        /// Candidate target types (comma-separated)
        #[arg(short, long, value_delimiter = ',', required = true)]
        targets: Vec<String>,
    },

    /// List the active entity vocabulary
    Vocabulary,

    /// Start the read-only HTTP query server
    Serve {
        /// Host to bind to
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), TransformError> {
    let paths = ConfigPaths::new(cli.config, cli.vocabulary);
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Rules { source }) => cmd_rules(&paths, json_mode, source.as_deref()),
        Some(Commands::Check { source, targets }) => {
            cmd_check(&paths, json_mode, &source, &targets)
        }
        Some(Commands::Vocabulary) => cmd_vocabulary(&paths, json_mode),
        Some(Commands::Serve { host, port }) => cmd_serve(&paths, &host, port).await,
        Some(Commands::Validate) | None => cmd_validate(&paths, json_mode, cli.verbose),
    }
}
