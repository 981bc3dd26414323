//! # edgerules - Transformation Rule Engine
//!
//! The main binary for the edgerules transformation validator.
//!
//! This application provides:
//! - CLI interface for validating documents and checking transformations
//! - Read-only HTTP query server (axum-based)
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │               apps/edgerules (THE BINARY)            │
//! │                                                      │
//! │  ┌─────────────┐   ┌─────────────┐   ┌───────────┐  │
//! │  │    CLI      │   │  HTTP API   │   │  Config   │  │
//! │  │   (clap)    │   │   (axum)    │   │ (YAML/TOML│  │
//! │  └──────┬──────┘   └──────┬──────┘   └─────┬─────┘  │
//! │         └─────────────────┼────────────────┘        │
//! │                           ▼                         │
//! │                  ┌────────────────┐                 │
//! │                  │ edgerules-core │                 │
//! │                  │  (THE LOGIC)   │                 │
//! │                  └────────────────┘                 │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Validate a transformation document
//! edgerules --config transformations.yaml validate
//!
//! # Which of these targets may an FQDN expand into?
//! edgerules check -s FQDN -t IPAddress,Netblock
//!
//! # Start the query server
//! edgerules serve --host 0.0.0.0 --port 8080
//! ```

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    // EDGERULES_LOG_FORMAT=json enables machine-parseable output. Logs go to
    // stderr so `--json-mode` stdout stays clean.
    let log_format = std::env::var("EDGERULES_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "edgerules=info,tower_http=debug".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    let cli = edgerules::cli::Cli::parse();

    // JSON output must stay parseable, so no banner there.
    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    if let Err(e) = edgerules::cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the edgerules startup banner.
fn print_banner() {
    println!(
        r#"
  edgerules v{}
  transformation rules for asset discovery
"#,
        env!("CARGO_PKG_VERSION")
    );
}
