//! # Reticula - Graph Toolkit
//!
//! The main binary for the Reticula graph engine.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │           apps/reticula (THE BINARY)         │
//! │                                              │
//! │  ┌─────────────┐   ┌──────────────────────┐  │
//! │  │    CLI      │   │  Description loader  │  │
//! │  │   (clap)    │   │    (JSON / TOML)     │  │
//! │  └──────┬──────┘   └──────────┬───────────┘  │
//! │         └───────────┬─────────┘              │
//! │                     ▼                        │
//! │             ┌───────────────┐                │
//! │             │ reticula-core │                │
//! │             │  (THE LOGIC)  │                │
//! │             └───────────────┘                │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! reticula -g city.json info
//! reticula -g city.json path --from depot --to harbor -a bellman-ford
//! reticula -g deps.toml --json-mode rank
//! ```

use clap::Parser;
use reticula::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    // Parse CLI arguments
    let cli = cli::Cli::parse();

    // Initialize tracing: RETICULA_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("RETICULA_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let default_filter = if cli.verbose {
        "reticula=debug,reticula_core=debug"
    } else {
        "reticula=info"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }

    // Display startup banner
    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    // Execute command
    if let Err(e) = cli::execute(cli) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the Reticula startup banner.
fn print_banner() {
    println!(
        r#"
  ┬─┐┌─┐┌┬┐┬┌─┐┬ ┬┬  ┌─┐
  ├┬┘├┤  │ ││  │ ││  ├─┤
  ┴└─└─┘ ┴ ┴└─┘└─┘┴─┘┴ ┴

  Graph Toolkit v{}
"#,
        env!("CARGO_PKG_VERSION")
    );
}
