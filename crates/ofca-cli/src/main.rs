//! OFCA CLI — entry point.
//!
//! One flag matters: `--demo` runs the whole session against canned
//! responses, no API keys needed. Everything else is a live session.

mod helpers;
mod repl;

use anyhow::Result;
use clap::Parser;

// ─────────────────────────────────────────────
// CLI definition
// ─────────────────────────────────────────────

/// OFCA — One Function to Call them All
#[derive(Parser)]
#[command(name = "ofca", version, about, long_about = None)]
struct Cli {
    /// Simulate responses instead of calling real providers
    #[arg(long, default_value_t = false)]
    demo: bool,

    /// System prompt applied to every request
    #[arg(long)]
    system: Option<String>,

    /// Token generation cap forwarded to providers that accept one
    #[arg(long)]
    max_tokens: Option<u32>,

    /// Enable debug logging
    #[arg(long, default_value_t = false)]
    logs: bool,
}

// ─────────────────────────────────────────────
// Entrypoint
// ─────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // API keys may live in a local .env file.
    dotenvy::dotenv().ok();
    init_logging(cli.logs);

    repl::run(repl::SessionOptions {
        demo: cli.demo,
        system: cli.system,
        max_tokens: cli.max_tokens,
    })
    .await
}

/// Initialize tracing/logging.
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("ofca=debug,info")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
