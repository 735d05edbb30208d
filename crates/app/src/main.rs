//! Brewdesk Console

use std::process;

use tracing::error;

use crate::config::ConsoleConfig;

mod cli;
mod config;
mod observability;
mod shutdown;

/// Brewdesk console entry point
#[tokio::main]
pub async fn main() {
    // Load configuration from .env and CLI arguments
    let config = ConsoleConfig::load().unwrap_or_else(|e| e.exit());

    if let Err(init_error) = observability::init_subscriber(&config.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized, must use eprintln for subscriber errors"
        )]
        {
            eprintln!("{init_error}");
        }

        process::exit(1);
    }

    if let Err(command_error) = cli::run(config).await {
        error!("{command_error}");

        process::exit(1);
    }
}
