//! Console configuration module

use clap::Parser;

use crate::{
    cli::Command,
    config::{backend::BackendConfig, observability::LoggingConfig, polling::PollingConfig},
};

pub(crate) mod backend;
pub(crate) mod observability;
pub(crate) mod polling;

/// Brewdesk console configuration
#[derive(Debug, Parser)]
#[command(name = "brewdesk", about = "Brewdesk café console", long_about = None)]
pub(crate) struct ConsoleConfig {
    /// Backend connection and local data settings.
    #[command(flatten)]
    pub backend: BackendConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Dashboard refresh settings.
    #[command(flatten)]
    pub polling: PollingConfig,

    #[command(subcommand)]
    pub command: Command,
}

impl ConsoleConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub(crate) fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use brewdesk::poller::OverlapPolicy;
    use testresult::TestResult;

    use super::*;

    fn parse(args: &[&str]) -> Result<ConsoleConfig, clap::Error> {
        ConsoleConfig::try_parse_from(
            ["brewdesk", "--backend-url", "https://cafe.example.com", "--api-key", "anon"]
                .iter()
                .chain(args),
        )
    }

    #[test]
    fn dashboard_intervals_default_per_dashboard() -> TestResult {
        let config = parse(&["cashier"])?;

        assert_eq!(config.polling.cashier().fast_interval, Duration::from_millis(3_000));
        assert_eq!(config.polling.barista().fast_interval, Duration::from_millis(5_000));
        assert_eq!(config.polling.tracker().slow_interval, Duration::from_millis(10_000));
        assert_eq!(config.polling.cashier().overlap, OverlapPolicy::Allow);

        Ok(())
    }

    #[test]
    fn intervals_and_overlap_can_be_overridden() -> TestResult {
        let config = parse(&["--cashier-fast-ms", "1500", "--skip-overlapping", "cashier"])?;

        assert_eq!(config.polling.cashier().fast_interval, Duration::from_millis(1_500));
        assert_eq!(
            config.polling.cashier().overlap,
            OverlapPolicy::SkipWhileInFlight
        );

        Ok(())
    }

    #[test]
    fn tracking_requires_an_order_id() {
        assert!(parse(&["track"]).is_err());
        assert!(parse(&["track", "--order", "not-a-uuid"]).is_err());
        assert!(parse(&["track", "--order", "01931c39-4b1e-7000-8000-000000000001"]).is_ok());
    }
}
