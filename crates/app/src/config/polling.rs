//! Polling Config

use std::time::Duration;

use brewdesk::poller::{OverlapPolicy, PollOptions};
use clap::Args;

/// Dashboard refresh intervals, in milliseconds.
#[derive(Debug, Args)]
pub(crate) struct PollingConfig {
    /// Cashier refresh interval while orders are waiting
    #[arg(long, env = "BREWDESK_CASHIER_FAST_MS", default_value_t = 3_000)]
    pub cashier_fast_ms: u64,

    /// Cashier refresh interval while the queue is empty
    #[arg(long, env = "BREWDESK_CASHIER_SLOW_MS", default_value_t = 10_000)]
    pub cashier_slow_ms: u64,

    /// Barista refresh interval while orders are being made
    #[arg(long, env = "BREWDESK_BARISTA_FAST_MS", default_value_t = 5_000)]
    pub barista_fast_ms: u64,

    /// Barista refresh interval otherwise
    #[arg(long, env = "BREWDESK_BARISTA_SLOW_MS", default_value_t = 10_000)]
    pub barista_slow_ms: u64,

    /// Order tracking refresh interval
    #[arg(long, env = "BREWDESK_TRACKER_FAST_MS", default_value_t = 5_000)]
    pub tracker_fast_ms: u64,

    /// Order tracking refresh interval while nothing is changing
    #[arg(long, env = "BREWDESK_TRACKER_SLOW_MS", default_value_t = 10_000)]
    pub tracker_slow_ms: u64,

    /// Sales stats refresh interval
    #[arg(long, env = "BREWDESK_ADMIN_SLOW_MS", default_value_t = 30_000)]
    pub admin_slow_ms: u64,

    /// Skip a refresh while the previous one is still running
    #[arg(long, env = "BREWDESK_SKIP_OVERLAPPING", default_value_t = false)]
    pub skip_overlapping: bool,
}

impl PollingConfig {
    pub(crate) fn cashier(&self) -> PollOptions {
        self.options(self.cashier_fast_ms, self.cashier_slow_ms)
    }

    pub(crate) fn barista(&self) -> PollOptions {
        self.options(self.barista_fast_ms, self.barista_slow_ms)
    }

    pub(crate) fn tracker(&self) -> PollOptions {
        self.options(self.tracker_fast_ms, self.tracker_slow_ms)
    }

    pub(crate) fn admin(&self) -> PollOptions {
        self.options(self.admin_slow_ms, self.admin_slow_ms)
    }

    fn options(&self, fast_ms: u64, slow_ms: u64) -> PollOptions {
        let overlap = if self.skip_overlapping {
            OverlapPolicy::SkipWhileInFlight
        } else {
            OverlapPolicy::Allow
        };

        PollOptions::with_intervals(
            Duration::from_millis(fast_ms),
            Duration::from_millis(slow_ms),
        )
        .overlap(overlap)
    }
}
