//! Poller options

use std::time::Duration;

/// Interval used while the caller reports activity, unless overridden.
pub const DEFAULT_FAST_INTERVAL: Duration = Duration::from_millis(3_000);

/// Interval used while idle, unless overridden.
pub const DEFAULT_SLOW_INTERVAL: Duration = Duration::from_millis(10_000);

/// Shortest period a timer is installed with; zero intervals are raised to it.
pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Longest period a timer is installed with; longer intervals are lowered to it.
pub const MAX_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

/// What to do when a tick arrives while the previous refresh is still running.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OverlapPolicy {
    /// Start another refresh regardless; slow refreshes may overlap.
    #[default]
    Allow,

    /// Skip the tick until the in-flight refresh settles.
    SkipWhileInFlight,
}

/// Options for a [`Poller`](super::Poller).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollOptions {
    /// Master switch; no timer runs while `false`.
    pub enabled: bool,

    /// Interval used while `has_activity` is set.
    pub fast_interval: Duration,

    /// Interval used otherwise.
    pub slow_interval: Duration,

    /// Whether the caller has pending work worth polling faster for.
    pub has_activity: bool,

    /// Overlap handling for slow refreshes.
    pub overlap: OverlapPolicy,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            fast_interval: DEFAULT_FAST_INTERVAL,
            slow_interval: DEFAULT_SLOW_INTERVAL,
            has_activity: false,
            overlap: OverlapPolicy::Allow,
        }
    }
}

impl PollOptions {
    /// Default options with the given fast and slow intervals.
    pub fn with_intervals(fast_interval: Duration, slow_interval: Duration) -> Self {
        Self {
            fast_interval,
            slow_interval,
            ..Self::default()
        }
    }

    /// Sets the master switch.
    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Sets the activity signal.
    #[must_use]
    pub fn has_activity(mut self, has_activity: bool) -> Self {
        self.has_activity = has_activity;
        self
    }

    /// Sets the overlap policy.
    #[must_use]
    pub fn overlap(mut self, overlap: OverlapPolicy) -> Self {
        self.overlap = overlap;
        self
    }

    /// Interval selected by the activity signal.
    pub fn active_interval(&self) -> Duration {
        if self.has_activity {
            self.fast_interval
        } else {
            self.slow_interval
        }
    }
}

/// Observable state of a poller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    /// No timer is installed.
    Idle,

    /// Firing every `fast_interval`.
    FastPolling,

    /// Firing every `slow_interval`.
    SlowPolling,
}

impl PollState {
    /// State a poller settles in for the given options and page visibility.
    pub fn resolve(options: &PollOptions, visible: bool) -> Self {
        match (options.enabled && visible, options.has_activity) {
            (false, _) => Self::Idle,
            (true, true) => Self::FastPolling,
            (true, false) => Self::SlowPolling,
        }
    }

    /// Period of the timer for this state, if any.
    pub fn period(self, options: &PollOptions) -> Option<Duration> {
        let period = match self {
            Self::Idle => return None,
            Self::FastPolling => options.fast_interval,
            Self::SlowPolling => options.slow_interval,
        };

        Some(period.clamp(MIN_INTERVAL, MAX_INTERVAL))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_dashboard_cadence() {
        let options = PollOptions::default();

        assert!(options.enabled);
        assert!(!options.has_activity);
        assert_eq!(options.active_interval(), Duration::from_secs(10));
        assert_eq!(
            options.has_activity(true).active_interval(),
            Duration::from_secs(3)
        );
    }

    #[test]
    fn resolve_picks_the_state() {
        let options = PollOptions::default();

        assert_eq!(PollState::resolve(&options, true), PollState::SlowPolling);
        assert_eq!(
            PollState::resolve(&options.clone().has_activity(true), true),
            PollState::FastPolling
        );
        assert_eq!(PollState::resolve(&options, false), PollState::Idle);
        assert_eq!(
            PollState::resolve(&options.enabled(false), true),
            PollState::Idle
        );
    }

    #[test]
    fn idle_has_no_period() {
        let options = PollOptions::with_intervals(Duration::from_secs(1), Duration::from_secs(2));

        assert_eq!(PollState::Idle.period(&options), None);
        assert_eq!(
            PollState::FastPolling.period(&options),
            Some(Duration::from_secs(1))
        );
        assert_eq!(
            PollState::SlowPolling.period(&options),
            Some(Duration::from_secs(2))
        );
    }

    #[test]
    fn zero_intervals_are_raised_to_the_minimum() {
        let options = PollOptions::with_intervals(Duration::ZERO, Duration::ZERO);

        assert_eq!(PollState::FastPolling.period(&options), Some(MIN_INTERVAL));
    }

    #[test]
    fn unbounded_intervals_are_lowered_to_the_maximum() {
        let options = PollOptions::with_intervals(Duration::MAX, Duration::from_secs(u64::MAX));

        assert_eq!(PollState::FastPolling.period(&options), Some(MAX_INTERVAL));
        assert_eq!(PollState::SlowPolling.period(&options), Some(MAX_INTERVAL));
    }
}
