//! Staff dashboards
//!
//! Each dashboard loads a view from the backend and decides how often it wants
//! to be refreshed based on what it last saw. [`LiveView`] wires a dashboard to
//! a [`Poller`] and keeps the latest view available to whoever renders it.

use std::{error::Error, fmt::Debug, pin::Pin, sync::Arc};

use async_trait::async_trait;
use brewdesk::poller::{PollOptions, PollState, Poller, PollerHandle, VisibilityWatch};
use tokio::{sync::watch, task::JoinHandle};
use tracing::{debug, error};

pub mod admin;
pub mod barista;
pub mod cashier;
pub mod tracker;

pub use admin::{AdminDashboard, AdminError, AdminOverview, SalesStats};
pub use barista::{BaristaDashboard, BaristaQueues};
pub use cashier::CashierDashboard;
pub use tracker::{OrderTracker, TrackedOrder};

/// A refreshable view with its own polling policy.
#[async_trait]
pub trait Dashboard: Send + Sync + 'static {
    type View: Clone + Debug + Send + Sync + 'static;
    type Error: Error + Send + Sync + 'static;

    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Fetch a fresh view.
    async fn load(&self) -> Result<Self::View, Self::Error>;

    /// Polling options to apply after `view` was loaded. `None` means nothing
    /// has loaded yet.
    fn poll_options(&self, view: Option<&Self::View>) -> PollOptions;
}

/// A dashboard kept up to date by a poller.
///
/// Loads once immediately, then on every poll tick. After each successful
/// load the poller's options are recomputed from the new view. Failed loads
/// are logged and the previous view is kept.
#[derive(Debug)]
pub struct LiveView<D: Dashboard> {
    dashboard: Arc<D>,
    views: watch::Sender<Option<D::View>>,
    poller: Arc<PollerHandle>,
    sync: JoinHandle<()>,
}

impl<D: Dashboard> LiveView<D> {
    /// Starts polling `dashboard` on the current tokio runtime.
    pub fn start(dashboard: D, visibility: VisibilityWatch) -> Self {
        let dashboard = Arc::new(dashboard);
        let (views, _) = watch::channel(None);

        let poller = Arc::new(Poller::spawn(
            refresher(Arc::clone(&dashboard), views.clone()),
            dashboard.poll_options(None),
            visibility,
        ));

        let sync = tokio::spawn(sync_options(
            Arc::clone(&dashboard),
            views.subscribe(),
            Arc::clone(&poller),
        ));

        let live = Self {
            dashboard,
            views,
            poller,
            sync,
        };

        live.refresh();

        live
    }

    pub fn dashboard(&self) -> &D {
        &self.dashboard
    }

    /// Latest successfully loaded view.
    pub fn current(&self) -> Option<D::View> {
        self.views.borrow().clone()
    }

    /// Subscribes to new views. A view loaded before the call is reported
    /// as the first change.
    pub fn watch(&self) -> watch::Receiver<Option<D::View>> {
        let mut views = self.views.subscribe();

        if views.borrow().is_some() {
            views.mark_changed();
        }

        views
    }

    /// Loads a fresh view now, outside the poll schedule.
    pub fn refresh(&self) {
        tokio::spawn(refresher(Arc::clone(&self.dashboard), self.views.clone())());
    }

    pub fn poll_state(&self) -> PollState {
        self.poller.state()
    }

    pub fn poll_options(&self) -> PollOptions {
        self.poller.options()
    }

    /// Stops polling. In-flight loads are left to finish.
    pub fn stop(self) {
        drop(self);
    }
}

impl<D: Dashboard> Drop for LiveView<D> {
    fn drop(&mut self) {
        self.sync.abort();
    }
}

fn refresher<D: Dashboard>(
    dashboard: Arc<D>,
    views: watch::Sender<Option<D::View>>,
) -> impl Fn() -> BoxedRefresh + Send + Sync + 'static {
    move || {
        let dashboard = Arc::clone(&dashboard);
        let views = views.clone();

        Box::pin(async move {
            match dashboard.load().await {
                Ok(view) => {
                    views.send_replace(Some(view));
                }
                Err(error) => {
                    error!(dashboard = dashboard.name(), %error, "failed to load dashboard");
                }
            }
        })
    }
}

type BoxedRefresh = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

async fn sync_options<D: Dashboard>(
    dashboard: Arc<D>,
    mut views: watch::Receiver<Option<D::View>>,
    poller: Arc<PollerHandle>,
) {
    while views.changed().await.is_ok() {
        let options = dashboard.poll_options(views.borrow_and_update().as_ref());

        debug!(
            dashboard = dashboard.name(),
            enabled = options.enabled,
            has_activity = options.has_activity,
            "poll options updated"
        );

        poller.update(|current| *current = options);
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::atomic::{AtomicUsize, Ordering},
        time::Duration,
    };

    use brewdesk::poller::Visibility;
    use testresult::TestResult;
    use thiserror::Error;
    use tokio::time::sleep;

    use super::*;

    #[derive(Debug, Error)]
    #[error("backend unavailable")]
    struct Unavailable;

    /// Reports a growing counter; fails on every third load.
    #[derive(Debug, Default)]
    struct Counter {
        loads: AtomicUsize,
    }

    #[async_trait]
    impl Dashboard for Counter {
        type View = usize;
        type Error = Unavailable;

        fn name(&self) -> &'static str {
            "counter"
        }

        async fn load(&self) -> Result<usize, Unavailable> {
            let load = self.loads.fetch_add(1, Ordering::SeqCst) + 1;

            if load % 3 == 0 {
                return Err(Unavailable);
            }

            Ok(load)
        }

        fn poll_options(&self, view: Option<&usize>) -> PollOptions {
            PollOptions::with_intervals(Duration::from_secs(3), Duration::from_secs(10))
                .has_activity(view.is_some_and(|count| *count < 2))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_loads_immediately_and_then_on_each_tick() {
        let live = LiveView::start(Counter::default(), Visibility::visible().watch());

        sleep(Duration::from_millis(10)).await;

        assert_eq!(live.current(), Some(1));
        assert!(live.poll_options().has_activity, "first view has activity");

        sleep(Duration::from_millis(3_000)).await;

        assert_eq!(live.current(), Some(2));
        assert!(!live.poll_options().has_activity, "second view is idle");
        assert_eq!(live.poll_state(), PollState::SlowPolling);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_loads_keep_the_previous_view() {
        let live = LiveView::start(Counter::default(), Visibility::visible().watch());

        // loads at 0s, 3s and 13s; the third fails
        sleep(Duration::from_millis(13_100)).await;

        assert_eq!(live.dashboard().loads.load(Ordering::SeqCst), 3);
        assert_eq!(live.current(), Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_manual_refresh_loads_outside_the_schedule() {
        let live = LiveView::start(Counter::default(), Visibility::visible().watch());

        sleep(Duration::from_millis(10)).await;
        live.refresh();
        sleep(Duration::from_millis(10)).await;

        assert_eq!(live.current(), Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_late_subscribers_see_the_loaded_view() -> TestResult {
        let live = LiveView::start(Counter::default(), Visibility::visible().watch());
        let early = live.watch();

        assert!(!early.has_changed()?, "nothing loaded yet");

        sleep(Duration::from_millis(10)).await;

        let mut late = live.watch();

        assert!(early.has_changed()?);
        assert!(late.has_changed()?);
        assert_eq!(*late.borrow_and_update(), Some(1));
        assert!(!late.has_changed()?);

        Ok(())
    }
}
