//! Adaptive poller
//!
//! Runs a refresh callback on a repeating timer whose period depends on
//! whether the caller reports pending work. The timer pauses while the view is
//! hidden, and the callback fires once immediately when the view becomes
//! visible again.
//!
//! There is at most one timer per poller. Any change to the options tears the
//! current timer down and installs a new one measured from the moment of the
//! change.

mod options;
mod visibility;

use std::{
    future::Future,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{Instant, Interval, MissedTickBehavior, interval_at},
};
use tracing::{debug, trace};

pub use options::{
    DEFAULT_FAST_INTERVAL, DEFAULT_SLOW_INTERVAL, MAX_INTERVAL, MIN_INTERVAL, OverlapPolicy,
    PollOptions, PollState,
};
pub use visibility::{Visibility, VisibilityWatch};

/// Entry point for spawning pollers.
#[derive(Debug, Clone, Copy)]
pub struct Poller;

impl Poller {
    /// Spawns a poller on the current tokio runtime.
    ///
    /// `callback` is invoked on every tick; the future it returns is spawned
    /// and not awaited by the poller. Errors inside it are the caller's
    /// concern.
    pub fn spawn<F, Fut>(
        callback: F,
        options: PollOptions,
        visibility: VisibilityWatch,
    ) -> PollerHandle
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (options_tx, options_rx) = watch::channel(options);
        let (state_tx, state_rx) = watch::channel(PollState::Idle);

        let worker = Worker {
            callback: Arc::new(callback),
            in_flight: Arc::new(AtomicBool::new(false)),
            options: options_rx,
            visibility,
            state: state_tx,
        };

        let task = tokio::spawn(worker.run());

        PollerHandle {
            options: options_tx,
            state: state_rx,
            task,
        }
    }
}

/// Handle to a running poller. Dropping it stops the poller.
#[derive(Debug)]
pub struct PollerHandle {
    options: watch::Sender<PollOptions>,
    state: watch::Receiver<PollState>,
    task: JoinHandle<()>,
}

impl PollerHandle {
    /// Current options.
    pub fn options(&self) -> PollOptions {
        self.options.borrow().clone()
    }

    /// Current state.
    pub fn state(&self) -> PollState {
        *self.state.borrow()
    }

    /// Subscribes to state changes.
    pub fn watch_state(&self) -> watch::Receiver<PollState> {
        self.state.clone()
    }

    /// Edits the options. The timer is rebuilt only if something changed.
    pub fn update(&self, edit: impl FnOnce(&mut PollOptions)) {
        self.options.send_if_modified(|options| {
            let before = options.clone();
            edit(options);
            *options != before
        });
    }

    /// Sets the activity signal.
    pub fn set_activity(&self, has_activity: bool) {
        self.update(|options| options.has_activity = has_activity);
    }

    /// Sets the master switch.
    pub fn set_enabled(&self, enabled: bool) {
        self.update(|options| options.enabled = enabled);
    }

    /// Stops the poller and tears its timer down.
    pub fn stop(self) {
        drop(self);
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

struct Worker<F> {
    callback: Arc<F>,
    in_flight: Arc<AtomicBool>,
    options: watch::Receiver<PollOptions>,
    visibility: VisibilityWatch,
    state: watch::Sender<PollState>,
}

impl<F, Fut> Worker<F>
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    async fn run(mut self) {
        let mut visible = *self.visibility.borrow_and_update();
        let mut visibility_open = true;

        loop {
            let options = self.options.borrow_and_update().clone();
            let state = PollState::resolve(&options, visible);

            self.state.send_replace(state);

            let mut timer = state.period(&options).map(|period| {
                let mut timer = interval_at(Instant::now() + period, period);
                timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
                timer
            });

            debug!(?state, "poll timer installed");

            loop {
                tokio::select! {
                    changed = self.options.changed() => {
                        if changed.is_err() {
                            return;
                        }

                        if *self.options.borrow() != options {
                            break;
                        }
                    }
                    changed = self.visibility.changed(), if visibility_open => {
                        if changed.is_err() {
                            visibility_open = false;
                            continue;
                        }

                        let now_visible = *self.visibility.borrow_and_update();

                        if now_visible == visible {
                            continue;
                        }

                        visible = now_visible;

                        if visible && options.enabled {
                            debug!("view visible again; refreshing now");
                            self.fire(options.overlap);
                        }

                        break;
                    }
                    () = tick(timer.as_mut()) => {
                        trace!(?state, "poll tick");
                        self.fire(options.overlap);
                    }
                }
            }
        }
    }

    fn fire(&self, overlap: OverlapPolicy) {
        match overlap {
            OverlapPolicy::Allow => {
                tokio::spawn((self.callback)());
            }
            OverlapPolicy::SkipWhileInFlight => {
                if self.in_flight.swap(true, Ordering::AcqRel) {
                    debug!("previous refresh still in flight; skipping tick");
                    return;
                }

                let guard = InFlight(Arc::clone(&self.in_flight));
                let refresh = (self.callback)();

                tokio::spawn(async move {
                    refresh.await;
                    drop(guard);
                });
            }
        }
    }
}

async fn tick(timer: Option<&mut Interval>) {
    match timer {
        Some(timer) => {
            timer.tick().await;
        }
        None => std::future::pending().await,
    }
}

/// Clears the in-flight flag when the refresh settles, even if it panicked.
struct InFlight(Arc<AtomicBool>);

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
