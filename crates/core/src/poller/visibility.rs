//! Page visibility signal

use tokio::sync::watch;

/// Host-side visibility switch for the view a poller serves.
///
/// Pollers subscribe through [`Visibility::watch`] and pause while the view is
/// hidden.
#[derive(Debug)]
pub struct Visibility {
    tx: watch::Sender<bool>,
}

/// Subscriber side of a [`Visibility`] signal.
pub type VisibilityWatch = watch::Receiver<bool>;

impl Visibility {
    /// Creates a signal with the given initial visibility.
    pub fn new(visible: bool) -> Self {
        let (tx, _rx) = watch::channel(visible);

        Self { tx }
    }

    /// Creates a signal that starts visible.
    pub fn visible() -> Self {
        Self::new(true)
    }

    /// Whether the view is currently visible.
    pub fn is_visible(&self) -> bool {
        *self.tx.borrow()
    }

    /// Updates visibility; subscribers are notified only on an actual change.
    pub fn set(&self, visible: bool) {
        self.tx.send_if_modified(|current| {
            let changed = *current != visible;
            *current = visible;
            changed
        });
    }

    /// Subscribes to visibility changes.
    pub fn watch(&self) -> VisibilityWatch {
        self.tx.subscribe()
    }
}

impl Default for Visibility {
    fn default() -> Self {
        Self::visible()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_only_notifies_on_change() {
        let visibility = Visibility::visible();
        let mut rx = visibility.watch();

        rx.mark_unchanged();
        visibility.set(true);

        assert!(!rx.has_changed().unwrap_or(true), "no change expected");

        visibility.set(false);

        assert!(rx.has_changed().unwrap_or(false), "change expected");
        assert!(!visibility.is_visible());
    }
}
