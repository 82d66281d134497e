use std::{
    pin::pin,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};
use tokio::sync::Notify;
use tracing::warn;

#[derive(Clone, Default)]
/// A counter of outstanding units with notification capabilities
///
/// Waiters are notified whenever the counter drops to zero.
pub(crate) struct Tracker {
    active: Arc<AtomicUsize>,
    notify: Arc<Notify>,
}

impl Tracker {
    /// Register a new outstanding unit
    ///
    /// The unit is marked as finished when the returned guard is dropped
    pub fn start(&self) -> Finished {
        self.active.fetch_add(1, Ordering::SeqCst);
        Finished {
            tracker: self.clone(),
        }
    }

    /// Number of units that have not finished yet
    pub fn active(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }

    /// Waits asynchronously until there are no outstanding units
    pub async fn wait(&self) {
        loop {
            // Register interest before checking the counter to avoid
            // missing a notification in between
            let mut notified = pin!(self.notify.notified());
            notified.as_mut().enable();

            if self.active() == 0 {
                return;
            }

            notified.await;
        }
    }
}

/// Marks a unit as finished when dropped, even if the unit panics
pub(crate) struct Finished {
    tracker: Tracker,
}

impl Drop for Finished {
    fn drop(&mut self) {
        if std::thread::panicking() {
            warn!("unit panicked before completion");
        }

        if self.tracker.active.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.tracker.notify.notify_waiters();
        }
    }
}
