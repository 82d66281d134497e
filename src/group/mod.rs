//! Concurrent execution of fallible units with failure aggregation

use std::{
    future::Future,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};
use tokio::sync::Semaphore;
use tracing::{debug, instrument, trace};

use crate::{AggregateError, Failure};

mod tracker;

use tracker::Tracker;

/// A collection of concurrent tasks whose failures need to be coalesced
///
/// Every unit submitted with [`go`](`Group::go`) is spawned as a tokio task.
/// Failures are merged into a single [`AggregateError`] that is returned by
/// [`wait`](`Group::wait`) once all units have finished. Failures are
/// appended in the order the units complete, not the order of submission.
///
/// The number of units running at the same time can be limited with
/// [`set_limit`](`Group::set_limit`). Units cannot be cancelled, once
/// submitted a unit always runs to completion.
///
/// ```rust
/// use multierror::Group;
///
/// # tokio_test::block_on(async {
/// let group = Group::new().with_limit(Some(2));
///
/// for i in 0..4 {
///     group
///         .go(move || async move {
///             if i % 2 == 0 {
///                 return Err(format!("unit {i} failed"));
///             }
///             Ok(())
///         })
///         .await;
/// }
///
/// let err = group.wait().await.unwrap_err();
/// assert_eq!(err.len(), 2);
/// # })
/// ```
pub struct Group<E> {
    errors: Arc<Mutex<AggregateError<E>>>,
    tracker: Tracker,
    limit: Option<usize>,
    slots: Option<Arc<Semaphore>>,
}

impl<E> Default for Group<E> {
    fn default() -> Self {
        Self {
            errors: Arc::new(Mutex::new(AggregateError::new())),
            tracker: Tracker::default(),
            limit: None,
            slots: None,
        }
    }
}

fn lock<E>(errors: &Mutex<AggregateError<E>>) -> MutexGuard<'_, AggregateError<E>> {
    errors.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<E> Group<E>
where
    E: Send + 'static,
{
    /// Create an unbounded group
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder version of [`set_limit`](`Group::set_limit`)
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.set_limit(limit);
        self
    }

    /// The maximum number of units allowed to run at the same time, if any
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Number of submitted units that have not finished yet
    pub fn active(&self) -> usize {
        self.tracker.active()
    }

    /// Limit the number of units running at the same time to `limit`, or
    /// remove the limit with `None`.
    ///
    /// A limit of zero does not allow any unit to run.
    ///
    /// # Panics
    ///
    /// Changing the limit while any unit is still active is a usage error and
    /// will panic.
    pub fn set_limit(&mut self, limit: Option<usize>) {
        let active = self.tracker.active();
        if active != 0 {
            panic!("multierror: modify limit while {active} units are still active");
        }

        self.slots = limit.map(|n| Arc::new(Semaphore::new(n.min(Semaphore::MAX_PERMITS))));
        self.limit = limit;
    }

    /// Spawn the given unit in a new task.
    ///
    /// If a limit is set, this waits until a slot becomes available before
    /// spawning, without blocking units that are already running. If the unit
    /// returns an error it is added to the aggregate returned by
    /// [`wait`](`Group::wait`).
    pub async fn go<F, Fut>(&self, unit: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), E>> + Send + 'static,
    {
        // The semaphore is never closed, acquiring only waits for a free slot
        let slot = match &self.slots {
            Some(slots) => Arc::clone(slots).acquire_owned().await.ok(),
            None => None,
        };

        let finished = self.tracker.start();
        trace!(active = self.tracker.active(), "unit admitted");

        let errors = Arc::clone(&self.errors);
        tokio::spawn(async move {
            // The slot is released before the unit is marked as finished
            let _finished = finished;
            let _slot = slot;

            if let Err(err) = unit().await {
                debug!("unit failed");
                lock(&errors).append(Failure::Single(err));
            }
        });
    }

    /// Add a failure to the group without running a unit
    pub fn add(&self, failure: Option<Failure<E>>) {
        if let Some(failure) = failure {
            lock(&self.errors).append(failure);
        }
    }

    /// Wait until all units submitted via [`go`](`Group::go`) have finished.
    ///
    /// Returns `Ok(())` if no unit failed or the aggregate of all failures
    /// otherwise. The failures are drained, so units submitted after the wait
    /// start a new round.
    ///
    /// Waiting on the same group from multiple tasks at the same time is not
    /// supported.
    #[instrument(name = "group_wait", skip_all)]
    pub async fn wait(&self) -> Result<(), AggregateError<E>> {
        self.tracker.wait().await;

        let errors = std::mem::take(&mut *lock(&self.errors));
        debug!(failures = errors.len(), "all units finished");
        errors.into_result()
    }
}
