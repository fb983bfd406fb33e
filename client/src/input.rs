//! Debounce coordination for typed field updates

use log::debug;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::sleep;

/// The most recently scheduled update, waiting or already fired.
struct PendingUpdate {
    cancel: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

impl PendingUpdate {
    /// Still waiting out its quiet period (not fired, not cancelled).
    fn is_waiting(&self) -> bool {
        !self.cancel.is_closed()
    }
}

/// Owns the single pending-update slot shared by every field.
///
/// Scheduling replaces whatever is in the slot, and the replaced update is
/// cancelled if it has not fired yet. Once an update's delay has elapsed it is
/// committed: cancelling afterwards is a no-op and its request runs to
/// completion.
#[derive(Clone, Default)]
pub struct InputCoordinator {
    pending: Arc<Mutex<Option<PendingUpdate>>>,
}

impl InputCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self) -> MutexGuard<'_, Option<PendingUpdate>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Cancels the pending update if it has not fired yet. Returns true if one
    /// was cancelled.
    ///
    /// An update that already fired stays in the slot so [`settle`](Self::settle)
    /// can still wait for its request.
    pub fn cancel_pending(&self) -> bool {
        let mut slot = self.slot();
        match slot.take() {
            Some(previous) if previous.is_waiting() => {
                debug!("Cancelling pending update before it fired");
                // The receiver treats a send or a dropped sender the same way.
                let _ = previous.cancel.send(());
                true
            }
            Some(fired) => {
                *slot = Some(fired);
                false
            }
            None => false,
        }
    }

    /// Runs `update` after `delay` unless another call to `schedule` or
    /// `cancel_pending` happens first.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(&self, delay: Duration, update: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel_pending();

        let (cancel, cancelled) = oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = cancelled => return,
                _ = sleep(delay) => {}
            }
            debug!("Debounce elapsed, sending update");
            update.await;
        });

        *self.slot() = Some(PendingUpdate { cancel, handle });
    }

    /// True while an update is scheduled and its delay has not elapsed.
    pub fn has_pending(&self) -> bool {
        self.slot().as_ref().is_some_and(PendingUpdate::is_waiting)
    }

    /// Waits for the most recently scheduled update to fire and finish, or to be
    /// cancelled. Used by front ends that need to flush typing before exiting.
    pub async fn settle(&self) {
        let pending = self.slot().take();
        if let Some(PendingUpdate { cancel, handle }) = pending {
            // Dropping the sender early would cancel the update.
            let _ = handle.await;
            drop(cancel);
        }
    }
}
