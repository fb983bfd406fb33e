//! Client-side mirror of the authority's game state plus transient UI signals.
//!
//! A [`Signal`] is a single observable cell. `set` replaces the value and then
//! calls every current observer synchronously with the new value. There is no
//! validation, batching or partial update; the store is a dumb sink that only
//! the game client writes to.

use borders_shared::GameState;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

type Observer<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Handle returned by [`Signal::subscribe`], used to stop observing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct SignalInner<T> {
    value: Mutex<T>,
    observers: Mutex<Vec<(SubscriptionId, Observer<T>)>>,
    next_id: AtomicU64,
}

/// Observable cell. Clones share the same value and observers.
pub struct Signal<T> {
    inner: Arc<SignalInner<T>>,
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Default> Default for Signal<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

// A panicking observer must not wedge the store for everyone else.
fn lock<V>(mutex: &Mutex<V>) -> MutexGuard<'_, V> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<T> Signal<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(SignalInner {
                value: Mutex::new(value),
                observers: Mutex::new(Vec::new()),
                next_id: AtomicU64::new(1),
            }),
        }
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut observers = lock(&self.inner.observers);
        let before = observers.len();
        observers.retain(|(existing, _)| *existing != id);
        observers.len() != before
    }

    pub fn observer_count(&self) -> usize {
        lock(&self.inner.observers).len()
    }

    fn snapshot_observers(&self) -> Vec<Observer<T>> {
        lock(&self.inner.observers)
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect()
    }
}

impl<T: Clone> Signal<T> {
    pub fn get(&self) -> T {
        lock(&self.inner.value).clone()
    }

    /// Replaces the value and notifies every current observer before returning.
    ///
    /// Observers run after the value lock is released, so they may freely call
    /// `get` (or even `set`) on the same signal.
    pub fn set(&self, value: T) {
        let current = {
            let mut slot = lock(&self.inner.value);
            *slot = value;
            slot.clone()
        };

        for observer in self.snapshot_observers() {
            observer(&current);
        }
    }

    /// Registers `observer`, calling it once with the current value right away
    /// and then after every `set`.
    pub fn subscribe<F>(&self, observer: F) -> SubscriptionId
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
        let observer: Observer<T> = Arc::new(observer);
        lock(&self.inner.observers).push((id, Arc::clone(&observer)));

        let current = self.get();
        observer(&current);
        id
    }
}

/// The four signals the UI layer watches.
#[derive(Clone, Default)]
pub struct GameStore {
    pub game_state: Signal<GameState>,
    pub is_loading: Signal<bool>,
    pub message: Signal<String>,
    pub show_hint: Signal<String>,
}

impl GameStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Holds `is_loading` at `true` for as long as it lives.
pub(crate) struct LoadingGuard {
    flag: Signal<bool>,
}

impl LoadingGuard {
    pub(crate) fn acquire(flag: &Signal<bool>) -> Self {
        flag.set(true);
        Self { flag: flag.clone() }
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}
