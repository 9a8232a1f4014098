use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

type Subscriber<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Handle returned by [`Store::subscribe`], used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(usize);

/// Notification bookkeeping shared by all handles of a store.
#[derive(Default)]
struct Dispatch {
    /// A thread is currently running subscribers.
    running: bool,
    /// The state changed since the running thread last read it.
    dirty: bool,
}

/// Clears `running` if a subscriber panics mid-round.
struct RunningGuard<'a>(&'a Mutex<Dispatch>);

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            self.0.lock().unwrap_or_else(PoisonError::into_inner).running = false;
        }
    }
}

/// A thread-safe store for managing view state.
///
/// Every mutation replaces the state under a single write lock and then
/// notifies subscribers. Only one thread runs subscribers at a time; changes
/// made meanwhile are delivered by that thread afterwards, so the last value a
/// subscriber sees is always the current state. Intermediate values written
/// during a notification round may be skipped.
pub struct Store<T> {
    state: Arc<RwLock<T>>,
    subscribers: Arc<RwLock<Vec<(SubscriptionId, Subscriber<T>)>>>,
    dispatch: Arc<Mutex<Dispatch>>,
    next_id: Arc<AtomicUsize>,
}

impl<T: Clone> Store<T> {
    /// Create a new store with the given initial state.
    pub fn new(initial: T) -> Self {
        Self {
            state: Arc::new(RwLock::new(initial)),
            subscribers: Arc::new(RwLock::new(Vec::new())),
            dispatch: Arc::new(Mutex::new(Dispatch::default())),
            next_id: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Get a clone of the current state.
    pub fn get(&self) -> T {
        self.read(T::clone)
    }

    /// Update the state using a function.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut T),
    {
        {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            f(&mut *state);
        }
        self.notify();
    }

    /// Set a new state value.
    pub fn set(&self, new_state: T) {
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = new_state;
        self.notify();
    }

    /// Subscribe to state changes.
    ///
    /// The callback will be called whenever the state is updated.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Arc::new(callback)));
        id
    }

    /// Remove a subscriber. Returns `false` if it was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self
            .subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let before = subscribers.len();
        subscribers.retain(|(sub_id, _)| *sub_id != id);
        subscribers.len() != before
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Notify all subscribers of a state change.
    ///
    /// If another thread (or an outer call on this one) is already notifying,
    /// mark the state dirty and let it deliver the fresh value.
    fn notify(&self) {
        {
            let mut dispatch = self.dispatch.lock().unwrap_or_else(PoisonError::into_inner);
            dispatch.dirty = true;
            if dispatch.running {
                return;
            }
            dispatch.running = true;
        }

        let _guard = RunningGuard(&self.dispatch);
        loop {
            self.dispatch
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .dirty = false;

            // Callbacks may touch the store, so run them without holding any lock.
            let state = self.get();
            let subscribers: Vec<Subscriber<T>> = self
                .subscribers
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .iter()
                .map(|(_, callback)| Arc::clone(callback))
                .collect();
            for subscriber in subscribers {
                subscriber(&state);
            }

            let mut dispatch = self.dispatch.lock().unwrap_or_else(PoisonError::into_inner);
            if !dispatch.dirty {
                dispatch.running = false;
                return;
            }
        }
    }

    /// Read state without triggering reactivity.
    pub fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        f(&*state)
    }
}

impl<T: Clone + PartialEq> Store<T> {
    /// Set a new value, notifying only if it differs from the current one.
    ///
    /// Returns whether the value changed.
    pub fn set_distinct(&self, new_state: T) -> bool {
        {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            if *state == new_state {
                return false;
            }
            *state = new_state;
        }
        self.notify();
        true
    }
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            subscribers: Arc::clone(&self.subscribers),
            dispatch: Arc::clone(&self.dispatch),
            next_id: Arc::clone(&self.next_id),
        }
    }
}

impl<T: Clone + Default> Default for Store<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
