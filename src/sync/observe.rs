//! Change-notification primitives.
//!
//! - [`ObserverList`]: a set of listener callbacks, invoked synchronously and
//!   in registration order on every [`notify`](ObserverList::notify).
//! - [`Subscription`]: RAII guard returned by
//!   [`subscribe`](ObserverList::subscribe); dropping it removes the callback
//!   before the next notification cycle.
//!
//! Callbacks run on whichever thread calls `notify` (in this crate, the sync
//! thread), so they must be [`Send`].  A callback must not subscribe to or
//! drop a subscription of the *same* list from inside the callback — the
//! registry lock is held for the duration of a notification cycle.

use std::sync::{Arc, Mutex, PoisonError, Weak};

type Callback<T> = Box<dyn Fn(&T) + Send>;

struct Registry<T> {
    next_id: u64,
    entries: Vec<(u64, Callback<T>)>,
}

/// A set of listener callbacks sharing one notification stream.
pub struct ObserverList<T> {
    inner: Arc<Mutex<Registry<T>>>,
}

impl<T: 'static> ObserverList<T> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Registry {
                next_id: 0,
                entries: Vec::new(),
            })),
        }
    }

    /// Register a callback; it stays live until the returned handle drops.
    pub fn subscribe(&self, callback: impl Fn(&T) + Send + 'static) -> Subscription {
        let mut registry = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let id = registry.next_id;
        registry.next_id += 1;
        registry.entries.push((id, Box::new(callback)));

        let weak: Weak<Mutex<Registry<T>>> = Arc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                let mut registry = inner.lock().unwrap_or_else(PoisonError::into_inner);
                registry.entries.retain(|(entry_id, _)| *entry_id != id);
            }
        })
    }

    /// Invoke every live callback with `value`, in registration order.
    ///
    /// Synchronous: all callbacks have run by the time this returns.
    pub fn notify(&self, value: &T) {
        let registry = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        for (_, callback) in &registry.entries {
            callback(value);
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .len()
    }
}

/// RAII guard for a registered callback.
///
/// Dropping the guard unregisters the callback.  The guard is deliberately
/// not `Clone`: exactly one owner decides the callback's lifetime.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}
