//! Last-known-good notification state.

use std::sync::{Mutex, PoisonError, RwLock};

use crate::source::Item;
use crate::sync::observe::{ObserverList, Subscription};

/// Holds the collection from the most recent successful sync and pushes
/// every replacement to its subscribers.
///
/// Readers get cloned snapshots, so a slow consumer never blocks a sync.
/// Writers are serialized: one `replace` fully swaps the collection and
/// notifies all subscribers before the next one starts.
pub struct StateStore {
    items: RwLock<Vec<Item>>,
    observers: ObserverList<Vec<Item>>,
    /// Held across swap + notify so concurrent replaces cannot interleave
    /// their notification cycles.
    write_gate: Mutex<()>,
}

impl StateStore {
    pub fn new() -> Self {
        Self {
            items: RwLock::new(Vec::new()),
            observers: ObserverList::new(),
            write_gate: Mutex::new(()),
        }
    }

    /// Snapshot of the current collection.
    ///
    /// Safe to call from inside a subscriber callback; during a notification
    /// cycle it returns the collection the cycle is delivering.
    pub fn current(&self) -> Vec<Item> {
        self.items
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Swap in a new collection and synchronously notify every subscriber
    /// with it, in full, before returning.
    pub fn replace(&self, items: Vec<Item>) {
        let _gate = self.write_gate.lock().unwrap_or_else(PoisonError::into_inner);
        {
            let mut current = self.items.write().unwrap_or_else(PoisonError::into_inner);
            *current = items.clone();
        }
        self.observers.notify(&items);
    }

    /// Register a callback for future replacements.  Dropping the returned
    /// handle stops notifications to this listener.
    pub fn subscribe(&self, callback: impl Fn(&Vec<Item>) + Send + 'static) -> Subscription {
        self.observers.subscribe(callback)
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}
