//! Fetch orchestration.
//!
//! [`SyncController`] owns the sync state machine: it drives the
//! [`NotificationSource`] on demand, applies successful results to the
//! [`StateStore`], and records failures as status — callers never see an
//! error propagate out of [`trigger_fetch`](SyncController::trigger_fetch).
//!
//! The controller deliberately owns no timer; periodic syncing is driven
//! externally (see [`crate::poll`]) so this type stays unit-testable without
//! real time dependencies.

use std::sync::{Arc, Mutex, PoisonError};

use chrono::Utc;

use crate::credential::CredentialProvider;
use crate::source::{FetchError, Item, NotificationSource};
use crate::sync::observe::{ObserverList, Subscription};
use crate::sync::{StateStore, SyncStatus};

pub struct SyncController {
    source: Box<dyn NotificationSource>,
    credentials: Box<dyn CredentialProvider>,
    store: Arc<StateStore>,
    status: Mutex<SyncStatus>,
    status_observers: ObserverList<SyncStatus>,
}

impl SyncController {
    pub fn new(
        source: Box<dyn NotificationSource>,
        credentials: Box<dyn CredentialProvider>,
        store: Arc<StateStore>,
    ) -> Self {
        Self {
            source,
            credentials,
            store,
            status: Mutex::new(SyncStatus::Idle),
            status_observers: ObserverList::new(),
        }
    }

    /// Current lifecycle status.
    pub fn status(&self) -> SyncStatus {
        self.status
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Register a callback for status transitions.  Delivered synchronously
    /// from whichever thread drives the fetch.
    pub fn subscribe_status(
        &self,
        callback: impl Fn(&SyncStatus) + Send + 'static,
    ) -> Subscription {
        self.status_observers.subscribe(callback)
    }

    /// Run one fetch cycle, unless one is already underway.
    ///
    /// Returns `false` (and does nothing else) when a fetch is in flight —
    /// at most one fetch runs per controller at any time.  Otherwise blocks
    /// until the cycle completes: on success the store is replaced and the
    /// status becomes `Succeeded`; on any failure (credential lookup
    /// included) the store is left untouched and the status records the
    /// reason.  Always returns `true` after running a cycle, even a failed
    /// one.
    pub fn trigger_fetch(&self) -> bool {
        {
            let mut status = self.status.lock().unwrap_or_else(PoisonError::into_inner);
            if status.is_in_flight() {
                tracing::debug!(source = self.source.name(), "fetch in flight, trigger ignored");
                return false;
            }
            *status = SyncStatus::InFlight;
        }
        self.status_observers.notify(&SyncStatus::InFlight);

        let result: Result<Vec<Item>, String> = match self.credentials.credential() {
            Ok(credential) => self
                .source
                .fetch(&credential)
                .map_err(|e: FetchError| e.to_string()),
            Err(e) => Err(e.to_string()),
        };

        let status = match result {
            Ok(items) => {
                tracing::info!(
                    source = self.source.name(),
                    count = items.len(),
                    "sync succeeded"
                );
                self.store.replace(items);
                SyncStatus::Succeeded(Utc::now())
            }
            Err(reason) => {
                tracing::warn!(source = self.source.name(), %reason, "sync failed");
                SyncStatus::Failed {
                    reason,
                    at: Utc::now(),
                }
            }
        };

        self.set_status(status);
        true
    }

    fn set_status(&self, status: SyncStatus) {
        {
            let mut current = self.status.lock().unwrap_or_else(PoisonError::into_inner);
            *current = status.clone();
        }
        self.status_observers.notify(&status);
    }
}
