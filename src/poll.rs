//! Background sync driving.
//!
//! Runs on a dedicated thread, invoking the controller's fetch cycle on a
//! fixed interval and whenever the UI requests a manual refresh, and
//! forwarding store/status notifications to the UI thread over an [`mpsc`]
//! channel.
//!
//! ## For contributors
//!
//! The driver is intentionally simple: a `recv_timeout` on the refresh
//! channel doubles as the interval sleep, so a manual refresh wakes the
//! thread immediately instead of waiting out the timer.  The controller's
//! own in-flight guard makes redundant wake-ups harmless.

use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::source::Item;
use crate::sync::{StateStore, SyncController, SyncStatus};

/// Messages sent from the sync thread to the UI thread.
pub enum PollMsg {
    /// The store was replaced with this collection.
    Items(Vec<Item>),
    /// The sync status changed.
    Status(SyncStatus),
}

/// How often the driver re-syncs without a manual refresh.
pub const SYNC_INTERVAL: Duration = Duration::from_secs(60);

/// Spawn the background sync thread.
///
/// Returns the sender for manual refresh requests and the receiver the main
/// loop should drain on every tick.  One sync is issued immediately on
/// startup.  The thread runs until the refresh sender is dropped — the main
/// loop owns it, so exiting the loop stops the driver.
pub fn spawn(
    controller: Arc<SyncController>,
    store: Arc<StateStore>,
    interval: Duration,
) -> (mpsc::Sender<()>, mpsc::Receiver<PollMsg>) {
    let (refresh_tx, refresh_rx) = mpsc::channel::<()>();
    let (event_tx, event_rx) = mpsc::channel::<PollMsg>();

    thread::spawn(move || {
        // Both subscriptions live exactly as long as this thread.  Send
        // failures mean the UI is gone; the refresh channel disconnect below
        // ends the loop shortly after, so they are safe to ignore.
        let items_tx = event_tx.clone();
        let _items_sub = store.subscribe(move |items| {
            let _ = items_tx.send(PollMsg::Items(items.clone()));
        });
        let status_tx = event_tx;
        let _status_sub = controller.subscribe_status(move |status| {
            let _ = status_tx.send(PollMsg::Status(status.clone()));
        });

        tracing::debug!(interval_secs = interval.as_secs(), "sync driver started");
        controller.trigger_fetch();

        loop {
            match refresh_rx.recv_timeout(interval) {
                Ok(()) => {
                    tracing::debug!("manual refresh requested");
                    controller.trigger_fetch();
                }
                Err(mpsc::RecvTimeoutError::Timeout) => {
                    controller.trigger_fetch();
                }
                Err(mpsc::RecvTimeoutError::Disconnected) => {
                    tracing::debug!("refresh channel closed, sync driver stopping");
                    return;
                }
            }
        }
    });

    (refresh_tx, event_rx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::credential::{CredentialError, CredentialProvider};
    use crate::source::{FetchError, NotificationSource};

    const GENEROUS: Duration = Duration::from_secs(5);

    struct FakeCredentials;

    impl CredentialProvider for FakeCredentials {
        fn credential(&self) -> Result<String, CredentialError> {
            Ok("t0ken".to_string())
        }
    }

    /// Returns a fresh one-item collection per call and counts fetches.
    struct CountingSource {
        calls: Arc<AtomicUsize>,
    }

    impl NotificationSource for CountingSource {
        fn name(&self) -> &str {
            "counting"
        }

        fn fetch(&self, _credential: &str) -> Result<Vec<Item>, FetchError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) as u64;
            Ok(vec![Item {
                id: n + 1,
                title: format!("fetch {}", n + 1),
                url: format!("https://x/{}", n + 1),
            }])
        }
    }

    fn spawn_with_counting(
        interval: Duration,
    ) -> (
        Arc<AtomicUsize>,
        mpsc::Sender<()>,
        mpsc::Receiver<PollMsg>,
    ) {
        let calls = Arc::new(AtomicUsize::new(0));
        let store = Arc::new(StateStore::new());
        let controller = Arc::new(SyncController::new(
            Box::new(CountingSource {
                calls: calls.clone(),
            }),
            Box::new(FakeCredentials),
            store.clone(),
        ));
        let (refresh_tx, events) = spawn(controller, store, interval);
        (calls, refresh_tx, events)
    }

    /// Drain events until an `Items` message arrives.
    fn wait_for_items(events: &mpsc::Receiver<PollMsg>) -> Vec<Item> {
        loop {
            match events.recv_timeout(GENEROUS).expect("sync thread went quiet") {
                PollMsg::Items(items) => return items,
                PollMsg::Status(_) => continue,
            }
        }
    }

    #[test]
    fn startup_issues_one_sync_and_reports_it() {
        // Interval long enough that only the startup sync can fire.
        let (calls, _refresh_tx, events) = spawn_with_counting(Duration::from_secs(600));

        let items = wait_for_items(&events);
        assert_eq!(items.len(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn startup_reports_in_flight_before_items() {
        let (_calls, _refresh_tx, events) = spawn_with_counting(Duration::from_secs(600));

        match events.recv_timeout(GENEROUS).unwrap() {
            PollMsg::Status(status) => assert!(status.is_in_flight()),
            PollMsg::Items(_) => panic!("items arrived before the in-flight status"),
        }
    }

    #[test]
    fn manual_refresh_triggers_another_sync() {
        let (calls, refresh_tx, events) = spawn_with_counting(Duration::from_secs(600));

        wait_for_items(&events);
        refresh_tx.send(()).unwrap();
        let items = wait_for_items(&events);

        assert_eq!(items[0].id, 2, "second fetch produced the second collection");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn interval_expiry_triggers_a_sync_without_a_refresh() {
        let (calls, _refresh_tx, events) = spawn_with_counting(Duration::from_millis(50));

        wait_for_items(&events);
        wait_for_items(&events);

        assert!(calls.load(Ordering::SeqCst) >= 2);
    }

    #[test]
    fn successful_sync_emits_succeeded_status() {
        let (_calls, _refresh_tx, events) = spawn_with_counting(Duration::from_secs(600));

        let mut saw_succeeded = false;
        for _ in 0..3 {
            match events.recv_timeout(GENEROUS).unwrap() {
                PollMsg::Status(SyncStatus::Succeeded(_)) => {
                    saw_succeeded = true;
                    break;
                }
                _ => continue,
            }
        }
        assert!(saw_succeeded);
    }
}
