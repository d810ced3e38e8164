//! Sync lifecycle status.

use chrono::{DateTime, Utc};

/// Where the sync lifecycle currently stands.
///
/// A controller starts `Idle` and overwrites this on every transition; a
/// terminal state (`Succeeded`/`Failed`) stays put until the next trigger
/// moves the controller back through `InFlight`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum SyncStatus {
    /// No fetch has been attempted yet.
    Idle,
    /// A fetch is currently underway; further triggers are ignored.
    InFlight,
    /// The last attempt completed and the store holds its result.
    Succeeded(DateTime<Utc>),
    /// The last attempt failed; the store was left untouched.
    Failed {
        reason: String,
        at: DateTime<Utc>,
    },
}

impl SyncStatus {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, SyncStatus::InFlight)
    }

    /// One-line rendering for the status bar.
    pub fn describe(&self) -> String {
        match self {
            SyncStatus::Idle => "idle".to_string(),
            SyncStatus::InFlight => "syncing…".to_string(),
            SyncStatus::Succeeded(at) => format!("synced {}", at.format("%H:%M:%S")),
            SyncStatus::Failed { reason, at } => {
                format!("error: {reason} ({})", at.format("%H:%M:%S"))
            }
        }
    }
}
