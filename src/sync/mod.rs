//! Remote-state synchronization core.
//!
//! Three pieces, wired together in `main.rs`:
//!
//! - [`StateStore`] — the last-known-good collection, with synchronous
//!   change notification via [`Subscription`] handles.
//! - [`SyncController`] — runs fetch cycles against a
//!   [`NotificationSource`](crate::source::NotificationSource), guarantees
//!   at most one fetch in flight, and records every outcome as a
//!   [`SyncStatus`].
//! - `observe` — the shared observer-list primitive both of the above use
//!   for their subscriptions.
//!
//! Failures never clear the store: the last successful collection stays
//! visible until a later fetch replaces it.

mod controller;
mod observe;
mod status;
mod store;

pub use controller::SyncController;
pub use observe::Subscription;
pub use status::SyncStatus;
pub use store::StateStore;
