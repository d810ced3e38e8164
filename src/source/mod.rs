//! Data source abstraction layer.
//!
//! This module defines the [`NotificationSource`] trait, the [`FetchError`]
//! taxonomy, and the common [`Item`] type.  Concrete source implementations
//! live in sub-modules (currently only [`github`]).
//!
//! ## For contributors — adding a new source
//!
//! 1. Create a new file in this directory (e.g. `gitlab.rs`).
//! 2. Define a struct (e.g. `GitLabSource`) and implement
//!    [`NotificationSource`] for it.
//! 3. Add `mod gitlab;` below and re-export your struct in the `pub use`
//!    block.
//! 4. Construct an instance in `main.rs` and hand it to the controller.
//!
//! The sync controller, state store, and UI are all source-agnostic.

mod github;
mod item;

// Re-export the public API of this module so callers can write
// `use crate::source::{NotificationSource, Item, GitHubSource};`
pub use github::GitHubSource;
pub use item::Item;

use thiserror::Error;

/// Why a fetch attempt failed.
///
/// The controller records the `Display` text of these as the reason string
/// on a failed sync; nothing here is fatal to the process.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure: connection refused, DNS, TLS, or the
    /// request timing out.
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP status {0}")]
    Http(u16),

    /// The response body was not a well-formed notification list.  Strict:
    /// one bad element fails the whole fetch, there are no partial results.
    #[error("decode error: {0}")]
    Decode(String),
}

/// Trait that every notification source must implement.
///
/// The sync controller calls [`fetch()`](NotificationSource::fetch) from a
/// background thread, so implementations must be [`Send`] and [`Sync`].
///
/// ## Implementing a new source
///
/// ```ignore
/// pub struct MySource { /* endpoint config */ }
///
/// impl NotificationSource for MySource {
///     fn name(&self) -> &str { "my-source" }
///
///     fn fetch(&self, credential: &str) -> Result<Vec<Item>, FetchError> {
///         // Perform HTTP / IO, then convert into Item values.
///         todo!()
///     }
/// }
/// ```
pub trait NotificationSource: Send + Sync {
    /// Human-readable label shown in the UI.
    fn name(&self) -> &str;

    /// Fetch the current notification collection.
    ///
    /// The credential is borrowed for the duration of the call only; sources
    /// must not retain it.  Implementations perform a single request with no
    /// internal retries — retry policy belongs to the caller.
    fn fetch(&self, credential: &str) -> Result<Vec<Item>, FetchError>;
}
