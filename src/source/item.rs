//! The core data type shared across all notification sources.
//!
//! `Item` represents a single notification record, normalised from whatever
//! wire format a source speaks.  Every source implementation converts its
//! native representation into `Item`s so the rest of the application (store,
//! controller, rendering) can stay source-agnostic.

/// A single notification, normalised from any data source.
///
/// Items are immutable once fetched: a successful sync replaces the whole
/// collection rather than patching individual records, so there is no
/// merging logic anywhere downstream.
///
/// The collection keeps the order the remote returned; ids are unique within
/// one fetched collection (the decoder rejects duplicates).
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Item {
    /// Unique identifier assigned by the remote.  Opaque to us — only used
    /// for display and for the uniqueness check at decode time.
    pub id: u64,

    /// Human-readable headline.
    pub title: String,

    /// URL of the resource the notification refers to.
    pub url: String,
}
