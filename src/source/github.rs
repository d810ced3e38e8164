//! GitHub notifications source implementation.
//!
//! This module shows how to implement the [`NotificationSource`] trait for a
//! concrete REST API.  Use it as a template when adding support for GitLab,
//! Gitea, or any other notification endpoint.
//!
//! ## For contributors — adding a new source type
//!
//! 1. Create a new file under `src/source/` (e.g. `gitlab.rs`).
//! 2. Define a struct that holds any configuration your source needs
//!    (endpoint URL, label, HTTP client).
//! 3. Implement [`NotificationSource`] for your struct — `name()` returns a
//!    label and `fetch()` returns `Vec<Item>` or a [`FetchError`].
//! 4. Re-export your struct from `src/source/mod.rs`.
//! 5. Wire it into the controller construction in `main.rs`.
//!
//! The GitHub implementation below is a complete worked example.

use std::collections::HashSet;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::AUTHORIZATION;
use serde::Deserialize;

use super::{FetchError, Item, NotificationSource};

/// Bounded wait for the whole request; expiry surfaces as a network error.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Wire representation of one notification as the API returns it.
///
/// Only the fields we consume are listed; the API sends more and serde
/// ignores them.  All listed fields are required — a missing `title` (or any
/// other field) fails the whole decode rather than yielding a partial item.
#[derive(Debug, Deserialize)]
struct WireNotification {
    id: u64,
    subject: WireSubject,
}

#[derive(Debug, Deserialize)]
struct WireSubject {
    title: String,
    url: String,
}

/// A GitHub-style notifications data source.
///
/// Issues a single authenticated GET per [`fetch()`](NotificationSource::fetch)
/// and decodes the JSON body with the [`serde_json`] crate.
pub struct GitHubSource {
    /// Full URL of the notifications endpoint.
    pub endpoint: String,
    /// A human-readable label shown in the UI.
    pub label: String,
    client: Client,
}

impl GitHubSource {
    /// Create a new source with a bounded-timeout HTTP client.
    ///
    /// # Arguments
    ///
    /// * `endpoint` — full URL of the notifications resource (e.g.
    ///   `https://api.github.com/notifications`).
    /// * `label` — short name displayed in the TUI for this source.
    pub fn new(endpoint: impl Into<String>, label: impl Into<String>) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("inboxwatch/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            endpoint: endpoint.into(),
            label: label.into(),
            client,
        })
    }

    /// Decode a response body into [`Item`]s.
    ///
    /// This is a pure function (no I/O) so that tests can exercise the
    /// decoding logic without hitting the network.  Decoding is strict: a
    /// malformed element or a duplicate id rejects the entire body.
    pub fn parse_body(body: &[u8]) -> Result<Vec<Item>, FetchError> {
        let wire: Vec<WireNotification> =
            serde_json::from_slice(body).map_err(|e| FetchError::Decode(e.to_string()))?;

        let mut seen = HashSet::with_capacity(wire.len());
        let mut items = Vec::with_capacity(wire.len());
        for n in wire {
            if !seen.insert(n.id) {
                return Err(FetchError::Decode(format!("duplicate notification id {}", n.id)));
            }
            items.push(Item {
                id: n.id,
                title: n.subject.title,
                url: n.subject.url,
            });
        }
        Ok(items)
    }
}

impl NotificationSource for GitHubSource {
    fn name(&self) -> &str {
        &self.label
    }

    fn fetch(&self, credential: &str) -> Result<Vec<Item>, FetchError> {
        let response = self
            .client
            .get(&self.endpoint)
            .header(AUTHORIZATION, format!("token {credential}"))
            .send()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http(status.as_u16()));
        }

        let body = response
            .bytes()
            .map_err(|e| FetchError::Network(e.to_string()))?;
        Self::parse_body(&body)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
