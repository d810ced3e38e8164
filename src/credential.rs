//! Credential acquisition.
//!
//! The sync core never stores a token; it asks a [`CredentialProvider`] for
//! one at fetch time and borrows it for the duration of the request.  The
//! shipped implementation reads an environment variable (populated from
//! `.env` by `dotenvy` in `main.rs`); an OS keychain or config-file provider
//! would slot in behind the same trait.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CredentialError {
    /// No usable credential could be produced.
    #[error("credential unavailable: {0}")]
    Missing(String),
}

/// Supplies the authorization token on demand.
pub trait CredentialProvider: Send + Sync {
    /// Return the current credential, or an error describing why none is
    /// available.  Implementations must never return an empty string.
    fn credential(&self) -> Result<String, CredentialError>;
}

/// Reads the token from an environment variable.
pub struct EnvTokenProvider {
    var: String,
}

impl EnvTokenProvider {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl CredentialProvider for EnvTokenProvider {
    fn credential(&self) -> Result<String, CredentialError> {
        match std::env::var(&self.var) {
            Ok(value) if !value.trim().is_empty() => Ok(value),
            _ => Err(CredentialError::Missing(format!(
                "environment variable {} is not set",
                self.var
            ))),
        }
    }
}
