//! Error taxonomy for the watcher.
//!
//! Every layer fails with a typed `AppError`; nothing below the
//! orchestrator terminates the process. "No slot available" is not an
//! error and is modelled as `Ok(None)` at the query layer.

use thiserror::Error;

/// Errors that can occur during a watcher run
#[derive(Error, Debug)]
pub enum AppError {
    /// Connectivity, timeout or non-success HTTP status from a remote call.
    #[error("network error: {message}")]
    Network { message: String },

    /// A response body that is not JSON, or JSON of an unexpected shape.
    #[error("decode error: {message}")]
    Decode { message: String },

    /// Login failed or the portal did not hand back a usable bearer token.
    #[error("authentication failed: {message}")]
    Auth { message: String },

    /// Invalid caller-supplied configuration. Always fatal, detected
    /// before any network call is made.
    #[error("config error: {message}")]
    Config { message: String },
}

impl AppError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network { message: message.into() }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode { message: message.into() }
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth { message: message.into() }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config { message: message.into() }
    }
}
