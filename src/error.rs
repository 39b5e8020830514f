//! Error types

use thiserror::Error;

/// Errors raised by the connection registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// The registry currently manages zero connections
    #[error("not connected: registry has no live connections")]
    NotConnected,
}

impl Error {
    /// Check whether this error reports an empty registry
    pub fn is_not_connected(&self) -> bool {
        matches!(self, Error::NotConnected)
    }
}

/// Result alias using the crate error type
pub type Result<T> = std::result::Result<T, Error>;
