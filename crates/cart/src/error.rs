//! Cart store error type.

use gomarketplace_core::CodecError;
use thiserror::Error;

use crate::config::ConfigError;
use crate::storage::StorageError;

/// Errors returned by [`CartStore`](crate::CartStore) construction and
/// mutations.
///
/// Failed persistence writes are not errors: they are reported through
/// [`Persistence::Failed`](crate::Persistence::Failed) so a flaky disk never
/// breaks the caller.
#[derive(Debug, Error)]
pub enum CartError {
    /// The store was built with missing or invalid settings.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Stored cart could not be read or decoded (strict load only).
    #[error("Failed to load stored cart '{key}': {reason}")]
    Load {
        /// Storage key that was read.
        key: String,
        /// What went wrong.
        reason: String,
    },

    /// Cart could not be encoded or decoded.
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    /// Storage backend failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Result type alias for `CartError`.
pub type Result<T> = std::result::Result<T, CartError>;
