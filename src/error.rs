//! Error types for storage and external services
//!
//! Neither is ever fatal to a round: callers log and carry on.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage backend is unavailable")]
    Unavailable,
    #[error("Failed to write key `{key}`: {reason}")]
    WriteFailed { key: String, reason: String },
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
}

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Player is not signed in to the leaderboard service")]
    NotAuthenticated,
    #[error("No ad is loaded")]
    AdNotReady,
    #[error("Service request failed: {0}")]
    Request(String),
}
