//! Error types for the WordWeave domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

/// The top-level error type for all WordWeave operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Transport errors ---
    #[error("Channel error: {0}")]
    Channel(#[from] ChannelError),

    // --- Exercise construction errors ---
    #[error("Exercise error: {0}")]
    Exercise(#[from] ExerciseError),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

#[derive(Debug, Clone, Error)]
pub enum ChannelError {
    #[error("Channel closed: {0}")]
    Closed(String),

    #[error("Message delivery failed on {channel}: {reason}")]
    DeliveryFailed { channel: String, reason: String },

    #[error("Invalid message payload: {0}")]
    InvalidPayload(String),
}

#[derive(Debug, Clone, Error)]
pub enum ExerciseError {
    #[error("No words available to build an exercise")]
    NoWords,

    #[error("Exercise run has no items")]
    EmptyRun,

    #[error("Failed to load word list from {path}: {reason}")]
    WordSource { path: String, reason: String },
}
