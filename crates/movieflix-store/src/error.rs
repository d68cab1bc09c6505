use movieflix_models::RatingOutOfRange;
use thiserror::Error;

/// Failures of the persistence layer.
///
/// Collection operations never surface these; they are logged and the
/// collection falls back to its empty default.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable for '{key}': {source}")]
    Unavailable {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("corrupt data under '{key}': {reason}")]
    CorruptData { key: String, reason: String },

    #[error("failed to serialize '{key}': {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Rejected arguments at the preference API boundary
#[derive(Debug, Error, PartialEq)]
pub enum PreferenceError {
    #[error("invalid rating: {0}")]
    InvalidRating(#[from] RatingOutOfRange),

    #[error("progress must be a fraction between 0 and 1, got {0}")]
    InvalidProgress(f64),
}
