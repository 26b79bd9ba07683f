// src/error.rs

/// Errors raised while reading or writing a controls document
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error("Failed to decode controls document: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Failed to encode controls document: {0}")]
    Encode(#[source] serde_json::Error),
}
