use thiserror::Error;

/// Error type for token operations.
///
/// Decoding deliberately collapses every failure (bad signature, wrong
/// algorithm, malformed structure, expiry) into `InvalidToken`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Invalid token")]
    InvalidToken,
}
