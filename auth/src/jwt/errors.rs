use thiserror::Error;

/// Error type for JWT operations.
///
/// Every decoding failure (bad signature, malformed payload, expiry) is
/// reported as `InvalidToken`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Invalid or expired token")]
    InvalidToken,
}
