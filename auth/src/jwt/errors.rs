use thiserror::Error;

/// Error type for JWT operations.
///
/// Decoding failures collapse into two kinds: an expired token, or anything
/// else (bad signature, malformed segments, wrong algorithm, missing claims).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is expired")]
    TokenExpired,

    #[error("Token is invalid")]
    InvalidToken,
}
