//! Wire-level error types.

use thiserror::Error;

/// Errors produced while encoding or decoding wire records.
#[derive(Debug, Error)]
pub enum WireError {
    /// The JSON text was not a valid envelope.
    #[error("invalid JSON envelope: {0}")]
    Json(#[from] serde_json::Error),

    /// A base64url leaf (public key or ciphertext) failed to decode.
    #[error("invalid base64url payload: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// Convenience result alias for wire operations.
pub type Result<T> = std::result::Result<T, WireError>;
