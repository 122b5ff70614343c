//! Error types for identity and broadcast operations.

use thiserror::Error;

/// Errors from keypair lifecycle and fan-out encryption.
///
/// All of these are recoverable by the caller: regenerate the keypair,
/// shrink the message, or re-fetch the directory. Nothing here retries and
/// nothing is fatal to the process.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// An operation needed a keypair before `generate()` was called.
    #[error("identity `{username}` has no keypair; call generate() first")]
    NoKey {
        /// Username of the keyless identity.
        username: String,
    },

    /// The RSA backend failed to produce a keypair.
    #[error("keypair generation failed: {0}")]
    KeyGeneration(String),

    /// A recipient's encoded public key could not be decoded.
    ///
    /// One undecodable key aborts the whole broadcast: a partially delivered
    /// broadcast is worse than none. Callers wanting partial delivery must
    /// pre-filter the directory.
    #[error("recipient public key is undecodable: {reason}")]
    InvalidKey {
        /// Why decoding failed (base64url or DER stage).
        reason: String,
    },

    /// The plaintext exceeds the direct-encryption ceiling for the key size.
    ///
    /// There is deliberately no chunking and no hybrid fallback.
    #[error("plaintext is {len} bytes but direct RSA-OAEP encryption caps out at {max}")]
    MessageTooLarge {
        /// UTF-8 length of the rejected plaintext.
        len: usize,
        /// Ceiling for the recipient's key.
        max: usize,
    },

    /// The RSA backend refused the encrypt call.
    #[error("encryption failed: {0}")]
    Encryption(String),

    /// The ciphertext failed padding/modulus validation under this private
    /// key. Covers malformed bytes and ciphertext meant for someone else;
    /// deliberately carries no distinguishing detail.
    #[error("ciphertext was not produced for this identity's keypair")]
    Decryption,
}
