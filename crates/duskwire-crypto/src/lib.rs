//! Identity keypairs and fan-out encryption for Duskwire.
//!
//! Each participant holds a 4096-bit RSA keypair wrapped in an [`Identity`].
//! Outgoing plaintext is fanned out by [`build_broadcast`] into one
//! independently encrypted copy per recipient, so neither plaintext nor any
//! shared symmetric key ever reaches the wire or the relay.
//!
//! Direct public-key encryption is a deliberate design point: there is no
//! group key to agree on and no key-wrap layer to manage, at the cost of a
//! hard plaintext ceiling ([`max_plaintext_len`], 446 bytes at 4096 bits)
//! and one public-key operation per recipient per message.
//!
//! # Security
//!
//! Private key material never leaves the [`Identity`] that generated it: it
//! is not cloneable, not serializable, and redacted from `Debug` output.
//! All padding is OAEP with SHA-256 for both the digest and MGF1, so
//! ciphertexts are randomized; identical plaintexts encrypt to different
//! bytes on every call.

pub mod broadcast;
pub mod error;
pub mod identity;

pub use broadcast::{build_broadcast, encrypt_for, max_plaintext_len, open_message};
pub use error::CryptoError;
pub use identity::{Identity, RSA_MODULUS_BITS};
