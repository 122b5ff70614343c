//! Wire format for the Duskwire messaging protocol.
//!
//! Every record that crosses the transport boundary is a JSON object with a
//! `"type"` string discriminant followed by the payload fields. Consumers
//! dispatch on the discriminant; the closed [`Envelope`] enum makes unknown
//! discriminants a deserialization error rather than a silently ignored
//! record.
//!
//! Binary leaves (public keys, ciphertexts) travel as padded base64url
//! strings so the envelope stays printable end to end.
//!
//! # Security
//!
//! The relay only ever sees this crate's types: usernames for routing and
//! opaque per-recipient ciphertext blobs. No plaintext and no private key
//! material is representable here.

pub mod broadcast;
pub mod envelope;
pub mod errors;
pub mod keys;

pub use broadcast::{Broadcastable, RecipientCiphertext};
pub use envelope::Envelope;
pub use errors::{Result, WireError};
pub use keys::{EncodedPublicKey, PublicKeyDirectory};
