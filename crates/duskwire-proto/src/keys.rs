//! Public-key wire encoding and the recipient directory.

use std::collections::BTreeMap;
use std::fmt;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE;
use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// Mapping from username to that user's encoded public key.
///
/// Supplied fresh per broadcast build by the transport layer (from the
/// `connect_answer` envelope); the builder neither caches nor mutates it.
pub type PublicKeyDirectory = BTreeMap<String, EncodedPublicKey>;

/// A portable RSA public key: base64url over the PKCS#1 DER encoding.
///
/// Treated as an opaque value. Equality is byte-exact on the encoded text,
/// and directory lookups are exact-match on this encoding. Validation
/// happens where the key is used, not where it is constructed: a
/// syntactically broken encoding only surfaces when someone tries to
/// encrypt under it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncodedPublicKey(String);

impl EncodedPublicKey {
    /// Wrap an already-encoded key, e.g. one received off the wire.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Encode a DER public key for the wire.
    pub fn from_der(der: &[u8]) -> Self {
        Self(URL_SAFE.encode(der))
    }

    /// The encoded text, as it appears on the wire.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Recover the DER bytes from the encoding.
    pub fn decode(&self) -> Result<Vec<u8>> {
        Ok(URL_SAFE.decode(&self.0)?)
    }
}

impl fmt::Display for EncodedPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
