//! A participant's identity: username plus an exclusively-owned RSA keypair.

use std::fmt;

use duskwire_proto::EncodedPublicKey;
use rsa::pkcs1::EncodeRsaPublicKey;
use rsa::{Oaep, RsaPrivateKey, RsaPublicKey};
use sha2::Sha256;
use tracing::debug;

use crate::error::CryptoError;

/// Modulus size for generated keypairs, in bits.
pub const RSA_MODULUS_BITS: usize = 4096;

/// Two-state key slot: operations that need the private half are checked
/// errors until `generate()` has run.
enum KeyState {
    Uninitialized,
    Keyed(RsaPrivateKey),
}

/// Holds a participant's keypair and mediates every operation that touches
/// the private half.
///
/// The username is immutable once set and uniquely identifies the holder
/// within a conversation. The keypair is owned exclusively by this value:
/// `Identity` is neither `Clone` nor `Serialize`, and its `Debug` output
/// never includes key material.
pub struct Identity {
    username: String,
    key: KeyState,
}

impl Identity {
    /// Create a keyless identity. Call [`Identity::generate`] before any
    /// key-dependent operation.
    pub fn new(username: impl Into<String>) -> Self {
        Self { username: username.into(), key: KeyState::Uninitialized }
    }

    /// Username of the holder.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Whether a keypair has been generated.
    pub fn has_keypair(&self) -> bool {
        matches!(self.key, KeyState::Keyed(_))
    }

    /// Generate a fresh 4096-bit RSA keypair (public exponent 65537).
    ///
    /// Calling this again replaces the existing keypair. Guarding against
    /// accidental replacement is the caller's responsibility; a stable
    /// identity across sessions needs an external check before regenerating.
    pub fn generate(&mut self) -> Result<(), CryptoError> {
        let mut rng = rand::thread_rng();
        // RsaPrivateKey::new uses e = 65537.
        let private = RsaPrivateKey::new(&mut rng, RSA_MODULUS_BITS)
            .map_err(|err| CryptoError::KeyGeneration(err.to_string()))?;
        debug!(username = %self.username, bits = RSA_MODULUS_BITS, "generated identity keypair");
        self.key = KeyState::Keyed(private);
        Ok(())
    }

    /// The public half, DER-encoded (PKCS#1) and base64url-wrapped for
    /// exchange via `connect`/`connect_answer` envelopes.
    ///
    /// # Errors
    ///
    /// [`CryptoError::NoKey`] if `generate()` was never called.
    pub fn public_key_encoded(&self) -> Result<EncodedPublicKey, CryptoError> {
        let public = RsaPublicKey::from(self.private_key()?);
        let der = public
            .to_pkcs1_der()
            .map_err(|err| CryptoError::KeyGeneration(err.to_string()))?;
        Ok(EncodedPublicKey::from_der(der.as_bytes()))
    }

    /// Decrypt a ciphertext that was encrypted for this identity's public
    /// key, using OAEP with SHA-256 for both digest and MGF1 (empty label).
    ///
    /// # Errors
    ///
    /// [`CryptoError::NoKey`] without a keypair; [`CryptoError::Decryption`]
    /// when the ciphertext is malformed or was encrypted for a different
    /// key. No partial plaintext is ever returned.
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let private = self.private_key()?;
        private
            .decrypt(Oaep::new::<Sha256>(), ciphertext)
            .map_err(|_| CryptoError::Decryption)
    }

    fn private_key(&self) -> Result<&RsaPrivateKey, CryptoError> {
        match &self.key {
            KeyState::Keyed(private) => Ok(private),
            KeyState::Uninitialized => {
                Err(CryptoError::NoKey { username: self.username.clone() })
            },
        }
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("username", &self.username)
            .field("keypair", &if self.has_keypair() { "generated" } else { "absent" })
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_identity_has_no_keypair() {
        let identity = Identity::new("alice");
        assert_eq!(identity.username(), "alice");
        assert!(!identity.has_keypair());
    }

    #[test]
    fn public_key_requires_generation() {
        let identity = Identity::new("alice");
        assert!(matches!(
            identity.public_key_encoded(),
            Err(CryptoError::NoKey { username }) if username == "alice"
        ));
    }

    #[test]
    fn decrypt_requires_generation() {
        let identity = Identity::new("alice");
        assert!(matches!(identity.decrypt(&[0u8; 512]), Err(CryptoError::NoKey { .. })));
    }

    #[test]
    fn debug_output_redacts_key_material() {
        let identity = Identity::new("alice");
        let rendered = format!("{identity:?}");
        assert!(rendered.contains("alice"));
        assert!(rendered.contains("absent"));
    }
}
