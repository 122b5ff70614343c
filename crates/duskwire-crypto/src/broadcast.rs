//! Multicast builder: one plaintext in, N independently encrypted copies out.
//!
//! For every `(username, key)` entry in the directory the plaintext is
//! encrypted directly under that recipient's RSA public key with OAEP
//! (SHA-256 digest, MGF1/SHA-256, empty label). No shared symmetric key is
//! ever materialized, so the relay and every non-addressed recipient only
//! ever hold ciphertext that is opaque to them.
//!
//! The build is fail-fast: one undecodable key or oversized plaintext aborts
//! the entire broadcast and nothing is delivered. Encryption cost is one
//! public-key operation per recipient, and direct RSA bounds the plaintext
//! at [`max_plaintext_len`] bytes.

use std::collections::BTreeMap;

use chrono::Utc;
use duskwire_proto::{Broadcastable, EncodedPublicKey, PublicKeyDirectory, RecipientCiphertext};
use rsa::pkcs1::DecodeRsaPublicKey;
use rsa::traits::PublicKeyParts;
use rsa::{Oaep, RsaPublicKey};
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::error::CryptoError;
use crate::identity::Identity;

/// Direct-encryption ceiling for `key`, in bytes.
///
/// OAEP overhead is two hash blocks plus two bytes, so a 4096-bit modulus
/// with SHA-256 caps plaintext at `512 - 2*32 - 2 = 446` bytes.
#[must_use]
pub fn max_plaintext_len(key: &RsaPublicKey) -> usize {
    key.size() - 2 * <Sha256 as Digest>::output_size() - 2
}

/// Encrypt `plaintext` for a single recipient key.
///
/// This is the per-recipient primitive [`build_broadcast`] loops over,
/// public so callers can encrypt for one peer directly.
///
/// # Errors
///
/// [`CryptoError::InvalidKey`] if the encoding does not decode to an RSA
/// public key; [`CryptoError::MessageTooLarge`] past the OAEP ceiling.
pub fn encrypt_for(
    recipient_key: &EncodedPublicKey,
    plaintext: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    let key = decode_recipient_key(recipient_key)?;

    let max = max_plaintext_len(&key);
    if plaintext.len() > max {
        return Err(CryptoError::MessageTooLarge { len: plaintext.len(), max });
    }

    let mut rng = rand::thread_rng();
    key.encrypt(&mut rng, Oaep::new::<Sha256>(), plaintext)
        .map_err(|err| CryptoError::Encryption(err.to_string()))
}

/// Build the fan-out record for one outgoing message.
///
/// Produces exactly one [`RecipientCiphertext`] per directory entry, keyed
/// by recipient username and stamped with the build time. OAEP padding is
/// randomized, so rebuilding the same inputs yields different ciphertext
/// bytes; that is intended.
///
/// # Errors
///
/// Fails on the first bad entry ([`CryptoError::InvalidKey`]) or oversized
/// plaintext ([`CryptoError::MessageTooLarge`]); no partial broadcast is
/// returned. Callers that want partial delivery pre-filter the directory.
pub fn build_broadcast(
    sender: &str,
    avatar: &str,
    plaintext: &str,
    directory: &PublicKeyDirectory,
) -> Result<Broadcastable, CryptoError> {
    let timestamp = Utc::now();
    let mut messages = BTreeMap::new();

    debug!(sender, recipients = directory.len(), "building broadcast");

    for (recipient, encoded_key) in directory {
        let ciphertext = encrypt_for(encoded_key, plaintext.as_bytes()).map_err(|err| {
            warn!(%recipient, %err, "aborting broadcast");
            err
        })?;
        messages.insert(
            recipient.clone(),
            RecipientCiphertext::new(sender, avatar, &ciphertext, timestamp),
        );
    }

    Ok(Broadcastable { messages, timestamp })
}

/// Decode and decrypt one received message copy, returning the plaintext
/// text.
///
/// Convenience delegate around [`Identity::decrypt`], which stays the
/// authoritative decryption operation.
///
/// # Errors
///
/// [`CryptoError::Decryption`] when the wire encoding, the RSA padding, or
/// the UTF-8 decoding of the plaintext is invalid; [`CryptoError::NoKey`]
/// when the identity has no keypair.
pub fn open_message(
    message: &RecipientCiphertext,
    identity: &Identity,
) -> Result<String, CryptoError> {
    let ciphertext = message.ciphertext_bytes().map_err(|_| CryptoError::Decryption)?;
    let plaintext = identity.decrypt(&ciphertext)?;
    String::from_utf8(plaintext).map_err(|_| CryptoError::Decryption)
}

fn decode_recipient_key(encoded: &EncodedPublicKey) -> Result<RsaPublicKey, CryptoError> {
    let der = encoded
        .decode()
        .map_err(|err| CryptoError::InvalidKey { reason: err.to_string() })?;
    RsaPublicKey::from_pkcs1_der(&der)
        .map_err(|err| CryptoError::InvalidKey { reason: err.to_string() })
}
