//! Per-recipient ciphertext records and the broadcast fan-out envelope.

use std::collections::BTreeMap;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// One recipient's copy of an outgoing message.
///
/// The ciphertext was encrypted under exactly that recipient's public key;
/// copies held by other recipients are not cross-decryptable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipientCiphertext {
    /// Username of the sender.
    pub sender: String,

    /// Sender's avatar identifier, relayed verbatim for the UI layer.
    pub avatar: String,

    /// base64url of the raw RSA-OAEP ciphertext.
    pub ciphertext: String,

    /// When the containing broadcast was built.
    pub timestamp: DateTime<Utc>,
}

impl RecipientCiphertext {
    /// Wrap raw ciphertext bytes for the wire.
    pub fn new(
        sender: impl Into<String>,
        avatar: impl Into<String>,
        ciphertext: &[u8],
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            sender: sender.into(),
            avatar: avatar.into(),
            ciphertext: URL_SAFE.encode(ciphertext),
            timestamp,
        }
    }

    /// Recover the raw ciphertext bytes from the wire encoding.
    pub fn ciphertext_bytes(&self) -> Result<Vec<u8>> {
        Ok(URL_SAFE.decode(&self.ciphertext)?)
    }
}

/// The outgoing fan-out record: one independently encrypted copy per
/// recipient, keyed by recipient username.
///
/// This is the only object handed to the transport for delivery. It contains
/// no plaintext and no key material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Broadcastable {
    /// Recipient username to that recipient's encrypted copy.
    pub messages: BTreeMap<String, RecipientCiphertext>,

    /// When the broadcast was built.
    pub timestamp: DateTime<Utc>,
}

impl Broadcastable {
    /// Number of per-recipient copies.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// True when the broadcast carries no copies (empty directory input).
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn ciphertext_round_trip() {
        let raw = vec![0u8, 1, 2, 0xfe, 0xff];
        let msg = RecipientCiphertext::new("alice", "fox", &raw, ts());
        assert_eq!(msg.ciphertext_bytes().unwrap(), raw);
    }

    #[test]
    fn tampered_ciphertext_encoding_fails() {
        let mut msg = RecipientCiphertext::new("alice", "fox", &[1, 2, 3], ts());
        msg.ciphertext = "%%%".to_owned();
        assert!(msg.ciphertext_bytes().is_err());
    }

    #[test]
    fn broadcastable_len_tracks_messages() {
        let mut messages = BTreeMap::new();
        assert!(Broadcastable { messages: messages.clone(), timestamp: ts() }.is_empty());

        messages.insert("bob".to_owned(), RecipientCiphertext::new("alice", "fox", &[9], ts()));
        let broadcast = Broadcastable { messages, timestamp: ts() };
        assert_eq!(broadcast.len(), 1);
        assert!(!broadcast.is_empty());
    }
}
