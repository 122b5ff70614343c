//! The tagged message envelope.
//!
//! Five record shapes cross the transport boundary, distinguished by a
//! `"type"` string field. Three of them (`connect`, `connect_answer`,
//! `disconnect`) carry connection signaling; `message` delivers one
//! recipient's ciphertext copy; `broadcastable` is the sender-side fan-out
//! record the server splits up for delivery.

use serde::{Deserialize, Serialize};

use crate::broadcast::{Broadcastable, RecipientCiphertext};
use crate::errors::Result;
use crate::keys::{EncodedPublicKey, PublicKeyDirectory};

/// A wire record, dispatched on its `"type"` discriminant.
///
/// The enum is closed: a record with an unknown discriminant fails
/// deserialization instead of being carried as an untyped blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Envelope {
    /// Sent by a user on joining: announces their username and public key.
    Connect {
        /// Username of the connecting user.
        username: String,
        /// That user's encoded public key.
        public_key: EncodedPublicKey,
    },

    /// Server's answer to `connect`: public keys of everyone already present.
    ConnectAnswer {
        /// Username to encoded public key for all connected users.
        connected_users: PublicKeyDirectory,
    },

    /// Sent when a user leaves the conversation.
    Disconnect {
        /// Username of the departing user.
        username: String,
    },

    /// One recipient's encrypted copy, delivered to exactly that recipient.
    Message(RecipientCiphertext),

    /// The sender's fan-out record; the server relays each entry to its
    /// named recipient.
    Broadcastable(Broadcastable),
}

impl Envelope {
    /// The `"type"` discriminant this envelope serializes with.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Connect { .. } => "connect",
            Self::ConnectAnswer { .. } => "connect_answer",
            Self::Disconnect { .. } => "disconnect",
            Self::Message(_) => "message",
            Self::Broadcastable(_) => "broadcastable",
        }
    }

    /// Serialize for the wire.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a wire record, validating the discriminant.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::{DateTime, Utc};
    use proptest::prelude::{ProptestConfig, prop_assert_eq, proptest};

    use super::*;

    fn ts() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn sample_message() -> RecipientCiphertext {
        RecipientCiphertext::new("alice", "fox", &[0xde, 0xad, 0xbe, 0xef], ts())
    }

    #[test]
    fn discriminants_match_wire_names() {
        let connect = Envelope::Connect {
            username: "alice".to_owned(),
            public_key: EncodedPublicKey::from_der(&[1, 2, 3]),
        };
        let answer = Envelope::ConnectAnswer { connected_users: BTreeMap::new() };
        let disconnect = Envelope::Disconnect { username: "alice".to_owned() };
        let message = Envelope::Message(sample_message());
        let broadcastable =
            Envelope::Broadcastable(Broadcastable { messages: BTreeMap::new(), timestamp: ts() });

        for envelope in [connect, answer, disconnect, message, broadcastable] {
            let value: serde_json::Value =
                serde_json::from_str(&envelope.to_json().unwrap()).unwrap();
            assert_eq!(value["type"], envelope.kind());
        }
    }

    #[test]
    fn all_variants_round_trip() {
        let mut users = BTreeMap::new();
        users.insert("bob".to_owned(), EncodedPublicKey::from_der(&[4, 5, 6]));

        let mut messages = BTreeMap::new();
        messages.insert("bob".to_owned(), sample_message());

        let envelopes = [
            Envelope::Connect {
                username: "alice".to_owned(),
                public_key: EncodedPublicKey::from_der(&[1, 2, 3]),
            },
            Envelope::ConnectAnswer { connected_users: users },
            Envelope::Disconnect { username: "alice".to_owned() },
            Envelope::Message(sample_message()),
            Envelope::Broadcastable(Broadcastable { messages, timestamp: ts() }),
        ];

        for envelope in envelopes {
            let json = envelope.to_json().unwrap();
            assert_eq!(Envelope::from_json(&json).unwrap(), envelope);
        }
    }

    #[test]
    fn unknown_discriminant_is_rejected() {
        let result = Envelope::from_json(r#"{"type":"teleport","username":"alice"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn missing_discriminant_is_rejected() {
        assert!(Envelope::from_json(r#"{"username":"alice"}"#).is_err());
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(Envelope::from_json("not json at all").is_err());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn message_envelope_round_trips(
            sender in "[a-z][a-z0-9_]{0,15}",
            avatar in "[a-z]{1,8}",
            ciphertext in proptest::collection::vec(proptest::num::u8::ANY, 0..64),
        ) {
            let envelope = Envelope::Message(RecipientCiphertext::new(
                sender, avatar, &ciphertext, ts(),
            ));
            let json = envelope.to_json().unwrap();
            prop_assert_eq!(Envelope::from_json(&json).unwrap(), envelope);
        }
    }
}
