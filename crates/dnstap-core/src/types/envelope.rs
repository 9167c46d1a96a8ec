use serde::{Deserialize, Serialize};

use super::{EnvelopeKind, Message};
use crate::{Result, TapError};

/// Top-level dnstap record
///
/// A message-kind envelope always owns its [`Message`]; any other kind never
/// does. The constructors enforce this, so consumers can rely on
/// [`message`](Self::message) without re-checking [`kind`](Self::kind).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "EnvelopeParts")]
pub struct Envelope {
    kind: EnvelopeKind,
    identity: Option<Vec<u8>>,
    version: Option<Vec<u8>>,
    message: Option<Message>,
}

/// Unvalidated envelope fields, as an upstream decoder sees them
#[derive(Deserialize)]
struct EnvelopeParts {
    kind: EnvelopeKind,
    #[serde(default)]
    identity: Option<Vec<u8>>,
    #[serde(default)]
    version: Option<Vec<u8>>,
    #[serde(default)]
    message: Option<Message>,
}

impl TryFrom<EnvelopeParts> for Envelope {
    type Error = TapError;

    fn try_from(parts: EnvelopeParts) -> Result<Self> {
        let mut envelope = Self::from_parts(parts.kind, parts.message)?;
        envelope.identity = parts.identity;
        envelope.version = parts.version;
        Ok(envelope)
    }
}

impl From<Message> for Envelope {
    fn from(message: Message) -> Self {
        Self::new(message)
    }
}

impl Envelope {
    /// Wrap a message in a message-kind envelope
    #[must_use]
    pub const fn new(message: Message) -> Self {
        Self {
            kind: EnvelopeKind::Message,
            identity: None,
            version: None,
            message: Some(message),
        }
    }

    /// Build an envelope from a decoded kind and optional payload
    pub fn from_parts(kind: EnvelopeKind, message: Option<Message>) -> Result<Self> {
        match (kind, message.is_some()) {
            (EnvelopeKind::Message, false) => Err(TapError::MissingPayload),
            (EnvelopeKind::Unknown(_), true) => Err(TapError::UnexpectedPayload { kind }),
            _ => Ok(Self {
                kind,
                identity: None,
                version: None,
                message,
            }),
        }
    }

    /// Attach the producer identity
    #[must_use]
    pub fn with_identity(mut self, identity: impl Into<Vec<u8>>) -> Self {
        self.identity = Some(identity.into());
        self
    }

    /// Attach the producer software version
    #[must_use]
    pub fn with_version(mut self, version: impl Into<Vec<u8>>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Envelope discriminator
    #[must_use]
    pub const fn kind(&self) -> EnvelopeKind {
        self.kind
    }

    /// Identity of the producing agent
    #[must_use]
    pub fn identity(&self) -> Option<&[u8]> {
        self.identity.as_deref()
    }

    /// Software version of the producing agent
    #[must_use]
    pub fn version(&self) -> Option<&[u8]> {
        self.version.as_deref()
    }

    /// Message payload; present exactly when the kind is `MESSAGE`
    #[must_use]
    pub const fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MessageType;

    #[test]
    fn test_message_envelope() {
        let envelope = Envelope::new(Message::new(MessageType::ClientQuery))
            .with_identity("ns1.example")
            .with_version(b"bind 9.18".to_vec());
        assert_eq!(envelope.kind(), EnvelopeKind::Message);
        assert_eq!(envelope.identity(), Some(&b"ns1.example"[..]));
        assert_eq!(envelope.version(), Some(&b"bind 9.18"[..]));
        assert_eq!(
            envelope.message().map(|m| m.message_type),
            Some(MessageType::ClientQuery)
        );
    }

    #[test]
    fn test_from_message() {
        let envelope = Envelope::from(Message::new(MessageType::StubResponse));
        let parts = Envelope::from_parts(
            EnvelopeKind::Message,
            Some(Message::new(MessageType::StubResponse)),
        )
        .unwrap();
        assert_eq!(envelope, parts);
    }

    #[test]
    fn test_from_parts_rejects_missing_payload() {
        let err = Envelope::from_parts(EnvelopeKind::Message, None).unwrap_err();
        assert_eq!(err, TapError::MissingPayload);
    }

    #[test]
    fn test_from_parts_rejects_unexpected_payload() {
        let err = Envelope::from_parts(
            EnvelopeKind::Unknown(3),
            Some(Message::new(MessageType::ToolQuery)),
        )
        .unwrap_err();
        assert_eq!(
            err,
            TapError::UnexpectedPayload {
                kind: EnvelopeKind::Unknown(3)
            }
        );
        assert_eq!(
            err.to_string(),
            "envelope of kind 3 cannot carry a message payload"
        );
    }

    #[test]
    fn test_from_parts_other_kind() {
        let envelope = Envelope::from_parts(EnvelopeKind::Unknown(3), None).unwrap();
        assert!(envelope.message().is_none());
        assert!(envelope.identity().is_none());
    }

    #[test]
    fn test_deserialize_envelope() {
        let json = r#"{
            "kind": 1,
            "identity": [110, 115, 49],
            "message": {
                "message_type": 6,
                "query_address": [192, 0, 2, 1],
                "query_port": 5353,
                "socket_protocol": 2
            }
        }"#;
        let envelope: Envelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.identity(), Some(&b"ns1"[..]));
        assert!(envelope.version().is_none());

        let message = envelope.message().unwrap();
        assert_eq!(message.message_type, MessageType::ClientResponse);
        assert_eq!(message.query_port, Some(5353));
        assert_eq!(message.socket_protocol, Some(crate::SocketProtocol::Tcp));
        assert!(message.response_port.is_none());
    }

    #[test]
    fn test_deserialize_validates_payload() {
        let result: std::result::Result<Envelope, _> = serde_json::from_str(r#"{"kind": 1}"#);
        assert!(result.is_err());
    }
}
