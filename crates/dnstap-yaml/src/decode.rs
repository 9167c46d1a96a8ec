//! Decode collaborators for the embedded wire-format fields.
//!
//! The renderer only needs two capabilities: turn a wire-format domain name
//! into its presentation form, and turn a wire-format DNS message into a
//! multi-line display text. Both are pure; implementations must not keep
//! state between calls.

use hickory_proto::op::Message;
use hickory_proto::rr::Name;
use hickory_proto::serialize::binary::BinDecodable;

use crate::DecodeError;

/// Decodes a wire-format domain name.
pub trait NameDecoder {
    /// Decode `wire` into the name's presentation form.
    fn decode_name(&self, wire: &[u8]) -> Result<String, DecodeError>;
}

/// Decodes a wire-format DNS message.
pub trait MessageDecoder {
    /// The decoded message.
    type Message;

    /// Decode `wire` into a message.
    fn decode_message(&self, wire: &[u8]) -> Result<Self::Message, DecodeError>;

    /// Human-readable, multi-line rendering of a decoded message.
    fn to_display_text(&self, message: &Self::Message) -> String;
}

/// Decoder backed by `hickory-proto`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WireDecoder;

impl NameDecoder for WireDecoder {
    /// Punycode labels are kept in their ASCII wire form.
    fn decode_name(&self, wire: &[u8]) -> Result<String, DecodeError> {
        Name::from_bytes(wire)
            .map(|name| name.to_ascii())
            .map_err(|e| DecodeError::new(e.to_string()))
    }
}

impl MessageDecoder for WireDecoder {
    type Message = Message;

    fn decode_message(&self, wire: &[u8]) -> Result<Message, DecodeError> {
        Message::from_vec(wire).map_err(|e| DecodeError::new(e.to_string()))
    }

    fn to_display_text(&self, message: &Message) -> String {
        message.to_string()
    }
}

/// Hand-assembled wire-format fixtures shared by the tests.
#[cfg(test)]
pub(crate) mod fixtures {
    /// `example.com.` in wire format.
    pub const EXAMPLE_COM: &[u8] = b"\x07example\x03com\x00";

    /// `xn--p1ai.` (the `.рф` TLD) in wire format.
    pub const PUNYCODE_TLD: &[u8] = b"\x08xn--p1ai\x00";

    /// A label claiming five bytes with only one present.
    pub const TRUNCATED_NAME: &[u8] = b"\x05a";

    /// A query for `example.com. IN A` with ID 0x1234 and RD set.
    pub fn example_query() -> Vec<u8> {
        let mut wire = vec![
            0x12, 0x34, // id
            0x01, 0x00, // flags: RD
            0x00, 0x01, // qdcount
            0x00, 0x00, // ancount
            0x00, 0x00, // nscount
            0x00, 0x00, // arcount
        ];
        wire.extend_from_slice(EXAMPLE_COM);
        wire.extend_from_slice(&[0x00, 0x01, 0x00, 0x01]);
        wire
    }

    /// A message cut off inside its header.
    pub const TRUNCATED_MESSAGE: &[u8] = &[0x12, 0x34, 0x01];
}
