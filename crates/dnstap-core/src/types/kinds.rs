//! Enumerations of the dnstap schema.
//!
//! Each enumeration keeps the numeric values used on the wire. Values this
//! schema version does not know are preserved as `Unknown(n)` and display as
//! the bare number, so records from newer producers still render.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! schema_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident = $value:literal => $label:literal,
            )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "i32", into = "i32")]
        pub enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
            /// Value not defined by this schema version
            Unknown(i32),
        }

        impl $name {
            /// Numeric value used on the wire
            #[must_use]
            pub const fn value(self) -> i32 {
                match self {
                    $(Self::$variant => $value,)+
                    Self::Unknown(value) => value,
                }
            }

            /// Upper-case schema label, `None` for unknown values
            #[must_use]
            pub const fn label(self) -> Option<&'static str> {
                match self {
                    $(Self::$variant => Some($label),)+
                    Self::Unknown(_) => None,
                }
            }
        }

        impl From<i32> for $name {
            fn from(value: i32) -> Self {
                match value {
                    $($value => Self::$variant,)+
                    other => Self::Unknown(other),
                }
            }
        }

        impl From<$name> for i32 {
            fn from(kind: $name) -> Self {
                kind.value()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self.label() {
                    Some(label) => f.write_str(label),
                    None => write!(f, "{}", self.value()),
                }
            }
        }
    };
}

schema_enum! {
    /// Discriminator of an [`Envelope`](crate::Envelope)
    pub enum EnvelopeKind {
        /// Envelope wraps one [`Message`](crate::Message)
        Message = 1 => "MESSAGE",
    }
}

schema_enum! {
    /// Which side of which DNS transaction a message was captured on
    pub enum MessageType {
        /// Query sent by an authoritative server
        AuthQuery = 1 => "AUTH_QUERY",
        /// Response sent by an authoritative server
        AuthResponse = 2 => "AUTH_RESPONSE",
        /// Query sent by a recursive resolver to an upstream server
        ResolverQuery = 3 => "RESOLVER_QUERY",
        /// Response received by a recursive resolver
        ResolverResponse = 4 => "RESOLVER_RESPONSE",
        /// Query received from a client
        ClientQuery = 5 => "CLIENT_QUERY",
        /// Response sent to a client
        ClientResponse = 6 => "CLIENT_RESPONSE",
        /// Query sent by a forwarder
        ForwarderQuery = 7 => "FORWARDER_QUERY",
        /// Response received by a forwarder
        ForwarderResponse = 8 => "FORWARDER_RESPONSE",
        /// Query sent by a stub resolver
        StubQuery = 9 => "STUB_QUERY",
        /// Response received by a stub resolver
        StubResponse = 10 => "STUB_RESPONSE",
        /// Query sent by a tool such as `dig`
        ToolQuery = 11 => "TOOL_QUERY",
        /// Response received by a tool
        ToolResponse = 12 => "TOOL_RESPONSE",
        /// Dynamic update query
        UpdateQuery = 13 => "UPDATE_QUERY",
        /// Dynamic update response
        UpdateResponse = 14 => "UPDATE_RESPONSE",
    }
}

schema_enum! {
    /// Address family of the captured socket
    pub enum SocketFamily {
        /// IPv4
        Inet = 1 => "INET",
        /// IPv6
        Inet6 = 2 => "INET6",
    }
}

schema_enum! {
    /// Transport of the captured socket
    pub enum SocketProtocol {
        /// Plain UDP
        Udp = 1 => "UDP",
        /// Plain TCP
        Tcp = 2 => "TCP",
        /// DNS over TLS
        Dot = 3 => "DOT",
        /// DNS over HTTPS
        Doh = 4 => "DOH",
        /// DNSCrypt over UDP
        DnsCryptUdp = 5 => "DNSCryptUDP",
        /// DNSCrypt over TCP
        DnsCryptTcp = 6 => "DNSCryptTCP",
        /// DNS over QUIC
        Doq = 7 => "DOQ",
    }
}

impl MessageType {
    /// Returns true if this message was captured on the query side
    #[must_use]
    pub const fn is_query(self) -> bool {
        matches!(
            self,
            Self::AuthQuery
                | Self::ResolverQuery
                | Self::ClientQuery
                | Self::ForwarderQuery
                | Self::StubQuery
                | Self::ToolQuery
                | Self::UpdateQuery
        )
    }

    /// Returns true if this message was captured on the response side
    #[must_use]
    pub const fn is_response(self) -> bool {
        matches!(
            self,
            Self::AuthResponse
                | Self::ResolverResponse
                | Self::ClientResponse
                | Self::ForwarderResponse
                | Self::StubResponse
                | Self::ToolResponse
                | Self::UpdateResponse
        )
    }
}
