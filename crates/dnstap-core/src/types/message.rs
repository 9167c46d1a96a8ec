use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use super::{MessageType, SocketFamily, SocketProtocol};

const NANOS_PER_SEC: u32 = 1_000_000_000;

/// One captured side of a DNS transaction
///
/// Every attribute except [`message_type`](Self::message_type) is optional
/// and independently absent. Raw byte fields are kept as captured; decoding
/// them is left to the consumer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Classification of the captured message
    pub message_type: MessageType,

    /// Query time, whole seconds since the Unix epoch
    #[serde(default)]
    pub query_time_sec: Option<u64>,

    /// Query time, nanosecond fraction
    #[serde(default)]
    pub query_time_nsec: Option<u32>,

    /// Response time, whole seconds since the Unix epoch
    #[serde(default)]
    pub response_time_sec: Option<u64>,

    /// Response time, nanosecond fraction
    #[serde(default)]
    pub response_time_nsec: Option<u32>,

    /// 48-bit local identifier
    ///
    /// Not range-checked; wider values still render, with more digits.
    #[serde(default)]
    pub local_id: Option<u64>,

    /// 128-bit PCP subscriber service profile identifier
    #[serde(default)]
    pub pcp_ssp: Option<u128>,

    /// Opaque subscriber identifier
    #[serde(default)]
    pub subscriber_id: Option<Vec<u8>>,

    /// Address family of the captured socket
    #[serde(default)]
    pub socket_family: Option<SocketFamily>,

    /// Transport of the captured socket
    #[serde(default)]
    pub socket_protocol: Option<SocketProtocol>,

    /// DNS transaction ID
    #[serde(default)]
    pub transaction_id: Option<u32>,

    /// Opaque fully qualified domain name
    #[serde(default)]
    pub fully_qualified_domain_name: Option<Vec<u8>>,

    /// Raw initiator address (4 or 16 bytes)
    #[serde(default)]
    pub query_address: Option<Vec<u8>>,

    /// Raw responder address (4 or 16 bytes)
    #[serde(default)]
    pub response_address: Option<Vec<u8>>,

    /// Initiator port
    #[serde(default)]
    pub query_port: Option<u16>,

    /// Responder port
    #[serde(default)]
    pub response_port: Option<u16>,

    /// Zone of the query, as a wire-format domain name
    #[serde(default)]
    pub query_zone: Option<Vec<u8>>,

    /// Wire-format DNS query message
    #[serde(default)]
    pub query_message: Option<Vec<u8>>,

    /// Wire-format DNS response message
    #[serde(default)]
    pub response_message: Option<Vec<u8>>,
}

impl Message {
    /// Create a message of the given type with every other field absent
    #[must_use]
    pub const fn new(message_type: MessageType) -> Self {
        Self {
            message_type,
            query_time_sec: None,
            query_time_nsec: None,
            response_time_sec: None,
            response_time_nsec: None,
            local_id: None,
            pcp_ssp: None,
            subscriber_id: None,
            socket_family: None,
            socket_protocol: None,
            transaction_id: None,
            fully_qualified_domain_name: None,
            query_address: None,
            response_address: None,
            query_port: None,
            response_port: None,
            query_zone: None,
            query_message: None,
            response_message: None,
        }
    }

    /// Query time, present only when both halves were captured
    #[must_use]
    pub const fn query_time(&self) -> Option<Timestamp> {
        Timestamp::from_halves(self.query_time_sec, self.query_time_nsec)
    }

    /// Response time, present only when both halves were captured
    #[must_use]
    pub const fn response_time(&self) -> Option<Timestamp> {
        Timestamp::from_halves(self.response_time_sec, self.response_time_nsec)
    }

    /// Set the query time from both halves at once
    #[must_use]
    pub fn with_query_time(mut self, seconds: u64, nanos: u32) -> Self {
        self.query_time_sec = Some(seconds);
        self.query_time_nsec = Some(nanos);
        self
    }

    /// Set the response time from both halves at once
    #[must_use]
    pub fn with_response_time(mut self, seconds: u64, nanos: u32) -> Self {
        self.response_time_sec = Some(seconds);
        self.response_time_nsec = Some(nanos);
        self
    }

    /// Initiator address, if present and of a valid length
    #[must_use]
    pub fn query_ip(&self) -> Option<IpAddr> {
        ip_from_bytes(self.query_address.as_deref()?)
    }

    /// Responder address, if present and of a valid length
    #[must_use]
    pub fn response_ip(&self) -> Option<IpAddr> {
        ip_from_bytes(self.response_address.as_deref()?)
    }
}

/// Interpret raw address bytes: 4 bytes as IPv4, 16 bytes as IPv6
#[must_use]
pub fn ip_from_bytes(bytes: &[u8]) -> Option<IpAddr> {
    if let Ok(octets) = <[u8; 4]>::try_from(bytes) {
        return Some(IpAddr::V4(Ipv4Addr::from(octets)));
    }
    <[u8; 16]>::try_from(bytes)
        .ok()
        .map(|octets| IpAddr::V6(Ipv6Addr::from(octets)))
}

/// Capture time as epoch seconds plus a nanosecond fraction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Timestamp {
    /// Whole seconds since the Unix epoch
    pub seconds: u64,
    /// Nanosecond fraction; values past one second carry into `seconds`
    pub nanos: u32,
}

impl Timestamp {
    /// Pair two optional halves; a lone half yields `None`
    #[must_use]
    pub const fn from_halves(seconds: Option<u64>, nanos: Option<u32>) -> Option<Self> {
        match (seconds, nanos) {
            (Some(seconds), Some(nanos)) => Some(Self { seconds, nanos }),
            _ => None,
        }
    }

    /// Convert to a UTC calendar time, `None` when out of calendar range
    #[must_use]
    pub fn to_utc(self) -> Option<DateTime<Utc>> {
        let seconds = i64::try_from(self.seconds)
            .ok()?
            .checked_add(i64::from(self.nanos / NANOS_PER_SEC))?;
        DateTime::<Utc>::from_timestamp(seconds, self.nanos % NANOS_PER_SEC)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_message_is_empty() {
        let msg = Message::new(MessageType::ClientQuery);
        assert_eq!(msg.message_type, MessageType::ClientQuery);
        assert!(msg.query_time().is_none());
        assert!(msg.query_address.is_none());
        assert!(msg.query_message.is_none());
    }

    #[test]
    fn test_timestamp_requires_both_halves() {
        let mut msg = Message::new(MessageType::ClientQuery);
        msg.query_time_sec = Some(1_700_000_000);
        assert!(msg.query_time().is_none());

        msg.query_time_sec = None;
        msg.query_time_nsec = Some(5);
        assert!(msg.query_time().is_none());

        let msg = msg.with_query_time(1_700_000_000, 5);
        assert_eq!(
            msg.query_time(),
            Some(Timestamp {
                seconds: 1_700_000_000,
                nanos: 5
            })
        );
        assert!(msg.response_time().is_none());
    }

    #[test]
    fn test_timestamp_to_utc() {
        let ts = Timestamp {
            seconds: 1_700_000_000,
            nanos: 123_456_789,
        };
        let utc = ts.to_utc().unwrap();
        assert_eq!(utc.timestamp(), 1_700_000_000);
        assert_eq!(utc.timestamp_subsec_nanos(), 123_456_789);
    }

    #[test]
    fn test_timestamp_nanos_carry() {
        let ts = Timestamp {
            seconds: 10,
            nanos: 2_500_000_000,
        };
        let utc = ts.to_utc().unwrap();
        assert_eq!(utc.timestamp(), 12);
        assert_eq!(utc.timestamp_subsec_nanos(), 500_000_000);
    }

    #[test]
    fn test_timestamp_out_of_range() {
        let ts = Timestamp {
            seconds: u64::MAX,
            nanos: 0,
        };
        assert!(ts.to_utc().is_none());
    }

    #[test]
    fn test_ip_from_bytes() {
        assert_eq!(
            ip_from_bytes(&[192, 0, 2, 1]),
            Some(IpAddr::V4(Ipv4Addr::new(192, 0, 2, 1)))
        );
        let v6 = "2001:db8::1".parse::<Ipv6Addr>().unwrap();
        assert_eq!(ip_from_bytes(&v6.octets()), Some(IpAddr::V6(v6)));
        assert_eq!(ip_from_bytes(&[1, 2, 3]), None);
        assert_eq!(ip_from_bytes(&[]), None);
    }

    #[test]
    fn test_message_addresses() {
        let msg = Message {
            query_address: Some(vec![10, 0, 0, 1]),
            response_address: Some(vec![1, 2]),
            ..Message::new(MessageType::ResolverQuery)
        };
        assert_eq!(msg.query_ip(), Some(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1))));
        assert_eq!(msg.response_ip(), None);
    }
}
