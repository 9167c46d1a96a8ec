//! Envelope rendering.
//!
//! Fields are written in a fixed order, one line each, and absent fields
//! produce no line at all:
//!
//! | Field | Form |
//! |-------|------|
//! | `type` | schema label |
//! | `query_time`, `response_time` | `!!timestamp` in UTC, microseconds |
//! | `local_id` | at least 12 upper-case hex digits |
//! | `pcp_ssp` | 32 upper-case hex digits |
//! | `subscriber_id` | raw string |
//! | `socket_family`, `socket_protocol` | schema label |
//! | `txid` | integer |
//! | `fqdn` | raw string |
//! | `query_address`, `response_address` | IP address |
//! | `query_port`, `response_port` | integer |
//! | `query_zone` | quoted decoded name |
//! | `query_message`, `response_message` | block literal of the decoded message |

use std::fmt::Write;

use dnstap_core::{ip_from_bytes, Envelope, Message, Timestamp};
use tracing::debug;

use crate::config::RenderConfig;
use crate::decode::{MessageDecoder, NameDecoder, WireDecoder};
use crate::text::{quote, raw, TextBuilder};

/// `chrono` layout of rendered timestamps.
pub const TIMESTAMP_LAYOUT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Depth of the fields nested under `message:`.
const MESSAGE_DEPTH: usize = 1;

/// Render an envelope with the default configuration and decoders.
///
/// Returns the rendered document and `true`; decode failures of embedded
/// fields are reported inline and never fail the whole record.
#[must_use]
pub fn yaml_format(envelope: &Envelope) -> (Vec<u8>, bool) {
    Renderer::default().render(envelope)
}

/// Renders envelopes into YAML-like documents.
///
/// Holds no per-record state, so one renderer can be shared across threads
/// when its decoder can.
#[derive(Debug, Clone)]
pub struct Renderer<D = WireDecoder> {
    config: RenderConfig,
    decoder: D,
}

impl Renderer {
    /// Create a renderer backed by the `hickory-proto` decoder.
    #[must_use]
    pub const fn new(config: RenderConfig) -> Self {
        Self::with_decoder(config, WireDecoder)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(RenderConfig::default())
    }
}

impl<D> Renderer<D> {
    /// Create a renderer with custom decode collaborators.
    pub const fn with_decoder(config: RenderConfig, decoder: D) -> Self {
        Self { config, decoder }
    }

    /// Configuration in use.
    pub const fn config(&self) -> &RenderConfig {
        &self.config
    }
}

impl<D: NameDecoder + MessageDecoder> Renderer<D> {
    /// Render one envelope into its own document.
    ///
    /// The flag is always `true`: the envelope invariants are enforced when
    /// it is built, and embedded decode failures become comments.
    pub fn render(&self, envelope: &Envelope) -> (Vec<u8>, bool) {
        let mut out = TextBuilder::with_capacity(512);
        self.render_to(envelope, &mut out);
        (out.into_bytes(), true)
    }

    /// Render a sequence of envelopes into one stream of documents.
    pub fn render_all<'a, I>(&self, envelopes: I) -> Vec<u8>
    where
        I: IntoIterator<Item = &'a Envelope>,
    {
        let mut out = TextBuilder::new();
        for envelope in envelopes {
            self.render_to(envelope, &mut out);
        }
        out.into_bytes()
    }

    /// Append one envelope's document to `out`.
    pub fn render_to(&self, envelope: &Envelope, out: &mut TextBuilder) {
        out.field(0, "type", envelope.kind());
        if let Some(identity) = envelope.identity() {
            out.field(0, "identity", quote(identity));
        }
        if let Some(version) = envelope.version() {
            out.field(0, "version", quote(version));
        }
        if let Some(message) = envelope.message() {
            out.header(0, "message");
            self.render_message(message, out);
        }
        out.separator();
    }

    fn render_message(&self, m: &Message, out: &mut TextBuilder) {
        let depth = MESSAGE_DEPTH;

        out.field(depth, "type", m.message_type);

        if let Some(ts) = m.query_time() {
            render_timestamp(out, depth, "query_time", ts);
        }
        if let Some(ts) = m.response_time() {
            render_timestamp(out, depth, "response_time", ts);
        }

        if let Some(local_id) = m.local_id {
            out.field(depth, "local_id", format_args!("{local_id:012X}"));
        }
        if let Some(pcp_ssp) = m.pcp_ssp {
            out.field(depth, "pcp_ssp", format_args!("{pcp_ssp:032X}"));
        }
        if let Some(ref subscriber_id) = m.subscriber_id {
            out.field(depth, "subscriber_id", self.opaque(subscriber_id));
        }

        if let Some(family) = m.socket_family {
            out.field(depth, "socket_family", family);
        }
        if let Some(protocol) = m.socket_protocol {
            out.field(depth, "socket_protocol", protocol);
        }
        if let Some(txid) = m.transaction_id {
            out.field(depth, "txid", txid);
        }
        if let Some(ref fqdn) = m.fully_qualified_domain_name {
            out.field(depth, "fqdn", self.opaque(fqdn));
        }

        if let Some(ref addr) = m.query_address {
            out.field(depth, "query_address", format_address(addr));
        }
        if let Some(ref addr) = m.response_address {
            out.field(depth, "response_address", format_address(addr));
        }
        if let Some(port) = m.query_port {
            out.field(depth, "query_port", port);
        }
        if let Some(port) = m.response_port {
            out.field(depth, "response_port", port);
        }

        if let Some(ref zone) = m.query_zone {
            match self.decoder.decode_name(zone) {
                Ok(name) => out.field(depth, "query_zone", quote(name.as_bytes())),
                Err(e) => {
                    debug!(field = "query_zone", error = %e, "embedded name failed to decode");
                    out.comment(depth, "query_zone", format_args!("parse failed: {e}"));
                }
            }
        }

        if let Some(ref wire) = m.query_message {
            self.render_dns_message(out, depth, "query_message", wire);
        }
        if let Some(ref wire) = m.response_message {
            self.render_dns_message(out, depth, "response_message", wire);
        }
    }

    fn render_dns_message(&self, out: &mut TextBuilder, depth: usize, key: &str, wire: &[u8]) {
        match self.decoder.decode_message(wire) {
            Ok(message) => {
                let text = self.decoder.to_display_text(&message);
                out.literal_block(depth, key, &text);
            }
            Err(e) => {
                debug!(field = key, error = %e, "embedded message failed to decode");
                out.comment(depth, key, format_args!("parse failed: {e}"));
            }
        }
    }

    fn opaque(&self, bytes: &[u8]) -> String {
        if self.config.quote_opaque_strings {
            quote(bytes)
        } else {
            raw(bytes).into_owned()
        }
    }
}

fn render_timestamp(out: &mut TextBuilder, depth: usize, key: &str, ts: Timestamp) {
    match ts.to_utc() {
        Some(utc) => out.field(
            depth,
            key,
            format_args!("!!timestamp {}", utc.format(TIMESTAMP_LAYOUT)),
        ),
        None => {
            debug!(field = key, seconds = ts.seconds, "timestamp outside calendar range");
            out.comment(depth, key, "out of range");
        }
    }
}

/// Textual address; lengths other than 4 or 16 become `?` plus hex.
fn format_address(bytes: &[u8]) -> String {
    if let Some(ip) = ip_from_bytes(bytes) {
        return ip.to_string();
    }
    let mut text = String::with_capacity(1 + bytes.len() * 2);
    text.push('?');
    for b in bytes {
        let _ = write!(text, "{b:02x}");
    }
    text
}
