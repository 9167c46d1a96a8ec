//! dnstap-yaml: deterministic text rendering of dnstap records.
//!
//! Renders one [`Envelope`] at a time into a YAML-like document, suitable for
//! log inspection and diffing. Field order and indentation are fixed so the
//! output of two equal records is byte-identical.
//!
//! # Output
//!
//! ```text
//! type: MESSAGE
//! identity: "ns1.example"
//! message:
//!   type: CLIENT_QUERY
//!   query_time: !!timestamp 2023-11-14 22:13:20.123456
//!   query_address: 192.0.2.1
//!   query_message: |
//!     <decoded DNS message, one line per row>
//! ---
//! ```
//!
//! # Degraded rendering
//!
//! Embedded wire-format fields (`query_zone`, `query_message`,
//! `response_message`) are decoded with `hickory-proto`. A field that fails to
//! decode is replaced by a comment such as
//! `# query_zone: parse failed: <detail>`; the rest of the record still
//! renders and the document terminator is always written.
//!
//! # Example
//!
//! ```rust,ignore
//! use dnstap_core::{Envelope, Message, MessageType};
//!
//! let envelope = Envelope::new(Message::new(MessageType::ClientQuery));
//! let (bytes, ok) = dnstap_yaml::yaml_format(&envelope);
//! assert!(ok);
//! std::io::stdout().write_all(&bytes)?;
//! ```

pub mod config;
pub mod decode;
pub mod error;
pub mod render;
pub mod text;

// Re-exports for convenience.
pub use config::RenderConfig;
pub use decode::{MessageDecoder, NameDecoder, WireDecoder};
pub use error::{DecodeError, RenderError};
pub use render::{yaml_format, Renderer, TIMESTAMP_LAYOUT};
pub use text::TextBuilder;

pub use dnstap_core;

/// Result type for dnstap-yaml operations.
pub type Result<T> = std::result::Result<T, RenderError>;
