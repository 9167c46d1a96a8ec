//! Record model for captured dnstap transactions.
//!
//! This crate provides the in-memory shape of a dnstap record:
//!
//! - **Envelope**: the top-level record with producer identity and version
//! - **Message**: one captured DNS transaction side with its timing, network
//!   and raw wire-format fields
//! - **Errors**: construction-time validation with [`TapError`]
//!
//! Every optional attribute is an explicit [`Option`]; nothing here decodes
//! or renders. See the `dnstap-yaml` crate for the text renderer.
//!
//! # Example
//!
//! ```rust,ignore
//! use dnstap_core::{Envelope, Message, MessageType};
//!
//! let message = Message {
//!     query_address: Some(vec![192, 0, 2, 1]),
//!     ..Message::new(MessageType::ClientQuery)
//! };
//! let envelope = Envelope::new(message).with_identity("ns1");
//! assert!(envelope.message().is_some());
//! ```

#![doc(html_root_url = "https://docs.rs/dnstap-core/0.1.0")]

mod error;
pub mod types;

pub use error::{Result, TapError};
pub use types::*;
