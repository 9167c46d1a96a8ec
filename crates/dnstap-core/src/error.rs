use thiserror::Error;

use crate::types::EnvelopeKind;

/// Result type alias for record model operations
pub type Result<T> = std::result::Result<T, TapError>;

/// Errors raised when a record violates the envelope invariants
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TapError {
    /// A message-kind envelope was built without its payload
    #[error("envelope of kind MESSAGE carries no message payload")]
    MissingPayload,

    /// A payload was attached to an envelope kind that does not carry one
    #[error("envelope of kind {kind} cannot carry a message payload")]
    UnexpectedPayload {
        /// Kind of the offending envelope
        kind: EnvelopeKind,
    },
}
