//! Crate error types.
//!
//! Every failure that can interrupt a generation attempt collapses into
//! one [`GenerationError`] so the pipeline can publish a single
//! human-readable message. An empty model response is deliberately NOT an
//! error; it propagates as an empty sanitized result.

use thiserror::Error;

/// Errors raised while building or running a generation request.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Validation guard: nothing to base the exam on.
    #[error("nothing to generate: enter a topic or attach at least one document")]
    EmptyRequest,

    /// A submission arrived while another request was in flight.
    #[error("a generation request is already in progress")]
    Busy,

    /// An attachment's bytes could not be read.
    #[error("failed to read attachment '{name}': {source}")]
    AttachmentRead {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// The external generation call failed or returned an error status.
    #[error("generation request failed: {0}")]
    Provider(String),
}

impl GenerationError {
    /// Validation errors are surfaced inline, before any request exists.
    pub fn is_validation(&self) -> bool {
        matches!(self, GenerationError::EmptyRequest)
    }
}

/// Crate result type.
pub type Result<T> = std::result::Result<T, GenerationError>;
