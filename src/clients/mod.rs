//! Generation capability boundary.
//!
//! The pipeline talks to [`GenerationClient`] only; the concrete HTTP
//! transport lives in [`gemini`]. Tests substitute their own client.

pub mod gemini;

use async_trait::async_trait;

use crate::error::Result;

/// One element of the ordered outbound payload: the instruction text
/// first, followed by zero or more encoded attachments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RequestPart {
    Text(String),
    InlineData { mime_type: String, data: String },
}

/// The external generation capability: takes the ordered parts, returns
/// free-form response text. Transport, auth and retries are the
/// implementation's concern.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    async fn generate(&self, parts: &[RequestPart]) -> Result<String>;
}

pub use gemini::GeminiClient;
