//! Request pipeline.
//!
//! Owns the generation state machine and orchestrates one submission:
//! validate, encode attachments, build the instruction text, issue the
//! single outbound call, sanitize and publish the result.
//!
//! States: `Idle → Requesting → {Succeeded, Failed}`; the next
//! submission always starts a fresh cycle. `Succeeded` and `Failed` are
//! input-accepting; only `Requesting` rejects a new submission. There is
//! no cancellation primitive: an in-flight request runs to completion.

use tracing::{debug, info, warn};

use crate::clients::{GenerationClient, RequestPart};
use crate::error::{GenerationError, Result};
use crate::models::{Attachment, ExamConfig};
use crate::services::{build_instruction, encode_all};
use crate::workflow::sanitize::sanitize_output;

/// Observable state of the generation pipeline.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum GenerationState {
    #[default]
    Idle,
    Requesting,
    Succeeded(String),
    Failed(String),
}

impl GenerationState {
    /// Whether a new submission would be accepted right now.
    pub fn accepts_submission(&self) -> bool {
        !matches!(self, GenerationState::Requesting)
    }

    /// The published result text, if the last attempt succeeded.
    pub fn result_text(&self) -> Option<&str> {
        match self {
            GenerationState::Succeeded(text) => Some(text),
            _ => None,
        }
    }

    /// The published failure message, if the last attempt failed.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            GenerationState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Orchestrates exam generation requests.
pub struct RequestPipeline<C: GenerationClient> {
    client: C,
    state: GenerationState,
}

impl<C: GenerationClient> RequestPipeline<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            state: GenerationState::Idle,
        }
    }

    /// Current pipeline state, read by the presentation layer.
    pub fn state(&self) -> &GenerationState {
        &self.state
    }

    /// Run one full generation cycle.
    ///
    /// Guards: rejects re-entrant submission while `Requesting`, and
    /// rejects (staying input-accepting, without clearing the previous
    /// result) when the topic is empty and no attachments exist. On guard
    /// pass, any previous result is cleared immediately and all failures
    /// collapse into one `Failed` state carrying a human-readable
    /// message.
    pub async fn submit(
        &mut self,
        config: &ExamConfig,
        attachments: &[Attachment],
    ) -> Result<String> {
        if !self.state.accepts_submission() {
            warn!("submission ignored: a request is already in progress");
            return Err(GenerationError::Busy);
        }

        if config.topic.trim().is_empty() && attachments.is_empty() {
            debug!("submission rejected: empty topic and no attachments");
            return Err(GenerationError::EmptyRequest);
        }

        // Entering Requesting discards any previously published result.
        self.state = GenerationState::Requesting;
        info!(
            "🚀 generating exam (topic: '{}', attachments: {})",
            config.topic,
            attachments.len()
        );

        match self.run(config, attachments).await {
            Ok(text) => {
                info!("✓ generation succeeded ({} chars)", text.len());
                self.state = GenerationState::Succeeded(text.clone());
                Ok(text)
            }
            Err(e) => {
                warn!("generation failed: {}", e);
                self.state = GenerationState::Failed(e.to_string());
                Err(e)
            }
        }
    }

    async fn run(&self, config: &ExamConfig, attachments: &[Attachment]) -> Result<String> {
        // Encode first: a failing attachment must abort before any call.
        let encoded = if attachments.is_empty() {
            Vec::new()
        } else {
            encode_all(attachments).await?
        };

        let instruction = build_instruction(config, attachments.len());
        debug!("instruction text: {} chars", instruction.len());

        let mut parts = Vec::with_capacity(encoded.len() + 1);
        parts.push(RequestPart::Text(instruction));
        for attachment in encoded {
            parts.push(RequestPart::InlineData {
                mime_type: attachment.mime_type,
                data: attachment.data,
            });
        }

        let raw = self.client.generate(&parts).await?;
        Ok(sanitize_output(&raw))
    }
}
