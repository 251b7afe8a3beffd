//! # Exam Generator
//!
//! Core pipeline for turning an exam description (topic, grade,
//! difficulty, item counts, layout options, output language) plus
//! optional reference documents into one request to a generative
//! text/vision model, and for sanitizing the returned LaTeX source.
//!
//! ## Architecture
//!
//! The system is layered, leaves first:
//!
//! ### ① Models
//! - `models/exam` — the exam configuration value and its reducer-style
//!   store (numeric clamps enforced at the write boundary)
//! - `models/attachment` — ordered attachment store and encoded payloads
//!
//! ### ② Services
//! - `services/prompt` — pure, deterministic instruction-text assembly
//! - `services/encoder` — ordered, all-or-nothing base64 encoding
//! - `services/preview` — the single transient preview resource
//! - `services/templates` — fixed vi/en LaTeX scaffolds
//!
//! ### ③ Clients
//! - `clients` — the `GenerationClient` capability and the Gemini-style
//!   HTTP implementation
//!
//! ### ④ Workflow
//! - `workflow/pipeline` — the `Idle → Requesting → {Succeeded, Failed}`
//!   state machine orchestrating one submission
//! - `workflow/sanitize` — code-fence stripping of the response text

pub mod clients;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod services;
pub mod workflow;

pub use clients::{GeminiClient, GenerationClient, RequestPart};
pub use config::Config;
pub use error::{GenerationError, Result};
pub use models::{
    Attachment, AttachmentData, AttachmentStore, ConfigAction, ConfigStore, Difficulty,
    EncodedAttachment, ExamConfig, Language,
};
pub use services::{
    build_instruction, encode_all, InMemoryPreviewHost, PreviewHost, PreviewKind, PreviewManager,
    PreviewResource,
};
pub use workflow::{sanitize_output, GenerationState, RequestPipeline};
