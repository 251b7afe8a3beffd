//! Attachment encoding.
//!
//! Converts each attachment's bytes into a base64 payload for the
//! outbound request. Conversions run concurrently but the result sequence
//! always matches the input order, and any single failure fails the whole
//! batch so no partial attachment list can ever be forwarded.

use base64::Engine;
use tracing::debug;

use crate::error::{GenerationError, Result};
use crate::models::{Attachment, EncodedAttachment};

/// Encode every attachment, preserving input order in the output.
pub async fn encode_all(attachments: &[Attachment]) -> Result<Vec<EncodedAttachment>> {
    debug!("encoding {} attachment(s)", attachments.len());
    futures::future::try_join_all(attachments.iter().map(encode_one)).await
}

async fn encode_one(attachment: &Attachment) -> Result<EncodedAttachment> {
    let bytes = attachment
        .read_bytes()
        .await
        .map_err(|source| GenerationError::AttachmentRead {
            name: attachment.name.clone(),
            source,
        })?;

    Ok(EncodedAttachment {
        mime_type: attachment.mime_type.clone(),
        data: base64::engine::general_purpose::STANDARD.encode(bytes),
    })
}
