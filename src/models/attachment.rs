//! Attachments offered as generation context.
//!
//! An [`Attachment`] is owned by the [`AttachmentStore`] from `add` until
//! removal or submission. Only PDF and image types ever reach the store;
//! the file-ingestion boundary rejects everything else.

use std::path::{Path, PathBuf};

use tracing::warn;

/// Where an attachment's bytes live.
#[derive(Clone, Debug)]
pub enum AttachmentData {
    /// Already in memory (e.g. pasted or dropped content)
    Bytes(Vec<u8>),
    /// On disk; read lazily at encode/preview time, which may fail
    File(PathBuf),
}

/// A user-supplied reference document (image or PDF).
#[derive(Clone, Debug)]
pub struct Attachment {
    /// Display name shown in the attachment list
    pub name: String,
    /// Declared MIME type: `application/pdf` or `image/*`
    pub mime_type: String,
    pub data: AttachmentData,
}

impl Attachment {
    pub fn from_bytes(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            data: AttachmentData::Bytes(bytes),
        }
    }

    /// Build an attachment from a file path, inferring the MIME type from
    /// the extension. Returns `None` for unsupported file types so callers
    /// can discard them before they reach the store.
    pub fn from_path(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        let mime_type = mime_from_extension(&path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Some(Self {
            name,
            mime_type: mime_type.to_string(),
            data: AttachmentData::File(path),
        })
    }

    /// Whether a declared MIME type is accepted by the store.
    pub fn is_supported_mime(mime_type: &str) -> bool {
        mime_type == "application/pdf" || mime_type.starts_with("image/")
    }

    /// Read the attachment's bytes. The only fallible case is a
    /// file-backed attachment whose path has become unreadable.
    pub(crate) async fn read_bytes(&self) -> std::io::Result<Vec<u8>> {
        match &self.data {
            AttachmentData::Bytes(bytes) => Ok(bytes.clone()),
            AttachmentData::File(path) => tokio::fs::read(path).await,
        }
    }
}

/// MIME type for the file extensions the ingestion boundary accepts.
fn mime_from_extension(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "pdf" => Some("application/pdf"),
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "bmp" => Some("image/bmp"),
        _ => None,
    }
}

/// The transport-safe form of one attachment, built per request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedAttachment {
    pub mime_type: String,
    /// Base64 of the attachment's bytes
    pub data: String,
}

/// Ordered collection of pending attachments.
#[derive(Debug, Default)]
pub struct AttachmentStore {
    items: Vec<Attachment>,
}

impl AttachmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append attachments in caller order. Unsupported MIME types are
    /// skipped with a warning; returns how many were actually added.
    pub fn add(&mut self, attachments: impl IntoIterator<Item = Attachment>) -> usize {
        let mut added = 0;
        for attachment in attachments {
            if Attachment::is_supported_mime(&attachment.mime_type) {
                self.items.push(attachment);
                added += 1;
            } else {
                warn!(
                    "skipping attachment '{}' with unsupported type '{}'",
                    attachment.name, attachment.mime_type
                );
            }
        }
        added
    }

    /// Remove exactly one attachment, shifting later ones down.
    ///
    /// Removing an attachment that is currently shown in a preview does
    /// not revoke that preview; the two lifecycles are independent.
    pub fn remove_at(&mut self, index: usize) -> Option<Attachment> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    /// Read-only view of the current ordered sequence.
    pub fn list(&self) -> &[Attachment] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
