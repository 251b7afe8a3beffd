//! Transient attachment previews.
//!
//! At most one preview resource is live at any time. Opening a new
//! preview revokes the previous one, closing revokes explicitly, and the
//! manager's `Drop` impl revokes on teardown so the handle can never
//! leak, whichever exit path the owner takes.
//!
//! The actual handle registry (a browser object-URL store, a temp-file
//! server, ...) sits behind [`PreviewHost`]; the crate ships an
//! in-memory implementation used by tests and the demo binary.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::error::{GenerationError, Result};
use crate::models::Attachment;

/// How the presentation layer should render a preview.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PreviewKind {
    Image,
    Pdf,
}

/// A revocable handle to an attachment's bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreviewResource {
    pub url: String,
    pub kind: PreviewKind,
    pub name: String,
}

/// Capability to mint and revoke preview handles.
pub trait PreviewHost: Send + Sync {
    fn create_url(&self, name: &str, mime_type: &str, bytes: &[u8]) -> String;
    fn revoke_url(&self, url: &str);
}

/// Default host: keeps live previews in a process-local registry.
#[derive(Debug, Default)]
pub struct InMemoryPreviewHost {
    entries: Mutex<HashMap<String, Vec<u8>>>,
    next_id: AtomicU64,
}

impl InMemoryPreviewHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of handles that have been created and not yet revoked.
    pub fn live_count(&self) -> usize {
        self.entries.lock().expect("preview registry poisoned").len()
    }

    /// Bytes behind a live handle, if any.
    pub fn bytes(&self, url: &str) -> Option<Vec<u8>> {
        self.entries
            .lock()
            .expect("preview registry poisoned")
            .get(url)
            .cloned()
    }
}

impl PreviewHost for InMemoryPreviewHost {
    fn create_url(&self, _name: &str, _mime_type: &str, bytes: &[u8]) -> String {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let url = format!("preview://{id}");
        self.entries
            .lock()
            .expect("preview registry poisoned")
            .insert(url.clone(), bytes.to_vec());
        url
    }

    fn revoke_url(&self, url: &str) {
        self.entries
            .lock()
            .expect("preview registry poisoned")
            .remove(url);
    }
}

/// Manages the single live preview resource.
pub struct PreviewManager {
    host: Arc<dyn PreviewHost>,
    live: Option<PreviewResource>,
}

impl PreviewManager {
    pub fn new(host: Arc<dyn PreviewHost>) -> Self {
        Self { host, live: None }
    }

    /// Open a preview for the given attachment, releasing any previous
    /// one first (one-resource invariant, last-open-wins).
    pub async fn open(&mut self, attachment: &Attachment) -> Result<&PreviewResource> {
        let bytes =
            attachment
                .read_bytes()
                .await
                .map_err(|source| GenerationError::AttachmentRead {
                    name: attachment.name.clone(),
                    source,
                })?;

        self.close();

        let kind = if attachment.mime_type == "application/pdf" {
            PreviewKind::Pdf
        } else {
            PreviewKind::Image
        };

        let url = self
            .host
            .create_url(&attachment.name, &attachment.mime_type, &bytes);
        debug!("opened preview {} for '{}'", url, attachment.name);

        Ok(self.live.insert(PreviewResource {
            url,
            kind,
            name: attachment.name.clone(),
        }))
    }

    /// Release the live resource, if any. Idempotent.
    pub fn close(&mut self) {
        if let Some(resource) = self.live.take() {
            debug!("revoking preview {}", resource.url);
            self.host.revoke_url(&resource.url);
        }
    }

    /// The currently live preview, if one is open.
    pub fn current(&self) -> Option<&PreviewResource> {
        self.live.as_ref()
    }
}

impl Drop for PreviewManager {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attachment(name: &str, mime: &str) -> Attachment {
        Attachment::from_bytes(name, mime, name.as_bytes().to_vec())
    }

    #[tokio::test]
    async fn classifies_kind_by_mime_type() {
        let host = Arc::new(InMemoryPreviewHost::new());
        let mut manager = PreviewManager::new(host);

        let resource = manager
            .open(&attachment("doc.pdf", "application/pdf"))
            .await
            .unwrap();
        assert_eq!(resource.kind, PreviewKind::Pdf);

        let resource = manager
            .open(&attachment("scan.png", "image/png"))
            .await
            .unwrap();
        assert_eq!(resource.kind, PreviewKind::Image);
    }

    #[tokio::test]
    async fn opening_a_second_preview_releases_the_first() {
        let host = Arc::new(InMemoryPreviewHost::new());
        let mut manager = PreviewManager::new(host.clone());

        manager
            .open(&attachment("a.png", "image/png"))
            .await
            .unwrap();
        let first_url = manager.current().unwrap().url.clone();
        assert_eq!(host.live_count(), 1);

        manager
            .open(&attachment("b.png", "image/png"))
            .await
            .unwrap();
        let second_url = manager.current().unwrap().url.clone();

        assert_ne!(first_url, second_url);
        assert_eq!(host.live_count(), 1);
        assert!(host.bytes(&first_url).is_none());
        assert!(host.bytes(&second_url).is_some());
    }

    #[tokio::test]
    async fn close_is_idempotent() {
        let host = Arc::new(InMemoryPreviewHost::new());
        let mut manager = PreviewManager::new(host.clone());

        manager
            .open(&attachment("a.png", "image/png"))
            .await
            .unwrap();
        manager.close();
        manager.close();

        assert!(manager.current().is_none());
        assert_eq!(host.live_count(), 0);
    }

    #[tokio::test]
    async fn dropping_the_manager_releases_the_live_resource() {
        let host = Arc::new(InMemoryPreviewHost::new());
        {
            let mut manager = PreviewManager::new(host.clone());
            manager
                .open(&attachment("a.png", "image/png"))
                .await
                .unwrap();
            assert_eq!(host.live_count(), 1);
        }
        assert_eq!(host.live_count(), 0);
    }
}
