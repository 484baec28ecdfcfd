//! Presentation-only attachments.
//!
//! Files attached on the report screen live only for the viewing session
//! and are never persisted. Each one holds a preview URL from the host; the
//! URL is revoked when the file is removed or the session is dropped.

use std::collections::HashSet;

/// Issues and revokes preview URLs (object URLs in a browser host).
pub trait PreviewUrls {
    fn create(&mut self, file: &SessionFile) -> String;
    fn revoke(&mut self, url: &str);
}

impl<T: PreviewUrls + ?Sized> PreviewUrls for &mut T {
    fn create(&mut self, file: &SessionFile) -> String {
        (**self).create(file)
    }

    fn revoke(&mut self, url: &str) {
        (**self).revoke(url)
    }
}

/// A file picked during the session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl SessionFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// `N KB` below one MiB, `N.N MB` from there.
    pub fn display_size(&self) -> String {
        display_size(self.size())
    }
}

/// Format a byte count for the attachment list.
pub fn display_size(bytes: usize) -> String {
    let kb = bytes as f64 / 1024.0;
    if kb < 1024.0 {
        format!("{} KB", kb.round())
    } else {
        format!("{} MB", (kb / 1024.0 * 10.0).round() / 10.0)
    }
}

/// A session file with its live preview URL.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionAttachment {
    pub file: SessionFile,
    pub preview_url: String,
}

/// Attachments added on the report screen.
pub struct SessionAttachments<R: PreviewUrls> {
    urls: R,
    items: Vec<SessionAttachment>,
}

impl<R: PreviewUrls> SessionAttachments<R> {
    pub fn new(urls: R) -> Self {
        Self {
            urls,
            items: Vec::new(),
        }
    }

    pub fn items(&self) -> &[SessionAttachment] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Attach a file and create its preview URL. Returns its position.
    pub fn add(&mut self, file: SessionFile) -> usize {
        let preview_url = self.urls.create(&file);
        tracing::info!(name = %file.name, "File attached to the report");
        self.items.push(SessionAttachment { file, preview_url });
        self.items.len() - 1
    }

    /// Remove by position, revoking its preview URL.
    pub fn remove(&mut self, index: usize) -> Option<SessionFile> {
        if index >= self.items.len() {
            return None;
        }
        let item = self.items.remove(index);
        self.urls.revoke(&item.preview_url);
        tracing::info!(name = %item.file.name, "Attachment removed from the report");
        Some(item.file)
    }

    /// Remove everything, revoking every preview URL.
    pub fn clear(&mut self) {
        for item in self.items.drain(..) {
            self.urls.revoke(&item.preview_url);
        }
    }
}

impl<R: PreviewUrls> Drop for SessionAttachments<R> {
    fn drop(&mut self) {
        self.clear();
    }
}

/// In-process URL issuer that tracks which URLs are still live.
#[derive(Debug, Default)]
pub struct ObjectUrlRegistry {
    live: HashSet<String>,
}

impl ObjectUrlRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn is_live(&self, url: &str) -> bool {
        self.live.contains(url)
    }
}

impl PreviewUrls for ObjectUrlRegistry {
    fn create(&mut self, _file: &SessionFile) -> String {
        let url = format!("blob:medreport/{}", uuid::Uuid::new_v4());
        self.live.insert(url.clone());
        url
    }

    fn revoke(&mut self, url: &str) {
        if !self.live.remove(url) {
            tracing::debug!(url, "Revoking unknown preview URL");
        }
    }
}
