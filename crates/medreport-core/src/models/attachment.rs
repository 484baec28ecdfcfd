//! Inline file attachments.

use std::path::Path;

use base64::Engine as _;
use serde::{Deserialize, Serialize};

/// A file attached to a test, carried inline as a base64 data URL.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    /// Original filename
    pub name: String,
    /// MIME type
    #[serde(rename = "type")]
    pub mime_type: String,
    /// `data:<mime>;base64,<content>`
    pub data_url: String,
}

impl Attachment {
    /// Encode raw file content as an attachment.
    pub fn from_bytes(name: impl Into<String>, mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        let mime_type = mime_type.into();
        let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
        Self {
            name: name.into(),
            data_url: format!("data:{};base64,{}", mime_type, encoded),
            mime_type,
        }
    }

    /// Read a file from disk, guessing its MIME type from the extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let mime = mime_guess::from_path(path).first_or_octet_stream();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "attachment".to_string());
        Ok(Self::from_bytes(name, mime.essence_str(), &bytes))
    }

    /// Whether the MIME type is an image type. MIME types are case-insensitive.
    pub fn is_image(&self) -> bool {
        self.mime_type
            .get(..6)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("image/"))
    }

    /// Whether the content is actually inline (a `data:` URL).
    pub fn has_inline_data(&self) -> bool {
        self.data_url.starts_with("data:")
    }

    pub fn category(&self) -> FileCategory {
        FileCategory::from_mime(&self.mime_type)
    }

    /// "Image File" for images, otherwise the upper-cased MIME subtype,
    /// e.g. "PDF File".
    pub fn type_label(&self) -> String {
        if self.is_image() {
            return "Image File".to_string();
        }
        let subtype = self
            .mime_type
            .rsplit('/')
            .next()
            .filter(|s| !s.is_empty())
            .map(|s| s.to_uppercase())
            .unwrap_or_else(|| "File".to_string());
        format!("{} File", subtype)
    }
}

/// Badge category derived from MIME type keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileCategory {
    Image,
    Pdf,
    Sheet,
    Doc,
    Audio,
    Video,
    File,
}

impl FileCategory {
    /// First matching rule wins.
    pub fn from_mime(mime: &str) -> Self {
        let mime = mime.to_lowercase();
        if mime.starts_with("image/") {
            FileCategory::Image
        } else if mime.contains("pdf") {
            FileCategory::Pdf
        } else if mime.contains("excel") || mime.contains("spreadsheet") || mime.contains("csv") {
            FileCategory::Sheet
        } else if mime.contains("word") || mime.contains("document") {
            FileCategory::Doc
        } else if mime.contains("audio") {
            FileCategory::Audio
        } else if mime.contains("video") {
            FileCategory::Video
        } else {
            FileCategory::File
        }
    }

    /// Badge text.
    pub fn label(&self) -> &'static str {
        match self {
            FileCategory::Image => "IMAGE",
            FileCategory::Pdf => "PDF",
            FileCategory::Sheet => "SHEET",
            FileCategory::Doc => "DOC",
            FileCategory::Audio => "AUDIO",
            FileCategory::Video => "VIDEO",
            FileCategory::File => "FILE",
        }
    }

    /// Stylesheet class, e.g. `file-icon-pdf`.
    pub fn css_class(&self) -> String {
        format!("file-icon-{}", self.label().to_lowercase())
    }
}
