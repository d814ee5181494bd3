// Supporting document attached to a medical leave request.
//
// Responsibilities
// - Carry the file bytes with their name and declared content type.
// - Detect the accepted kinds (PDF, JPEG, PNG) from the content type, or from the
//   file extension when no content type was declared.

use bytes::Bytes;
use std::fmt;
use std::io;
use std::path::Path;

pub const MAX_ATTACHMENT_BYTES: u64 = 5_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentKind {
    Pdf,
    Jpeg,
    Png,
}

impl AttachmentKind {
    pub fn mime(&self) -> &'static str {
        match self {
            AttachmentKind::Pdf => "application/pdf",
            AttachmentKind::Jpeg => "image/jpeg",
            AttachmentKind::Png => "image/png",
        }
    }

    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or_default().trim();
        match essence.to_ascii_lowercase().as_str() {
            "application/pdf" => Some(AttachmentKind::Pdf),
            "image/jpeg" | "image/jpg" => Some(AttachmentKind::Jpeg),
            "image/png" => Some(AttachmentKind::Png),
            _ => None,
        }
    }

    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let extension = Path::new(file_name).extension()?.to_str()?;
        match extension.to_ascii_lowercase().as_str() {
            "pdf" => Some(AttachmentKind::Pdf),
            "jpg" | "jpeg" => Some(AttachmentKind::Jpeg),
            "png" => Some(AttachmentKind::Png),
            _ => None,
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub content_type: Option<String>,
    /// Shared buffer; clones do not copy the file.
    pub bytes: Bytes,
}

impl Attachment {
    pub fn new(
        file_name: impl Into<String>,
        content_type: Option<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type,
            bytes: Bytes::from(bytes),
        }
    }

    /// Reads a file from disk. The content type is inferred from the extension.
    pub async fn from_path(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let content_type =
            AttachmentKind::from_file_name(&file_name).map(|kind| kind.mime().to_string());
        Ok(Self::new(file_name, content_type, bytes))
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn kind(&self) -> Option<AttachmentKind> {
        match self.content_type.as_deref() {
            Some(mime) if !mime.trim().is_empty() => AttachmentKind::from_mime(mime),
            _ => AttachmentKind::from_file_name(&self.file_name),
        }
    }
}

// Certificates run to megabytes; never dump them into logs.
impl fmt::Debug for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attachment")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("size", &self.size())
            .finish()
    }
}
