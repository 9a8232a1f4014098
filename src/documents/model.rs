use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// An uploaded document as listed by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub file_id: String,
    pub name: String,
}

/// A single document plus a signed link to its file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentDetail {
    pub pdf: Document,
    pub download_url: String,
}

/// View state behind [`DocumentStore`](super::DocumentStore).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentsState {
    /// Cached list, in server order.
    pub data: Vec<Document>,
    /// Last failure text, empty when there is none.
    pub error: String,
    /// Upload progress, 0..=100.
    pub upload_progress: u8,
    /// Ids with a delete request in flight.
    pub deleting_ids: HashSet<String>,
}

impl DocumentsState {
    pub fn is_deleting(&self, id: &str) -> bool {
        self.deleting_ids.contains(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.data.iter().any(|doc| doc.id == id)
    }

    pub fn has_error(&self) -> bool {
        !self.error.is_empty()
    }
}

/// Result of [`DocumentStore::delete_document`](super::DocumentStore::delete_document).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteOutcome {
    pub success: bool,
    pub error: Option<String>,
}

impl DeleteOutcome {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
        }
    }
}

/// A file to send as the `file` field of a multipart upload.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

impl UploadFile {
    /// A PDF upload.
    pub fn pdf(name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            content_type: "application/pdf".to_string(),
            bytes: bytes.into(),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    pub fn len(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
