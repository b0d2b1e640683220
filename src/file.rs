use std::path::Path;

use crate::error::ClientResult;

/// A file that is sent as one part of a multipart upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    /// File name reported in the part's `Content-Disposition`
    pub name: String,
    pub content: Vec<u8>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        UploadFile {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Reads a file from disk, keeping its file name
    pub async fn from_path(path: impl AsRef<Path>) -> ClientResult<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();

        Ok(UploadFile { name, content })
    }

    /// Same content under a different file name
    pub fn renamed(self, name: impl Into<String>) -> Self {
        UploadFile {
            name: name.into(),
            ..self
        }
    }

    pub fn size(&self) -> usize {
        self.content.len()
    }
}
