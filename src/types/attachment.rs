//! Attachment records supplied by the upload pipeline.
//!
//! Files are uploaded and processed outside this crate. What arrives here is
//! the record the pipeline leaves behind: the file's kind, its processing
//! status, the extracted text for documents, and optionally the pixel size
//! of an image. Only records whose status is [`UploadStatus::Success`]
//! contribute tokens.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{EstimateError, EstimateResult};

/// Maximum upload size accepted by the pipeline (10MB).
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Kind of an attached file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    /// Raster image (billed by the tiling rule).
    Image,
    /// Office document or PDF with extracted text.
    Document,
    /// Plain text or source file.
    Text,
}

impl FileType {
    /// Maps a file extension to its kind.
    ///
    /// Matching is case-insensitive. Returns `None` for extensions the
    /// upload pipeline rejects.
    ///
    /// # Examples
    ///
    /// ```
    /// use tokmeter::types::FileType;
    ///
    /// assert_eq!(FileType::from_extension("PNG"), Some(FileType::Image));
    /// assert_eq!(FileType::from_extension("docx"), Some(FileType::Document));
    /// assert_eq!(FileType::from_extension("md"), Some(FileType::Text));
    /// assert_eq!(FileType::from_extension("exe"), None);
    /// ```
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" | "png" => Some(Self::Image),
            "pdf" | "doc" | "docx" | "ppt" | "pptx" => Some(Self::Document),
            "txt" | "md" | "html" | "css" | "vue" => Some(Self::Text),
            _ => None,
        }
    }

    /// Returns the wire name of this kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Document => "document",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Processing status of an attachment.
///
/// Transitions `Uploading → Processing → {Success, Failed}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadStatus {
    /// Bytes are still being sent.
    #[default]
    Uploading,
    /// Upload finished, extraction running.
    Processing,
    /// Extraction finished; content and dimensions are final.
    Success,
    /// Upload or extraction failed.
    Failed,
}

impl UploadStatus {
    /// Returns `true` once the attachment is ready to be counted.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

/// An uploaded file as seen by the estimator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    /// Where the file was stored.
    #[serde(default)]
    pub url: String,
    /// Original file name.
    #[serde(default)]
    pub file_name: String,
    /// Kind of file.
    pub file_type: FileType,
    /// Extracted text (documents and text files only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Processing status.
    #[serde(default)]
    pub status: UploadStatus,
    /// Pixel width, when the pipeline inspected the image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Pixel height, when the pipeline inspected the image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    /// Failure reason reported by the pipeline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl Attachment {
    /// Creates a successfully processed image attachment.
    #[must_use]
    pub fn image(file_name: impl Into<String>, width: Option<u32>, height: Option<u32>) -> Self {
        Self {
            url: String::new(),
            file_name: file_name.into(),
            file_type: FileType::Image,
            content: None,
            status: UploadStatus::Success,
            width,
            height,
            error_message: None,
        }
    }

    /// Creates a successfully processed document attachment.
    #[must_use]
    pub fn document(file_name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            url: String::new(),
            file_name: file_name.into(),
            file_type: FileType::Document,
            content: Some(content.into()),
            status: UploadStatus::Success,
            width: None,
            height: None,
            error_message: None,
        }
    }

    /// Creates a successfully processed text attachment.
    #[must_use]
    pub fn text(file_name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            file_type: FileType::Text,
            ..Self::document(file_name, content)
        }
    }

    /// Returns the same attachment with a different status.
    #[must_use]
    pub fn with_status(mut self, status: UploadStatus) -> Self {
        self.status = status;
        self
    }

    /// Returns the pixel size when both sides are known and positive.
    #[must_use]
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        match (self.width, self.height) {
            (Some(w), Some(h)) if w > 0 && h > 0 => Some((w, h)),
            _ => None,
        }
    }

    /// Returns `true` if this attachment contributes tokens.
    #[must_use]
    pub fn is_countable(&self) -> bool {
        self.status.is_success()
    }
}

/// Parses a JSON array of attachment records.
///
/// # Errors
///
/// Returns `EstimateError::AttachmentManifest` if the JSON is malformed or
/// a record is missing its `fileType`.
pub fn parse_manifest(json: &str) -> EstimateResult<Vec<Attachment>> {
    serde_json::from_str(json).map_err(|e| EstimateError::attachment_manifest(e.to_string()))
}
