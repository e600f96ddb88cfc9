//! Core types for text extraction.

use serde::{Deserialize, Serialize};
use std::path::Path;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

/// Declared type of an uploaded contract file.
///
/// Parsing is case-insensitive, so `"PDF"` and `"pdf"` both yield
/// [`FileType::Pdf`]. Anything outside this set is an unsupported type.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Pdf,
    Docx,
    Doc,
    Jpg,
    Jpeg,
    Png,
    Tiff,
    Bmp,
    Txt,
}

impl FileType {
    /// All accepted file extensions, in declaration order.
    pub fn allowed_extensions() -> Vec<&'static str> {
        Self::iter().map(|t| t.into()).collect()
    }

    /// Check a bare extension (no dot) against the allow-list.
    pub fn is_allowed_extension(ext: &str) -> bool {
        ext.parse::<Self>().is_ok()
    }

    /// Derive the file type from a path's extension.
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        path.as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .and_then(|e| e.parse().ok())
    }

    /// Raster image formats handled by OCR.
    pub fn is_image(&self) -> bool {
        matches!(
            self,
            FileType::Jpg | FileType::Jpeg | FileType::Png | FileType::Tiff | FileType::Bmp
        )
    }

    /// Word processing formats.
    pub fn is_word(&self) -> bool {
        matches!(self, FileType::Docx | FileType::Doc)
    }
}

/// How the text of a document was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMethod {
    /// Text read directly from the file's own text layer or markup.
    Native,
    /// Text recognized from rendered pixels.
    Ocr,
    /// Plain text decoded with the single-byte fallback encoding.
    DecodedFallback,
}

/// Extracted text with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedContent {
    /// Flat text, newline-separated segments.
    pub text: String,

    /// File type the extractor treated the input as.
    pub file_type: FileType,

    /// Extraction path that produced the text.
    pub method: ExtractionMethod,

    /// Page count (for PDFs).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_count: Option<usize>,
}

impl ExtractedContent {
    /// Create new extracted content.
    pub fn new(text: String, file_type: FileType, method: ExtractionMethod) -> Self {
        Self {
            text,
            file_type,
            method,
            page_count: None,
        }
    }

    /// Add page count information.
    pub fn with_page_count(mut self, pages: usize) -> Self {
        self.page_count = Some(pages);
        self
    }

    /// Check if extraction produced meaningful content.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Get content length in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }
}
