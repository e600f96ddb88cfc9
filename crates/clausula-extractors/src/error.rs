//! Why a contract file yielded no text.
//!
//! Every variant ends the same way at [`crate::ExtractionPipeline::extract_text`]:
//! it is logged and the document continues with empty text. The variants
//! only decide the log level and message.

use thiserror::Error;

/// Failure reading text out of an uploaded contract file.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Declared type is outside the upload allow-list, or no extractor is
    /// registered for it.
    #[error("Unsupported file type '{0}' (accepted: pdf, docx, doc, jpg, jpeg, png, tiff, bmp, txt)")]
    UnsupportedType(String),

    /// File bytes do not match the declared type.
    #[error("Cannot read file: {0}")]
    ExtractionFailed(String),

    /// File was read but holds no text; a scan OCR could not read counts too.
    #[error("No text found in file")]
    EmptyContent,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Corrupt PDF structure, including parser panics.
    #[cfg(feature = "pdf")]
    #[error("Unreadable PDF: {0}")]
    Pdf(String),

    /// Not a valid Word package.
    #[cfg(feature = "docx")]
    #[error("Unreadable Word document: {0}")]
    Docx(String),

    /// Tesseract failed, or OCR support was not compiled in.
    #[error("OCR error: {0}")]
    Ocr(String),

    /// `pdftoppm` is missing or failed to render pages.
    #[error("Page rendering error: {0}")]
    Rasterize(String),
}

impl ExtractError {
    /// Whether the file itself was fine and simply has nothing to read.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::EmptyContent)
    }
}

/// Result type for extraction operations.
pub type ExtractResult<T> = Result<T, ExtractError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_type_lists_allowed_types() {
        let err = ExtractError::UnsupportedType("xlsx".to_string());
        let message = err.to_string();
        assert!(message.contains("'xlsx'"));
        assert!(message.contains("docx"));
        assert!(!err.is_empty());
    }

    #[test]
    fn test_empty_content() {
        assert!(ExtractError::EmptyContent.is_empty());
        let io = ExtractError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert!(!io.is_empty());
    }
}
