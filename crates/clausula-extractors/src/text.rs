//! Plain text files.
//!
//! Files are decoded as UTF-8 first. Legacy exports from Windows tools are
//! often ISO-8859-1, so on a UTF-8 failure the bytes are decoded as Latin-1,
//! which maps every byte to a character and cannot fail.

use std::path::Path;

use crate::error::{ExtractError, ExtractResult};
use crate::types::{ExtractedContent, ExtractionMethod, FileType};
use crate::Extractor;

/// Plain text extractor with a Latin-1 fallback.
#[derive(Debug, Clone, Default)]
pub struct PlainTextExtractor;

impl PlainTextExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Decode bytes, reporting which encoding succeeded.
    pub(crate) fn decode(bytes: Vec<u8>) -> (String, ExtractionMethod) {
        match String::from_utf8(bytes) {
            Ok(text) => (text, ExtractionMethod::Native),
            Err(e) => {
                let bytes = e.into_bytes();
                let text = bytes.iter().map(|&b| char::from(b)).collect();
                (text, ExtractionMethod::DecodedFallback)
            }
        }
    }
}

impl Extractor for PlainTextExtractor {
    fn extract(&self, path: &Path) -> ExtractResult<ExtractedContent> {
        let bytes = std::fs::read(path)?;
        let (text, method) = Self::decode(bytes);

        if method == ExtractionMethod::DecodedFallback {
            tracing::debug!(path = %path.display(), "File is not UTF-8, decoded as Latin-1");
        }
        if text.trim().is_empty() {
            return Err(ExtractError::EmptyContent);
        }

        Ok(ExtractedContent::new(text, FileType::Txt, method))
    }

    fn supported_types(&self) -> &[FileType] {
        &[FileType::Txt]
    }

    fn name(&self) -> &str {
        "plain-text"
    }
}
