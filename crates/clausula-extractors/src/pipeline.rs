//! Extraction pipeline routing files to the right extractor.

use std::path::Path;
use std::sync::Arc;

use crate::error::{ExtractError, ExtractResult};
use crate::ocr::OcrConfig;
use crate::types::{ExtractedContent, FileType};
use crate::Extractor;

/// Pipeline for extracting text using registered extractors.
///
/// Routes each file to the first extractor supporting its declared type.
/// [`ExtractionPipeline::extract_text`] is total: every failure is logged
/// and collapses to an empty string.
#[derive(Clone)]
pub struct ExtractionPipeline {
    extractors: Vec<Arc<dyn Extractor>>,
}

impl ExtractionPipeline {
    /// Create new empty pipeline.
    pub fn new() -> Self {
        Self {
            extractors: Vec::new(),
        }
    }

    /// Create pipeline with all available extractors.
    pub fn with_defaults() -> Self {
        Self {
            extractors: crate::ExtractorFactory::all(),
        }
    }

    /// Create pipeline with all available extractors using the given OCR settings.
    pub fn with_ocr_config(config: OcrConfig) -> Self {
        Self {
            extractors: crate::ExtractorFactory::all_with_ocr(config),
        }
    }

    /// Add an extractor to the pipeline.
    pub fn add_extractor(mut self, extractor: Arc<dyn Extractor>) -> Self {
        self.extractors.push(extractor);
        self
    }

    /// Extract text using the extractor registered for `file_type`.
    pub fn extract(&self, path: &Path, file_type: FileType) -> ExtractResult<ExtractedContent> {
        for extractor in &self.extractors {
            if extractor.supports(file_type) {
                tracing::debug!(
                    path = %path.display(),
                    %file_type,
                    extractor = extractor.name(),
                    "Extracting text"
                );
                return extractor.extract(path);
            }
        }

        Err(ExtractError::UnsupportedType(file_type.to_string()))
    }

    /// Extract text for a declared file type string, never failing.
    ///
    /// Unsupported types, unreadable or corrupt files and OCR failures all
    /// yield an empty string.
    pub fn extract_text(&self, path: impl AsRef<Path>, file_type: &str) -> String {
        let path = path.as_ref();

        let result = file_type
            .trim()
            .parse::<FileType>()
            .map_err(|_| ExtractError::UnsupportedType(file_type.to_string()))
            .and_then(|file_type| self.extract(path, file_type));

        match result {
            Ok(content) => content.text,
            Err(e) if e.is_empty() => {
                tracing::debug!(path = %path.display(), "No text extracted");
                String::new()
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), file_type, error = %e, "Error extracting text");
                String::new()
            }
        }
    }

    /// Check if pipeline can handle a given file type.
    pub fn supports(&self, file_type: FileType) -> bool {
        self.extractors.iter().any(|e| e.supports(file_type))
    }

    /// List all supported file types.
    pub fn supported_types(&self) -> Vec<FileType> {
        self.extractors
            .iter()
            .flat_map(|e| e.supported_types().iter().copied())
            .collect()
    }

    /// Get the number of registered extractors.
    pub fn len(&self) -> usize {
        self.extractors.len()
    }

    /// Check if the pipeline has no registered extractors.
    pub fn is_empty(&self) -> bool {
        self.extractors.is_empty()
    }
}

impl Default for ExtractionPipeline {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl std::fmt::Debug for ExtractionPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.extractors.iter().map(|e| e.name()).collect();
        f.debug_struct("ExtractionPipeline")
            .field("extractors", &names)
            .finish()
    }
}
