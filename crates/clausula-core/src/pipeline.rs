//! Document processing: extract text, classify, pull structured fields.

use std::path::Path;

use clausula_extractors::ExtractionPipeline;

use crate::classify::Classifier;
use crate::config::ClausulaConfig;
use crate::error::ClausulaResult;
use crate::fields::FieldExtractor;
use crate::types::{ProcessedDocument, RawDocument};

/// Runs one document through extraction, classification and field
/// extraction.
///
/// Processing is synchronous and never fails: an unreadable or unsupported
/// file produces `("", unknown, {})`. The processor holds no mutable state
/// and can be shared across threads behind an `Arc`.
#[derive(Debug, Clone)]
pub struct DocumentProcessor {
    extraction: ExtractionPipeline,
    classifier: Classifier,
    fields: FieldExtractor,
}

impl DocumentProcessor {
    pub fn new(
        extraction: ExtractionPipeline,
        classifier: Classifier,
        fields: FieldExtractor,
    ) -> Self {
        Self {
            extraction,
            classifier,
            fields,
        }
    }

    /// Build a processor from configuration.
    pub fn from_config(config: &ClausulaConfig) -> ClausulaResult<Self> {
        Ok(Self {
            extraction: ExtractionPipeline::with_ocr_config(config.ocr.clone()),
            classifier: Classifier::new(config.classifier.table()?),
            fields: FieldExtractor::new(config.fields.rule_book()?),
        })
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn field_extractor(&self) -> &FieldExtractor {
        &self.fields
    }

    pub fn extraction(&self) -> &ExtractionPipeline {
        &self.extraction
    }

    /// Process the file at `file_path`, read as the declared `file_type`.
    pub fn process(&self, file_path: impl AsRef<Path>, file_type: &str) -> ProcessedDocument {
        let file_path = file_path.as_ref();
        let text = self.extraction.extract_text(file_path, file_type);
        if text.trim().is_empty() {
            tracing::info!(
                path = %file_path.display(),
                file_type,
                "No text extracted"
            );
            return ProcessedDocument::empty();
        }

        let processed = self.process_text(text);
        tracing::info!(
            path = %file_path.display(),
            file_type,
            contract_type = %processed.contract_type,
            fields = processed.structured_data.len(),
            "Processed document"
        );
        processed
    }

    pub fn process_document(&self, document: &RawDocument) -> ProcessedDocument {
        self.process(&document.file_path, &document.declared_file_type)
    }

    /// Classify and extract fields from text that is already in hand.
    pub fn process_text(&self, text: String) -> ProcessedDocument {
        if text.trim().is_empty() {
            return ProcessedDocument::empty();
        }
        let contract_type = self.classifier.classify(&text);
        let structured_data = self.fields.extract_fields(&text, contract_type);
        ProcessedDocument {
            text,
            contract_type,
            structured_data,
        }
    }
}

impl Default for DocumentProcessor {
    fn default() -> Self {
        Self {
            extraction: ExtractionPipeline::with_defaults(),
            classifier: Classifier::default(),
            fields: FieldExtractor::default(),
        }
    }
}
