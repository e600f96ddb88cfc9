//! Pipeline input and output.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::types::{ContractType, StructuredData};

/// A stored upload waiting to be processed.
///
/// The declared type is kept as the caller's raw string; an unsupported
/// value is not an error here and simply yields empty text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDocument {
    pub file_path: PathBuf,
    pub declared_file_type: String,
}

impl RawDocument {
    pub fn new(file_path: impl Into<PathBuf>, declared_file_type: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            declared_file_type: declared_file_type.into(),
        }
    }

    /// Build a document whose declared type is taken from the file extension
    /// (lower-cased; empty when the path has no extension).
    pub fn from_path(file_path: impl Into<PathBuf>) -> Self {
        let file_path = file_path.into();
        let declared_file_type = file_path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();
        Self {
            file_path,
            declared_file_type,
        }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }
}

/// Result of one pipeline pass: `(text, contract_type, structured_data)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedDocument {
    pub text: String,
    pub contract_type: ContractType,
    pub structured_data: StructuredData,
}

impl ProcessedDocument {
    /// The outcome for a document with no extractable text.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether any text was extracted.
    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }

    pub fn into_parts(self) -> (String, ContractType, StructuredData) {
        (self.text, self.contract_type, self.structured_data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_document_from_path() {
        let doc = RawDocument::from_path("/uploads/abc_Contrato.PDF");
        assert_eq!(doc.declared_file_type, "pdf");

        let doc = RawDocument::from_path("/uploads/sem_extensao");
        assert_eq!(doc.declared_file_type, "");
    }

    #[test]
    fn test_empty_processed_document() {
        let (text, contract_type, data) = ProcessedDocument::empty().into_parts();
        assert_eq!(text, "");
        assert_eq!(contract_type, ContractType::Unknown);
        assert!(data.is_empty());
    }
}
