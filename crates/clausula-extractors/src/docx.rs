//! DOCX text extraction using docx-rs.
//!
//! Only body paragraphs are read, in document order, one per line.
//! Tables, headers and footers are skipped.

use std::path::Path;

use docx_rs::{DocumentChild, ParagraphChild, RunChild};

use crate::error::{ExtractError, ExtractResult};
use crate::types::{ExtractedContent, ExtractionMethod, FileType};
use crate::Extractor;

/// DOCX text extractor.
#[derive(Debug, Clone, Default)]
pub struct DocxExtractor;

impl DocxExtractor {
    /// Create new DOCX extractor.
    pub fn new() -> Self {
        Self
    }

    /// Collect paragraph texts from a DOCX archive.
    fn paragraphs(content: &[u8]) -> ExtractResult<Vec<String>> {
        let docx = docx_rs::read_docx(content)
            .map_err(|e| ExtractError::Docx(format!("Failed to parse DOCX: {}", e)))?;

        let paragraphs = docx
            .document
            .children
            .iter()
            .filter_map(|child| match child {
                DocumentChild::Paragraph(p) => Some(Self::paragraph_text(p)),
                _ => None,
            })
            .collect();

        Ok(paragraphs)
    }

    /// Extract text from a paragraph.
    fn paragraph_text(p: &docx_rs::Paragraph) -> String {
        let mut text = String::new();

        for child in &p.children {
            match child {
                ParagraphChild::Run(r) => Self::push_run(&mut text, r),
                ParagraphChild::Hyperlink(h) => {
                    for child in &h.children {
                        if let ParagraphChild::Run(r) = child {
                            Self::push_run(&mut text, r);
                        }
                    }
                }
                _ => {}
            }
        }

        text
    }

    fn push_run(text: &mut String, run: &docx_rs::Run) {
        for run_child in &run.children {
            match run_child {
                RunChild::Text(t) => text.push_str(&t.text),
                RunChild::Tab(_) => text.push('\t'),
                RunChild::Break(_) => text.push('\n'),
                _ => {}
            }
        }
    }
}

impl Extractor for DocxExtractor {
    fn extract(&self, path: &Path) -> ExtractResult<ExtractedContent> {
        let content = std::fs::read(path)?;
        let paragraphs = Self::paragraphs(&content)?;

        let text = paragraphs.join("\n");
        if text.trim().is_empty() {
            return Err(ExtractError::EmptyContent);
        }

        let file_type = FileType::from_path(path)
            .filter(FileType::is_word)
            .unwrap_or(FileType::Docx);
        Ok(ExtractedContent::new(text, file_type, ExtractionMethod::Native))
    }

    fn supported_types(&self) -> &[FileType] {
        &[FileType::Docx, FileType::Doc]
    }

    fn name(&self) -> &str {
        "docx-rs"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rs::{Docx, Paragraph, Run};

    fn build_docx(paragraphs: &[&str]) -> tempfile::NamedTempFile {
        let file = tempfile::Builder::new().suffix(".docx").tempfile().unwrap();
        let mut docx = Docx::new();
        for text in paragraphs {
            docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*text)));
        }
        docx.build().pack(file.reopen().unwrap()).unwrap();
        file
    }

    #[test]
    fn test_docx_extractor_creation() {
        let extractor = DocxExtractor::new();
        assert_eq!(extractor.name(), "docx-rs");
        assert!(extractor.supports(FileType::Docx));
        assert!(extractor.supports(FileType::Doc));
        assert!(!extractor.supports(FileType::Pdf));
    }

    #[test]
    fn test_paragraphs_in_order() {
        let file = build_docx(&["Contrato de Locação", "Aluguel mensal de R$ 1.200,00"]);
        let content = DocxExtractor::new().extract(file.path()).unwrap();
        assert_eq!(
            content.text,
            "Contrato de Locação\nAluguel mensal de R$ 1.200,00"
        );
        assert_eq!(content.file_type, FileType::Docx);
        assert_eq!(content.method, ExtractionMethod::Native);
    }

    #[test]
    fn test_empty_document_is_empty_content() {
        let file = build_docx(&[]);
        let result = DocxExtractor::new().extract(file.path());
        assert!(matches!(result, Err(ExtractError::EmptyContent)));
    }

    #[test]
    fn test_corrupt_docx_is_error() {
        let result = DocxExtractor::paragraphs(b"PK\x03\x04 definitely not a docx");
        assert!(matches!(result, Err(ExtractError::Docx(_))));
    }
}
