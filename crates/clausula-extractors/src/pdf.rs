//! PDF text extraction using pdf-extract, with an OCR fallback.
//!
//! Scanned or photographed contracts have no text layer. When the native
//! pass yields nothing but whitespace, every page is rendered to an image
//! and run through OCR instead.

use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use crate::error::{ExtractError, ExtractResult};
use crate::ocr::{OcrConfig, OcrEngine};
use crate::raster::PageRasterizer;
use crate::types::{ExtractedContent, ExtractionMethod, FileType};
use crate::Extractor;

/// PDF text extractor.
#[derive(Debug, Clone)]
pub struct PdfExtractor {
    rasterizer: PageRasterizer,
    engine: OcrEngine,
    /// Whether to OCR image-only PDFs.
    ocr_fallback: bool,
}

impl PdfExtractor {
    /// Create PDF extractor with default OCR settings and fallback enabled.
    pub fn new() -> Self {
        Self::with_ocr_config(OcrConfig::default())
    }

    /// Create PDF extractor using the given OCR settings for the fallback.
    pub fn with_ocr_config(config: OcrConfig) -> Self {
        Self {
            rasterizer: PageRasterizer::from_config(&config),
            engine: OcrEngine::new(config),
            ocr_fallback: true,
        }
    }

    /// Configure whether image-only PDFs are sent through OCR.
    pub fn with_ocr_fallback(mut self, enabled: bool) -> Self {
        self.ocr_fallback = enabled;
        self
    }

    /// Extract the text layer, one entry per page.
    fn native_pages(content: &[u8]) -> ExtractResult<Vec<String>> {
        // pdf-extract panics on some malformed documents
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem_by_pages(content)
        }));

        match outcome {
            Ok(Ok(pages)) => Ok(pages),
            Ok(Err(e)) => Err(ExtractError::Pdf(format!("Failed to parse PDF: {}", e))),
            Err(_) => Err(ExtractError::Pdf("PDF parser panicked".to_string())),
        }
    }

    /// Concatenate non-blank pages, each followed by a newline.
    fn join_pages(pages: &[String]) -> String {
        let mut text = String::new();
        for page in pages.iter().filter(|p| !p.trim().is_empty()) {
            text.push_str(page);
            text.push('\n');
        }
        text
    }

    /// Render every page and OCR it. A page that fails OCR contributes
    /// an empty line; the remaining pages are still processed.
    fn ocr_pages(&self, path: &Path) -> ExtractResult<(String, usize)> {
        let rendered = self.rasterizer.rasterize(path)?;
        let mut text = String::new();

        for (index, page) in rendered.pages().iter().enumerate() {
            match self.engine.recognize(page) {
                Ok(page_text) => text.push_str(&page_text),
                Err(e) => {
                    tracing::warn!(page = index + 1, error = %e, "OCR failed for PDF page");
                }
            }
            text.push('\n');
        }

        Ok((text, rendered.len()))
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor for PdfExtractor {
    fn extract(&self, path: &Path) -> ExtractResult<ExtractedContent> {
        let content = std::fs::read(path)?;
        let pages = Self::native_pages(&content)?;
        let page_count = pages.len();

        let text = Self::join_pages(&pages);
        if !text.trim().is_empty() {
            return Ok(
                ExtractedContent::new(text, FileType::Pdf, ExtractionMethod::Native)
                    .with_page_count(page_count),
            );
        }

        if !self.ocr_fallback {
            return Err(ExtractError::EmptyContent);
        }

        tracing::info!(path = %path.display(), "No text layer in PDF, using OCR");
        let (text, rendered) = self.ocr_pages(path)?;
        if text.trim().is_empty() {
            return Err(ExtractError::EmptyContent);
        }

        Ok(ExtractedContent::new(text, FileType::Pdf, ExtractionMethod::Ocr).with_page_count(rendered))
    }

    fn supported_types(&self) -> &[FileType] {
        &[FileType::Pdf]
    }

    fn name(&self) -> &str {
        "pdf-extract"
    }
}
