//! clausula-extractors - Text extraction for contract documents.
//!
//! Converts a file on disk into plain text. Each supported format has its
//! own extractor behind the [`Extractor`] trait, and [`ExtractionPipeline`]
//! routes a file to the right one by its declared type.
//!
//! # Features
//!
//! - `pdf` (default) - PDF text layer via pdf-extract, OCR fallback for scans
//! - `docx` (default) - DOCX paragraphs via docx-rs
//! - `ocr` (default) - Image OCR via tesseract (requires tesseract installed;
//!   the PDF fallback also needs `pdftoppm` from poppler)
//! - `full` - All extraction features
//!
//! # Example
//!
//! ```ignore
//! use clausula_extractors::{ExtractionPipeline, FileType};
//!
//! let pipeline = ExtractionPipeline::with_defaults();
//!
//! // Typed path: errors are reported
//! let content = pipeline.extract(Path::new("contrato.pdf"), FileType::Pdf)?;
//!
//! // Total path: any failure yields ""
//! let text = pipeline.extract_text("contrato.pdf", "pdf");
//! ```

mod error;
mod factory;
mod image;
mod ocr;
mod pipeline;
mod raster;
mod text;
mod types;

#[cfg(feature = "pdf")]
mod pdf;

#[cfg(feature = "docx")]
mod docx;

pub use error::{ExtractError, ExtractResult};
pub use factory::ExtractorFactory;
pub use image::ImageExtractor;
pub use ocr::{OcrConfig, OcrEngine};
pub use pipeline::ExtractionPipeline;
pub use raster::{PageRasterizer, RasterizedPages};
pub use text::PlainTextExtractor;
pub use types::{ExtractedContent, ExtractionMethod, FileType};

#[cfg(feature = "pdf")]
pub use pdf::PdfExtractor;

#[cfg(feature = "docx")]
pub use docx::DocxExtractor;

use std::path::Path;

/// Core Extractor trait - all text extractors implement this.
///
/// Extraction is synchronous; callers that must not block offload it
/// themselves (the processing queue runs it under `spawn_blocking`).
pub trait Extractor: Send + Sync {
    /// Extract text content from the file at `path`.
    fn extract(&self, path: &Path) -> ExtractResult<ExtractedContent>;

    /// File types handled by this extractor.
    fn supported_types(&self) -> &[FileType];

    /// Check if this extractor handles the given file type.
    fn supports(&self, file_type: FileType) -> bool {
        self.supported_types().contains(&file_type)
    }

    /// Human-readable name for this extractor.
    fn name(&self) -> &str;
}
