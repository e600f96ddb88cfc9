//! Factory for creating extractors.

use std::sync::Arc;

use crate::error::{ExtractError, ExtractResult};
use crate::image::ImageExtractor;
use crate::ocr::{OcrConfig, OcrEngine};
use crate::text::PlainTextExtractor;
use crate::types::FileType;
use crate::Extractor;

#[cfg(feature = "pdf")]
use crate::PdfExtractor;

#[cfg(feature = "docx")]
use crate::DocxExtractor;

/// Factory for creating text extractors.
pub struct ExtractorFactory;

impl ExtractorFactory {
    /// Create a PDF extractor with default OCR fallback settings.
    #[cfg(feature = "pdf")]
    pub fn pdf() -> Arc<dyn Extractor> {
        Arc::new(PdfExtractor::new())
    }

    /// Create a PDF extractor with custom OCR fallback settings.
    #[cfg(feature = "pdf")]
    pub fn pdf_with_ocr(config: OcrConfig) -> Arc<dyn Extractor> {
        Arc::new(PdfExtractor::with_ocr_config(config))
    }

    /// Create a DOCX extractor.
    #[cfg(feature = "docx")]
    pub fn docx() -> Arc<dyn Extractor> {
        Arc::new(DocxExtractor::new())
    }

    /// Create an image (OCR) extractor.
    pub fn image() -> Arc<dyn Extractor> {
        Arc::new(ImageExtractor::new())
    }

    /// Create an image extractor with custom OCR settings.
    pub fn image_with_ocr(config: OcrConfig) -> Arc<dyn Extractor> {
        Arc::new(ImageExtractor::with_engine(OcrEngine::new(config)))
    }

    /// Create a plain text extractor.
    pub fn text() -> Arc<dyn Extractor> {
        Arc::new(PlainTextExtractor::new())
    }

    /// Create extractor for a given file type.
    pub fn for_file_type(file_type: FileType) -> ExtractResult<Arc<dyn Extractor>> {
        match file_type {
            #[cfg(feature = "pdf")]
            FileType::Pdf => Ok(Self::pdf()),

            #[cfg(feature = "docx")]
            FileType::Docx | FileType::Doc => Ok(Self::docx()),

            FileType::Jpg | FileType::Jpeg | FileType::Png | FileType::Tiff | FileType::Bmp => {
                Ok(Self::image())
            }

            FileType::Txt => Ok(Self::text()),

            #[allow(unreachable_patterns)]
            other => Err(ExtractError::UnsupportedType(other.to_string())),
        }
    }

    /// Get all available extractors with default OCR settings.
    pub fn all() -> Vec<Arc<dyn Extractor>> {
        Self::all_with_ocr(OcrConfig::default())
    }

    /// Get all available extractors sharing one set of OCR settings.
    #[allow(clippy::vec_init_then_push)]
    pub fn all_with_ocr(config: OcrConfig) -> Vec<Arc<dyn Extractor>> {
        let mut extractors: Vec<Arc<dyn Extractor>> = Vec::new();

        #[cfg(feature = "pdf")]
        extractors.push(Self::pdf_with_ocr(config.clone()));

        #[cfg(feature = "docx")]
        extractors.push(Self::docx());

        extractors.push(Self::image_with_ocr(config));
        extractors.push(Self::text());

        extractors
    }
}
