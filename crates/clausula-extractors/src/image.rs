//! Image text extraction via OCR.
//!
//! Scanned contracts and photographed pages arrive as raster images. The
//! content is sniffed before Tesseract runs so a file whose bytes do not
//! match any supported raster format is rejected up front.

use std::io::Read;
use std::path::Path;

use crate::error::{ExtractError, ExtractResult};
use crate::ocr::OcrEngine;
use crate::types::{ExtractedContent, ExtractionMethod, FileType};
use crate::Extractor;

/// Image extractor running OCR with the configured language model.
#[derive(Debug, Clone, Default)]
pub struct ImageExtractor {
    engine: OcrEngine,
}

impl ImageExtractor {
    /// Create image extractor with default OCR settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create image extractor with a specific engine.
    pub fn with_engine(engine: OcrEngine) -> Self {
        Self { engine }
    }

    /// Detect image format from leading bytes.
    ///
    /// The result labels the extracted content, so a file without an
    /// extension or with the wrong one is still reported by what it holds.
    pub(crate) fn detect_format(content: &[u8]) -> ExtractResult<FileType> {
        if content.len() < 8 {
            return Err(ExtractError::ExtractionFailed(
                "Image content too short".to_string(),
            ));
        }

        if content.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
            Ok(FileType::Png)
        } else if content.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Ok(FileType::Jpeg)
        } else if content.starts_with(b"II*\0") || content.starts_with(b"MM\0*") {
            Ok(FileType::Tiff)
        } else if content.starts_with(b"BM") {
            Ok(FileType::Bmp)
        } else {
            Err(ExtractError::ExtractionFailed(
                "Unknown image format".to_string(),
            ))
        }
    }

    fn read_header(path: &Path) -> ExtractResult<Vec<u8>> {
        let mut header = Vec::with_capacity(16);
        std::fs::File::open(path)?
            .take(16)
            .read_to_end(&mut header)?;
        Ok(header)
    }
}

impl Extractor for ImageExtractor {
    fn extract(&self, path: &Path) -> ExtractResult<ExtractedContent> {
        let header = Self::read_header(path)?;
        let format = Self::detect_format(&header)?;
        tracing::debug!(path = %path.display(), %format, "Running OCR on image");

        let text = self.engine.recognize(path)?;
        if text.trim().is_empty() {
            return Err(ExtractError::EmptyContent);
        }

        Ok(ExtractedContent::new(text, format, ExtractionMethod::Ocr))
    }

    fn supported_types(&self) -> &[FileType] {
        &[
            FileType::Jpg,
            FileType::Jpeg,
            FileType::Png,
            FileType::Tiff,
            FileType::Bmp,
        ]
    }

    fn name(&self) -> &str {
        "tesseract"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_format_detection_png() {
        let png = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        assert_eq!(ImageExtractor::detect_format(&png).unwrap(), FileType::Png);
    }

    #[test]
    fn test_format_detection_jpeg() {
        let jpeg = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46];
        assert_eq!(ImageExtractor::detect_format(&jpeg).unwrap(), FileType::Jpeg);
    }

    #[test]
    fn test_format_detection_tiff() {
        let little = b"II*\0\x08\0\0\0";
        let big = b"MM\0*\0\0\0\x08";
        assert_eq!(ImageExtractor::detect_format(little).unwrap(), FileType::Tiff);
        assert_eq!(ImageExtractor::detect_format(big).unwrap(), FileType::Tiff);
    }

    #[test]
    fn test_format_detection_bmp() {
        let bmp = b"BM\x3a\0\0\0\0\0\0\0";
        assert_eq!(ImageExtractor::detect_format(bmp).unwrap(), FileType::Bmp);
    }

    #[test]
    fn test_format_detection_unknown() {
        let unknown = b"Contrato de locacao";
        assert!(ImageExtractor::detect_format(unknown).is_err());
    }

    #[test]
    fn test_format_detection_too_short() {
        let short = vec![0x89, 0x50];
        assert!(ImageExtractor::detect_format(&short).is_err());
    }

    #[test]
    fn test_mismatched_content_rejected_before_ocr() {
        let mut file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        file.write_all(b"this is plain text, not a png").unwrap();

        let result = ImageExtractor::new().extract(file.path());
        assert!(matches!(result, Err(ExtractError::ExtractionFailed(_))));
    }

    #[test]
    fn test_format_ignores_file_name() {
        let mut file = tempfile::Builder::new().suffix("").tempfile().unwrap();
        file.write_all(&[0xFF, 0xD8, 0xFF, 0xE1, 0x00, 0x18, 0x45, 0x78, 0x69, 0x66])
            .unwrap();
        assert_eq!(FileType::from_path(file.path()), None);

        let header = ImageExtractor::read_header(file.path()).unwrap();
        assert_eq!(ImageExtractor::detect_format(&header).unwrap(), FileType::Jpeg);
    }

    #[test]
    fn test_extractor_supports() {
        let extractor = ImageExtractor::new();
        assert!(extractor.supports(FileType::Png));
        assert!(extractor.supports(FileType::Jpg));
        assert!(extractor.supports(FileType::Tiff));
        assert!(extractor.supports(FileType::Bmp));
        assert!(!extractor.supports(FileType::Pdf));
        assert_eq!(extractor.name(), "tesseract");
    }
}
