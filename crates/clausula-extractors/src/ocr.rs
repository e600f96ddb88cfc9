//! OCR engine wrapping Tesseract.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ExtractError, ExtractResult};

/// Configuration for OCR and page rasterization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Tesseract language model (default: `por`).
    pub language: String,
    /// Resolution used when rendering PDF pages for OCR (default: 300).
    pub dpi: u32,
    /// Command used to render PDF pages to PNG (default: `pdftoppm`).
    pub pdftoppm_command: String,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            language: "por".to_string(),
            dpi: 300,
            pdftoppm_command: "pdftoppm".to_string(),
        }
    }
}

impl OcrConfig {
    /// Use a different Tesseract language model.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Set rasterization resolution (minimum 72).
    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi.max(72);
        self
    }

    /// Set the page rendering command.
    pub fn with_pdftoppm_command(mut self, command: impl Into<String>) -> Self {
        self.pdftoppm_command = command.into();
        self
    }
}

/// Runs Tesseract over image files on disk.
#[derive(Debug, Clone, Default)]
pub struct OcrEngine {
    config: OcrConfig,
}

impl OcrEngine {
    /// Create an engine with the given configuration.
    pub fn new(config: OcrConfig) -> Self {
        Self { config }
    }

    /// Get the engine configuration.
    pub fn config(&self) -> &OcrConfig {
        &self.config
    }

    /// Recognize the text of a single image file.
    #[cfg(feature = "ocr")]
    pub fn recognize(&self, path: &Path) -> ExtractResult<String> {
        use rusty_tesseract::{Args, Image};

        let image = Image::from_path(path.to_path_buf())
            .map_err(|e| ExtractError::Ocr(format!("Failed to load image: {}", e)))?;

        let args = Args {
            lang: self.config.language.clone(),
            dpi: Some(self.config.dpi as i32),
            ..Args::default()
        };

        rusty_tesseract::image_to_string(&image, &args)
            .map_err(|e| ExtractError::Ocr(e.to_string()))
    }

    #[cfg(not(feature = "ocr"))]
    pub fn recognize(&self, _path: &Path) -> ExtractResult<String> {
        Err(ExtractError::Ocr("OCR support not compiled in".to_string()))
    }
}
