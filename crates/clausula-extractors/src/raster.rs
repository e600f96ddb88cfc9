//! Rendering PDF pages to PNG files for OCR.
//!
//! Pages are rendered by `pdftoppm` into a private temporary directory.
//! The directory is owned by [`RasterizedPages`] and removed when it is
//! dropped, including while unwinding.

use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

use crate::error::{ExtractError, ExtractResult};
use crate::ocr::OcrConfig;

const PAGE_PREFIX: &str = "page";

/// Rendered page images, ordered by page number.
#[derive(Debug)]
pub struct RasterizedPages {
    dir: TempDir,
    pages: Vec<PathBuf>,
}

impl RasterizedPages {
    /// Page image paths in page order.
    pub fn pages(&self) -> &[PathBuf] {
        &self.pages
    }

    /// Directory holding the rendered images.
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// Renders every page of a PDF to a PNG image.
#[derive(Debug, Clone)]
pub struct PageRasterizer {
    command: String,
    dpi: u32,
}

impl Default for PageRasterizer {
    fn default() -> Self {
        Self::from_config(&OcrConfig::default())
    }
}

impl PageRasterizer {
    /// Create a rasterizer from OCR settings.
    pub fn from_config(config: &OcrConfig) -> Self {
        Self {
            command: config.pdftoppm_command.clone(),
            dpi: config.dpi,
        }
    }

    /// Render all pages of `pdf` into a fresh temporary directory.
    pub fn rasterize(&self, pdf: &Path) -> ExtractResult<RasterizedPages> {
        let dir = tempfile::Builder::new().prefix("clausula-ocr-").tempdir()?;

        // pdftoppm -png -r 300 input.pdf <dir>/page
        let output = Command::new(&self.command)
            .arg("-png")
            .arg("-r")
            .arg(self.dpi.to_string())
            .arg(pdf)
            .arg(dir.path().join(PAGE_PREFIX))
            .output()
            .map_err(|e| ExtractError::Rasterize(format!("failed to run {}: {}", self.command, e)))?;

        if !output.status.success() {
            return Err(ExtractError::Rasterize(format!(
                "{} exited with {}: {}",
                self.command,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let pages = Self::collect_pages(dir.path())?;
        tracing::debug!(pages = pages.len(), dir = %dir.path().display(), "Rasterized PDF");

        Ok(RasterizedPages { dir, pages })
    }

    /// Find `page-N.png` files and sort them numerically.
    fn collect_pages(dir: &Path) -> ExtractResult<Vec<PathBuf>> {
        let mut numbered = Vec::new();

        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("png") {
                continue;
            }
            if let Some(number) = Self::page_number(&path) {
                numbered.push((number, path));
            }
        }

        // pdftoppm zero-pads by page count (page-01, page-10), so sort on the number
        numbered.sort_by_key(|(number, _)| *number);
        Ok(numbered.into_iter().map(|(_, path)| path).collect())
    }

    fn page_number(path: &Path) -> Option<usize> {
        let stem = path.file_stem()?.to_str()?;
        let (_, number) = stem.rsplit_once('-')?;
        number.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_number_parsing() {
        assert_eq!(PageRasterizer::page_number(Path::new("/t/page-1.png")), Some(1));
        assert_eq!(PageRasterizer::page_number(Path::new("/t/page-012.png")), Some(12));
        assert_eq!(PageRasterizer::page_number(Path::new("/t/cover.png")), None);
    }

    #[test]
    fn test_collect_pages_sorted_numerically() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["page-10.png", "page-2.png", "page-1.png", "notes.txt"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }

        let pages = PageRasterizer::collect_pages(dir.path()).unwrap();
        let names: Vec<_> = pages
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["page-1.png", "page-2.png", "page-10.png"]);
    }

    #[test]
    fn test_missing_command_is_error() {
        let config = OcrConfig::default().with_pdftoppm_command("clausula-no-such-binary");
        let rasterizer = PageRasterizer::from_config(&config);
        let result = rasterizer.rasterize(Path::new("/nonexistent.pdf"));
        assert!(matches!(result, Err(ExtractError::Rasterize(_))));
    }

    #[test]
    fn test_temp_dir_removed_on_drop() {
        let dir = tempfile::Builder::new().prefix("clausula-ocr-").tempdir().unwrap();
        let path = dir.path().to_path_buf();
        let pages = RasterizedPages { dir, pages: Vec::new() };
        assert!(path.exists());
        assert!(pages.is_empty());
        drop(pages);
        assert!(!path.exists());
    }
}
