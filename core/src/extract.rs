//! Text extraction collaborators. An extractor turns one document file into an
//! ordered list of raw text blocks (one per page for PDFs).

use crate::error::CollectionError;
use std::fs;
use std::path::Path;

pub trait TextExtractor {
    /// Substring a file name must contain for the extractor to accept it.
    fn marker(&self) -> &str;

    fn extract(&self, path: &Path) -> Result<Vec<String>, CollectionError>;

    fn accepts(&self, file_name: &str) -> bool {
        file_name.contains(self.marker())
    }
}

pub struct PdfExtractor {
    marker: String,
}

impl PdfExtractor {
    pub fn new() -> Self {
        Self { marker: ".pdf".to_string() }
    }

    pub fn with_marker(marker: impl Into<String>) -> Self {
        Self { marker: marker.into() }
    }
}

impl Default for PdfExtractor {
    fn default() -> Self { Self::new() }
}

impl TextExtractor for PdfExtractor {
    fn marker(&self) -> &str { &self.marker }

    fn extract(&self, path: &Path) -> Result<Vec<String>, CollectionError> {
        pdf_extract::extract_text_by_pages(path).map_err(|e| CollectionError::Extraction {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

/// Reads the whole file as a single UTF-8 block.
pub struct PlainTextExtractor {
    marker: String,
}

impl PlainTextExtractor {
    pub fn new(marker: impl Into<String>) -> Self {
        Self { marker: marker.into() }
    }
}

impl Default for PlainTextExtractor {
    fn default() -> Self { Self::new(".txt") }
}

impl TextExtractor for PlainTextExtractor {
    fn marker(&self) -> &str { &self.marker }

    fn extract(&self, path: &Path) -> Result<Vec<String>, CollectionError> {
        Ok(vec![fs::read_to_string(path)?])
    }
}
