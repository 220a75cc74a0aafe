//! PDF text extractor backed by `lopdf`.

use super::{Extraction, FormatExtractor, SoftFailure, join_lines, length_confidence};
use crate::Result;
use crate::error::DocReaderError;
use crate::types::ExtractionResult;
use lopdf::Document;

/// Extracts the embedded text layer of a PDF.
///
/// Pages are read in page-number order and each page's text is followed by a newline.
/// Scanned PDFs without a text layer yield an empty string; they are not rasterized for
/// OCR. Confidence is [`length_confidence`] of the trimmed text.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfExtractor;

impl PdfExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FormatExtractor for PdfExtractor {
    fn name(&self) -> &'static str {
        "pdf"
    }

    fn extract(&self, content: &[u8]) -> Result<Extraction> {
        Ok(extract_pdf_text(content)
            .map(|text| {
                let confidence = length_confidence(&text);
                ExtractionResult::new(text, confidence)
            })
            .map_err(|e| SoftFailure::new(self.name(), e)))
    }
}

/// Extract the text of every page, in order.
///
/// # Errors
///
/// [`DocReaderError::Parsing`] when the document cannot be loaded or a page's content
/// stream cannot be decoded.
pub fn extract_pdf_text(content: &[u8]) -> Result<String> {
    let document = Document::load_mem(content)
        .map_err(|e| DocReaderError::parsing_with_source("Failed to load PDF", e))?;

    let pages = document.get_pages();
    tracing::debug!(page_count = pages.len(), "Loaded PDF");

    let mut page_texts = Vec::with_capacity(pages.len());
    for page_number in pages.keys() {
        let text = document.extract_text(&[*page_number]).map_err(|e| {
            DocReaderError::parsing_with_source(format!("Failed to extract text from page {}", page_number), e)
        })?;
        page_texts.push(text);
    }

    Ok(join_lines(page_texts))
}
