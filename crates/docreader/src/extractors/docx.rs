//! DOCX extractor backed by `docx-lite`.

use super::{Extraction, FormatExtractor, SoftFailure, join_lines, length_confidence};
use crate::Result;
use crate::error::DocReaderError;
use crate::types::ExtractionResult;
use std::io::Cursor;

/// Extracts body paragraphs from Word documents.
///
/// Each paragraph's text is followed by a newline. Tables, headers and footers are not
/// part of the paragraph stream and are skipped.
#[derive(Debug, Default, Clone, Copy)]
pub struct DocxExtractor;

impl DocxExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FormatExtractor for DocxExtractor {
    fn name(&self) -> &'static str {
        "docx"
    }

    fn extract(&self, content: &[u8]) -> Result<Extraction> {
        Ok(extract_docx_text(content)
            .map(|text| {
                let confidence = length_confidence(&text);
                ExtractionResult::new(text, confidence)
            })
            .map_err(|e| SoftFailure::new(self.name(), e)))
    }
}

/// Extract paragraph text in document order.
///
/// # Errors
///
/// [`DocReaderError::Parsing`] when the bytes are not a readable DOCX package.
pub fn extract_docx_text(content: &[u8]) -> Result<String> {
    let document = docx_lite::parse_document(Cursor::new(content))
        .map_err(|e| DocReaderError::parsing(format!("DOCX parsing failed: {}", e)))?;

    tracing::debug!(paragraphs = document.paragraphs.len(), "Parsed DOCX");

    Ok(join_lines(document.paragraphs.iter().map(|p| p.to_text())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
</Types>"#;

    const RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>"#;

    fn build_docx(paragraphs: &[&str]) -> Vec<u8> {
        let body: String = paragraphs
            .iter()
            .map(|p| format!("<w:p><w:r><w:t xml:space=\"preserve\">{}</w:t></w:r></w:p>", p))
            .collect();
        let document = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
            body
        );

        let mut buffer = Cursor::new(Vec::new());
        {
            let mut zip = zip::ZipWriter::new(&mut buffer);
            let options = SimpleFileOptions::default();
            zip.start_file("[Content_Types].xml", options).unwrap();
            zip.write_all(CONTENT_TYPES.as_bytes()).unwrap();
            zip.start_file("_rels/.rels", options).unwrap();
            zip.write_all(RELS.as_bytes()).unwrap();
            zip.start_file("word/document.xml", options).unwrap();
            zip.write_all(document.as_bytes()).unwrap();
            zip.finish().unwrap();
        }
        buffer.into_inner()
    }

    #[test]
    fn test_paragraphs_in_order() {
        let docx = build_docx(&["Introduction", "Body text", "Conclusion"]);
        let result = DocxExtractor::new().extract(&docx).unwrap().unwrap();
        assert_eq!(result.text, "Introduction\nBody text\nConclusion");
        assert!((result.confidence - 0.033).abs() < 1e-9);
    }

    #[test]
    fn test_empty_document() {
        let docx = build_docx(&[]);
        let result = DocxExtractor::new().extract(&docx).unwrap().unwrap();
        assert_eq!(result.text, "");
        assert_eq!(result.confidence, 0.0);
    }

    #[test]
    fn test_not_a_zip_is_soft_failure() {
        let outcome = DocxExtractor::new().extract(b"plain text pretending to be docx").unwrap();
        let failure = outcome.unwrap_err();
        assert_eq!(failure.extractor, "docx");
    }
}
