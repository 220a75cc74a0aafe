//! Shared fixtures and engine fakes for integration tests.

#![allow(dead_code)]

use docreader::{Classification, DocReaderError, OcrBackend, OcrOutput, Plugin, Result, TextClassifier};
use image::{DynamicImage, GrayImage, Luma};
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};
use parking_lot::Mutex;
use std::io::{Cursor, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use zip::write::SimpleFileOptions;

/// OCR engine that returns a fixed output, or fails when built with [`FakeOcr::failing`].
pub struct FakeOcr {
    output: Option<OcrOutput>,
    pub calls: AtomicUsize,
}

impl FakeOcr {
    pub fn returning(text: &str, confidences: Vec<i32>) -> Arc<Self> {
        Arc::new(Self {
            output: Some(OcrOutput::new(text, confidences)),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            output: None,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Plugin for FakeOcr {
    fn name(&self) -> &str {
        "fake-ocr"
    }

    fn version(&self) -> String {
        "1.0.0".to_string()
    }
}

impl OcrBackend for FakeOcr {
    fn recognize(&self, _image: &GrayImage) -> Result<OcrOutput> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.output
            .clone()
            .ok_or_else(|| DocReaderError::ocr("engine crashed"))
    }
}

/// Classifier that returns a fixed label and records every input it sees.
pub struct FakeClassifier {
    result: Option<Classification>,
    pub inputs: Mutex<Vec<String>>,
}

impl FakeClassifier {
    pub fn returning(classification: Classification) -> Arc<Self> {
        Arc::new(Self {
            result: Some(classification),
            inputs: Mutex::new(Vec::new()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            result: None,
            inputs: Mutex::new(Vec::new()),
        })
    }

    pub fn call_count(&self) -> usize {
        self.inputs.lock().len()
    }
}

impl Plugin for FakeClassifier {
    fn name(&self) -> &str {
        "fake-classifier"
    }

    fn version(&self) -> String {
        "1.0.0".to_string()
    }
}

impl TextClassifier for FakeClassifier {
    fn classify(&self, text: &str) -> Result<Classification> {
        self.inputs.lock().push(text.to_string());
        self.result
            .ok_or_else(|| DocReaderError::classification("model not loaded"))
    }
}

/// Encode a small striped grayscale PNG.
pub fn png_bytes() -> Vec<u8> {
    let image = GrayImage::from_fn(32, 32, |x, _| if x % 6 < 2 { Luma([10]) } else { Luma([240]) });
    let mut bytes = Vec::new();
    DynamicImage::ImageLuma8(image)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}

/// Build a PDF with one text run per page.
pub fn build_pdf(pages: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

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

/// Build a minimal DOCX package with one run per paragraph.
pub fn build_docx(paragraphs: &[&str]) -> Vec<u8> {
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

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
