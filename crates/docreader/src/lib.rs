//! docreader - document text extraction with fused confidence scoring
//!
//! docreader takes an uploaded file (image, PDF, DOCX or plain text), extracts its text
//! with a format-specific strategy and reports one confidence value in `[0, 1]`. That
//! value fuses how reliable the extraction itself was (format confidence) with a
//! classifier-based judgement of the resulting text (quality score).
//!
//! # Quick Start
//!
//! ```rust
//! use docreader::DocumentProcessor;
//!
//! # fn main() -> docreader::Result<()> {
//! let processor = DocumentProcessor::new();
//! let result = processor.process("Quarterly report".as_bytes(), Some("report.txt"))?;
//! println!("{} (confidence {:.2})", result.text, result.confidence);
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - **Core Module** (`core`): format resolution, dispatch, fusion, config loading
//! - **Extractors** (`extractors`): image OCR, PDF, DOCX and plain text
//! - **Image Preprocessing** (`image`): grayscale, denoise, adaptive threshold
//! - **Quality** (`text`): classifier-backed quality score
//! - **Plugins** (`plugins`): `OcrBackend` and `TextClassifier` traits
//! - **Engines**: Tesseract (`ocr` feature), ONNX Runtime (`classifier` feature)
//! - **HTTP API** (`api` feature): axum router and server
//!
//! # Features
//!
//! - Engines are injected as trait objects and may be absent; output degrades instead
//!   of failing
//! - Parse failures inside an extractor yield an empty result, never an error
//! - Unsupported file types are rejected before any bytes are parsed

#![deny(unsafe_code)]

pub mod core;
pub mod error;
pub mod extractors;
pub mod image;
pub mod plugins;
pub mod text;
pub mod types;

#[cfg(feature = "ocr")]
pub mod ocr;

#[cfg(feature = "classifier")]
pub mod classifier;

#[cfg(feature = "api")]
pub mod api;

pub use error::{DocReaderError, Result};
pub use types::*;

pub use core::config::{ClassifierConfig, OcrConfig, ProcessorConfig, QualityConfig};
pub use core::formats::{SupportedFormat, resolve_file_type};
pub use core::processor::{DocumentProcessor, DocumentProcessorBuilder, ProcessingStage};

pub use plugins::{Classification, ClassLabel, OcrBackend, OcrOutput, Plugin, TextClassifier};
