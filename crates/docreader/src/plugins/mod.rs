//! Plugin traits for the engines behind the pipeline.
//!
//! The dispatcher never talks to Tesseract or ONNX Runtime directly. It holds optional
//! trait objects:
//!
//! - [`OcrBackend`] recognizes text in a preprocessed page image.
//! - [`TextClassifier`] produces the quality signal for extracted text.
//!
//! Both extend [`Plugin`] and are stored as `Arc<dyn Trait>` so one loaded engine can be
//! shared across concurrent requests. Either may be absent: the pipeline then degrades
//! (empty OCR output, neutral quality) instead of failing.
//!
//! ```rust
//! use docreader::plugins::{Classification, Plugin, TextClassifier};
//! use docreader::DocumentProcessor;
//! use std::sync::Arc;
//!
//! struct Neutral;
//!
//! impl Plugin for Neutral {
//!     fn name(&self) -> &str { "neutral" }
//!     fn version(&self) -> String { "0.1.0".to_string() }
//! }
//!
//! impl TextClassifier for Neutral {
//!     fn classify(&self, _text: &str) -> docreader::Result<Classification> {
//!         Ok(Classification::positive(0.5))
//!     }
//! }
//!
//! let processor = DocumentProcessor::builder()
//!     .classifier(Arc::new(Neutral))
//!     .build();
//! assert!(processor.has_classifier());
//! ```

pub mod classifier;
pub mod ocr;
pub mod traits;

pub use classifier::{ClassLabel, Classification, TextClassifier};
pub use ocr::{OcrBackend, OcrOutput};
pub use traits::Plugin;
