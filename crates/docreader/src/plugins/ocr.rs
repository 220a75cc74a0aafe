//! OCR backend plugin trait.

use crate::Result;
use crate::plugins::Plugin;
use image::GrayImage;

/// Raw output of one recognition call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OcrOutput {
    /// Full recognized text.
    pub text: String,
    /// Per-token confidences on a 0-100 scale. Values `<= 0` mean the engine had no
    /// confidence data for that token.
    pub token_confidences: Vec<i32>,
}

impl OcrOutput {
    pub fn new(text: impl Into<String>, token_confidences: Vec<i32>) -> Self {
        Self {
            text: text.into(),
            token_confidences,
        }
    }
}

/// Trait for OCR backends.
///
/// A backend receives the already binarized page from
/// [`crate::image::preprocessing::preprocess`] and returns the recognized text plus
/// token confidences. Backends are built once and shared between requests; an engine
/// that is not re-entrant must serialize `recognize` itself.
///
/// # Example
///
/// ```rust
/// use docreader::plugins::{OcrBackend, OcrOutput, Plugin};
/// use docreader::Result;
/// use image::GrayImage;
///
/// struct FixedOcr;
///
/// impl Plugin for FixedOcr {
///     fn name(&self) -> &str { "fixed-ocr" }
///     fn version(&self) -> String { "1.0.0".to_string() }
/// }
///
/// impl OcrBackend for FixedOcr {
///     fn recognize(&self, _image: &GrayImage) -> Result<OcrOutput> {
///         Ok(OcrOutput::new("Hello", vec![90]))
///     }
/// }
/// ```
pub trait OcrBackend: Plugin {
    /// Recognize text in a single-channel binary image.
    ///
    /// # Errors
    ///
    /// Any engine failure. The image extractor turns every error into an empty result.
    fn recognize(&self, image: &GrayImage) -> Result<OcrOutput>;
}
