//! Format extractors.
//!
//! One extractor per supported family. Each turns raw upload bytes into
//! `(text, format_confidence)`. The dispatcher in [`crate::core::processor`] picks the
//! extractor with a `match` on [`crate::core::formats::SupportedFormat`].
//!
//! # Failure model
//!
//! Extractors distinguish two kinds of failure:
//!
//! - A *soft* failure ([`SoftFailure`]) means the bytes could not be parsed as the
//!   claimed format, or the OCR engine broke. The request still succeeds, with an empty
//!   text and zero confidence.
//! - A *hard* failure (the outer [`crate::Result`]) aborts the request. Only the image
//!   extractor produces one, when the upload does not decode as an image at all.

use crate::error::{DocReaderError, Result};
use crate::types::ExtractionResult;

pub mod docx;
pub mod image;
pub mod pdf;
pub mod text;

pub use docx::DocxExtractor;
pub use image::ImageExtractor;
pub use pdf::PdfExtractor;
pub use text::PlainTextExtractor;

/// Length at which the length heuristic saturates.
pub const LENGTH_SATURATION_CHARS: usize = 1000;

/// Recoverable failure of a single extractor.
#[derive(Debug, thiserror::Error)]
#[error("{extractor} extraction failed: {error}")]
pub struct SoftFailure {
    pub extractor: &'static str,
    #[source]
    pub error: DocReaderError,
}

impl SoftFailure {
    pub fn new(extractor: &'static str, error: DocReaderError) -> Self {
        Self { extractor, error }
    }
}

/// Outcome of a single extraction: a result, or a soft failure to be replaced by
/// [`ExtractionResult::empty`].
pub type Extraction = std::result::Result<ExtractionResult, SoftFailure>;

/// Common shape of the format extractors.
pub trait FormatExtractor: Send + Sync {
    /// Short name used in logs (`"pdf"`, `"docx"`, ...).
    fn name(&self) -> &'static str;

    /// Extract text and format confidence from raw bytes.
    ///
    /// # Errors
    ///
    /// The outer `Result` carries hard failures only. Parse failures are reported as
    /// `Ok(Err(SoftFailure))`.
    fn extract(&self, content: &[u8]) -> Result<Extraction>;
}

/// Length-based format confidence: `min(chars / 1000, 1.0)`, `0.0` for empty text.
///
/// Counts Unicode scalar values, not bytes.
pub fn length_confidence(text: &str) -> f64 {
    if text.is_empty() {
        return 0.0;
    }
    let chars = text.chars().count();
    (chars as f64 / LENGTH_SATURATION_CHARS as f64).min(1.0)
}

/// Mean of the strictly positive token confidences, scaled to `[0, 1]`.
///
/// Tokens with a confidence `<= 0` carry no information and are ignored. Returns `0.0`
/// when no token is positive.
pub fn mean_token_confidence(confidences: &[i32]) -> f64 {
    let (sum, count) = confidences
        .iter()
        .filter(|&&c| c > 0)
        .fold((0i64, 0usize), |(sum, count), &c| (sum + i64::from(c), count + 1));

    if count == 0 {
        return 0.0;
    }
    (sum as f64 / count as f64 / 100.0).clamp(0.0, 1.0)
}

/// Join items with a trailing `\n` after each one, then trim the whole text.
pub(crate) fn join_lines<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut text = String::new();
    for item in items {
        text.push_str(item.as_ref());
        text.push('\n');
    }
    text.trim().to_string()
}
