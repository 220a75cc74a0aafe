//! Plain text extractor.

use super::{Extraction, FormatExtractor};
use crate::Result;
use crate::types::ExtractionResult;
use std::borrow::Cow;

/// Confidence for text that decoded as UTF-8.
pub const UTF8_CONFIDENCE: f64 = 1.0;

/// Confidence for text that fell back to Latin-1.
pub const LATIN1_CONFIDENCE: f64 = 0.8;

/// Plain text extractor.
///
/// Tries UTF-8 first. Anything else is decoded as ISO-8859-1, mapping each byte to the
/// code point of the same value. That fallback accepts every byte sequence, so this
/// extractor never fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextExtractor;

impl PlainTextExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FormatExtractor for PlainTextExtractor {
    fn name(&self) -> &'static str {
        "txt"
    }

    fn extract(&self, content: &[u8]) -> Result<Extraction> {
        let (text, confidence) = match decode_utf8(content) {
            Some(text) => (text, UTF8_CONFIDENCE),
            None => {
                tracing::debug!("Text is not valid UTF-8, decoding as Latin-1");
                (encoding_rs::mem::decode_latin1(content), LATIN1_CONFIDENCE)
            }
        };

        Ok(Ok(ExtractionResult::new(text.trim(), confidence)))
    }
}

#[cfg(feature = "simd-utf8")]
fn decode_utf8(content: &[u8]) -> Option<Cow<'_, str>> {
    simdutf8::basic::from_utf8(content).ok().map(Cow::Borrowed)
}

#[cfg(not(feature = "simd-utf8"))]
fn decode_utf8(content: &[u8]) -> Option<Cow<'_, str>> {
    std::str::from_utf8(content).ok().map(Cow::Borrowed)
}
