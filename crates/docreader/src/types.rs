//! Result types shared by the extractors, the dispatcher and the HTTP layer.

use serde::{Deserialize, Serialize};

/// Clamp a confidence value into `[0, 1]`.
///
/// NaN is mapped to `0.0` so that a broken engine can never report a
/// confidence that compares as "unknown".
#[inline]
pub fn clamp_confidence(value: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) }
}

/// Output of a single format extractor.
///
/// `confidence` is the format confidence: how reliable the extraction itself was,
/// independent of what the text says.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub text: String,
    pub confidence: f64,
}

impl ExtractionResult {
    /// Build a result, clamping `confidence` into `[0, 1]`.
    pub fn new(text: impl Into<String>, confidence: f64) -> Self {
        Self {
            text: text.into(),
            confidence: clamp_confidence(confidence),
        }
    }

    /// The zeroed result substituted for a soft failure.
    pub fn empty() -> Self {
        Self {
            text: String::new(),
            confidence: 0.0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl Default for ExtractionResult {
    fn default() -> Self {
        Self::empty()
    }
}

/// Final result of processing one upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentResult {
    /// Extracted text, trimmed of surrounding whitespace.
    pub text: String,
    /// Fused confidence in `[0, 1]`.
    pub confidence: f64,
    /// Wall-clock seconds spent in the pipeline.
    pub processing_time: f64,
    /// Resolved extension token, lower-cased (e.g. `"pdf"`, `"jpeg"`).
    pub file_type: String,
    /// Input length in bytes.
    pub file_size: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_confidence_bounds() {
        assert_eq!(clamp_confidence(-0.5), 0.0);
        assert_eq!(clamp_confidence(1.7), 1.0);
        assert_eq!(clamp_confidence(0.42), 0.42);
        assert_eq!(clamp_confidence(f64::NAN), 0.0);
        assert_eq!(clamp_confidence(f64::INFINITY), 1.0);
    }

    #[test]
    fn test_extraction_result_new_clamps() {
        let result = ExtractionResult::new("text", 3.0);
        assert_eq!(result.confidence, 1.0);

        let result = ExtractionResult::new("text", -1.0);
        assert_eq!(result.confidence, 0.0);
    }

    #[test]
    fn test_extraction_result_empty() {
        let result = ExtractionResult::empty();
        assert!(result.is_empty());
        assert_eq!(result.confidence, 0.0);
        assert_eq!(result, ExtractionResult::default());
    }

    #[test]
    fn test_document_result_serializes_all_fields() {
        let result = DocumentResult {
            text: "hello".to_string(),
            confidence: 0.75,
            processing_time: 0.01,
            file_type: "txt".to_string(),
            file_size: 5,
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["text"], "hello");
        assert_eq!(json["confidence"], 0.75);
        assert_eq!(json["file_type"], "txt");
        assert_eq!(json["file_size"], 5);
        assert!(json["processing_time"].is_number());
    }
}
