//! Confidence fusion.

use crate::types::clamp_confidence;

/// Fuse format confidence with an optional quality score.
///
/// `quality_score` is `None` when the extracted text is empty: no quality signal exists
/// for empty text and the format confidence passes through unchanged. Otherwise the
/// result is the equal-weight mean of both inputs.
///
/// ```rust
/// use docreader::core::fusion::fuse_confidence;
///
/// assert!((fuse_confidence(0.8, Some(0.4)) - 0.6).abs() < 1e-12);
/// assert_eq!(fuse_confidence(0.3, None), 0.3);
/// ```
pub fn fuse_confidence(format_confidence: f64, quality_score: Option<f64>) -> f64 {
    match quality_score {
        Some(quality) => clamp_confidence((format_confidence + quality) / 2.0),
        None => clamp_confidence(format_confidence),
    }
}
