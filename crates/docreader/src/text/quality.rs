//! Classifier-backed text quality score.
//!
//! The score is a number in `[0, 1]` derived from one classifier call on a prefix of the
//! text. A positive label maps to its score, a negative label to `1 - score`. When no
//! signal is available (no classifier, empty text, classifier error) the neutral score
//! is returned instead.

use crate::core::config::QualityConfig;
use crate::plugins::{ClassLabel, TextClassifier};
use crate::types::clamp_confidence;
use std::sync::Arc;

/// Characters of text handed to the classifier.
pub const DEFAULT_MAX_CHARS: usize = 512;

/// Score reported when there is no usable signal.
pub const DEFAULT_NEUTRAL_SCORE: f64 = 0.5;

/// Wraps an optional [`TextClassifier`] into a quality score.
#[derive(Clone)]
pub struct QualityScorer {
    classifier: Option<Arc<dyn TextClassifier>>,
    max_chars: usize,
    neutral_score: f64,
}

impl QualityScorer {
    pub fn new(classifier: Option<Arc<dyn TextClassifier>>) -> Self {
        Self {
            classifier,
            max_chars: DEFAULT_MAX_CHARS,
            neutral_score: DEFAULT_NEUTRAL_SCORE,
        }
    }

    pub fn with_config(classifier: Option<Arc<dyn TextClassifier>>, config: &QualityConfig) -> Self {
        Self {
            classifier,
            max_chars: config.max_chars,
            neutral_score: config.neutral_score,
        }
    }

    pub fn has_classifier(&self) -> bool {
        self.classifier.is_some()
    }

    pub fn classifier(&self) -> Option<&Arc<dyn TextClassifier>> {
        self.classifier.as_ref()
    }

    pub fn neutral_score(&self) -> f64 {
        self.neutral_score
    }

    /// Score `text`. Never fails.
    pub fn score(&self, text: &str) -> f64 {
        let Some(classifier) = &self.classifier else {
            return self.neutral_score;
        };

        let prefix = truncate_chars(text, self.max_chars);
        if prefix.trim().is_empty() {
            return self.neutral_score;
        }

        match classifier.classify(prefix) {
            Ok(classification) => {
                let score = match classification.label {
                    ClassLabel::Positive => classification.score,
                    ClassLabel::Negative => 1.0 - classification.score,
                };
                tracing::debug!(label = ?classification.label, raw = classification.score, score, "Scored text");
                if score.is_nan() {
                    self.neutral_score
                } else {
                    clamp_confidence(score)
                }
            }
            Err(e) => {
                tracing::warn!(classifier = classifier.name(), error = %e, "Text classification failed, using neutral score");
                self.neutral_score
            }
        }
    }
}

impl Default for QualityScorer {
    fn default() -> Self {
        Self::new(None)
    }
}

impl std::fmt::Debug for QualityScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QualityScorer")
            .field("classifier", &self.classifier.as_ref().map(|c| c.name().to_string()))
            .field("max_chars", &self.max_chars)
            .field("neutral_score", &self.neutral_score)
            .finish()
    }
}

/// Borrow at most `max_chars` characters from the start of `text`.
///
/// Cuts on a character boundary, never inside a multi-byte sequence.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}
