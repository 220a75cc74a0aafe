//! Text classifier plugin trait.

use crate::Result;
use crate::plugins::Plugin;
use serde::{Deserialize, Serialize};

/// Binary label reported by a classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ClassLabel {
    Positive,
    Negative,
}

impl ClassLabel {
    /// Parse a model label such as `"POSITIVE"`; anything that is not positive is negative.
    pub fn from_model_label(label: &str) -> Self {
        if label.trim().eq_ignore_ascii_case("positive") {
            ClassLabel::Positive
        } else {
            ClassLabel::Negative
        }
    }
}

/// One classification: the winning label and its probability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub label: ClassLabel,
    pub score: f64,
}

impl Classification {
    pub fn positive(score: f64) -> Self {
        Self {
            label: ClassLabel::Positive,
            score,
        }
    }

    pub fn negative(score: f64) -> Self {
        Self {
            label: ClassLabel::Negative,
            score,
        }
    }
}

/// Trait for text classification models used as a quality signal.
///
/// Input is at most [`crate::core::config::QualityConfig::max_chars`] characters.
/// Implementations must be safe to call from concurrent requests.
///
/// # Example
///
/// ```rust
/// use docreader::plugins::{Classification, Plugin, TextClassifier};
/// use docreader::Result;
///
/// struct AlwaysPositive;
///
/// impl Plugin for AlwaysPositive {
///     fn name(&self) -> &str { "always-positive" }
///     fn version(&self) -> String { "1.0.0".to_string() }
/// }
///
/// impl TextClassifier for AlwaysPositive {
///     fn classify(&self, _text: &str) -> Result<Classification> {
///         Ok(Classification::positive(0.99))
///     }
/// }
/// ```
pub trait TextClassifier: Plugin {
    fn classify(&self, text: &str) -> Result<Classification>;
}
