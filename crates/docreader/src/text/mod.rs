//! Text quality scoring.

pub mod quality;

pub use quality::{DEFAULT_MAX_CHARS, DEFAULT_NEUTRAL_SCORE, QualityScorer, truncate_chars};
