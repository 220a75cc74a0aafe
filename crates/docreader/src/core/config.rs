//! Configuration loading and management.
//!
//! [`ProcessorConfig`] can be loaded from TOML, YAML or JSON, discovered as
//! `docreader.toml` in the current directory or any of its parents, or built in code.
//! Every section is optional and falls back to the defaults documented on its fields.
//!
//! ```toml
//! [ocr]
//! language = "eng"
//! tessdata_path = "/usr/share/tesseract-ocr/5/tessdata"
//!
//! [quality]
//! max_chars = 512
//! neutral_score = 0.5
//!
//! [classifier]
//! model_path = "models/sst2/model.onnx"
//! tokenizer_path = "models/sst2/tokenizer.json"
//! ```

use crate::{DocReaderError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the file searched for by [`ProcessorConfig::discover`].
pub const CONFIG_FILE_NAME: &str = "docreader.toml";

/// Top-level processing configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessorConfig {
    #[serde(default)]
    pub ocr: OcrConfig,

    #[serde(default)]
    pub quality: QualityConfig,

    /// Text classifier used for quality scoring. Without it every quality score is neutral.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classifier: Option<ClassifierConfig>,
}

/// OCR engine settings.
///
/// Engine mode and page segmentation mode are fixed by the backend and are not
/// configurable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrConfig {
    /// Tesseract language code(s), `+`-separated (default: "eng").
    #[serde(default = "default_eng")]
    pub language: String,

    /// Directory containing `*.traineddata`. Falls back to `TESSDATA_PREFIX` and
    /// well-known install locations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tessdata_path: Option<PathBuf>,
}

/// Quality scoring settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityConfig {
    /// Only this many leading characters are sent to the classifier (default: 512).
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,

    /// Score used when text is empty, no classifier is loaded, or scoring fails (default: 0.5).
    #[serde(default = "default_neutral_score")]
    pub neutral_score: f64,
}

/// ONNX sequence-classification model settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    pub model_path: PathBuf,
    pub tokenizer_path: PathBuf,

    /// Output labels by logit index (default: `["NEGATIVE", "POSITIVE"]`).
    #[serde(default = "default_labels")]
    pub labels: Vec<String>,

    /// ONNX Runtime intra-op threads (default: 1).
    #[serde(default = "default_intra_threads")]
    pub intra_threads: usize,
}

fn default_eng() -> String {
    "eng".to_string()
}
fn default_max_chars() -> usize {
    512
}
fn default_neutral_score() -> f64 {
    0.5
}
fn default_labels() -> Vec<String> {
    vec!["NEGATIVE".to_string(), "POSITIVE".to_string()]
}
fn default_intra_threads() -> usize {
    1
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            language: default_eng(),
            tessdata_path: None,
        }
    }
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            max_chars: default_max_chars(),
            neutral_score: default_neutral_score(),
        }
    }
}

impl ClassifierConfig {
    pub fn new(model_path: impl Into<PathBuf>, tokenizer_path: impl Into<PathBuf>) -> Self {
        Self {
            model_path: model_path.into(),
            tokenizer_path: tokenizer_path.into(),
            labels: default_labels(),
            intra_threads: default_intra_threads(),
        }
    }
}

impl ProcessorConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `DocReaderError::Validation` if the file cannot be read, is not valid TOML,
    /// or fails [`ProcessorConfig::validate`].
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = read_config(path.as_ref())?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| DocReaderError::validation(format!("Invalid TOML in {}: {}", path.as_ref().display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = read_config(path.as_ref())?;
        let config: Self = serde_yaml_ng::from_str(&content)
            .map_err(|e| DocReaderError::validation(format!("Invalid YAML in {}: {}", path.as_ref().display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = read_config(path.as_ref())?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| DocReaderError::validation(format!("Invalid JSON in {}: {}", path.as_ref().display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file, picking the parser from the extension.
    ///
    /// `.yaml`/`.yml` and `.json` are recognized; anything else is parsed as TOML.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match path.extension().and_then(|e| e.to_str()).map(str::to_lowercase).as_deref() {
            Some("yaml") | Some("yml") => Self::from_yaml_file(path),
            Some("json") => Self::from_json_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    /// Discover `docreader.toml` in the current directory or its parents.
    ///
    /// # Returns
    ///
    /// - `Some(config)` if found
    /// - `None` if no config file found
    pub fn discover() -> Result<Option<Self>> {
        let mut current = std::env::current_dir().map_err(DocReaderError::Io)?;

        loop {
            let candidate = current.join(CONFIG_FILE_NAME);
            if candidate.exists() {
                return Ok(Some(Self::from_toml_file(candidate)?));
            }

            if let Some(parent) = current.parent() {
                current = parent.to_path_buf();
            } else {
                break;
            }
        }

        Ok(None)
    }

    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.ocr.language.trim().is_empty() {
            return Err(DocReaderError::validation(
                "ocr.language cannot be empty. Please specify a valid language code (e.g., 'eng')",
            ));
        }

        if self.quality.max_chars == 0 {
            return Err(DocReaderError::validation("quality.max_chars must be greater than 0"));
        }

        if !(0.0..=1.0).contains(&self.quality.neutral_score) {
            return Err(DocReaderError::validation(format!(
                "quality.neutral_score must be within [0, 1], got {}",
                self.quality.neutral_score
            )));
        }

        if let Some(classifier) = &self.classifier {
            if !classifier.labels.iter().any(|l| l.eq_ignore_ascii_case("positive")) {
                return Err(DocReaderError::validation(
                    "classifier.labels must contain a POSITIVE label",
                ));
            }
            if classifier.intra_threads == 0 {
                return Err(DocReaderError::validation("classifier.intra_threads must be greater than 0"));
            }
        }

        Ok(())
    }
}

fn read_config(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .map_err(|e| DocReaderError::validation(format!("Failed to read config file {}: {}", path.display(), e)))
}
