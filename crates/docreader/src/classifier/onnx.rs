//! Sequence-classification model served by ONNX Runtime.
//!
//! Works with single-label exports such as DistilBERT fine-tuned on SST-2: the model
//! takes `input_ids` and `attention_mask` and returns one row of logits per input. The
//! logits are soft-maxed and the arg-max label wins.

use crate::core::config::ClassifierConfig;
use crate::plugins::{ClassLabel, Classification, Plugin, TextClassifier};
use crate::{DocReaderError, Result};
use ort::session::Session;
use ort::session::builder::GraphOptimizationLevel;
use ort::value::Value;
use parking_lot::Mutex;
use tokenizers::{Tokenizer, TruncationParams};

/// Token limit of BERT-family encoders.
pub const MAX_SEQUENCE_TOKENS: usize = 512;

/// Numerically stable softmax.
pub fn softmax(logits: &[f32]) -> Vec<f64> {
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f64> = logits.iter().map(|&l| f64::from(l - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    if sum == 0.0 || !sum.is_finite() {
        return vec![0.0; logits.len()];
    }
    exps.into_iter().map(|e| e / sum).collect()
}

fn classification_error(context: &str, e: impl std::fmt::Display) -> DocReaderError {
    DocReaderError::classification(format!("{}: {}", context, e))
}

/// Text classifier over an ONNX sequence-classification export.
pub struct OnnxTextClassifier {
    session: Mutex<Session>,
    tokenizer: Tokenizer,
    labels: Vec<String>,
}

impl OnnxTextClassifier {
    /// Load the model and tokenizer named by `config`.
    ///
    /// # Errors
    ///
    /// `DocReaderError::MissingDependency` when a file is missing,
    /// `DocReaderError::Classification` when either file cannot be loaded.
    pub fn new(config: &ClassifierConfig) -> Result<Self> {
        for path in [&config.model_path, &config.tokenizer_path] {
            if !path.exists() {
                return Err(DocReaderError::MissingDependency(format!(
                    "Classifier file not found: {}",
                    path.display()
                )));
            }
        }

        let session = Session::builder()
            .and_then(|b| b.with_optimization_level(GraphOptimizationLevel::Level3))
            .and_then(|b| b.with_intra_threads(config.intra_threads))
            .and_then(|b| b.commit_from_file(&config.model_path))
            .map_err(|e| classification_error("Failed to load ONNX model", e))?;

        let mut tokenizer =
            Tokenizer::from_file(&config.tokenizer_path).map_err(|e| classification_error("Failed to load tokenizer", e))?;
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: MAX_SEQUENCE_TOKENS,
                ..Default::default()
            }))
            .map_err(|e| classification_error("Failed to configure truncation", e))?;

        tracing::info!(
            model = %config.model_path.display(),
            labels = ?config.labels,
            "Text classifier loaded"
        );

        Ok(Self {
            session: Mutex::new(session),
            tokenizer,
            labels: config.labels.clone(),
        })
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    fn logits(&self, text: &str) -> Result<Vec<f32>> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| classification_error("Tokenization failed", e))?;

        let input_ids: Vec<i64> = encoding.get_ids().iter().map(|&id| i64::from(id)).collect();
        let attention_mask: Vec<i64> = encoding.get_attention_mask().iter().map(|&m| i64::from(m)).collect();
        let len = input_ids.len();

        let input_ids = Value::from_array(([1usize, len], input_ids.into_boxed_slice()))
            .map_err(|e| classification_error("Failed to build input_ids", e))?;
        let attention_mask = Value::from_array(([1usize, len], attention_mask.into_boxed_slice()))
            .map_err(|e| classification_error("Failed to build attention_mask", e))?;

        let mut session = self.session.lock();
        let outputs = session
            .run(ort::inputs![
                "input_ids" => input_ids,
                "attention_mask" => attention_mask
            ])
            .map_err(|e| classification_error("Inference failed", e))?;

        let (_, logits) = outputs[0]
            .try_extract_tensor::<f32>()
            .map_err(|e| classification_error("Unexpected model output", e))?;
        Ok(logits.to_vec())
    }
}

impl Plugin for OnnxTextClassifier {
    fn name(&self) -> &str {
        "onnx-text-classifier"
    }

    fn version(&self) -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }

    fn description(&self) -> &str {
        "Sequence classification with ONNX Runtime"
    }
}

impl TextClassifier for OnnxTextClassifier {
    fn classify(&self, text: &str) -> Result<Classification> {
        let logits = self.logits(text)?;
        if logits.len() != self.labels.len() {
            return Err(DocReaderError::classification(format!(
                "Model returned {} logits for {} labels",
                logits.len(),
                self.labels.len()
            )));
        }

        let probabilities = softmax(&logits);
        let (best, score) = probabilities
            .iter()
            .copied()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .ok_or_else(|| DocReaderError::classification("Model returned no logits"))?;

        Ok(Classification {
            label: ClassLabel::from_model_label(&self.labels[best]),
            score,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_softmax_sums_to_one() {
        let probs = softmax(&[1.0, 2.0, 3.0]);
        let sum: f64 = probs.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
        assert!(probs[2] > probs[1] && probs[1] > probs[0]);
    }

    #[test]
    fn test_softmax_large_logits_stable() {
        let probs = softmax(&[1000.0, 1000.0]);
        assert!((probs[0] - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_softmax_empty() {
        assert!(softmax(&[]).is_empty());
    }

    #[test]
    fn test_missing_model_file() {
        let config = ClassifierConfig::new("/nonexistent/model.onnx", "/nonexistent/tokenizer.json");
        let err = OnnxTextClassifier::new(&config).err().expect("missing model");
        assert!(matches!(err, DocReaderError::MissingDependency(_)));
    }
}
