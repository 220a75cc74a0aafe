//! ONNX text classifier (`classifier` feature).

pub mod onnx;

pub use onnx::{MAX_SEQUENCE_TOKENS, OnnxTextClassifier, softmax};
