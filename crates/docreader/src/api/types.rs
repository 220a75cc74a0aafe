//! API request and response types.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{DocumentProcessor, DocumentResult};

const MIB: usize = 1024 * 1024;

/// Slack between the upload limit and the request body limit.
///
/// Multipart framing and small form fields need room on top of the file itself, and the
/// handler must see an oversized file to answer with its own message.
pub const REQUEST_OVERHEAD_BYTES: usize = MIB;

/// Upload size limits.
///
/// The handler rejects files larger than `max_upload_bytes` with a 400. Reading stops at
/// `max_request_body_bytes`, which the handler reports with the same 400.
///
/// # Configuration via Environment Variables
///
/// ```bash
/// # In bytes:
/// export DOCREADER_MAX_UPLOAD_BYTES=10485760
///
/// # Or in MB:
/// export DOCREADER_MAX_UPLOAD_SIZE_MB=10
/// ```
///
/// # Examples
///
/// ```
/// use docreader::api::ApiSizeLimits;
///
/// let limits = ApiSizeLimits::default();
/// assert_eq!(limits.max_upload_bytes, 10 * 1024 * 1024);
///
/// let limits = ApiSizeLimits::from_mb(50);
/// assert_eq!(limits.max_upload_mb(), 50);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiSizeLimits {
    /// Maximum size of the uploaded file in bytes. Default: 10 MiB.
    pub max_upload_bytes: usize,

    /// Maximum size of the entire request body in bytes.
    pub max_request_body_bytes: usize,
}

impl Default for ApiSizeLimits {
    fn default() -> Self {
        Self::new(10 * MIB)
    }
}

impl ApiSizeLimits {
    pub fn new(max_upload_bytes: usize) -> Self {
        Self {
            max_upload_bytes,
            max_request_body_bytes: max_upload_bytes.saturating_add(REQUEST_OVERHEAD_BYTES),
        }
    }

    pub fn from_mb(max_upload_mb: usize) -> Self {
        Self::new(max_upload_mb.saturating_mul(MIB))
    }

    /// Upload limit in whole megabytes, as shown to clients.
    pub fn max_upload_mb(&self) -> usize {
        self.max_upload_bytes / MIB
    }
}

/// Root endpoint response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootResponse {
    pub message: String,
    pub version: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Health status
    pub status: String,
    /// API version
    pub version: String,
    /// Whether an OCR backend is available
    pub ocr_engine_loaded: bool,
    /// Whether a text classifier is available
    pub text_classifier_loaded: bool,
}

/// Document analysis response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub text: String,
    pub confidence: f64,
    pub processing_time: f64,
}

impl From<DocumentResult> for AnalyzeResponse {
    fn from(result: DocumentResult) -> Self {
        Self {
            text: result.text,
            confidence: result.confidence,
            processing_time: result.processing_time,
        }
    }
}

/// Error response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub detail: String,
}

/// API server state.
#[derive(Debug, Clone)]
pub struct ApiState {
    /// Shared processor with its engines loaded once at startup
    pub processor: Arc<DocumentProcessor>,
    pub limits: ApiSizeLimits,
}
