//! API request handlers.

use axum::{
    Json,
    extract::{Multipart, State, multipart::MultipartError},
    http::StatusCode,
};

use super::{
    error::ApiError,
    types::{AnalyzeResponse, ApiSizeLimits, ApiState, HealthResponse, RootResponse},
};

/// Multipart field carrying the upload.
pub const FILE_FIELD: &str = "file";

/// Detail for a request without a usable file.
pub const NO_FILE_DETAIL: &str = "No file provided";

fn file_too_large(limits: &ApiSizeLimits) -> ApiError {
    ApiError::bad_request(format!("File too large (max {}MB)", limits.max_upload_mb()))
}

fn multipart_error(err: MultipartError, limits: &ApiSizeLimits) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        file_too_large(limits)
    } else {
        tracing::debug!(error = %err, "Malformed multipart request");
        ApiError::bad_request(err.body_text())
    }
}

/// Root endpoint handler.
///
/// GET /
pub async fn root_handler() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Document Reader API is running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Health check endpoint handler.
///
/// GET /health
pub async fn health_handler(State(state): State<ApiState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        ocr_engine_loaded: state.processor.has_ocr(),
        text_classifier_loaded: state.processor.has_classifier(),
    })
}

/// Document analysis handler.
///
/// POST /analyze-document
///
/// Accepts multipart form data with a single `file` field. The file's extension picks
/// the extractor. Other fields are ignored.
///
/// # Errors
///
/// - 400 `No file provided`: no `file` field, or it has no filename
/// - 400 `File too large (max NMB)`: the file exceeds the upload limit
/// - 400 `Unsupported file type: <ext>`
/// - 500 `Internal server error`: anything else
pub async fn analyze_handler(
    State(state): State<ApiState>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let mut upload = None;

    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, &state.limits))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let Some(filename) = field.file_name().filter(|name| !name.is_empty()).map(str::to_string) else {
            return Err(ApiError::bad_request(NO_FILE_DETAIL));
        };

        let mut content = Vec::new();
        while let Some(chunk) = field.chunk().await.map_err(|e| multipart_error(e, &state.limits))? {
            if content.len() + chunk.len() > state.limits.max_upload_bytes {
                return Err(file_too_large(&state.limits));
            }
            content.extend_from_slice(&chunk);
        }

        upload = Some((filename, content));
        break;
    }

    let Some((filename, content)) = upload else {
        return Err(ApiError::bad_request(NO_FILE_DETAIL));
    };

    let result = state
        .processor
        .process_async(content, Some(filename.clone()))
        .await?;

    tracing::info!(
        "Processed {}: {} characters extracted",
        filename,
        result.text.chars().count()
    );

    Ok(Json(AnalyzeResponse::from(result)))
}
