//! API server setup and configuration.

use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
};

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
};
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::core::config::ProcessorConfig;
use crate::{DocReaderError, DocumentProcessor, Result};

use super::{
    handlers::{analyze_handler, health_handler, root_handler},
    types::{ApiSizeLimits, ApiState},
};

/// Origins allowed when `DOCREADER_CORS_ORIGINS` is not set: the local frontend dev server.
pub const DEFAULT_CORS_ORIGINS: &[&str] = &["http://localhost:4200", "http://127.0.0.1:4200"];

/// Parse the upload limit from environment variables.
///
/// 1. `DOCREADER_MAX_UPLOAD_BYTES` - limit in bytes
/// 2. `DOCREADER_MAX_UPLOAD_SIZE_MB` - limit in MB
///
/// Falls back to the default (10 MB) if neither is set to a positive integer.
fn parse_size_limits_from_env() -> ApiSizeLimits {
    if let Ok(value) = std::env::var("DOCREADER_MAX_UPLOAD_BYTES") {
        match value.parse::<usize>() {
            Ok(bytes) if bytes > 0 => {
                tracing::info!("Upload size limit configured from environment: {} bytes", bytes);
                return ApiSizeLimits::new(bytes);
            }
            _ => tracing::warn!(
                "Failed to parse DOCREADER_MAX_UPLOAD_BYTES='{}', must be a positive integer",
                value
            ),
        }
    }

    if let Ok(value) = std::env::var("DOCREADER_MAX_UPLOAD_SIZE_MB") {
        match value.parse::<usize>() {
            Ok(mb) if mb > 0 => {
                tracing::info!("Upload size limit configured from environment: {} MB", mb);
                return ApiSizeLimits::from_mb(mb);
            }
            _ => tracing::warn!(
                "Failed to parse DOCREADER_MAX_UPLOAD_SIZE_MB='{}', must be a positive integer",
                value
            ),
        }
    }

    let limits = ApiSizeLimits::default();
    tracing::info!(
        "Upload size limit: {} MB (default) - Configure with DOCREADER_MAX_UPLOAD_BYTES or DOCREADER_MAX_UPLOAD_SIZE_MB",
        limits.max_upload_mb()
    );
    limits
}

fn parse_origins(list: &str) -> Vec<HeaderValue> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| s.parse::<HeaderValue>().ok())
        .collect()
}

fn cors_origins_from_env() -> Vec<HeaderValue> {
    if let Ok(origins_str) = std::env::var("DOCREADER_CORS_ORIGINS") {
        let origins = parse_origins(&origins_str);
        if !origins.is_empty() {
            tracing::info!("CORS configured with {} explicit allowed origin(s)", origins.len());
            return origins;
        }
        tracing::warn!("DOCREADER_CORS_ORIGINS set but empty/invalid - falling back to the default origins");
    }

    DEFAULT_CORS_ORIGINS
        .iter()
        .map(|origin| HeaderValue::from_static(*origin))
        .collect()
}

fn cors_layer(origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// Create the API router with default size limits.
///
/// This is public to allow embedding the router in other applications.
///
/// ```no_run
/// use docreader::{DocumentProcessor, api::create_router};
/// use std::sync::Arc;
///
/// let router = create_router(Arc::new(DocumentProcessor::new()));
/// ```
pub fn create_router(processor: Arc<DocumentProcessor>) -> Router {
    create_router_with_limits(processor, ApiSizeLimits::default())
}

/// Create the API router with custom size limits.
pub fn create_router_with_limits(processor: Arc<DocumentProcessor>, limits: ApiSizeLimits) -> Router {
    let state = ApiState { processor, limits };

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/analyze-document", post(analyze_handler))
        .layer(DefaultBodyLimit::max(limits.max_request_body_bytes))
        .layer(cors_layer(cors_origins_from_env()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the API server with config file discovery.
///
/// Searches for `docreader.toml` in the current and parent directories. If none is
/// found, uses the default configuration.
///
/// # Environment Variables
///
/// ```bash
/// export DOCREADER_CORS_ORIGINS="https://app.example.com,https://admin.example.com"
/// export DOCREADER_MAX_UPLOAD_SIZE_MB=10
/// ```
pub async fn serve(host: impl AsRef<str>, port: u16) -> Result<()> {
    let config = match ProcessorConfig::discover()? {
        Some(config) => {
            tracing::info!("Loaded processor config from discovered file");
            config
        }
        None => {
            tracing::info!("No config file found, using default configuration");
            ProcessorConfig::default()
        }
    };

    serve_with_config(host, port, config).await
}

/// Start the API server with an explicit config. Size limits come from the environment.
pub async fn serve_with_config(host: impl AsRef<str>, port: u16, config: ProcessorConfig) -> Result<()> {
    let processor = Arc::new(DocumentProcessor::from_config(&config)?);
    let limits = parse_size_limits_from_env();
    serve_with_processor_and_limits(host, port, processor, limits).await
}

/// Start the API server with a ready processor and explicit size limits.
///
/// Engines are shut down when the server stops.
pub async fn serve_with_processor_and_limits(
    host: impl AsRef<str>,
    port: u16,
    processor: Arc<DocumentProcessor>,
    limits: ApiSizeLimits,
) -> Result<()> {
    let ip: IpAddr = host
        .as_ref()
        .parse()
        .map_err(|e| DocReaderError::validation(format!("Invalid host address: {}", e)))?;

    let addr = SocketAddr::new(ip, port);
    let app = create_router_with_limits(Arc::clone(&processor), limits);

    tracing::info!(
        ocr = processor.has_ocr(),
        classifier = processor.has_classifier(),
        "Starting Document Reader API server on http://{}:{}",
        ip,
        port
    );

    let listener = tokio::net::TcpListener::bind(addr).await.map_err(DocReaderError::Io)?;

    let served = axum::serve(listener, app)
        .await
        .map_err(|e| DocReaderError::Other(e.to_string()));

    processor.shutdown();
    served
}
