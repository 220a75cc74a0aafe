//! REST API server for document analysis (`api` feature).
//!
//! # Endpoints
//!
//! - `GET /` - Liveness banner
//! - `GET /health` - Health check, reports which engines are loaded
//! - `POST /analyze-document` - Extract text and confidence from an uploaded file
//!
//! Errors are JSON objects of the form `{"detail": "..."}`.
//!
//! # Examples
//!
//! ## Starting the server
//!
//! ```no_run
//! use docreader::api::serve;
//!
//! #[tokio::main]
//! async fn main() -> docreader::Result<()> {
//!     serve("127.0.0.1", 8000).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Embedding the router in your app
//!
//! ```no_run
//! use docreader::{DocumentProcessor, api::create_router};
//! use axum::Router;
//! use std::sync::Arc;
//!
//! let router = create_router(Arc::new(DocumentProcessor::new()));
//! let app: Router = Router::new().nest("/docs", router);
//! ```
//!
//! # cURL Examples
//!
//! ```bash
//! curl -F "file=@scan.png" http://localhost:8000/analyze-document
//! curl http://localhost:8000/health
//! ```

mod error;
mod handlers;
mod server;
mod types;

pub use error::{ApiError, INTERNAL_ERROR_DETAIL};
pub use handlers::{FILE_FIELD, NO_FILE_DETAIL};
pub use server::{
    DEFAULT_CORS_ORIGINS, create_router, create_router_with_limits, serve, serve_with_config,
    serve_with_processor_and_limits,
};
pub use types::{AnalyzeResponse, ApiSizeLimits, ApiState, ErrorResponse, HealthResponse, RootResponse};
