//! Error types for docreader.
//!
//! Every fallible operation in the crate returns [`DocReaderError`]. The errors fall into
//! two classes that the HTTP boundary reports differently:
//!
//! - **Client errors** (`UnsupportedFormat`, `Validation`): the request itself is wrong.
//! - **Server errors** (everything else): the pipeline failed unexpectedly.
//!
//! Parse failures *inside* a single format extractor never show up here. Extractors
//! recover them locally and report an empty result (see [`crate::extractors::SoftFailure`]).
//!
//! `Io` errors always bubble up unchanged.
//!
//! # Example
//!
//! ```rust
//! use docreader::{DocReaderError, Result};
//!
//! fn read_upload(path: &str) -> Result<Vec<u8>> {
//!     let bytes = std::fs::read(path)?;
//!     if bytes.is_empty() {
//!         return Err(DocReaderError::validation(format!("Upload is empty: {}", path)));
//!     }
//!     Ok(bytes)
//! }
//! ```
use thiserror::Error;

/// Result type alias using `DocReaderError`.
pub type Result<T> = std::result::Result<T, DocReaderError>;

/// Main error type for all docreader operations.
#[derive(Debug, Error)]
pub enum DocReaderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parsing error: {message}")]
    Parsing {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("OCR error: {message}")]
    Ocr {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Classification error: {message}")]
    Classification {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Image processing error: {message}")]
    ImageProcessing {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Missing dependency: {0}")]
    MissingDependency(String),

    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    #[error("{0}")]
    Other(String),
}

macro_rules! error_constructor {
    ($name:ident, $variant:ident) => {
        paste::paste! {
            #[doc = "Create a " $variant " error"]
            pub fn $name<S: Into<String>>(message: S) -> Self {
                Self::$variant {
                    message: message.into(),
                    source: None,
                }
            }

            #[doc = "Create a " $variant " error with source"]
            pub fn [<$name _with_source>]<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
                message: S,
                source: E,
            ) -> Self {
                Self::$variant {
                    message: message.into(),
                    source: Some(Box::new(source)),
                }
            }
        }
    };
}

impl DocReaderError {
    error_constructor!(parsing, Parsing);
    error_constructor!(ocr, Ocr);
    error_constructor!(classification, Classification);
    error_constructor!(validation, Validation);
    error_constructor!(image_processing, ImageProcessing);

    /// Whether the error was caused by the request rather than by the pipeline.
    ///
    /// The HTTP layer maps client errors to 400 and everything else to 500.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            DocReaderError::UnsupportedFormat(_) | DocReaderError::Validation { .. }
        )
    }
}
