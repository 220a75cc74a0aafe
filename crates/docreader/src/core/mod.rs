//! Core pipeline.
//!
//! - [`formats`]: filename to format resolution
//! - [`processor`]: the [`DocumentProcessor`] dispatcher and its stage machine
//! - [`fusion`]: format confidence and quality fusion
//! - [`config`]: [`ProcessorConfig`] loading and validation
//! - [`io`]: file helpers for path-based callers
//!
//! # Example
//!
//! ```rust,no_run
//! use docreader::core::config::ProcessorConfig;
//! use docreader::DocumentProcessor;
//!
//! # fn example() -> docreader::Result<()> {
//! let config = ProcessorConfig::discover()?.unwrap_or_default();
//! let processor = DocumentProcessor::from_config(&config)?;
//! let result = processor.process_file("scan.png")?;
//! println!("{} ({:.2})", result.text, result.confidence);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod formats;
pub mod fusion;
pub mod io;
pub mod processor;

pub use config::{ClassifierConfig, OcrConfig, ProcessorConfig, QualityConfig};
pub use formats::{ImageFormat, SupportedFormat, resolve_file_type};
pub use fusion::fuse_confidence;
pub use processor::{DocumentProcessor, DocumentProcessorBuilder, ProcessingStage};
