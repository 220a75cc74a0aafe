//! Tesseract OCR backend (`ocr` feature).
//!
//! [`TesseractBackend`] implements [`crate::plugins::OcrBackend`] over the
//! `kreuzberg-tesseract` bindings. The engine is initialized once per backend and every
//! recognition call holds its lock, since a Tesseract handle is not re-entrant.

pub mod tessdata;
pub mod tesseract_backend;

pub use tessdata::{FALLBACK_TESSDATA_PATHS, resolve_tessdata_path, validate_languages};
pub use tesseract_backend::{ENGINE_MODE, PAGE_SEG_MODE, TesseractBackend, strip_control_characters};
