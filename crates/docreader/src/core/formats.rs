//! File type resolution.
//!
//! The resolver only looks at the filename. The token it returns is reported back in
//! [`crate::DocumentResult::file_type`] and decides which extractor runs. A token that
//! is not one of the known extensions is *unsupported*: it is never coerced into a
//! known format.
//!
//! # Example
//!
//! ```rust
//! use docreader::core::formats::{ImageFormat, SupportedFormat, resolve_file_type};
//!
//! let token = resolve_file_type(Some("Scan.JPEG"));
//! assert_eq!(token, "jpeg");
//! assert_eq!(SupportedFormat::from_file_type(&token), Some(SupportedFormat::Image(ImageFormat::Jpeg)));
//!
//! assert_eq!(resolve_file_type(Some("notes")), "");
//! assert_eq!(SupportedFormat::from_file_type(""), None);
//! ```

use std::fmt;

/// Extensions accepted for OCR.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff"];

/// Every extension the dispatcher accepts.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "pdf", "docx", "txt"];

/// Raster formats routed to the OCR extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Jpg,
    Jpeg,
    Png,
    Bmp,
    Tiff,
}

impl ImageFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Jpg => "jpg",
            ImageFormat::Jpeg => "jpeg",
            ImageFormat::Png => "png",
            ImageFormat::Bmp => "bmp",
            ImageFormat::Tiff => "tiff",
        }
    }
}

/// The closed set of formats the dispatcher can extract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SupportedFormat {
    Image(ImageFormat),
    Pdf,
    Docx,
    Txt,
}

impl SupportedFormat {
    /// Map a resolved file type token to a format.
    ///
    /// The token must already be lower-cased (as [`resolve_file_type`] returns it).
    /// Returns `None` for the empty token and for anything not in [`SUPPORTED_EXTENSIONS`].
    pub fn from_file_type(file_type: &str) -> Option<Self> {
        match file_type {
            "jpg" => Some(SupportedFormat::Image(ImageFormat::Jpg)),
            "jpeg" => Some(SupportedFormat::Image(ImageFormat::Jpeg)),
            "png" => Some(SupportedFormat::Image(ImageFormat::Png)),
            "bmp" => Some(SupportedFormat::Image(ImageFormat::Bmp)),
            "tiff" => Some(SupportedFormat::Image(ImageFormat::Tiff)),
            "pdf" => Some(SupportedFormat::Pdf),
            "docx" => Some(SupportedFormat::Docx),
            "txt" => Some(SupportedFormat::Txt),
            _ => None,
        }
    }

    /// Resolve a filename straight to a format.
    pub fn from_filename(filename: Option<&str>) -> Option<Self> {
        Self::from_file_type(&resolve_file_type(filename))
    }

    pub fn extension(&self) -> &'static str {
        match self {
            SupportedFormat::Image(image) => image.extension(),
            SupportedFormat::Pdf => "pdf",
            SupportedFormat::Docx => "docx",
            SupportedFormat::Txt => "txt",
        }
    }

    pub fn is_image(&self) -> bool {
        matches!(self, SupportedFormat::Image(_))
    }
}

impl fmt::Display for SupportedFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let family = match self {
            SupportedFormat::Image(_) => "image",
            SupportedFormat::Pdf => "pdf",
            SupportedFormat::Docx => "docx",
            SupportedFormat::Txt => "txt",
        };
        write!(f, "{}", family)
    }
}

/// Resolve the file type token of an upload.
///
/// Lower-cases the filename and returns everything after the last `.`. A missing
/// filename, or a filename without a `.`, yields the empty token.
pub fn resolve_file_type(filename: Option<&str>) -> String {
    let Some(filename) = filename else {
        return String::new();
    };

    let lowered = filename.to_lowercase();
    match lowered.rsplit_once('.') {
        Some((_, extension)) => extension.to_string(),
        None => String::new(),
    }
}
