//! Native Tesseract OCR backend.

use crate::core::config::OcrConfig;
use crate::ocr::tessdata::{resolve_tessdata_path, validate_languages};
use crate::plugins::{OcrBackend, OcrOutput, Plugin};
use crate::{DocReaderError, Result};
use image::GrayImage;
use kreuzberg_tesseract::{TessPageSegMode, TesseractAPI};
use parking_lot::Mutex;

/// OCR engine mode passed to `Init`: default, resolved from the installed models.
pub const ENGINE_MODE: i32 = 3;

/// Page segmentation mode: assume a single uniform block of text.
pub const PAGE_SEG_MODE: i32 = 6;

/// Remove ASCII control characters other than newline, carriage return and tab.
pub fn strip_control_characters(text: &str) -> String {
    if text
        .chars()
        .any(|c| matches!(c, '\u{0000}'..='\u{001F}' | '\u{007F}') && !matches!(c, '\n' | '\r' | '\t'))
    {
        text.chars()
            .filter(|c| !matches!(c, '\u{0000}'..='\u{001F}' | '\u{007F}') || matches!(c, '\n' | '\r' | '\t'))
            .collect()
    } else {
        text.to_string()
    }
}

/// Tesseract backend.
///
/// Engine mode and page segmentation mode are fixed at [`ENGINE_MODE`] and
/// [`PAGE_SEG_MODE`].
///
/// # Thread Safety
///
/// One `TesseractAPI` handle is created at construction and kept behind a mutex. Calls
/// to [`OcrBackend::recognize`] are serialized.
pub struct TesseractBackend {
    api: Mutex<TesseractAPI>,
    language: String,
}

impl TesseractBackend {
    /// Initialize Tesseract for `config.language`.
    ///
    /// # Errors
    ///
    /// - `DocReaderError::MissingDependency` when a language file is missing.
    /// - `DocReaderError::Ocr` when Tesseract refuses the configuration.
    pub fn new(config: &OcrConfig) -> Result<Self> {
        let tessdata = resolve_tessdata_path(config.tessdata_path.as_deref());
        if let Some(path) = &tessdata {
            validate_languages(path, &config.language)?;
        }
        let tessdata = tessdata
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default();

        // The engine mode is init-only; it must be passed to Init, not set afterwards.
        let api = TesseractAPI::new();
        api.init_2(&tessdata, &config.language, ENGINE_MODE).map_err(|e| {
            DocReaderError::ocr(format!(
                "Failed to initialize language '{}': {}",
                config.language, e
            ))
        })?;

        api.set_page_seg_mode(TessPageSegMode::from_int(PAGE_SEG_MODE))
            .map_err(|e| DocReaderError::ocr(format!("Failed to set PSM mode: {}", e)))?;

        tracing::info!(
            language = %config.language,
            tessdata = %tessdata,
            version = %TesseractAPI::version(),
            "Tesseract initialized"
        );

        Ok(Self {
            api: Mutex::new(api),
            language: config.language.clone(),
        })
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Engine mode Tesseract reports after initialization.
    pub fn engine_mode(&self) -> Result<i32> {
        self.api
            .lock()
            .get_int_variable("tessedit_ocr_engine_mode")
            .map_err(|e| DocReaderError::ocr(format!("Failed to read engine mode: {}", e)))
    }
}

impl Plugin for TesseractBackend {
    fn name(&self) -> &str {
        "tesseract"
    }

    fn version(&self) -> String {
        TesseractAPI::version().to_string()
    }

    fn description(&self) -> &str {
        "Tesseract OCR (default engine mode, single block)"
    }
}

impl OcrBackend for TesseractBackend {
    fn recognize(&self, image: &GrayImage) -> Result<OcrOutput> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(DocReaderError::ocr("Image has zero width or height"));
        }

        let api = self.api.lock();

        api.set_image(image.as_raw(), width as i32, height as i32, 1, width as i32)
            .map_err(|e| DocReaderError::ocr(format!("Failed to set image: {}", e)))?;
        api.recognize()
            .map_err(|e| DocReaderError::ocr(format!("Failed to recognize text: {}", e)))?;

        let text = api
            .get_utf8_text()
            .map_err(|e| DocReaderError::ocr(format!("Failed to extract text: {}", e)))?;
        let token_confidences = api
            .get_word_confidences()
            .map_err(|e| DocReaderError::ocr(format!("Failed to read word confidences: {}", e)))?;

        Ok(OcrOutput {
            text: strip_control_characters(&text),
            token_confidences,
        })
    }
}
