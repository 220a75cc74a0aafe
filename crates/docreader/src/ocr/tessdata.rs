//! Locating Tesseract language data.

use crate::{DocReaderError, Result};
use once_cell::sync::Lazy;
use std::env;
use std::path::{Path, PathBuf};

/// Install locations searched when neither the config nor `TESSDATA_PREFIX` name one.
pub const FALLBACK_TESSDATA_PATHS: &[&str] = &[
    "/opt/homebrew/share/tessdata",
    "/opt/homebrew/opt/tesseract/share/tessdata",
    "/usr/local/opt/tesseract/share/tessdata",
    "/usr/share/tesseract-ocr/5/tessdata",
    "/usr/share/tesseract-ocr/4/tessdata",
    "/usr/share/tessdata",
    "/usr/local/share/tessdata",
    r#"C:\Program Files\Tesseract-OCR\tessdata"#,
    r#"C:\ProgramData\Tesseract-OCR\tessdata"#,
];

static INSTALLED_TESSDATA: Lazy<Option<PathBuf>> = Lazy::new(|| {
    FALLBACK_TESSDATA_PATHS
        .iter()
        .map(Path::new)
        .find(|p| p.exists())
        .map(Path::to_path_buf)
});

/// Resolve the tessdata directory: explicit path, then `TESSDATA_PREFIX`, then the first
/// existing well-known install location.
///
/// Returns `None` when nothing is found; Tesseract then uses its compiled-in default.
pub fn resolve_tessdata_path(configured: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = configured {
        return Some(path.to_path_buf());
    }

    if let Ok(prefix) = env::var("TESSDATA_PREFIX")
        && !prefix.trim().is_empty()
    {
        return Some(PathBuf::from(prefix));
    }

    INSTALLED_TESSDATA.clone()
}

/// Check that every `+`-separated language has a traineddata file.
///
/// Tesseract can abort the process on a missing language file instead of reporting an
/// error, so this runs before `init`.
pub fn validate_languages(tessdata: &Path, language: &str) -> Result<()> {
    if language.trim().is_empty() {
        return Err(DocReaderError::ocr(
            "Language cannot be empty. Please specify a valid language code (e.g., 'eng')",
        ));
    }

    for lang in language.split('+').map(str::trim).filter(|l| !l.is_empty()) {
        let traineddata = tessdata.join(format!("{}.traineddata", lang));
        if !traineddata.exists() {
            return Err(DocReaderError::MissingDependency(format!(
                "Language '{}' not found. Traineddata file does not exist: {}",
                lang,
                traineddata.display()
            )));
        }
    }
    Ok(())
}
