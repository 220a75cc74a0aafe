//! Image OCR extractor.

use super::{Extraction, FormatExtractor, SoftFailure, mean_token_confidence};
use crate::Result;
use crate::error::DocReaderError;
use crate::image::{decode_image, preprocess};
use crate::plugins::OcrBackend;
use crate::types::ExtractionResult;
use std::sync::Arc;

/// Runs OCR over raster uploads.
///
/// The upload is decoded, binarized by [`preprocess`] and handed to the injected
/// [`OcrBackend`]. A decode failure aborts the request. Everything after decoding fails
/// soft, including the case where no backend is configured.
#[derive(Clone, Default)]
pub struct ImageExtractor {
    backend: Option<Arc<dyn OcrBackend>>,
}

impl ImageExtractor {
    pub fn new(backend: Option<Arc<dyn OcrBackend>>) -> Self {
        Self { backend }
    }

    pub fn has_backend(&self) -> bool {
        self.backend.is_some()
    }

    pub fn backend(&self) -> Option<&Arc<dyn OcrBackend>> {
        self.backend.as_ref()
    }
}

impl std::fmt::Debug for ImageExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageExtractor")
            .field("backend", &self.backend.as_ref().map(|b| b.name().to_string()))
            .finish()
    }
}

impl FormatExtractor for ImageExtractor {
    fn name(&self) -> &'static str {
        "image"
    }

    fn extract(&self, content: &[u8]) -> Result<Extraction> {
        let image = decode_image(content)?;
        let binary = preprocess(&image);

        let Some(backend) = &self.backend else {
            return Ok(Err(SoftFailure::new(
                self.name(),
                DocReaderError::MissingDependency("No OCR backend configured".to_string()),
            )));
        };

        let output = match backend.recognize(&binary) {
            Ok(output) => output,
            Err(e) => return Ok(Err(SoftFailure::new(self.name(), e))),
        };

        let confidence = mean_token_confidence(&output.token_confidences);
        tracing::debug!(
            backend = backend.name(),
            tokens = output.token_confidences.len(),
            confidence,
            "OCR completed"
        );

        Ok(Ok(ExtractionResult::new(output.text.trim(), confidence)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::{OcrOutput, Plugin};
    use image::{DynamicImage, GrayImage, Luma};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct RecordingOcr {
        calls: AtomicUsize,
        output: OcrOutput,
    }

    impl Plugin for RecordingOcr {
        fn name(&self) -> &str {
            "recording-ocr"
        }

        fn version(&self) -> String {
            "1.0.0".to_string()
        }
    }

    impl OcrBackend for RecordingOcr {
        fn recognize(&self, image: &GrayImage) -> Result<OcrOutput> {
            assert!(image.pixels().all(|p| p[0] == 0 || p[0] == 255));
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.output.clone())
        }
    }

    struct BrokenOcr;

    impl Plugin for BrokenOcr {
        fn name(&self) -> &str {
            "broken-ocr"
        }

        fn version(&self) -> String {
            "1.0.0".to_string()
        }
    }

    impl OcrBackend for BrokenOcr {
        fn recognize(&self, _image: &GrayImage) -> Result<OcrOutput> {
            Err(DocReaderError::ocr("tesseract exploded"))
        }
    }

    fn png_bytes() -> Vec<u8> {
        let image = GrayImage::from_fn(16, 16, |x, _| if x % 4 == 0 { Luma([0]) } else { Luma([255]) });
        let mut bytes = Vec::new();
        DynamicImage::ImageLuma8(image)
            .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_ocr_confidence_average() {
        let backend = Arc::new(RecordingOcr {
            calls: AtomicUsize::new(0),
            output: OcrOutput::new("  Invoice 42 \n", vec![80, 60, 0, -1]),
        });
        let extractor = ImageExtractor::new(Some(backend.clone()));

        let result = extractor.extract(&png_bytes()).unwrap().unwrap();
        assert_eq!(result.text, "Invoice 42");
        assert!((result.confidence - 0.7).abs() < 1e-12);
        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_ocr_error_is_soft() {
        let extractor = ImageExtractor::new(Some(Arc::new(BrokenOcr)));
        let failure = extractor.extract(&png_bytes()).unwrap().unwrap_err();
        assert!(matches!(failure.error, DocReaderError::Ocr { .. }));
    }

    #[test]
    fn test_missing_backend_is_soft() {
        let extractor = ImageExtractor::default();
        assert!(!extractor.has_backend());
        let failure = extractor.extract(&png_bytes()).unwrap().unwrap_err();
        assert!(matches!(failure.error, DocReaderError::MissingDependency(_)));
    }

    #[test]
    fn test_undecodable_image_is_hard_failure() {
        let extractor = ImageExtractor::new(Some(Arc::new(BrokenOcr)));
        let err = extractor.extract(b"\x89PNG but truncated").unwrap_err();
        assert!(matches!(err, DocReaderError::ImageProcessing { .. }));
    }
}
