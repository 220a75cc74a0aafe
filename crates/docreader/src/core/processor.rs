//! Document processor: the pipeline entry point.
//!
//! A request moves through a fixed sequence of stages:
//!
//! ```text
//! Received -> Resolved -> Extracted -> Scored -> Fused -> Completed
//!     \           \            \
//!      `-----------`------------`--> Failed
//! ```
//!
//! - `Resolved`: the filename yielded a supported format. Unsupported tokens fail here,
//!   before any bytes are parsed.
//! - `Extracted`: the format extractor ran. Soft failures become an empty result.
//! - `Scored`: the text was scored for quality (skipped for empty text).
//! - `Fused`: format confidence and quality were fused.
//!
//! Every transition is logged at debug level.

use crate::core::config::{ProcessorConfig, QualityConfig};
use crate::core::formats::{SupportedFormat, resolve_file_type};
use crate::core::fusion::fuse_confidence;
use crate::core::io;
use crate::extractors::{
    DocxExtractor, Extraction, FormatExtractor, ImageExtractor, PdfExtractor, PlainTextExtractor,
};
use crate::plugins::{OcrBackend, TextClassifier};
use crate::text::QualityScorer;
use crate::types::{DocumentResult, ExtractionResult};
use crate::{DocReaderError, Result};
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

/// Pipeline stage of a single request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProcessingStage {
    Received,
    Resolved,
    Extracted,
    Scored,
    Fused,
    Completed,
    Failed,
}

impl ProcessingStage {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ProcessingStage::Completed | ProcessingStage::Failed)
    }

    fn can_advance_to(&self, next: ProcessingStage) -> bool {
        use ProcessingStage::*;
        match (self, next) {
            (Received | Resolved | Extracted, Failed) => true,
            (Received, Resolved) => true,
            (Resolved, Extracted) => true,
            // Empty text skips scoring.
            (Extracted, Scored | Fused) => true,
            (Scored, Fused) => true,
            (Fused, Completed) => true,
            _ => false,
        }
    }
}

impl fmt::Display for ProcessingStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProcessingStage::Received => "received",
            ProcessingStage::Resolved => "resolved",
            ProcessingStage::Extracted => "extracted",
            ProcessingStage::Scored => "scored",
            ProcessingStage::Fused => "fused",
            ProcessingStage::Completed => "completed",
            ProcessingStage::Failed => "failed",
        };
        f.write_str(name)
    }
}

#[derive(Debug)]
struct StageTracker {
    current: ProcessingStage,
}

impl StageTracker {
    fn new() -> Self {
        tracing::debug!(stage = %ProcessingStage::Received, "Document received");
        Self {
            current: ProcessingStage::Received,
        }
    }

    fn advance(&mut self, next: ProcessingStage) {
        debug_assert!(
            self.current.can_advance_to(next),
            "invalid stage transition {} -> {}",
            self.current,
            next
        );
        tracing::debug!(from = %self.current, to = %next, "Stage transition");
        self.current = next;
    }
}

/// Turns uploaded bytes into a [`DocumentResult`].
///
/// The processor is immutable after construction and can be shared between threads
/// behind an `Arc`. Engines are injected through [`DocumentProcessor::builder`] or built
/// from configuration with [`DocumentProcessor::from_config`].
///
/// # Example
///
/// ```rust
/// use docreader::DocumentProcessor;
///
/// let processor = DocumentProcessor::new();
/// let result = processor.process(b"  Hello world  ", Some("hello.txt"))?;
/// assert_eq!(result.text, "Hello world");
/// assert_eq!(result.file_type, "txt");
/// // No classifier: quality is neutral, fused with the UTF-8 confidence of 1.0.
/// assert_eq!(result.confidence, 0.75);
/// # Ok::<(), docreader::DocReaderError>(())
/// ```
#[derive(Debug, Clone)]
pub struct DocumentProcessor {
    image: ImageExtractor,
    pdf: PdfExtractor,
    docx: DocxExtractor,
    text: PlainTextExtractor,
    scorer: QualityScorer,
}

impl Default for DocumentProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentProcessor {
    /// A processor without OCR backend or classifier.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> DocumentProcessorBuilder {
        DocumentProcessorBuilder::default()
    }

    /// Build a processor and whichever engines are compiled in and configured.
    ///
    /// An engine that fails to load is logged and left out; the processor still works
    /// with degraded output for the affected formats.
    ///
    /// # Errors
    ///
    /// Returns `DocReaderError::Validation` when `config` is invalid.
    pub fn from_config(config: &ProcessorConfig) -> Result<Self> {
        config.validate()?;

        #[allow(unused_mut)]
        let mut builder = Self::builder().quality_config(config.quality.clone());

        #[cfg(feature = "ocr")]
        {
            match crate::ocr::TesseractBackend::new(&config.ocr) {
                Ok(backend) => builder = builder.ocr_backend(Arc::new(backend)),
                Err(e) => tracing::warn!(error = %e, "OCR engine unavailable, image uploads will yield empty text"),
            }
        }

        #[cfg(not(feature = "ocr"))]
        tracing::warn!("Built without the `ocr` feature, image uploads will yield empty text");

        if let Some(classifier_config) = &config.classifier {
            #[cfg(feature = "classifier")]
            {
                match crate::classifier::OnnxTextClassifier::new(classifier_config) {
                    Ok(classifier) => builder = builder.classifier(Arc::new(classifier)),
                    Err(e) => {
                        tracing::warn!(error = %e, "Text classifier could not be loaded, quality scores will be neutral")
                    }
                }
            }

            #[cfg(not(feature = "classifier"))]
            tracing::warn!(
                model = %classifier_config.model_path.display(),
                "Classifier configured but built without the `classifier` feature, quality scores will be neutral"
            );
        }

        Ok(builder.build())
    }

    pub fn has_ocr(&self) -> bool {
        self.image.has_backend()
    }

    pub fn has_classifier(&self) -> bool {
        self.scorer.has_classifier()
    }

    /// Process one upload.
    ///
    /// `filename` only decides the format; the bytes are never sniffed.
    ///
    /// # Errors
    ///
    /// - `DocReaderError::UnsupportedFormat` when the filename does not resolve to a
    ///   supported format (a client error).
    /// - `DocReaderError::ImageProcessing` when an image upload does not decode.
    ///
    /// Parse failures of PDF, DOCX and OCR are not errors: they produce an empty text
    /// with zero confidence.
    #[tracing::instrument(skip(self, content), fields(file_size = content.len()))]
    pub fn process(&self, content: &[u8], filename: Option<&str>) -> Result<DocumentResult> {
        let start = Instant::now();
        let mut tracker = StageTracker::new();

        let result = self.run(content, filename, start, &mut tracker);
        match &result {
            Ok(document) => {
                tracker.advance(ProcessingStage::Completed);
                tracing::debug!(
                    file_type = %document.file_type,
                    chars = document.text.chars().count(),
                    confidence = document.confidence,
                    "Document processed"
                );
            }
            Err(e) => {
                tracker.advance(ProcessingStage::Failed);
                if e.is_client_error() {
                    tracing::debug!(error = %e, "Document rejected");
                } else {
                    tracing::error!(error = %e, "Document processing failed");
                }
            }
        }
        result
    }

    /// Read a file and process it under its own filename.
    pub fn process_file(&self, path: impl AsRef<Path>) -> Result<DocumentResult> {
        let path = path.as_ref();
        io::validate_file_exists(path)?;
        let content = io::read_file_sync(path)?;
        self.process(&content, io::file_name(path))
    }

    /// Process on tokio's blocking pool.
    ///
    /// OCR and model inference are CPU bound; running them inline would stall the
    /// async executor.
    #[cfg(feature = "tokio-runtime")]
    pub async fn process_async(self: &Arc<Self>, content: Vec<u8>, filename: Option<String>) -> Result<DocumentResult> {
        let processor = Arc::clone(self);
        tokio::task::spawn_blocking(move || processor.process(&content, filename.as_deref()))
            .await
            .map_err(|e| DocReaderError::Other(format!("Processing task failed: {}", e)))?
    }

    /// Shut down the injected engines.
    ///
    /// Every engine is asked to shut down; failures are logged and do not stop the rest.
    pub fn shutdown(&self) {
        if let Some(backend) = self.image.backend()
            && let Err(e) = backend.shutdown()
        {
            tracing::warn!(backend = backend.name(), error = %e, "OCR backend failed to shut down");
        }
        if let Some(classifier) = self.scorer.classifier()
            && let Err(e) = classifier.shutdown()
        {
            tracing::warn!(classifier = classifier.name(), error = %e, "Text classifier failed to shut down");
        }
    }

    fn run(
        &self,
        content: &[u8],
        filename: Option<&str>,
        start: Instant,
        tracker: &mut StageTracker,
    ) -> Result<DocumentResult> {
        let file_type = resolve_file_type(filename);
        let format =
            SupportedFormat::from_file_type(&file_type).ok_or_else(|| DocReaderError::UnsupportedFormat(file_type.clone()))?;
        tracker.advance(ProcessingStage::Resolved);

        let extraction = self.extract(format, content)?;
        tracker.advance(ProcessingStage::Extracted);

        let quality = if extraction.text.is_empty() {
            None
        } else {
            let score = self.scorer.score(&extraction.text);
            tracker.advance(ProcessingStage::Scored);
            Some(score)
        };

        let confidence = fuse_confidence(extraction.confidence, quality);
        tracker.advance(ProcessingStage::Fused);

        Ok(DocumentResult {
            text: extraction.text,
            confidence,
            processing_time: start.elapsed().as_secs_f64(),
            file_type,
            file_size: content.len(),
        })
    }

    fn extract(&self, format: SupportedFormat, content: &[u8]) -> Result<ExtractionResult> {
        let extractor: &dyn FormatExtractor = match format {
            SupportedFormat::Image(_) => &self.image,
            SupportedFormat::Pdf => &self.pdf,
            SupportedFormat::Docx => &self.docx,
            SupportedFormat::Txt => &self.text,
        };

        let outcome: Extraction = extractor.extract(content)?;
        Ok(outcome.unwrap_or_else(|failure| {
            tracing::error!(error = %failure, "Extraction failed, returning empty result");
            ExtractionResult::empty()
        }))
    }
}

/// Builder for [`DocumentProcessor`].
#[derive(Default)]
pub struct DocumentProcessorBuilder {
    ocr_backend: Option<Arc<dyn OcrBackend>>,
    classifier: Option<Arc<dyn TextClassifier>>,
    quality: QualityConfig,
}

impl DocumentProcessorBuilder {
    pub fn ocr_backend(mut self, backend: Arc<dyn OcrBackend>) -> Self {
        self.ocr_backend = Some(backend);
        self
    }

    pub fn classifier(mut self, classifier: Arc<dyn TextClassifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    pub fn quality_config(mut self, quality: QualityConfig) -> Self {
        self.quality = quality;
        self
    }

    /// Initialize the engines and assemble the processor.
    ///
    /// An engine whose `initialize` fails is dropped with a warning.
    pub fn build(self) -> DocumentProcessor {
        let ocr_backend = self.ocr_backend.and_then(|backend| match backend.initialize() {
            Ok(()) => {
                tracing::debug!(backend = backend.name(), version = %backend.version(), "OCR backend ready");
                Some(backend)
            }
            Err(e) => {
                tracing::warn!(backend = backend.name(), error = %e, "OCR backend failed to initialize");
                None
            }
        });

        let classifier = self.classifier.and_then(|classifier| match classifier.initialize() {
            Ok(()) => {
                tracing::debug!(classifier = classifier.name(), version = %classifier.version(), "Text classifier ready");
                Some(classifier)
            }
            Err(e) => {
                tracing::warn!(classifier = classifier.name(), error = %e, "Text classifier failed to initialize");
                None
            }
        });

        DocumentProcessor {
            image: ImageExtractor::new(ocr_backend),
            pdf: PdfExtractor::new(),
            docx: DocxExtractor::new(),
            text: PlainTextExtractor::new(),
            scorer: QualityScorer::with_config(classifier, &self.quality),
        }
    }
}
