use crate::engine::{OcrEngine, OcrResult};
use crate::error::OcrError;
use image::GrayImage;
use std::time::Instant;

/// Hands preprocessed rasters to an OCR engine.
///
/// An empty recognition is a successful result; engine problems come back as
/// [`OcrError::EngineUnavailable`] or [`OcrError::ProcessingError`].
pub struct TextExtractor {
    engine: Box<dyn OcrEngine>,
}

impl TextExtractor {
    pub fn new(engine: Box<dyn OcrEngine>) -> Self {
        Self { engine }
    }

    pub fn engine_name(&self) -> &'static str {
        self.engine.name()
    }

    /// Recognize text in `image`. `None` fails with [`OcrError::NoImage`]
    /// without touching the engine.
    pub fn extract(&self, image: Option<&GrayImage>) -> Result<OcrResult, OcrError> {
        let image = image.ok_or(OcrError::NoImage)?;

        let start = Instant::now();
        let result = self.engine.recognize(image)?;

        tracing::info!(
            "{} recognized {} chars in {}ms",
            self.engine.name(),
            result.text.chars().count(),
            start.elapsed().as_millis()
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct FakeEngine {
        calls: Arc<AtomicUsize>,
        outcome: fn() -> Result<OcrResult, OcrError>,
    }

    impl OcrEngine for FakeEngine {
        fn name(&self) -> &'static str {
            "fake"
        }

        fn recognize(&self, _image: &GrayImage) -> Result<OcrResult, OcrError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.outcome)()
        }
    }

    fn extractor(outcome: fn() -> Result<OcrResult, OcrError>) -> (TextExtractor, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let engine = FakeEngine {
            calls: calls.clone(),
            outcome,
        };
        (TextExtractor::new(Box::new(engine)), calls)
    }

    #[test]
    fn test_missing_image_skips_engine() {
        let (extractor, calls) = extractor(|| {
            Ok(OcrResult {
                text: "unused".to_string(),
                confidence: None,
            })
        });

        assert!(matches!(extractor.extract(None), Err(OcrError::NoImage)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_text_is_returned_verbatim() {
        let (extractor, calls) = extractor(|| {
            Ok(OcrResult {
                text: "TOTAL: $12.34\n\x0c".to_string(),
                confidence: Some(0.91),
            })
        });
        let img = GrayImage::from_pixel(8, 8, Luma([255]));

        let result = extractor.extract(Some(&img)).unwrap();

        assert_eq!(result.text, "TOTAL: $12.34\n\x0c");
        assert_eq!(result.confidence, Some(0.91));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_empty_recognition_is_success() {
        let (extractor, _) = extractor(|| {
            Ok(OcrResult {
                text: String::new(),
                confidence: None,
            })
        });
        let img = GrayImage::from_pixel(8, 8, Luma([255]));

        assert_eq!(extractor.extract(Some(&img)).unwrap().text, "");
    }

    #[test]
    fn test_engine_failure_is_distinguishable() {
        let (extractor, _) =
            extractor(|| Err(OcrError::EngineUnavailable("not on PATH".to_string())));
        let img = GrayImage::from_pixel(8, 8, Luma([255]));

        assert!(matches!(
            extractor.extract(Some(&img)),
            Err(OcrError::EngineUnavailable(_))
        ));
    }
}
