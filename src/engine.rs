use crate::error::OcrError;
use image::GrayImage;

/// OCR processing result
#[derive(Debug, Clone, PartialEq)]
pub struct OcrResult {
    /// Recognized text exactly as the engine returned it; may be empty
    pub text: String,
    /// Mean confidence in 0.0-1.0, when the engine reports one
    pub confidence: Option<f32>,
}

/// Trait that all OCR engines must implement
pub trait OcrEngine: Send + Sync {
    /// Returns the engine identifier (e.g., "tesseract", "leptess")
    fn name(&self) -> &'static str;

    /// Recognize text in a preprocessed single-channel raster
    fn recognize(&self, image: &GrayImage) -> Result<OcrResult, OcrError>;
}
