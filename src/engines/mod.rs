//! OCR engine implementations
//!
//! This module contains implementations of the OcrEngine trait for different
//! OCR backends. The in-process engine is conditionally compiled behind the
//! `engine-leptess` feature flag.

pub mod tesseract;

#[cfg(feature = "engine-leptess")]
pub mod leptess;

use crate::config::{Config, EngineKind};
use crate::engine::OcrEngine;
use crate::error::OcrError;

/// Build the engine selected in `config`
pub fn create(config: &Config) -> Result<Box<dyn OcrEngine>, OcrError> {
    match config.engine {
        EngineKind::Tesseract => {
            tracing::debug!("Using tesseract executable {:?}", config.tesseract_path);
            Ok(Box::new(tesseract::TesseractEngine::new(config)))
        }
        #[cfg(feature = "engine-leptess")]
        EngineKind::Leptess => {
            tracing::info!("Initializing leptess engine...");
            Ok(Box::new(leptess::LeptessEngine::new(config)?))
        }
    }
}
