use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OcrError {
    #[error("No image path provided.")]
    MissingPath,

    #[error("Image file not found at '{}'.", .0.display())]
    NotFound(PathBuf),

    #[error("Could not read image from '{}'. The file may be corrupt or in an unsupported format ({reason}).", .path.display())]
    Undecodable { path: PathBuf, reason: String },

    #[error("Failed to read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Preprocessing failed: {0}")]
    PreprocessingError(String),

    #[error("No image to process.")]
    NoImage,

    #[error("Tesseract is not installed or it's not in your PATH. Install Tesseract OCR and make sure the executable is reachable, or pass --tesseract-path ({0}).")]
    EngineUnavailable(String),

    #[error("Failed to initialize OCR engine: {0}")]
    #[allow(dead_code)]
    InitializationError(String),

    #[error("An error occurred during OCR: {0}")]
    ProcessingError(String),

    #[error("Could not display images: {0}")]
    DisplayError(String),

    #[error("Could not save preprocessed image: {0}")]
    SaveError(String),

    #[error("Failed to read input: {0}")]
    InputError(String),
}

/// Machine-readable form of an [`OcrError`], used in the JSON report
#[derive(Debug, Clone, Serialize)]
pub struct ErrorReport {
    pub error: String,
    pub code: String,
}

impl OcrError {
    /// Stable identifier for the error kind
    pub fn code(&self) -> &'static str {
        match self {
            OcrError::MissingPath => "MISSING_PATH",
            OcrError::NotFound(_) => "NOT_FOUND",
            OcrError::Undecodable { .. } => "UNDECODABLE",
            OcrError::Io { .. } => "IO_ERROR",
            OcrError::PreprocessingError(_) => "PREPROCESSING_ERROR",
            OcrError::NoImage => "NO_IMAGE",
            OcrError::EngineUnavailable(_) => "ENGINE_UNAVAILABLE",
            OcrError::InitializationError(_) => "INIT_ERROR",
            OcrError::ProcessingError(_) => "ENGINE_ERROR",
            OcrError::DisplayError(_) => "DISPLAY_ERROR",
            OcrError::SaveError(_) => "SAVE_ERROR",
            OcrError::InputError(_) => "INPUT_ERROR",
        }
    }

    pub fn report(&self) -> ErrorReport {
        ErrorReport {
            error: self.to_string(),
            code: self.code().to_string(),
        }
    }
}
