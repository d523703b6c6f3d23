use crate::Args;
use clap::ValueEnum;
use std::path::PathBuf;

/// Tesseract language code used for every run
pub const OCR_LANGUAGE: &str = "eng";

/// Tesseract page segmentation mode 6: assume a single uniform block of text
pub const PAGE_SEG_MODE_SINGLE_BLOCK: u8 = 6;

/// Default executable name for the external engine
pub const DEFAULT_TESSERACT_COMMAND: &str = "tesseract";

/// Available OCR backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum EngineKind {
    /// Run the tesseract executable
    #[default]
    Tesseract,
    /// Statically linked Tesseract, in process
    #[cfg(feature = "engine-leptess")]
    Leptess,
}

/// Run configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub engine: EngineKind,
    pub tesseract_path: PathBuf,
    pub tessdata_path: Option<String>,
    pub language: String,
    pub page_seg_mode: u8,
    pub show_images: bool,
    pub save_preprocessed: Option<PathBuf>,
    pub json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            engine: EngineKind::default(),
            tesseract_path: PathBuf::from(DEFAULT_TESSERACT_COMMAND),
            tessdata_path: None,
            language: OCR_LANGUAGE.to_string(),
            page_seg_mode: PAGE_SEG_MODE_SINGLE_BLOCK,
            show_images: false,
            save_preprocessed: None,
            json: false,
        }
    }
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Self {
            engine: args.engine,
            tesseract_path: args.tesseract_path,
            tessdata_path: args.tessdata_path,
            language: OCR_LANGUAGE.to_string(),
            page_seg_mode: PAGE_SEG_MODE_SINGLE_BLOCK,
            show_images: args.show,
            save_preprocessed: args.save_preprocessed,
            json: args.json,
        }
    }
}
