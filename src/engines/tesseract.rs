//! External Tesseract engine
//!
//! Runs the `tesseract` executable on a PNG copy of the raster and reads the
//! recognized text from its stdout. Nothing is linked, so a missing install only
//! shows up when the process fails to spawn.

use crate::config::Config;
use crate::engine::{OcrEngine, OcrResult};
use crate::error::OcrError;
use image::{GrayImage, ImageFormat};
use std::ffi::OsString;
use std::io::{Cursor, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::Command;

pub struct TesseractEngine {
    /// Executable to run
    binary: PathBuf,
    /// Optional --tessdata-dir
    tessdata_path: Option<String>,
    language: String,
    page_seg_mode: u8,
}

impl TesseractEngine {
    pub fn new(config: &Config) -> Self {
        Self {
            binary: config.tesseract_path.clone(),
            tessdata_path: config.tessdata_path.clone(),
            language: config.language.clone(),
            page_seg_mode: config.page_seg_mode,
        }
    }

    /// `tesseract <image> stdout -l <lang> --psm <mode> [--tessdata-dir <dir>]`
    fn command_args(&self, image_path: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            image_path.into(),
            "stdout".into(),
            "-l".into(),
            self.language.clone().into(),
            "--psm".into(),
            self.page_seg_mode.to_string().into(),
        ];
        if let Some(dir) = &self.tessdata_path {
            args.push("--tessdata-dir".into());
            args.push(dir.into());
        }
        args
    }
}

impl OcrEngine for TesseractEngine {
    fn name(&self) -> &'static str {
        "tesseract"
    }

    fn recognize(&self, image: &GrayImage) -> Result<OcrResult, OcrError> {
        // Encode in memory first, then hand tesseract a file it can sniff
        let mut png_data = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut png_data), ImageFormat::Png)
            .map_err(|e| OcrError::ProcessingError(format!("Failed to encode PNG: {}", e)))?;

        let mut file = tempfile::Builder::new()
            .prefix("img2text-")
            .suffix(".png")
            .tempfile()
            .map_err(|e| OcrError::ProcessingError(format!("Failed to create temp file: {}", e)))?;
        file.write_all(&png_data)
            .and_then(|_| file.flush())
            .map_err(|e| OcrError::ProcessingError(format!("Failed to write temp file: {}", e)))?;

        let args = self.command_args(file.path());
        tracing::debug!("Running {:?} {:?}", self.binary, args);

        let output = Command::new(&self.binary)
            .args(&args)
            .output()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound | ErrorKind::PermissionDenied => OcrError::EngineUnavailable(
                    format!("could not run {}: {}", self.binary.display(), e),
                ),
                _ => OcrError::ProcessingError(format!(
                    "Failed to run {}: {}",
                    self.binary.display(),
                    e
                )),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OcrError::ProcessingError(format!(
                "{} exited with {}: {}",
                self.binary.display(),
                output.status,
                stderr.trim()
            )));
        }

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        tracing::debug!("tesseract returned {} chars", text.chars().count());

        Ok(OcrResult {
            text,
            confidence: None,
        })
    }
}
