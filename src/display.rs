//! Optional on-screen display of the original and preprocessed images.
//!
//! Images are written to a temporary directory and handed to the platform's
//! default viewer. The run blocks until Enter is pressed, then the temporary
//! files are removed.

use crate::error::OcrError;
use image::{DynamicImage, GrayImage, ImageFormat};
use std::io::{BufRead, Write};
use std::path::Path;
use std::process::Command;

/// Something that can put an image file on screen
pub trait ImageViewer {
    fn open(&self, path: &Path) -> Result<(), OcrError>;
}

/// Opens files with `xdg-open`, `open` or `start`
pub struct SystemViewer;

impl ImageViewer for SystemViewer {
    fn open(&self, path: &Path) -> Result<(), OcrError> {
        if !has_graphical_session() {
            return Err(OcrError::DisplayError(
                "no graphical display available".to_string(),
            ));
        }

        let mut command = opener_command(path);
        tracing::debug!("Opening viewer: {:?}", command);

        let status = command
            .status()
            .map_err(|e| OcrError::DisplayError(format!("failed to launch viewer: {}", e)))?;

        if !status.success() {
            return Err(OcrError::DisplayError(format!(
                "viewer exited with {} for {}",
                status,
                path.display()
            )));
        }
        Ok(())
    }
}

#[cfg(target_os = "macos")]
fn opener_command(path: &Path) -> Command {
    let mut command = Command::new("open");
    command.arg(path);
    command
}

#[cfg(target_os = "windows")]
fn opener_command(path: &Path) -> Command {
    let mut command = Command::new("cmd");
    command.args(["/C", "start", ""]).arg(path);
    command
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn opener_command(path: &Path) -> Command {
    let mut command = Command::new("xdg-open");
    command.arg(path);
    command
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn has_graphical_session() -> bool {
    std::env::var_os("DISPLAY").is_some() || std::env::var_os("WAYLAND_DISPLAY").is_some()
}

#[cfg(any(target_os = "macos", target_os = "windows"))]
fn has_graphical_session() -> bool {
    true
}

/// Show both images, wait for Enter on `input`, then clean up
pub fn show_images<R: BufRead, W: Write + ?Sized>(
    viewer: &dyn ImageViewer,
    original: &DynamicImage,
    processed: &GrayImage,
    input: &mut R,
    out: &mut W,
) -> Result<(), OcrError> {
    let dir = tempfile::Builder::new()
        .prefix("img2text-view-")
        .tempdir()
        .map_err(|e| OcrError::DisplayError(format!("failed to create temp dir: {}", e)))?;

    let original_path = dir.path().join("original.png");
    let processed_path = dir.path().join("preprocessed.png");

    original
        .save_with_format(&original_path, ImageFormat::Png)
        .map_err(|e| OcrError::DisplayError(e.to_string()))?;
    processed
        .save_with_format(&processed_path, ImageFormat::Png)
        .map_err(|e| OcrError::DisplayError(e.to_string()))?;

    viewer.open(&original_path)?;
    viewer.open(&processed_path)?;

    write!(out, "Press Enter to close the image windows...")
        .and_then(|_| out.flush())
        .map_err(|e| OcrError::DisplayError(e.to_string()))?;

    let mut line = String::new();
    input
        .read_line(&mut line)
        .map_err(|e| OcrError::DisplayError(e.to_string()))?;
    writeln!(out).map_err(|e| OcrError::DisplayError(e.to_string()))?;

    // `dir` drops here and takes both files with it
    Ok(())
}
