use crate::error::OcrError;
use image::{DynamicImage, GrayImage};
use serde::Serialize;
use std::time::Instant;

use super::steps;

/// Timing information for a single preprocessing step
#[derive(Debug, Clone, Serialize)]
pub struct StepTiming {
    pub name: String,
    pub time_ms: u64,
}

/// Result of preprocessing including timing stats
#[derive(Debug, Clone, Serialize)]
pub struct PreprocessingResult {
    /// Binary (0/255) raster, same size as the input (not serialized)
    #[serde(skip)]
    pub image: GrayImage,
    /// Total preprocessing time in milliseconds
    pub total_time_ms: u64,
    /// Individual step timings
    pub steps: Vec<StepTiming>,
}

/// Fixed grayscale → threshold → denoise pipeline.
///
/// Either every step succeeds and a binary raster comes back, or the whole run
/// fails; partial results are never returned.
#[derive(Debug, Default)]
pub struct Pipeline;

impl Pipeline {
    pub fn new() -> Self {
        Self
    }

    /// Process an image, calling `on_step` with a progress line after each step
    pub fn process(
        &self,
        image: DynamicImage,
        on_step: &mut dyn FnMut(&str),
    ) -> Result<PreprocessingResult, OcrError> {
        if image.width() == 0 || image.height() == 0 {
            return Err(OcrError::PreprocessingError(format!(
                "image has no pixels ({}x{})",
                image.width(),
                image.height()
            )));
        }

        let start = Instant::now();
        let mut steps_timing = Vec::new();

        let gray = run_step("grayscale", &mut steps_timing, || {
            steps::grayscale::apply(image)
        })?;
        on_step("Converted image to grayscale.");

        let binary = run_step("threshold", &mut steps_timing, || {
            steps::threshold::apply(&gray)
        })?;
        on_step("Applied adaptive thresholding.");

        let denoised = run_step("denoise", &mut steps_timing, || {
            steps::denoise::apply(&binary)
        })?;
        on_step("Applied median blur for denoising.");

        let total_time_ms = start.elapsed().as_millis() as u64;
        tracing::debug!("Preprocessing finished in {}ms: {:?}", total_time_ms, steps_timing);

        Ok(PreprocessingResult {
            image: denoised,
            total_time_ms,
            steps: steps_timing,
        })
    }
}

fn run_step<T, F>(name: &str, timings: &mut Vec<StepTiming>, step_fn: F) -> Result<T, OcrError>
where
    F: FnOnce() -> Result<T, OcrError>,
{
    let step_start = Instant::now();
    let result = step_fn()
        .map_err(|e| OcrError::PreprocessingError(format!("{} step failed: {}", name, e)))?;
    timings.push(StepTiming {
        name: name.to_string(),
        time_ms: step_start.elapsed().as_millis() as u64,
    });
    Ok(result)
}
