use crate::error::OcrError;
use image::{DynamicImage, GrayImage};

/// Convert a color raster to single-channel luminance
pub fn apply(image: DynamicImage) -> Result<GrayImage, OcrError> {
    Ok(image.to_luma8())
}
