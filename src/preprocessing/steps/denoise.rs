use crate::error::OcrError;
use image::GrayImage;
use imageproc::filter::median_filter;

/// Median neighborhood radius; 1 gives a 3x3 window
pub const MEDIAN_RADIUS: u32 = 1;

/// Apply median filter to remove isolated speckles left by binarization
pub fn apply(image: &GrayImage) -> Result<GrayImage, OcrError> {
    Ok(median_filter(image, MEDIAN_RADIUS, MEDIAN_RADIUS))
}
