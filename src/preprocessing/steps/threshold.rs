use crate::error::OcrError;
use image::{GrayImage, Luma};

/// Gaussian adaptive threshold parameters
pub const BLOCK_SIZE: u32 = 11;
pub const OFFSET: i32 = 2;

/// Apply Gaussian-weighted adaptive thresholding
/// Copes with uneven lighting where a single global cutoff would not
pub fn apply(image: &GrayImage) -> Result<GrayImage, OcrError> {
    gaussian_adaptive_threshold(image, BLOCK_SIZE, OFFSET)
}

/// Gaussian adaptive thresholding
///
/// For each pixel, threshold = gaussian_mean(block_size x block_size) - offset.
/// Pixels strictly above their threshold become 255, everything else 0.
pub fn gaussian_adaptive_threshold(
    img: &GrayImage,
    block_size: u32,
    offset: i32,
) -> Result<GrayImage, OcrError> {
    if block_size < 3 || block_size % 2 == 0 {
        return Err(OcrError::PreprocessingError(format!(
            "threshold block size must be odd and at least 3, got {}",
            block_size
        )));
    }

    let local_mean = gaussian_local_mean(img, block_size);

    Ok(GrayImage::from_fn(img.width(), img.height(), |x, y| {
        let pixel = img.get_pixel(x, y).0[0] as i32;
        let threshold = local_mean.get_pixel(x, y).0[0] as i32 - offset;
        if pixel > threshold {
            Luma([255u8])
        } else {
            Luma([0u8])
        }
    }))
}

/// Normalised 1-D Gaussian weights, sigma derived from the window size
fn gaussian_kernel(size: u32) -> Vec<f32> {
    let sigma = 0.3 * ((size as f32 - 1.0) * 0.5 - 1.0) + 0.8;
    let half = (size / 2) as i32;

    let weights: Vec<f32> = (-half..=half)
        .map(|i| (-((i * i) as f32) / (2.0 * sigma * sigma)).exp())
        .collect();
    let sum: f32 = weights.iter().sum();

    weights.into_iter().map(|w| w / sum).collect()
}

/// Separable Gaussian blur with replicated borders, rounded back to u8.
///
/// Not `imageproc::filter::separable_filter_equal`: that rounds to u8 between
/// the horizontal and vertical pass, this keeps the intermediate in f32.
fn gaussian_local_mean(img: &GrayImage, size: u32) -> GrayImage {
    let (width, height) = img.dimensions();
    let kernel = gaussian_kernel(size);
    let half = (size / 2) as i64;

    let clamp_x = |x: i64| x.clamp(0, width as i64 - 1) as u32;
    let clamp_y = |y: i64| y.clamp(0, height as i64 - 1) as u32;

    // Horizontal pass
    let mut horizontal = vec![0.0f32; (width * height) as usize];
    for y in 0..height {
        for x in 0..width {
            let acc: f32 = kernel
                .iter()
                .enumerate()
                .map(|(k, weight)| {
                    let sx = clamp_x(x as i64 + k as i64 - half);
                    weight * img.get_pixel(sx, y).0[0] as f32
                })
                .sum();
            horizontal[(y * width + x) as usize] = acc;
        }
    }

    // Vertical pass
    GrayImage::from_fn(width, height, |x, y| {
        let acc: f32 = kernel
            .iter()
            .enumerate()
            .map(|(k, weight)| {
                let sy = clamp_y(y as i64 + k as i64 - half);
                weight * horizontal[(sy * width + x) as usize]
            })
            .sum();
        Luma([acc.round().clamp(0.0, 255.0) as u8])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kernel_is_normalised_and_symmetric() {
        let kernel = gaussian_kernel(BLOCK_SIZE);
        assert_eq!(kernel.len(), 11);

        let sum: f32 = kernel.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);

        for i in 0..kernel.len() / 2 {
            assert!((kernel[i] - kernel[kernel.len() - 1 - i]).abs() < 1e-6);
        }
        // Peak in the middle
        assert!(kernel[5] > kernel[4]);
    }

    #[test]
    fn test_local_mean_matches_direct_weighted_sum() {
        let img = GrayImage::from_fn(23, 17, |x, y| Luma([((x * 37 + y * 91) % 256) as u8]));
        let kernel = gaussian_kernel(BLOCK_SIZE);
        let half = (BLOCK_SIZE / 2) as i64;

        let mean = gaussian_local_mean(&img, BLOCK_SIZE);

        for (x, y) in [(0u32, 0u32), (11, 8), (22, 16), (3, 14)] {
            let mut expected = 0.0f64;
            for (j, wy) in kernel.iter().enumerate() {
                for (i, wx) in kernel.iter().enumerate() {
                    let sx = (x as i64 + i as i64 - half).clamp(0, 22) as u32;
                    let sy = (y as i64 + j as i64 - half).clamp(0, 16) as u32;
                    expected += (*wx as f64) * (*wy as f64) * img.get_pixel(sx, sy).0[0] as f64;
                }
            }
            let got = mean.get_pixel(x, y).0[0] as f64;
            assert!(
                (got - expected).abs() <= 0.5 + 1e-3,
                "mean at ({}, {}) was {}, expected {:.3}",
                x,
                y,
                got,
                expected
            );
        }
    }

    #[test]
    fn test_threshold_binarizes_image() {
        let img = GrayImage::from_fn(50, 50, |x, _| Luma([(x as u8 * 5).min(255)]));

        let result = apply(&img).unwrap();

        for pixel in result.pixels() {
            assert!(
                pixel.0[0] == 0 || pixel.0[0] == 255,
                "Expected binary pixel, got {}",
                pixel.0[0]
            );
        }
    }

    #[test]
    fn test_uniform_image_turns_white() {
        // Every pixel sits `OFFSET` above its own local mean
        let img = GrayImage::from_pixel(30, 30, Luma([128]));

        let result = apply(&img).unwrap();

        assert!(result.pixels().all(|p| p.0[0] == 255));
    }

    #[test]
    fn test_threshold_handles_text_pattern() {
        // Dark text on light background
        let mut img = GrayImage::from_pixel(50, 20, Luma([240]));
        for x in 10..40 {
            img.put_pixel(x, 10, Luma([20]));
        }

        let result = apply(&img).unwrap();

        assert_eq!(result.get_pixel(25, 10).0[0], 0);
        assert_eq!(result.get_pixel(25, 5).0[0], 255);
    }

    #[test]
    fn test_threshold_adapts_to_uneven_lighting() {
        // Left half dim, right half bright, each with a dark stroke
        let mut img = GrayImage::from_fn(60, 20, |x, _| {
            if x < 30 {
                Luma([90])
            } else {
                Luma([220])
            }
        });
        for y in 8..12 {
            img.put_pixel(12, y, Luma([40]));
            img.put_pixel(48, y, Luma([150]));
        }

        let result = apply(&img).unwrap();

        // Strokes are black on both sides, backgrounds stay white
        assert_eq!(result.get_pixel(12, 10).0[0], 0);
        assert_eq!(result.get_pixel(48, 10).0[0], 0);
        assert_eq!(result.get_pixel(5, 2).0[0], 255);
        assert_eq!(result.get_pixel(55, 2).0[0], 255);
    }

    #[test]
    fn test_rejects_even_block_size() {
        let img = GrayImage::new(10, 10);
        assert!(matches!(
            gaussian_adaptive_threshold(&img, 10, OFFSET),
            Err(OcrError::PreprocessingError(_))
        ));
    }
}
