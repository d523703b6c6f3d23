use crate::error::OcrError;
use image::{DynamicImage, ImageReader};
use std::path::Path;

/// Decode the file at `path` into a 3-channel color raster.
///
/// The format is sniffed from the content, so a PNG saved as `.jpg` still loads.
pub fn load_image(path: &Path) -> Result<DynamicImage, OcrError> {
    if !path.exists() {
        return Err(OcrError::NotFound(path.to_path_buf()));
    }

    let reader = ImageReader::open(path)
        .map_err(|source| OcrError::Io {
            path: path.to_path_buf(),
            source,
        })?
        .with_guessed_format()
        .map_err(|source| OcrError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    // Decoders report empty or truncated files as io errors, so every decode
    // failure counts as undecodable content
    let image = reader.decode().map_err(|e| OcrError::Undecodable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    tracing::debug!(
        "Decoded {:?}: {}x{} {:?}",
        path,
        image.width(),
        image.height(),
        image.color()
    );

    Ok(DynamicImage::ImageRgb8(image.to_rgb8()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage};

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.png");

        match load_image(&path) {
            Err(OcrError::NotFound(p)) => assert_eq!(p, path),
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_text_file_is_undecodable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "TOTAL: $12.34\n").unwrap();

        assert!(matches!(
            load_image(&path),
            Err(OcrError::Undecodable { .. })
        ));
    }

    #[test]
    fn test_empty_file_is_undecodable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.png");
        std::fs::write(&path, b"").unwrap();

        assert!(matches!(
            load_image(&path),
            Err(OcrError::Undecodable { .. })
        ));
    }

    #[test]
    fn test_truncated_png_is_undecodable() {
        let dir = tempfile::tempdir().unwrap();
        let full = dir.path().join("full.png");
        RgbImage::from_pixel(32, 32, Rgb([200, 10, 10]))
            .save_with_format(&full, ImageFormat::Png)
            .unwrap();
        let bytes = std::fs::read(&full).unwrap();

        let path = dir.path().join("truncated.png");
        std::fs::write(&path, &bytes[..bytes.len() / 2]).unwrap();

        match load_image(&path) {
            Err(e @ OcrError::Undecodable { .. }) => {
                assert!(e.to_string().starts_with("Could not read image from"));
            }
            other => panic!("Expected Undecodable, got {:?}", other),
        }
    }

    #[test]
    fn test_loads_as_rgb_regardless_of_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("actually-png.jpg");
        RgbImage::from_pixel(12, 7, Rgb([10, 200, 30]))
            .save_with_format(&path, ImageFormat::Png)
            .unwrap();

        let image = load_image(&path).unwrap();
        assert_eq!((image.width(), image.height()), (12, 7));
        assert!(matches!(image, DynamicImage::ImageRgb8(_)));
    }
}
