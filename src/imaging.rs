use std::io::Cursor;

use crate::common::errors::{Result, SweepError};
use crate::duplicates::model::Dimensions;

/// Known image extensions
const IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "bmp", "tiff", "tif", "webp", "heic", "heif",
];

/// Check if a storage key names an image, based on extension
pub fn is_image_name(path: &str) -> bool {
    path.rsplit('.')
        .next()
        .filter(|ext| *ext != path)
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Collaborator that turns raw image bytes into pixel dimensions.
/// The engine only needs width and height; full decoding stays behind
/// this seam so backends and tests can substitute their own probe.
pub trait ImageProbe: Sync {
    fn decode_dimensions(&self, path: &str, bytes: &[u8]) -> Result<Dimensions>;
}

/// Default probe over the `image` crate. Reads only as much of the
/// stream as format headers require.
#[derive(Debug, Default, Clone)]
pub struct StandardProbe;

impl ImageProbe for StandardProbe {
    fn decode_dimensions(&self, path: &str, bytes: &[u8]) -> Result<Dimensions> {
        let reader = image::ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| SweepError::DecodeError {
                path: path.to_string(),
                message: e.to_string(),
            })?;
        let (width, height) = reader
            .into_dimensions()
            .map_err(|e| SweepError::DecodeError {
                path: path.to_string(),
                message: e.to_string(),
            })?;
        Ok(Dimensions { width, height })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_image_name() {
        assert!(is_image_name("photos/cat.jpg"));
        assert!(is_image_name("CAT.JPEG"));
        assert!(is_image_name("x.webp"));
        assert!(!is_image_name("doc.txt"));
        assert!(!is_image_name("noextension"));
        assert!(!is_image_name("archive.tar.gz"));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let err = StandardProbe
            .decode_dimensions("bad.jpg", b"not an image at all")
            .unwrap_err();
        assert!(matches!(err, SweepError::DecodeError { .. }));
    }

    #[test]
    fn test_decode_png_dimensions() {
        let mut buf = Vec::new();
        let img = image::RgbImage::new(12, 7);
        img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();

        let dims = StandardProbe.decode_dimensions("ok.png", &buf).unwrap();
        assert_eq!((dims.width, dims.height), (12, 7));
    }
}
