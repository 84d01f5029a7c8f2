//! PNG export of finished frames.

use std::io::Cursor;
use std::path::Path;

use thiserror::Error;

use crate::buffer::ImageBuffer;

/// Errors that can occur while exporting an image.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Cannot export an empty {width}x{height} image")]
    Empty { width: u32, height: u32 },
}

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

fn to_rgba_image(buffer: &ImageBuffer) -> ExportResult<image::RgbaImage> {
    let (width, height) = buffer.dimensions();
    if width == 0 || height == 0 {
        return Err(ExportError::Empty { width, height });
    }

    image::RgbaImage::from_raw(width, height, buffer.as_raw().to_vec())
        .ok_or(ExportError::Empty { width, height })
}

/// Write `buffer` to `path` as a PNG file.
pub fn save_png(buffer: &ImageBuffer, path: impl AsRef<Path>) -> ExportResult<()> {
    let path = path.as_ref();
    to_rgba_image(buffer)?.save_with_format(path, image::ImageFormat::Png)?;

    log::info!("Wrote {}x{} PNG to {}", buffer.width(), buffer.height(), path.display());
    Ok(())
}

/// Encode `buffer` as PNG bytes.
pub fn encode_png(buffer: &ImageBuffer) -> ExportResult<Vec<u8>> {
    let mut bytes = Cursor::new(Vec::new());
    to_rgba_image(buffer)?.write_to(&mut bytes, image::ImageFormat::Png)?;
    Ok(bytes.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_math::Vec3;

    fn sample() -> ImageBuffer {
        let mut buffer = ImageBuffer::new(5, 3);
        buffer.set(0, 0, Vec3::new(1.0, 0.0, 0.0), 1.0).unwrap();
        buffer.set(4, 2, Vec3::new(0.0, 0.5, 1.0), 1.0).unwrap();
        buffer
    }

    #[test]
    fn test_encode_preserves_pixels() {
        let buffer = sample();
        let bytes = encode_png(&buffer).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();

        assert_eq!(decoded.dimensions(), (5, 3));
        assert_eq!(decoded.as_raw().as_slice(), buffer.as_raw());
    }

    #[test]
    fn test_save_png() {
        let path = std::env::temp_dir().join(format!("prism_export_{}.png", std::process::id()));
        save_png(&sample(), &path).unwrap();

        let decoded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (5, 3));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_empty_image_rejected() {
        let result = encode_png(&ImageBuffer::new(0, 4));
        assert!(matches!(result, Err(ExportError::Empty { width: 0, height: 4 })));
    }
}
