//! RGBA8 frame buffer.

use prism_core::Color;
use thiserror::Error;

/// Errors from writing into an [`ImageBuffer`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
    #[error("Pixel ({x}, {y}) is outside the {width}x{height} image")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
}

/// Clamp a value to [0, 1] range.
#[inline]
pub fn clamp_01(x: f32) -> f32 {
    x.clamp(0.0, 1.0)
}

/// Quantize one channel to 8 bits. Non-finite input maps to 0.
#[inline]
pub fn quantize(channel: f32) -> u8 {
    if channel.is_finite() {
        (clamp_01(channel) * 255.0).round() as u8
    } else {
        0
    }
}

/// Convert a color and alpha to 8-bit RGBA.
pub fn color_to_rgba(color: Color, alpha: f32) -> [u8; 4] {
    [
        quantize(color.x),
        quantize(color.y),
        quantize(color.z),
        quantize(alpha),
    ]
}

/// Row-major RGBA8 image, initialized fully transparent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageBuffer {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 4]>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with transparent black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0; 4]; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)` in pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    /// Write the pixel at (x, y). Last write wins; nothing is blended.
    pub fn set(&mut self, x: u32, y: u32, color: Color, alpha: f32) -> Result<(), ImageError> {
        let index = self.index(x, y).ok_or(ImageError::OutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        })?;
        self.pixels[index] = color_to_rgba(color, alpha);
        Ok(())
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// All pixels, row-major.
    pub fn pixels(&self) -> &[[u8; 4]] {
        &self.pixels
    }

    /// Raw RGBA bytes, row-major, 4 bytes per pixel.
    pub fn as_raw(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Number of pixels with non-zero alpha.
    pub fn covered_pixels(&self) -> usize {
        self.pixels.iter().filter(|p| p[3] != 0).count()
    }
}
