//! Bucket-based tile rendering.
//!
//! Divides the image into tiles (buckets) that can be rendered
//! independently and in parallel using rayon.

use prism_core::Color;

use crate::buffer::ImageBuffer;
use crate::renderer::Frame;

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// X coordinate of bucket's top-left corner
    pub x: u32,
    /// Y coordinate of bucket's top-left corner
    pub y: u32,
    /// Width of the bucket in pixels
    pub width: u32,
    /// Height of the bucket in pixels
    pub height: u32,
    /// Index of this bucket in the render order
    pub index: usize,
}

impl Bucket {
    /// Create a new bucket.
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
            index,
        }
    }

    /// Get the total number of pixels in this bucket.
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }

    /// Squared distance from the bucket's center to (cx, cy).
    fn distance_squared_to(&self, cx: f32, cy: f32) -> f32 {
        let x = self.x as f32 + self.width as f32 / 2.0;
        let y = self.y as f32 + self.height as f32 / 2.0;
        (x - cx).powi(2) + (y - cy).powi(2)
    }
}

/// Default bucket size in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 64;

/// Generate buckets for an image, sorted in spiral order from center.
///
/// A `bucket_size` of zero is treated as one.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let bucket_size = bucket_size.max(1);
    let mut buckets = Vec::new();
    let mut index = 0;

    let mut y = 0;
    while y < height {
        let mut x = 0;
        while x < width {
            let bw = bucket_size.min(width - x);
            let bh = bucket_size.min(height - y);
            buckets.push(Bucket::new(x, y, bw, bh, index));
            index += 1;
            x += bucket_size;
        }
        y += bucket_size;
    }

    sort_spiral(&mut buckets, width, height);

    for (i, bucket) in buckets.iter_mut().enumerate() {
        bucket.index = i;
    }

    buckets
}

/// Sort buckets by distance from image center (spiral order).
fn sort_spiral(buckets: &mut [Bucket], width: u32, height: u32) {
    let center_x = width as f32 / 2.0;
    let center_y = height as f32 / 2.0;

    buckets.sort_by(|a, b| {
        a.distance_squared_to(center_x, center_y)
            .total_cmp(&b.distance_squared_to(center_x, center_y))
    });
}

/// Render a single bucket.
///
/// Returns pixels in row-major order within the bucket; `None` marks a
/// pixel whose ray hit nothing.
pub fn render_bucket(bucket: &Bucket, frame: &Frame<'_>, width: u32, height: u32) -> BucketResult {
    let mut pixels = Vec::with_capacity(bucket.pixel_count() as usize);

    for local_y in 0..bucket.height {
        for local_x in 0..bucket.width {
            let global_x = bucket.x + local_x;
            let global_y = bucket.y + local_y;
            pixels.push(frame.trace_pixel(global_x, global_y, width, height));
        }
    }

    BucketResult::new(*bucket, pixels)
}

/// Result of rendering a bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    /// The bucket that was rendered
    pub bucket: Bucket,
    /// Pixel colors in row-major order
    pub pixels: Vec<Option<Color>>,
}

impl BucketResult {
    /// Create a new bucket result.
    pub fn new(bucket: Bucket, pixels: Vec<Option<Color>>) -> Self {
        Self { bucket, pixels }
    }

    /// Copy covered pixels into `image` as opaque. Returns the number of
    /// rejected writes.
    pub fn write_into(&self, image: &mut ImageBuffer) -> usize {
        let mut rejected = 0;
        let width = self.bucket.width.max(1) as usize;

        for (i, color) in self.pixels.iter().enumerate() {
            let Some(color) = color else { continue };
            let x = self.bucket.x + (i % width) as u32;
            let y = self.bucket.y + (i / width) as u32;

            if let Err(err) = image.set(x, y, *color, 1.0) {
                log::error!("Dropped write from bucket {}: {}", self.bucket.index, err);
                rejected += 1;
            }
        }

        rejected
    }
}
