//! Prism Renderer - CPU Blinn-Phong ray tracing.
//!
//! One primary ray per pixel against a read-only [`Scene`] snapshot:
//!
//! - **Intersection**: analytic spheres or the generic triangle path
//! - **Shading**: Blinn-Phong with point lights and optional hard shadows
//! - **Driver**: bucketed, parallel over rayon, spiral order from the center
//! - **Output**: RGBA8 [`ImageBuffer`], PNG export, cancel-and-restart sessions
//!
//! # Example
//!
//! ```ignore
//! use prism_core::{demo_scene, RenderSettings};
//! use prism_renderer::{render, save_png, RenderConfig};
//!
//! let scene = demo_scene(1.0);
//! let image = render(&scene, &RenderConfig::new(512, 512, RenderSettings::default()));
//! save_png(&image, "demo.png")?;
//! ```
//!
//! [`Scene`]: prism_core::Scene

pub mod bucket;
pub mod buffer;
pub mod export;
pub mod intersect;
pub mod ordering;
pub mod renderer;
pub mod session;
pub mod shading;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use buffer::{color_to_rgba, ImageBuffer, ImageError};
pub use export::{encode_png, save_png, ExportError, ExportResult};
pub use intersect::{cast, intersect, Intersection};
pub use ordering::order_objects;
pub use renderer::{camera_ray, pixel_to_ndc, render, render_with_cancel, Frame, RenderConfig};
pub use session::{PassTicket, RenderSession};
pub use shading::{shade, shade_hit, SHADOW_BIAS};
