//! Ray tracing driver.
//!
//! One primary ray per pixel, nearest hit among shadeable objects, Blinn-Phong
//! shading at the hit. Buckets are traced in parallel with rayon and copied
//! into the frame buffer once every bucket has finished.

use std::time::Instant;

use prism_core::{Camera, Color, RenderSettings, Scene, SceneObject};
use prism_math::{Interval, Ray, Vec3};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::bucket::{generate_buckets, render_bucket, BucketResult, DEFAULT_BUCKET_SIZE};
use crate::buffer::ImageBuffer;
use crate::intersect::cast;
use crate::ordering::order_objects;
use crate::shading::shade_hit;

/// Render configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
    /// Bucket edge length in pixels
    pub bucket_size: u32,
    /// Per-pass toggles
    pub settings: RenderSettings,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 256,
            height: 256,
            bucket_size: DEFAULT_BUCKET_SIZE,
            settings: RenderSettings::default(),
        }
    }
}

impl RenderConfig {
    /// Create a config for a `width` x `height` pass.
    pub fn new(width: u32, height: u32, settings: RenderSettings) -> Self {
        Self {
            width,
            height,
            settings,
            ..Default::default()
        }
    }

    /// Set the bucket size.
    pub fn with_bucket_size(mut self, bucket_size: u32) -> Self {
        self.bucket_size = bucket_size;
        self
    }

    /// Width over height, or 1 for an empty image.
    pub fn aspect_ratio(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

/// Map a pixel to normalized device coordinates. Row 0 is the top (+1).
pub fn pixel_to_ndc(x: u32, y: u32, width: u32, height: u32) -> (f32, f32) {
    let ndc_x = (x as f32 / width as f32) * 2.0 - 1.0;
    let ndc_y = -(y as f32 / height as f32) * 2.0 + 1.0;
    (ndc_x, ndc_y)
}

/// Build the primary ray through an NDC point.
///
/// The point is unprojected through the inverse projection and the camera's
/// world matrix; the ray runs from the camera position towards it. Returns
/// `None` when the lens produces no usable direction.
pub fn camera_ray(camera: &Camera, ndc_x: f32, ndc_y: f32) -> Option<Ray> {
    let view_point = camera
        .projection_matrix()
        .inverse()
        .project_point3(Vec3::new(ndc_x, ndc_y, 0.5));
    let world_point = camera.world_matrix().transform_point3(view_point);

    Ray::new(camera.position, world_point - camera.position)
}

/// Everything a worker needs to trace pixels for one pass.
///
/// Borrowed read-only from the scene; shared across rayon workers.
pub struct Frame<'a> {
    scene: &'a Scene,
    settings: RenderSettings,
    /// All objects in pass order; shadow rays test these
    occluders: Vec<&'a SceneObject>,
    /// Objects with a material; primary rays test these
    shadeable: Vec<&'a SceneObject>,
}

impl<'a> Frame<'a> {
    /// Prepare a pass over `scene`.
    pub fn new(scene: &'a Scene, settings: RenderSettings) -> Self {
        let occluders = order_objects(&scene.objects, scene.camera.position);
        let shadeable = occluders
            .iter()
            .copied()
            .filter(|object| object.material.is_some())
            .collect();

        Self {
            scene,
            settings,
            occluders,
            shadeable,
        }
    }

    /// Trace one pixel. `None` means the primary ray hit nothing.
    pub fn trace_pixel(&self, x: u32, y: u32, width: u32, height: u32) -> Option<Color> {
        let (ndc_x, ndc_y) = pixel_to_ndc(x, y, width, height);
        let ray = camera_ray(&self.scene.camera, ndc_x, ndc_y)?;

        let hit = cast(
            &ray,
            self.shadeable.iter().copied(),
            self.settings.spheres,
            Interval::NON_NEGATIVE,
        )?;

        let color = shade_hit(
            &hit,
            &self.scene.lights,
            self.scene.camera.position,
            &self.settings,
            &self.occluders,
        );

        Some(if color.is_finite() { color } else { Color::ZERO })
    }
}

/// Render the entire scene to an image buffer.
pub fn render(scene: &Scene, config: &RenderConfig) -> ImageBuffer {
    render_with_cancel(scene, config, || false)
        .unwrap_or_else(|| ImageBuffer::new(config.width, config.height))
}

/// Render the scene, polling `is_cancelled` before each bucket.
///
/// Returns `None` if the pass was cancelled; the partial result is dropped.
pub fn render_with_cancel<F>(scene: &Scene, config: &RenderConfig, is_cancelled: F) -> Option<ImageBuffer>
where
    F: Fn() -> bool + Sync,
{
    let start = Instant::now();
    let (width, height) = (config.width, config.height);
    let mut image = ImageBuffer::new(width, height);

    let frame = Frame::new(scene, config.settings);
    let buckets = generate_buckets(width, height, config.bucket_size);

    log::debug!(
        "Rendering '{}' at {}x{}: {} buckets, {} objects, {} lights",
        scene.name,
        width,
        height,
        buckets.len(),
        scene.object_count(),
        scene.lights.len()
    );

    let results: Option<Vec<BucketResult>> = buckets
        .par_iter()
        .map(|bucket| {
            if is_cancelled() {
                None
            } else {
                Some(render_bucket(bucket, &frame, width, height))
            }
        })
        .collect();

    let Some(results) = results else {
        log::debug!("Render of '{}' cancelled", scene.name);
        return None;
    };

    let rejected: usize = results.iter().map(|result| result.write_into(&mut image)).sum();
    if rejected > 0 {
        log::warn!("{} pixel writes were rejected", rejected);
    }

    log::info!(
        "Rendered {}x{} in {:.2?} ({} pixels covered)",
        width,
        height,
        start.elapsed(),
        image.covered_pixels()
    );

    Some(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_core::{demo_scene, Illumination, Material, PointLight, SphereIntersection};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn single_sphere_scene(material: Material) -> Scene {
        let camera = Camera::new(Vec3::new(0.0, 0.0, 3.0), Vec3::ZERO, 1.0);
        let mut scene = Scene::new("ball", camera);
        scene.add_object(SceneObject::sphere("ball", 0.5, Arc::new(material), Vec3::ZERO));
        scene.add_light(PointLight::new(Vec3::new(0.0, 0.0, 3.0), 1.0));
        scene
    }

    #[test]
    fn test_pixel_to_ndc() {
        assert_eq!(pixel_to_ndc(0, 0, 100, 50), (-1.0, 1.0));
        assert_eq!(pixel_to_ndc(50, 25, 100, 50), (0.0, 0.0));
    }

    #[test]
    fn test_camera_ray_center_is_forward() {
        let camera = Camera::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(1.0, 2.0, -5.0), 1.5);
        let ray = camera_ray(&camera, 0.0, 0.0).unwrap();

        assert!((ray.origin() - camera.position).length() < 1e-6);
        assert!((ray.direction() - Vec3::NEG_Z).length() < 1e-4);
    }

    #[test]
    fn test_camera_ray_corners_follow_fov() {
        let camera = Camera::new(Vec3::ZERO, Vec3::NEG_Z, 1.0);
        let top = camera_ray(&camera, 0.0, 1.0).unwrap();

        // Top edge of the frustum sits at half the vertical fov
        let angle = top.direction().angle_between(Vec3::NEG_Z).to_degrees();
        assert!((angle - camera.fov_y / 2.0).abs() < 1e-2);
        assert!(top.direction().y > 0.0);
    }

    #[test]
    fn test_full_frame_completion() {
        let scene = demo_scene(1.0);
        let config = RenderConfig::new(48, 32, RenderSettings::default()).with_bucket_size(16);
        let image = render(&scene, &config);

        assert_eq!(image.dimensions(), (48, 32));
        assert_eq!(image.as_raw().len(), 48 * 32 * 4);
        // Every pixel is either untouched or opaque
        assert!(image.pixels().iter().all(|p| p[3] == 0 || p[3] == 255));
        assert!(image.covered_pixels() > 0);
    }

    #[test]
    fn test_miss_leaves_background() {
        let camera = Camera::new(Vec3::new(0.0, 0.0, 3.0), Vec3::ZERO, 1.0);
        let scene = Scene::new("empty", camera);
        let image = render(&scene, &RenderConfig::new(8, 8, RenderSettings::default()));

        assert_eq!(image.covered_pixels(), 0);
        assert!(image.as_raw().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_flat_sphere_center_pixel() {
        let scene = single_sphere_scene(Material::phong("red", Vec3::new(1.0, 0.0, 0.0), Vec3::ONE, 30.0));
        let settings = RenderSettings {
            illumination: Illumination::Flat,
            ..Default::default()
        };
        let image = render(&scene, &RenderConfig::new(16, 16, settings));

        assert_eq!(image.get(8, 8), Some([255, 0, 0, 255]));
        assert_eq!(image.get(0, 0), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_deterministic() {
        let scene = demo_scene(1.0);
        let settings = RenderSettings {
            shadows: true,
            ..Default::default()
        };
        let config = RenderConfig::new(40, 40, settings).with_bucket_size(7);

        let first = render(&scene, &config);
        let second = render(&scene, &config);
        assert_eq!(first, second);

        // Bucket layout does not change the image
        let third = render(&scene, &config.with_bucket_size(64));
        assert_eq!(first, third);
    }

    #[test]
    fn test_materialless_objects_not_shaded() {
        let mut scene = single_sphere_scene(Material::unlit("white", Vec3::ONE));
        scene.objects[0] = scene.objects[0].clone().without_material();
        let image = render(&scene, &RenderConfig::new(8, 8, RenderSettings::default()));

        assert_eq!(image.covered_pixels(), 0);
    }

    #[test]
    fn test_generic_spheres_cover_similar_area() {
        let scene = single_sphere_scene(Material::unlit("white", Vec3::ONE));
        let analytic = render(&scene, &RenderConfig::new(32, 32, RenderSettings::default()));
        let generic = render(
            &scene,
            &RenderConfig::new(
                32,
                32,
                RenderSettings {
                    spheres: SphereIntersection::Generic,
                    ..Default::default()
                },
            ),
        );

        let (a, g) = (analytic.covered_pixels() as i64, generic.covered_pixels() as i64);
        assert!(a > 0);
        assert!((a - g).abs() <= a / 10, "analytic {a} vs generic {g}");
    }

    #[test]
    fn test_cancelled_render_yields_nothing() {
        let scene = demo_scene(1.0);
        let config = RenderConfig::new(32, 32, RenderSettings::default());

        assert!(render_with_cancel(&scene, &config, || true).is_none());

        let polls = AtomicUsize::new(0);
        let image = render_with_cancel(&scene, &config.with_bucket_size(8), || {
            polls.fetch_add(1, Ordering::SeqCst);
            false
        });
        assert!(image.is_some());
        assert_eq!(polls.load(Ordering::SeqCst), 16);
    }

    #[test]
    fn test_config_from_json() {
        let config: RenderConfig =
            serde_json::from_str(r#"{ "width": 320, "settings": { "shadows": true } }"#).unwrap();

        assert_eq!(config.width, 320);
        assert_eq!(config.height, 256);
        assert_eq!(config.bucket_size, DEFAULT_BUCKET_SIZE);
        assert!(config.settings.shadows);
    }

    #[test]
    fn test_degenerate_lens_leaves_background() {
        let mut scene = single_sphere_scene(Material::unlit("white", Vec3::ONE));
        scene.camera = scene.camera.with_lens(179.9, 0.0, f32::INFINITY);

        let image = render(&scene, &RenderConfig::new(8, 8, RenderSettings::default()));

        assert_eq!(image.dimensions(), (8, 8));
        assert!(image.pixels().iter().all(|p| p[3] == 0 || p[3] == 255));
        assert!(image
            .pixels()
            .iter()
            .filter(|p| p[3] == 0)
            .all(|p| *p == [0, 0, 0, 0]));
    }

    #[test]
    fn test_non_finite_color_becomes_opaque_black() {
        let mut scene = single_sphere_scene(Material::phong("red", Vec3::new(1.0, 0.0, 0.0), Vec3::ONE, 30.0));
        scene.lights[0].intensity = f32::INFINITY;

        let image = render(&scene, &RenderConfig::new(16, 16, RenderSettings::default()));

        assert_eq!(image.get(8, 8), Some([0, 0, 0, 255]));
        assert_eq!(image.get(0, 0), Some([0, 0, 0, 0]));
    }
}
