//! Blinn-Phong local illumination.
//!
//! Direct lighting from point lights only: a diffuse lobe, a normalized
//! specular lobe and optional hard shadows. There is no ambient term and no
//! secondary bounce.

use prism_core::{Color, GeometryKind, Illumination, LightMode, PointLight, RenderSettings, SceneObject};
use prism_math::{Interval, Mat4Ext, Ray, Vec3};

use crate::intersect::{cast, Intersection};

/// Minimum distance a shadow ray must travel before a hit counts.
///
/// Keeps a surface from shadowing itself through float error in the hit point.
pub const SHADOW_BIAS: f32 = 1e-4;

/// Divisor of the specular normalization `shininess / 50`.
pub const SPECULAR_NORMALIZATION: f32 = 50.0;

/// Extra gain on the specular lobe.
pub const SPECULAR_BOOST: f32 = 4.0;

/// World-space surface normal at a hit, or zero if none is known.
///
/// Spheres use the direction from their center; polygons use the face
/// normal. Either is then taken through the object's world matrix as a
/// direction.
pub fn surface_normal(hit: &Intersection<'_>) -> Vec3 {
    let object = hit.object;
    let normal = match object.kind {
        GeometryKind::Sphere { .. } => (hit.point - object.world_position()).normalize_or_zero(),
        GeometryKind::Mesh | GeometryKind::Plane => hit.face_normal.unwrap_or(Vec3::ZERO),
    };
    object.world_matrix().transform_direction(normal)
}

/// Shade a hit for a single light.
///
/// Returns black for objects without a material and the diffuse color for
/// unlit materials.
pub fn shade(
    hit: &Intersection<'_>,
    light: &PointLight,
    camera_position: Vec3,
    settings: &RenderSettings,
    occluders: &[&SceneObject],
) -> Color {
    let Some(material) = hit.object.material.as_deref() else {
        return Color::ZERO;
    };
    let Some((specular_color, shininess)) = material.specular_terms() else {
        return material.diffuse_color;
    };

    let to_light = light.position - hit.point;
    let light_distance = to_light.length();
    let Some(light_dir) = to_light.try_normalize() else {
        return Color::ZERO;
    };

    if settings.shadows && in_shadow(hit.point, light_dir, light_distance, occluders, settings) {
        return Color::ZERO;
    }

    let normal = surface_normal(hit);
    let attenuation = 1.0 / (light_distance * light_distance);
    let scale = attenuation * light.intensity;

    let diffuse = normal.dot(light_dir).max(0.0);

    let view_dir = (camera_position - hit.point).normalize_or_zero();
    let halfway = (light_dir + view_dir).normalize_or_zero();
    let specular =
        normal.dot(halfway).max(0.0).powf(shininess) * shininess / SPECULAR_NORMALIZATION;

    material.diffuse_color * (diffuse * scale)
        + specular_color * (specular * scale * SPECULAR_BOOST)
}

/// Check whether anything sits between `point` and a light.
fn in_shadow(
    point: Vec3,
    light_dir: Vec3,
    light_distance: f32,
    occluders: &[&SceneObject],
    settings: &RenderSettings,
) -> bool {
    let Some(ray) = Ray::new(point, light_dir) else {
        return false;
    };

    cast(
        &ray,
        occluders.iter().copied(),
        settings.spheres,
        Interval::new(SHADOW_BIAS, f32::INFINITY),
    )
    .is_some_and(|blocker| blocker.distance < light_distance)
}

/// Shade a hit under the pass's illumination and light modes.
pub fn shade_hit(
    hit: &Intersection<'_>,
    lights: &[PointLight],
    camera_position: Vec3,
    settings: &RenderSettings,
    occluders: &[&SceneObject],
) -> Color {
    let Some(material) = hit.object.material.as_deref() else {
        return Color::ZERO;
    };

    if settings.illumination == Illumination::Flat || !material.is_lit() {
        return material.diffuse_color;
    }

    match settings.lights {
        LightMode::Single => lights.first().map_or(Color::ZERO, |light| {
            shade(hit, light, camera_position, settings, occluders)
        }),
        LightMode::All => lights
            .iter()
            .map(|light| shade(hit, light, camera_position, settings, occluders))
            .fold(Color::ZERO, |sum, color| sum + color),
    }
}
