//! JSON scene description loading.
//!
//! A scene file names the camera, the point lights and a flat list of
//! objects. Geometry is generated from a few parameters or given inline as
//! a triangle list:
//!
//! ```json
//! {
//!   "camera": { "position": [0, 0.2, 2], "target": [0, 0, 0] },
//!   "lights": [{ "position": [0.5, 0.8, 0.8], "intensity": 1.0 }],
//!   "objects": [
//!     { "kind": "sphere", "position": [0, 0, 0],
//!       "material": { "color": [1, 0, 0], "specular": [1, 1, 1], "shininess": 30 } }
//!   ],
//!   "settings": { "shadows": true }
//! }
//! ```

use std::path::Path;
use std::sync::Arc;

use prism_math::{EulerRot, Quat, Vec3};
use serde::Deserialize;
use thiserror::Error;

use crate::camera::Camera;
use crate::mesh::Mesh;
use crate::scene::{
    GeometryKind, Material, PointLight, Scene, SceneObject, Side, Transform,
    DEFAULT_SPHERE_RADIUS, SPHERE_HEIGHT_SEGMENTS, SPHERE_WIDTH_SEGMENTS,
};
use crate::settings::RenderSettings;

/// Errors that can occur while loading a scene file.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid object '{name}': {reason}")]
    InvalidObject { name: String, reason: String },

    #[error("Invalid camera: {0}")]
    InvalidCamera(String),
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// A parsed scene file.
#[derive(Clone, Debug)]
pub struct LoadedScene {
    pub scene: Scene,
    /// Settings stored in the file, if any
    pub settings: Option<RenderSettings>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct SceneFile {
    #[serde(default)]
    name: Option<String>,
    camera: CameraDesc,
    #[serde(default)]
    lights: Vec<LightDesc>,
    #[serde(default)]
    objects: Vec<ObjectDesc>,
    #[serde(default)]
    settings: Option<RenderSettings>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct CameraDesc {
    position: [f32; 3],
    #[serde(default)]
    target: [f32; 3],
    #[serde(default = "default_up")]
    up: [f32; 3],
    #[serde(default = "default_fov")]
    fov: f32,
    #[serde(default = "default_near")]
    near: f32,
    #[serde(default = "default_far")]
    far: f32,
    #[serde(default = "default_aspect")]
    aspect: f32,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct LightDesc {
    position: [f32; 3],
    #[serde(default = "default_intensity")]
    intensity: f32,
}

#[derive(Deserialize)]
struct ObjectDesc {
    #[serde(default)]
    name: Option<String>,
    #[serde(flatten)]
    geometry: GeometryDesc,
    #[serde(default)]
    material: Option<MaterialDesc>,
    #[serde(default)]
    position: [f32; 3],
    /// Euler angles in degrees, applied X then Y then Z
    #[serde(default)]
    rotation: [f32; 3],
    #[serde(default = "default_scale")]
    scale: [f32; 3],
}

#[derive(Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum GeometryDesc {
    Sphere {
        #[serde(default = "default_radius")]
        radius: f32,
    },
    Plane {
        width: f32,
        height: f32,
    },
    Box {
        width: f32,
        height: f32,
        depth: f32,
    },
    Mesh {
        positions: Vec<[f32; 3]>,
        indices: Vec<u32>,
    },
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct MaterialDesc {
    #[serde(default)]
    name: Option<String>,
    color: [f32; 3],
    #[serde(default)]
    specular: Option<[f32; 3]>,
    #[serde(default)]
    shininess: Option<f32>,
    #[serde(default)]
    side: Side,
}

fn default_up() -> [f32; 3] {
    [0.0, 1.0, 0.0]
}

fn default_fov() -> f32 {
    50.0
}

fn default_near() -> f32 {
    0.1
}

fn default_far() -> f32 {
    2000.0
}

fn default_aspect() -> f32 {
    1.0
}

fn default_intensity() -> f32 {
    1.0
}

fn default_radius() -> f32 {
    DEFAULT_SPHERE_RADIUS
}

fn default_scale() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

/// Load a scene file from disk.
///
/// The scene is named after the file stem unless the file sets `name`.
pub fn load_scene<P: AsRef<Path>>(path: P) -> LoadResult<LoadedScene> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let mut loaded = load_scene_from_str(&text)?;

    if loaded.scene.name.is_empty() {
        loaded.scene.name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unnamed")
            .to_string();
    }

    log::info!(
        "Loaded scene '{}' from {:?}: {} objects, {} lights",
        loaded.scene.name,
        path,
        loaded.scene.object_count(),
        loaded.scene.lights.len()
    );
    Ok(loaded)
}

/// Parse a scene from a JSON string.
pub fn load_scene_from_str(json: &str) -> LoadResult<LoadedScene> {
    let file: SceneFile = serde_json::from_str(json)?;

    let camera = build_camera(&file.camera)?;
    let mut scene = Scene::new(file.name.unwrap_or_default(), camera);

    for light in &file.lights {
        scene.add_light(PointLight::new(Vec3::from(light.position), light.intensity));
    }

    for (index, object) in file.objects.into_iter().enumerate() {
        scene.add_object(build_object(index, object)?);
    }

    Ok(LoadedScene {
        scene,
        settings: file.settings,
    })
}

fn build_camera(desc: &CameraDesc) -> LoadResult<Camera> {
    if !(desc.fov > 0.0 && desc.fov < 180.0) {
        return Err(LoadError::InvalidCamera(format!(
            "field of view {} outside (0, 180)",
            desc.fov
        )));
    }
    if !(desc.near > 0.0 && desc.far > desc.near) {
        return Err(LoadError::InvalidCamera(format!(
            "clip range [{}, {}] is empty",
            desc.near, desc.far
        )));
    }
    if !(desc.aspect > 0.0) {
        return Err(LoadError::InvalidCamera(format!(
            "aspect ratio {} must be positive",
            desc.aspect
        )));
    }

    Ok(Camera::look_at(
        Vec3::from(desc.position),
        Vec3::from(desc.target),
        Vec3::from(desc.up),
        desc.aspect,
    )
    .with_lens(desc.fov, desc.near, desc.far))
}

fn build_object(index: usize, desc: ObjectDesc) -> LoadResult<SceneObject> {
    let name = desc.name.unwrap_or_else(|| format!("object_{}", index));
    let invalid = |reason: String| LoadError::InvalidObject {
        name: name.clone(),
        reason,
    };

    let (kind, mesh) = match desc.geometry {
        GeometryDesc::Sphere { radius } => {
            if !(radius > 0.0) {
                return Err(invalid(format!("sphere radius {} must be positive", radius)));
            }
            (
                GeometryKind::Sphere { radius },
                Some(Mesh::uv_sphere(radius, SPHERE_WIDTH_SEGMENTS, SPHERE_HEIGHT_SEGMENTS)),
            )
        }
        GeometryDesc::Plane { width, height } => {
            (GeometryKind::Plane, Some(Mesh::plane(width, height)))
        }
        GeometryDesc::Box {
            width,
            height,
            depth,
        } => (GeometryKind::Mesh, Some(Mesh::cuboid(width, height, depth))),
        GeometryDesc::Mesh { positions, indices } => {
            (GeometryKind::Mesh, checked_mesh(&name, positions, indices))
        }
    };

    let material = match desc.material {
        Some(m) => {
            if matches!(m.shininess, Some(s) if !(s > 0.0)) {
                return Err(invalid("shininess must be positive".to_string()));
            }
            Some(Arc::new(Material {
                name: m.name.unwrap_or_else(|| name.clone()),
                diffuse_color: Vec3::from(m.color),
                specular_color: m.specular.map(Vec3::from),
                shininess: m.shininess,
                side: m.side,
            }))
        }
        None => {
            log::warn!("Object '{}' has no material and will only cast shadows", name);
            None
        }
    };

    let [rx, ry, rz] = desc.rotation;
    let transform = Transform::from_translation(Vec3::from(desc.position))
        .with_rotation(Quat::from_euler(
            EulerRot::XYZ,
            rx.to_radians(),
            ry.to_radians(),
            rz.to_radians(),
        ))
        .with_scale(Vec3::from(desc.scale));

    Ok(SceneObject::new(
        name,
        kind,
        mesh.map(Arc::new),
        material,
        transform,
    ))
}

/// Build an inline mesh, dropping it with a warning if its triangles are malformed.
fn checked_mesh(name: &str, positions: Vec<[f32; 3]>, indices: Vec<u32>) -> Option<Mesh> {
    if indices.len() % 3 != 0 {
        log::warn!(
            "Mesh '{}' has {} indices, not a whole number of triangles; skipping its geometry",
            name,
            indices.len()
        );
        return None;
    }

    let mesh = Mesh::new(positions.into_iter().map(Vec3::from).collect(), indices);
    if let Some(bad) = mesh.invalid_index() {
        log::warn!(
            "Mesh '{}' index {} is out of range for {} vertices; skipping its geometry",
            name,
            bad,
            mesh.vertex_count()
        );
        return None;
    }
    Some(mesh)
}
