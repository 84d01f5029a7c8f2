//! Scene snapshot types for Prism.
//!
//! Everything here is plain read-only data handed to the renderer for the
//! duration of one pass. The renderer never mutates a scene.

use std::sync::Arc;

use prism_math::{Mat4, Mat4Ext, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::camera::Camera;
use crate::mesh::Mesh;

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// Radius of the teaching scene's spheres, in scene units.
pub const DEFAULT_SPHERE_RADIUS: f32 = 1.0 / 6.0;

/// Segments used when tessellating spheres for the generic intersector.
pub const SPHERE_WIDTH_SEGMENTS: u32 = 32;
pub const SPHERE_HEIGHT_SEGMENTS: u32 = 16;

/// Which triangle faces the polygon intersector accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// Counter-clockwise faces only
    #[default]
    Front,
    /// Clockwise faces only
    Back,
    /// Both windings
    Double,
}

/// A surface material for the local illumination model.
///
/// A material without both a specular color and a shininess exponent is
/// unlit: the shader returns its diffuse color as-is.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    /// Material name
    pub name: String,

    /// Diffuse/base color (RGB, 0-1)
    pub diffuse_color: Color,

    /// Specular color (RGB, 0-1)
    pub specular_color: Option<Color>,

    /// Specular exponent, must be positive
    pub shininess: Option<f32>,

    /// Faces visible to rays
    pub side: Side,
}

impl Material {
    /// Create an unlit material that always shades to `diffuse_color`.
    pub fn unlit(name: impl Into<String>, diffuse_color: Color) -> Self {
        Self {
            name: name.into(),
            diffuse_color,
            specular_color: None,
            shininess: None,
            side: Side::Front,
        }
    }

    /// Create a Blinn-Phong material.
    pub fn phong(
        name: impl Into<String>,
        diffuse_color: Color,
        specular_color: Color,
        shininess: f32,
    ) -> Self {
        Self {
            specular_color: Some(specular_color),
            shininess: Some(shininess),
            ..Self::unlit(name, diffuse_color)
        }
    }

    /// Set which faces are visible.
    pub fn with_side(mut self, side: Side) -> Self {
        self.side = side;
        self
    }

    /// Specular color and exponent, or `None` for unlit materials.
    pub fn specular_terms(&self) -> Option<(Color, f32)> {
        match (self.specular_color, self.shininess) {
            (Some(color), Some(shininess)) if shininess > 0.0 => Some((color, shininess)),
            _ => None,
        }
    }

    /// Check if this material takes part in lighting.
    pub fn is_lit(&self) -> bool {
        self.specular_terms().is_some()
    }
}

/// Transform components that can be composed into a matrix.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    /// Translation
    pub translation: Vec3,

    /// Rotation (as quaternion)
    pub rotation: Quat,

    /// Scale
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Create a new transform with only translation.
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Default::default()
        }
    }

    /// Set the rotation.
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Set the scale.
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Convert to a 4x4 transformation matrix.
    ///
    /// Order: Scale -> Rotate -> Translate (SRT)
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

/// Geometry tag of a scene object.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GeometryKind {
    /// Sphere centered on the object's origin
    Sphere { radius: f32 },
    /// Arbitrary triangle mesh
    Mesh,
    /// Flat backdrop quad, exempt from distance ordering
    Plane,
}

/// One object of the scene snapshot.
///
/// `mesh` is the polygonal form used by the generic intersector; it is
/// `None` for malformed objects, which are then never hit by that path.
/// An object without a material is never shaded but may still cast shadows.
#[derive(Clone, Debug)]
pub struct SceneObject {
    pub name: String,
    pub kind: GeometryKind,
    pub mesh: Option<Arc<Mesh>>,
    pub material: Option<Arc<Material>>,
    pub transform: Transform,
}

impl SceneObject {
    /// Create an object from its parts.
    pub fn new(
        name: impl Into<String>,
        kind: GeometryKind,
        mesh: Option<Arc<Mesh>>,
        material: Option<Arc<Material>>,
        transform: Transform,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            mesh,
            material,
            transform,
        }
    }

    /// Create a sphere with a tessellated mesh for the generic path.
    pub fn sphere(
        name: impl Into<String>,
        radius: f32,
        material: Arc<Material>,
        center: Vec3,
    ) -> Self {
        let mesh = Mesh::uv_sphere(radius, SPHERE_WIDTH_SEGMENTS, SPHERE_HEIGHT_SEGMENTS);
        Self::new(
            name,
            GeometryKind::Sphere { radius },
            Some(Arc::new(mesh)),
            Some(material),
            Transform::from_translation(center),
        )
    }

    /// Create a backdrop plane.
    pub fn plane(
        name: impl Into<String>,
        width: f32,
        height: f32,
        material: Arc<Material>,
        transform: Transform,
    ) -> Self {
        Self::new(
            name,
            GeometryKind::Plane,
            Some(Arc::new(Mesh::plane(width, height))),
            Some(material),
            transform,
        )
    }

    /// Create a generic mesh object.
    pub fn mesh(
        name: impl Into<String>,
        mesh: Arc<Mesh>,
        material: Arc<Material>,
        transform: Transform,
    ) -> Self {
        Self::new(name, GeometryKind::Mesh, Some(mesh), Some(material), transform)
    }

    /// Drop the material, leaving a shadow-only occluder.
    pub fn without_material(mut self) -> Self {
        self.material = None;
        self
    }

    /// Get the object-to-world matrix.
    pub fn world_matrix(&self) -> Mat4 {
        self.transform.to_matrix()
    }

    /// World-space position of the object's origin (a sphere's center).
    pub fn world_position(&self) -> Vec3 {
        self.transform.translation
    }

    /// World-space sphere radius, or `None` for non-spheres.
    ///
    /// Non-uniform scale is approximated by the largest axis scale.
    pub fn world_radius(&self) -> Option<f32> {
        match self.kind {
            GeometryKind::Sphere { radius } => Some(radius * self.world_matrix().max_scale()),
            _ => None,
        }
    }

    /// Check if this object is backdrop geometry.
    pub fn is_plane(&self) -> bool {
        matches!(self.kind, GeometryKind::Plane)
    }
}

/// A point light.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    /// World-space position
    pub position: Vec3,
    /// Scalar intensity
    pub intensity: f32,
}

impl PointLight {
    /// Create a new point light.
    pub fn new(position: Vec3, intensity: f32) -> Self {
        Self {
            position,
            intensity,
        }
    }
}

/// A complete scene snapshot: objects, lights and the camera.
#[derive(Clone, Debug)]
pub struct Scene {
    /// Scene name (usually from filename)
    pub name: String,

    /// Objects in authoring order
    pub objects: Vec<SceneObject>,

    /// Point lights; `LightMode::Single` uses the first
    pub lights: Vec<PointLight>,

    pub camera: Camera,
}

impl Scene {
    /// Create an empty scene viewed through `camera`.
    pub fn new(name: impl Into<String>, camera: Camera) -> Self {
        Self {
            name: name.into(),
            objects: Vec::new(),
            lights: Vec::new(),
            camera,
        }
    }

    /// Add an object to the scene.
    pub fn add_object(&mut self, object: SceneObject) {
        self.objects.push(object);
    }

    /// Add a light to the scene.
    pub fn add_light(&mut self, light: PointLight) {
        self.lights.push(light);
    }

    /// Get total object count.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Get total triangle count across all object meshes.
    pub fn total_triangle_count(&self) -> usize {
        self.objects
            .iter()
            .filter_map(|object| object.mesh.as_ref())
            .map(|mesh| mesh.triangle_count())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grey() -> Arc<Material> {
        Arc::new(Material::phong("grey", Vec3::splat(0.5), Vec3::ONE, 30.0))
    }

    #[test]
    fn test_scene_creation() {
        let camera = Camera::new(Vec3::new(0.0, 0.0, 2.0), Vec3::ZERO, 1.0);
        let mut scene = Scene::new("test", camera);

        scene.add_object(SceneObject::sphere("ball", 0.5, grey(), Vec3::ZERO));
        scene.add_object(SceneObject::plane(
            "floor",
            4.0,
            4.0,
            grey(),
            Transform::default(),
        ));
        scene.add_light(PointLight::new(Vec3::ONE, 1.0));

        assert_eq!(scene.object_count(), 2);
        assert_eq!(scene.lights.len(), 1);
        assert_eq!(
            scene.total_triangle_count(),
            Mesh::uv_sphere(0.5, SPHERE_WIDTH_SEGMENTS, SPHERE_HEIGHT_SEGMENTS).triangle_count() + 2
        );
    }

    #[test]
    fn test_material_lighting_terms() {
        let lit = Material::phong("lit", Vec3::ONE, Vec3::splat(0.2), 30.0);
        assert_eq!(lit.specular_terms(), Some((Vec3::splat(0.2), 30.0)));
        assert!(lit.is_lit());

        let flat = Material::unlit("flat", Vec3::X);
        assert!(!flat.is_lit());

        // Shininess must be positive to count as lit
        let broken = Material::phong("broken", Vec3::ONE, Vec3::ONE, 0.0);
        assert!(!broken.is_lit());
    }

    #[test]
    fn test_world_radius_follows_scale() {
        let mut ball = SceneObject::sphere("ball", DEFAULT_SPHERE_RADIUS, grey(), Vec3::X);
        assert!((ball.world_radius().unwrap() - DEFAULT_SPHERE_RADIUS).abs() < 1e-6);

        ball.transform = ball.transform.with_scale(Vec3::splat(3.0));
        assert!((ball.world_radius().unwrap() - 0.5).abs() < 1e-5);
        assert_eq!(ball.world_position(), Vec3::X);

        let floor = SceneObject::plane("floor", 1.0, 1.0, grey(), Transform::default());
        assert!(floor.world_radius().is_none());
        assert!(floor.is_plane());
    }

    #[test]
    fn test_transform_matrix_order() {
        let transform = Transform::from_translation(Vec3::new(1.0, 2.0, 3.0))
            .with_rotation(Quat::from_rotation_y(std::f32::consts::FRAC_PI_2))
            .with_scale(Vec3::splat(2.0));

        // Scale, then rotate +X onto -Z, then translate
        let p = transform.to_matrix().transform_point3(Vec3::X);
        assert!((p - Vec3::new(1.0, 2.0, 1.0)).length() < 1e-5);
    }
}
