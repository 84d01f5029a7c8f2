//! Render toggles consumed at the start of each pass.

use serde::{Deserialize, Serialize};

/// Which local illumination model the shader evaluates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Illumination {
    /// Return the material's base color untouched.
    Flat,
    /// Diffuse plus half-vector specular, attenuated by distance.
    #[default]
    BlinnPhong,
}

/// How sphere objects are intersected.
///
/// The two strategies give measurably different results at grazing angles:
/// the generic path traces the tessellated sphere mesh, the analytic path
/// solves the ray-sphere quadratic exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SphereIntersection {
    /// Closed-form projection method for spheres, polygons for the rest.
    #[default]
    Analytic,
    /// Every object, spheres included, goes through polygon intersection.
    Generic,
}

/// How many of the scene's lights contribute to a shaded point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightMode {
    /// Only the first light in the list.
    #[default]
    Single,
    /// Sum over every light in the list.
    All,
}

/// The four toggles that select the render path for a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Cast shadow rays toward each light
    pub shadows: bool,
    pub illumination: Illumination,
    pub spheres: SphereIntersection,
    pub lights: LightMode,
}
