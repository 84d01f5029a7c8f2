//! Prism Core - Scene snapshot types for the Prism ray tracer.
//!
//! This crate provides:
//!
//! - **Scene types**: `Scene`, `SceneObject`, `Material`, `PointLight`, `Camera`, `Mesh`
//! - **Render toggles**: `RenderSettings` and its enums
//! - **Scene files**: JSON scene loading and the built-in demo scene
//!
//! # Example
//!
//! ```ignore
//! use prism_core::load_scene;
//!
//! let loaded = load_scene("scene.json")?;
//! println!("Loaded {} objects, {} lights",
//!     loaded.scene.object_count(),
//!     loaded.scene.lights.len());
//! ```

pub mod camera;
pub mod demo;
pub mod loader;
pub mod mesh;
pub mod scene;
pub mod settings;

// Re-export commonly used types
pub use camera::Camera;
pub use demo::demo_scene;
pub use loader::{load_scene, load_scene_from_str, LoadError, LoadedScene};
pub use mesh::Mesh;
pub use scene::{
    Color, GeometryKind, Material, PointLight, Scene, SceneObject, Side, Transform,
    DEFAULT_SPHERE_RADIUS,
};
pub use settings::{Illumination, LightMode, RenderSettings, SphereIntersection};
