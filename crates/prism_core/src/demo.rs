//! The built-in teaching scene.

use std::sync::Arc;

use prism_math::{Quat, Vec3};

use crate::camera::Camera;
use crate::mesh::Mesh;
use crate::scene::{Material, PointLight, Scene, SceneObject, Transform, DEFAULT_SPHERE_RADIUS};

/// Build the default scene: a floor and back wall, three small spheres, a
/// box, and three point lights.
pub fn demo_scene(aspect: f32) -> Scene {
    let camera = Camera::new(Vec3::new(0.0, 0.25, 2.0), Vec3::new(0.0, -0.1, 0.0), aspect);
    let mut scene = Scene::new("demo", camera);

    let specular = Vec3::splat(0.3);
    let floor = Arc::new(Material::phong("floor", Vec3::new(0.8, 0.8, 0.8), specular, 10.0));
    let wall = Arc::new(Material::phong("wall", Vec3::new(0.6, 0.7, 0.9), specular, 10.0));

    scene.add_object(SceneObject::plane(
        "floor",
        2.0,
        2.0,
        floor,
        Transform::from_translation(Vec3::new(0.0, -0.5, 0.0))
            .with_rotation(Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2)),
    ));
    scene.add_object(SceneObject::plane(
        "back_wall",
        2.0,
        2.0,
        wall,
        Transform::from_translation(Vec3::new(0.0, 0.5, -1.0)),
    ));

    let spheres = [
        ("red_sphere", Vec3::new(1.0, 0.1, 0.1), Vec3::new(-0.45, -0.5 + DEFAULT_SPHERE_RADIUS, 0.1)),
        ("green_sphere", Vec3::new(0.1, 0.9, 0.2), Vec3::new(0.0, -0.5 + DEFAULT_SPHERE_RADIUS, 0.35)),
        ("blue_sphere", Vec3::new(0.2, 0.3, 1.0), Vec3::new(0.45, -0.5 + DEFAULT_SPHERE_RADIUS, 0.1)),
    ];
    for (name, color, center) in spheres {
        let material = Arc::new(Material::phong(name, color, Vec3::ONE, 60.0));
        scene.add_object(SceneObject::sphere(name, DEFAULT_SPHERE_RADIUS, material, center));
    }

    let crate_material = Arc::new(Material::phong("box", Vec3::new(0.9, 0.7, 0.3), specular, 20.0));
    scene.add_object(SceneObject::mesh(
        "box",
        Arc::new(Mesh::cuboid(0.3, 0.3, 0.3)),
        crate_material,
        Transform::from_translation(Vec3::new(0.1, -0.35, -0.45))
            .with_rotation(Quat::from_rotation_y(0.5)),
    ));

    scene.add_light(PointLight::new(Vec3::new(0.6, 0.6, 0.9), 1.0));
    scene.add_light(PointLight::new(Vec3::new(-0.8, 0.4, 0.6), 0.6));
    scene.add_light(PointLight::new(Vec3::new(0.0, 0.9, -0.3), 0.4));

    log::debug!(
        "Built demo scene: {} objects, {} triangles, {} lights",
        scene.object_count(),
        scene.total_triangle_count(),
        scene.lights.len()
    );
    scene
}
