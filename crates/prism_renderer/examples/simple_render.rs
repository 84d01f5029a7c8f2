//! Simple ray tracer example.
//!
//! Builds a small scene in code and renders it once per illumination setup,
//! saving each pass as PNG.

use std::sync::Arc;

use prism_core::{
    Camera, Illumination, LightMode, Material, PointLight, RenderSettings, Scene, SceneObject,
    SphereIntersection, Transform,
};
use prism_math::{Quat, Vec3};
use prism_renderer::{render, save_png, RenderConfig};

fn main() {
    println!("Prism Ray Tracer - Simple Example");
    println!("=================================");

    let start = std::time::Instant::now();
    let scene = build_scene();
    println!("Scene built in {:?} ({} objects)", start.elapsed(), scene.object_count());

    let passes = [
        ("flat", RenderSettings {
            illumination: Illumination::Flat,
            ..Default::default()
        }),
        ("single_light", RenderSettings::default()),
        ("all_lights_shadows", RenderSettings {
            shadows: true,
            lights: LightMode::All,
            ..Default::default()
        }),
        ("generic_spheres", RenderSettings {
            shadows: true,
            lights: LightMode::All,
            spheres: SphereIntersection::Generic,
            ..Default::default()
        }),
    ];

    for (name, settings) in passes {
        let config = RenderConfig::new(640, 360, settings);
        println!("Rendering {} at {}x{}...", name, config.width, config.height);

        let start = std::time::Instant::now();
        let image = render(&scene, &config);
        println!("Rendered in {:?}", start.elapsed());

        let filename = format!("{name}.png");
        save_png(&image, &filename).expect("Failed to save image");
        println!("Saved to {}", filename);
    }
}

fn build_scene() -> Scene {
    let camera = Camera::new(Vec3::new(0.0, 1.5, 4.0), Vec3::new(0.0, 0.2, 0.0), 640.0 / 360.0);
    let mut scene = Scene::new("simple", camera);

    // Ground
    let ground = Arc::new(Material::phong("ground", Vec3::splat(0.5), Vec3::splat(0.1), 8.0));
    scene.add_object(SceneObject::plane(
        "ground",
        10.0,
        10.0,
        ground,
        Transform::default().with_rotation(Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2)),
    ));

    // A row of spheres from matte to glossy
    for i in 0..5 {
        let shininess = 4.0 * 3.0_f32.powi(i);
        let hue = i as f32 / 4.0;
        let material = Arc::new(Material::phong(
            format!("sphere_{i}"),
            Vec3::new(1.0 - hue, 0.3, hue),
            Vec3::ONE,
            shininess,
        ));
        let x = (i as f32 - 2.0) * 0.7;
        scene.add_object(SceneObject::sphere(format!("sphere_{i}"), 0.3, material, Vec3::new(x, 0.3, 0.0)));
    }

    scene.add_light(PointLight::new(Vec3::new(1.5, 2.5, 2.0), 6.0));
    scene.add_light(PointLight::new(Vec3::new(-2.0, 1.5, 1.0), 3.0));

    scene
}
