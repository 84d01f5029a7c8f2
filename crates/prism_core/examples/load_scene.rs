//! Example: Load and inspect a JSON scene file.
//!
//! Run with: cargo run --example load_scene -- scenes/three_spheres.json

use std::env;

use prism_core::{load_scene, GeometryKind};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("Usage: load_scene <path-to-scene-json>");
        println!("\nExample:");
        println!("  cargo run --example load_scene -- scenes/three_spheres.json");
        return;
    }

    let path = &args[1];
    println!("Loading scene file: {}", path);

    match load_scene(path) {
        Ok(loaded) => {
            let scene = &loaded.scene;
            println!("\n=== Scene: {} ===", scene.name);
            println!("Objects: {}", scene.object_count());
            println!("Lights: {}", scene.lights.len());
            println!("Total triangles: {}", scene.total_triangle_count());

            println!("\n--- Objects ---");
            for (i, object) in scene.objects.iter().enumerate() {
                let kind = match object.kind {
                    GeometryKind::Sphere { radius } => format!("sphere r={radius:.3}"),
                    GeometryKind::Plane => "plane".to_string(),
                    GeometryKind::Mesh => "mesh".to_string(),
                };
                let p = object.world_position();
                let material = object
                    .material
                    .as_ref()
                    .map_or("none".to_string(), |m| {
                        format!("{} ({})", m.name, if m.is_lit() { "lit" } else { "unlit" })
                    });
                println!(
                    "  [{}] {} - {} at ({:.2}, {:.2}, {:.2}), material {}",
                    i, object.name, kind, p.x, p.y, p.z, material
                );
            }

            println!("\n--- Lights ---");
            for (i, light) in scene.lights.iter().enumerate() {
                let p = light.position;
                println!(
                    "  [{}] ({:.2}, {:.2}, {:.2}) intensity {:.2}",
                    i, p.x, p.y, p.z, light.intensity
                );
            }

            match loaded.settings {
                Some(settings) => println!("\nSettings: {:?}", settings),
                None => println!("\nSettings: defaults"),
            }
        }
        Err(e) => {
            eprintln!("Error loading scene: {}", e);
            std::process::exit(1);
        }
    }
}
