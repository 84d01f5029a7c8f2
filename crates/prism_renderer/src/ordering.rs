//! Per-pass object ordering.

use prism_core::SceneObject;
use prism_math::Vec3;

/// Order objects for a pass: non-planes by ascending distance from
/// `camera_position`, planes left in their authored slots.
///
/// The non-plane subsequence is sorted stably and written back into the
/// positions non-planes already occupied, so a plane at index 0 stays at
/// index 0 whatever its distance.
pub fn order_objects(objects: &[SceneObject], camera_position: Vec3) -> Vec<&SceneObject> {
    let mut ordered: Vec<&SceneObject> = objects.iter().collect();

    let slots: Vec<usize> = objects
        .iter()
        .enumerate()
        .filter(|(_, object)| !object.is_plane())
        .map(|(i, _)| i)
        .collect();

    let mut movable: Vec<&SceneObject> = slots.iter().map(|&i| &objects[i]).collect();
    movable.sort_by(|a, b| {
        let da = a.world_position().distance(camera_position);
        let db = b.world_position().distance(camera_position);
        da.total_cmp(&db)
    });

    for (slot, object) in slots.into_iter().zip(movable) {
        ordered[slot] = object;
    }

    ordered
}
