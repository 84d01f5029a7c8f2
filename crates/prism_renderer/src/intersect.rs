//! Ray-object intersection.
//!
//! Two strategies are kept side by side on purpose. The generic path walks an
//! object's triangle mesh with Möller-Trumbore; for spheres that mesh is a
//! tessellation, which is visibly faceted and imprecise at grazing angles.
//! The analytic path solves the ray-sphere quadratic exactly. Which one a
//! sphere takes is chosen per pass by [`SphereIntersection`].

use prism_core::{GeometryKind, SceneObject, Side, SphereIntersection};
use prism_math::{Interval, Ray, Vec3};

/// Determinant below which a ray counts as parallel to a triangle.
const PARALLEL_EPSILON: f32 = 1e-8;

/// Record of a ray-object intersection.
#[derive(Clone, Copy, Debug)]
pub struct Intersection<'a> {
    /// Distance along the ray (the ray direction is unit length)
    pub distance: f32,
    /// World-space hit point
    pub point: Vec3,
    /// Object-space face normal, present for polygon hits only
    pub face_normal: Option<Vec3>,
    /// The object that was hit
    pub object: &'a SceneObject,
}

/// Intersect a ray with one object, accepting distances inside `ray_t`.
///
/// Spheres use the analytic solver under `SphereIntersection::Analytic`;
/// everything else (and spheres under `Generic`) uses the object's mesh.
pub fn intersect<'a>(
    ray: &Ray,
    object: &'a SceneObject,
    method: SphereIntersection,
    ray_t: Interval,
) -> Option<Intersection<'a>> {
    match (object.kind, method) {
        (GeometryKind::Sphere { .. }, SphereIntersection::Analytic) => {
            intersect_sphere(ray, object, ray_t)
        }
        _ => intersect_mesh(ray, object, ray_t),
    }
}

/// Analytic ray-sphere intersection around the object's world position.
pub fn intersect_sphere<'a>(
    ray: &Ray,
    object: &'a SceneObject,
    ray_t: Interval,
) -> Option<Intersection<'a>> {
    let radius = object.world_radius()?;
    let t = sphere_distance(ray, object.world_position(), radius, ray_t)?;

    Some(Intersection {
        distance: t,
        point: ray.at(t),
        face_normal: None,
        object,
    })
}

/// Solve for the nearest sphere hit with the projection method.
///
/// `tca` is the projection of origin→center onto the ray, `d2` the squared
/// distance from the center to the ray line. The two roots are
/// `tca ∓ sqrt(r² - d2)`; the smaller one inside `ray_t` wins.
pub fn sphere_distance(ray: &Ray, center: Vec3, radius: f32, ray_t: Interval) -> Option<f32> {
    let to_center = center - ray.origin();
    let tca = to_center.dot(ray.direction());
    let d2 = to_center.dot(to_center) - tca * tca;
    let r2 = radius * radius;

    if d2 > r2 {
        return None;
    }

    let thc = (r2 - d2).sqrt();
    let t0 = tca - thc;
    let t1 = tca + thc;

    // Sphere entirely behind the origin
    if t0 < 0.0 && t1 < 0.0 {
        return None;
    }

    [t0, t1].into_iter().find(|t| ray_t.contains(*t))
}

/// Generic polygon intersection against the object's mesh.
///
/// The ray is taken into object space without renormalizing, so the
/// triangle parameter `t` is also the world-space distance.
pub fn intersect_mesh<'a>(
    ray: &Ray,
    object: &'a SceneObject,
    ray_t: Interval,
) -> Option<Intersection<'a>> {
    let mesh = object.mesh.as_ref()?;
    let side = object.material.as_ref().map_or(Side::Front, |m| m.side);

    let inverse = object.world_matrix().inverse();
    if !inverse.is_finite() {
        return None;
    }
    let (origin, direction) = ray.transform_raw(&inverse);

    if !mesh.bounds.hit_raw(origin, direction, ray_t) {
        return None;
    }

    let mut closest: Option<(f32, Vec3)> = None;
    let mut search = ray_t;
    for triangle in mesh.triangles() {
        if let Some(t) = triangle_distance(origin, direction, triangle, side, search) {
            let [v0, v1, v2] = triangle;
            closest = Some((t, (v1 - v0).cross(v2 - v0).normalize_or_zero()));
            search = search.with_max(t);
        }
    }

    closest.map(|(t, normal)| Intersection {
        distance: t,
        point: ray.at(t),
        face_normal: Some(normal),
        object,
    })
}

/// Möller-Trumbore ray-triangle intersection with face culling.
fn triangle_distance(
    origin: Vec3,
    direction: Vec3,
    [v0, v1, v2]: [Vec3; 3],
    side: Side,
    ray_t: Interval,
) -> Option<f32> {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let h = direction.cross(edge2);
    let a = edge1.dot(h);

    // a > 0 when the ray meets the counter-clockwise (front) face
    let facing = match side {
        Side::Front => a > PARALLEL_EPSILON,
        Side::Back => a < -PARALLEL_EPSILON,
        Side::Double => a.abs() > PARALLEL_EPSILON,
    };
    if !facing {
        return None;
    }

    let f = 1.0 / a;
    let s = origin - v0;
    let u = f * s.dot(h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * direction.dot(q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);
    ray_t.contains(t).then_some(t)
}

/// Find the nearest hit among `objects`.
///
/// Every object is tested. Only a strictly closer hit replaces the current
/// one, so equal distances resolve to the object that comes first.
pub fn cast<'a, I>(
    ray: &Ray,
    objects: I,
    method: SphereIntersection,
    ray_t: Interval,
) -> Option<Intersection<'a>>
where
    I: IntoIterator<Item = &'a SceneObject>,
{
    let mut closest: Option<Intersection<'a>> = None;
    let mut search = ray_t;

    for object in objects {
        if let Some(hit) = intersect(ray, object, method, search) {
            if closest.map_or(true, |c| hit.distance < c.distance) {
                search = search.with_max(hit.distance);
                closest = Some(hit);
            }
        }
    }

    closest
}
