//! Triangle mesh geometry for the Prism scene snapshot.
//!
//! Meshes are the polygonal representation the generic intersector walks.
//! Spheres carry a tessellated mesh too, so the generic path can trace them
//! the same way it traces any other polygon soup.

use std::f32::consts::PI;

use prism_math::{Aabb, Vec3};

/// A mesh consisting of vertex positions and triangle indices.
///
/// Triangles wind counter-clockwise when seen from their front side, so the
/// face normal is `(v1 - v0) x (v2 - v0)`.
#[derive(Clone, Debug)]
pub struct Mesh {
    /// Vertex positions (one Vec3 per vertex)
    pub positions: Vec<Vec3>,

    /// Triangle indices (every 3 indices form a triangle)
    pub indices: Vec<u32>,

    /// Axis-aligned bounding box in object space
    pub bounds: Aabb,
}

impl Mesh {
    /// Create a new mesh from positions and indices.
    pub fn new(positions: Vec<Vec3>, indices: Vec<u32>) -> Self {
        let bounds = Aabb::enclosing(&positions);
        Self {
            positions,
            indices,
            bounds,
        }
    }

    /// Get the number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Get the number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Returns the first index that points past the vertex list, if any.
    pub fn invalid_index(&self) -> Option<u32> {
        self.indices
            .iter()
            .copied()
            .find(|&i| i as usize >= self.positions.len())
    }

    /// Iterate over triangles as `[v0, v1, v2]` triplets.
    ///
    /// Triangles with out-of-range indices and a trailing partial triangle
    /// are skipped.
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.indices.chunks_exact(3).filter_map(move |face| {
            let v0 = self.positions.get(face[0] as usize)?;
            let v1 = self.positions.get(face[1] as usize)?;
            let v2 = self.positions.get(face[2] as usize)?;
            Some([*v0, *v1, *v2])
        })
    }

    /// Build a UV sphere centered at the origin.
    ///
    /// Rings run from +Y to -Y; `width_segments` splits each ring around the
    /// Y axis. Vertices lie on the sphere, so flat faces sit slightly inside it.
    pub fn uv_sphere(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        let width_segments = width_segments.max(3);
        let height_segments = height_segments.max(2);

        let mut positions = Vec::with_capacity(((width_segments + 1) * (height_segments + 1)) as usize);
        for iy in 0..=height_segments {
            let theta = iy as f32 / height_segments as f32 * PI;
            for ix in 0..=width_segments {
                let phi = ix as f32 / width_segments as f32 * 2.0 * PI;
                positions.push(Vec3::new(
                    -radius * phi.cos() * theta.sin(),
                    radius * theta.cos(),
                    radius * phi.sin() * theta.sin(),
                ));
            }
        }

        let row = width_segments + 1;
        let mut indices = Vec::new();
        for iy in 0..height_segments {
            for ix in 0..width_segments {
                let a = iy * row + ix + 1;
                let b = iy * row + ix;
                let c = (iy + 1) * row + ix;
                let d = (iy + 1) * row + ix + 1;

                // Pole rows collapse to a single triangle per segment
                if iy != 0 {
                    indices.extend_from_slice(&[a, b, d]);
                }
                if iy != height_segments - 1 {
                    indices.extend_from_slice(&[b, c, d]);
                }
            }
        }

        Self::new(positions, indices)
    }

    /// Build a single quad in the XY plane facing +Z.
    pub fn plane(width: f32, height: f32) -> Self {
        let mut builder = QuadBuilder::default();
        builder.push(Vec3::ZERO, Vec3::X * (width / 2.0), Vec3::Y * (height / 2.0));
        builder.build()
    }

    /// Build an axis-aligned box centered at the origin with outward faces.
    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        let half = Vec3::new(width, height, depth) / 2.0;
        let (x, y, z) = (Vec3::X * half.x, Vec3::Y * half.y, Vec3::Z * half.z);

        // Each face is spanned by (u, v) with u x v pointing outward
        let faces = [
            (x, y, z),
            (-x, z, y),
            (y, z, x),
            (-y, x, z),
            (z, x, y),
            (-z, y, x),
        ];

        let mut builder = QuadBuilder::default();
        for (center, u, v) in faces {
            builder.push(center, u, v);
        }
        builder.build()
    }
}

/// Accumulates quads as pairs of counter-clockwise triangles.
#[derive(Default)]
struct QuadBuilder {
    positions: Vec<Vec3>,
    indices: Vec<u32>,
}

impl QuadBuilder {
    fn push(&mut self, center: Vec3, u: Vec3, v: Vec3) {
        let base = self.positions.len() as u32;
        self.positions.extend_from_slice(&[
            center - u - v,
            center + u - v,
            center + u + v,
            center - u + v,
        ]);
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    fn build(self) -> Mesh {
        Mesh::new(self.positions, self.indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn face_normal([v0, v1, v2]: [Vec3; 3]) -> Vec3 {
        (v1 - v0).cross(v2 - v0).normalize()
    }

    #[test]
    fn test_mesh_creation() {
        let mesh = Mesh::new(vec![Vec3::ZERO, Vec3::X, Vec3::Y], vec![0, 1, 2]);

        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
        assert!(mesh.invalid_index().is_none());
        assert!((mesh.bounds.x.max - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_triangles_skip_bad_indices() {
        let positions = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
        ];
        // Second triangle references vertex 9, trailing pair is incomplete
        let mesh = Mesh::new(positions.clone(), vec![0, 1, 2, 1, 9, 2, 3, 2]);

        let triangles: Vec<_> = mesh.triangles().collect();
        assert_eq!(triangles.len(), 1);
        assert_eq!(triangles[0], [positions[0], positions[1], positions[2]]);
        assert_eq!(mesh.invalid_index(), Some(9));
    }

    #[test]
    fn test_plane_faces_positive_z() {
        let plane = Mesh::plane(2.0, 4.0);

        assert_eq!(plane.triangle_count(), 2);
        for tri in plane.triangles() {
            assert!((face_normal(tri) - Vec3::Z).length() < 1e-5);
        }
        assert!((plane.bounds.y.max - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_cuboid_faces_point_outward() {
        let cube = Mesh::cuboid(1.0, 2.0, 3.0);

        assert_eq!(cube.triangle_count(), 12);
        for tri in cube.triangles() {
            let centroid = (tri[0] + tri[1] + tri[2]) / 3.0;
            assert!(face_normal(tri).dot(centroid) > 0.0);
        }
        assert!((cube.bounds.z.max - 1.5).abs() < 1e-5);
    }

    #[test]
    fn test_uv_sphere_vertices_on_surface() {
        let radius = 1.0 / 6.0;
        let sphere = Mesh::uv_sphere(radius, 32, 16);

        assert_eq!(sphere.vertex_count(), 33 * 17);
        // Two pole rows contribute one triangle per segment, the rest two
        assert_eq!(sphere.triangle_count(), 32 * 2 + 32 * 14 * 2);
        for p in &sphere.positions {
            assert!((p.length() - radius).abs() < 1e-5);
        }
    }

    #[test]
    fn test_uv_sphere_faces_point_outward() {
        let sphere = Mesh::uv_sphere(1.0, 12, 8);

        for tri in sphere.triangles() {
            let centroid = (tri[0] + tri[1] + tri[2]) / 3.0;
            assert!(face_normal(tri).dot(centroid) > 0.0);
        }
    }
}
