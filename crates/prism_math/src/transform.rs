// Transform utilities for Mat4
//
// glam::Mat4 already provides transform_point3(), transform_vector3() and
// inverse(); these add the world-space normal handling the shader needs.

use glam::{Mat4, Vec3};

/// Extension trait for Mat4 used when moving normals and radii into world space.
pub trait Mat4Ext {
    /// Transform a direction (w=0) and renormalize it.
    ///
    /// Returns `Vec3::ZERO` when the result cannot be normalized, so a
    /// degenerate normal contributes no light instead of NaN.
    fn transform_direction(&self, direction: Vec3) -> Vec3;

    /// Largest scale factor along any of the matrix's basis axes.
    fn max_scale(&self) -> f32;
}

impl Mat4Ext for Mat4 {
    fn transform_direction(&self, direction: Vec3) -> Vec3 {
        self.transform_vector3(direction).normalize_or_zero()
    }

    fn max_scale(&self) -> f32 {
        self.x_axis
            .truncate()
            .length()
            .max(self.y_axis.truncate().length())
            .max(self.z_axis.truncate().length())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_transform_direction_ignores_translation() {
        let mat = Mat4::from_translation(Vec3::new(10.0, 20.0, 30.0));
        assert_eq!(mat.transform_direction(Vec3::X), Vec3::X);
    }

    #[test]
    fn test_transform_direction_rotates_and_normalizes() {
        let mat = Mat4::from_scale_rotation_translation(
            Vec3::splat(3.0),
            glam::Quat::from_rotation_z(PI / 2.0),
            Vec3::ONE,
        );
        let transformed = mat.transform_direction(Vec3::X);

        assert!((transformed - Vec3::Y).length() < 0.001);
        assert!((transformed.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_transform_direction_degenerate_is_zero() {
        let mat = Mat4::from_scale(Vec3::ZERO);
        assert_eq!(mat.transform_direction(Vec3::Y), Vec3::ZERO);
        assert_eq!(Mat4::IDENTITY.transform_direction(Vec3::ZERO), Vec3::ZERO);
    }

    #[test]
    fn test_max_scale() {
        assert!((Mat4::IDENTITY.max_scale() - 1.0).abs() < 1e-6);

        let mat = Mat4::from_scale_rotation_translation(
            Vec3::new(1.0, 4.0, 2.0),
            glam::Quat::from_rotation_y(PI / 4.0),
            Vec3::new(5.0, 5.0, 5.0),
        );
        assert!((mat.max_scale() - 4.0).abs() < 1e-5);
    }
}
