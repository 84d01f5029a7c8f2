use prism_math::{Mat3, Mat4, Quat, Vec3};

/// Perspective camera looking down its local -Z axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub orientation: Quat,
    /// Vertical field of view in degrees
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    /// Create a camera at `position` looking at `target` with +Y up.
    pub fn new(position: Vec3, target: Vec3, aspect: f32) -> Self {
        Self::look_at(position, target, Vec3::Y, aspect)
    }

    /// Create a camera from a look-at frame.
    ///
    /// Degenerate frames (target on top of the position, or `up` parallel to
    /// the view direction) fall back to world axes instead of producing NaN.
    pub fn look_at(position: Vec3, target: Vec3, up: Vec3, aspect: f32) -> Self {
        let back = (position - target).try_normalize().unwrap_or(Vec3::Z);
        let right = up
            .cross(back)
            .try_normalize()
            .unwrap_or_else(|| back.any_orthonormal_vector());
        let true_up = back.cross(right);

        Self {
            position,
            orientation: Quat::from_mat3(&Mat3::from_cols(right, true_up, back)),
            fov_y: 50.0,
            aspect,
            near: 0.1,
            far: 2000.0,
        }
    }

    /// Set the lens parameters.
    pub fn with_lens(mut self, fov_y: f32, near: f32, far: f32) -> Self {
        self.fov_y = fov_y;
        self.near = near;
        self.far = far;
        self
    }

    /// Get the camera-to-world matrix.
    pub fn world_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation, self.position)
    }

    /// Get the view matrix (world → camera space)
    pub fn view_matrix(&self) -> Mat4 {
        self.world_matrix().inverse()
    }

    /// Get the projection matrix (camera → clip space)
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y.to_radians(), self.aspect, self.near, self.far)
    }

    /// Direction the camera is looking in world space.
    pub fn forward(&self) -> Vec3 {
        self.orientation * Vec3::NEG_Z
    }

    /// Update aspect ratio (e.g., when the render resolution changes)
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_creation() {
        let camera = Camera::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, 16.0 / 9.0);

        assert_eq!(camera.position, Vec3::new(0.0, 0.0, 5.0));
        assert_eq!(camera.aspect, 16.0 / 9.0);
        assert!((camera.forward() - Vec3::NEG_Z).length() < 1e-5);
    }

    #[test]
    fn test_look_at_forward_points_at_target() {
        let position = Vec3::new(3.0, 2.0, 1.0);
        let target = Vec3::new(-1.0, 0.5, -2.0);
        let camera = Camera::new(position, target, 1.0);

        let expected = (target - position).normalize();
        assert!((camera.forward() - expected).length() < 1e-5);
    }

    #[test]
    fn test_view_matrix_moves_camera_to_origin() {
        let camera = Camera::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, 1.0);
        let view = camera.view_matrix();

        assert!(view.transform_point3(camera.position).length() < 1e-5);
        // Target ends up straight ahead on -Z
        let target = view.transform_point3(Vec3::ZERO);
        assert!((target - Vec3::new(0.0, 0.0, -5.0)).length() < 1e-4);
    }

    #[test]
    fn test_degenerate_look_at_is_finite() {
        let straight_down = Camera::new(Vec3::new(0.0, 5.0, 0.0), Vec3::ZERO, 1.0);
        assert!(straight_down.orientation.is_finite());
        assert!((straight_down.forward() - Vec3::NEG_Y).length() < 1e-5);

        let on_target = Camera::new(Vec3::ONE, Vec3::ONE, 1.0);
        assert!(on_target.orientation.is_finite());
    }

    #[test]
    fn test_aspect_update() {
        let mut camera = Camera::new(Vec3::ZERO, Vec3::NEG_Z, 1.0);
        camera.set_aspect(16.0 / 9.0);

        assert_eq!(camera.aspect, 16.0 / 9.0);
        let proj = camera.projection_matrix();
        assert!(proj.x_axis.x < proj.y_axis.y);
    }
}
