//! Perspective camera producing view and projection matrices.

use crate::pipeline::CameraUniform;
use glam::{Mat4, Quat, Vec3};

/// The viewer's camera: position, orientation, and perspective projection.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Position in world space.
    pub position: Vec3,
    /// Rotation as a unit quaternion. -Z is the viewing direction.
    pub rotation: Quat,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Width / height.
    pub aspect_ratio: f32,
    /// Near clip plane distance (always positive).
    pub near: f32,
    /// Far clip plane distance (always positive, > near).
    pub far: f32,
}

impl Camera {
    /// Compute the view matrix (inverse of the camera transform).
    pub fn view_matrix(&self) -> Mat4 {
        let rotation_matrix = Mat4::from_quat(self.rotation);
        let translation_matrix = Mat4::from_translation(self.position);
        (translation_matrix * rotation_matrix).inverse()
    }

    /// Compute the projection matrix with reverse-Z.
    ///
    /// Near and far are swapped in the perspective call so the near plane
    /// maps to depth 1 and the far plane to depth 0.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect_ratio, self.far, self.near)
    }

    /// Compute the combined view-projection matrix.
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// The viewing direction (-Z in camera space).
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    /// Update the aspect ratio after a surface resize.
    pub fn set_aspect_ratio(&mut self, width: f32, height: f32) {
        if height > 0.0 {
            self.aspect_ratio = width / height;
        }
    }

    /// Convert the camera to a uniform suitable for GPU upload.
    pub fn to_uniform(&self) -> CameraUniform {
        CameraUniform {
            view_proj: self.view_projection_matrix().to_cols_array_2d(),
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 5.0),
            rotation: Quat::IDENTITY,
            fov_y: 75.0_f32.to_radians(),
            aspect_ratio: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_camera_parameters() {
        let camera = Camera::default();
        assert!((camera.fov_y - 75.0_f32.to_radians()).abs() < 1e-6);
        assert!((camera.near - 0.1).abs() < 1e-6);
        assert!((camera.far - 1000.0).abs() < 1e-6);
        assert!((camera.position - Vec3::new(0.0, 0.0, 5.0)).length() < 1e-6);
    }

    #[test]
    fn test_default_camera_looks_down_neg_z() {
        let camera = Camera::default();
        let forward = camera.forward();
        assert!(forward.x.abs() < 1e-6);
        assert!(forward.y.abs() < 1e-6);
        assert!((forward.z + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_set_aspect_ratio() {
        let mut camera = Camera::default();
        camera.set_aspect_ratio(1920.0, 1080.0);
        assert!((camera.aspect_ratio - 16.0 / 9.0).abs() < 1e-6);
        camera.set_aspect_ratio(100.0, 0.0);
        // Degenerate height leaves the ratio untouched.
        assert!((camera.aspect_ratio - 16.0 / 9.0).abs() < 1e-6);
    }

    #[test]
    fn test_view_matrix_inverse_is_camera_transform() {
        let camera = Camera {
            position: Vec3::new(1.0, 2.0, 3.0),
            rotation: Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
            ..Camera::default()
        };
        let inv_view = camera.view_matrix().inverse();
        let reconstructed_pos = inv_view.col(3).truncate();
        assert!((reconstructed_pos - camera.position).length() < 1e-4);
    }

    #[test]
    fn test_origin_is_in_front_of_default_camera() {
        let camera = Camera::default();
        let vp = camera.view_projection_matrix();
        let clip = vp * glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
        let ndc_z = clip.z / clip.w;
        // Reverse-Z: visible depth lies in (0, 1].
        assert!(ndc_z > 0.0 && ndc_z <= 1.0, "origin not visible: {ndc_z}");
    }

    #[test]
    fn test_reverse_z_orders_depths() {
        let camera = Camera::default();
        let vp = camera.view_projection_matrix();
        let near_point = vp * glam::Vec4::new(0.0, 0.0, 4.0, 1.0); // 1 unit away
        let far_point = vp * glam::Vec4::new(0.0, 0.0, -95.0, 1.0); // 100 units away
        let near_z = near_point.z / near_point.w;
        let far_z = far_point.z / far_point.w;
        assert!(
            near_z > far_z,
            "reverse-Z: nearer geometry must have larger depth ({near_z} vs {far_z})"
        );
    }

    #[test]
    fn test_to_uniform_matches_view_projection() {
        let camera = Camera::default();
        let uniform = camera.to_uniform();
        let expected = camera.view_projection_matrix().to_cols_array_2d();
        assert_eq!(uniform.view_proj, expected);
    }
}
