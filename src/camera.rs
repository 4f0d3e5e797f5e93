use glam::{Mat4, Vec3};

use crate::scene::Rotation;

pub const EYE: Vec3 = Vec3::new(0.0, 0.0, 5.0);
pub const TARGET: Vec3 = Vec3::ZERO;
pub const UP: Vec3 = Vec3::Y;

pub const FOV_Y_DEGREES: f32 = 45.0;
pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 100.0;

/// Fixed camera looking at the origin. Only the projection aspect changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    aspect: f32,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        let mut camera = Self { aspect: 1.0 };
        camera.resize(width, height);
        camera
    }

    /// Update the aspect ratio; a zero height is treated as one pixel
    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(EYE, TARGET, UP)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(FOV_Y_DEGREES.to_radians(), self.aspect, Z_NEAR, Z_FAR)
    }

    /// Pitch about X, then yaw about Y, applied to the model
    pub fn model_matrix(rotation: Rotation) -> Mat4 {
        Mat4::from_rotation_x(rotation.pitch.to_radians()) * Mat4::from_rotation_y(rotation.yaw.to_radians())
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_height_is_clamped() {
        let camera = Camera::new(640, 0);
        assert_eq!(camera.aspect(), 640.0);
    }

    #[test]
    fn test_resize_updates_aspect() {
        let mut camera = Camera::default();
        assert!((camera.aspect() - 800.0 / 600.0).abs() < 1e-6);
        camera.resize(1000, 500);
        assert_eq!(camera.aspect(), 2.0);
    }

    #[test]
    fn test_view_moves_origin_in_front_of_eye() {
        let origin_in_view = Camera::default().view_matrix().transform_point3(Vec3::ZERO);
        assert!((origin_in_view - Vec3::new(0.0, 0.0, -5.0)).length() < 1e-5);
    }

    #[test]
    fn test_model_matrix_pitch_then_yaw() {
        let m = Camera::model_matrix(Rotation::new(90.0, 90.0));
        // Yaw first carries +X to -Z, then pitch carries -Z to +Y
        let p = m.transform_point3(Vec3::X);
        assert!((p - Vec3::Y).length() < 1e-5, "{:?}", p);
    }
}
