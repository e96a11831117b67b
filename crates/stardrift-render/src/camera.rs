//! The fixed flythrough camera.
//!
//! The scene moves; the camera does not. It sits at (0, 0, -10) looking at
//! the origin with +Y up, a 45 degree vertical field of view, and a
//! reverse-Z perspective projection (near 0.1, far 100). Only the aspect
//! ratio changes at runtime, on window resize.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

/// Camera uniform uploaded to both the star and ship pipelines.
/// The viewport dimensions let the star shader convert pixel point sizes
/// into clip-space offsets.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    /// (width, height, 0, 0) in physical pixels.
    pub viewport: [f32; 4],
}

/// Fixed look-at camera with reverse-Z perspective projection.
#[derive(Debug, Clone)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Width / height.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, -10.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov_y: std::f32::consts::FRAC_PI_4, // 45 degrees
            aspect: 1200.0 / 800.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl Camera {
    /// View matrix looking from `eye` toward `target`.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// Reverse-Z perspective projection: near and far are swapped so the
    /// near plane maps to depth 1.0 and the far plane to 0.0.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.far, self.near)
    }

    /// Combined view-projection matrix.
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Update the aspect ratio after a window resize.
    pub fn set_aspect_ratio(&mut self, width: f32, height: f32) {
        self.aspect = width / height.max(1.0);
    }

    /// Pack the camera and viewport into the shared GPU uniform.
    pub fn to_uniform(&self, viewport_width: f32, viewport_height: f32) -> CameraUniform {
        CameraUniform {
            view_proj: self.view_projection_matrix().to_cols_array_2d(),
            viewport: [viewport_width, viewport_height, 0.0, 0.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_scene_contract() {
        let camera = Camera::default();
        assert_eq!(camera.eye, Vec3::new(0.0, 0.0, -10.0));
        assert_eq!(camera.target, Vec3::ZERO);
        assert_eq!(camera.up, Vec3::Y);
        assert!((camera.fov_y - std::f32::consts::FRAC_PI_4).abs() < 1e-6);
        assert!((camera.near - 0.1).abs() < 1e-6);
        assert!((camera.far - 100.0).abs() < 1e-6);
    }

    #[test]
    fn test_view_matrix_centers_target() {
        let camera = Camera::default();
        let view = camera.view_matrix();
        // The look-at target projects onto the view axis with no lateral offset.
        let target_view = view.transform_point3(camera.target);
        assert!(target_view.x.abs() < 1e-5);
        assert!(target_view.y.abs() < 1e-5);
        assert!((target_view.z.abs() - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_reverse_z_depth_ordering() {
        let camera = Camera::default();
        let vp = camera.view_projection_matrix();
        // A point near the camera lands at higher NDC depth than a far one.
        let near_point = vp.project_point3(Vec3::new(0.0, 0.0, -9.5));
        let far_point = vp.project_point3(Vec3::new(0.0, 0.0, 40.0));
        assert!(near_point.z > far_point.z);
    }

    #[test]
    fn test_set_aspect_ratio() {
        let mut camera = Camera::default();
        camera.set_aspect_ratio(1920.0, 1080.0);
        assert!((camera.aspect - 1920.0 / 1080.0).abs() < 1e-6);
    }

    #[test]
    fn test_uniform_carries_viewport() {
        let camera = Camera::default();
        let uniform = camera.to_uniform(1200.0, 800.0);
        assert_eq!(uniform.viewport, [1200.0, 800.0, 0.0, 0.0]);
    }
}
