//! Camera utilities for 3D visualization

use nalgebra::{Matrix4, Perspective3, Point3, Vector3};

/// Maps OpenGL clip depth `[-1, 1]` onto the `[0, 1]` range wgpu expects
#[rustfmt::skip]
fn opengl_to_wgpu() -> Matrix4<f32> {
    Matrix4::new(
        1.0, 0.0, 0.0, 0.0,
        0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 0.5, 0.5,
        0.0, 0.0, 0.0, 1.0,
    )
}

/// A fixed perspective camera looking at the scene
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    /// Vertical field of view in radians
    pub fov: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    /// Create a new camera
    pub fn new(
        position: Point3<f32>,
        target: Point3<f32>,
        up: Vector3<f32>,
        fov: f32,
        aspect_ratio: f32,
        near: f32,
        far: f32,
    ) -> Self {
        Self {
            position,
            target,
            up,
            fov,
            aspect_ratio,
            near,
            far,
        }
    }

    /// Follow the window size. A zero height keeps the previous aspect ratio.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect_ratio = width as f32 / height as f32;
        }
    }

    /// Get the view matrix
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    /// Get the projection matrix, with depth in wgpu's `[0, 1]` range
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        let perspective = Perspective3::new(self.aspect_ratio, self.fov, self.near, self.far);
        opengl_to_wgpu() * perspective.into_inner()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(
            Point3::new(0.0, 0.0, 20.0),
            Point3::origin(),
            Vector3::y(),
            60.0_f32.to_radians(),
            640.0 / 480.0,
            1.0,
            1000.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn clip_depth(camera: &Camera, point: Point3<f32>) -> f32 {
        let clip = camera.projection_matrix() * camera.view_matrix() * point.to_homogeneous();
        clip.z / clip.w
    }

    #[test]
    fn test_depth_range_matches_wgpu() {
        let camera = Camera::default();
        assert_relative_eq!(clip_depth(&camera, Point3::new(0.0, 0.0, 19.0)), 0.0, epsilon = 1e-5);
        let far = Point3::new(0.0, 0.0, -980.0);
        assert_relative_eq!(clip_depth(&camera, far), 1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_origin_projects_to_screen_centre() {
        let camera = Camera::default();
        let view_projection = camera.projection_matrix() * camera.view_matrix();
        let clip = view_projection * Point3::origin().to_homogeneous();
        assert_relative_eq!(clip.x / clip.w, 0.0, epsilon = 1e-6);
        assert_relative_eq!(clip.y / clip.w, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_set_viewport() {
        let mut camera = Camera::default();
        camera.set_viewport(800, 400);
        assert_relative_eq!(camera.aspect_ratio, 2.0);

        camera.set_viewport(800, 0);
        assert_relative_eq!(camera.aspect_ratio, 2.0);
    }
}
