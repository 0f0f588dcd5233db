//! Per-frame uniform assembly
//!
//! Each frame draws the active object and both light markers. Their uniform
//! blocks share the camera and light parameters and differ in model,
//! material and flags.

use crate::camera::Camera;
use nalgebra::Matrix4;
use pointlight_core::{Scene, SceneObject, Shaded, Transformable};
use pointlight_gpu::DrawUniforms;

/// Uniforms for the three draws of one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameUniforms {
    pub object: DrawUniforms,
    pub point_marker: DrawUniforms,
    pub spot_marker: DrawUniforms,
}

impl FrameUniforms {
    pub fn build(scene: &Scene, camera: &Camera, viewport: (u32, u32)) -> Self {
        let shared = shared_uniforms(scene, camera, viewport);
        Self {
            object: object_uniforms(&shared, scene.active(), false, scene.color_mode),
            point_marker: object_uniforms(&shared, &scene.point_marker.object, true, false),
            spot_marker: object_uniforms(&shared, &scene.spot_marker.object, true, false),
        }
    }
}

fn flag(value: bool) -> f32 {
    if value {
        1.0
    } else {
        0.0
    }
}

fn mat(matrix: Matrix4<f32>) -> [[f32; 4]; 4] {
    matrix.into()
}

fn shared_uniforms(scene: &Scene, camera: &Camera, viewport: (u32, u32)) -> DrawUniforms {
    let lights = &scene.lights;
    let point = scene.point_light_position();
    let spot = scene.spot_light_position();
    let eye = camera.position;

    DrawUniforms {
        projection: mat(camera.projection_matrix()),
        view: mat(camera.view_matrix()),
        point_light: [point.x, point.y, point.z, flag(lights.point.enabled)],
        spot_position: [spot.x, spot.y, spot.z, flag(lights.spot.enabled)],
        spot_direction: [
            lights.spot.direction.x,
            lights.spot.direction.y,
            lights.spot.direction.z,
            lights.spot.cutoff,
        ],
        directional: [
            lights.directional.direction.x,
            lights.directional.direction.y,
            lights.directional.direction.z,
            flag(lights.directional.enabled),
        ],
        camera_position: [eye.x, eye.y, eye.z, 1.0],
        viewport: [viewport.0.max(1) as f32, viewport.1.max(1) as f32, 0.0, 0.0],
        ..DrawUniforms::default()
    }
}

fn object_uniforms(
    shared: &DrawUniforms,
    object: &SceneObject,
    is_marker: bool,
    color_mode: bool,
) -> DrawUniforms {
    let ambient = object.ambient();
    let diffuse = object.diffuse();
    let specular = object.specular();

    DrawUniforms {
        model: mat(object.model().matrix),
        point: [object.point_size(), 0.0, 0.0, 0.0],
        ambient: [ambient.x, ambient.y, ambient.z, object.shininess()],
        diffuse: [diffuse.x, diffuse.y, diffuse.z, flag(color_mode)],
        specular: [specular.x, specular.y, specular.z, flag(is_marker)],
        ..*shared
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pointlight_core::{Material, PointCloud, Vector3f, LIT_MARKER_AMBIENT};

    fn test_scene() -> Scene {
        let objects = vec![SceneObject::new(
            "bunny",
            PointCloud::fibonacci_sphere(1.0, 16),
            Material::shiny(),
        )];
        Scene::new(objects, &PointCloud::fibonacci_sphere(0.25, 8)).unwrap()
    }

    #[test]
    fn test_light_parameters() {
        let scene = test_scene();
        let frame = FrameUniforms::build(&scene, &Camera::default(), (640, 480));

        assert_eq!(frame.object.point_light, [1.2, 1.0, 15.0, 1.0]);
        assert_eq!(frame.object.spot_position, [-3.6, -3.0, 0.0, 0.0]);
        assert_eq!(frame.object.directional[3], 0.0);
        assert_relative_eq!(frame.object.spot_direction[3], 12.5_f32.to_radians().cos());
        assert_eq!(frame.object.viewport[..2], [640.0, 480.0]);
        assert_eq!(frame.object.camera_position, [0.0, 0.0, 20.0, 1.0]);
    }

    #[test]
    fn test_marker_flags() {
        let mut scene = test_scene();
        scene.toggle_color_mode();
        let frame = FrameUniforms::build(&scene, &Camera::default(), (640, 480));

        assert_eq!(frame.object.specular[3], 0.0);
        assert_eq!(frame.object.diffuse[3], 1.0);
        assert_eq!(frame.point_marker.specular[3], 1.0);
        assert_eq!(frame.point_marker.diffuse[3], 0.0);
        assert_eq!(frame.point_marker.ambient[..3], LIT_MARKER_AMBIENT);
        assert_eq!(frame.spot_marker.ambient[..3], [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_material_terms_pass_through_unscaled() {
        let objects = vec![SceneObject::new(
            "bear",
            PointCloud::fibonacci_sphere(1.0, 16),
            Material::matte(),
        )];
        let scene = Scene::new(objects, &PointCloud::fibonacci_sphere(0.25, 8)).unwrap();
        let frame = FrameUniforms::build(&scene, &Camera::default(), (640, 480));

        let matte = Material::matte();
        assert_eq!(frame.object.diffuse[..3], [matte.diffuse.x, matte.diffuse.y, matte.diffuse.z]);
        assert_eq!(frame.object.ambient[..3], [matte.ambient.x, matte.ambient.y, matte.ambient.z]);
        assert_eq!(frame.object.ambient[3], matte.shininess);
        assert_eq!(frame.object.point[1..], [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_model_and_point_size_follow_object() {
        let mut scene = test_scene();
        scene.active_mut().scale(2.0);
        scene.active_mut().translate(&Vector3f::new(1.0, 0.0, 0.0));
        scene.active_mut().grow_points();
        let frame = FrameUniforms::build(&scene, &Camera::default(), (640, 480));

        assert_relative_eq!(frame.object.model[0][0], 2.0);
        assert_relative_eq!(frame.object.model[3][0], 1.0);
        assert_relative_eq!(frame.object.point[0], 2.1, epsilon = 1e-6);
        assert_relative_eq!(frame.spot_marker.model[3][0], -3.6);
    }
}
