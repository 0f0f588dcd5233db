//! Scene state: the selectable objects, the light markers and the lights
//!
//! All mutable viewer state lives in one [`Scene`] value owned by the viewer
//! and lent to the controller for every input event.

use crate::{
    light::{Lights, DEFAULT_POINT_LIGHT_POSITION, DEFAULT_SPOT_OFFSET},
    material::Material,
    point::*,
    point_cloud::PointCloud,
    traits::{Shaded, Transformable},
    transform::Placement,
    Error, Result,
};
use nalgebra::UnitQuaternion;

pub const DEFAULT_POINT_SIZE: f32 = 2.0;
pub const MIN_POINT_SIZE: f32 = 1.0;
pub const POINT_SIZE_STEP: f32 = 0.1;

/// A named point cloud placed in the scene
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    pub name: String,
    pub cloud: PointCloud<NormalPoint3f>,
    pub material: Material,
    pub placement: Placement,
    point_size: f32,
}

impl SceneObject {
    pub fn new(
        name: impl Into<String>,
        cloud: PointCloud<NormalPoint3f>,
        material: Material,
    ) -> Self {
        Self {
            name: name.into(),
            cloud,
            material,
            placement: Placement::identity(),
            point_size: DEFAULT_POINT_SIZE,
        }
    }

    /// Point sprite size in pixels
    pub fn point_size(&self) -> f32 {
        self.point_size
    }

    pub fn set_point_size(&mut self, size: f32) {
        self.point_size = size.max(MIN_POINT_SIZE);
    }

    pub fn grow_points(&mut self) {
        self.set_point_size(self.point_size + POINT_SIZE_STEP);
    }

    pub fn shrink_points(&mut self) {
        self.set_point_size(self.point_size - POINT_SIZE_STEP);
    }
}

impl Transformable for SceneObject {
    fn placement(&self) -> &Placement {
        &self.placement
    }

    fn placement_mut(&mut self) -> &mut Placement {
        &mut self.placement
    }
}

impl Shaded for SceneObject {
    fn material(&self) -> &Material {
        &self.material
    }
}

/// Sphere drawn where a light sits.
///
/// The sphere geometry is baked around `local_position`, so the light's
/// world position is always the marker's model transform applied to it.
#[derive(Debug, Clone, PartialEq)]
pub struct LightMarker {
    pub object: SceneObject,
    local_position: Point3f,
}

impl LightMarker {
    pub fn new(
        name: impl Into<String>,
        sphere: &PointCloud<NormalPoint3f>,
        local_position: Point3f,
        lit: bool,
    ) -> Self {
        let mut cloud = sphere.clone();
        cloud.translate(&local_position.coords);
        Self {
            object: SceneObject::new(name, cloud, Material::marker(lit)),
            local_position,
        }
    }

    pub fn local_position(&self) -> Point3f {
        self.local_position
    }

    pub fn world_position(&self) -> Point3f {
        self.object.model().transform_point(&self.local_position)
    }

    /// Lit markers glow in the light colour, unlit ones go dark
    pub fn set_lit(&mut self, lit: bool) {
        self.object.material = Material::marker(lit);
    }
}

impl Transformable for LightMarker {
    fn placement(&self) -> &Placement {
        &self.object.placement
    }

    fn placement_mut(&mut self) -> &mut Placement {
        &mut self.object.placement
    }
}

impl Shaded for LightMarker {
    fn material(&self) -> &Material {
        &self.object.material
    }
}

/// Complete viewer state
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    objects: Vec<SceneObject>,
    active: usize,
    pub point_marker: LightMarker,
    pub spot_marker: LightMarker,
    pub lights: Lights,
    /// Colour points by their normals instead of shading them
    pub color_mode: bool,
}

impl Scene {
    /// Build a scene from the selectable objects and the sphere used for the
    /// light markers. The first object starts active.
    pub fn new(
        objects: Vec<SceneObject>,
        marker_sphere: &PointCloud<NormalPoint3f>,
    ) -> Result<Self> {
        if objects.is_empty() {
            return Err(Error::InvalidData("scene needs at least one object".to_string()));
        }

        let lights = Lights::default();
        let point_marker = LightMarker::new(
            "point light",
            marker_sphere,
            Point3f::from(DEFAULT_POINT_LIGHT_POSITION),
            lights.point.enabled,
        );
        let mut spot_marker = LightMarker::new(
            "spot light",
            marker_sphere,
            Point3f::origin(),
            lights.spot.enabled,
        );
        spot_marker.translate(&Vector3f::from(DEFAULT_SPOT_OFFSET));

        Ok(Self {
            objects,
            active: 0,
            point_marker,
            spot_marker,
            lights,
            color_mode: false,
        })
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active(&self) -> &SceneObject {
        &self.objects[self.active]
    }

    pub fn active_mut(&mut self) -> &mut SceneObject {
        &mut self.objects[self.active]
    }

    /// Make the object at `index` active. Out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.objects.len() {
            self.active = index;
            true
        } else {
            false
        }
    }

    pub fn point_light_position(&self) -> Point3f {
        self.point_marker.world_position()
    }

    pub fn spot_light_position(&self) -> Point3f {
        self.spot_marker.world_position()
    }

    pub fn rotate_point_light(&mut self, rotation: UnitQuaternion<f32>) {
        self.point_marker.rotate(rotation);
    }

    /// Move the point light along the line through the active object's
    /// origin, scaling its distance from that origin by `factor`.
    pub fn scale_point_light_distance(&mut self, factor: f32) {
        let center = self.active().world_origin();
        let before = self.point_light_position();
        let after = center + (before - center) * factor;
        self.point_marker.translate(&(after - before));
    }

    pub fn toggle_point_light(&mut self) -> bool {
        let enabled = !self.lights.point.enabled;
        self.lights.point.enabled = enabled;
        self.point_marker.set_lit(enabled);
        enabled
    }

    pub fn toggle_directional_light(&mut self) -> bool {
        self.lights.directional.enabled = !self.lights.directional.enabled;
        self.lights.directional.enabled
    }

    pub fn toggle_spot_light(&mut self) -> bool {
        let enabled = !self.lights.spot.enabled;
        self.lights.spot.enabled = enabled;
        self.spot_marker.set_lit(enabled);
        enabled
    }

    pub fn toggle_color_mode(&mut self) -> bool {
        self.color_mode = !self.color_mode;
        self.color_mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::LIT_MARKER_AMBIENT;
    use approx::assert_relative_eq;

    fn test_scene() -> Scene {
        let objects = vec![
            SceneObject::new("bunny", PointCloud::fibonacci_sphere(1.0, 32), Material::shiny()),
            SceneObject::new("bear", PointCloud::fibonacci_sphere(1.0, 32), Material::matte()),
        ];
        Scene::new(objects, &PointCloud::fibonacci_sphere(0.25, 16)).unwrap()
    }

    #[test]
    fn test_scene_requires_objects() {
        let result = Scene::new(Vec::new(), &PointCloud::fibonacci_sphere(0.25, 16));
        assert!(matches!(result, Err(Error::InvalidData(_))));
    }

    #[test]
    fn test_initial_light_positions() {
        let scene = test_scene();
        assert_eq!(scene.point_light_position(), Point3f::new(1.2, 1.0, 15.0));
        assert_eq!(scene.spot_light_position(), Point3f::new(-3.6, -3.0, 0.0));
    }

    #[test]
    fn test_select_ignores_out_of_range() {
        let mut scene = test_scene();
        assert!(scene.select(1));
        assert_eq!(scene.active().name, "bear");
        assert!(!scene.select(7));
        assert_eq!(scene.active_index(), 1);
    }

    #[test]
    fn test_point_size_has_lower_bound() {
        let mut scene = test_scene();
        let object = scene.active_mut();
        object.grow_points();
        assert_relative_eq!(object.point_size(), DEFAULT_POINT_SIZE + POINT_SIZE_STEP);

        for _ in 0..50 {
            object.shrink_points();
        }
        assert_eq!(object.point_size(), MIN_POINT_SIZE);
    }

    #[test]
    fn test_toggle_lights_updates_markers() {
        let mut scene = test_scene();

        assert!(!scene.toggle_point_light());
        assert_eq!(scene.point_marker.ambient(), Vector3f::zeros());
        assert!(scene.toggle_point_light());
        assert_eq!(scene.point_marker.ambient(), Vector3f::from(LIT_MARKER_AMBIENT));

        assert!(scene.toggle_spot_light());
        assert_eq!(scene.spot_marker.ambient(), Vector3f::from(LIT_MARKER_AMBIENT));

        assert!(scene.toggle_directional_light());
        assert!(!scene.toggle_directional_light());
    }

    #[test]
    fn test_scale_point_light_distance() {
        let mut scene = test_scene();
        scene.active_mut().translate(&Vector3f::new(1.0, 0.0, 0.0));

        scene.scale_point_light_distance(0.5);

        let expected = Point3f::new(1.0 + 0.2 * 0.5, 0.5, 7.5);
        assert_relative_eq!(scene.point_light_position(), expected, epsilon = 1e-5);
    }
}
