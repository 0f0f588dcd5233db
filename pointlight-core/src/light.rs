//! Light sources of the scene
//!
//! The point and spot lights get their positions from their markers in the
//! scene; only the switches and directions live here.

use crate::point::Vector3f;
use nalgebra::UnitQuaternion;
use serde::{Deserialize, Serialize};

/// Default local position of the point light inside its marker
pub const DEFAULT_POINT_LIGHT_POSITION: [f32; 3] = [1.2, 1.0, 15.0];

/// Default direction of the directional light
pub const DEFAULT_DIRECTIONAL_DIRECTION: [f32; 3] = [-0.2, -1.0, -0.3];

/// Default direction of the spot light cone axis
pub const DEFAULT_SPOT_DIRECTION: [f32; 3] = [1.2, 1.0, 15.0];

/// Default offset of the spot light marker from the origin
pub const DEFAULT_SPOT_OFFSET: [f32; 3] = [-3.6, -3.0, 0.0];

/// Half-angle of the spot light cone, in degrees
pub const SPOT_CUTOFF_DEGREES: f32 = 12.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointLight {
    pub enabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionalLight {
    pub direction: Vector3f,
    pub enabled: bool,
}

impl DirectionalLight {
    pub fn rotate(&mut self, rotation: UnitQuaternion<f32>) {
        self.direction = rotation * self.direction;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpotLight {
    pub direction: Vector3f,
    /// Cosine of the cone half-angle
    pub cutoff: f32,
    pub enabled: bool,
}

impl SpotLight {
    pub fn rotate(&mut self, rotation: UnitQuaternion<f32>) {
        self.direction = rotation * self.direction;
    }
}

/// The three lights of the scene
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lights {
    pub point: PointLight,
    pub directional: DirectionalLight,
    pub spot: SpotLight,
}

impl Default for Lights {
    fn default() -> Self {
        Self {
            point: PointLight { enabled: true },
            directional: DirectionalLight {
                direction: Vector3f::from(DEFAULT_DIRECTIONAL_DIRECTION),
                enabled: false,
            },
            spot: SpotLight {
                direction: Vector3f::from(DEFAULT_SPOT_DIRECTION),
                cutoff: SPOT_CUTOFF_DEGREES.to_radians().cos(),
                enabled: false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_lights() {
        let lights = Lights::default();
        assert!(lights.point.enabled);
        assert!(!lights.directional.enabled);
        assert!(!lights.spot.enabled);
        assert_relative_eq!(lights.spot.cutoff, 0.976296, epsilon = 1e-5);
    }

    #[test]
    fn test_rotate_directional_light() {
        let mut light = Lights::default().directional;
        let before = light.direction;
        light.rotate(UnitQuaternion::from_axis_angle(
            &Vector3f::y_axis(),
            std::f32::consts::PI,
        ));

        assert_relative_eq!(light.direction.x, -before.x, epsilon = 1e-5);
        assert_relative_eq!(light.direction.y, before.y, epsilon = 1e-5);
        assert_relative_eq!(light.direction.z, -before.z, epsilon = 1e-5);
        assert_relative_eq!(light.direction.norm(), before.norm(), epsilon = 1e-5);
    }
}
