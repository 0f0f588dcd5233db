//! 3D transformation utilities

use nalgebra::{Point3, Vector3, Matrix4, UnitQuaternion};
use serde::{Deserialize, Serialize};

/// A 3D transformation that can be applied to points and point clouds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform3D {
    pub matrix: Matrix4<f32>,
}

impl Transform3D {
    /// Create an identity transformation
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Create a translation transformation
    pub fn translation(translation: Vector3<f32>) -> Self {
        Self {
            matrix: Matrix4::new_translation(&translation),
        }
    }

    /// Create a rotation transformation from a quaternion
    pub fn rotation(rotation: UnitQuaternion<f32>) -> Self {
        Self {
            matrix: rotation.to_homogeneous(),
        }
    }

    /// Create a uniform scaling transformation
    pub fn uniform_scaling(scale: f32) -> Self {
        Self {
            matrix: Matrix4::new_scaling(scale),
        }
    }

    /// Apply the transformation to a point
    pub fn transform_point(&self, point: &Point3<f32>) -> Point3<f32> {
        let homogeneous = self.matrix * point.to_homogeneous();
        Point3::from_homogeneous(homogeneous).unwrap_or(*point)
    }

    /// Compose this transformation with another
    pub fn compose(self, other: Self) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }

    /// Get the inverse transformation
    pub fn inverse(self) -> Option<Self> {
        self.matrix.try_inverse().map(|inv_matrix| Self {
            matrix: inv_matrix,
        })
    }
}

impl Default for Transform3D {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::ops::Mul for Transform3D {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        self.compose(rhs)
    }
}

/// Placement of an object in the world, kept as separate components.
///
/// The model matrix is `T * R * S`, so rotation and scale always act about the
/// object's own origin while translation stays independent of both. Every
/// update pre-multiplies the component it touches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub translation: Vector3<f32>,
    pub rotation: UnitQuaternion<f32>,
    pub scale: f32,
}

impl Placement {
    pub fn identity() -> Self {
        Self {
            translation: Vector3::zeros(),
            rotation: UnitQuaternion::identity(),
            scale: 1.0,
        }
    }

    pub fn rotate(&mut self, delta: UnitQuaternion<f32>) {
        self.rotation = delta * self.rotation;
    }

    pub fn translate(&mut self, delta: &Vector3<f32>) {
        self.translation += delta;
    }

    pub fn scale(&mut self, factor: f32) {
        self.scale *= factor;
    }

    /// World position of the object-local origin
    pub fn origin(&self) -> Point3<f32> {
        Point3::from(self.translation)
    }

    pub fn model(&self) -> Transform3D {
        Transform3D::translation(self.translation)
            * Transform3D::rotation(self.rotation)
            * Transform3D::uniform_scaling(self.scale)
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Unit;

    #[test]
    fn test_placement_rotates_about_local_origin() {
        let mut placement = Placement::identity();
        placement.translate(&Vector3::new(5.0, 0.0, 0.0));
        placement.rotate(UnitQuaternion::from_axis_angle(
            &Vector3::z_axis(),
            std::f32::consts::FRAC_PI_2,
        ));

        let model = placement.model();
        let origin = model.transform_point(&Point3::origin());
        assert_relative_eq!(origin, Point3::new(5.0, 0.0, 0.0), epsilon = 1e-5);

        let tip = model.transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(tip, Point3::new(5.0, 1.0, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn test_placement_scale_keeps_translation() {
        let mut placement = Placement::identity();
        placement.translate(&Vector3::new(0.0, 2.0, 0.0));
        placement.scale(3.0);

        let point = placement.model().transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(point, Point3::new(3.0, 2.0, 0.0), epsilon = 1e-5);
        assert_eq!(placement.origin(), Point3::new(0.0, 2.0, 0.0));
    }

    #[test]
    fn test_rotations_pre_multiply() {
        let first = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), 0.3);
        let second = UnitQuaternion::from_axis_angle(
            &Unit::new_normalize(Vector3::new(0.0, 1.0, 1.0)),
            0.7,
        );

        let mut placement = Placement::identity();
        placement.rotate(first);
        placement.rotate(second);

        assert_relative_eq!(placement.rotation, second * first, epsilon = 1e-6);
    }

    #[test]
    fn test_inverse_round_trip() {
        let mut placement = Placement::identity();
        placement.translate(&Vector3::new(1.0, -2.0, 0.5));
        placement.rotate(UnitQuaternion::from_axis_angle(&Vector3::y_axis(), 1.1));
        placement.scale(2.5);

        let model = placement.model();
        let inverse = model.inverse().unwrap();
        let point = Point3::new(0.3, 0.4, -1.2);
        let back = inverse.transform_point(&model.transform_point(&point));
        assert_relative_eq!(back, point, epsilon = 1e-5);
    }
}
