//! Core traits for pointlight

use crate::{material::Material, point::*, point_cloud::*, transform::{Placement, Transform3D}};
use nalgebra::UnitQuaternion;

/// Trait for drawable/renderable objects
pub trait Drawable {
    /// Get the bounding box of the object
    fn bounding_box(&self) -> (Point3f, Point3f);

    /// Get the center point of the object
    fn center(&self) -> Point3f {
        let (min, max) = self.bounding_box();
        nalgebra::center(&min, &max)
    }
}

/// Trait for objects that can be rotated, translated and scaled in the scene
///
/// Implementors only expose their [`Placement`]; the operations themselves
/// are shared so every target composes transforms the same way.
pub trait Transformable {
    fn placement(&self) -> &Placement;

    fn placement_mut(&mut self) -> &mut Placement;

    /// Current model transform
    fn model(&self) -> Transform3D {
        self.placement().model()
    }

    /// World position of the object-local origin
    fn world_origin(&self) -> Point3f {
        self.placement().origin()
    }

    /// Rotate about the object-local origin
    fn rotate(&mut self, rotation: UnitQuaternion<f32>) {
        self.placement_mut().rotate(rotation);
    }

    fn translate(&mut self, delta: &Vector3f) {
        self.placement_mut().translate(delta);
    }

    /// Uniformly scale about the object-local origin
    fn scale(&mut self, factor: f32) {
        self.placement_mut().scale(factor);
    }
}

/// Capability trait for anything the lighting shader can draw with a material
pub trait Shaded {
    fn material(&self) -> &Material;

    fn ambient(&self) -> Vector3f {
        self.material().ambient
    }

    fn diffuse(&self) -> Vector3f {
        self.material().diffuse
    }

    fn specular(&self) -> Vector3f {
        self.material().specular
    }

    fn shininess(&self) -> f32 {
        self.material().shininess
    }
}

impl<T> Drawable for PointCloud<T>
where
    T: Clone + Copy,
    Point3f: From<T>,
{
    fn bounding_box(&self) -> (Point3f, Point3f) {
        if self.is_empty() {
            return (Point3f::origin(), Point3f::origin());
        }

        let first_point = Point3f::from(self.points[0]);
        let mut min = first_point;
        let mut max = first_point;

        for point in &self.points {
            let p = Point3f::from(*point);
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            min.z = min.z.min(p.z);

            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
            max.z = max.z.max(p.z);
        }

        (min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box_and_center() {
        let cloud = PointCloud::from_points(vec![
            NormalPoint3f::new(Point3f::new(-1.0, 0.0, 2.0), Vector3f::z()),
            NormalPoint3f::new(Point3f::new(3.0, 4.0, -2.0), Vector3f::z()),
        ]);

        let (min, max) = cloud.bounding_box();
        assert_eq!(min, Point3f::new(-1.0, 0.0, -2.0));
        assert_eq!(max, Point3f::new(3.0, 4.0, 2.0));
        assert_eq!(cloud.center(), Point3f::new(1.0, 2.0, 0.0));
    }

    #[test]
    fn test_empty_cloud_bounding_box() {
        let cloud = PointCloud::<NormalPoint3f>::new();
        assert_eq!(cloud.bounding_box(), (Point3f::origin(), Point3f::origin()));
    }
}
