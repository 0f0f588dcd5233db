//! Point cloud data structures and functionality

use crate::point::*;
use crate::traits::Drawable;
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// A generic point cloud container
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointCloud<T> {
    pub points: Vec<T>,
}

impl<T> PointCloud<T> {
    /// Create a new empty point cloud
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
        }
    }

    /// Create a point cloud from a vector of points
    pub fn from_points(points: Vec<T>) -> Self {
        Self { points }
    }

    /// Get the number of points in the cloud
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the point cloud is empty
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Get an iterator over the points
    pub fn iter(&self) -> std::slice::Iter<T> {
        self.points.iter()
    }
}

impl<T> Default for PointCloud<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<usize> for PointCloud<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.points[index]
    }
}

impl<'a, T> IntoIterator for &'a PointCloud<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl<T> FromIterator<T> for PointCloud<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            points: Vec::from_iter(iter),
        }
    }
}

impl PointCloud<NormalPoint3f> {
    /// Sample `count` points evenly over a sphere using the golden-angle spiral.
    ///
    /// Normals point outward, so the result shades like the surface it samples.
    pub fn fibonacci_sphere(radius: f32, count: usize) -> Self {
        let golden_angle = std::f32::consts::PI * (3.0 - 5.0_f32.sqrt());

        (0..count)
            .map(|i| {
                let y = if count > 1 {
                    1.0 - 2.0 * i as f32 / (count - 1) as f32
                } else {
                    0.0
                };
                let ring = (1.0 - y * y).max(0.0).sqrt();
                let theta = golden_angle * i as f32;
                let normal = Vector3f::new(ring * theta.cos(), y, ring * theta.sin());
                NormalPoint3f::new(Point3f::from(normal * radius), normal)
            })
            .collect()
    }

    /// Center the cloud on its bounding box and scale it so the farthest
    /// point sits at `radius` from the origin. Normals are left untouched.
    pub fn normalize_to_radius(&mut self, radius: f32) {
        if self.is_empty() {
            return;
        }

        let center = self.center();
        let extent = self
            .points
            .iter()
            .map(|p| (p.position - center).norm())
            .fold(0.0_f32, f32::max);
        let factor = if extent > f32::EPSILON { radius / extent } else { 1.0 };

        for point in &mut self.points {
            point.position = Point3f::from((point.position - center) * factor);
        }
    }

    /// Move every point by `offset`
    pub fn translate(&mut self, offset: &Vector3f) {
        for point in &mut self.points {
            point.position += *offset;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fibonacci_sphere_points_lie_on_sphere() {
        let cloud = PointCloud::fibonacci_sphere(2.0, 200);
        assert_eq!(cloud.len(), 200);

        for point in &cloud {
            assert_relative_eq!(point.position.coords.norm(), 2.0, epsilon = 1e-4);
            assert_relative_eq!(point.normal.norm(), 1.0, epsilon = 1e-4);
            assert_relative_eq!(
                point.normal.dot(&point.position.coords.normalize()),
                1.0,
                epsilon = 1e-4
            );
        }
    }

    #[test]
    fn test_normalize_to_radius() {
        let mut cloud = PointCloud::from_points(vec![
            NormalPoint3f::new(Point3f::new(10.0, 10.0, 10.0), Vector3f::z()),
            NormalPoint3f::new(Point3f::new(14.0, 10.0, 10.0), Vector3f::z()),
            NormalPoint3f::new(Point3f::new(12.0, 12.0, 10.0), Vector3f::z()),
        ]);

        cloud.normalize_to_radius(1.0);

        let center = cloud.center();
        assert_relative_eq!(center.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(center.y, 0.0, epsilon = 1e-5);
        let max = cloud
            .iter()
            .map(|p| p.position.coords.norm())
            .fold(0.0_f32, f32::max);
        assert_relative_eq!(max, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_normalize_single_point_cloud() {
        let mut cloud = PointCloud::from_points(vec![NormalPoint3f::new(
            Point3f::new(3.0, -2.0, 1.0),
            Vector3f::y(),
        )]);

        cloud.normalize_to_radius(5.0);

        assert_eq!(cloud[0].position, Point3f::origin());
        assert!(cloud[0].position.coords.iter().all(|c| c.is_finite()));
    }

    #[test]
    fn test_translate_moves_every_point() {
        let mut cloud = PointCloud::fibonacci_sphere(1.0, 10);
        let before = cloud.clone();
        cloud.translate(&Vector3f::new(1.0, 2.0, 3.0));

        for (moved, original) in cloud.iter().zip(before.iter()) {
            assert_relative_eq!(moved.position.x, original.position.x + 1.0);
            assert_relative_eq!(moved.position.y, original.position.y + 2.0);
            assert_relative_eq!(moved.position.z, original.position.z + 3.0);
            assert_eq!(moved.normal, original.normal);
        }
    }
}
