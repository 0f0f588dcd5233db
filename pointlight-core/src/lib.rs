//! Core data structures and logic for pointlight
//!
//! This crate provides the scene model of the viewer: points and point clouds,
//! object transforms, materials and lights, the virtual trackball and the
//! controller that routes input events to the selected target.

pub mod point;
pub mod point_cloud;
pub mod traits;
pub mod transform;
pub mod material;
pub mod light;
pub mod trackball;
pub mod input;
pub mod scene;
pub mod controller;
pub mod error;

pub use point::*;
pub use point_cloud::*;
pub use traits::*;
pub use transform::*;
pub use material::*;
pub use light::*;
pub use trackball::*;
pub use input::*;
pub use scene::*;
pub use controller::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point3, Vector3, Matrix4, Unit, UnitQuaternion};
