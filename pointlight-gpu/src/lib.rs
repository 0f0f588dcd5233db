//! # Pointlight GPU
//!
//! WGPU rendering for lit point clouds.
//!
//! Every point is drawn as a screen-space square sized in pixels and shaded
//! with the scene's point, directional and spot lights. Clouds are uploaded
//! once and drawn each frame with their own uniform block.

pub mod device;
pub mod renderer;

// Re-export commonly used items
pub use device::GpuContext;
pub use renderer::{CloudHandle, DrawCall, DrawUniforms, PointCloudRenderer, RenderConfig};
