//! Visualization for the pointlight viewer
//!
//! This crate connects the scene model to a window:
//! - winit event mapping into controller input
//! - a fixed perspective camera
//! - per-frame uniforms for the active object and the light markers
//! - the interactive [`Viewer`] event loop

pub mod camera;
pub mod config;
pub mod frame;
pub mod input;
pub mod viewer;

pub use camera::*;
pub use config::*;
pub use frame::*;
pub use input::*;
pub use viewer::*;

use pointlight_core::Result;

/// Load the assets described by `config` and run the viewer until it closes
pub fn run_viewer(config: ViewerConfig) -> Result<()> {
    Viewer::new(config)?.run()
}
