//! Viewer configuration

use pointlight_core::DEFAULT_VIEWPORT;
use std::path::PathBuf;

/// Window and asset settings for [`Viewer`](crate::Viewer)
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Directory holding `bunny.obj`, `bear.obj`, `dragon.obj` and `sphere.obj`
    pub assets_dir: PathBuf,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: "Point Cloud Lighting".to_string(),
            width: DEFAULT_VIEWPORT.0,
            height: DEFAULT_VIEWPORT.1,
            assets_dir: PathBuf::from("assets"),
        }
    }
}
