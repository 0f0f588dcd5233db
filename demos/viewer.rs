//! Point cloud lighting viewer
//!
//! Shows the bunny, bear and dragon point clouds lit by a point light, a
//! directional light and a spot light.
//!
//! Controls:
//!   Left drag     rotate the target of the current mode
//!   Scroll        scale the target of the current mode
//!   1 / 2 / 3     mode: object / point light / object and point light
//!   7 / 8         mode: directional light / spot light direction
//!   4 / 5 / 6     toggle point / directional / spot light
//!   F1 / F2 / F3  show bunny / bear / dragon
//!   P / Shift+P   shrink / grow points
//!   N             toggle normal colouring
//!   Escape        quit

use anyhow::Context;
use clap::Parser;
use pointlight_visualization::{Viewer, ViewerConfig};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(version, about = "Interactive point cloud lighting viewer")]
struct Args {
    /// Directory containing bunny.obj, bear.obj, dragon.obj and sphere.obj
    #[arg(long, default_value = "assets")]
    assets: PathBuf,

    /// Window width in pixels
    #[arg(long, short = 'W', default_value_t = 640)]
    width: u32,

    /// Window height in pixels
    #[arg(long, short = 'H', default_value_t = 480)]
    height: u32,

    /// Window title
    #[arg(long, default_value = "Point Cloud Lighting")]
    title: String,
}

impl From<Args> for ViewerConfig {
    fn from(args: Args) -> Self {
        Self {
            title: args.title,
            width: args.width,
            height: args.height,
            assets_dir: args.assets,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    log::debug!("{:?}", args);
    let assets = args.assets.clone();

    let viewer = Viewer::new(args.into())
        .with_context(|| format!("Failed to load scene from {}", assets.display()))?;
    viewer.run().context("Viewer failed")?;

    Ok(())
}
