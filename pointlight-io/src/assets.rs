//! Scene assets
//!
//! The viewer shows three models and a sphere for the light markers. Every
//! asset is normalized to a fixed radius on load; missing or broken files are
//! replaced by a sampled sphere so the viewer still starts.

use crate::read_point_cloud;
use log::{info, warn};
use pointlight_core::{Material, NormalPoint3f, PointCloud, Result, Scene, SceneObject};
use std::path::Path;

/// Radius the selectable models are scaled to
pub const MODEL_RADIUS: f32 = 6.0;

/// Radius of the light marker sphere
pub const MARKER_RADIUS: f32 = 0.25;

const FALLBACK_MODEL_POINTS: usize = 4000;
const FALLBACK_MARKER_POINTS: usize = 300;

/// File stem and material of each selectable model, in F1-F3 order
fn model_table() -> [(&'static str, Material); 3] {
    [
        ("bunny", Material::shiny()),
        ("bear", Material::matte()),
        ("dragon", Material::glossy()),
    ]
}

/// Point clouds needed to build a [`Scene`]
#[derive(Debug, Clone)]
pub struct SceneAssets {
    pub models: Vec<SceneObject>,
    pub marker: PointCloud<NormalPoint3f>,
}

impl SceneAssets {
    /// Load `bunny.obj`, `bear.obj`, `dragon.obj` and `sphere.obj` from `dir`
    pub fn load<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();

        let models = model_table()
            .into_iter()
            .map(|(name, material)| {
                let path = dir.join(format!("{}.obj", name));
                let cloud = load_or_sphere(&path, MODEL_RADIUS, FALLBACK_MODEL_POINTS);
                SceneObject::new(name, cloud, material)
            })
            .collect();
        let marker = load_or_sphere(&dir.join("sphere.obj"), MARKER_RADIUS, FALLBACK_MARKER_POINTS);

        Self { models, marker }
    }

    pub fn into_scene(self) -> Result<Scene> {
        Scene::new(self.models, &self.marker)
    }
}

/// Load the assets in `dir` and build the initial scene
pub fn load_scene<P: AsRef<Path>>(dir: P) -> Result<Scene> {
    SceneAssets::load(dir).into_scene()
}

fn load_or_sphere(path: &Path, radius: f32, fallback_points: usize) -> PointCloud<NormalPoint3f> {
    match read_point_cloud(path) {
        Ok(mut cloud) => {
            cloud.normalize_to_radius(radius);
            info!("Loaded {} points from {}", cloud.len(), path.display());
            cloud
        }
        Err(e) => {
            warn!("Using a sampled sphere for {}: {}", path.display(), e);
            PointCloud::fibonacci_sphere(radius, fallback_points)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::fs;

    #[test]
    fn test_missing_directory_uses_spheres() {
        let assets = SceneAssets::load("no/such/asset/dir");

        let names: Vec<_> = assets.models.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["bunny", "bear", "dragon"]);
        for model in &assets.models {
            assert_eq!(model.cloud.len(), FALLBACK_MODEL_POINTS);
        }
        assert_eq!(assets.marker.len(), FALLBACK_MARKER_POINTS);

        let scene = assets.into_scene().unwrap();
        assert_eq!(scene.active().name, "bunny");
    }

    #[test]
    fn test_loaded_model_is_normalized() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("bear.obj"),
            "v 10 10 10\nv 12 10 10\nv 10 14 10\nv 10 10 11\n",
        )
        .unwrap();

        let assets = SceneAssets::load(dir.path());
        let bear = &assets.models[1];
        assert_eq!(bear.cloud.len(), 4);
        let farthest = bear
            .cloud
            .iter()
            .map(|p| p.position.coords.norm())
            .fold(0.0_f32, f32::max);
        assert_relative_eq!(farthest, MODEL_RADIUS, epsilon = 1e-4);
        // Models without a file still fall back to spheres
        assert_eq!(assets.models[0].cloud.len(), FALLBACK_MODEL_POINTS);
    }
}
