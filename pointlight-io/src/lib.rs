//! I/O operations for pointlight
//!
//! Reads OBJ files as point clouds with normals and assembles the viewer's
//! scene from an asset directory.

pub mod obj;
pub mod assets;

pub use assets::{load_scene, SceneAssets, MARKER_RADIUS, MODEL_RADIUS};

use pointlight_core::{NormalPoint3f, PointCloud, Result};

/// Trait for reading point clouds from files
pub trait PointCloudReader {
    fn read_point_cloud<P: AsRef<std::path::Path>>(path: P) -> Result<PointCloud<NormalPoint3f>>;
}

/// Auto-detect format and read point cloud
pub fn read_point_cloud<P: AsRef<std::path::Path>>(path: P) -> Result<PointCloud<NormalPoint3f>> {
    let path = path.as_ref();
    match path.extension().and_then(|s| s.to_str()) {
        Some("obj") | Some("OBJ") => obj::ObjReader::read_point_cloud(path),
        _ => Err(pointlight_core::Error::UnsupportedFormat(
            format!("Unsupported point cloud format: {:?}", path.extension())
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pointlight_core::Error;

    #[test]
    fn test_unsupported_extension() {
        let result = read_point_cloud("cloud.ply");
        assert!(matches!(result, Err(Error::UnsupportedFormat(_))));

        let result = read_point_cloud("no_extension");
        assert!(matches!(result, Err(Error::UnsupportedFormat(_))));
    }

    #[test]
    fn test_missing_obj_file() {
        let result = read_point_cloud("definitely/not/here.obj");
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
