//! OBJ format support
//!
//! Only vertex positions and vertex normals are read; faces are ignored since
//! the viewer draws points.

use crate::PointCloudReader;
use pointlight_core::{Error, NormalPoint3f, Point3f, PointCloud, Result, Vector3f};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

pub struct ObjReader;

impl ObjReader {
    /// Read OBJ data from any reader
    pub fn read_from<R: Read>(reader: R) -> Result<PointCloud<NormalPoint3f>> {
        let data = ::obj::ObjData::load_buf(reader)
            .map_err(|e| Error::InvalidData(format!("Failed to parse OBJ: {}", e)))?;

        if data.position.is_empty() {
            return Err(Error::InvalidData("OBJ file contains no vertices".to_string()));
        }

        Ok(pair_normals(&data.position, &data.normal))
    }
}

impl PointCloudReader for ObjReader {
    fn read_point_cloud<P: AsRef<Path>>(path: P) -> Result<PointCloud<NormalPoint3f>> {
        let file = File::open(path)?;
        Self::read_from(BufReader::new(file))
    }
}

/// Pair the i-th position with the i-th normal. Vertices without a usable
/// normal point away from the origin instead.
fn pair_normals(positions: &[[f32; 3]], normals: &[[f32; 3]]) -> PointCloud<NormalPoint3f> {
    positions
        .iter()
        .enumerate()
        .map(|(i, position)| {
            let position = Point3f::from(*position);
            let normal = normals
                .get(i)
                .map(|n| Vector3f::from(*n))
                .and_then(|n| n.try_normalize(f32::EPSILON))
                .or_else(|| position.coords.try_normalize(f32::EPSILON))
                .unwrap_or_else(Vector3f::z);
            NormalPoint3f::new(position, normal)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const TRIANGLE: &str = "\
# three vertices with normals
v 0.0 0.0 0.0
v 2.0 0.0 0.0
v 0.0 4.0 0.0
vn 0.0 0.0 2.0
vn 0.0 0.0 1.0
vn 1.0 0.0 0.0
f 1//1 2//2 3//3
";

    #[test]
    fn test_read_positions_and_normals() {
        let cloud = ObjReader::read_from(TRIANGLE.as_bytes()).unwrap();

        assert_eq!(cloud.len(), 3);
        assert_eq!(cloud[1].position, Point3f::new(2.0, 0.0, 0.0));
        assert_eq!(cloud[2].position, Point3f::new(0.0, 4.0, 0.0));
        // Normals come back unit length
        assert_relative_eq!(cloud[0].normal, Vector3f::z(), epsilon = 1e-6);
        assert_relative_eq!(cloud[2].normal, Vector3f::x(), epsilon = 1e-6);
    }

    #[test]
    fn test_missing_normals_fall_back_to_position_direction() {
        let source = "v 0.0 3.0 0.0\nv 0.0 0.0 0.0\n";
        let cloud = ObjReader::read_from(source.as_bytes()).unwrap();

        assert_eq!(cloud.len(), 2);
        assert_relative_eq!(cloud[0].normal, Vector3f::y(), epsilon = 1e-6);
        assert_eq!(cloud[1].normal, Vector3f::z());
    }

    #[test]
    fn test_empty_obj_is_invalid() {
        let result = ObjReader::read_from("# nothing here\n".as_bytes());
        assert!(matches!(result, Err(Error::InvalidData(_))));
    }
}
