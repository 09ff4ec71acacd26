//! Triangle-soup mesh blobs: little-endian `f32`, nine per triangle.

use crate::error::AssetError;
use crate::pick::PickMesh;
use glam::Vec3;

pub const BYTES_PER_TRIANGLE: usize = 9 * 4;

pub fn decode_triangle_soup(bytes: &[u8]) -> Result<PickMesh, AssetError> {
    if bytes.is_empty() {
        return Err(AssetError::Empty);
    }
    if bytes.len() % BYTES_PER_TRIANGLE != 0 {
        return Err(AssetError::Misaligned(bytes.len()));
    }
    let floats: Vec<f32> = bytes
        .chunks_exact(4)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect();
    if floats.iter().any(|f| !f.is_finite()) {
        return Err(AssetError::NonFinite);
    }
    let triangles = floats
        .chunks_exact(9)
        .map(|t| {
            [
                Vec3::new(t[0], t[1], t[2]),
                Vec3::new(t[3], t[4], t[5]),
                Vec3::new(t[6], t[7], t[8]),
            ]
        })
        .collect();
    PickMesh::from_triangles(triangles)
}

pub fn encode_triangle_soup(mesh: &PickMesh) -> Vec<u8> {
    mesh.triangles()
        .iter()
        .flatten()
        .flat_map(|v| v.to_array())
        .flat_map(f32::to_le_bytes)
        .collect()
}
