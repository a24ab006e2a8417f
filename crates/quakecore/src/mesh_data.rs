use crate::projection::{convert_lat_long_to_plane, convert_lat_long_to_sphere};
use glam::Vec3;

pub const DEFAULT_GRID_RESOLUTION: usize = 80;

/// Keeps every vertex index of the grid inside `u32`.
pub const MAX_GRID_RESOLUTION: usize = 2048;

/// Grid vertex at `(row, col)`: rows run south to north, columns west to east.
fn grid_lat_long(resolution: usize, row: usize, col: usize) -> (f32, f32) {
    let n = resolution as f32;
    let latitude = -90.0 + 180.0 * row as f32 / n;
    let longitude = -180.0 + 360.0 * col as f32 / n;
    (latitude, longitude)
}

/// Resolution actually built for a requested one.
pub fn clamp_resolution(resolution: usize) -> usize {
    let clamped = resolution.clamp(1, MAX_GRID_RESOLUTION);
    if clamped != resolution {
        log::warn!("grid resolution {resolution} out of range, using {clamped}");
    }
    clamped
}

/// Plane and sphere positions for every grid vertex, indexed identically.
pub fn create_vertices(resolution: usize) -> (Vec<Vec3>, Vec<Vec3>) {
    let count = (resolution + 1) * (resolution + 1);
    let mut plane = Vec::with_capacity(count);
    let mut sphere = Vec::with_capacity(count);

    for row in 0..=resolution {
        for col in 0..=resolution {
            let (lat, lon) = grid_lat_long(resolution, row, col);
            plane.push(convert_lat_long_to_plane(lat, lon));
            sphere.push(convert_lat_long_to_sphere(lat, lon));
        }
    }

    (plane, sphere)
}

/// The plane faces +Z everywhere; on the unit sphere the normal is the position.
pub fn create_normals(sphere_positions: &[Vec3]) -> (Vec<Vec3>, Vec<Vec3>) {
    let plane = vec![Vec3::Z; sphere_positions.len()];
    (plane, sphere_positions.to_vec())
}

/// Two counter-clockwise triangles per cell, valid for both layouts.
pub fn create_indices(resolution: usize) -> Vec<u32> {
    let stride = (resolution + 1) as u32;
    let mut indices = Vec::with_capacity(resolution * resolution * 6);

    for row in 0..resolution as u32 {
        for col in 0..resolution as u32 {
            let bottom_left = row * stride + col;
            let bottom_right = bottom_left + 1;
            let top_left = bottom_left + stride;
            let top_right = top_left + 1;
            indices.extend_from_slice(&[
                bottom_left,
                bottom_right,
                top_right,
                bottom_left,
                top_right,
                top_left,
            ]);
        }
    }

    indices
}

/// Equirectangular UVs with v = 0 at the north edge of the texture.
pub fn create_texture_coords(resolution: usize) -> Vec<[f32; 2]> {
    let n = resolution as f32;
    let mut uvs = Vec::with_capacity((resolution + 1) * (resolution + 1));
    for row in 0..=resolution {
        for col in 0..=resolution {
            uvs.push([col as f32 / n, 1.0 - row as f32 / n]);
        }
    }
    uvs
}

/// Both vertex layouts of the earth grid plus the shared topology.
#[derive(Debug, Clone)]
pub struct EarthMeshData {
    pub resolution: usize,
    pub plane_positions: Vec<Vec3>,
    pub sphere_positions: Vec<Vec3>,
    pub plane_normals: Vec<Vec3>,
    pub sphere_normals: Vec<Vec3>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
}

impl EarthMeshData {
    pub fn new(resolution: usize) -> Self {
        let resolution = clamp_resolution(resolution);
        let (plane_positions, sphere_positions) = create_vertices(resolution);
        let (plane_normals, sphere_normals) = create_normals(&sphere_positions);
        Self {
            resolution,
            plane_positions,
            sphere_positions,
            plane_normals,
            sphere_normals,
            uvs: create_texture_coords(resolution),
            indices: create_indices(resolution),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.plane_positions.len()
    }

    /// Per-vertex blend between the map (`alpha = 0`) and the globe (`alpha = 1`).
    pub fn morph(&self, alpha: f32) -> (Vec<[f32; 3]>, Vec<[f32; 3]>) {
        let alpha = alpha.clamp(0.0, 1.0);
        let positions = self
            .plane_positions
            .iter()
            .zip(&self.sphere_positions)
            .map(|(plane, sphere)| plane.lerp(*sphere, alpha).to_array())
            .collect();
        // Antipodal normals cancel out halfway through; a zero normal for one
        // frame is acceptable.
        let normals = self
            .plane_normals
            .iter()
            .zip(&self.sphere_normals)
            .map(|(plane, sphere)| plane.lerp(*sphere, alpha).normalize_or_zero().to_array())
            .collect();
        (positions, normals)
    }
}

impl Default for EarthMeshData {
    fn default() -> Self {
        Self::new(DEFAULT_GRID_RESOLUTION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn triangle_normal(positions: &[Vec3], tri: &[u32]) -> Vec3 {
        let a = positions[tri[0] as usize];
        let b = positions[tri[1] as usize];
        let c = positions[tri[2] as usize];
        (b - a).cross(c - a)
    }

    #[test]
    fn test_buffers_have_matching_lengths() {
        let mesh = EarthMeshData::default();
        let expected = 81 * 81;

        assert_eq!(mesh.vertex_count(), expected);
        assert_eq!(mesh.sphere_positions.len(), expected);
        assert_eq!(mesh.plane_normals.len(), expected);
        assert_eq!(mesh.sphere_normals.len(), expected);
        assert_eq!(mesh.uvs.len(), expected);
        assert_eq!(mesh.indices.len(), 80 * 80 * 6);
        assert!(mesh.indices.iter().all(|&i| (i as usize) < expected));
    }

    #[test]
    fn test_grid_corners_cover_the_whole_map() {
        let (plane, _) = create_vertices(4);

        let first = plane[0];
        let last = plane[plane.len() - 1];
        assert!((first.x + std::f32::consts::PI).abs() < 1e-5);
        assert!((first.y + std::f32::consts::FRAC_PI_2).abs() < 1e-5);
        assert!((last.x - std::f32::consts::PI).abs() < 1e-5);
        assert!((last.y - std::f32::consts::FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn test_plane_triangles_face_the_viewer() {
        let mesh = EarthMeshData::new(8);
        for tri in mesh.indices.chunks(3) {
            assert!(triangle_normal(&mesh.plane_positions, tri).z > 0.0);
        }
    }

    #[test]
    fn test_sphere_triangles_face_outward() {
        let mesh = EarthMeshData::new(8);
        for tri in mesh.indices.chunks(3) {
            let normal = triangle_normal(&mesh.sphere_positions, tri);
            // Pole rows collapse to zero-area triangles.
            if normal.length_squared() < 1e-8 {
                continue;
            }
            let centroid = tri
                .iter()
                .map(|&i| mesh.sphere_positions[i as usize])
                .sum::<Vec3>();
            assert!(normal.dot(centroid) > 0.0);
        }
    }

    #[test]
    fn test_morph_endpoints_match_source_buffers() {
        let mesh = EarthMeshData::new(6);

        let (map, map_normals) = mesh.morph(0.0);
        let (globe, globe_normals) = mesh.morph(1.0);

        for i in 0..mesh.vertex_count() {
            assert!(Vec3::from(map[i]).distance(mesh.plane_positions[i]) < 1e-6);
            assert!(Vec3::from(globe[i]).distance(mesh.sphere_positions[i]) < 1e-6);
            assert_eq!(Vec3::from(map_normals[i]), Vec3::Z);
            assert!(Vec3::from(globe_normals[i]).distance(mesh.sphere_normals[i]) < 1e-5);
        }
    }

    #[test]
    fn test_morph_midpoint_is_linear() {
        let mesh = EarthMeshData::new(6);
        let (half, _) = mesh.morph(0.5);

        for i in 0..mesh.vertex_count() {
            let expected = (mesh.plane_positions[i] + mesh.sphere_positions[i]) * 0.5;
            assert!(Vec3::from(half[i]).distance(expected) < 1e-5);
        }
    }

    #[rstest]
    #[case(0, 1)]
    #[case(80, 80)]
    #[case(MAX_GRID_RESOLUTION, MAX_GRID_RESOLUTION)]
    #[case(70_000, MAX_GRID_RESOLUTION)]
    #[case(usize::MAX, MAX_GRID_RESOLUTION)]
    fn test_resolution_is_clamped(#[case] requested: usize, #[case] expected: usize) {
        assert_eq!(clamp_resolution(requested), expected);
    }

    #[test]
    fn test_largest_grid_indices_fit_u32() {
        let stride = (MAX_GRID_RESOLUTION + 1) as u64;
        assert!(stride * stride <= u32::MAX as u64);
        assert_eq!(EarthMeshData::new(0).resolution, 1);
    }

    #[test]
    fn test_sphere_normals_reuse_positions() {
        let (_, sphere) = create_vertices(3);
        let (plane_normals, sphere_normals) = create_normals(&sphere);

        assert_eq!(sphere_normals, sphere);
        assert!(plane_normals.iter().all(|&n| n == Vec3::Z));
    }

    #[test]
    fn test_uvs_span_texture() {
        let uvs = create_texture_coords(4);
        assert_eq!(uvs[0], [0.0, 1.0]);
        assert_eq!(uvs[uvs.len() - 1], [1.0, 0.0]);
    }
}
