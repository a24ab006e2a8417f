use bevy::asset::RenderAssetUsages;
use bevy::mesh::{Indices, PrimitiveTopology};
use bevy::prelude::Mesh;
use quakecore::earth::Earth;

/// Surface mesh of the earth at its current morph.
///
/// Kept in the main world so the morph can rewrite positions and normals
/// every frame.
pub fn earth_mesh(earth: &Earth) -> Mesh {
    let data = earth.mesh();
    let (positions, normals) = earth.displayed_buffers();

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::default(),
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, data.uvs.clone());
    mesh.insert_indices(Indices::U32(data.indices.clone()));
    mesh
}

/// Replaces the vertex buffers of an existing earth mesh. UVs and indices
/// never change.
pub fn write_morphed_buffers(mesh: &mut Mesh, earth: &Earth) {
    let (positions, normals) = earth.displayed_buffers();
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::mesh::VertexAttributeValues;
    use quakecore::marker::MarkerStyle;
    use quakecore::mesh_data::EarthMeshData;
    use quakecore::morph::EarthMorph;

    fn small_earth() -> Earth {
        Earth::new(EarthMeshData::new(4), EarthMorph::default(), MarkerStyle::default())
    }

    #[test]
    fn test_mesh_has_grid_layout() {
        let mesh = earth_mesh(&small_earth());

        assert_eq!(mesh.count_vertices(), 25);
        assert_eq!(mesh.indices().map(|indices| indices.len()), Some(96));
        assert!(mesh.attribute(Mesh::ATTRIBUTE_UV_0).is_some());
    }

    #[test]
    fn test_flat_earth_lies_in_xy_plane() {
        let mesh = earth_mesh(&small_earth());

        let Some(VertexAttributeValues::Float32x3(positions)) =
            mesh.attribute(Mesh::ATTRIBUTE_POSITION)
        else {
            panic!("positions missing");
        };
        assert!(positions.iter().all(|p| p[2] == 0.0));
    }
}
