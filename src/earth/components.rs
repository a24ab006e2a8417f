use bevy::prelude::*;
use quakecore::marker::MarkerId;

/// Root of the earth. Carries the tilt and spin; markers are its children.
#[derive(Component)]
pub struct EarthEntity;

/// The morphing surface mesh.
#[derive(Component)]
pub struct EarthSurface {
    /// Morph alpha the mesh buffers were last written for.
    pub displayed_alpha: f32,
}

#[derive(Component)]
pub struct QuakeMarker {
    pub id: MarkerId,
}
