use bevy::prelude::*;
use quakecore::marker::MarkerId;
use quakecore::vis::{QuakeVis, TickReport};
use std::collections::HashMap;

/// The visualization state shared by the earth systems and the settings panel.
#[derive(Resource, Deref, DerefMut)]
pub struct QuakeVisState(pub QuakeVis);

impl Default for QuakeVisState {
    fn default() -> Self {
        Self(QuakeVis::new(&quakecore::get_config()))
    }
}

#[derive(Resource, Default, Debug, Clone, PartialEq)]
pub enum DataLoadStatus {
    #[default]
    Loading,
    Ready,
    Failed(String),
}

/// Scene entity of every live marker.
#[derive(Resource, Default)]
pub struct MarkerEntities(pub HashMap<MarkerId, Entity>);

/// Outcome of the latest visualization tick.
#[derive(Resource, Deref)]
pub struct LastTick(pub TickReport);

impl Default for LastTick {
    fn default() -> Self {
        Self(TickReport::skipped())
    }
}

#[derive(Resource)]
pub struct EarthRenderAssets {
    pub surface_mesh: Handle<Mesh>,
    pub textured_material: Handle<StandardMaterial>,
    pub wireframe_material: Handle<StandardMaterial>,
    pub marker_mesh: Handle<Mesh>,
}
