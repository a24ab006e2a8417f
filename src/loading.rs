use crate::core::state::AppState;
use crate::earth::resources::{DataLoadStatus, QuakeVisState};
use bevy::prelude::*;
use bevy::tasks::{block_on, futures_lite::future, AsyncComputeTaskPool, Task};
use bevy_asset_loader::prelude::*;
use bevy_kira_audio::AudioSource;
use quakecore::database::EarthquakeDatabase;
use quakecore::error::QuakeError;

pub struct LoadingPlugin;

impl Plugin for LoadingPlugin {
    fn build(&self, app: &mut App) {
        // A missing texture or song still lets the visualization run.
        app.add_loading_state(
            LoadingState::new(AppState::AssetLoading)
                .continue_to_state(AppState::Running)
                .on_failure_continue_to_state(AppState::Running)
                .load_collection::<EarthAssets>()
                .load_collection::<AudioAssets>(),
        )
        .add_systems(Startup, spawn_catalog_task)
        .add_systems(Update, poll_catalog_task);
    }
}

#[derive(AssetCollection, Resource)]
pub struct EarthAssets {
    #[asset(path = "textures/earth-2k.png")]
    pub earth: Handle<Image>,
}

#[derive(AssetCollection, Resource)]
pub struct AudioAssets {
    #[asset(path = "audio/music.ogg")]
    pub music: Handle<AudioSource>,
}

/// Background parse of the earthquake catalog.
#[derive(Component)]
pub struct CatalogTask(Task<Result<EarthquakeDatabase, QuakeError>>);

fn spawn_catalog_task(mut commands: Commands) {
    let path = quakecore::get_config().data.catalog_path;
    info!("Loading earthquake catalog from {}", path.display());

    let task = AsyncComputeTaskPool::get().spawn(async move { EarthquakeDatabase::load(path) });
    commands.spawn(CatalogTask(task));
}

fn poll_catalog_task(
    mut commands: Commands,
    mut tasks: Query<(Entity, &mut CatalogTask)>,
    mut vis: ResMut<QuakeVisState>,
    mut status: ResMut<DataLoadStatus>,
) {
    for (entity, mut task) in &mut tasks {
        let Some(result) = block_on(future::poll_once(&mut task.0)) else {
            continue;
        };

        match result {
            Ok(database) => {
                info!(
                    "Catalog loaded: {} earthquakes ({} lines skipped)",
                    database.len(),
                    database.skipped_lines()
                );
                vis.attach_database(database);
                *status = DataLoadStatus::Ready;
            }
            Err(err) => {
                error!("Earthquake catalog unavailable: {err}");
                *status = DataLoadStatus::Failed(err.to_string());
            }
        }
        commands.entity(entity).despawn();
    }
}
