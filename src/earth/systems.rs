use crate::earth::components::{EarthEntity, EarthSurface, QuakeMarker};
use crate::earth::events::{ReloadConfigRequested, SettingsChanged};
use crate::earth::resources::*;
use crate::helpers::mesh::{earth_mesh, write_morphed_buffers};
use crate::loading::EarthAssets;
use bevy::camera::visibility::NoFrustumCulling;
use bevy::color::{Color, LinearRgba};
use bevy::pbr::wireframe::Wireframe;
use bevy::pbr::{MeshMaterial3d, StandardMaterial};
use bevy::prelude::*;
use quakecore::marker::EarthquakeMarker;

pub fn spawn_earth(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    earth_assets: Option<Res<EarthAssets>>,
    vis: Res<QuakeVisState>,
) {
    let surface_mesh = meshes.add(earth_mesh(&vis.earth));

    let textured_material = match earth_assets {
        Some(assets) => materials.add(StandardMaterial {
            base_color_texture: Some(assets.earth.clone()),
            perceptual_roughness: 0.9,
            ..default()
        }),
        None => {
            warn!("Earth texture missing, drawing a plain surface");
            materials.add(StandardMaterial {
                base_color: Color::srgb(0.15, 0.3, 0.55),
                perceptual_roughness: 0.9,
                ..default()
            })
        }
    };
    let wireframe_material = materials.add(StandardMaterial {
        base_color: Color::BLACK,
        unlit: true,
        ..default()
    });
    let marker_mesh = meshes.add(Sphere::new(1.0).mesh().uv(16, 8));

    let alpha = vis.earth.alpha();
    commands
        .spawn((
            Transform::from_rotation(vis.earth.morph().orientation()),
            Visibility::Visible,
            EarthEntity,
        ))
        .with_children(|parent| {
            // Vertices leave the spawn-time bounds as the mesh morphs
            parent.spawn((
                Mesh3d(surface_mesh.clone()),
                MeshMaterial3d(textured_material.clone()),
                Transform::default(),
                NoFrustumCulling,
                EarthSurface {
                    displayed_alpha: alpha,
                },
            ));
        });

    commands.insert_resource(EarthRenderAssets {
        surface_mesh,
        textured_material,
        wireframe_material,
        marker_mesh,
    });

    info!("Earth spawned");
}

pub fn apply_setting_changes(
    mut events: MessageReader<SettingsChanged>,
    mut vis: ResMut<QuakeVisState>,
) {
    for event in events.read() {
        debug!("Applying {:?}", event.change);
        vis.apply(event.change);
    }
}

pub fn reload_configuration(
    mut events: MessageReader<ReloadConfigRequested>,
    mut vis: ResMut<QuakeVisState>,
    render_assets: Option<Res<EarthRenderAssets>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut surface_q: Query<&mut EarthSurface>,
) {
    if events.read().count() == 0 {
        return;
    }

    if let Err(err) = quakecore::reload_config() {
        warn!("Configuration not reloaded: {err}");
        return;
    }
    vis.reconfigure(&quakecore::get_config());

    // The grid resolution may have changed, so the surface is rebuilt whole
    if let Some(render_assets) = render_assets {
        if let Some(mesh) = meshes.get_mut(&render_assets.surface_mesh) {
            *mesh = earth_mesh(&vis.earth);
        }
        for mut surface in &mut surface_q {
            surface.displayed_alpha = vis.earth.alpha();
        }
    }
    info!("Configuration reloaded");
}

pub fn advance_visualization(
    time: Res<Time>,
    mut vis: ResMut<QuakeVisState>,
    mut last_tick: ResMut<LastTick>,
) {
    let report = vis.update(time.delta_secs());
    if !report.spawned.is_empty() {
        debug!("{} earthquakes started", report.spawned.len());
    }
    last_tick.0 = report;
}

pub fn sync_earth_orientation(
    vis: Res<QuakeVisState>,
    mut earth_q: Query<&mut Transform, With<EarthEntity>>,
) {
    let orientation = vis.earth.morph().orientation();
    for mut transform in &mut earth_q {
        transform.rotation = orientation;
    }
}

pub fn sync_earth_mesh(
    vis: Res<QuakeVisState>,
    render_assets: Option<Res<EarthRenderAssets>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut surface_q: Query<&mut EarthSurface>,
) {
    let Some(render_assets) = render_assets else {
        return;
    };
    let alpha = vis.earth.alpha();

    for mut surface in &mut surface_q {
        if surface.displayed_alpha == alpha {
            continue;
        }
        if let Some(mesh) = meshes.get_mut(&render_assets.surface_mesh) {
            write_morphed_buffers(mesh, &vis.earth);
            surface.displayed_alpha = alpha;
        }
    }
}

pub fn sync_markers(
    mut commands: Commands,
    vis: Res<QuakeVisState>,
    last_tick: Res<LastTick>,
    render_assets: Option<Res<EarthRenderAssets>>,
    mut marker_entities: ResMut<MarkerEntities>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    earth_q: Query<Entity, With<EarthEntity>>,
    mut marker_q: Query<&mut Transform, With<QuakeMarker>>,
) {
    let (Some(render_assets), Ok(earth_entity)) = (render_assets, earth_q.single()) else {
        return;
    };

    for id in &last_tick.expired {
        if let Some(entity) = marker_entities.0.remove(id) {
            commands.entity(entity).despawn();
        }
    }

    for marker in vis.earth.markers() {
        match marker_entities.0.get(&marker.id) {
            Some(&entity) => {
                if let Ok(mut transform) = marker_q.get_mut(entity) {
                    *transform = marker_transform(marker);
                }
            }
            None => {
                let material = materials.add(StandardMaterial {
                    base_color: marker_color(marker),
                    emissive: marker_emissive(marker),
                    ..default()
                });
                let entity = commands
                    .spawn((
                        Mesh3d(render_assets.marker_mesh.clone()),
                        MeshMaterial3d(material),
                        marker_transform(marker),
                        QuakeMarker { id: marker.id },
                    ))
                    .id();
                commands.entity(earth_entity).add_child(entity);
                marker_entities.0.insert(marker.id, entity);
            }
        }
    }
}

pub fn apply_debug_material(
    mut commands: Commands,
    vis: Res<QuakeVisState>,
    render_assets: Option<Res<EarthRenderAssets>>,
    mut surface_q: Query<(Entity, &mut MeshMaterial3d<StandardMaterial>, Has<Wireframe>), With<EarthSurface>>,
) {
    let Some(render_assets) = render_assets else {
        return;
    };
    let debug_mode = vis.earth.debug_mode();

    for (entity, mut material, has_wireframe) in &mut surface_q {
        if debug_mode == has_wireframe {
            continue;
        }
        if debug_mode {
            material.0 = render_assets.wireframe_material.clone();
            commands.entity(entity).insert(Wireframe);
        } else {
            material.0 = render_assets.textured_material.clone();
            commands.entity(entity).remove::<Wireframe>();
        }
        info!("Debug view {}", if debug_mode { "on" } else { "off" });
    }
}

fn marker_transform(marker: &EarthquakeMarker) -> Transform {
    Transform::from_translation(marker.position).with_scale(Vec3::splat(marker.scale))
}

fn marker_color(marker: &EarthquakeMarker) -> Color {
    let [r, g, b, a] = marker.color.to_array();
    Color::linear_rgba(r, g, b, a)
}

fn marker_emissive(marker: &EarthquakeMarker) -> LinearRgba {
    LinearRgba::rgb(marker.color.x, marker.color.y, marker.color.z) * 0.5
}
