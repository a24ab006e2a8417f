use crate::core::state::AppState;
use crate::earth::resources::QuakeVisState;
use crate::loading::AudioAssets;
use bevy::prelude::*;
use bevy_kira_audio::prelude::*;

pub struct InternalAudioPlugin;

// Background music, paused and resumed from the settings panel
impl Plugin for InternalAudioPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(AudioPlugin)
            .add_systems(OnEnter(AppState::Running), start_music)
            .add_systems(Update, control_music.run_if(in_state(AppState::Running)));
    }
}

#[derive(Resource)]
struct Music(Handle<AudioInstance>);

fn start_music(
    mut commands: Commands,
    audio_assets: Option<Res<AudioAssets>>,
    audio: Res<Audio>,
) {
    let Some(audio_assets) = audio_assets else {
        warn!("Music asset missing, playing without sound");
        return;
    };
    let handle = audio.play(audio_assets.music.clone()).looped().handle();
    commands.insert_resource(Music(handle));
}

fn control_music(
    music: Option<Res<Music>>,
    vis: Res<QuakeVisState>,
    mut audio_instances: ResMut<Assets<AudioInstance>>,
) {
    let Some(music) = music else {
        return;
    };
    let Some(instance) = audio_instances.get_mut(&music.0) else {
        return;
    };

    match instance.state() {
        PlaybackState::Paused { .. } if vis.settings.music_enabled => {
            instance.resume(AudioTween::default());
        }
        PlaybackState::Playing { .. } if !vis.settings.music_enabled => {
            instance.pause(AudioTween::default());
        }
        _ => {}
    }
}
