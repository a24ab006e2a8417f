use bevy::prelude::States;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub(crate) enum AppState {
    /// Texture and music are loading. The catalog loads independently.
    #[default]
    AssetLoading,
    Running,
}
