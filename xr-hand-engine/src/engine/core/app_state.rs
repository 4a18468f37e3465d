use bevy::prelude::*;

use crate::bridge::xr_events::SessionLifecycleEvent;
use crate::engine::loading::progress::LoadingProgress;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    /// Waiting for the tracking configuration.
    #[default]
    Loading,
    /// Scene ready, no immersive session running.
    Ready,
    /// Immersive session active and detection loop running.
    Immersive,
}

pub fn transition_to_ready(
    loading_progress: Res<LoadingProgress>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if loading_progress.config_loaded {
        info!("→ Transitioning to Ready state");
        next_state.set(AppState::Ready);
    }
}

/// Follow the immersive session's lifecycle. The last event of a frame wins.
pub fn handle_session_lifecycle(
    mut events: EventReader<SessionLifecycleEvent>,
    state: Res<State<AppState>>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    let mut target = *state.get();
    for event in events.read() {
        target = match (event, target) {
            (SessionLifecycleEvent::Started, AppState::Ready) => AppState::Immersive,
            (SessionLifecycleEvent::Ended, AppState::Immersive) => AppState::Ready,
            (_, current) => current,
        };
    }

    if target != *state.get() {
        info!("→ Transitioning to {:?} state", target);
        next_state.set(target);
    }
}
