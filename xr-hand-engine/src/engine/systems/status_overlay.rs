use bevy::prelude::*;

use crate::engine::core::app_state::AppState;
use crate::engine::scene::markers::SceneMarkers;

#[derive(Component)]
pub struct StatusText;

pub fn status_line(state: AppState, marker_count: usize) -> String {
    let state = match state {
        AppState::Loading => "Loading config",
        AppState::Ready => "Ready",
        AppState::Immersive => "Tracking",
    };
    format!("{state} | markers: {marker_count}")
}

/// Native-only status overlay; the browser build writes to the DOM overlay.
pub fn spawn_status_overlay(commands: &mut Commands) {
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new(status_line(AppState::Loading, 0)),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(1., 1., 1.)),
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(12.0),
                    left: Val::Px(12.0),
                    ..default()
                },
                StatusText,
            ));
        });
}

pub fn update_status_text(
    state: Res<State<AppState>>,
    markers: Res<SceneMarkers>,
    mut query: Query<&mut Text, With<StatusText>>,
) {
    let line = status_line(*state.get(), markers.len());
    for mut text in &mut query {
        if text.0 != line {
            text.0 = line.clone();
        }
    }
}
