use bevy::asset::LoadState;
use bevy::prelude::*;
use constants::path::TRACKING_CONFIG_PATH;

use crate::engine::assets::tracking_config::TrackingConfig;
use crate::engine::loading::progress::LoadingProgress;

#[derive(Resource, Default)]
pub struct ConfigLoader {
    handle: Option<Handle<TrackingConfig>>,
}

pub fn start_loading(mut config_loader: ResMut<ConfigLoader>, asset_server: Res<AssetServer>) {
    config_loader.handle = Some(asset_server.load(TRACKING_CONFIG_PATH));
}

/// Publish the tracking config as a resource once loaded, or the defaults if
/// the file is missing or malformed.
pub fn load_config_system(
    mut loading_progress: ResMut<LoadingProgress>,
    config_loader: Res<ConfigLoader>,
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    configs: Res<Assets<TrackingConfig>>,
) {
    if loading_progress.config_loaded {
        return;
    }
    let Some(handle) = config_loader.handle.as_ref() else {
        return;
    };

    if let Some(config) = configs.get(handle) {
        info!(
            "✓ Tracking config loaded ({} landmarks, place_once: {})",
            config.landmarks.len(),
            config.place_once
        );
        for poi in config.suspicious_landmarks() {
            warn!(
                "Landmark {} at index {} does not match the hand model",
                poi.name, poi.index
            );
        }
        commands.insert_resource(config.clone());
        loading_progress.config_loaded = true;
        return;
    }

    if let Some(LoadState::Failed(err)) = asset_server.get_load_state(handle) {
        warn!("Tracking config unavailable ({err}), using defaults");
        commands.insert_resource(TrackingConfig::default());
        loading_progress.config_loaded = true;
    }
}
