// Standard library and external crates
use bevy::asset::AssetMetaCheck;
use bevy::log::{Level, LogPlugin};
use bevy::prelude::*;
use bevy::render::camera::ClearColorConfig;
use bevy_common_assets::json::JsonAssetPlugin;
use constants::render_settings::{AMBIENT_LIGHT_BRIGHTNESS, CAMERA_NEAR, CAMERA_START_POSITION};

// Crate engine modules
use crate::bridge::xr_events::XrBridgePlugin;
use crate::engine::assets::tracking_config::TrackingConfig;
use crate::engine::camera::coordinate_mapper::ViewState;
use crate::engine::camera::view_sync::{
    XrViewCamera, apply_camera_near, apply_viewer_pose, sync_view_state,
};
use crate::engine::core::app_state::{AppState, handle_session_lifecycle, transition_to_ready};
use crate::engine::core::window_config::create_window_config;
use crate::engine::loading::config_loader::{ConfigLoader, load_config_system, start_loading};
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::scene::markers::{SceneMarkers, create_marker_assets, update_hand_markers};

#[cfg(not(target_arch = "wasm32"))]
use crate::engine::systems::status_overlay::{spawn_status_overlay, update_status_text};

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        // Registers TrackingConfig as a loadable asset type from JSON files.
        .add_plugins(JsonAssetPlugin::<TrackingConfig>::new(&["json"]))
        .add_plugins(XrBridgePlugin)
        .insert_resource(AmbientLight {
            color: Color::WHITE,
            brightness: AMBIENT_LIGHT_BRIGHTNESS,
            ..default()
        });

    // Session bootstrap lives behind the browser target.
    #[cfg(target_arch = "wasm32")]
    app.add_plugins(crate::xr::bootstrap::XrSessionPlugin);

    // Initialise resources early
    app.init_resource::<LoadingProgress>()
        .init_resource::<ConfigLoader>()
        .init_resource::<SceneMarkers>()
        .init_resource::<ViewState>();

    // State-based system scheduling
    app.add_systems(Startup, (setup, start_loading).chain())
        .add_systems(
            Update,
            (load_config_system, transition_to_ready)
                .chain()
                .run_if(in_state(AppState::Loading)),
        )
        .add_systems(
            OnExit(AppState::Loading),
            (create_marker_assets, apply_camera_near),
        );

    // Runtime systems: pose first, then view capture, then placement.
    app.add_systems(
        Update,
        (
            handle_session_lifecycle,
            apply_viewer_pose,
            sync_view_state,
            update_hand_markers,
        )
            .chain()
            .run_if(not(in_state(AppState::Loading))),
    );

    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_systems(Update, update_status_text);
    }

    app
}

fn spawn_lighting(commands: &mut Commands) {
    commands.spawn((
        DirectionalLight {
            shadows_enabled: false,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(
            EulerRot::ZYX,
            0.0,
            1.0,
            -std::f32::consts::FRAC_PI_4,
        )),
    ));
}

fn spawn_view_camera(commands: &mut Commands) {
    #[cfg(target_arch = "wasm32")]
    let clear_color = ClearColorConfig::Custom(Color::NONE);
    #[cfg(not(target_arch = "wasm32"))]
    let clear_color = ClearColorConfig::Default;

    commands.spawn((
        Camera3d::default(),
        Camera {
            clear_color,
            ..default()
        },
        Projection::Perspective(PerspectiveProjection {
            near: CAMERA_NEAR,
            ..default()
        }),
        Transform::from_translation(CAMERA_START_POSITION).looking_at(Vec3::ZERO, Vec3::Y),
        XrViewCamera,
    ));
}

// Startup system that only handles basic initialisation
fn setup(mut commands: Commands) {
    spawn_lighting(&mut commands);
    spawn_view_camera(&mut commands);

    #[cfg(not(target_arch = "wasm32"))]
    {
        spawn_status_overlay(&mut commands);
    }
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    let log_config = LogPlugin {
        level: Level::INFO,
        filter: "wgpu=error,naga=warn,xr_hand_engine=debug".to_string(),
        ..default()
    };

    DefaultPlugins
        .set(window_config)
        .set(asset_config)
        .set(log_config)
}
