use std::collections::HashMap;

use bevy::prelude::*;

use crate::bridge::xr_events::HandLandmarksDetected;
use crate::engine::assets::tracking_config::TrackingConfig;
use crate::engine::camera::coordinate_mapper::{ViewState, screen_to_world};
use crate::tracking::landmarks::NamedLandmark;

/// Component tagging spheres placed at hand landmarks.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct HandMarker {
    pub landmark: String,
}

/// Marker entities by landmark name. One entry per name, ever.
#[derive(Resource, Default, Debug)]
pub struct SceneMarkers {
    by_name: HashMap<String, Entity>,
}

impl SceneMarkers {
    pub fn get(&self, name: &str) -> Option<Entity> {
        self.by_name.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    fn insert(&mut self, name: &str, entity: Entity) {
        self.by_name.insert(name.to_string(), entity);
    }
}

/// Shared mesh and material for every marker.
#[derive(Resource, Default, Clone)]
pub struct MarkerAssets {
    pub mesh: Handle<Mesh>,
    pub material: Handle<StandardMaterial>,
}

/// Build marker mesh and material from the tracking configuration.
pub fn create_marker_assets(
    mut commands: Commands,
    config: Res<TrackingConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let mesh = meshes.add(Sphere::new(config.marker.radius));
    let material = materials.add(StandardMaterial {
        base_color: config.marker.colour(),
        unlit: true,
        ..default()
    });
    commands.insert_resource(MarkerAssets { mesh, material });
}

/// Place one marker per landmark, reusing the entity already registered
/// under that name.
pub fn place_markers(
    commands: &mut Commands,
    registry: &mut SceneMarkers,
    transforms: &mut Query<&mut Transform, With<HandMarker>>,
    assets: &MarkerAssets,
    markers: &[NamedLandmark],
    view: &ViewState,
) {
    let mut spawned_now: Vec<Entity> = Vec::new();

    for marker in markers {
        let p = marker.point;
        let position = screen_to_world(p.x, p.y, p.z, view);

        if let Some(entity) = registry.get(&marker.name) {
            if let Ok(mut transform) = transforms.get_mut(entity) {
                transform.translation = position;
                continue;
            }
            // Spawned earlier in this batch, not visible to the query yet.
            if spawned_now.contains(&entity) {
                commands
                    .entity(entity)
                    .insert(Transform::from_translation(position));
                continue;
            }
            warn!("Hand marker {} vanished from the scene, respawning", marker.name);
        }

        let entity = commands
            .spawn((
                Name::new(marker.name.clone()),
                HandMarker {
                    landmark: marker.name.clone(),
                },
                Mesh3d(assets.mesh.clone()),
                MeshMaterial3d(assets.material.clone()),
                Transform::from_translation(position),
            ))
            .id();
        registry.insert(&marker.name, entity);
        spawned_now.push(entity);
        debug!("Spawned hand marker {} at {}", marker.name, position);
    }
}

/// Apply the latest detected landmarks to the scene. Earlier batches from
/// the same frame are superseded.
pub fn update_hand_markers(
    mut commands: Commands,
    mut events: EventReader<HandLandmarksDetected>,
    mut registry: ResMut<SceneMarkers>,
    mut transforms: Query<&mut Transform, With<HandMarker>>,
    assets: Res<MarkerAssets>,
    view: Res<ViewState>,
) {
    let Some(HandLandmarksDetected(markers)) = events.read().last() else {
        return;
    };
    place_markers(
        &mut commands,
        &mut registry,
        &mut transforms,
        &assets,
        markers,
        &view,
    );
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_4;

    use futures::executor::block_on;

    use super::*;
    use crate::bridge::xr_events::XrBridgePlugin;
    use crate::tracking::detection_loop::FrameOutcome;
    use crate::tracking::detection_loop::tests::{FakeDetector, FakeSource, fake_loop};
    use crate::tracking::landmarks::NormalizedPoint;

    fn view() -> ViewState {
        ViewState {
            width: 640.0,
            height: 480.0,
            view: Mat4::IDENTITY,
            projection: Mat4::perspective_rh(FRAC_PI_4, 640.0 / 480.0, 0.1, 100.0),
        }
    }

    fn marker_app() -> App {
        let mut app = App::new();
        app.add_plugins(XrBridgePlugin)
            .init_resource::<SceneMarkers>()
            .init_resource::<MarkerAssets>()
            .insert_resource(view())
            .add_systems(Update, update_hand_markers);
        app
    }

    fn wrist(x: f32, y: f32) -> NamedLandmark {
        NamedLandmark {
            name: "WRIST".into(),
            point: NormalizedPoint::new(x, y, 0.0),
        }
    }

    fn markers(app: &mut App) -> Vec<(String, Vec3)> {
        let world = app.world_mut();
        world
            .query::<(&Name, &Transform, &HandMarker)>()
            .iter(world)
            .map(|(name, transform, _)| (name.as_str().to_string(), transform.translation))
            .collect()
    }

    #[test]
    fn repeated_placement_moves_single_marker() {
        let mut app = marker_app();

        app.world_mut()
            .send_event(HandLandmarksDetected(vec![wrist(0.25, 0.25)]));
        app.update();
        app.world_mut()
            .send_event(HandLandmarksDetected(vec![wrist(0.75, 0.5)]));
        app.update();

        let placed = markers(&mut app);
        assert_eq!(placed.len(), 1);
        assert_eq!(placed[0].0, "WRIST");
        let expected = screen_to_world(0.75, 0.5, 0.0, &view());
        assert!(placed[0].1.abs_diff_eq(expected, 1e-5));
        assert_eq!(app.world().resource::<SceneMarkers>().len(), 1);
    }

    #[test]
    fn duplicate_names_in_one_batch_share_a_marker() {
        let mut app = marker_app();

        app.world_mut().send_event(HandLandmarksDetected(vec![
            wrist(0.1, 0.1),
            wrist(0.9, 0.9),
        ]));
        app.update();

        let placed = markers(&mut app);
        assert_eq!(placed.len(), 1);
        let expected = screen_to_world(0.9, 0.9, 0.0, &view());
        assert!(placed[0].1.abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn distinct_names_get_distinct_markers() {
        let mut app = marker_app();
        let tip = NamedLandmark {
            name: "INDEX_FINGER_TIP".into(),
            point: NormalizedPoint::new(0.6, 0.4, 0.0),
        };

        app.world_mut()
            .send_event(HandLandmarksDetected(vec![wrist(0.5, 0.5), tip]));
        app.update();

        let mut names: Vec<_> = markers(&mut app).into_iter().map(|(n, _)| n).collect();
        names.sort();
        assert_eq!(names, vec!["INDEX_FINGER_TIP", "WRIST"]);
    }

    #[test]
    fn despawned_marker_is_recreated() {
        let mut app = marker_app();
        app.world_mut()
            .send_event(HandLandmarksDetected(vec![wrist(0.5, 0.5)]));
        app.update();

        let stale = app.world().resource::<SceneMarkers>().get("WRIST").unwrap();
        app.world_mut().despawn(stale);
        app.world_mut()
            .send_event(HandLandmarksDetected(vec![wrist(0.5, 0.5)]));
        app.update();

        let placed = markers(&mut app);
        assert_eq!(placed.len(), 1);
        assert_ne!(
            app.world().resource::<SceneMarkers>().get("WRIST"),
            Some(stale)
        );
    }

    #[test]
    fn synthetic_frame_places_wrist_marker() {
        let mut app = marker_app();
        let queue = app.world().resource::<crate::bridge::xr_events::XrEventQueue>().clone();

        let mut landmarks = vec![NormalizedPoint::new(0.1, 0.1, 0.0); 21];
        landmarks[0] = NormalizedPoint::new(0.5, 0.5, 0.0);
        let (tracking, loop_queue) = fake_loop(
            FakeSource::default(),
            FakeDetector::one_hand(landmarks),
            &TrackingConfig::default(),
        );

        assert_eq!(
            block_on(tracking.run_frame(&())),
            FrameOutcome::HandFound { markers: 1 }
        );
        for event in loop_queue.drain() {
            queue.push(event);
        }
        app.update();

        let placed = markers(&mut app);
        assert_eq!(placed.len(), 1);
        assert_eq!(placed[0].0, "WRIST");
        let expected = screen_to_world(0.5, 0.5, 0.0, &view());
        assert_eq!(placed[0].1, expected);
    }

    #[test]
    fn no_hands_leaves_scene_untouched() {
        let mut app = marker_app();
        let (tracking, loop_queue) = fake_loop(
            FakeSource::default(),
            FakeDetector::Hands(Vec::new()),
            &TrackingConfig::default(),
        );

        assert_eq!(block_on(tracking.run_frame(&())), FrameOutcome::NoHand);
        let queue = app.world().resource::<crate::bridge::xr_events::XrEventQueue>().clone();
        for event in loop_queue.drain() {
            queue.push(event);
        }
        app.update();

        assert!(markers(&mut app).is_empty());
        assert!(app.world().resource::<SceneMarkers>().is_empty());
    }
}
