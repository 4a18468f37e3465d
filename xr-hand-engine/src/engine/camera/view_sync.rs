use bevy::prelude::*;

use super::coordinate_mapper::ViewState;
use crate::bridge::xr_events::ViewerPoseUpdated;
use crate::engine::assets::tracking_config::TrackingConfig;

/// Marks the camera that mirrors the XR viewer.
#[derive(Component, Default)]
pub struct XrViewCamera;

/// Move the view camera to the most recent viewer pose.
pub fn apply_viewer_pose(
    mut poses: EventReader<ViewerPoseUpdated>,
    mut cameras: Query<&mut Transform, With<XrViewCamera>>,
) {
    let Some(ViewerPoseUpdated(pose)) = poses.read().last().copied() else {
        return;
    };
    for mut transform in &mut cameras {
        *transform = Transform::from_matrix(pose);
    }
}

/// Give the view camera the near plane the detector encodes depth against.
pub fn apply_camera_near(
    config: Res<TrackingConfig>,
    mut projections: Query<&mut Projection, With<XrViewCamera>>,
) {
    for mut projection in &mut projections {
        if let Projection::Perspective(perspective) = projection.as_mut() {
            if perspective.near != config.camera_near {
                info!("Camera near plane set to {}", config.camera_near);
                perspective.near = config.camera_near;
            }
        }
    }
}

/// Publish the view camera's render size and transforms for unprojection.
pub fn sync_view_state(
    cameras: Query<(&Camera, &Transform), With<XrViewCamera>>,
    mut view_state: ResMut<ViewState>,
) {
    let Ok((camera, transform)) = cameras.single() else {
        return;
    };
    let Some(size) = camera.physical_viewport_size() else {
        return;
    };
    if size.x == 0 || size.y == 0 {
        return;
    }

    let next = ViewState {
        width: size.x as f32,
        height: size.y as f32,
        view: transform.compute_matrix().inverse(),
        projection: camera.clip_from_view(),
    };
    if *view_state != next {
        *view_state = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_pose_wins() {
        let mut app = App::new();
        app.add_event::<ViewerPoseUpdated>()
            .add_systems(Update, apply_viewer_pose);
        let camera = app
            .world_mut()
            .spawn((XrViewCamera, Transform::default()))
            .id();

        let first = Mat4::from_translation(Vec3::new(1.0, 0.0, 0.0));
        let last = Mat4::from_translation(Vec3::new(0.0, 1.6, -0.3));
        app.world_mut().send_event(ViewerPoseUpdated(first));
        app.world_mut().send_event(ViewerPoseUpdated(last));
        app.update();

        let transform = app.world().get::<Transform>(camera).unwrap();
        assert!(
            transform
                .translation
                .abs_diff_eq(Vec3::new(0.0, 1.6, -0.3), 1e-5)
        );
    }

    #[test]
    fn configured_near_round_trips_hand_depth() {
        use bevy::render::camera::CameraProjection;

        use super::super::coordinate_mapper::screen_to_world;
        use crate::tracking::hand_pose::{DepthModel, RawHand, RawKeypoint};
        use crate::tracking::landmarks::Handedness;

        let config = TrackingConfig {
            camera_near: 0.2,
            hand_distance: 0.5,
            ..Default::default()
        };
        let mut app = App::new();
        app.insert_resource(config.clone())
            .add_systems(Update, apply_camera_near);
        let camera = app
            .world_mut()
            .spawn((XrViewCamera, Projection::Perspective(default())))
            .id();

        app.update();

        let projection = app.world().get::<Projection>(camera).unwrap();
        let Projection::Perspective(perspective) = projection else {
            panic!("view camera should keep a perspective projection");
        };
        assert_eq!(perspective.near, 0.2);

        let hand = RawHand {
            handedness: Handedness::Right,
            score: 1.0,
            keypoints: vec![RawKeypoint { x: 320.0, y: 240.0 }],
            keypoints_3d: Vec::new(),
        };
        let depth = DepthModel {
            hand_distance: config.hand_distance,
            camera_near: config.camera_near,
        };
        let point = hand.normalize(640, 480, depth).landmarks[0];

        let view = ViewState {
            width: 640.0,
            height: 480.0,
            view: Mat4::IDENTITY,
            projection: perspective.get_clip_from_view(),
        };
        let world = screen_to_world(point.x, point.y, point.z, &view);
        assert!(world.abs_diff_eq(Vec3::new(0.0, 0.0, -0.5), 1e-4));
    }

    #[test]
    fn view_state_untouched_without_camera() {
        let mut app = App::new();
        let custom = ViewState {
            width: 640.0,
            height: 480.0,
            ..Default::default()
        };
        app.insert_resource(custom)
            .add_systems(Update, sync_view_state);

        app.update();

        assert_eq!(*app.world().resource::<ViewState>(), custom);
    }
}
