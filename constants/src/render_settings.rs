use bevy::prelude::*;

/// Initial camera position before the first viewer pose arrives.
pub const CAMERA_START_POSITION: Vec3 = Vec3::new(0.0, 5.0, -10.0);

/// Near plane used by the default perspective projection.
pub const CAMERA_NEAR: f32 = 0.1;

pub const AMBIENT_LIGHT_BRIGHTNESS: f32 = 0.7 * 1000.0;

pub const MARKER_RADIUS: f32 = 0.05;
pub const MARKER_COLOUR: [f32; 4] = [1.0, 0.2, 0.2, 1.0];

/// Metres from the camera at which a detected wrist is assumed to sit.
pub const DEFAULT_HAND_DISTANCE: f32 = 0.5;
