/// Tracking configuration, relative to the Bevy asset root.
pub const TRACKING_CONFIG_PATH: &str = "config/tracking.json";
