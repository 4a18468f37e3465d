use bevy::prelude::*;
use constants::landmarks::{
    HAND_LANDMARK_COUNT, WRIST_INDEX, get_landmark_index, get_landmark_name,
};
use constants::render_settings::{
    CAMERA_NEAR, DEFAULT_HAND_DISTANCE, MARKER_COLOUR, MARKER_RADIUS,
};
use serde::{Deserialize, Serialize};

use crate::tracking::landmarks::LandmarkOfInterest;

/// Runtime tracking configuration as a Bevy asset. Mirrors the JSON file;
/// every field falls back to its default when omitted.
#[derive(Asset, TypePath, Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    /// Landmarks that get a marker, in placement order.
    pub landmarks: Vec<LandmarkOfInterest>,
    /// Stop detecting after the first successful placement.
    pub place_once: bool,
    pub marker: MarkerSettings,
    pub detector: DetectorSettings,
    /// Assumed distance in metres between camera and hand.
    pub hand_distance: f32,
    pub camera_near: f32,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        let wrist = get_landmark_name(WRIST_INDEX).unwrap_or("WRIST");
        Self {
            landmarks: vec![LandmarkOfInterest::new(WRIST_INDEX, wrist)],
            place_once: false,
            marker: MarkerSettings::default(),
            detector: DetectorSettings::default(),
            hand_distance: DEFAULT_HAND_DISTANCE,
            camera_near: CAMERA_NEAR,
        }
    }
}

impl TrackingConfig {
    /// Entries the hand model can never satisfy, or whose name disagrees with
    /// the model's name for that index.
    pub fn suspicious_landmarks(&self) -> impl Iterator<Item = &LandmarkOfInterest> {
        self.landmarks.iter().filter(|poi| {
            poi.index >= HAND_LANDMARK_COUNT
                || get_landmark_index(&poi.name).is_some_and(|index| index != poi.index)
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerSettings {
    pub radius: f32,
    /// Linear sRGBA components.
    pub colour: [f32; 4],
}

impl Default for MarkerSettings {
    fn default() -> Self {
        Self {
            radius: MARKER_RADIUS,
            colour: MARKER_COLOUR,
        }
    }
}

impl MarkerSettings {
    pub fn colour(&self) -> Color {
        let [r, g, b, a] = self.colour;
        Color::srgba(r, g, b, a)
    }
}

/// Options forwarded to the hand-pose-detection `createDetector` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorSettings {
    pub max_hands: u32,
    /// `"lite"` or `"full"`.
    pub model_type: String,
    /// `"tfjs"` or `"mediapipe"`.
    pub runtime: String,
}

impl Default for DetectorSettings {
    fn default() -> Self {
        Self {
            max_hands: 1,
            model_type: "full".to_string(),
            runtime: "tfjs".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_uses_defaults() {
        let config: TrackingConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, TrackingConfig::default());
        assert_eq!(config.landmarks, vec![LandmarkOfInterest::new(0, "WRIST")]);
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let config: TrackingConfig = serde_json::from_str(
            r#"{
                "place_once": true,
                "marker": { "radius": 0.2 },
                "landmarks": [{ "index": 4, "name": "THUMB_TIP" }]
            }"#,
        )
        .unwrap();

        assert!(config.place_once);
        assert_eq!(config.marker.radius, 0.2);
        assert_eq!(config.marker.colour, MARKER_COLOUR);
        assert_eq!(config.detector, DetectorSettings::default());
        assert_eq!(config.landmarks[0], LandmarkOfInterest::new(4, "THUMB_TIP"));
    }

    #[test]
    fn flags_unreachable_and_misnamed_landmarks() {
        let config = TrackingConfig {
            landmarks: vec![
                LandmarkOfInterest::new(0, "WRIST"),
                LandmarkOfInterest::new(21, "EXTRA"),
                LandmarkOfInterest::new(4, "WRIST"),
                LandmarkOfInterest::new(8, "pointer"),
            ],
            ..Default::default()
        };

        let flagged: Vec<_> = config.suspicious_landmarks().map(|poi| poi.index).collect();
        assert_eq!(flagged, vec![21, 4]);
    }

    #[test]
    fn bundled_config_parses() {
        let raw = include_str!("../../../assets/config/tracking.json");
        let config: TrackingConfig = serde_json::from_str(raw).unwrap();
        assert_eq!(config.landmarks.len(), 2);
        assert_eq!(config.detector.runtime, "tfjs");
    }
}
