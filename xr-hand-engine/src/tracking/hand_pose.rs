use serde::Deserialize;

use super::landmarks::{DetectedHand, Handedness, NormalizedPoint};
use crate::engine::camera::coordinate_mapper::ndc_depth_from_distance;

/// One hand as returned by `estimateHands`: pixel keypoints plus metric
/// 3D keypoints relative to the hand's centre.
#[derive(Debug, Clone, Deserialize)]
pub struct RawHand {
    pub handedness: Handedness,
    pub score: f32,
    pub keypoints: Vec<RawKeypoint>,
    #[serde(default, rename = "keypoints3D")]
    pub keypoints_3d: Vec<RawKeypoint3d>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RawKeypoint {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RawKeypoint3d {
    #[serde(default)]
    pub z: f32,
}

/// Depth mapping applied to keypoints: the hand is assumed to sit
/// `hand_distance` metres in front of a camera with the given near plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthModel {
    pub hand_distance: f32,
    pub camera_near: f32,
}

impl RawHand {
    /// Normalize pixel keypoints by the frame size and derive each point's
    /// NDC depth from its 3D offset. Missing 3D keypoints count as zero offset.
    pub fn normalize(&self, width: u32, height: u32, depth: DepthModel) -> DetectedHand {
        let (w, h) = (width.max(1) as f32, height.max(1) as f32);
        let landmarks = self
            .keypoints
            .iter()
            .enumerate()
            .map(|(i, kp)| {
                let offset = self.keypoints_3d.get(i).map_or(0.0, |kp3| kp3.z);
                let z = ndc_depth_from_distance(depth.hand_distance + offset, depth.camera_near);
                NormalizedPoint::new(kp.x / w, kp.y / h, z)
            })
            .collect();

        DetectedHand {
            handedness: self.handedness,
            score: self.score,
            landmarks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEPTH: DepthModel = DepthModel {
        hand_distance: 0.5,
        camera_near: 0.1,
    };

    fn parse(json: &str) -> Vec<RawHand> {
        serde_json::from_str(json).expect("valid detector output")
    }

    #[test]
    fn normalizes_pixels_by_frame_size() {
        let hands = parse(
            r#"[{
                "handedness": "Left",
                "score": 0.8,
                "keypoints": [{"x": 320, "y": 240, "name": "wrist"}],
                "keypoints3D": [{"x": 0.0, "y": 0.0, "z": 0.0, "name": "wrist"}]
            }]"#,
        );
        let hand = hands[0].normalize(640, 480, DEPTH);

        assert_eq!(hand.handedness, Handedness::Left);
        assert_eq!(hand.landmarks.len(), 1);
        let point = hand.landmarks[0];
        assert!((point.x - 0.5).abs() < 1e-6);
        assert!((point.y - 0.5).abs() < 1e-6);
        assert!((point.z - 0.2).abs() < 1e-6);
    }

    #[test]
    fn missing_3d_keypoints_use_hand_distance() {
        let hands = parse(
            r#"[{"handedness": "Right", "score": 0.7, "keypoints": [{"x": 0, "y": 0}, {"x": 64, "y": 48}]}]"#,
        );
        let hand = hands[0].normalize(640, 480, DEPTH);

        assert_eq!(hand.landmarks[1], NormalizedPoint::new(0.1, 0.1, 0.2));
    }

    #[test]
    fn closer_keypoints_get_larger_depth() {
        let hands = parse(
            r#"[{
                "handedness": "Right",
                "score": 0.9,
                "keypoints": [{"x": 10, "y": 10}, {"x": 20, "y": 20}],
                "keypoints3D": [{"z": 0.05}, {"z": -0.05}]
            }]"#,
        );
        let hand = hands[0].normalize(100, 100, DEPTH);

        assert!(hand.landmarks[1].z > hand.landmarks[0].z);
    }
}
