/// Landmark index of the wrist, the default point of interest.
pub const WRIST_INDEX: usize = 0;

/// Number of keypoints the MediaPipe hand model reports per hand.
pub const HAND_LANDMARK_COUNT: usize = 21;

pub struct LandmarkInfo {
    pub index: usize,
    pub name: &'static str,
}

pub const HAND_LANDMARKS: &[LandmarkInfo] = &[
    LandmarkInfo { index: 0, name: "WRIST" },
    LandmarkInfo { index: 1, name: "THUMB_CMC" },
    LandmarkInfo { index: 2, name: "THUMB_MCP" },
    LandmarkInfo { index: 3, name: "THUMB_IP" },
    LandmarkInfo { index: 4, name: "THUMB_TIP" },
    LandmarkInfo { index: 5, name: "INDEX_FINGER_MCP" },
    LandmarkInfo { index: 6, name: "INDEX_FINGER_PIP" },
    LandmarkInfo { index: 7, name: "INDEX_FINGER_DIP" },
    LandmarkInfo { index: 8, name: "INDEX_FINGER_TIP" },
    LandmarkInfo { index: 9, name: "MIDDLE_FINGER_MCP" },
    LandmarkInfo { index: 10, name: "MIDDLE_FINGER_PIP" },
    LandmarkInfo { index: 11, name: "MIDDLE_FINGER_DIP" },
    LandmarkInfo { index: 12, name: "MIDDLE_FINGER_TIP" },
    LandmarkInfo { index: 13, name: "RING_FINGER_MCP" },
    LandmarkInfo { index: 14, name: "RING_FINGER_PIP" },
    LandmarkInfo { index: 15, name: "RING_FINGER_DIP" },
    LandmarkInfo { index: 16, name: "RING_FINGER_TIP" },
    LandmarkInfo { index: 17, name: "PINKY_MCP" },
    LandmarkInfo { index: 18, name: "PINKY_PIP" },
    LandmarkInfo { index: 19, name: "PINKY_DIP" },
    LandmarkInfo { index: 20, name: "PINKY_TIP" },
];

pub fn get_landmark_name(index: usize) -> Option<&'static str> {
    HAND_LANDMARKS
        .iter()
        .find(|l| l.index == index)
        .map(|l| l.name)
}

pub fn get_landmark_index(name: &str) -> Option<usize> {
    HAND_LANDMARKS
        .iter()
        .find(|l| l.name.eq_ignore_ascii_case(name))
        .map(|l| l.index)
}
