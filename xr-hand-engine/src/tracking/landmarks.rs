use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::FrameError;

/// Landmark position as reported by the detector: x and y relative to the
/// camera frame in `[0, 1]`, z a depth in the unprojection's NDC space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl NormalizedPoint {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NamedLandmark {
    pub name: String,
    pub point: NormalizedPoint,
}

/// One `(index, name)` entry of the points-of-interest table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LandmarkOfInterest {
    pub index: usize,
    pub name: String,
}

impl LandmarkOfInterest {
    pub fn new(index: usize, name: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Handedness {
    Left,
    Right,
}

impl fmt::Display for Handedness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => write!(f, "Left"),
            Self::Right => write!(f, "Right"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetectedHand {
    pub handedness: Handedness,
    pub score: f32,
    pub landmarks: Vec<NormalizedPoint>,
}

/// Tag the requested landmark indices with their names, in request order.
///
/// Fails if the detector returned fewer landmarks than an index requires;
/// nothing is produced in that case so callers can skip the frame whole.
pub fn select_points_of_interest(
    landmarks: &[NormalizedPoint],
    indices: &[LandmarkOfInterest],
) -> Result<Vec<NamedLandmark>, FrameError> {
    indices
        .iter()
        .map(|poi| {
            let point = landmarks
                .get(poi.index)
                .copied()
                .ok_or(FrameError::LandmarkOutOfRange {
                    index: poi.index,
                    len: landmarks.len(),
                })?;
            Ok(NamedLandmark {
                name: poi.name.clone(),
                point,
            })
        })
        .collect()
}
