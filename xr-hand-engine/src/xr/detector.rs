use js_sys::Promise;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::Clamped;
use wasm_bindgen_futures::JsFuture;
use web_sys::ImageData;

use super::bindings::describe_js_error;
use crate::engine::assets::tracking_config::{DetectorSettings, TrackingConfig};
use crate::tracking::detection_loop::HandDetector;
use crate::tracking::error::{FrameError, SetupError};
use crate::tracking::frame_reader::PixelBuffer;
use crate::tracking::hand_pose::{DepthModel, RawHand};
use crate::tracking::landmarks::DetectedHand;

const MODEL_NAME: &str = "MediaPipeHands";

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = handPoseDetection, js_name = createDetector, catch)]
    fn create_detector(model: &str, config: &JsValue) -> Result<Promise, JsValue>;

    type JsHandDetector;

    #[wasm_bindgen(method, catch, js_name = estimateHands)]
    fn estimate_hands(this: &JsHandDetector, image: &ImageData) -> Result<Promise, JsValue>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DetectorConfig<'a> {
    runtime: &'a str,
    model_type: &'a str,
    max_hands: u32,
}

impl<'a> From<&'a DetectorSettings> for DetectorConfig<'a> {
    fn from(settings: &'a DetectorSettings) -> Self {
        Self {
            runtime: &settings.runtime,
            model_type: &settings.model_type,
            max_hands: settings.max_hands,
        }
    }
}

/// MediaPipe hands model through the `handPoseDetection` global.
pub struct TfjsHandDetector {
    inner: JsHandDetector,
    depth: DepthModel,
}

impl TfjsHandDetector {
    pub async fn create(config: &TrackingConfig) -> Result<Self, SetupError> {
        let options = serde_wasm_bindgen::to_value(&DetectorConfig::from(&config.detector))
            .map_err(|err| SetupError::Platform(err.to_string()))?;
        let inner = JsFuture::from(create_detector(MODEL_NAME, &options)?).await?;

        Ok(Self {
            inner: inner.unchecked_into(),
            depth: DepthModel {
                hand_distance: config.hand_distance,
                camera_near: config.camera_near,
            },
        })
    }
}

impl HandDetector for TfjsHandDetector {
    async fn estimate_hands(&self, pixels: &PixelBuffer) -> Result<Vec<DetectedHand>, FrameError> {
        let detection_error = |err: JsValue| FrameError::Detection(describe_js_error(&err));

        let image = ImageData::new_with_u8_clamped_array_and_sh(
            Clamped(pixels.data.as_slice()),
            pixels.width,
            pixels.height,
        )
        .map_err(detection_error)?;

        let promise = self.inner.estimate_hands(&image).map_err(detection_error)?;
        let result = JsFuture::from(promise).await.map_err(detection_error)?;

        let hands: Vec<RawHand> = serde_wasm_bindgen::from_value(result)
            .map_err(|err| FrameError::Detection(err.to_string()))?;

        Ok(hands
            .iter()
            .map(|hand| hand.normalize(pixels.width, pixels.height, self.depth))
            .collect())
    }
}
