use thiserror::Error;

/// Failures raised once while bringing up the render surface, the immersive
/// session or the detector. These abort the session and are shown to the user.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("Canvas element doesn't exist: {0}")]
    MissingCanvas(&'static str),
    #[error("Could not obtain rendering context")]
    MissingRenderingContext,
    #[error("Could not find DOM Overlay: {0}")]
    MissingOverlay(&'static str),
    #[error("Page element doesn't exist: {0}")]
    MissingElement(&'static str),
    #[error("WebXR is not available in this browser")]
    XrUnavailable,
    #[error("{0}")]
    Platform(String),
}

/// Failures scoped to a single animation frame. The loop reports them and
/// carries on with the next frame.
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("landmark index {index} out of range for {len} detected landmarks")]
    LandmarkOutOfRange { index: usize, len: usize },
    #[error("invalid camera frame size {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("could not create offscreen framebuffer")]
    FramebufferUnavailable,
    #[error("offscreen framebuffer incomplete (status 0x{0:x})")]
    IncompleteFramebuffer(u32),
    #[error("pixel readback failed: {0}")]
    ReadFailed(String),
    #[error("camera image unavailable: {0}")]
    CameraImage(String),
    #[error("hand detection failed: {0}")]
    Detection(String),
}

impl FrameError {
    /// Conditions that mean "no usable detection this frame" rather than a
    /// fault worth surfacing.
    pub fn is_skip(&self) -> bool {
        matches!(self, Self::LandmarkOutOfRange { .. })
    }
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for SetupError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Self::Platform(crate::xr::bindings::describe_js_error(&value))
    }
}
