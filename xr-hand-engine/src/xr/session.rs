use std::cell::RefCell;

use bevy::math::Mat4;
use wasm_bindgen::JsCast;
use web_sys::WebGlTexture;

use super::bindings::{
    XrCamera, XrFrame, XrReferenceSpace, XrSession, XrView, XrWebGlBinding, describe_js_error,
};
use crate::tracking::detection_loop::{CameraView, ImmersiveFrameSource};
use crate::tracking::error::FrameError;

/// Frame source backed by a live immersive session. The binding is created
/// once per session and reused for every camera image.
pub struct WebXrFrameSource {
    session: XrSession,
    space: XrReferenceSpace,
    binding: XrWebGlBinding,
    callback: RefCell<Option<js_sys::Function>>,
}

impl WebXrFrameSource {
    pub fn new(session: XrSession, space: XrReferenceSpace, binding: XrWebGlBinding) -> Self {
        Self {
            session,
            space,
            binding,
            callback: RefCell::new(None),
        }
    }

    pub fn session(&self) -> &XrSession {
        &self.session
    }

    pub fn set_callback(&self, callback: js_sys::Function) {
        *self.callback.borrow_mut() = Some(callback);
    }

    /// Stop rescheduling; the next frame callback is the last one.
    pub fn clear_callback(&self) {
        self.callback.borrow_mut().take();
    }
}

impl ImmersiveFrameSource for WebXrFrameSource {
    type Frame = XrFrame;
    type Camera = XrCamera;
    type Texture = WebGlTexture;

    fn request_animation_frame(&self) {
        if let Some(callback) = self.callback.borrow().as_ref() {
            self.session.request_animation_frame(callback);
        }
    }

    fn viewer_transform(&self, frame: &XrFrame) -> Option<Mat4> {
        let pose = frame.get_viewer_pose(&self.space)?;
        let cols: [f32; 16] = pose.transform().matrix().to_vec().try_into().ok()?;
        Some(Mat4::from_cols_array(&cols))
    }

    fn find_camera(&self, frame: &XrFrame) -> Option<CameraView<XrCamera>> {
        let pose = frame.get_viewer_pose(&self.space)?;
        pose.views()
            .iter()
            .find_map(|view| view.unchecked_into::<XrView>().camera())
            .map(|camera| CameraView {
                width: camera.width(),
                height: camera.height(),
                camera,
            })
    }

    fn camera_image(&self, camera: &XrCamera) -> Result<Option<WebGlTexture>, FrameError> {
        self.binding
            .get_camera_image(camera)
            .map_err(|err| FrameError::CameraImage(describe_js_error(&err)))
    }
}
