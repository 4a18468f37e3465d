use js_sys::{Array, Float32Array, Object, Promise, Reflect};
use wasm_bindgen::prelude::*;
use web_sys::{EventTarget, WebGl2RenderingContext, WebGlTexture};

#[wasm_bindgen]
extern "C" {
    /// `navigator.xr`.
    pub type XrSystem;

    #[wasm_bindgen(method, js_name = requestSession)]
    pub fn request_session(this: &XrSystem, mode: &str, options: &Object) -> Promise;

    #[wasm_bindgen(extends = EventTarget)]
    #[derive(Debug, Clone)]
    pub type XrSession;

    #[wasm_bindgen(method, js_name = requestReferenceSpace)]
    pub fn request_reference_space(this: &XrSession, kind: &str) -> Promise;

    #[wasm_bindgen(method, js_name = requestAnimationFrame)]
    pub fn request_animation_frame(this: &XrSession, callback: &js_sys::Function) -> u32;

    #[wasm_bindgen(method, js_name = updateRenderState)]
    pub fn update_render_state(this: &XrSession, state: &Object);

    pub type XrFrame;

    #[wasm_bindgen(method, js_name = getViewerPose)]
    pub fn get_viewer_pose(this: &XrFrame, space: &XrReferenceSpace) -> Option<XrViewerPose>;

    pub type XrReferenceSpace;

    pub type XrViewerPose;

    #[wasm_bindgen(method, getter)]
    pub fn views(this: &XrViewerPose) -> Array;

    #[wasm_bindgen(method, getter)]
    pub fn transform(this: &XrViewerPose) -> XrRigidTransform;

    pub type XrRigidTransform;

    /// Column-major 4x4 matrix.
    #[wasm_bindgen(method, getter)]
    pub fn matrix(this: &XrRigidTransform) -> Float32Array;

    pub type XrView;

    #[wasm_bindgen(method, getter)]
    pub fn camera(this: &XrView) -> Option<XrCamera>;

    pub type XrCamera;

    #[wasm_bindgen(method, getter)]
    pub fn width(this: &XrCamera) -> u32;

    #[wasm_bindgen(method, getter)]
    pub fn height(this: &XrCamera) -> u32;

    #[wasm_bindgen(js_name = XRWebGLBinding)]
    pub type XrWebGlBinding;

    #[wasm_bindgen(constructor, js_class = "XRWebGLBinding", catch)]
    pub fn new(
        session: &XrSession,
        context: &WebGl2RenderingContext,
    ) -> Result<XrWebGlBinding, JsValue>;

    #[wasm_bindgen(method, catch, js_name = getCameraImage)]
    pub fn get_camera_image(
        this: &XrWebGlBinding,
        camera: &XrCamera,
    ) -> Result<Option<WebGlTexture>, JsValue>;

    #[wasm_bindgen(js_name = XRWebGLLayer)]
    pub type XrWebGlLayer;

    #[wasm_bindgen(constructor, js_class = "XRWebGLLayer", catch)]
    pub fn new(
        session: &XrSession,
        context: &WebGl2RenderingContext,
    ) -> Result<XrWebGlLayer, JsValue>;
}

/// `navigator.xr`, if the browser exposes WebXR.
pub fn xr_system(navigator: &web_sys::Navigator) -> Option<XrSystem> {
    let xr = Reflect::get(navigator, &JsValue::from_str("xr")).ok()?;
    if xr.is_undefined() || xr.is_null() {
        return None;
    }
    Some(xr.unchecked_into())
}

/// Best-effort message for a rejected promise or thrown JS value.
pub fn describe_js_error(value: &JsValue) -> String {
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    value
        .as_string()
        .unwrap_or_else(|| format!("{value:?}"))
}
