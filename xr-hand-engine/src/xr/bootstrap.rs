use std::rc::Rc;

use bevy::prelude::*;
use constants::overlay::{
    DOM_OVERLAY_CONTAINER_SELECTOR, DOM_OVERLAY_TEXT_SELECTOR, ENTER_AR_BUTTON_SELECTOR,
    XR_CANVAS_SELECTOR,
};
use js_sys::{Array, Object, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{Document, Element, HtmlCanvasElement, WebGl2RenderingContext};

use super::bindings::{
    XrFrame, XrReferenceSpace, XrSession, XrWebGlBinding, XrWebGlLayer, xr_system,
};
use super::detector::TfjsHandDetector;
use super::overlay::{DomOverlay, alert_user};
use super::session::WebXrFrameSource;
use crate::bridge::xr_events::{XrEvent, XrEventQueue};
use crate::engine::assets::tracking_config::TrackingConfig;
use crate::engine::core::app_state::AppState;
use crate::tracking::detection_loop::{FrameStep, HandTrackingLoop};
use crate::tracking::error::SetupError;

const SESSION_MODE: &str = "immersive-ar";
const REFERENCE_SPACE: &str = "local";
const REQUIRED_FEATURES: [&str; 2] = ["dom-overlay", "camera-access"];

type WebTrackingLoop =
    HandTrackingLoop<WebXrFrameSource, WebGl2RenderingContext, TfjsHandDetector, DomOverlay>;

/// Hooks the "Enter AR" button once the tracking config is available.
pub struct XrSessionPlugin;

impl Plugin for XrSessionPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(AppState::Ready), attach_enter_button);
    }
}

fn attach_enter_button(
    config: Res<TrackingConfig>,
    queue: Res<XrEventQueue>,
    mut attached: Local<bool>,
) {
    if *attached {
        return;
    }

    match bind_enter_button(config.clone(), queue.clone()) {
        Ok(()) => {
            *attached = true;
            info!("Enter AR button ready");
        }
        Err(err) => {
            error!("Could not attach Enter AR button: {}", err);
            alert_user(&err.to_string());
        }
    }
}

fn bind_enter_button(config: TrackingConfig, queue: XrEventQueue) -> Result<(), SetupError> {
    let button = find_element(&document()?, ENTER_AR_BUTTON_SELECTOR)?;

    let closure = Closure::wrap(Box::new(move || {
        let config = config.clone();
        let queue = queue.clone();
        spawn_local(async move {
            if let Err(err) = start_session(&config, queue).await {
                error!("Could not start AR session: {}", err);
                alert_user(&err.to_string());
            }
        });
    }) as Box<dyn FnMut()>);

    button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;

    // Prevent closure from being dropped by transferring ownership to JS.
    closure.forget();
    Ok(())
}

async fn start_session(config: &TrackingConfig, queue: XrEventQueue) -> Result<(), SetupError> {
    let window = web_sys::window().ok_or(SetupError::Platform("no window".to_string()))?;
    let document = document()?;

    let overlay_root = find_overlay(&document, DOM_OVERLAY_CONTAINER_SELECTOR)?;
    let overlay_text = find_overlay(&document, DOM_OVERLAY_TEXT_SELECTOR)?;
    let gl = xr_rendering_context(&document)?;

    let xr = xr_system(&window.navigator()).ok_or(SetupError::XrUnavailable)?;
    let session: XrSession =
        JsFuture::from(xr.request_session(SESSION_MODE, &session_options(&overlay_root)?))
            .await?
            .unchecked_into();
    info!("→ Immersive session granted");

    let layer = XrWebGlLayer::new(&session, &gl)?;
    let render_state = Object::new();
    Reflect::set(&render_state, &"baseLayer".into(), &layer)?;
    session.update_render_state(&render_state);

    let space: XrReferenceSpace = JsFuture::from(session.request_reference_space(REFERENCE_SPACE))
        .await?
        .unchecked_into();
    let binding = XrWebGlBinding::new(&session, &gl)?;

    let detector = TfjsHandDetector::create(config).await?;
    info!(
        "Hand detector ready ({}, {})",
        config.detector.runtime, config.detector.model_type
    );

    let source = WebXrFrameSource::new(session.clone(), space, binding);
    let tracking = Rc::new(HandTrackingLoop::new(
        source,
        gl,
        detector,
        DomOverlay::new(overlay_text),
        config,
        queue.clone(),
    ));

    install_frame_callback(&tracking);
    watch_session_end(&tracking, queue.clone())?;

    queue.push(XrEvent::SessionStarted);
    tracking.source().request_animation_frame();
    Ok(())
}

fn install_frame_callback(tracking: &Rc<WebTrackingLoop>) {
    let frame_loop = tracking.clone();
    let callback = Closure::wrap(Box::new(move |_time: f64, frame: XrFrame| {
        let FrameStep::Detect(pending) = frame_loop.on_frame(&frame) else {
            return;
        };
        let detect_loop = frame_loop.clone();
        spawn_local(async move {
            let outcome = detect_loop.detect(pending).await;
            trace!("Frame {}: {:?}", detect_loop.frames_seen(), outcome);
        });
    }) as Box<dyn FnMut(f64, XrFrame)>);

    tracking
        .source()
        .set_callback(callback.into_js_value().unchecked_into());
}

fn watch_session_end(tracking: &Rc<WebTrackingLoop>, queue: XrEventQueue) -> Result<(), SetupError> {
    let ended_loop = tracking.clone();
    let on_end = Closure::once_into_js(move || {
        ended_loop.source().clear_callback();
        queue.push(XrEvent::SessionEnded);
        info!(
            "→ Immersive session ended after {} frames",
            ended_loop.frames_seen()
        );
    });

    tracking
        .source()
        .session()
        .add_event_listener_with_callback("end", on_end.unchecked_ref())?;
    Ok(())
}

fn session_options(overlay_root: &Element) -> Result<Object, SetupError> {
    let features: Array = REQUIRED_FEATURES.iter().map(|f| JsValue::from_str(f)).collect();

    let dom_overlay = Object::new();
    Reflect::set(&dom_overlay, &"root".into(), overlay_root)?;

    let options = Object::new();
    Reflect::set(&options, &"requiredFeatures".into(), &features)?;
    Reflect::set(&options, &"domOverlay".into(), &dom_overlay)?;
    Ok(options)
}

/// WebGL2 context of the dedicated XR canvas, created xrCompatible so it can
/// back the session layer and the camera binding.
fn xr_rendering_context(document: &Document) -> Result<WebGl2RenderingContext, SetupError> {
    let canvas = find_element(document, XR_CANVAS_SELECTOR)
        .map_err(|_| SetupError::MissingCanvas(XR_CANVAS_SELECTOR))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| SetupError::MissingCanvas(XR_CANVAS_SELECTOR))?;

    let attributes = Object::new();
    Reflect::set(&attributes, &"xrCompatible".into(), &JsValue::TRUE)?;

    canvas
        .get_context_with_context_options("webgl2", &attributes)?
        .ok_or(SetupError::MissingRenderingContext)?
        .dyn_into::<WebGl2RenderingContext>()
        .map_err(|_| SetupError::MissingRenderingContext)
}

fn document() -> Result<Document, SetupError> {
    web_sys::window()
        .and_then(|window| window.document())
        .ok_or(SetupError::Platform("no document".to_string()))
}

fn find_element(document: &Document, selector: &'static str) -> Result<Element, SetupError> {
    document
        .query_selector(selector)?
        .ok_or(SetupError::MissingElement(selector))
}

fn find_overlay(document: &Document, selector: &'static str) -> Result<Element, SetupError> {
    find_element(document, selector).map_err(|err| match err {
        SetupError::MissingElement(selector) => SetupError::MissingOverlay(selector),
        other => other,
    })
}
