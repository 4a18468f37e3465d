//! Browser glue for the immersive session (wasm32 only).
//!
//! Implements the tracking traits against WebXR, WebGL2, the
//! hand-pose-detection global and the DOM overlay, and wires the session
//! into the Bevy app through the XR event queue.

/// `wasm-bindgen` declarations for the WebXR types `web-sys` keeps unstable.
pub mod bindings;

/// "Enter AR" button, session request and frame callback wiring.
pub mod bootstrap;

/// Hand-pose-detection model wrapper.
pub mod detector;

/// Framebuffer readback on the XR-compatible WebGL2 context.
pub mod gl;

/// DOM overlay status text and alert-based error reporting.
pub mod overlay;

/// Viewer pose, camera lookup and camera image access per frame.
pub mod session;
