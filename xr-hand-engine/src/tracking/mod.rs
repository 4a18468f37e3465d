//! Platform-independent hand tracking pipeline.
//!
//! Everything here is written against small traits so the per-frame logic
//! runs the same against WebXR/WebGL2 in the browser and against fakes in
//! tests:
//!
//! ```text
//! on_frame ── reschedule ── viewer pose ── camera lookup ── camera image
//!                                                             │
//!                                                       read_frame (GPU → CPU)
//!                                                             │
//! detect ──── HandDetector ── select_points_of_interest ── XrEventQueue
//! ```

/// Per-frame driver: rescheduling, camera lookup, readback, detection and
/// marker submission with error containment.
pub mod detection_loop;

/// Setup and per-frame error types.
pub mod error;

/// Offscreen-framebuffer readback of camera textures into RGBA8 buffers.
pub mod frame_reader;

/// Detector output parsing and normalization into frame-relative points.
pub mod hand_pose;

/// Landmark data types and points-of-interest selection.
pub mod landmarks;
