//! Hand-off between the WebXR frame callback and the Bevy schedule.
//!
//! The immersive session drives its own `requestAnimationFrame` chain outside
//! of Bevy. Anything that chain produces for the scene goes through a shared
//! queue that a Bevy system drains once per frame:
//!
//! ```text
//! XRSession rAF callback             Bevy (PreUpdate)
//!        │                                  │
//!        ├─ XrEvent::ViewerPose ──────────> ├─ ViewerPoseUpdated
//!        ├─ XrEvent::HandLandmarks ───────> ├─ HandLandmarksDetected
//!        └─ XrEvent::SessionStarted/Ended ─>└─ SessionLifecycleEvent
//! ```

/// Shared XR event queue and the plugin translating it into Bevy events.
pub mod xr_events;
