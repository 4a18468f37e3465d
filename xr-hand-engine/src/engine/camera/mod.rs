//! Camera state for mapping detector output into the scene.
//!
//! The render camera follows the XR viewer pose; its render size and
//! transforms are captured into [`coordinate_mapper::ViewState`] each frame.

/// Screen-to-world unprojection and depth conversion.
pub mod coordinate_mapper;

/// Viewer pose application and `ViewState` publishing systems.
pub mod view_sync;
