//! Runtime configuration assets.

/// Tracking configuration loaded from JSON: landmarks of interest, marker
/// appearance, detector options and the place-once gate.
pub mod tracking_config;
