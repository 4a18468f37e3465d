//! Scene content driven by hand tracking.

/// Named hand markers: registry, shared assets and the placement system.
pub mod markers;
