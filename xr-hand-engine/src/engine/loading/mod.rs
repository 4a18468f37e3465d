//! Startup loading of the tracking configuration.

/// Config asset request and resolution, with fallback to defaults.
pub mod config_loader;

/// Loading flags gating the transition out of `AppState::Loading`.
pub mod progress;
