//! Runtime diagnostics systems.

/// Native status overlay showing app state and placed marker count.
pub mod status_overlay;
