pub mod landmarks;
pub mod overlay;
pub mod path;
pub mod render_settings;
