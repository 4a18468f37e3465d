/// Canvas Bevy renders into, placed inside the DOM overlay container.
pub const RENDER_CANVAS_SELECTOR: &str = "#bevy";

/// Canvas owning the WebGL2 context bound to the XR session.
pub const XR_CANVAS_SELECTOR: &str = "#xr-canvas";

pub const DOM_OVERLAY_CONTAINER_SELECTOR: &str = "#dom-overlay-container";
pub const DOM_OVERLAY_TEXT_SELECTOR: &str = "#dom-overlay-text";
pub const ENTER_AR_BUTTON_SELECTOR: &str = "#enter-ar";

pub const STATUS_NO_HANDS: &str = "No hands detected";
pub const STATUS_HANDEDNESS_SUFFIX: &str = "handedness detected";
