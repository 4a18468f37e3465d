use bevy::log::error;
use web_sys::Element;

use crate::tracking::detection_loop::{ErrorSink, StatusSink};
use crate::tracking::error::FrameError;

/// Text element inside the DOM overlay, visible on top of the AR view.
pub struct DomOverlay {
    text: Element,
}

impl DomOverlay {
    pub fn new(text: Element) -> Self {
        Self { text }
    }
}

impl StatusSink for DomOverlay {
    fn show_status(&self, text: &str) {
        self.text.set_text_content(Some(text));
    }
}

impl ErrorSink for DomOverlay {
    fn report_error(&self, error: &FrameError) {
        alert_user(&error.to_string());
    }
}

pub fn alert_user(message: &str) {
    let Some(window) = web_sys::window() else {
        error!("No window to alert: {}", message);
        return;
    };
    if window.alert_with_message(message).is_err() {
        error!("Alert failed: {}", message);
    }
}
