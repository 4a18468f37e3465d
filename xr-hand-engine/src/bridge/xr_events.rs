use std::sync::{Arc, Mutex};

use bevy::prelude::*;

use crate::tracking::landmarks::NamedLandmark;

/// Messages produced by the immersive session for the Bevy world.
#[derive(Debug, Clone, PartialEq)]
pub enum XrEvent {
    SessionStarted,
    SessionEnded,
    /// World-from-viewer transform of the current frame.
    ViewerPose(Mat4),
    HandLandmarks(Vec<NamedLandmark>),
}

/// Resource wrapping the queue the XR callback pushes into.
#[derive(Resource, Clone, Default)]
pub struct XrEventQueue(Arc<Mutex<Vec<XrEvent>>>);

impl XrEventQueue {
    pub fn push(&self, event: XrEvent) {
        match self.0.lock() {
            Ok(mut queue) => queue.push(event),
            Err(_) => warn!("XR event queue poisoned, dropping event"),
        }
    }

    pub fn drain(&self) -> Vec<XrEvent> {
        if let Ok(mut queue) = self.0.lock() {
            std::mem::take(&mut *queue)
        } else {
            Vec::new()
        }
    }
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionLifecycleEvent {
    Started,
    Ended,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct ViewerPoseUpdated(pub Mat4);

#[derive(Event, Debug, Clone)]
pub struct HandLandmarksDetected(pub Vec<NamedLandmark>);

pub struct XrBridgePlugin;

impl Plugin for XrBridgePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<XrEventQueue>()
            .add_event::<SessionLifecycleEvent>()
            .add_event::<ViewerPoseUpdated>()
            .add_event::<HandLandmarksDetected>()
            .add_systems(PreUpdate, process_xr_events);
    }
}

fn process_xr_events(
    queue: Res<XrEventQueue>,
    mut lifecycle: EventWriter<SessionLifecycleEvent>,
    mut poses: EventWriter<ViewerPoseUpdated>,
    mut hands: EventWriter<HandLandmarksDetected>,
) {
    for event in queue.drain() {
        match event {
            XrEvent::SessionStarted => {
                info!("Immersive session started");
                lifecycle.write(SessionLifecycleEvent::Started);
            }
            XrEvent::SessionEnded => {
                info!("Immersive session ended");
                lifecycle.write(SessionLifecycleEvent::Ended);
            }
            XrEvent::ViewerPose(pose) => {
                poses.write(ViewerPoseUpdated(pose));
            }
            XrEvent::HandLandmarks(landmarks) => {
                hands.write(HandLandmarksDetected(landmarks));
            }
        }
    }
}
