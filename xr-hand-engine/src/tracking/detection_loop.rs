use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;

use bevy::log::{debug, error};
use bevy::math::Mat4;
use constants::overlay::{STATUS_HANDEDNESS_SUFFIX, STATUS_NO_HANDS};

use super::error::FrameError;
use super::frame_reader::{PixelBuffer, PixelTransfer, read_frame};
use super::landmarks::{DetectedHand, LandmarkOfInterest, select_points_of_interest};
use crate::bridge::xr_events::{XrEvent, XrEventQueue};
use crate::engine::assets::tracking_config::TrackingConfig;

/// Camera exposed by one view of the viewer pose, with its image size.
pub struct CameraView<C> {
    pub camera: C,
    pub width: u32,
    pub height: u32,
}

/// Per-frame access to the immersive session.
pub trait ImmersiveFrameSource {
    type Frame;
    type Camera;
    type Texture;

    /// Ask the platform to invoke the frame callback once more.
    fn request_animation_frame(&self);

    /// World-from-viewer transform for this frame, if the pose is known.
    fn viewer_transform(&self, frame: &Self::Frame) -> Option<Mat4>;

    /// First view of the viewer pose that carries a camera.
    fn find_camera(&self, frame: &Self::Frame) -> Option<CameraView<Self::Camera>>;

    /// Current camera image as a GPU texture, valid until the frame ends.
    fn camera_image(&self, camera: &Self::Camera) -> Result<Option<Self::Texture>, FrameError>;
}

pub trait HandDetector {
    fn estimate_hands(
        &self,
        pixels: &PixelBuffer,
    ) -> impl Future<Output = Result<Vec<DetectedHand>, FrameError>>;
}

/// Human-readable tracking status.
pub trait StatusSink {
    fn show_status(&self, text: &str);
}

/// Destination for per-frame failures worth telling the user about.
pub trait ErrorSink {
    fn report_error(&self, error: &FrameError);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Markers were already placed and the place-once gate is on.
    Gated,
    NoCamera,
    /// A previous detection is still running; this frame is dropped.
    Busy,
    NoCameraImage,
    NoHand,
    HandFound { markers: usize },
    /// The detection was unusable (e.g. too few landmarks).
    Skipped,
    /// An error was reported through the error sink.
    Failed,
}

/// Result of the synchronous half of a frame.
pub enum FrameStep {
    Done(FrameOutcome),
    Detect(PendingDetection),
}

/// Pixels waiting for the detector. Holds the in-flight flag until dropped.
pub struct PendingDetection {
    pixels: PixelBuffer,
    _in_flight: InFlight,
}

struct InFlight(Rc<Cell<bool>>);

impl InFlight {
    fn begin(flag: &Rc<Cell<bool>>) -> Self {
        flag.set(true);
        Self(flag.clone())
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Session-scoped loop state. A new session builds a new loop.
#[derive(Default)]
pub struct LoopState {
    placed: Cell<bool>,
    in_flight: Rc<Cell<bool>>,
    frames: Cell<u64>,
}

/// Drives camera readback, hand detection and marker submission from the
/// session's animation frame callback.
///
/// Each frame first requests its successor, so a failing frame never stops
/// the chain. The frame object is only valid inside the callback, hence the
/// split into [`Self::on_frame`] (synchronous) and [`Self::detect`] (awaits
/// the detector). Frames arriving while a detection is pending are dropped.
pub struct HandTrackingLoop<S, G, D, U> {
    source: S,
    gl: G,
    detector: D,
    ui: U,
    landmarks: Vec<LandmarkOfInterest>,
    place_once: bool,
    queue: XrEventQueue,
    state: LoopState,
}

impl<S, G, D, U> HandTrackingLoop<S, G, D, U>
where
    S: ImmersiveFrameSource,
    G: PixelTransfer<Texture = S::Texture>,
    D: HandDetector,
    U: StatusSink + ErrorSink,
{
    pub fn new(
        source: S,
        gl: G,
        detector: D,
        ui: U,
        config: &TrackingConfig,
        queue: XrEventQueue,
    ) -> Self {
        Self {
            source,
            gl,
            detector,
            ui,
            landmarks: config.landmarks.clone(),
            place_once: config.place_once,
            queue,
            state: LoopState::default(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn frames_seen(&self) -> u64 {
        self.state.frames.get()
    }

    /// Synchronous part of a frame; must run inside the platform callback.
    pub fn on_frame(&self, frame: &S::Frame) -> FrameStep {
        self.source.request_animation_frame();
        self.state.frames.set(self.state.frames.get() + 1);

        match self.begin(frame) {
            Ok(step) => step,
            Err(err) => FrameStep::Done(self.contain(err)),
        }
    }

    /// Run the detector on pixels read by [`Self::on_frame`] and submit markers.
    pub async fn detect(&self, pending: PendingDetection) -> FrameOutcome {
        match self.finish(&pending.pixels).await {
            Ok(outcome) => outcome,
            Err(err) => self.contain(err),
        }
    }

    /// Both halves back to back.
    pub async fn run_frame(&self, frame: &S::Frame) -> FrameOutcome {
        match self.on_frame(frame) {
            FrameStep::Done(outcome) => outcome,
            FrameStep::Detect(pending) => self.detect(pending).await,
        }
    }

    fn begin(&self, frame: &S::Frame) -> Result<FrameStep, FrameError> {
        // Published on every frame, gated or not.
        if let Some(pose) = self.source.viewer_transform(frame) {
            self.queue.push(XrEvent::ViewerPose(pose));
        }

        if self.place_once && self.state.placed.get() {
            return Ok(FrameStep::Done(FrameOutcome::Gated));
        }

        let Some(view) = self.source.find_camera(frame) else {
            return Ok(FrameStep::Done(FrameOutcome::NoCamera));
        };

        if self.state.in_flight.get() {
            return Ok(FrameStep::Done(FrameOutcome::Busy));
        }

        let Some(texture) = self.source.camera_image(&view.camera)? else {
            return Ok(FrameStep::Done(FrameOutcome::NoCameraImage));
        };
        let pixels = read_frame(&self.gl, &texture, view.width, view.height)?;

        Ok(FrameStep::Detect(PendingDetection {
            pixels,
            _in_flight: InFlight::begin(&self.state.in_flight),
        }))
    }

    async fn finish(&self, pixels: &PixelBuffer) -> Result<FrameOutcome, FrameError> {
        let hands = self.detector.estimate_hands(pixels).await?;

        let Some(hand) = hands.first() else {
            self.ui.show_status(STATUS_NO_HANDS);
            return Ok(FrameOutcome::NoHand);
        };
        self.ui
            .show_status(&format!("{} - {}", hand.handedness, STATUS_HANDEDNESS_SUFFIX));
        debug!("{} hand, score {:.2}", hand.handedness, hand.score);

        let markers = select_points_of_interest(&hand.landmarks, &self.landmarks)?;
        let count = markers.len();
        self.queue.push(XrEvent::HandLandmarks(markers));
        self.state.placed.set(true);

        Ok(FrameOutcome::HandFound { markers: count })
    }

    fn contain(&self, err: FrameError) -> FrameOutcome {
        if err.is_skip() {
            debug!("Skipping frame {}: {}", self.state.frames.get(), err);
            return FrameOutcome::Skipped;
        }
        error!("Hand tracking frame failed: {}", err);
        self.ui.report_error(&err);
        FrameOutcome::Failed
    }
}
