//! Head-mounted display viewer input
//!
//! A phone-in-headset viewer has a single physical trigger and a pair of eye
//! transforms supplied by the platform's head tracker.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use glam::Mat4;

/// Supplies eye view matrices from the platform's head tracking
pub trait HeadTracker {
    /// Current (left, right) eye transforms, or `None` if tracking is unavailable
    fn eye_views(&mut self) -> Option<(Mat4, Mat4)>;

    /// Re-centers the tracker
    fn reset(&mut self) {}
}

/// Cloneable handle for firing the trigger from another thread
#[derive(Debug, Clone)]
pub struct HeadsetTrigger(Arc<AtomicBool>);

impl HeadsetTrigger {
    pub fn fire(&self) {
        self.0.store(true, Ordering::Release);
    }
}

/// Trigger edge and eye transforms for a head-mounted viewer
pub struct Headset {
    in_headset: bool,
    pending_trigger: Arc<AtomicBool>,
    triggered: bool,
    left_eye_transform: Mat4,
    right_eye_transform: Mat4,
    tracker: Option<Box<dyn HeadTracker>>,
}

impl Headset {
    pub fn new() -> Self {
        Self {
            in_headset: false,
            pending_trigger: Arc::new(AtomicBool::new(false)),
            triggered: false,
            left_eye_transform: Mat4::IDENTITY,
            right_eye_transform: Mat4::IDENTITY,
            tracker: None,
        }
    }

    pub fn set_tracker(&mut self, tracker: Box<dyn HeadTracker>) {
        self.tracker = Some(tracker);
    }

    pub fn trigger_handle(&self) -> HeadsetTrigger {
        HeadsetTrigger(Arc::clone(&self.pending_trigger))
    }

    /// Registers a trigger press; it becomes visible on the next advance
    pub fn on_trigger(&mut self) {
        self.pending_trigger.store(true, Ordering::Release);
    }

    /// Refreshes transforms, then publishes any pending trigger for one frame
    pub fn advance_frame(&mut self) {
        if let Some((left, right)) = self.tracker.as_mut().and_then(|t| t.eye_views()) {
            self.left_eye_transform = left;
            self.right_eye_transform = right;
        }
        self.triggered = self.pending_trigger.swap(false, Ordering::AcqRel);
    }

    pub fn reset_head_tracker(&mut self) {
        if let Some(tracker) = self.tracker.as_mut() {
            tracker.reset();
        }
    }

    /// True for exactly one frame after each trigger press
    pub fn triggered(&self) -> bool {
        self.triggered
    }

    pub fn in_headset(&self) -> bool {
        self.in_headset
    }

    pub fn set_in_headset(&mut self, in_headset: bool) {
        self.in_headset = in_headset;
    }

    pub fn left_eye_transform(&self) -> Mat4 {
        self.left_eye_transform
    }

    pub fn right_eye_transform(&self) -> Mat4 {
        self.right_eye_transform
    }
}

impl Default for Headset {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Headset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Headset")
            .field("in_headset", &self.in_headset)
            .field("triggered", &self.triggered)
            .field("has_tracker", &self.tracker.is_some())
            .finish()
    }
}
