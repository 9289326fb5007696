//! Windowing/event collaborator abstraction
//!
//! The [`Platform`] trait is everything the input system needs from the
//! outside world: a drainable event queue, a millisecond clock, joystick
//! enumeration, and a handful of text/mouse mode switches.

mod scripted;
mod winit_backend;

pub use scripted::ScriptedPlatform;
pub use winit_backend::WinitPlatform;

use super::event::PlatformEvent;
use super::joystick::{JoystickCapabilities, JoystickHandle, JoystickId};

/// A joystick the platform opened for event delivery
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenedJoystick {
    /// Stable instance id, unchanged for the lifetime of the physical connection
    pub id: JoystickId,
    pub handle: JoystickHandle,
    pub capabilities: JoystickCapabilities,
}

/// Screen area where IME candidate windows should appear
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextInputRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// Source of platform events and device handles
pub trait Platform {
    /// Pops the next queued event without blocking
    fn poll_event(&mut self) -> Option<PlatformEvent>;

    /// Monotonic milliseconds since an arbitrary epoch
    fn ticks_ms(&self) -> u64;

    /// Number of joysticks currently connected
    fn joystick_count(&self) -> usize {
        0
    }

    /// Opens the joystick at an enumeration index (indices are not stable)
    fn open_joystick(&mut self, _index: usize) -> Option<OpenedJoystick> {
        None
    }

    fn close_joystick(&mut self, _handle: JoystickHandle) {}

    fn relative_mouse_mode(&self) -> bool {
        false
    }

    fn set_relative_mouse_mode(&mut self, _enabled: bool) {}

    fn start_text_input(&mut self) {}

    fn stop_text_input(&mut self) {}

    fn set_text_input_rect(&mut self, _rect: TextInputRect) {}
}
