//! In-memory platform backend
//!
//! Events, time and connected joysticks are all driven by the caller. Used
//! by the test suites, the diagnostics in [`crate::health`], and hosts that
//! already own their event loop and just want to feed records in.

use std::collections::VecDeque;

use super::{OpenedJoystick, Platform, TextInputRect};
use crate::input::event::PlatformEvent;
use crate::input::joystick::{JoystickCapabilities, JoystickHandle, JoystickId};

#[derive(Debug, Clone, Copy)]
struct ScriptedDevice {
    id: JoystickId,
    capabilities: JoystickCapabilities,
}

/// Platform whose every input is scripted by the caller
#[derive(Debug, Default)]
pub struct ScriptedPlatform {
    events: VecDeque<PlatformEvent>,
    now_ms: u64,
    devices: Vec<ScriptedDevice>,
    open_handles: Vec<JoystickHandle>,
    next_handle: u64,
    close_calls: usize,
    max_open_handles: usize,
    relative_mouse_mode: bool,
    text_input_active: bool,
    text_input_rect: Option<TextInputRect>,
}

impl ScriptedPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts the clock at a given millisecond value
    pub fn with_time(mut self, now_ms: u64) -> Self {
        self.now_ms = now_ms;
        self
    }

    /// Queues an event for the next drain
    pub fn push_event(&mut self, event: PlatformEvent) {
        self.events.push_back(event);
    }

    pub fn push_events(&mut self, events: impl IntoIterator<Item = PlatformEvent>) {
        self.events.extend(events);
    }

    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    /// Moves the clock forward
    pub fn advance_clock(&mut self, millis: u64) {
        self.now_ms += millis;
    }

    pub fn set_time(&mut self, now_ms: u64) {
        self.now_ms = now_ms;
    }

    /// Appends a device to the enumeration list (does not queue an event)
    pub fn connect_joystick(&mut self, id: JoystickId, capabilities: JoystickCapabilities) {
        self.devices.push(ScriptedDevice { id, capabilities });
    }

    /// Removes a device from the enumeration list (does not queue an event)
    pub fn disconnect_joystick(&mut self, id: JoystickId) {
        self.devices.retain(|device| device.id != id);
    }

    pub fn open_handle_count(&self) -> usize {
        self.open_handles.len()
    }

    /// Highest number of simultaneously open handles seen so far
    pub fn max_open_handles(&self) -> usize {
        self.max_open_handles
    }

    pub fn close_calls(&self) -> usize {
        self.close_calls
    }

    pub fn text_input_active(&self) -> bool {
        self.text_input_active
    }

    pub fn text_input_rect(&self) -> Option<TextInputRect> {
        self.text_input_rect
    }
}

impl Platform for ScriptedPlatform {
    fn poll_event(&mut self) -> Option<PlatformEvent> {
        self.events.pop_front()
    }

    fn ticks_ms(&self) -> u64 {
        self.now_ms
    }

    fn joystick_count(&self) -> usize {
        self.devices.len()
    }

    fn open_joystick(&mut self, index: usize) -> Option<OpenedJoystick> {
        let device = *self.devices.get(index)?;
        self.next_handle += 1;
        let handle = JoystickHandle(self.next_handle);
        self.open_handles.push(handle);
        self.max_open_handles = self.max_open_handles.max(self.open_handles.len());

        Some(OpenedJoystick {
            id: device.id,
            handle,
            capabilities: device.capabilities,
        })
    }

    fn close_joystick(&mut self, handle: JoystickHandle) {
        self.close_calls += 1;
        self.open_handles.retain(|open| *open != handle);
    }

    fn relative_mouse_mode(&self) -> bool {
        self.relative_mouse_mode
    }

    fn set_relative_mouse_mode(&mut self, enabled: bool) {
        self.relative_mouse_mode = enabled;
    }

    fn start_text_input(&mut self) {
        self.text_input_active = true;
    }

    fn stop_text_input(&mut self) {
        self.text_input_active = false;
    }

    fn set_text_input_rect(&mut self, rect: TextInputRect) {
        self.text_input_rect = Some(rect);
    }
}
