//! The per-frame input orchestrator
//!
//! [`InputSystem::advance_frame`] runs once per game-loop tick, strictly in
//! this order:
//!
//! 1. sample the clock
//! 2. clear per-frame edges and deltas on every button, axis, hat and pointer
//! 3. drain the platform queue, dispatching each event to its owner
//! 4. drain the gamepad mailbox filled by the platform callback thread
//! 5. advance the headset, so a trigger delivered in step 3 shows up this frame
//!
//! Consumers read state after the call returns and before the next one.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use glam::{IVec2, Vec2};
use tracing::{debug, error, trace, warn};

use super::axis::{hat_to_vector, normalize_axis};
use super::button::Button;
use super::event::{
    ButtonId, Keycode, LifecycleEvent, MOUSE_BUTTON_LEFT, PlatformEvent, TouchPhase,
};
use super::gamepad::{Gamepad, GamepadDeviceId};
use super::headset::Headset;
use super::joystick::{Joystick, JoystickId, JoystickRegistry};
use super::mailbox::GamepadMailbox;
use super::platform::{Platform, TextInputRect};
use super::pointer::{FingerId, MOUSE_POINTER, Pointer, PointerTable};
use super::text::{TextInputEvent, TextInputLog};
use super::timing::FrameClock;
use crate::config::InputConfig;
use crate::error::InputError;

/// Observer for application lifecycle events, run during the drain
pub type AppEventCallback = Box<dyn FnMut(&LifecycleEvent)>;

/// Owns all input state and turns platform events into per-frame snapshots
pub struct InputSystem<P: Platform> {
    platform: P,
    clock: FrameClock,
    log_frame_rate: bool,

    buttons: HashMap<ButtonId, Button>,
    pointers: PointerTable,
    mouse_wheel_delta: IVec2,
    handle_touch: bool,

    joysticks: JoystickRegistry,
    gamepads: BTreeMap<GamepadDeviceId, Gamepad>,
    gamepad_mailbox: Arc<GamepadMailbox>,
    gamepad_hat_threshold: f32,

    text_input: TextInputLog,
    headset: Headset,

    app_event_callbacks: Vec<AppEventCallback>,
    exit_requested: bool,
    minimized: bool,
    minimized_frame: u64,
}

impl<P: Platform> InputSystem<P> {
    /// Creates the system, starts the clock and opens connected joysticks
    pub fn new(mut platform: P, config: &InputConfig) -> Self {
        let clock = FrameClock::new(platform.ticks_ms(), config.first_frame_delta_ms);

        let mut joysticks = JoystickRegistry::new();
        joysticks.refresh(&mut platform);

        debug!(
            pointer_capacity = config.pointer_capacity,
            mailbox_capacity = config.mailbox_capacity,
            joysticks = joysticks.len(),
            "Input system initialized"
        );

        Self {
            platform,
            clock,
            log_frame_rate: config.log_frame_rate,
            buttons: HashMap::new(),
            pointers: PointerTable::new(config.pointer_capacity),
            mouse_wheel_delta: IVec2::ZERO,
            handle_touch: config.handle_touch,
            joysticks,
            gamepads: BTreeMap::new(),
            gamepad_mailbox: Arc::new(GamepadMailbox::new(config.mailbox_capacity)),
            gamepad_hat_threshold: config.gamepad_hat_threshold,
            text_input: TextInputLog::new(config.record_text_input),
            headset: Headset::new(),
            app_event_callbacks: Vec::new(),
            exit_requested: false,
            minimized: false,
            minimized_frame: 0,
        }
    }

    /// Runs one frame of input processing
    ///
    /// `window_size` is updated in place when the platform reports a resize,
    /// and is used to scale normalized touch coordinates to pixels.
    pub fn advance_frame(&mut self, window_size: &mut IVec2) {
        self.clock.tick(self.platform.ticks_ms());
        if self.log_frame_rate && self.clock.frame_rate_log_due() {
            debug!(delta_time = self.clock.delta_time(), "Frame timing");
        }

        self.reset_frame_state();

        while let Some(event) = self.platform.poll_event() {
            self.handle_event(event, window_size);
        }

        self.handle_gamepad_events();

        self.headset.advance_frame();
    }

    fn reset_frame_state(&mut self) {
        self.mouse_wheel_delta = IVec2::ZERO;
        self.buttons.values_mut().for_each(Button::advance_frame);
        self.pointers.advance_frame();
        self.joysticks.advance_frame();
        self.gamepads.values_mut().for_each(Gamepad::advance_frame);
        self.text_input.advance_frame();
    }

    fn handle_event(&mut self, event: PlatformEvent, window_size: &mut IVec2) {
        match event {
            PlatformEvent::Quit => self.exit_requested = true,

            PlatformEvent::Key {
                keycode,
                pressed,
                repeat,
                modifiers,
            } => {
                self.get_button(ButtonId::Key(keycode)).update(pressed);
                self.text_input.record(TextInputEvent::Key {
                    pressed,
                    repeat,
                    symbol: keycode,
                    modifiers,
                });
            }

            PlatformEvent::MouseButton {
                button,
                pressed,
                position,
            } => {
                self.get_button(mouse_button_id(button)).update(pressed);
                let mouse = self.pointers.mouse_mut();
                mouse.position = position;
                mouse.used = true;
                // Any mouse press doubles as the headset trigger
                if pressed {
                    self.headset.on_trigger();
                }
            }

            PlatformEvent::MouseMotion { delta, position } => {
                let mouse = self.pointers.mouse_mut();
                mouse.delta += delta;
                mouse.position = position;
            }

            PlatformEvent::MouseWheel { delta } => self.mouse_wheel_delta += delta,

            PlatformEvent::Touch {
                phase,
                finger,
                position,
                delta,
            } => {
                if self.handle_touch {
                    self.handle_touch_event(phase, finger, position, delta, *window_size);
                }
            }

            PlatformEvent::JoystickAdded { index } => {
                debug!(index, "Joystick added");
                self.update_connected_joystick_list();
            }

            PlatformEvent::JoystickRemoved { joystick } => {
                debug!(joystick.id = joystick, "Joystick removed");
                self.update_connected_joystick_list();
            }

            PlatformEvent::JoystickAxis {
                joystick,
                axis,
                value,
            } => {
                self.joysticks
                    .get_or_insert(joystick)
                    .get_axis(axis)
                    .update(normalize_axis(value));
            }

            PlatformEvent::JoystickButton {
                joystick,
                button,
                pressed,
            } => {
                self.joysticks
                    .get_or_insert(joystick)
                    .get_button(button)
                    .update(pressed);
            }

            PlatformEvent::JoystickHat {
                joystick,
                hat,
                value,
            } => {
                let direction = hat_to_vector(value).unwrap_or_else(|e| {
                    error!(joystick.id = joystick, hat, error = %e, "Bad hat value, centering");
                    Vec2::ZERO
                });
                self.joysticks
                    .get_or_insert(joystick)
                    .get_hat(hat)
                    .update(direction);
            }

            PlatformEvent::WindowResized { size } => *window_size = size,

            PlatformEvent::TextEditing {
                text,
                start,
                length,
            } => self.text_input.record(TextInputEvent::Edit {
                text,
                caret_start: start,
                selection_length: length,
            }),

            PlatformEvent::TextInput { text } => {
                self.text_input.record(TextInputEvent::Commit { text });
            }

            PlatformEvent::Lifecycle(lifecycle) => self.handle_lifecycle(lifecycle),

            PlatformEvent::Unknown { kind } => {
                warn!(error = %InputError::UnknownEvent(kind), "Ignoring platform event");
            }
        }
    }

    fn handle_touch_event(
        &mut self,
        phase: TouchPhase,
        finger: FingerId,
        position: Vec2,
        delta: Vec2,
        window_size: IVec2,
    ) {
        if phase == TouchPhase::Up {
            // Publish the release edge before the slot becomes reusable
            match self.pointers.find(finger) {
                Some(slot) => {
                    self.get_button(ButtonId::Pointer(slot)).update(false);
                    self.pointers.release(slot);
                }
                None => trace!(finger, "Release for unknown finger"),
            }
            return;
        }

        let allocated = self.pointers.find_or_allocate(finger);
        debug_assert!(
            allocated.is_ok(),
            "pointer_capacity {} is below the platform touch limit",
            self.pointers.capacity()
        );
        let slot = match allocated {
            Ok(slot) => slot,
            Err(e) => {
                error!(finger, error = %e, "Dropping touch");
                return;
            }
        };

        let scale = window_size.as_vec2();
        if let Some(pointer) = self.pointers.get_mut(slot) {
            pointer.position = (position * scale).as_ivec2();
            pointer.delta += (delta * scale).as_ivec2();
        }

        if phase == TouchPhase::Down {
            self.get_button(ButtonId::Pointer(slot)).update(true);
        }
    }

    fn handle_lifecycle(&mut self, lifecycle: LifecycleEvent) {
        match lifecycle {
            LifecycleEvent::WillEnterBackground => {
                self.minimized = true;
                self.minimized_frame = self.clock.frames();
            }
            LifecycleEvent::DidEnterForeground => {
                self.minimized = false;
                self.minimized_frame = self.clock.frames();
            }
            _ => {}
        }

        if lifecycle != LifecycleEvent::Terminating {
            for callback in &mut self.app_event_callbacks {
                callback(&lifecycle);
            }
        }
    }

    fn handle_gamepad_events(&mut self) {
        let threshold = self.gamepad_hat_threshold;
        for record in self.gamepad_mailbox.drain() {
            self.gamepads
                .entry(record.device_id)
                .or_insert_with(|| Gamepad::new(record.device_id))
                .apply(&record, threshold);
        }
    }

    /// Closes every open joystick and reopens whatever is connected now
    pub fn update_connected_joystick_list(&mut self) {
        self.joysticks.refresh(&mut self.platform);
    }

    /// Returns the button for `id`, creating it on first use
    pub fn get_button(&mut self, id: ButtonId) -> &mut Button {
        self.buttons.entry(id).or_default()
    }

    /// Snapshot of a button; never-seen buttons read as up
    pub fn button(&self, id: ButtonId) -> Button {
        self.buttons.get(&id).copied().unwrap_or_default()
    }

    pub fn key(&self, keycode: Keycode) -> Button {
        self.button(ButtonId::Key(keycode))
    }

    /// Synthetic button of a pointer slot (slot 0 is the left mouse button)
    pub fn pointer_button(&self, slot: usize) -> Button {
        self.button(ButtonId::Pointer(slot))
    }

    pub fn pointers(&self) -> &[Pointer] {
        self.pointers.slots()
    }

    pub fn mouse(&self) -> &Pointer {
        self.pointers.mouse()
    }

    /// Wheel motion accumulated this frame
    pub fn mouse_wheel_delta(&self) -> IVec2 {
        self.mouse_wheel_delta
    }

    pub fn joystick(&self, id: JoystickId) -> Option<&Joystick> {
        self.joysticks.get(id)
    }

    /// Returns the joystick entry for `id`, creating it on first reference
    pub fn get_joystick(&mut self, id: JoystickId) -> &mut Joystick {
        self.joysticks.get_or_insert(id)
    }

    pub fn joysticks(&self) -> &JoystickRegistry {
        &self.joysticks
    }

    pub fn gamepad(&self, id: GamepadDeviceId) -> Option<&Gamepad> {
        self.gamepads.get(&id)
    }

    pub fn get_gamepad(&mut self, id: GamepadDeviceId) -> &mut Gamepad {
        self.gamepads.entry(id).or_insert_with(|| Gamepad::new(id))
    }

    pub fn gamepads(&self) -> impl Iterator<Item = &Gamepad> {
        self.gamepads.values()
    }

    /// Shared mailbox handed to the platform's gamepad callback thread
    pub fn gamepad_mailbox(&self) -> Arc<GamepadMailbox> {
        Arc::clone(&self.gamepad_mailbox)
    }

    /// Text events recorded so far; valid until the next clearing advance
    pub fn text_input_events(&self) -> &[TextInputEvent] {
        self.text_input.events()
    }

    pub fn record_text_input(&self) -> bool {
        self.text_input.is_recording()
    }

    pub fn set_record_text_input(&mut self, record: bool) {
        self.text_input.set_recording(record);
    }

    /// Discards recorded text events (needed when recording spans frames)
    pub fn clear_text_input_events(&mut self) {
        self.text_input.clear();
    }

    pub fn start_text_input(&mut self) {
        self.platform.start_text_input();
    }

    pub fn stop_text_input(&mut self) {
        self.platform.stop_text_input();
    }

    pub fn set_text_input_rect(&mut self, rect: TextInputRect) {
        self.platform.set_text_input_rect(rect);
    }

    pub fn relative_mouse_mode(&self) -> bool {
        self.platform.relative_mouse_mode()
    }

    pub fn set_relative_mouse_mode(&mut self, enabled: bool) {
        self.platform.set_relative_mouse_mode(enabled);
    }

    /// Registers an observer for lifecycle events (all except termination)
    pub fn add_app_event_callback(&mut self, callback: impl FnMut(&LifecycleEvent) + 'static) {
        self.app_event_callbacks.push(Box::new(callback));
    }

    /// Seconds since the system was created, as of the last advance
    pub fn time(&self) -> f32 {
        self.clock.time()
    }

    /// Seconds covered by the last frame
    pub fn delta_time(&self) -> f32 {
        self.clock.delta_time()
    }

    pub fn frame_time_ms(&self) -> u64 {
        self.clock.frame_time_ms()
    }

    pub fn frames(&self) -> u64 {
        self.clock.frames()
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    pub fn minimized(&self) -> bool {
        self.minimized
    }

    /// Frame at which the minimized flag last changed
    pub fn minimized_frame(&self) -> u64 {
        self.minimized_frame
    }

    pub fn headset(&self) -> &Headset {
        &self.headset
    }

    pub fn headset_mut(&mut self) -> &mut Headset {
        &mut self.headset
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }
}

fn mouse_button_id(button: u8) -> ButtonId {
    if button == MOUSE_BUTTON_LEFT {
        ButtonId::Pointer(MOUSE_POINTER)
    } else {
        ButtonId::Mouse(button)
    }
}
