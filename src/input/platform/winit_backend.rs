//! winit backend
//!
//! winit delivers events through callbacks rather than a pollable queue, so
//! [`WinitPlatform::handle_window_event`] translates each `WindowEvent` into
//! zero or more [`PlatformEvent`]s and buffers them until the next frame
//! drains the queue. winit has no joystick API, so no joysticks are reported.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Instant;

use glam::{DVec2, IVec2, Vec2};
use tracing::warn;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{
    DeviceEvent, ElementState, Ime, MouseButton, MouseScrollDelta, Touch, TouchPhase as WinitTouchPhase,
    WindowEvent,
};
use winit::keyboard::{KeyCode, ModifiersState, PhysicalKey};
use winit::window::{CursorGrabMode, Window};

use super::{Platform, TextInputRect};
use crate::input::event::{
    Keycode, KeyMod, LifecycleEvent, MOUSE_BUTTON_LEFT, MOUSE_BUTTON_MIDDLE, MOUSE_BUTTON_RIGHT,
    PlatformEvent, TouchPhase,
};
use crate::input::pointer::FingerId;

/// Pixels per wheel "line" when the device reports pixel deltas
const PIXELS_PER_WHEEL_LINE: f64 = 20.0;

/// Wheel carry below this many lines is treated as zero
const WHEEL_RESIDUE: f64 = 1e-6;

/// Buffers translated winit window events for the input system
pub struct WinitPlatform {
    window: Option<Arc<Window>>,
    pending: VecDeque<PlatformEvent>,
    epoch: Instant,
    modifiers: KeyMod,
    cursor: Option<IVec2>,
    window_size: Vec2,
    touches: HashMap<u64, Vec2>,
    relative_mouse_mode: bool,
    text_input_active: bool,
    /// Sub-line wheel motion not yet reported
    wheel_remainder: DVec2,
}

impl WinitPlatform {
    pub fn new() -> Self {
        Self {
            window: None,
            pending: VecDeque::new(),
            epoch: Instant::now(),
            modifiers: KeyMod::empty(),
            cursor: None,
            window_size: Vec2::ONE,
            touches: HashMap::new(),
            relative_mouse_mode: false,
            text_input_active: false,
            wheel_remainder: DVec2::ZERO,
        }
    }

    /// Binds the window used for cursor grabs and IME control
    pub fn attach_window(&mut self, window: Arc<Window>) {
        let size = window.inner_size();
        self.window_size = Vec2::new(size.width.max(1) as f32, size.height.max(1) as f32);
        self.window = Some(window);
    }

    pub fn pending_events(&self) -> usize {
        self.pending.len()
    }

    /// Translates one winit event and queues the result
    pub fn handle_window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::CloseRequested => self.pending.push_back(PlatformEvent::Quit),

            WindowEvent::Resized(size) => {
                self.window_size = Vec2::new(size.width.max(1) as f32, size.height.max(1) as f32);
                self.pending.push_back(PlatformEvent::WindowResized {
                    size: IVec2::new(size.width as i32, size.height as i32),
                });
            }

            WindowEvent::Occluded(occluded) => {
                let lifecycle = if *occluded {
                    LifecycleEvent::WillEnterBackground
                } else {
                    LifecycleEvent::DidEnterForeground
                };
                self.pending.push_back(PlatformEvent::Lifecycle(lifecycle));
            }

            WindowEvent::ModifiersChanged(modifiers) => {
                self.modifiers = key_mod_from_winit(modifiers.state());
            }

            WindowEvent::KeyboardInput { event, .. } => {
                let keycode = match event.physical_key {
                    PhysicalKey::Code(code) => Keycode::from(code),
                    PhysicalKey::Unidentified(_) => Keycode::UNKNOWN,
                };
                let pressed = event.state == ElementState::Pressed;
                self.pending.push_back(PlatformEvent::Key {
                    keycode,
                    pressed,
                    repeat: event.repeat,
                    modifiers: self.modifiers,
                });

                // Without an active IME composition winit reports typed text on the key event
                if pressed
                    && self.text_input_active
                    && let Some(text) = event.text.as_ref().filter(|t| !t.chars().any(char::is_control))
                {
                    self.pending.push_back(PlatformEvent::TextInput {
                        text: text.to_string(),
                    });
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                let position = IVec2::new(position.x.round() as i32, position.y.round() as i32);
                // Relative mode takes motion from the device stream only; a
                // confined cursor still reports positions here
                let delta = match self.cursor {
                    Some(last) if !self.relative_mouse_mode => position - last,
                    _ => IVec2::ZERO,
                };
                self.cursor = Some(position);
                self.pending
                    .push_back(PlatformEvent::MouseMotion { delta, position });
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let Some(button) = mouse_button_index(*button) else {
                    return;
                };
                self.pending.push_back(PlatformEvent::MouseButton {
                    button,
                    pressed: *state == ElementState::Pressed,
                    position: self.cursor.unwrap_or(IVec2::ZERO),
                });
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(x, y) => DVec2::new(f64::from(*x), f64::from(*y)),
                    MouseScrollDelta::PixelDelta(pos) => {
                        DVec2::new(pos.x, pos.y) / PIXELS_PER_WHEEL_LINE
                    }
                };

                // Smooth scrolling arrives in fractions of a line; carry them
                // until they add up to whole lines
                self.wheel_remainder += lines;
                let whole = self.wheel_remainder.trunc();
                self.wheel_remainder -= whole;
                // Drop float residue so it cannot tip a later notch into the next line
                self.wheel_remainder = DVec2::select(
                    self.wheel_remainder.abs().cmplt(DVec2::splat(WHEEL_RESIDUE)),
                    DVec2::ZERO,
                    self.wheel_remainder,
                );
                if whole != DVec2::ZERO {
                    self.pending.push_back(PlatformEvent::MouseWheel {
                        delta: whole.as_ivec2(),
                    });
                }
            }

            WindowEvent::Touch(touch) => self.handle_touch(touch),

            WindowEvent::Ime(Ime::Preedit(text, cursor)) => {
                let (start, end) = cursor.unwrap_or((text.len(), text.len()));
                self.pending.push_back(PlatformEvent::TextEditing {
                    text: text.clone(),
                    start: start as i32,
                    length: end.saturating_sub(start) as i32,
                });
            }

            WindowEvent::Ime(Ime::Commit(text)) => {
                self.pending
                    .push_back(PlatformEvent::TextInput { text: text.clone() });
            }

            _ => {}
        }
    }

    /// Translates raw device motion, used while the cursor is grabbed
    ///
    /// A locked cursor stops producing `CursorMoved`, so relative mode reads
    /// motion from the device stream instead.
    pub fn handle_device_event(&mut self, event: &DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event
            && self.relative_mouse_mode
        {
            self.pending.push_back(PlatformEvent::MouseMotion {
                delta: IVec2::new(dx.round() as i32, dy.round() as i32),
                position: self.cursor.unwrap_or(IVec2::ZERO),
            });
        }
    }

    fn handle_touch(&mut self, touch: &Touch) {
        let position = Vec2::new(touch.location.x as f32, touch.location.y as f32) / self.window_size;
        let previous = self.touches.get(&touch.id).copied().unwrap_or(position);

        let phase = match touch.phase {
            WinitTouchPhase::Started => {
                self.touches.insert(touch.id, position);
                TouchPhase::Down
            }
            WinitTouchPhase::Moved => {
                self.touches.insert(touch.id, position);
                TouchPhase::Motion
            }
            WinitTouchPhase::Ended | WinitTouchPhase::Cancelled => {
                self.touches.remove(&touch.id);
                TouchPhase::Up
            }
        };

        self.pending.push_back(PlatformEvent::Touch {
            phase,
            finger: touch.id as FingerId,
            position,
            delta: position - previous,
        });
    }
}

impl Default for WinitPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl Platform for WinitPlatform {
    fn poll_event(&mut self) -> Option<PlatformEvent> {
        self.pending.pop_front()
    }

    fn ticks_ms(&self) -> u64 {
        self.epoch.elapsed().as_millis() as u64
    }

    fn relative_mouse_mode(&self) -> bool {
        self.relative_mouse_mode
    }

    fn set_relative_mouse_mode(&mut self, enabled: bool) {
        let Some(window) = &self.window else {
            warn!("Relative mouse mode requested before a window was attached");
            return;
        };

        let result = if enabled {
            window
                .set_cursor_grab(CursorGrabMode::Locked)
                .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined))
        } else {
            window.set_cursor_grab(CursorGrabMode::None)
        };

        match result {
            Ok(()) => {
                window.set_cursor_visible(!enabled);
                self.relative_mouse_mode = enabled;
            }
            Err(e) => warn!(error = %e, enabled, "Failed to change cursor grab"),
        }
    }

    fn start_text_input(&mut self) {
        self.text_input_active = true;
        if let Some(window) = &self.window {
            window.set_ime_allowed(true);
        }
    }

    fn stop_text_input(&mut self) {
        self.text_input_active = false;
        if let Some(window) = &self.window {
            window.set_ime_allowed(false);
        }
    }

    fn set_text_input_rect(&mut self, rect: TextInputRect) {
        if let Some(window) = &self.window {
            window.set_ime_cursor_area(
                PhysicalPosition::new(rect.x, rect.y),
                PhysicalSize::new(rect.width.max(0) as u32, rect.height.max(0) as u32),
            );
        }
    }
}

fn key_mod_from_winit(state: ModifiersState) -> KeyMod {
    let mut modifiers = KeyMod::empty();
    modifiers.set(KeyMod::LSHIFT, state.shift_key());
    modifiers.set(KeyMod::LCTRL, state.control_key());
    modifiers.set(KeyMod::LALT, state.alt_key());
    modifiers.set(KeyMod::LGUI, state.super_key());
    modifiers
}

fn mouse_button_index(button: MouseButton) -> Option<u8> {
    match button {
        MouseButton::Left => Some(MOUSE_BUTTON_LEFT),
        MouseButton::Middle => Some(MOUSE_BUTTON_MIDDLE),
        MouseButton::Right => Some(MOUSE_BUTTON_RIGHT),
        MouseButton::Back => Some(4),
        MouseButton::Forward => Some(5),
        MouseButton::Other(n) => u8::try_from(n).ok(),
    }
}

impl From<KeyCode> for Keycode {
    fn from(key: KeyCode) -> Self {
        match key {
            KeyCode::Backspace => Self::BACKSPACE,
            KeyCode::Tab => Self::TAB,
            KeyCode::Enter | KeyCode::NumpadEnter => Self::RETURN,
            KeyCode::Escape => Self::ESCAPE,
            KeyCode::Space => Self::SPACE,
            KeyCode::Delete => Self::DELETE,

            KeyCode::Digit0 => Self::NUM_0,
            KeyCode::Digit1 => Self::NUM_1,
            KeyCode::Digit2 => Self::NUM_2,
            KeyCode::Digit3 => Self::NUM_3,
            KeyCode::Digit4 => Self::NUM_4,
            KeyCode::Digit5 => Self::NUM_5,
            KeyCode::Digit6 => Self::NUM_6,
            KeyCode::Digit7 => Self::NUM_7,
            KeyCode::Digit8 => Self::NUM_8,
            KeyCode::Digit9 => Self::NUM_9,

            KeyCode::KeyA => Self::A,
            KeyCode::KeyB => Self::B,
            KeyCode::KeyC => Self::C,
            KeyCode::KeyD => Self::D,
            KeyCode::KeyE => Self::E,
            KeyCode::KeyF => Self::F,
            KeyCode::KeyG => Self::G,
            KeyCode::KeyH => Self::H,
            KeyCode::KeyI => Self::I,
            KeyCode::KeyJ => Self::J,
            KeyCode::KeyK => Self::K,
            KeyCode::KeyL => Self::L,
            KeyCode::KeyM => Self::M,
            KeyCode::KeyN => Self::N,
            KeyCode::KeyO => Self::O,
            KeyCode::KeyP => Self::P,
            KeyCode::KeyQ => Self::Q,
            KeyCode::KeyR => Self::R,
            KeyCode::KeyS => Self::S,
            KeyCode::KeyT => Self::T,
            KeyCode::KeyU => Self::U,
            KeyCode::KeyV => Self::V,
            KeyCode::KeyW => Self::W,
            KeyCode::KeyX => Self::X,
            KeyCode::KeyY => Self::Y,
            KeyCode::KeyZ => Self::Z,

            KeyCode::F1 => Self::F1,
            KeyCode::F2 => Self::F2,
            KeyCode::F3 => Self::F3,
            KeyCode::F4 => Self::F4,
            KeyCode::F5 => Self::F5,
            KeyCode::F6 => Self::F6,
            KeyCode::F7 => Self::F7,
            KeyCode::F8 => Self::F8,
            KeyCode::F9 => Self::F9,
            KeyCode::F10 => Self::F10,
            KeyCode::F11 => Self::F11,
            KeyCode::F12 => Self::F12,

            KeyCode::ArrowLeft => Self::LEFT,
            KeyCode::ArrowRight => Self::RIGHT,
            KeyCode::ArrowUp => Self::UP,
            KeyCode::ArrowDown => Self::DOWN,

            KeyCode::ShiftLeft => Self::LSHIFT,
            KeyCode::ShiftRight => Self::RSHIFT,
            KeyCode::ControlLeft => Self::LCTRL,
            KeyCode::ControlRight => Self::RCTRL,
            KeyCode::AltLeft => Self::LALT,
            KeyCode::AltRight => Self::RALT,
            KeyCode::SuperLeft => Self::LGUI,
            KeyCode::SuperRight => Self::RGUI,

            _ => Self::UNKNOWN,
        }
    }
}
