//! Mobile gamepads delivered through the foreign-thread mailbox
//!
//! Records arrive as raw key/motion codes from the platform callback and are
//! reduced to a fixed set of logical controls.

use tracing::trace;

use super::button::Button;

/// Platform-assigned input device id
pub type GamepadDeviceId = i32;

/// Default stick deflection needed before a direction counts as pressed
pub const DEFAULT_HAT_THRESHOLD: f32 = 0.5;

/// Raw platform codes carried by [`GamepadEventRecord`]
pub mod codes {
    pub const ACTION_KEY_DOWN: i32 = 0;
    pub const ACTION_KEY_UP: i32 = 1;
    pub const ACTION_MOTION_MOVE: i32 = 2;

    pub const KEYCODE_DPAD_UP: i32 = 19;
    pub const KEYCODE_DPAD_DOWN: i32 = 20;
    pub const KEYCODE_DPAD_LEFT: i32 = 21;
    pub const KEYCODE_DPAD_RIGHT: i32 = 22;
    pub const KEYCODE_DPAD_CENTER: i32 = 23;
    pub const KEYCODE_BUTTON_A: i32 = 96;
    pub const KEYCODE_BUTTON_B: i32 = 97;
    pub const KEYCODE_BUTTON_C: i32 = 98;
}

/// Logical gamepad controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamepadControl {
    Up,
    Down,
    Left,
    Right,
    ButtonA,
    ButtonB,
    ButtonC,
}

// D-pad center is treated as A; nobody using a gamepad cares about the difference.
const KEYCODE_TABLE: [(i32, GamepadControl); 8] = [
    (codes::KEYCODE_DPAD_UP, GamepadControl::Up),
    (codes::KEYCODE_DPAD_DOWN, GamepadControl::Down),
    (codes::KEYCODE_DPAD_LEFT, GamepadControl::Left),
    (codes::KEYCODE_DPAD_RIGHT, GamepadControl::Right),
    (codes::KEYCODE_DPAD_CENTER, GamepadControl::ButtonA),
    (codes::KEYCODE_BUTTON_A, GamepadControl::ButtonA),
    (codes::KEYCODE_BUTTON_B, GamepadControl::ButtonB),
    (codes::KEYCODE_BUTTON_C, GamepadControl::ButtonC),
];

impl GamepadControl {
    pub const COUNT: usize = 7;

    pub const ALL: [Self; Self::COUNT] = [
        Self::Up,
        Self::Down,
        Self::Left,
        Self::Right,
        Self::ButtonA,
        Self::ButtonB,
        Self::ButtonC,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Maps a platform key code; unmapped codes yield `None`
    pub fn from_platform_keycode(keycode: i32) -> Option<Self> {
        KEYCODE_TABLE
            .iter()
            .find(|(code, _)| *code == keycode)
            .map(|(_, control)| *control)
    }
}

/// One raw record pushed by the platform callback thread
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GamepadEventRecord {
    pub device_id: GamepadDeviceId,
    /// One of the `codes::ACTION_*` values
    pub event_code: i32,
    /// Platform key code for key actions, unused for motion
    pub control_code: i32,
    pub x: f32,
    pub y: f32,
}

impl GamepadEventRecord {
    pub fn key_down(device_id: GamepadDeviceId, keycode: i32) -> Self {
        Self {
            device_id,
            event_code: codes::ACTION_KEY_DOWN,
            control_code: keycode,
            x: 0.0,
            y: 0.0,
        }
    }

    pub fn key_up(device_id: GamepadDeviceId, keycode: i32) -> Self {
        Self {
            event_code: codes::ACTION_KEY_UP,
            ..Self::key_down(device_id, keycode)
        }
    }

    pub fn motion(device_id: GamepadDeviceId, x: f32, y: f32) -> Self {
        Self {
            device_id,
            event_code: codes::ACTION_MOTION_MOVE,
            control_code: 0,
            x,
            y,
        }
    }
}

/// Button state for one gamepad
#[derive(Debug, Clone)]
pub struct Gamepad {
    device_id: GamepadDeviceId,
    buttons: [Button; GamepadControl::COUNT],
}

impl Gamepad {
    pub fn new(device_id: GamepadDeviceId) -> Self {
        Self {
            device_id,
            buttons: [Button::default(); GamepadControl::COUNT],
        }
    }

    pub fn device_id(&self) -> GamepadDeviceId {
        self.device_id
    }

    pub fn button(&self, control: GamepadControl) -> &Button {
        &self.buttons[control.index()]
    }

    pub fn get_button(&mut self, control: GamepadControl) -> &mut Button {
        &mut self.buttons[control.index()]
    }

    pub fn advance_frame(&mut self) {
        self.buttons.iter_mut().for_each(Button::advance_frame);
    }

    /// Applies a raw record
    ///
    /// Stick motion is reduced to four directional buttons: each axis is
    /// compared against `threshold`, there is no analog passthrough.
    pub fn apply(&mut self, record: &GamepadEventRecord, threshold: f32) {
        match record.event_code {
            codes::ACTION_KEY_DOWN | codes::ACTION_KEY_UP => {
                let pressed = record.event_code == codes::ACTION_KEY_DOWN;
                match GamepadControl::from_platform_keycode(record.control_code) {
                    Some(control) => self.get_button(control).update(pressed),
                    None => trace!(
                        gamepad.id = self.device_id,
                        keycode = record.control_code,
                        "Ignoring unmapped gamepad key"
                    ),
                }
            }
            codes::ACTION_MOTION_MOVE => {
                self.get_button(GamepadControl::Left)
                    .update(record.x < -threshold);
                self.get_button(GamepadControl::Right)
                    .update(record.x > threshold);
                self.get_button(GamepadControl::Up)
                    .update(record.y < -threshold);
                self.get_button(GamepadControl::Down)
                    .update(record.y > threshold);
            }
            other => trace!(
                gamepad.id = self.device_id,
                event_code = other,
                "Ignoring unknown gamepad action"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::codes::*;
    use super::*;

    #[test]
    fn test_keycode_table() {
        assert_eq!(
            GamepadControl::from_platform_keycode(KEYCODE_DPAD_UP),
            Some(GamepadControl::Up)
        );
        assert_eq!(
            GamepadControl::from_platform_keycode(KEYCODE_DPAD_CENTER),
            Some(GamepadControl::ButtonA)
        );
        assert_eq!(
            GamepadControl::from_platform_keycode(KEYCODE_BUTTON_C),
            Some(GamepadControl::ButtonC)
        );
        assert_eq!(GamepadControl::from_platform_keycode(4), None);
    }

    #[test]
    fn test_control_indices_are_dense() {
        for (expected, control) in GamepadControl::ALL.iter().enumerate() {
            assert_eq!(control.index(), expected);
        }
    }

    #[test]
    fn test_key_records_update_buttons() {
        let mut gamepad = Gamepad::new(5);
        gamepad.apply(&GamepadEventRecord::key_down(5, KEYCODE_BUTTON_B), 0.5);
        assert!(gamepad.button(GamepadControl::ButtonB).went_down());

        gamepad.advance_frame();
        gamepad.apply(&GamepadEventRecord::key_up(5, KEYCODE_BUTTON_B), 0.5);
        assert!(gamepad.button(GamepadControl::ButtonB).went_up());
    }

    #[test]
    fn test_unmapped_key_is_ignored() {
        let mut gamepad = Gamepad::new(5);
        gamepad.apply(&GamepadEventRecord::key_down(5, 1234), 0.5);
        assert!(
            GamepadControl::ALL
                .iter()
                .all(|control| !gamepad.button(*control).is_down())
        );
    }

    #[test]
    fn test_motion_synthesizes_directions() {
        let mut gamepad = Gamepad::new(1);
        gamepad.apply(&GamepadEventRecord::motion(1, -0.8, 0.9), 0.5);

        assert!(gamepad.button(GamepadControl::Left).is_down());
        assert!(!gamepad.button(GamepadControl::Right).is_down());
        assert!(!gamepad.button(GamepadControl::Up).is_down());
        assert!(gamepad.button(GamepadControl::Down).is_down());
    }

    #[test]
    fn test_motion_inside_deadzone_releases_directions() {
        let mut gamepad = Gamepad::new(1);
        gamepad.apply(&GamepadEventRecord::motion(1, 0.8, 0.0), 0.5);
        gamepad.advance_frame();
        gamepad.apply(&GamepadEventRecord::motion(1, 0.5, -0.2), 0.5);

        assert!(!gamepad.button(GamepadControl::Right).is_down());
        assert!(gamepad.button(GamepadControl::Right).went_up());
        assert!(!gamepad.button(GamepadControl::Up).is_down());
    }
}
