//! Platform event records and key identifiers
//!
//! Backends translate whatever their windowing layer produces into
//! [`PlatformEvent`] values; the [`InputSystem`](super::InputSystem) never
//! sees backend types.

use bitflags::bitflags;
use glam::{IVec2, Vec2};

use super::joystick::JoystickId;
use super::pointer::FingerId;

/// Symbolic key code
///
/// Printable keys use their ASCII value, other keys use `1 << 30 | scancode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Keycode(pub i32);

const fn scancode_to_keycode(scancode: i32) -> Keycode {
    Keycode(scancode | (1 << 30))
}

impl Keycode {
    pub const UNKNOWN: Self = Self(0);
    pub const BACKSPACE: Self = Self(0x08);
    pub const TAB: Self = Self(0x09);
    pub const RETURN: Self = Self(0x0d);
    pub const ESCAPE: Self = Self(0x1b);
    pub const SPACE: Self = Self(0x20);
    pub const DELETE: Self = Self(0x7f);

    pub const NUM_0: Self = Self(b'0' as i32);
    pub const NUM_1: Self = Self(b'1' as i32);
    pub const NUM_2: Self = Self(b'2' as i32);
    pub const NUM_3: Self = Self(b'3' as i32);
    pub const NUM_4: Self = Self(b'4' as i32);
    pub const NUM_5: Self = Self(b'5' as i32);
    pub const NUM_6: Self = Self(b'6' as i32);
    pub const NUM_7: Self = Self(b'7' as i32);
    pub const NUM_8: Self = Self(b'8' as i32);
    pub const NUM_9: Self = Self(b'9' as i32);

    pub const A: Self = Self(b'a' as i32);
    pub const B: Self = Self(b'b' as i32);
    pub const C: Self = Self(b'c' as i32);
    pub const D: Self = Self(b'd' as i32);
    pub const E: Self = Self(b'e' as i32);
    pub const F: Self = Self(b'f' as i32);
    pub const G: Self = Self(b'g' as i32);
    pub const H: Self = Self(b'h' as i32);
    pub const I: Self = Self(b'i' as i32);
    pub const J: Self = Self(b'j' as i32);
    pub const K: Self = Self(b'k' as i32);
    pub const L: Self = Self(b'l' as i32);
    pub const M: Self = Self(b'm' as i32);
    pub const N: Self = Self(b'n' as i32);
    pub const O: Self = Self(b'o' as i32);
    pub const P: Self = Self(b'p' as i32);
    pub const Q: Self = Self(b'q' as i32);
    pub const R: Self = Self(b'r' as i32);
    pub const S: Self = Self(b's' as i32);
    pub const T: Self = Self(b't' as i32);
    pub const U: Self = Self(b'u' as i32);
    pub const V: Self = Self(b'v' as i32);
    pub const W: Self = Self(b'w' as i32);
    pub const X: Self = Self(b'x' as i32);
    pub const Y: Self = Self(b'y' as i32);
    pub const Z: Self = Self(b'z' as i32);

    pub const F1: Self = scancode_to_keycode(58);
    pub const F2: Self = scancode_to_keycode(59);
    pub const F3: Self = scancode_to_keycode(60);
    pub const F4: Self = scancode_to_keycode(61);
    pub const F5: Self = scancode_to_keycode(62);
    pub const F6: Self = scancode_to_keycode(63);
    pub const F7: Self = scancode_to_keycode(64);
    pub const F8: Self = scancode_to_keycode(65);
    pub const F9: Self = scancode_to_keycode(66);
    pub const F10: Self = scancode_to_keycode(67);
    pub const F11: Self = scancode_to_keycode(68);
    pub const F12: Self = scancode_to_keycode(69);

    pub const RIGHT: Self = scancode_to_keycode(79);
    pub const LEFT: Self = scancode_to_keycode(80);
    pub const DOWN: Self = scancode_to_keycode(81);
    pub const UP: Self = scancode_to_keycode(82);

    pub const LCTRL: Self = scancode_to_keycode(224);
    pub const LSHIFT: Self = scancode_to_keycode(225);
    pub const LALT: Self = scancode_to_keycode(226);
    pub const LGUI: Self = scancode_to_keycode(227);
    pub const RCTRL: Self = scancode_to_keycode(228);
    pub const RSHIFT: Self = scancode_to_keycode(229);
    pub const RALT: Self = scancode_to_keycode(230);
    pub const RGUI: Self = scancode_to_keycode(231);
}

bitflags! {
    /// Keyboard modifier state at the time of a key event
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct KeyMod: u16 {
        const LSHIFT = 0x0001;
        const RSHIFT = 0x0002;
        const LCTRL = 0x0040;
        const RCTRL = 0x0080;
        const LALT = 0x0100;
        const RALT = 0x0200;
        const LGUI = 0x0400;
        const RGUI = 0x0800;
        const NUM = 0x1000;
        const CAPS = 0x2000;
        const MODE = 0x4000;

        const SHIFT = Self::LSHIFT.bits() | Self::RSHIFT.bits();
        const CTRL = Self::LCTRL.bits() | Self::RCTRL.bits();
        const ALT = Self::LALT.bits() | Self::RALT.bits();
        const GUI = Self::LGUI.bits() | Self::RGUI.bits();
    }
}

/// Key into the system-wide button table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonId {
    /// Keyboard key
    Key(Keycode),
    /// Mouse button other than the primary one (1-based platform index)
    Mouse(u8),
    /// Synthetic button of a pointer slot; slot 0 doubles as the left mouse button
    Pointer(usize),
}

/// Platform mouse button index of the primary (left) button
pub const MOUSE_BUTTON_LEFT: u8 = 1;
pub const MOUSE_BUTTON_MIDDLE: u8 = 2;
pub const MOUSE_BUTTON_RIGHT: u8 = 3;

/// Phase of a touch contact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Down,
    Up,
    Motion,
}

/// Application lifecycle notifications (mostly mobile)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    Terminating,
    LowMemory,
    WillEnterBackground,
    DidEnterBackground,
    WillEnterForeground,
    DidEnterForeground,
}

/// One discrete event drained from the platform queue
#[derive(Debug, Clone, PartialEq)]
pub enum PlatformEvent {
    /// The user or OS asked the application to close
    Quit,

    Key {
        keycode: Keycode,
        pressed: bool,
        repeat: bool,
        modifiers: KeyMod,
    },

    MouseButton {
        /// 1-based platform button index
        button: u8,
        pressed: bool,
        position: IVec2,
    },

    MouseMotion {
        /// Relative motion since the previous motion event
        delta: IVec2,
        position: IVec2,
    },

    MouseWheel {
        delta: IVec2,
    },

    Touch {
        phase: TouchPhase,
        finger: FingerId,
        /// Normalized to `[0, 1]` of the window
        position: Vec2,
        /// Normalized to `[-1, 1]` of the window
        delta: Vec2,
    },

    /// A joystick was plugged in at the given enumeration index
    JoystickAdded {
        index: usize,
    },

    JoystickRemoved {
        joystick: JoystickId,
    },

    JoystickAxis {
        joystick: JoystickId,
        axis: usize,
        value: i16,
    },

    JoystickButton {
        joystick: JoystickId,
        button: usize,
        pressed: bool,
    },

    JoystickHat {
        joystick: JoystickId,
        hat: usize,
        value: u8,
    },

    WindowResized {
        size: IVec2,
    },

    /// IME composition in progress
    TextEditing {
        text: String,
        start: i32,
        length: i32,
    },

    /// Committed text
    TextInput {
        text: String,
    },

    Lifecycle(LifecycleEvent),

    /// Anything the backend could not classify; reported and ignored
    Unknown {
        kind: u32,
    },
}
