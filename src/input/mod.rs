//! Per-frame input normalization
//!
//! Platform events are drained once per frame by [`InputSystem`] and reduced
//! to stable snapshots: edge-triggered [`Button`]s, pointer slots, joystick
//! axes and hats, gamepad controls fed from another thread, and a text log.

pub mod axis;
pub mod button;
pub mod event;
pub mod gamepad;
pub mod headset;
pub mod joystick;
pub mod mailbox;
pub mod platform;
pub mod pointer;
pub mod system;
pub mod text;
pub mod timing;

pub use axis::{JoystickAxis, JoystickHat, hat_to_vector, normalize_axis};
pub use button::Button;
pub use event::{ButtonId, KeyMod, Keycode, LifecycleEvent, PlatformEvent, TouchPhase};
pub use gamepad::{Gamepad, GamepadControl, GamepadDeviceId, GamepadEventRecord};
pub use headset::{HeadTracker, Headset, HeadsetTrigger};
pub use joystick::{Joystick, JoystickCapabilities, JoystickHandle, JoystickId, JoystickRegistry};
pub use mailbox::GamepadMailbox;
pub use platform::{OpenedJoystick, Platform, ScriptedPlatform, TextInputRect, WinitPlatform};
pub use pointer::{FingerId, Pointer, PointerTable};
pub use system::{AppEventCallback, InputSystem};
pub use text::{TextInputEvent, TextInputLog};
pub use timing::FrameClock;
