//! Error types for the input subsystem
//!
//! None of these escape [`InputSystem::advance_frame`](crate::input::InputSystem::advance_frame):
//! the orchestrator logs them and falls back to a harmless default.

use thiserror::Error;

/// Errors produced while reducing platform events to input state
#[derive(Debug, Error)]
pub enum InputError {
    /// Every pointer slot is claimed; the table capacity is smaller than the
    /// platform's simultaneous-touch limit
    #[error("all {capacity} pointer slots are in use")]
    PointerSlotsExhausted { capacity: usize },

    /// A joystick hat reported a code outside the nine known directions
    #[error("unknown joystick hat code {0:#04x}")]
    UnknownHat(u8),

    /// The platform produced an event kind this system does not handle
    #[error("unknown platform event kind {0}")]
    UnknownEvent(u32),

    /// Configuration could not be loaded or deserialized
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, InputError>;
