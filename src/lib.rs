//! Frame Input
//!
//! Per-frame input normalization for real-time applications, built on winit.

/// Build-time information (git SHA, branch, timestamp, etc.)
pub mod build_info;

/// Input configuration - profiles, files, and environment overrides
pub mod config;

/// Error types shared by the input subsystem
pub mod error;

/// Health checks for startup validation and CI
pub mod health;

/// Input state - buttons, pointers, joysticks, gamepads, text, and timing
pub mod input;

pub use config::InputConfig;
pub use error::{InputError, Result};
pub use input::InputSystem;
