//! Input system configuration
//!
//! Supports multiple profiles (debug, release) with different settings.

use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

use crate::input::gamepad::DEFAULT_HAT_THRESHOLD;
use crate::input::mailbox::DEFAULT_MAILBOX_CAPACITY;
use crate::input::pointer::DEFAULT_POINTER_CAPACITY;
use crate::input::timing::DEFAULT_FIRST_FRAME_DELTA_MS;

/// Window settings for the probe binary
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: f64,
    pub height: f64,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Input Probe".to_string(),
            width: 800.0,
            height: 600.0,
        }
    }
}

/// Input system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// The active profile (debug, release, etc.)
    pub profile: String,
    /// Pointer slots including the mouse; must exceed the platform's touch limit
    pub pointer_capacity: usize,
    /// Gamepad records accepted from the callback thread between two frames
    pub mailbox_capacity: usize,
    /// Stick deflection that counts as a d-pad press
    pub gamepad_hat_threshold: f32,
    /// Delta reported for the first frame
    pub first_frame_delta_ms: u64,
    /// Start with text input recording enabled
    pub record_text_input: bool,
    /// Handle finger events; desktop touchpads already synthesize mouse events
    pub handle_touch: bool,
    /// Log the frame delta once per second
    pub log_frame_rate: bool,
    pub window: WindowConfig,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            profile: "release".to_string(),
            pointer_capacity: DEFAULT_POINTER_CAPACITY,
            mailbox_capacity: DEFAULT_MAILBOX_CAPACITY,
            gamepad_hat_threshold: DEFAULT_HAT_THRESHOLD,
            first_frame_delta_ms: DEFAULT_FIRST_FRAME_DELTA_MS,
            record_text_input: false,
            handle_touch: true,
            log_frame_rate: false,
            window: WindowConfig::default(),
        }
    }
}

impl InputConfig {
    /// Loads configuration for `profile`
    ///
    /// Sources, later ones overriding earlier ones:
    /// 1. config/{profile}.toml (next to the executable, else in the current directory)
    /// 2. Environment variables with prefix INPUT_ (e.g., INPUT_POINTER_CAPACITY=16,
    ///    INPUT_WINDOW__WIDTH=1920)
    ///
    /// Fields missing from every source keep their defaults.
    pub fn load(profile: &str) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        builder = match Self::find_config_dir() {
            Some(dir) => builder.add_source(File::from(dir.join(profile).as_path()).required(false)),
            None => builder.add_source(File::with_name(&format!("config/{}", profile)).required(false)),
        };

        builder = builder.add_source(
            Environment::with_prefix("INPUT")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.set_override("profile", profile)?.build()?;
        config.try_deserialize()
    }

    /// Loads from a specific file, then applies environment overrides
    pub fn load_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path))
            .add_source(
                Environment::with_prefix("INPUT")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Loads the profile named by INPUT_PROFILE, defaulting to "release"
    pub fn load_from_env() -> Result<Self, ConfigError> {
        let profile = std::env::var("INPUT_PROFILE").unwrap_or_else(|_| "release".to_string());
        Self::load(&profile)
    }

    /// Checks values that would otherwise fail deep inside a frame
    pub fn validate(&self) -> Result<(), String> {
        if self.pointer_capacity < 2 {
            return Err(format!(
                "pointer_capacity must leave room for at least one touch (got {})",
                self.pointer_capacity
            ));
        }
        if self.mailbox_capacity == 0 {
            return Err("mailbox_capacity must be positive".to_string());
        }
        if !(0.0..1.0).contains(&self.gamepad_hat_threshold) {
            return Err(format!(
                "gamepad_hat_threshold must be in [0, 1) (got {})",
                self.gamepad_hat_threshold
            ));
        }
        Ok(())
    }

    fn find_config_dir() -> Option<PathBuf> {
        if let Ok(exe_path) = std::env::current_exe()
            && let Some(exe_dir) = exe_path.parent()
        {
            let config_dir = exe_dir.join("config");
            if config_dir.exists() {
                return Some(config_dir);
            }
        }

        let cwd_config = PathBuf::from("config");
        cwd_config.exists().then_some(cwd_config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = InputConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.pointer_capacity, 10);
        assert_eq!(config.mailbox_capacity, 100);
        assert_eq!(config.first_frame_delta_ms, 16);
        assert!(!config.record_text_input);
    }

    #[test]
    fn test_missing_profile_falls_back_to_defaults() {
        let config = InputConfig::load("no-such-profile").expect("optional file");
        assert_eq!(config.profile, "no-such-profile");
        assert_eq!(config.gamepad_hat_threshold, 0.5);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        writeln!(file, "pointer_capacity = 4\nhandle_touch = false").expect("write config");

        let config = InputConfig::load_file(file.path()).expect("valid toml");
        assert_eq!(config.pointer_capacity, 4);
        assert!(!config.handle_touch);
        assert_eq!(config.mailbox_capacity, 100);
    }

    #[test]
    fn test_shipped_profiles_handle_touch() {
        let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("config");
        for profile in ["debug", "release"] {
            let path = dir.join(format!("{profile}.toml"));
            let config = InputConfig::load_file(&path).expect("shipped profile parses");
            assert!(config.handle_touch, "{profile} profile disables touch");
        }
        assert!(InputConfig::default().handle_touch);
    }

    #[test]
    fn test_validate_rejects_mouse_only_table() {
        let config = InputConfig {
            pointer_capacity: 1,
            ..InputConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
