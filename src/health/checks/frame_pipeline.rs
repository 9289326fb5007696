//! Frame pipeline health check

use glam::{IVec2, Vec2};

use crate::config::InputConfig;
use crate::health::check::{CheckResult, Finding, SystemCheck};
use crate::input::{
    ButtonId, InputSystem, KeyMod, Keycode, PlatformEvent, ScriptedPlatform, TouchPhase,
};

/// Drives a few scripted frames through [`InputSystem`] and checks the snapshots
pub struct FramePipelineCheck {
    config: InputConfig,
}

impl FramePipelineCheck {
    pub fn new() -> Self {
        Self {
            config: InputConfig::default(),
        }
    }

    pub fn with_config(config: InputConfig) -> Self {
        Self { config }
    }
}

impl Default for FramePipelineCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for FramePipelineCheck {
    fn name(&self) -> &'static str {
        "Frame Pipeline"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Checks edge timing, pointer slots and mouse deltas on a scripted platform")
    }

    fn check(&self) -> CheckResult {
        if let Err(e) = self.config.validate() {
            return CheckResult::fail(format!("Invalid input configuration: {}", e));
        }

        let mut findings = Vec::new();
        let mut system = InputSystem::new(ScriptedPlatform::new(), &self.config);
        let mut window = IVec2::new(100, 100);

        system.platform_mut().push_events([
            PlatformEvent::Key {
                keycode: Keycode::SPACE,
                pressed: true,
                repeat: false,
                modifiers: KeyMod::empty(),
            },
            PlatformEvent::MouseMotion {
                delta: IVec2::new(1, 0),
                position: IVec2::new(1, 0),
            },
            PlatformEvent::MouseMotion {
                delta: IVec2::new(2, 4),
                position: IVec2::new(3, 4),
            },
            PlatformEvent::Touch {
                phase: TouchPhase::Down,
                finger: 42,
                position: Vec2::new(0.5, 0.25),
                delta: Vec2::ZERO,
            },
        ]);
        system.platform_mut().advance_clock(16);
        system.advance_frame(&mut window);

        let space = system.key(Keycode::SPACE);
        findings.push(Finding::require(
            space.is_down() && space.went_down(),
            "Key press visible in the frame it arrived",
        ));
        findings.push(Finding::require(
            system.mouse().delta == IVec2::new(3, 4),
            format!("Mouse motion accumulated to {:?}", system.mouse().delta),
        ));

        let touch = system.pointers().get(1).copied();
        findings.push(Finding::require(
            touch.is_some_and(|p| p.used && p.id == 42 && p.position == IVec2::new(50, 25)),
            "First touch claimed slot 1 in window pixels",
        ));
        findings.push(Finding::require(
            system.button(ButtonId::Pointer(1)).went_down(),
            "Touch slot button pressed",
        ));

        system.platform_mut().advance_clock(16);
        system.advance_frame(&mut window);

        let space = system.key(Keycode::SPACE);
        findings.push(Finding::require(
            space.is_down() && !space.went_down(),
            "Edge cleared on the following frame",
        ));
        findings.push(Finding::require(
            system.mouse().delta == IVec2::ZERO,
            "Mouse delta reset on the following frame",
        ));
        findings.push(Finding::require(
            system.frames() == 2 && system.frame_time_ms() == 16,
            format!(
                "Clock advanced: {} frames, {} ms last frame",
                system.frames(),
                system.frame_time_ms()
            ),
        ));

        CheckResult::from_findings("Scripted frames reduced as expected", &findings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::check::CheckStatus;

    #[test]
    fn test_default_config_passes() {
        assert_eq!(FramePipelineCheck::new().check().status, CheckStatus::Pass);
    }

    #[test]
    fn test_invalid_config_fails_without_running_frames() {
        let config = InputConfig {
            pointer_capacity: 1,
            ..InputConfig::default()
        };
        let result = FramePipelineCheck::with_config(config).check();
        assert_eq!(result.status, CheckStatus::Fail);
        assert!(result.message.contains("pointer_capacity"));
    }
}
