//! Configuration health check

use crate::config::InputConfig;
use crate::health::check::{CheckResult, Finding, SystemCheck};

/// Loads and validates every configured profile
pub struct ConfigCheck {
    profiles: Vec<&'static str>,
}

impl ConfigCheck {
    /// Checks the debug and release profiles
    pub fn new() -> Self {
        Self {
            profiles: vec!["debug", "release"],
        }
    }

    pub fn with_profiles(profiles: Vec<&'static str>) -> Self {
        Self { profiles }
    }
}

impl Default for ConfigCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for ConfigCheck {
    fn name(&self) -> &'static str {
        "Configuration"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Loads each profile from files and environment, then validates it")
    }

    fn check(&self) -> CheckResult {
        let mut findings = Vec::new();

        for profile in &self.profiles {
            let finding = match InputConfig::load(profile) {
                Ok(config) => match config.validate() {
                    Ok(()) => Finding::pass(format!(
                        "Profile '{}': {} pointer slots, mailbox {}",
                        profile, config.pointer_capacity, config.mailbox_capacity
                    )),
                    Err(e) => Finding::fail(format!("Profile '{}': invalid - {}", profile, e)),
                },
                Err(e) => Finding::fail(format!("Profile '{}': failed to load - {}", profile, e)),
            };
            findings.push(finding);
        }

        findings.push(match InputConfig::load_from_env() {
            Ok(config) => Finding::pass(format!("Environment: profile '{}' loaded", config.profile)),
            Err(e) => Finding::warn(format!("Environment: {}", e)),
        });

        CheckResult::from_findings(format!("{} profiles checked", self.profiles.len()), &findings)
    }
}
