//! Build information health check

use crate::build_info;
use crate::health::check::{CheckResult, SystemCheck};

/// Reports the compile-time metadata baked into the binary
pub struct BuildInfoCheck;

impl BuildInfoCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BuildInfoCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for BuildInfoCheck {
    fn name(&self) -> &'static str {
        "Build Info"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Reports git, rustc and target metadata")
    }

    fn check(&self) -> CheckResult {
        let details = format!(
            "  Git: {}@{} (dirty: {})\n  Build time: {}\n  Rustc: {} ({})\n  Target: {}",
            build_info::GIT_BRANCH,
            build_info::git_sha_short(),
            build_info::is_git_dirty(),
            build_info::BUILD_TIMESTAMP,
            build_info::RUSTC_SEMVER,
            build_info::RUSTC_CHANNEL,
            build_info::version_string(),
        );

        if build_info::is_git_dirty() {
            CheckResult::warn("Built from a dirty working tree").with_details(details)
        } else {
            CheckResult::pass(build_info::version_string()).with_details(details)
        }
    }
}
