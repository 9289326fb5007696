//! Startup health checks for the input pipeline
//!
//! Each check exercises one layer against a scripted platform or the loaded
//! configuration, so the suite runs headless in CI and from `input-probe --check`.
//!
//! # Example
//!
//! ```no_run
//! use frame_input::health::{HealthCheckRunner, checks::*};
//!
//! let report = HealthCheckRunner::new()
//!     .add_check(ConfigCheck::new())
//!     .add_check(FramePipelineCheck::new())
//!     .run();
//!
//! if report.is_healthy() {
//!     println!("Input pipeline operational");
//! }
//! ```

pub mod check;
pub mod checks;
pub mod reporter;
pub mod runner;

pub use check::{CheckResult, CheckStatus, SystemCheck};
pub use reporter::{format_report, print_report};
pub use runner::{HealthCheckReport, HealthCheckRunner};

/// Runs all default health checks and returns a report
pub fn run_all_checks() -> HealthCheckReport {
    HealthCheckRunner::new()
        .add_check(checks::ConfigCheck::new())
        .add_check(checks::BuildInfoCheck::new())
        .add_check(checks::FramePipelineCheck::new())
        .add_check(checks::MailboxCheck::new())
        .run()
}
