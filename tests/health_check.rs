//! Integration tests for the health check system

use frame_input::health::{self, CheckStatus, HealthCheckRunner, SystemCheck, checks::*};

#[test]
fn test_all_health_checks() {
    let report = health::run_all_checks();

    if !report.is_healthy() {
        eprintln!("\n{}", health::format_report(&report));
    }

    assert!(
        report.is_healthy(),
        "Health checks failed: {} failures, {} warnings",
        report.failed,
        report.warned
    );
    assert_eq!(report.total, 4);
}

#[test]
fn test_config_check() {
    let result = ConfigCheck::new().check();
    assert!(
        result.status.is_ok(),
        "Config check failed: {}",
        result.message
    );
}

#[test]
fn test_config_check_with_unknown_profile_uses_defaults() {
    let result = ConfigCheck::with_profiles(vec!["no-such-profile"]).check();
    assert!(result.status.is_ok(), "{:?}", result.details);
}

#[test]
fn test_build_info_check() {
    let result = BuildInfoCheck::new().check();
    assert!(
        result.status.is_ok(),
        "Build info check failed: {}",
        result.message
    );
}

#[test]
fn test_frame_pipeline_check() {
    let result = FramePipelineCheck::new().check();
    assert_eq!(
        result.status,
        CheckStatus::Pass,
        "Frame pipeline check failed:\n{}",
        result.details.unwrap_or_default()
    );
}

#[test]
fn test_mailbox_check() {
    let result = MailboxCheck::new().check();
    assert_eq!(
        result.status,
        CheckStatus::Pass,
        "Mailbox check failed:\n{}",
        result.details.unwrap_or_default()
    );
}

#[test]
fn test_runner_collects_all_checks() {
    let report = HealthCheckRunner::new()
        .add_check(ConfigCheck::new())
        .add_check(MailboxCheck::new())
        .run();

    assert_eq!(report.total, 2, "Expected 2 checks in report");
    assert_eq!(report.passed + report.warned + report.failed, report.total);
}

#[test]
fn test_report_lists_every_check() {
    let report = health::run_all_checks();
    let text = health::format_report(&report);

    for name in ["Configuration", "Build Info", "Frame Pipeline", "Gamepad Mailbox"] {
        assert!(text.contains(name), "report is missing {name}");
    }
}
