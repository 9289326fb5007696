//! Gamepad mailbox health check

use std::sync::Arc;
use std::thread;

use crate::health::check::{CheckResult, Finding, SystemCheck};
use crate::input::{GamepadEventRecord, GamepadMailbox};

/// Fills a mailbox from another thread and checks capacity handling
pub struct MailboxCheck {
    capacity: usize,
}

impl MailboxCheck {
    pub fn new() -> Self {
        Self { capacity: 8 }
    }
}

impl Default for MailboxCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for MailboxCheck {
    fn name(&self) -> &'static str {
        "Gamepad Mailbox"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Pushes records from a producer thread past capacity")
    }

    fn check(&self) -> CheckResult {
        let mailbox = Arc::new(GamepadMailbox::new(self.capacity));
        let pushes = self.capacity + 3;

        let producer = {
            let mailbox = Arc::clone(&mailbox);
            thread::spawn(move || {
                (0..pushes)
                    .filter(|&i| mailbox.push(GamepadEventRecord::motion(0, i as f32, 0.0)))
                    .count()
            })
        };

        let accepted = match producer.join() {
            Ok(accepted) => accepted,
            Err(_) => return CheckResult::fail("Producer thread panicked"),
        };

        let batch = mailbox.drain();
        let findings = [
            Finding::require(
                accepted == self.capacity,
                format!("{} of {} pushes accepted", accepted, pushes),
            ),
            Finding::require(
                mailbox.dropped_count() == pushes - self.capacity,
                format!("{} records dropped", mailbox.dropped_count()),
            ),
            Finding::require(
                batch.first().map(|r| r.x) == Some(0.0),
                "Oldest records kept",
            ),
            Finding::require(mailbox.is_empty(), "Drain leaves the mailbox empty"),
        ];

        CheckResult::from_findings(format!("Capacity {} enforced", self.capacity), &findings)
    }
}
