//! Bounded hand-off queue for gamepad records produced off the main thread
//!
//! The platform callback thread pushes, the frame loop drains. Both sides
//! hold the lock only long enough to push one record or swap the whole
//! pending batch out.

use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use tracing::trace;

use super::gamepad::{GamepadDeviceId, GamepadEventRecord};

/// Default number of records accepted between two drains
pub const DEFAULT_MAILBOX_CAPACITY: usize = 100;

/// Mutex-protected queue of [`GamepadEventRecord`]s
///
/// Once `capacity` records are pending, further pushes are rejected: the
/// newest record is dropped and the producer never blocks on space.
#[derive(Debug)]
pub struct GamepadMailbox {
    pending: Mutex<Vec<GamepadEventRecord>>,
    capacity: usize,
    dropped: AtomicUsize,
}

impl GamepadMailbox {
    pub fn new(capacity: usize) -> Self {
        Self {
            pending: Mutex::new(Vec::new()),
            capacity,
            dropped: AtomicUsize::new(0),
        }
    }

    /// Queues a record; returns `false` if it was dropped because the mailbox is full
    pub fn push(&self, record: GamepadEventRecord) -> bool {
        let mut pending = self.pending.lock();
        if pending.len() >= self.capacity {
            drop(pending);
            self.dropped.fetch_add(1, Ordering::Relaxed);
            trace!(gamepad.id = record.device_id, "Gamepad mailbox full, dropping record");
            return false;
        }
        pending.push(record);
        true
    }

    /// Entry point for the platform callback: raw fields straight from the OS
    pub fn receive(
        &self,
        device_id: GamepadDeviceId,
        event_code: i32,
        control_code: i32,
        x: f32,
        y: f32,
    ) -> bool {
        self.push(GamepadEventRecord {
            device_id,
            event_code,
            control_code,
            x,
            y,
        })
    }

    /// Takes every pending record in arrival order
    pub fn drain(&self) -> Vec<GamepadEventRecord> {
        std::mem::take(&mut *self.pending.lock())
    }

    pub fn len(&self) -> usize {
        self.pending.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Total records rejected since creation
    pub fn dropped_count(&self) -> usize {
        self.dropped.load(Ordering::Relaxed)
    }
}

impl Default for GamepadMailbox {
    fn default() -> Self {
        Self::new(DEFAULT_MAILBOX_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::gamepad::codes;

    #[test]
    fn test_drain_returns_arrival_order() {
        let mailbox = GamepadMailbox::new(4);
        mailbox.push(GamepadEventRecord::key_down(1, codes::KEYCODE_BUTTON_A));
        mailbox.push(GamepadEventRecord::key_up(1, codes::KEYCODE_BUTTON_A));

        let batch = mailbox.drain();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].event_code, codes::ACTION_KEY_DOWN);
        assert_eq!(batch[1].event_code, codes::ACTION_KEY_UP);
        assert!(mailbox.is_empty());
    }

    #[test]
    fn test_overflow_drops_newest() {
        let mailbox = GamepadMailbox::new(3);
        for x in 0..5 {
            mailbox.push(GamepadEventRecord::motion(1, x as f32, 0.0));
        }

        let batch = mailbox.drain();
        let xs: Vec<f32> = batch.iter().map(|record| record.x).collect();
        assert_eq!(xs, vec![0.0, 1.0, 2.0]);
        assert_eq!(mailbox.dropped_count(), 2);
    }

    #[test]
    fn test_push_reports_rejection() {
        let mailbox = GamepadMailbox::new(1);
        assert!(mailbox.receive(1, codes::ACTION_KEY_DOWN, codes::KEYCODE_DPAD_UP, 0.0, 0.0));
        assert!(!mailbox.receive(1, codes::ACTION_KEY_UP, codes::KEYCODE_DPAD_UP, 0.0, 0.0));
    }

    #[test]
    fn test_capacity_frees_up_after_drain() {
        let mailbox = GamepadMailbox::new(1);
        mailbox.push(GamepadEventRecord::motion(1, 0.0, 0.0));
        mailbox.drain();
        assert!(mailbox.push(GamepadEventRecord::motion(1, 0.0, 0.0)));
        assert_eq!(mailbox.len(), 1);
    }
}
