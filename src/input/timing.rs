//! Frame timing sampled once per advance

/// Default delta reported for the very first frame
pub const DEFAULT_FIRST_FRAME_DELTA_MS: u64 = 16;

const MILLIS_PER_SECOND: f32 = 1000.0;

/// Millisecond frame clock
#[derive(Debug, Clone)]
pub struct FrameClock {
    start_ms: u64,
    last_ms: u64,
    frame_time_ms: u64,
    frames: u64,
    next_log_time: f32,
}

impl FrameClock {
    /// Starts the clock at `now_ms`, back-dated so frame 1 sees `first_delta_ms`
    pub fn new(now_ms: u64, first_delta_ms: u64) -> Self {
        Self {
            start_ms: now_ms,
            last_ms: now_ms.saturating_sub(first_delta_ms),
            frame_time_ms: 0,
            frames: 0,
            next_log_time: 0.0,
        }
    }

    /// Samples the clock for a new frame
    pub fn tick(&mut self, now_ms: u64) {
        // Platform clocks should be monotonic, but never report a negative delta
        let now_ms = now_ms.max(self.last_ms);
        self.frame_time_ms = now_ms - self.last_ms;
        self.last_ms = now_ms;
        self.frames += 1;
    }

    /// Seconds between the clock start and the latest sample
    pub fn time(&self) -> f32 {
        self.last_ms.saturating_sub(self.start_ms) as f32 / MILLIS_PER_SECOND
    }

    /// Seconds between the two latest samples
    pub fn delta_time(&self) -> f32 {
        self.frame_time_ms as f32 / MILLIS_PER_SECOND
    }

    pub fn frame_time_ms(&self) -> u64 {
        self.frame_time_ms
    }

    /// Number of ticks so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Returns true at most once per elapsed whole second
    pub fn frame_rate_log_due(&mut self) -> bool {
        let now = self.time();
        if now > self.next_log_time {
            self.next_log_time = now.ceil();
            true
        } else {
            false
        }
    }
}
