//! Wall-clock frame scheduler
//!
//! Stands in for a display refresh: every requested frame becomes due one
//! interval after it was requested, and the main loop sleeps until then.

use std::collections::VecDeque;
use std::thread;
use std::time::{Duration, Instant};

use odos_core::traits::{FrameScheduler, FrameToken};

/// Default refresh rate of the simulated display
pub const DEFAULT_FRAME_HZ: f64 = 60.0;

/// Frame scheduler backed by `std::time::Instant`
#[derive(Debug)]
pub struct IntervalScheduler {
    interval: Duration,
    epoch: Instant,
    next_id: u32,
    queue: VecDeque<(FrameToken, Instant)>,
}

impl IntervalScheduler {
    /// Create a scheduler ticking at `hz` (non-positive rates use the default)
    pub fn new(hz: f64) -> Self {
        let hz = if hz.is_finite() && hz > 0.0 {
            hz
        } else {
            DEFAULT_FRAME_HZ
        };
        Self {
            interval: Duration::from_secs_f64(1.0 / hz),
            epoch: Instant::now(),
            next_id: 0,
            queue: VecDeque::new(),
        }
    }

    /// Milliseconds since the scheduler was created
    pub fn now_ms(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64() * 1000.0
    }

    /// Sleep until the oldest pending frame is due
    ///
    /// Returns the fired token and the frame time, or `None` when nothing
    /// is pending.
    pub fn wait_next(&mut self) -> Option<(FrameToken, f64)> {
        let (token, due) = self.queue.pop_front()?;
        let now = Instant::now();
        if due > now {
            thread::sleep(due - now);
        }
        Some((token, self.now_ms()))
    }
}

impl FrameScheduler for IntervalScheduler {
    fn schedule_next(&mut self) -> FrameToken {
        self.next_id = self.next_id.wrapping_add(1);
        let token = FrameToken(self.next_id);
        self.queue.push_back((token, Instant::now() + self.interval));
        token
    }

    fn cancel(&mut self, token: FrameToken) {
        self.queue.retain(|(pending, _)| *pending != token);
    }
}
