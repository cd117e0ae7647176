//! Interval spawner with a live-entity cap

use serde::{Deserialize, Serialize};

/// Emits spawn requests on a fixed interval, plus an optional warm-up burst
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spawner {
    interval_ticks: u32,
    countdown: u32,
    cap: usize,
    /// Ticks remaining until each pending warm-up spawn
    warmup: Vec<u32>,
}

impl Spawner {
    pub fn new(interval_ticks: u32, cap: usize) -> Self {
        let interval_ticks = interval_ticks.max(1);
        Self {
            interval_ticks,
            countdown: interval_ticks,
            cap,
            warmup: Vec::new(),
        }
    }

    /// Schedule one-off spawns at the given tick offsets from now
    pub fn with_warmup(mut self, delays: impl IntoIterator<Item = u32>) -> Self {
        self.warmup = delays.into_iter().map(|d| d.max(1)).collect();
        self
    }

    #[inline]
    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Advance one tick. Returns how many entities to spawn now, given
    /// `present` entities on screen. Gated ticks drop their spawns.
    pub fn tick(&mut self, present: usize, gated: bool) -> usize {
        let mut due = 0;
        self.warmup.retain_mut(|ticks| {
            *ticks -= 1;
            if *ticks == 0 {
                due += 1;
                false
            } else {
                true
            }
        });

        self.countdown -= 1;
        if self.countdown == 0 {
            due += 1;
            self.countdown = self.interval_ticks;
        }

        if gated {
            return 0;
        }
        due.min(self.cap.saturating_sub(present))
    }
}
