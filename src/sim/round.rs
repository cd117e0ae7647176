//! Round progress tracking and session counters
//!
//! Phase flow:
//! `AwaitingInput -> InProgress -> Complete -> AwaitingInput`, with an extra
//! `Overflow` branch for games where overshooting the target resets the round.
//! `Complete` and `Overflow` are timed overlays.

use serde::{Deserialize, Serialize};

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Fresh round, nothing recorded yet
    AwaitingInput,
    /// At least one correct interaction recorded
    InProgress,
    /// Target reached, celebration overlay showing
    Complete { ticks_left: u32 },
    /// Target overshot, "oops" overlay showing
    Overflow { ticks_left: u32 },
}

/// Outcome of recording progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    Advanced,
    Completed,
    Overflowed,
    /// Input is gated by an overlay
    Ignored,
}

/// Overlay that just finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayEnd {
    Complete,
    Overflow,
}

/// Accumulates interaction outcomes toward a round target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundTracker {
    pub target: u32,
    pub progress: u32,
    pub phase: RoundPhase,
    /// Rounds completed this session
    pub rounds_completed: u32,
    complete_ticks: u32,
    /// Overshooting enters `Overflow` for this long; `None` clamps instead
    overflow_ticks: Option<u32>,
    /// Whether overlays block touches and spawning
    gates_input: bool,
}

impl RoundTracker {
    pub fn new(target: u32, complete_ticks: u32) -> Self {
        Self {
            target: target.max(1),
            progress: 0,
            phase: RoundPhase::AwaitingInput,
            rounds_completed: 0,
            complete_ticks: complete_ticks.max(1),
            overflow_ticks: None,
            gates_input: true,
        }
    }

    /// Overshooting the target enters `Overflow` instead of completing
    pub fn with_overflow(mut self, overflow_ticks: u32) -> Self {
        self.overflow_ticks = Some(overflow_ticks.max(1));
        self
    }

    /// Non-gating overlays are banners: play continues underneath
    pub fn gating(mut self, gates_input: bool) -> Self {
        self.gates_input = gates_input;
        self
    }

    #[inline]
    pub fn overlay_active(&self) -> bool {
        matches!(
            self.phase,
            RoundPhase::Complete { .. } | RoundPhase::Overflow { .. }
        )
    }

    /// Touches and spawns are blocked
    #[inline]
    pub fn input_gated(&self) -> bool {
        self.gates_input && self.overlay_active()
    }

    /// Distance left to the target
    #[inline]
    pub fn remaining(&self) -> u32 {
        self.target.saturating_sub(self.progress)
    }

    /// Record a correct interaction worth `amount`
    pub fn record(&mut self, amount: u32) -> Progress {
        if self.input_gated() {
            return Progress::Ignored;
        }

        let progress = self.progress + amount;
        if progress < self.target {
            self.progress = progress;
            if self.phase == RoundPhase::AwaitingInput {
                self.phase = RoundPhase::InProgress;
            }
            return Progress::Advanced;
        }

        if progress > self.target {
            if let Some(ticks) = self.overflow_ticks {
                self.progress = progress;
                self.phase = RoundPhase::Overflow { ticks_left: ticks };
                log::info!("Round overflow: {} > {}", progress, self.target);
                return Progress::Overflowed;
            }
        }

        self.rounds_completed += 1;
        self.phase = RoundPhase::Complete {
            ticks_left: self.complete_ticks,
        };
        // Gating overlays keep the full count on display until they end;
        // banners start counting the next round straight away.
        self.progress = if self.gates_input { self.target } else { 0 };
        log::info!("Round {} complete (target {})", self.rounds_completed, self.target);
        Progress::Completed
    }

    /// Drop accumulated progress (missed shape, broken streak)
    pub fn reset_progress(&mut self) {
        self.progress = 0;
        if self.phase == RoundPhase::InProgress {
            self.phase = RoundPhase::AwaitingInput;
        }
    }

    /// Begin a fresh round with a new target
    pub fn start_round(&mut self, target: u32) {
        self.target = target.max(1);
        self.progress = 0;
        self.phase = RoundPhase::AwaitingInput;
    }

    /// Advance overlay timers. Returns the overlay that ended this tick.
    pub fn tick(&mut self) -> Option<OverlayEnd> {
        let (ticks_left, ended) = match &mut self.phase {
            RoundPhase::Complete { ticks_left } => (ticks_left, OverlayEnd::Complete),
            RoundPhase::Overflow { ticks_left } => (ticks_left, OverlayEnd::Overflow),
            _ => return None,
        };

        *ticks_left = ticks_left.saturating_sub(1);
        if *ticks_left > 0 {
            return None;
        }

        if self.gates_input {
            self.progress = 0;
        }
        self.phase = if self.progress > 0 {
            RoundPhase::InProgress
        } else {
            RoundPhase::AwaitingInput
        };
        Some(ended)
    }
}

/// Per-screen counters, dropped with the game instance
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub score: u64,
    pub streak: u32,
}

impl Session {
    /// Count a correct interaction
    pub fn reward(&mut self) {
        self.score += 1;
        self.streak += 1;
    }

    pub fn break_streak(&mut self) {
        self.streak = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_count_to_complete() {
        let mut round = RoundTracker::new(3, 10);
        assert_eq!(round.record(1), Progress::Advanced);
        assert_eq!(round.phase, RoundPhase::InProgress);
        assert_eq!(round.record(1), Progress::Advanced);
        assert_eq!(round.record(1), Progress::Completed);
        assert!(round.input_gated());
        assert_eq!(round.progress, 3);
        assert_eq!(round.record(1), Progress::Ignored);
    }

    #[test]
    fn test_overlay_ends() {
        let mut round = RoundTracker::new(1, 2);
        round.record(1);
        assert_eq!(round.tick(), None);
        assert_eq!(round.tick(), Some(OverlayEnd::Complete));
        assert_eq!(round.phase, RoundPhase::AwaitingInput);
        assert_eq!(round.progress, 0);
        assert_eq!(round.tick(), None);
    }

    #[test]
    fn test_overflow() {
        let mut round = RoundTracker::new(4, 10).with_overflow(5);
        assert_eq!(round.record(3), Progress::Advanced);
        assert_eq!(round.record(3), Progress::Overflowed);
        assert_eq!(round.progress, 6);
        assert_eq!(round.rounds_completed, 0);
        for _ in 0..4 {
            assert_eq!(round.tick(), None);
        }
        assert_eq!(round.tick(), Some(OverlayEnd::Overflow));
        assert_eq!(round.progress, 0);
        assert_eq!(round.target, 4);
    }

    #[test]
    fn test_overshoot_without_overflow_completes() {
        let mut round = RoundTracker::new(4, 10);
        round.record(3);
        assert_eq!(round.record(3), Progress::Completed);
        assert_eq!(round.progress, 4);
    }

    #[test]
    fn test_banner_keeps_counting() {
        let mut round = RoundTracker::new(2, 3).gating(false);
        round.record(1);
        assert_eq!(round.record(1), Progress::Completed);
        assert!(!round.input_gated());
        assert_eq!(round.progress, 0);
        assert_eq!(round.record(1), Progress::Advanced);
        assert!(round.overlay_active());
        round.tick();
        round.tick();
        assert_eq!(round.tick(), Some(OverlayEnd::Complete));
        assert_eq!(round.phase, RoundPhase::InProgress);
        assert_eq!(round.progress, 1);
    }

    #[test]
    fn test_reset_progress() {
        let mut round = RoundTracker::new(5, 3).gating(false);
        round.record(1);
        round.record(1);
        round.reset_progress();
        assert_eq!(round.progress, 0);
        assert_eq!(round.phase, RoundPhase::AwaitingInput);
    }

    #[test]
    fn test_session() {
        let mut session = Session::default();
        session.reward();
        session.reward();
        session.break_streak();
        assert_eq!(session, Session { score: 2, streak: 0 });
    }

    proptest! {
        #[test]
        fn prop_completes_once_per_round(target in 1u32..8, extra in 0u32..20) {
            let mut round = RoundTracker::new(target, 5);
            let mut completions = 0;
            for _ in 0..(target + extra) {
                if round.record(1) == Progress::Completed {
                    completions += 1;
                }
                prop_assert!(round.progress <= round.target);
            }
            prop_assert_eq!(completions, 1);
        }

        #[test]
        fn prop_progress_bounded_unless_overflow(amounts in prop::collection::vec(1u32..4, 1..30)) {
            let mut round = RoundTracker::new(6, 3).with_overflow(3);
            for amount in amounts {
                round.record(amount);
                let overflowed = matches!(round.phase, RoundPhase::Overflow { .. });
                prop_assert!(round.progress <= round.target || overflowed);
                round.tick();
            }
        }
    }
}
