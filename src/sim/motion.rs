//! One-dimensional motion paths
//!
//! Every moving entity travels along a single axis (bubbles rise, numbers
//! fall, shapes drift along the conveyor) over a fixed number of ticks.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis an entity travels along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Timing curve applied to path progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Easing {
    Linear,
    /// Quadratic ease-in-out (slow start, slow finish)
    #[default]
    EaseInOut,
}

impl Easing {
    /// Map linear progress t in [0, 1] to eased progress
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u / 2.0
                }
            }
        }
    }
}

/// A fixed-duration path from `from` to `to` along one axis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Motion {
    pub axis: Axis,
    pub from: f32,
    pub to: f32,
    pub easing: Easing,
    pub duration_ticks: u32,
    pub elapsed_ticks: u32,
    /// Frozen paths stop advancing (entity resolved mid-flight)
    pub frozen: bool,
}

impl Motion {
    pub fn new(axis: Axis, from: f32, to: f32, duration_ticks: u32) -> Self {
        Self {
            axis,
            from,
            to,
            easing: Easing::default(),
            duration_ticks: duration_ticks.max(1),
            elapsed_ticks: 0,
            frozen: false,
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Linear progress in [0, 1]
    #[inline]
    pub fn progress(&self) -> f32 {
        (self.elapsed_ticks as f32 / self.duration_ticks as f32).min(1.0)
    }

    /// Current coordinate along the axis
    #[inline]
    pub fn value(&self) -> f32 {
        self.from + (self.to - self.from) * self.easing.apply(self.progress())
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.elapsed_ticks >= self.duration_ticks
    }

    /// Advance one tick. Returns true on the tick the path end is reached.
    pub fn step(&mut self) -> bool {
        if self.frozen || self.is_finished() {
            return false;
        }
        self.elapsed_ticks += 1;
        self.is_finished()
    }

    /// Stop in place
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    /// Write the current coordinate into a position
    pub fn apply_to(&self, pos: &mut Vec2) {
        match self.axis {
            Axis::Horizontal => pos.x = self.value(),
            Axis::Vertical => pos.y = self.value(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_easing_endpoints() {
        for easing in [Easing::Linear, Easing::EaseInOut] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert_eq!(easing.apply(1.0), 1.0);
        }
        assert!((Easing::EaseInOut.apply(0.5) - 0.5).abs() < 1e-6);
        // Slow start
        assert!(Easing::EaseInOut.apply(0.1) < 0.1);
    }

    #[test]
    fn test_motion_reaches_end_once() {
        let mut motion = Motion::new(Axis::Vertical, 100.0, 0.0, 4);
        let finished: Vec<bool> = (0..6).map(|_| motion.step()).collect();
        assert_eq!(finished, vec![false, false, false, true, false, false]);
        assert_eq!(motion.value(), 0.0);
    }

    #[test]
    fn test_frozen_motion_holds_position() {
        let mut motion = Motion::new(Axis::Horizontal, 0.0, 100.0, 10).with_easing(Easing::Linear);
        motion.step();
        motion.step();
        motion.freeze();
        let held = motion.value();
        for _ in 0..20 {
            assert!(!motion.step());
        }
        assert_eq!(motion.value(), held);
        assert!((held - 20.0).abs() < 1e-4);
    }

    #[test]
    fn test_apply_to_axis() {
        let mut motion = Motion::new(Axis::Horizontal, 10.0, 20.0, 1);
        motion.step();
        let mut pos = Vec2::new(0.0, 5.0);
        motion.apply_to(&mut pos);
        assert_eq!(pos, Vec2::new(20.0, 5.0));
    }
}
