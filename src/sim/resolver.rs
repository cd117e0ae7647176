//! Touch resolution
//!
//! Maps a touch to at most one entity. Direct-hit games hit-test the touch
//! point against entity bounds; zone-based games look for entities near a
//! fixed anchor (a bin under the conveyor).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityId};
use super::motion::Axis;

/// How to choose between several entities inside one zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TieBreak {
    /// First candidate in spawn order (oldest entity)
    #[default]
    FirstFound,
    /// Candidate closest to the anchor; spawn order breaks exact ties
    Nearest,
}

/// Result of classifying an interaction against the round target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Incorrect,
}

impl Verdict {
    #[inline]
    pub fn of(matches: bool) -> Self {
        if matches {
            Verdict::Correct
        } else {
            Verdict::Incorrect
        }
    }
}

/// Entity outline used for point hit tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outline {
    /// Disc of diameter `size` (bubbles, falling numbers)
    Circle,
    /// Square of edge `size` (grid cards)
    Square,
}

impl Outline {
    /// Whether `point` lies within the outline grown by `slop`
    pub fn contains<P>(self, entity: &Entity<P>, point: Vec2, slop: f32) -> bool {
        let half = entity.size / 2.0 + slop;
        match self {
            Outline::Circle => entity.pos.distance(point) <= half,
            Outline::Square => {
                let d = (point - entity.pos).abs();
                d.x <= half && d.y <= half
            }
        }
    }
}

/// Live entity under a touch point. A touch inside an outline beats one that
/// only lands in the slop, and newer entities render on top so they win
/// overlaps. Among slop-only hits the nearest center wins.
pub fn hit_test<'a, P: 'a>(
    entities: impl DoubleEndedIterator<Item = &'a Entity<P>>,
    point: Vec2,
    slop: f32,
    outline: Outline,
) -> Option<EntityId> {
    let mut nearest: Option<(f32, EntityId)> = None;
    for e in entities.rev().filter(|e| e.is_live()) {
        if outline.contains(e, point, 0.0) {
            return Some(e.id);
        }
        if outline.contains(e, point, slop) {
            let d = e.pos.distance_squared(point);
            if nearest.is_none_or(|(best, _)| d < best) {
                nearest = Some((d, e.id));
            }
        }
    }
    nearest.map(|(_, id)| id)
}

/// Live entity within `threshold` of a zone anchor along `axis`
pub fn zone_pick<'a, P: 'a>(
    entities: impl Iterator<Item = &'a Entity<P>>,
    anchor: f32,
    axis: Axis,
    threshold: f32,
    tie_break: TieBreak,
) -> Option<EntityId> {
    let offset = |e: &Entity<P>| match axis {
        Axis::Horizontal => (e.pos.x - anchor).abs(),
        Axis::Vertical => (e.pos.y - anchor).abs(),
    };

    let mut candidates = entities.filter(|e| e.is_live() && offset(*e) < threshold);
    match tie_break {
        TieBreak::FirstFound => candidates.next().map(|e| e.id),
        TieBreak::Nearest => {
            let mut best: Option<(f32, EntityId)> = None;
            for e in candidates {
                let d = offset(e);
                if best.is_none_or(|(best_d, _)| d < best_d) {
                    best = Some((d, e.id));
                }
            }
            best.map(|(_, id)| id)
        }
    }
}
