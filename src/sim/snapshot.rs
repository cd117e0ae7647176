//! Read-only per-frame view for the renderer

use glam::Vec2;
use serde::Serialize;

use super::attr::{Attr, Color, Shape};
use super::entity::{EntityId, Lifecycle};
use super::game::GameKind;
use super::round::RoundPhase;

/// One entity as the renderer sees it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityView {
    pub id: EntityId,
    pub pos: Vec2,
    pub size: f32,
    pub attr: Attr,
    pub lifecycle: Lifecycle,
    /// 1.0 while live, shrinking to 0.0 over the pop-out
    pub fade: f32,
}

impl EntityView {
    #[inline]
    pub fn is_live(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Spawned | Lifecycle::Active)
    }
}

/// What the current round asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Target {
    /// Pop this many bubbles (next celebration milestone)
    Pops { goal: u32 },
    /// Find every card of this color
    Color { color: Color, count: u32 },
    /// Fill the basket to exactly this sum
    Sum { goal: u32 },
    /// Sort this many shapes in a row
    Streak { goal: u32 },
}

/// Full-screen overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Overlay {
    Celebration { count: u32 },
    Oops,
}

/// Number-catch bear expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Normal,
    Close,
    Celebrate,
    Oops,
}

/// Bin flash after a tap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BinFlash {
    Caught,
    Missed,
}

/// A shape-sorter bin
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinView {
    pub index: usize,
    pub shape: Shape,
    pub pos: Vec2,
    pub size: f32,
    /// Catch radius along the conveyor
    pub catch_zone: f32,
    /// A shape is currently inside this bin's zone
    pub active: bool,
    pub flash: Option<BinFlash>,
}

/// Game-specific HUD extras
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Hud {
    BubblePop {
        /// Pops per color, most popped first
        color_counts: Vec<(Color, u32)>,
    },
    ColorMatch {
        wrong_pulse: bool,
    },
    NumberCatch {
        mood: Mood,
    },
    ShapeSorter {
        bins: Vec<BinView>,
    },
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub game: GameKind,
    pub entities: Vec<EntityView>,
    pub target: Target,
    pub progress: u32,
    pub score: u64,
    pub streak: u32,
    pub phase: RoundPhase,
    pub overlay: Option<Overlay>,
    pub hud: Hud,
}

impl Snapshot {
    /// Live (touchable) entities
    pub fn live(&self) -> impl Iterator<Item = &EntityView> {
        self.entities.iter().filter(|e| e.is_live())
    }
}
