//! Deterministic mini-game core
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (timers are tick counters)
//! - Injected RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod attr;
pub mod dice;
pub mod entity;
pub mod event;
pub mod game;
pub mod motion;
pub mod resolver;
pub mod round;
pub mod snapshot;
pub mod spawner;

pub use attr::{Attr, BUBBLE_COLORS, Color, MATCH_COLORS, OBJECTS, Shape};
pub use dice::{Dice, GameRng, ScriptedDice, seeded_rng};
pub use entity::{Entity, EntityId, EntitySet, Lifecycle, Removed};
pub use event::{EventQueue, Feedback, GameEvent, Haptic, Sound, Touch};
pub use game::{Frame, GameKind, GameLoop, MiniGame, UnknownGame};
pub use motion::{Axis, Easing, Motion};
pub use resolver::{Outline, TieBreak, Verdict, hit_test, zone_pick};
pub use round::{OverlayEnd, Progress, RoundPhase, RoundTracker, Session};
pub use snapshot::{BinFlash, BinView, EntityView, Hud, Mood, Overlay, Snapshot, Target};
pub use spawner::Spawner;
