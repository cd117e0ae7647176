//! Game events in, feedback out
//!
//! Touches and timer ticks are queued per game and drained by the reducer
//! once per frame; the reducer answers with fire-and-forget feedback.

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::EntityId;

/// Where a touch landed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Touch {
    /// Directly on an entity (the renderer already hit-tested it)
    Entity(EntityId),
    /// Raw screen point, hit-tested by the game
    Point(Vec2),
    /// A fixed zone such as a sorting bin
    Zone(usize),
}

/// Input to the reducer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Touch(Touch),
    /// One fixed simulation step
    Tick,
}

/// Sound cues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sound {
    Pop,
    Celebration,
}

/// Haptic cues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Haptic {
    Light,
    Medium,
    Success,
    Warning,
}

/// Best-effort side effect requested by a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Feedback {
    Sound(Sound),
    Haptic(Haptic),
}

/// FIFO of pending events for one game
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    events: VecDeque<GameEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: GameEvent) {
        self.events.push_back(event);
    }

    pub fn pop(&mut self) -> Option<GameEvent> {
        self.events.pop_front()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
