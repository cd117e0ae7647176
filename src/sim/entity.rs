//! Entities and their lifecycle
//!
//! An entity is owned by exactly one game. It is spawned, becomes active on
//! its first tick, and ends either resolved by a touch (pop-out, then removed)
//! or expired at the end of its motion path.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::motion::Motion;

pub type EntityId = u32;

/// Lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lifecycle {
    /// Created this tick
    Spawned,
    /// Moving and touchable
    Active,
    /// Resolved by an interaction. `ticks_left` counts down the pop-out;
    /// `None` keeps the entity on screen (found grid items).
    Resolved { ticks_left: Option<u32> },
    /// Reached the end of its path
    Expired,
}

/// A single game object
#[derive(Debug, Clone)]
pub struct Entity<P> {
    pub id: EntityId,
    pub payload: P,
    /// Center position
    pub pos: Vec2,
    /// Diameter / edge length
    pub size: f32,
    pub phase: Lifecycle,
    pub motion: Option<Motion>,
}

impl<P> Entity<P> {
    pub fn new(id: EntityId, payload: P, pos: Vec2, size: f32) -> Self {
        Self {
            id,
            payload,
            pos,
            size,
            phase: Lifecycle::Spawned,
            motion: None,
        }
    }

    pub fn with_motion(mut self, motion: Motion) -> Self {
        motion.apply_to(&mut self.pos);
        self.motion = Some(motion);
        self
    }

    /// Touchable (not yet resolved or expired)
    #[inline]
    pub fn is_live(&self) -> bool {
        matches!(self.phase, Lifecycle::Spawned | Lifecycle::Active)
    }

    /// Resolve this entity: freeze in place and start the pop-out.
    /// Returns false if it was already resolved or expired.
    pub fn resolve(&mut self, linger_ticks: Option<u32>) -> bool {
        if !self.is_live() {
            return false;
        }
        if let Some(motion) = &mut self.motion {
            motion.freeze();
        }
        self.phase = Lifecycle::Resolved {
            ticks_left: linger_ticks,
        };
        true
    }

    /// Advance one tick. Returns true once the entity should be removed.
    fn advance(&mut self) -> bool {
        match self.phase {
            Lifecycle::Spawned | Lifecycle::Active => {
                self.phase = Lifecycle::Active;
                if let Some(motion) = &mut self.motion {
                    let finished = motion.step();
                    motion.apply_to(&mut self.pos);
                    if finished {
                        self.phase = Lifecycle::Expired;
                        return true;
                    }
                }
                false
            }
            Lifecycle::Resolved {
                ticks_left: Some(ticks),
            } => {
                let ticks = ticks.saturating_sub(1);
                self.phase = Lifecycle::Resolved {
                    ticks_left: Some(ticks),
                };
                ticks == 0
            }
            Lifecycle::Resolved { ticks_left: None } => false,
            Lifecycle::Expired => true,
        }
    }

    /// Pop-out progress for rendering: 1.0 while live, shrinking to 0.0
    pub fn fade(&self, pop_ticks: u32) -> f32 {
        match self.phase {
            Lifecycle::Resolved {
                ticks_left: Some(ticks),
            } => ticks as f32 / pop_ticks.max(1) as f32,
            Lifecycle::Expired => 0.0,
            _ => 1.0,
        }
    }
}

/// Entities removed during a tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Removed {
    /// Reached the end of their path without being resolved
    pub expired: Vec<EntityId>,
    /// Finished their pop-out
    pub popped: Vec<EntityId>,
}

/// The entity collection of one game, in spawn order (ascending id)
#[derive(Debug, Clone)]
pub struct EntitySet<P> {
    entities: Vec<Entity<P>>,
    next_id: EntityId,
}

impl<P> Default for EntitySet<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> EntitySet<P> {
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Spawn a stationary entity
    pub fn spawn(&mut self, payload: P, pos: Vec2, size: f32) -> EntityId {
        let id = self.next_entity_id();
        self.entities.push(Entity::new(id, payload, pos, size));
        id
    }

    /// Spawn an entity that follows a motion path
    pub fn spawn_moving(&mut self, payload: P, pos: Vec2, size: f32, motion: Motion) -> EntityId {
        let id = self.next_entity_id();
        let entity = Entity::new(id, payload, pos, size).with_motion(motion);
        self.entities.push(entity);
        id
    }

    /// Entities on screen (live or popping out)
    #[inline]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn live_count(&self) -> usize {
        self.entities.iter().filter(|e| e.is_live()).count()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Entity<P>> {
        self.entities.iter()
    }

    pub fn live(&self) -> impl Iterator<Item = &Entity<P>> {
        self.entities.iter().filter(|e| e.is_live())
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity<P>> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity<P>> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    /// Resolve a live entity. Returns it if this call resolved it;
    /// resolving twice (or an unknown id) is a no-op.
    pub fn resolve(&mut self, id: EntityId, linger_ticks: Option<u32>) -> Option<&Entity<P>> {
        let entity = self.entities.iter_mut().find(|e| e.id == id)?;
        if entity.resolve(linger_ticks) {
            Some(&*entity)
        } else {
            None
        }
    }

    /// Advance every entity one tick and drop finished ones
    pub fn advance(&mut self) -> Removed {
        let mut removed = Removed::default();
        self.entities.retain_mut(|entity| {
            if !entity.advance() {
                return true;
            }
            if entity.phase == Lifecycle::Expired {
                removed.expired.push(entity.id);
            } else {
                removed.popped.push(entity.id);
            }
            false
        });
        removed
    }

    pub fn clear(&mut self) {
        self.entities.clear();
    }
}
