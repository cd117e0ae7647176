//! Bubble Pop
//!
//! Bubbles of random size and color float up the screen. Every pop counts,
//! and every tenth pop sets off a celebration banner. There is no wrong move.

use std::collections::BTreeMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{HIT_SLOP, POP_DURATION_MS};
use crate::settings::Settings;
use crate::sim::{
    Attr, Axis, BUBBLE_COLORS, Color, Dice, EntityId, EntitySet, EntityView, Feedback, GameEvent,
    GameKind, GameRng, Haptic, Hud, MiniGame, Motion, Outline, Overlay, Progress, RoundPhase,
    RoundTracker, Session, Snapshot, Sound, Spawner, Target, Touch, hit_test, seeded_rng,
};
use crate::{Viewport, ms_to_ticks};

/// Bubble Pop tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BubblePopConfig {
    /// Maximum bubbles on screen
    pub max_bubbles: usize,
    pub spawn_interval_ms: u32,
    /// Time for a bubble to float from the bottom edge past the top
    pub rise_duration_ms: u32,
    /// Celebrate every N pops
    pub celebration_threshold: u32,
    pub celebration_ms: u32,
    /// Bubbles released at start, `warmup_spacing_ms` apart
    pub warmup_bubbles: u32,
    pub warmup_spacing_ms: u32,
    pub min_size: f32,
    pub max_size: f32,
}

impl Default for BubblePopConfig {
    fn default() -> Self {
        Self {
            max_bubbles: 12,
            spawn_interval_ms: 800,
            rise_duration_ms: 8000,
            celebration_threshold: 10,
            celebration_ms: 1500,
            warmup_bubbles: 5,
            warmup_spacing_ms: 300,
            min_size: 60.0,
            max_size: 100.0,
        }
    }
}

/// Bubble Pop game state
pub struct BubblePop<D = GameRng> {
    config: BubblePopConfig,
    viewport: Viewport,
    rng: D,
    bubbles: EntitySet<Color>,
    spawner: Spawner,
    round: RoundTracker,
    session: Session,
    color_counts: BTreeMap<Color, u32>,
    pop_ticks: u32,
}

impl BubblePop<GameRng> {
    pub fn with_seed(settings: &Settings, seed: u64) -> Self {
        Self::new(settings.bubble_pop.clone(), settings.viewport, seeded_rng(seed))
    }
}

impl<D: Dice> BubblePop<D> {
    pub fn new(config: BubblePopConfig, viewport: Viewport, rng: D) -> Self {
        let warmup = (0..config.warmup_bubbles).map(|i| ms_to_ticks(i * config.warmup_spacing_ms));
        let spawner = Spawner::new(ms_to_ticks(config.spawn_interval_ms), config.max_bubbles)
            .with_warmup(warmup);
        // The banner never blocks popping
        let round = RoundTracker::new(
            config.celebration_threshold,
            ms_to_ticks(config.celebration_ms),
        )
        .gating(false);

        Self {
            config,
            viewport,
            rng,
            bubbles: EntitySet::new(),
            spawner,
            round,
            session: Session::default(),
            color_counts: BTreeMap::new(),
            pop_ticks: ms_to_ticks(POP_DURATION_MS),
        }
    }

    /// Total bubbles popped this session
    pub fn pop_count(&self) -> u64 {
        self.session.score
    }

    pub fn bubbles(&self) -> &EntitySet<Color> {
        &self.bubbles
    }

    /// Pops per color, most popped first
    pub fn color_counts(&self) -> Vec<(Color, u32)> {
        let mut counts: Vec<(Color, u32)> = self
            .color_counts
            .iter()
            .filter(|(_, count)| **count > 0)
            .map(|(color, count)| (*color, *count))
            .collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        counts
    }

    fn spawn_bubble(&mut self) -> EntityId {
        let size = self.rng.range(self.config.min_size, self.config.max_size);
        let x = self.rng.unit() * (self.viewport.width - size).max(0.0) + size / 2.0;
        let color = self.rng.pick(&BUBBLE_COLORS);

        let motion = Motion::new(
            Axis::Vertical,
            self.viewport.height + size / 2.0,
            -self.config.max_size / 2.0,
            ms_to_ticks(self.config.rise_duration_ms),
        );
        let id = self
            .bubbles
            .spawn_moving(color, Vec2::new(x, 0.0), size, motion);
        log::trace!("Bubble {} spawned ({:?}, {:.0}px)", id, color, size);
        id
    }

    fn pop(&mut self, id: EntityId, feedback: &mut Vec<Feedback>) {
        let Some(bubble) = self.bubbles.resolve(id, Some(self.pop_ticks)) else {
            return;
        };
        let color = bubble.payload;

        feedback.push(Feedback::Sound(Sound::Pop));
        feedback.push(Feedback::Haptic(Haptic::Light));

        *self.color_counts.entry(color).or_insert(0) += 1;
        self.session.reward();

        if self.round.record(1) == Progress::Completed {
            feedback.push(Feedback::Sound(Sound::Celebration));
            feedback.push(Feedback::Haptic(Haptic::Success));
            log::info!("🎉 {} pops!", self.session.score);
        }
    }

    fn tick(&mut self) {
        self.bubbles.advance();
        self.round.tick();

        let due = self
            .spawner
            .tick(self.bubbles.len(), self.round.input_gated());
        for _ in 0..due {
            self.spawn_bubble();
        }
    }
}

impl<D: Dice> MiniGame for BubblePop<D> {
    fn kind(&self) -> GameKind {
        GameKind::BubblePop
    }

    fn apply(&mut self, event: GameEvent, feedback: &mut Vec<Feedback>) {
        match event {
            GameEvent::Tick => self.tick(),
            GameEvent::Touch(_) if self.round.input_gated() => {}
            GameEvent::Touch(Touch::Entity(id)) => self.pop(id, feedback),
            GameEvent::Touch(Touch::Point(point)) => {
                if let Some(id) =
                    hit_test(self.bubbles.iter(), point, HIT_SLOP, Outline::Circle)
                {
                    self.pop(id, feedback);
                }
            }
            GameEvent::Touch(Touch::Zone(_)) => {}
        }
    }

    fn snapshot(&self) -> Snapshot {
        let entities = self
            .bubbles
            .iter()
            .map(|b| EntityView {
                id: b.id,
                pos: b.pos,
                size: b.size,
                attr: Attr::Bubble { color: b.payload },
                lifecycle: b.phase,
                fade: b.fade(self.pop_ticks),
            })
            .collect();

        let overlay = match self.round.phase {
            RoundPhase::Complete { .. } => Some(Overlay::Celebration {
                count: self.round.rounds_completed * self.round.target,
            }),
            _ => None,
        };

        Snapshot {
            game: GameKind::BubblePop,
            entities,
            target: Target::Pops {
                goal: self.round.target,
            },
            progress: self.round.progress,
            score: self.session.score,
            streak: self.session.streak,
            phase: self.round.phase,
            overlay,
            hud: Hud::BubblePop {
                color_counts: self.color_counts(),
            },
        }
    }
}
