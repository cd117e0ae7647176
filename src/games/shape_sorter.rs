//! Shape Sorter
//!
//! Shapes ride a conveyor across the top of the screen. Three bins sit below,
//! one per shape. Tapping a bin while a shape passes over it sorts the shape;
//! every fifth sort in a row earns a celebration.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{HIT_SLOP, POP_DURATION_MS};
use crate::settings::Settings;
use crate::sim::{
    Attr, Axis, BinFlash, BinView, Dice, Easing, EntityId, EntitySet, EntityView, Feedback,
    GameEvent, GameKind, GameRng, Haptic, Hud, MiniGame, Motion, Overlay, Progress, RoundPhase,
    RoundTracker, Session, Shape, Snapshot, Sound, Spawner, Target, TieBreak, Touch, Verdict,
    seeded_rng, zone_pick,
};
use crate::{Viewport, ms_to_ticks};

/// Shape Sorter tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeSorterConfig {
    pub shape_size: f32,
    /// Y of the conveyor belt centerline
    pub conveyor_y: f32,
    /// Time for a shape to cross the whole belt
    pub conveyor_ms: u32,
    pub spawn_interval_ms: u32,
    pub warmup_ms: u32,
    pub max_shapes: usize,
    pub bin_size: f32,
    pub bin_gap: f32,
    /// Distance of the bins' top edge above the bottom of the screen
    pub bin_offset: f32,
    /// A shape is catchable while its center is this close to a bin's center
    pub catch_zone: f32,
    /// Sorts in a row needed for a celebration
    pub streak_goal: u32,
    pub celebration_ms: u32,
    pub flash_ms: u32,
    /// Copies of each shape in one conveyor bag
    pub shapes_per_bag: usize,
    /// Which shape a bin tap takes when several are in its zone
    pub tie_break: TieBreak,
}

impl Default for ShapeSorterConfig {
    fn default() -> Self {
        Self {
            shape_size: 70.0,
            conveyor_y: 200.0,
            conveyor_ms: 4000,
            spawn_interval_ms: 2000,
            warmup_ms: 500,
            max_shapes: 6,
            bin_size: 100.0,
            bin_gap: 20.0,
            bin_offset: 280.0,
            catch_zone: 100.0,
            streak_goal: 5,
            celebration_ms: 1600,
            flash_ms: 200,
            shapes_per_bag: 4,
            tie_break: TieBreak::FirstFound,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Bin {
    shape: Shape,
    center: Vec2,
    flash: Option<(BinFlash, u32)>,
}

/// Shape Sorter game state
pub struct ShapeSorter<D = GameRng> {
    config: ShapeSorterConfig,
    viewport: Viewport,
    rng: D,
    shapes: EntitySet<Shape>,
    bins: Vec<Bin>,
    /// Upcoming shapes, drawn from the back
    bag: Vec<Shape>,
    spawner: Spawner,
    round: RoundTracker,
    session: Session,
    pop_ticks: u32,
}

impl ShapeSorter<GameRng> {
    pub fn with_seed(settings: &Settings, seed: u64) -> Self {
        Self::new(settings.shape_sorter.clone(), settings.viewport, seeded_rng(seed))
    }
}

impl<D: Dice> ShapeSorter<D> {
    pub fn new(config: ShapeSorterConfig, viewport: Viewport, rng: D) -> Self {
        let count = Shape::ALL.len() as f32;
        let total = count * config.bin_size + (count - 1.0) * config.bin_gap;
        let start = (viewport.width - total) / 2.0;
        let bin_y = viewport.height - config.bin_offset + config.bin_size / 2.0;
        let bins = Shape::ALL
            .iter()
            .enumerate()
            .map(|(i, shape)| Bin {
                shape: *shape,
                center: Vec2::new(
                    start + i as f32 * (config.bin_size + config.bin_gap) + config.bin_size / 2.0,
                    bin_y,
                ),
                flash: None,
            })
            .collect();

        let spawner = Spawner::new(ms_to_ticks(config.spawn_interval_ms), config.max_shapes)
            .with_warmup([ms_to_ticks(config.warmup_ms)]);
        // A streak celebration is a banner; the belt keeps running
        let round = RoundTracker::new(config.streak_goal, ms_to_ticks(config.celebration_ms))
            .gating(false);

        Self {
            config,
            viewport,
            rng,
            shapes: EntitySet::new(),
            bins,
            bag: Vec::new(),
            spawner,
            round,
            session: Session::default(),
            pop_ticks: ms_to_ticks(POP_DURATION_MS),
        }
    }

    pub fn shapes(&self) -> &EntitySet<Shape> {
        &self.shapes
    }

    /// Bin centers, in `Shape::ALL` order
    pub fn bin_centers(&self) -> Vec<Vec2> {
        self.bins.iter().map(|b| b.center).collect()
    }

    /// Index of the bin a point falls on
    pub fn bin_at(&self, point: Vec2) -> Option<usize> {
        let half = self.config.bin_size / 2.0 + HIT_SLOP;
        self.bins.iter().position(|bin| {
            (point.x - bin.center.x).abs() <= half && (point.y - bin.center.y).abs() <= half
        })
    }

    /// Last bin whose catch zone currently holds a live shape
    pub fn active_bin(&self) -> Option<usize> {
        self.bins.iter().rposition(|bin| {
            self.shapes
                .live()
                .any(|s| (s.pos.x - bin.center.x).abs() < self.config.catch_zone)
        })
    }

    /// Next shape from the bag, refilling it with a shuffled set when empty
    fn draw_shape(&mut self) -> Shape {
        if self.bag.is_empty() {
            self.bag = Shape::ALL
                .iter()
                .flat_map(|s| std::iter::repeat_n(*s, self.config.shapes_per_bag.max(1)))
                .collect();
            self.rng.shuffle(&mut self.bag);
        }
        self.bag.pop().unwrap_or(Shape::Circle)
    }

    fn spawn_shape(&mut self) -> EntityId {
        let shape = self.draw_shape();
        let size = self.config.shape_size;
        let motion = Motion::new(
            Axis::Horizontal,
            -size / 2.0,
            self.viewport.width + size * 1.5,
            ms_to_ticks(self.config.conveyor_ms),
        )
        .with_easing(Easing::Linear);
        let id = self
            .shapes
            .spawn_moving(shape, Vec2::new(0.0, self.config.conveyor_y), size, motion);
        log::trace!("{} {} on the belt", shape.label(), id);
        id
    }

    fn flash(&mut self, bin: usize, flash: BinFlash) {
        let ticks = ms_to_ticks(self.config.flash_ms);
        if let Some(bin) = self.bins.get_mut(bin) {
            bin.flash = Some((flash, ticks));
        }
    }

    fn miss(&mut self) {
        self.session.break_streak();
        self.round.reset_progress();
    }

    fn tap_bin(&mut self, index: usize, feedback: &mut Vec<Feedback>) {
        let Some(bin) = self.bins.get(index).copied() else {
            return;
        };
        let Some(id) = zone_pick(
            self.shapes.iter(),
            bin.center.x,
            Axis::Horizontal,
            self.config.catch_zone,
            self.config.tie_break,
        ) else {
            return;
        };
        let Some(shape) = self.shapes.get(id).map(|s| s.payload) else {
            return;
        };

        match Verdict::of(shape == bin.shape) {
            Verdict::Correct => {
                if self.shapes.resolve(id, Some(self.pop_ticks)).is_none() {
                    return;
                }
                feedback.push(Feedback::Sound(Sound::Pop));
                feedback.push(Feedback::Haptic(Haptic::Medium));
                self.session.reward();
                self.flash(index, BinFlash::Caught);

                if self.round.record(1) == Progress::Completed {
                    feedback.push(Feedback::Sound(Sound::Celebration));
                    feedback.push(Feedback::Haptic(Haptic::Success));
                    log::info!("⭐ {} in a row!", self.session.streak);
                }
            }
            Verdict::Incorrect => {
                feedback.push(Feedback::Haptic(Haptic::Warning));
                self.flash(index, BinFlash::Missed);
                self.miss();
            }
        }
    }

    fn tick(&mut self) {
        let removed = self.shapes.advance();
        for id in &removed.expired {
            log::debug!("Shape {} fell off the belt", id);
            self.miss();
        }

        self.round.tick();
        for bin in &mut self.bins {
            if let Some((flash, ticks)) = bin.flash {
                bin.flash = (ticks > 1).then_some((flash, ticks.saturating_sub(1)));
            }
        }

        let due = self
            .spawner
            .tick(self.shapes.len(), self.round.input_gated());
        for _ in 0..due {
            self.spawn_shape();
        }
    }
}

impl<D: Dice> MiniGame for ShapeSorter<D> {
    fn kind(&self) -> GameKind {
        GameKind::ShapeSorter
    }

    fn apply(&mut self, event: GameEvent, feedback: &mut Vec<Feedback>) {
        match event {
            GameEvent::Tick => self.tick(),
            GameEvent::Touch(_) if self.round.input_gated() => {}
            GameEvent::Touch(Touch::Zone(index)) => self.tap_bin(index, feedback),
            GameEvent::Touch(Touch::Point(point)) => {
                if let Some(index) = self.bin_at(point) {
                    self.tap_bin(index, feedback);
                }
            }
            // Shapes themselves are not touch targets
            GameEvent::Touch(Touch::Entity(_)) => {}
        }
    }

    fn snapshot(&self) -> Snapshot {
        let entities = self
            .shapes
            .iter()
            .map(|s| EntityView {
                id: s.id,
                pos: s.pos,
                size: s.size,
                attr: Attr::Shape { shape: s.payload },
                lifecycle: s.phase,
                fade: s.fade(self.pop_ticks),
            })
            .collect();

        let active = self.active_bin();
        let bins = self
            .bins
            .iter()
            .enumerate()
            .map(|(index, bin)| BinView {
                index,
                shape: bin.shape,
                pos: bin.center,
                size: self.config.bin_size,
                catch_zone: self.config.catch_zone,
                active: active == Some(index),
                flash: bin.flash.map(|(flash, _)| flash),
            })
            .collect();

        let overlay = match self.round.phase {
            RoundPhase::Complete { .. } => Some(Overlay::Celebration {
                count: self.session.streak,
            }),
            _ => None,
        };

        Snapshot {
            game: GameKind::ShapeSorter,
            entities,
            target: Target::Streak {
                goal: self.round.target,
            },
            progress: self.round.progress,
            score: self.session.score,
            streak: self.session.streak,
            phase: self.round.phase,
            overlay,
            hud: Hud::ShapeSorter { bins },
        }
    }
}
