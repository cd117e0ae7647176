//! Number Catch
//!
//! Dotted numbers (1-3) fall toward a bear holding a basket. Tapping a number
//! drops its value in the basket. Filling the basket to exactly the target
//! wins the round; overshooting shows an "oops" and empties the basket.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{HIT_SLOP, POP_DURATION_MS};
use crate::settings::Settings;
use crate::sim::{
    Attr, Axis, BUBBLE_COLORS, Color, Dice, EntityId, EntitySet, EntityView, Feedback, GameEvent,
    GameKind, GameRng, Haptic, Hud, MiniGame, Mood, Motion, Outline, Overlay, OverlayEnd, Progress,
    RoundPhase, RoundTracker, Session, Snapshot, Sound, Spawner, Target, Touch, hit_test,
    seeded_rng,
};
use crate::{Viewport, ms_to_ticks};

/// Number Catch tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumberCatchConfig {
    pub number_size: f32,
    pub fall_duration_ms: u32,
    pub spawn_interval_ms: u32,
    pub max_numbers: usize,
    /// One-off spawns after the round (re)starts
    pub warmup_ms: Vec<u32>,
    pub max_value: u8,
    pub min_target: u32,
    pub max_target: u32,
    /// Distance of the basket line above the bottom edge
    pub basket_offset: f32,
    pub celebration_ms: u32,
    pub oops_ms: u32,
    /// Bear looks hopeful when this close to the target
    pub close_margin: u32,
}

impl Default for NumberCatchConfig {
    fn default() -> Self {
        Self {
            number_size: 90.0,
            fall_duration_ms: 6000,
            spawn_interval_ms: 1500,
            max_numbers: 6,
            warmup_ms: vec![500, 1200],
            max_value: 3,
            min_target: 3,
            max_target: 6,
            basket_offset: 320.0,
            celebration_ms: 2100,
            oops_ms: 1800,
            close_margin: 2,
        }
    }
}

/// A falling number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Number {
    pub value: u8,
    pub color: Color,
}

/// Number Catch game state
pub struct NumberCatch<D = GameRng> {
    config: NumberCatchConfig,
    viewport: Viewport,
    rng: D,
    numbers: EntitySet<Number>,
    spawner: Spawner,
    round: RoundTracker,
    session: Session,
    pop_ticks: u32,
}

impl NumberCatch<GameRng> {
    pub fn with_seed(settings: &Settings, seed: u64) -> Self {
        Self::new(settings.number_catch.clone(), settings.viewport, seeded_rng(seed))
    }
}

impl<D: Dice> NumberCatch<D> {
    pub fn new(config: NumberCatchConfig, viewport: Viewport, mut rng: D) -> Self {
        let target = Self::draw_target(&config, &mut rng);
        let round = RoundTracker::new(target, ms_to_ticks(config.celebration_ms))
            .with_overflow(ms_to_ticks(config.oops_ms));
        let spawner = Self::make_spawner(&config);

        Self {
            config,
            viewport,
            rng,
            numbers: EntitySet::new(),
            spawner,
            round,
            session: Session::default(),
            pop_ticks: ms_to_ticks(POP_DURATION_MS),
        }
    }

    pub fn numbers(&self) -> &EntitySet<Number> {
        &self.numbers
    }

    /// Sum currently in the basket
    pub fn basket(&self) -> u32 {
        self.round.progress
    }

    pub fn target(&self) -> u32 {
        self.round.target
    }

    /// Y the numbers fall to
    pub fn basket_y(&self) -> f32 {
        self.viewport.height - self.config.basket_offset
    }

    /// Bear expression for the current basket
    pub fn mood(&self) -> Mood {
        match self.round.phase {
            RoundPhase::Complete { .. } => Mood::Celebrate,
            RoundPhase::Overflow { .. } => Mood::Oops,
            _ if self.basket() > 0 && self.round.remaining() <= self.config.close_margin => {
                Mood::Close
            }
            _ => Mood::Normal,
        }
    }

    fn draw_target(config: &NumberCatchConfig, rng: &mut D) -> u32 {
        let spread = config.max_target.saturating_sub(config.min_target) + 1;
        config.min_target + rng.roll(spread)
    }

    fn make_spawner(config: &NumberCatchConfig) -> Spawner {
        Spawner::new(ms_to_ticks(config.spawn_interval_ms), config.max_numbers)
            .with_warmup(config.warmup_ms.iter().map(|ms| ms_to_ticks(*ms)))
    }

    fn spawn_number(&mut self) -> EntityId {
        let size = self.config.number_size;
        let value = self.rng.roll(u32::from(self.config.max_value.max(1))) as u8 + 1;
        let x = self.rng.unit() * (self.viewport.width - size - 40.0).max(0.0) + 20.0 + size / 2.0;
        let color = self.rng.pick(&BUBBLE_COLORS);

        let motion = Motion::new(
            Axis::Vertical,
            -size / 2.0,
            self.basket_y(),
            ms_to_ticks(self.config.fall_duration_ms),
        );
        let id = self
            .numbers
            .spawn_moving(Number { value, color }, Vec2::new(x, 0.0), size, motion);
        log::trace!("Number {} spawned (value {})", id, value);
        id
    }

    fn catch(&mut self, id: EntityId, feedback: &mut Vec<Feedback>) {
        let Some(number) = self.numbers.resolve(id, Some(self.pop_ticks)) else {
            return;
        };
        let value = u32::from(number.payload.value);

        feedback.push(Feedback::Sound(Sound::Pop));
        feedback.push(Feedback::Haptic(Haptic::Medium));

        match self.round.record(value) {
            Progress::Completed => {
                self.session.reward();
                feedback.push(Feedback::Sound(Sound::Celebration));
                feedback.push(Feedback::Haptic(Haptic::Success));
            }
            Progress::Overflowed => {
                self.session.break_streak();
                feedback.push(Feedback::Haptic(Haptic::Warning));
            }
            Progress::Advanced | Progress::Ignored => {}
        }
    }

    fn tick(&mut self) {
        let removed = self.numbers.advance();
        if !removed.expired.is_empty() {
            log::trace!("{} number(s) reached the basket line", removed.expired.len());
        }

        if let Some(ended) = self.round.tick() {
            self.numbers.clear();
            if ended == OverlayEnd::Complete {
                let target = Self::draw_target(&self.config, &mut self.rng);
                self.round.start_round(target);
            }
            self.spawner = Self::make_spawner(&self.config);
            log::debug!("Fill the basket to {}", self.round.target);
        }

        let due = self
            .spawner
            .tick(self.numbers.len(), self.round.input_gated());
        for _ in 0..due {
            self.spawn_number();
        }
    }
}

impl<D: Dice> MiniGame for NumberCatch<D> {
    fn kind(&self) -> GameKind {
        GameKind::NumberCatch
    }

    fn apply(&mut self, event: GameEvent, feedback: &mut Vec<Feedback>) {
        match event {
            GameEvent::Tick => self.tick(),
            GameEvent::Touch(_) if self.round.input_gated() => {}
            GameEvent::Touch(Touch::Entity(id)) => self.catch(id, feedback),
            GameEvent::Touch(Touch::Point(point)) => {
                if let Some(id) =
                    hit_test(self.numbers.iter(), point, HIT_SLOP, Outline::Circle)
                {
                    self.catch(id, feedback);
                }
            }
            GameEvent::Touch(Touch::Zone(_)) => {}
        }
    }

    fn snapshot(&self) -> Snapshot {
        let entities = self
            .numbers
            .iter()
            .map(|n| EntityView {
                id: n.id,
                pos: n.pos,
                size: n.size,
                attr: Attr::Number {
                    value: n.payload.value,
                    color: n.payload.color,
                },
                lifecycle: n.phase,
                fade: n.fade(self.pop_ticks),
            })
            .collect();

        let overlay = match self.round.phase {
            RoundPhase::Complete { .. } => Some(Overlay::Celebration {
                count: self.round.target,
            }),
            RoundPhase::Overflow { .. } => Some(Overlay::Oops),
            _ => None,
        };

        Snapshot {
            game: GameKind::NumberCatch,
            entities,
            target: Target::Sum {
                goal: self.round.target,
            },
            progress: self.round.progress,
            score: self.session.score,
            streak: self.session.streak,
            phase: self.round.phase,
            overlay,
            hud: Hud::NumberCatch { mood: self.mood() },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::ScriptedDice;
    use proptest::prelude::*;

    fn game(seed: u64) -> NumberCatch {
        NumberCatch::with_seed(&Settings::default(), seed)
    }

    fn spawn_value<D: Dice>(game: &mut NumberCatch<D>, value: u8) -> EntityId {
        let id = game.spawn_number();
        if let Some(number) = game.numbers.get_mut(id) {
            number.payload.value = value;
        }
        id
    }

    fn catch<D: Dice>(game: &mut NumberCatch<D>, id: EntityId) -> Vec<Feedback> {
        let mut feedback = Vec::new();
        game.apply(GameEvent::Touch(Touch::Entity(id)), &mut feedback);
        feedback
    }

    fn tick_ms<D: Dice>(game: &mut NumberCatch<D>, ms: u32) {
        for _ in 0..ms_to_ticks(ms) {
            game.apply(GameEvent::Tick, &mut Vec::new());
        }
    }

    #[test]
    fn test_scripted_target() {
        // roll(4) with 0.99 -> 3, so target 6
        let dice = ScriptedDice::new([0.99]);
        let game = NumberCatch::new(NumberCatchConfig::default(), Viewport::default(), dice);
        assert_eq!(game.target(), 6);
    }

    #[test]
    fn test_exact_target_celebrates() {
        let mut game = game(1);
        game.round.start_round(5);

        let a = spawn_value(&mut game, 3);
        let b = spawn_value(&mut game, 2);
        assert!(catch(&mut game, a).contains(&Feedback::Sound(Sound::Pop)));
        assert_eq!(game.basket(), 3);
        assert_eq!(game.mood(), Mood::Close);

        let feedback = catch(&mut game, b);
        assert!(feedback.contains(&Feedback::Sound(Sound::Celebration)));
        assert!(feedback.contains(&Feedback::Haptic(Haptic::Success)));
        assert_eq!(game.session.score, 1);
        assert_eq!(game.mood(), Mood::Celebrate);
        assert_eq!(game.snapshot().overlay, Some(Overlay::Celebration { count: 5 }));
    }

    #[test]
    fn test_overshoot_resets_basket() {
        let mut game = game(2);
        game.round.start_round(4);

        let a = spawn_value(&mut game, 3);
        let b = spawn_value(&mut game, 3);
        catch(&mut game, a);
        let feedback = catch(&mut game, b);
        assert!(feedback.contains(&Feedback::Haptic(Haptic::Warning)));
        assert!(!feedback.contains(&Feedback::Sound(Sound::Celebration)));
        assert_eq!(game.basket(), 6);
        assert_eq!(game.mood(), Mood::Oops);
        assert_eq!(game.snapshot().overlay, Some(Overlay::Oops));
        assert_eq!(game.session.score, 0);

        tick_ms(&mut game, 1800);
        assert_eq!(game.basket(), 0);
        assert_eq!(game.target(), 4);
        assert_eq!(game.mood(), Mood::Normal);
        assert!(game.numbers().is_empty());
    }

    #[test]
    fn test_completion_draws_new_target() {
        let mut game = game(3);
        game.round.start_round(3);
        let a = spawn_value(&mut game, 3);
        catch(&mut game, a);

        // Taps and spawns are blocked during the celebration
        let c = spawn_value(&mut game, 1);
        assert!(catch(&mut game, c).is_empty());
        tick_ms(&mut game, 1000);
        assert_eq!(game.numbers().live_count(), 1);

        tick_ms(&mut game, 1100);
        assert!((3..=6).contains(&game.target()));
        assert_eq!(game.basket(), 0);
        assert_eq!(game.round.phase, RoundPhase::AwaitingInput);
        assert!(game.numbers().is_empty());
    }

    #[test]
    fn test_close_mood() {
        let mut game = game(4);
        game.round.start_round(6);
        assert_eq!(game.mood(), Mood::Normal);
        let a = spawn_value(&mut game, 1);
        catch(&mut game, a);
        assert_eq!(game.mood(), Mood::Normal);
        let b = spawn_value(&mut game, 3);
        catch(&mut game, b);
        assert_eq!(game.mood(), Mood::Close);
    }

    #[test]
    fn test_numbers_fall_to_basket() {
        let mut game = game(5);
        let id = game.spawn_number();
        tick_ms(&mut game, 3000);
        let y = game.numbers().get(id).map(|n| n.pos.y).unwrap_or_default();
        assert!(y > 0.0 && y < game.basket_y());
        tick_ms(&mut game, 3000);
        assert!(game.numbers().get(id).is_none());
        assert_eq!(game.basket(), 0);
    }

    #[test]
    fn test_warmup_spawns() {
        let mut game = game(6);
        let first = ms_to_ticks(500);
        for _ in 1..first {
            game.apply(GameEvent::Tick, &mut Vec::new());
        }
        assert_eq!(game.numbers().len(), 0);
        game.apply(GameEvent::Tick, &mut Vec::new());
        assert_eq!(game.numbers().len(), 1);
        for _ in first..ms_to_ticks(1200) {
            game.apply(GameEvent::Tick, &mut Vec::new());
        }
        assert_eq!(game.numbers().len(), 2);
    }

    proptest! {
        #[test]
        fn prop_values_and_cap(seed in any::<u64>()) {
            let mut game = game(seed);
            for _ in 0..900 {
                game.apply(GameEvent::Tick, &mut Vec::new());
                prop_assert!(game.numbers().len() <= 6);
                for number in game.numbers().iter() {
                    prop_assert!((1..=3).contains(&number.payload.value));
                }
            }
            prop_assert!((3..=6).contains(&game.target()));
        }
    }
}
