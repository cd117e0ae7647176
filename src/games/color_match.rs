//! Color Match
//!
//! A 3x3 grid of colored cards. The round names a color; the child finds
//! every card of that color. Found cards stay on the grid with a check mark.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::HIT_SLOP;
use crate::settings::Settings;
use crate::sim::{
    Attr, Color, Dice, EntityId, EntitySet, EntityView, Feedback, GameEvent, GameKind, GameRng,
    Haptic, Hud, MATCH_COLORS, MiniGame, OBJECTS, Outline, Overlay, OverlayEnd, Progress,
    RoundPhase, RoundTracker, Session, Snapshot, Sound, Target, Touch, Verdict, hit_test,
    seeded_rng,
};
use crate::{Viewport, ms_to_ticks};

/// Color Match tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorMatchConfig {
    /// Cards per row and column
    pub grid_size: u32,
    pub min_matches: u32,
    pub max_matches: u32,
    pub celebration_ms: u32,
    /// Pause after the celebration before the next grid
    pub next_round_delay_ms: u32,
    pub wrong_pulse_ms: u32,
    /// Horizontal margin around the grid
    pub grid_margin: f32,
    pub grid_gap: f32,
    /// Y of the top card row's top edge
    pub grid_top: f32,
}

impl Default for ColorMatchConfig {
    fn default() -> Self {
        Self {
            grid_size: 3,
            min_matches: 2,
            max_matches: 3,
            celebration_ms: 1800,
            next_round_delay_ms: 300,
            wrong_pulse_ms: 300,
            grid_margin: 40.0,
            grid_gap: 10.0,
            grid_top: 260.0,
        }
    }
}

/// A grid card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Card {
    pub color: Color,
    pub object: &'static str,
    pub is_target: bool,
}

/// Color Match game state
pub struct ColorMatch<D = GameRng> {
    config: ColorMatchConfig,
    viewport: Viewport,
    rng: D,
    cards: EntitySet<Card>,
    target_color: Color,
    round: RoundTracker,
    session: Session,
    wrong_pulse_ticks: u32,
}

impl ColorMatch<GameRng> {
    pub fn with_seed(settings: &Settings, seed: u64) -> Self {
        Self::new(settings.color_match.clone(), settings.viewport, seeded_rng(seed))
    }
}

impl<D: Dice> ColorMatch<D> {
    pub fn new(config: ColorMatchConfig, viewport: Viewport, rng: D) -> Self {
        let overlay_ticks = ms_to_ticks(config.celebration_ms + config.next_round_delay_ms);
        let mut game = Self {
            config,
            viewport,
            rng,
            cards: EntitySet::new(),
            target_color: Color::Red,
            round: RoundTracker::new(1, overlay_ticks),
            session: Session::default(),
            wrong_pulse_ticks: 0,
        };
        game.generate_round();
        game
    }

    pub fn target_color(&self) -> Color {
        self.target_color
    }

    pub fn cards(&self) -> &EntitySet<Card> {
        &self.cards
    }

    /// Side length of one card
    pub fn card_size(&self) -> f32 {
        let n = self.config.grid_size.max(1) as f32;
        ((self.viewport.width - self.config.grid_margin * 2.0 - self.config.grid_gap * (n - 1.0))
            / n)
            .max(1.0)
    }

    /// Deal a fresh grid with 2-3 cards of a new target color
    fn generate_round(&mut self) {
        let cells = (self.config.grid_size * self.config.grid_size) as usize;
        let target = self.rng.pick(&MATCH_COLORS);
        let spread = self.config.max_matches.saturating_sub(self.config.min_matches) + 1;
        let match_count = (self.config.min_matches + self.rng.roll(spread)).min(cells as u32);

        let others: Vec<Color> = MATCH_COLORS
            .iter()
            .copied()
            .filter(|c| *c != target)
            .collect();

        let mut deck: Vec<Card> = (0..cells)
            .map(|i| {
                let is_target = (i as u32) < match_count;
                let color = if is_target {
                    target
                } else {
                    self.rng.pick(&others)
                };
                Card {
                    color,
                    object: self.rng.pick(&OBJECTS),
                    is_target,
                }
            })
            .collect();
        self.rng.shuffle(&mut deck);

        let n = self.config.grid_size.max(1) as usize;
        let size = self.card_size();
        let pitch = size + self.config.grid_gap;
        let left = (self.viewport.width - pitch * n as f32 + self.config.grid_gap) / 2.0;

        self.cards.clear();
        for (i, card) in deck.into_iter().enumerate() {
            let (row, col) = (i / n, i % n);
            let pos = Vec2::new(
                left + col as f32 * pitch + size / 2.0,
                self.config.grid_top + row as f32 * pitch + size / 2.0,
            );
            self.cards.spawn(card, pos, size);
        }

        self.target_color = target;
        self.round.start_round(match_count);
        log::debug!("Find {} x{}", target.name(), match_count);
    }

    fn choose(&mut self, id: EntityId, feedback: &mut Vec<Feedback>) {
        let Some(card) = self.cards.get(id).filter(|c| c.is_live()).map(|c| c.payload) else {
            return;
        };

        match Verdict::of(card.is_target) {
            Verdict::Correct => {
                if self.cards.resolve(id, None).is_none() {
                    return;
                }
                feedback.push(Feedback::Sound(Sound::Pop));
                feedback.push(Feedback::Haptic(Haptic::Medium));
                self.session.reward();

                if self.round.record(1) == Progress::Completed {
                    feedback.push(Feedback::Sound(Sound::Celebration));
                    feedback.push(Feedback::Haptic(Haptic::Success));
                }
            }
            Verdict::Incorrect => {
                feedback.push(Feedback::Haptic(Haptic::Warning));
                self.session.break_streak();
                self.wrong_pulse_ticks = ms_to_ticks(self.config.wrong_pulse_ms);
            }
        }
    }

    fn tick(&mut self) {
        self.cards.advance();
        self.wrong_pulse_ticks = self.wrong_pulse_ticks.saturating_sub(1);

        if self.round.tick() == Some(OverlayEnd::Complete) {
            self.generate_round();
        }
    }
}

impl<D: Dice> MiniGame for ColorMatch<D> {
    fn kind(&self) -> GameKind {
        GameKind::ColorMatch
    }

    fn apply(&mut self, event: GameEvent, feedback: &mut Vec<Feedback>) {
        match event {
            GameEvent::Tick => self.tick(),
            GameEvent::Touch(_) if self.round.input_gated() => {}
            GameEvent::Touch(Touch::Entity(id)) => self.choose(id, feedback),
            GameEvent::Touch(Touch::Point(point)) => {
                if let Some(id) =
                    hit_test(self.cards.iter(), point, HIT_SLOP, Outline::Square)
                {
                    self.choose(id, feedback);
                }
            }
            GameEvent::Touch(Touch::Zone(_)) => {}
        }
    }

    fn snapshot(&self) -> Snapshot {
        let entities = self
            .cards
            .iter()
            .map(|c| EntityView {
                id: c.id,
                pos: c.pos,
                size: c.size,
                attr: Attr::Card {
                    color: c.payload.color,
                    object: c.payload.object,
                },
                lifecycle: c.phase,
                fade: if c.is_live() { 1.0 } else { 0.5 },
            })
            .collect();

        let overlay = match self.round.phase {
            RoundPhase::Complete { .. } => Some(Overlay::Celebration {
                count: self.round.target,
            }),
            _ => None,
        };

        Snapshot {
            game: GameKind::ColorMatch,
            entities,
            target: Target::Color {
                color: self.target_color,
                count: self.round.target,
            },
            progress: self.round.progress,
            score: self.session.score,
            streak: self.session.streak,
            phase: self.round.phase,
            overlay,
            hud: Hud::ColorMatch {
                wrong_pulse: self.wrong_pulse_ticks > 0,
            },
        }
    }
}
