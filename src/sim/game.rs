//! Mini-game reducer contract and fixed-timestep driver

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::event::{EventQueue, Feedback, GameEvent, Touch};
use super::snapshot::Snapshot;
use crate::consts::{MAX_SUBSTEPS, SIM_DT};

/// The four games
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameKind {
    BubblePop,
    ColorMatch,
    NumberCatch,
    ShapeSorter,
}

impl GameKind {
    pub const ALL: [GameKind; 4] = [
        GameKind::BubblePop,
        GameKind::ColorMatch,
        GameKind::NumberCatch,
        GameKind::ShapeSorter,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GameKind::BubblePop => "bubble_pop",
            GameKind::ColorMatch => "color_match",
            GameKind::NumberCatch => "number_catch",
            GameKind::ShapeSorter => "shape_sorter",
        }
    }
}

/// Game name that matches none of the four games
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown game '{0}'")]
pub struct UnknownGame(pub String);

impl FromStr for GameKind {
    type Err = UnknownGame;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "bubble_pop" | "bubbles" => Ok(GameKind::BubblePop),
            "color_match" | "colors" => Ok(GameKind::ColorMatch),
            "number_catch" | "numbers" => Ok(GameKind::NumberCatch),
            "shape_sorter" | "shapes" => Ok(GameKind::ShapeSorter),
            _ => Err(UnknownGame(s.to_string())),
        }
    }
}

/// A mini-game as a pure reducer over queued events
pub trait MiniGame {
    fn kind(&self) -> GameKind;

    /// Apply one event, appending any feedback it causes
    fn apply(&mut self, event: GameEvent, feedback: &mut Vec<Feedback>);

    /// Read-only view of the current state
    fn snapshot(&self) -> Snapshot;
}

impl<G: MiniGame + ?Sized> MiniGame for Box<G> {
    fn kind(&self) -> GameKind {
        (**self).kind()
    }

    fn apply(&mut self, event: GameEvent, feedback: &mut Vec<Feedback>) {
        (**self).apply(event, feedback)
    }

    fn snapshot(&self) -> Snapshot {
        (**self).snapshot()
    }
}

/// Output of one rendered frame
#[derive(Debug, Clone)]
pub struct Frame {
    pub snapshot: Snapshot,
    pub feedback: Vec<Feedback>,
    /// Simulation ticks run this frame
    pub ticks: u32,
}

/// Owns a game, its event queue and the frame-time accumulator
pub struct GameLoop<G> {
    game: G,
    queue: EventQueue,
    accumulator: f32,
    time_ticks: u64,
}

impl<G: MiniGame> GameLoop<G> {
    pub fn new(game: G) -> Self {
        Self {
            game,
            queue: EventQueue::new(),
            accumulator: 0.0,
            time_ticks: 0,
        }
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    /// Simulation ticks run so far
    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    /// Queue a touch for the next drain
    pub fn touch(&mut self, touch: Touch) {
        self.queue.push(GameEvent::Touch(touch));
    }

    /// Drain queued touches, then run one tick
    pub fn step(&mut self) -> Vec<Feedback> {
        let mut feedback = Vec::new();
        self.queue.push(GameEvent::Tick);
        self.drain(&mut feedback);
        feedback
    }

    /// Advance by wall-clock `dt` seconds using fixed substeps
    pub fn frame(&mut self, dt: f32) -> Frame {
        let dt = if dt.is_finite() {
            dt.clamp(0.0, 0.25)
        } else {
            0.0
        };
        self.accumulator += dt;

        let mut ticks = 0;
        while self.accumulator >= SIM_DT && ticks < MAX_SUBSTEPS {
            self.queue.push(GameEvent::Tick);
            self.accumulator -= SIM_DT;
            ticks += 1;
        }
        if ticks == MAX_SUBSTEPS {
            // Drop the backlog rather than spiral
            self.accumulator = self.accumulator.min(SIM_DT);
        }

        let mut feedback = Vec::new();
        self.drain(&mut feedback);
        Frame {
            snapshot: self.game.snapshot(),
            feedback,
            ticks,
        }
    }

    fn drain(&mut self, feedback: &mut Vec<Feedback>) {
        while let Some(event) = self.queue.pop() {
            if event == GameEvent::Tick {
                self.time_ticks += 1;
            }
            self.game.apply(event, feedback);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::BubblePop;
    use crate::settings::Settings;

    #[test]
    fn test_game_kind_round_trip_names() {
        for kind in GameKind::ALL {
            assert_eq!(kind.as_str().parse::<GameKind>(), Ok(kind));
        }
        assert_eq!("Shape-Sorter".parse::<GameKind>(), Ok(GameKind::ShapeSorter));
        let err = "chess".parse::<GameKind>().unwrap_err();
        assert_eq!(err.to_string(), "unknown game 'chess'");
    }

    #[test]
    fn test_frame_substeps() {
        let settings = Settings::default();
        let mut game_loop = GameLoop::new(BubblePop::with_seed(&settings, 1));

        let frame = game_loop.frame(SIM_DT * 3.5);
        assert_eq!(frame.ticks, 3);
        let frame = game_loop.frame(SIM_DT * 0.75);
        assert_eq!(frame.ticks, 1);

        // Long stalls are capped
        let frame = game_loop.frame(1.0);
        assert_eq!(frame.ticks, MAX_SUBSTEPS);
        assert_eq!(game_loop.time_ticks(), 4 + MAX_SUBSTEPS as u64);
    }

    #[test]
    fn test_bad_frame_time_is_ignored() {
        let settings = Settings::default();
        let mut game_loop = GameLoop::new(BubblePop::with_seed(&settings, 1));

        for dt in [f32::NAN, f32::INFINITY, -1.0] {
            assert_eq!(game_loop.frame(dt).ticks, 0);
        }
        assert_eq!(game_loop.frame(SIM_DT * 1.5).ticks, 1);
        assert_eq!(game_loop.time_ticks(), 1);
    }

    #[test]
    fn test_boxed_game() {
        let settings = Settings::default();
        let boxed: Box<dyn MiniGame> = Box::new(BubblePop::with_seed(&settings, 1));
        let mut game_loop = GameLoop::new(boxed);
        game_loop.step();
        assert_eq!(game_loop.game().kind(), GameKind::BubblePop);
    }
}
