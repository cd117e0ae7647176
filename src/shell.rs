//! App shell: home menu and screen navigation
//!
//! Opening a game builds a fresh instance; going back drops it along with its
//! session, so every visit starts from zero.

use serde::Serialize;

use crate::feedback::{FeedbackSink, dispatch};
use crate::games::{BubblePop, ColorMatch, NumberCatch, ShapeSorter};
use crate::settings::Settings;
use crate::sim::{Color, GameKind, GameLoop, MiniGame, Snapshot, Touch};

/// Current screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "screen", content = "game")]
pub enum Screen {
    Home,
    Game(GameKind),
}

/// A home menu card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameCard {
    pub game: GameKind,
    pub icon: &'static str,
    pub label: &'static str,
    pub color: Color,
}

/// Home menu, in display order
pub const HOME_CARDS: [GameCard; 4] = [
    GameCard {
        game: GameKind::BubblePop,
        icon: "🫧",
        label: "Bubbles",
        color: Color::Blue,
    },
    GameCard {
        game: GameKind::ShapeSorter,
        icon: "🔷",
        label: "Shapes",
        color: Color::Purple,
    },
    GameCard {
        game: GameKind::ColorMatch,
        icon: "🎨",
        label: "Colors",
        color: Color::Orange,
    },
    GameCard {
        game: GameKind::NumberCatch,
        icon: "🔢",
        label: "Numbers",
        color: Color::Green,
    },
];

/// Build a game instance
pub fn build_game(kind: GameKind, settings: &Settings, seed: u64) -> Box<dyn MiniGame> {
    match kind {
        GameKind::BubblePop => Box::new(BubblePop::with_seed(settings, seed)),
        GameKind::ColorMatch => Box::new(ColorMatch::with_seed(settings, seed)),
        GameKind::NumberCatch => Box::new(NumberCatch::with_seed(settings, seed)),
        GameKind::ShapeSorter => Box::new(ShapeSorter::with_seed(settings, seed)),
    }
}

/// Top-level application state
pub struct App {
    settings: Settings,
    screen: Screen,
    active: Option<GameLoop<Box<dyn MiniGame>>>,
    seed: u64,
    /// Games opened so far; varies the seed per visit
    launches: u64,
}

impl App {
    pub fn new(settings: Settings, seed: u64) -> Self {
        Self {
            settings,
            screen: Screen::Home,
            active: None,
            seed,
            launches: 0,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replace settings; takes effect for the next game opened
    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn game_loop(&self) -> Option<&GameLoop<Box<dyn MiniGame>>> {
        self.active.as_ref()
    }

    /// Navigate from home into a game
    pub fn open(&mut self, kind: GameKind) {
        let seed = self
            .seed
            .wrapping_add(self.launches.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        self.launches += 1;
        self.active = Some(GameLoop::new(build_game(kind, &self.settings, seed)));
        self.screen = Screen::Game(kind);
        log::info!("Opened {} (seed {})", kind.as_str(), seed);
    }

    /// Navigate back home, dropping the running game
    pub fn back(&mut self) {
        if let Some(game_loop) = self.active.take() {
            log::info!(
                "Left {} after {} ticks",
                game_loop.game().kind().as_str(),
                game_loop.time_ticks()
            );
        }
        self.screen = Screen::Home;
    }

    /// Queue a touch for the running game. Returns false on the home screen
    /// or for a point outside the viewport.
    pub fn touch(&mut self, touch: Touch) -> bool {
        if let Touch::Point(point) = touch {
            if !self.settings.viewport.contains(point) {
                return false;
            }
        }
        match &mut self.active {
            Some(game_loop) => {
                game_loop.touch(touch);
                true
            }
            None => false,
        }
    }

    /// Advance the running game and play its feedback
    pub fn frame(&mut self, dt: f32, sink: &mut dyn FeedbackSink) -> Option<Snapshot> {
        let game_loop = self.active.as_mut()?;
        let frame = game_loop.frame(dt);
        dispatch(sink, &self.settings, &frame.feedback);
        Some(frame.snapshot)
    }

    /// Current view of the running game
    pub fn snapshot(&self) -> Option<Snapshot> {
        self.active.as_ref().map(|g| g.game().snapshot())
    }
}
