//! Demo bot
//!
//! Plays any game from its snapshot alone, the way a renderer-side client
//! would. Drives the native demo and the integration scenarios.

use crate::sim::{Attr, Hud, Snapshot, Target, Touch};

/// Pick a good touch for the current frame, if any
pub fn choose(snapshot: &Snapshot) -> Option<Touch> {
    // Color and number overlays drop touches; the other two are banners
    let gated = snapshot.overlay.is_some()
        && matches!(snapshot.target, Target::Color { .. } | Target::Sum { .. });
    if gated {
        return None;
    }

    match (&snapshot.target, &snapshot.hud) {
        (Target::Pops { .. }, _) => snapshot
            .live()
            .min_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            .map(|e| Touch::Entity(e.id)),
        (Target::Color { color, .. }, _) => snapshot
            .live()
            .find(|e| matches!(e.attr, Attr::Card { color: c, .. } if c == *color))
            .map(|e| Touch::Entity(e.id)),
        (Target::Sum { goal }, _) => {
            let remaining = goal.saturating_sub(snapshot.progress);
            snapshot
                .live()
                .filter_map(|e| match e.attr {
                    Attr::Number { value, .. } if u32::from(value) <= remaining => {
                        Some((value, e.id))
                    }
                    _ => None,
                })
                .max_by_key(|(value, id)| (*value, std::cmp::Reverse(*id)))
                .map(|(_, id)| Touch::Entity(id))
        }
        (Target::Streak { .. }, Hud::ShapeSorter { bins }) => bins.iter().find_map(|bin| {
            let first = snapshot
                .live()
                .find(|e| (e.pos.x - bin.pos.x).abs() < bin.catch_zone)?;
            matches!(first.attr, Attr::Shape { shape } if shape == bin.shape)
                .then_some(Touch::Zone(bin.index))
        }),
        _ => None,
    }
}

/// Bot with a toddler-paced reaction delay
#[derive(Debug, Clone)]
pub struct Autoplay {
    /// Frames to wait after each touch
    pub reaction_frames: u32,
    wait: u32,
}

impl Autoplay {
    pub fn new(reaction_frames: u32) -> Self {
        Self {
            reaction_frames,
            wait: 0,
        }
    }

    pub fn next(&mut self, snapshot: &Snapshot) -> Option<Touch> {
        if self.wait > 0 {
            self.wait -= 1;
            return None;
        }
        let touch = choose(snapshot)?;
        self.wait = self.reaction_frames;
        Some(touch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::{ColorMatch, NumberCatch, ShapeSorter};
    use crate::settings::Settings;
    use crate::sim::{Feedback, GameEvent, GameLoop, Haptic, MiniGame, Overlay, Sound};

    #[test]
    fn test_color_match_bot_clears_round() {
        let mut game_loop = GameLoop::new(ColorMatch::with_seed(&Settings::default(), 1));
        let target = match game_loop.game().snapshot().target {
            Target::Color { count, .. } => count,
            _ => 0,
        };
        let mut celebrated = false;
        for _ in 0..target {
            let touch = choose(&game_loop.game().snapshot());
            assert!(touch.is_some());
            if let Some(touch) = touch {
                game_loop.touch(touch);
            }
            celebrated |= game_loop.step().contains(&Feedback::Sound(Sound::Celebration));
        }
        assert!(celebrated);
        // Overlay gates input, so the bot waits
        assert_eq!(choose(&game_loop.game().snapshot()), None);
    }

    #[test]
    fn test_number_bot_never_overshoots() {
        let mut game_loop = GameLoop::new(NumberCatch::with_seed(&Settings::default(), 3));
        let mut bot = Autoplay::new(10);
        for _ in 0..3000 {
            if let Some(touch) = bot.next(&game_loop.game().snapshot()) {
                game_loop.touch(touch);
            }
            game_loop.step();
            assert!(game_loop.game().snapshot().overlay != Some(Overlay::Oops));
        }
        assert!(game_loop.game().snapshot().score > 0);
    }

    #[test]
    fn test_shape_bot_sorts() {
        let mut game = ShapeSorter::with_seed(&Settings::default(), 5);
        let mut feedback = Vec::new();
        for _ in 0..1200 {
            if let Some(touch) = choose(&game.snapshot()) {
                game.apply(GameEvent::Touch(touch), &mut feedback);
            }
            game.apply(GameEvent::Tick, &mut feedback);
        }
        let snapshot = game.snapshot();
        assert!(snapshot.score > 0);
        assert!(!feedback.contains(&Feedback::Haptic(Haptic::Warning)));
    }
}
