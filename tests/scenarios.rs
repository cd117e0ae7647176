//! End-to-end play scenarios through the public API

use toddles::autoplay::{Autoplay, choose};
use toddles::consts::SIM_DT;
use toddles::feedback::RecordingSink;
use toddles::games::{NumberCatch, NumberCatchConfig, ShapeSorter};
use toddles::sim::{
    Attr, Feedback, GameKind, GameLoop, Haptic, Hud, MiniGame, Overlay, RoundPhase, ScriptedDice,
    Snapshot, Sound, Touch,
};
use toddles::{App, Settings, Viewport, ms_to_ticks};

fn run_until<G: MiniGame>(game_loop: &mut GameLoop<G>, done: impl Fn(&Snapshot) -> bool) {
    for _ in 0..10_000 {
        if done(&game_loop.game().snapshot()) {
            return;
        }
        game_loop.step();
    }
    panic!("condition never reached");
}

fn live_numbers(snapshot: &Snapshot) -> Vec<(u32, u8)> {
    snapshot
        .live()
        .filter_map(|e| match e.attr {
            Attr::Number { value, .. } => Some((e.id, value)),
            _ => None,
        })
        .collect()
}

/// Scripted number game: first draw picks the target, then
/// (value, x, color) per spawned number
fn scripted_numbers(script: &[f32]) -> GameLoop<NumberCatch<ScriptedDice>> {
    let game = NumberCatch::new(
        NumberCatchConfig::default(),
        Viewport::default(),
        ScriptedDice::new(script.to_vec()),
    );
    GameLoop::new(game)
}

#[test]
fn number_catch_exact_sum_completes() {
    // Target 3 + roll(4)=2 -> 5; values 2, 2, 1
    let mut game_loop = scripted_numbers(&[0.6, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.1, 0.5, 0.5]);
    assert_eq!(game_loop.game().target(), 5);
    run_until(&mut game_loop, |s| live_numbers(s).len() == 3);

    let numbers = live_numbers(&game_loop.game().snapshot());
    assert_eq!(numbers.iter().map(|n| n.1).collect::<Vec<_>>(), vec![2, 2, 1]);

    let mut feedback = Vec::new();
    for (id, _) in &numbers {
        game_loop.touch(Touch::Entity(*id));
        feedback.extend(game_loop.step());
    }
    let celebrations = feedback
        .iter()
        .filter(|f| **f == Feedback::Sound(Sound::Celebration))
        .count();
    assert_eq!(celebrations, 1);

    let snapshot = game_loop.game().snapshot();
    assert_eq!(snapshot.score, 1);
    assert_eq!(snapshot.progress, 5);
    assert_eq!(snapshot.overlay, Some(Overlay::Celebration { count: 5 }));

    run_until(&mut game_loop, |s| s.overlay.is_none());
    let snapshot = game_loop.game().snapshot();
    assert_eq!(snapshot.progress, 0);
    assert_eq!(snapshot.score, 1);
    assert!((3..=6).contains(&game_loop.game().target()));
}

#[test]
fn number_catch_overflow_resets_without_score() {
    // Target 3 + roll(4)=1 -> 4; values 3, 3
    let mut game_loop = scripted_numbers(&[0.3, 0.9, 0.5, 0.5, 0.9, 0.5, 0.5]);
    assert_eq!(game_loop.game().target(), 4);
    run_until(&mut game_loop, |s| live_numbers(s).len() == 2);

    let mut feedback = Vec::new();
    for (id, value) in live_numbers(&game_loop.game().snapshot()) {
        assert_eq!(value, 3);
        game_loop.touch(Touch::Entity(id));
        feedback.extend(game_loop.step());
    }
    assert!(feedback.contains(&Feedback::Haptic(Haptic::Warning)));
    assert!(!feedback.contains(&Feedback::Sound(Sound::Celebration)));

    let snapshot = game_loop.game().snapshot();
    assert_eq!(snapshot.overlay, Some(Overlay::Oops));
    assert!(matches!(snapshot.phase, RoundPhase::Overflow { .. }));

    // Input is gated while the oops shows
    for _ in 0..ms_to_ticks(1000) {
        game_loop.step();
    }
    assert!(live_numbers(&game_loop.game().snapshot()).is_empty());

    run_until(&mut game_loop, |s| s.overlay.is_none());
    let snapshot = game_loop.game().snapshot();
    assert_eq!(snapshot.progress, 0);
    assert_eq!(snapshot.score, 0);
    assert_eq!(game_loop.game().target(), 4);
}

/// Bin whose first in-zone shape does not belong there
fn wrong_bin(snapshot: &Snapshot) -> Option<usize> {
    let Hud::ShapeSorter { bins } = &snapshot.hud else {
        return None;
    };
    bins.iter().find_map(|bin| {
        let first = snapshot
            .live()
            .find(|e| (e.pos.x - bin.pos.x).abs() < bin.catch_zone)?;
        (!matches!(first.attr, Attr::Shape { shape } if shape == bin.shape)).then_some(bin.index)
    })
}

/// Sort `correct` shapes, optionally miss once, then sort `after` more
fn play_shapes(correct: u32, miss: bool, after: u32) -> (Vec<Feedback>, Snapshot) {
    let mut game_loop = GameLoop::new(ShapeSorter::with_seed(&Settings::default(), 11));
    let mut feedback = Vec::new();
    let mut plan: Vec<bool> = std::iter::repeat_n(true, correct as usize).collect();
    if miss {
        plan.push(false);
    }
    plan.extend(std::iter::repeat_n(true, after as usize));

    for want_correct in plan {
        loop {
            let snapshot = game_loop.game().snapshot();
            let touch = if want_correct {
                choose(&snapshot)
            } else {
                wrong_bin(&snapshot).map(Touch::Zone)
            };
            if let Some(touch) = touch {
                game_loop.touch(touch);
                feedback.extend(game_loop.step());
                break;
            }
            feedback.extend(game_loop.step());
        }
    }
    (feedback, game_loop.game().snapshot())
}

#[test]
fn shape_sorter_five_in_a_row_celebrates_once() {
    let (feedback, snapshot) = play_shapes(5, false, 0);
    let celebrations = feedback
        .iter()
        .filter(|f| **f == Feedback::Sound(Sound::Celebration))
        .count();
    assert_eq!(celebrations, 1);
    assert_eq!(snapshot.streak, 5);
    assert_eq!(snapshot.overlay, Some(Overlay::Celebration { count: 5 }));
}

#[test]
fn shape_sorter_miss_suppresses_celebration() {
    let (feedback, snapshot) = play_shapes(4, true, 1);
    assert!(!feedback.contains(&Feedback::Sound(Sound::Celebration)));
    assert!(feedback.contains(&Feedback::Haptic(Haptic::Warning)));
    assert_eq!(snapshot.streak, 1);
    assert_eq!(snapshot.score, 5);
    assert_eq!(snapshot.overlay, None);
}

#[test]
fn caps_hold_under_autoplay() {
    let settings = Settings::default();
    let caps = [
        (GameKind::BubblePop, settings.bubble_pop.max_bubbles),
        (GameKind::ColorMatch, 9),
        (GameKind::NumberCatch, settings.number_catch.max_numbers),
        (GameKind::ShapeSorter, settings.shape_sorter.max_shapes),
    ];

    for (kind, cap) in caps {
        for autoplay in [false, true] {
            let mut app = App::new(settings.clone(), 5);
            app.open(kind);
            let mut bot = Autoplay::new(30);
            let mut sink = RecordingSink::default();
            for _ in 0..3600 {
                let Some(snapshot) = app.frame(SIM_DT, &mut sink) else {
                    panic!("{} closed", kind.as_str());
                };
                assert!(snapshot.entities.len() <= cap, "{} over cap", kind.as_str());
                if autoplay {
                    if let Some(touch) = bot.next(&snapshot) {
                        app.touch(touch);
                    }
                }
            }
            if autoplay {
                assert!(sink.sounds.contains(&Sound::Pop), "{} never scored", kind.as_str());
            }
        }
    }
}

#[test]
fn same_seed_same_game() {
    let run = |seed: u64| {
        let mut app = App::new(Settings::default(), seed);
        let mut bot = Autoplay::new(12);
        let mut sink = RecordingSink::default();
        let mut snapshots = Vec::new();
        for kind in GameKind::ALL {
            app.open(kind);
            for _ in 0..900 {
                if let Some(snapshot) = app.frame(SIM_DT, &mut sink) {
                    if let Some(touch) = bot.next(&snapshot) {
                        app.touch(touch);
                    }
                    snapshots.push(snapshot);
                }
            }
            app.back();
        }
        (snapshots, sink.sounds, sink.haptics)
    };

    assert_eq!(run(99), run(99));
}

#[test]
fn snapshot_serializes_for_renderer() {
    let mut app = App::new(Settings::default(), 3);
    app.open(GameKind::ShapeSorter);
    let mut sink = RecordingSink::default();
    let mut snapshot = None;
    for _ in 0..60 {
        snapshot = app.frame(SIM_DT, &mut sink);
    }
    let json = serde_json::to_value(snapshot.expect("running game")).unwrap();
    assert_eq!(json["game"], "shape_sorter");
    assert_eq!(json["target"]["kind"], "streak");
    assert_eq!(json["hud"]["bins"].as_array().map(Vec::len), Some(3));
    assert_eq!(json["entities"][0]["attr"]["kind"], "shape");
}
