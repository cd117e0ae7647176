//! Toddles entry point
//!
//! The web build is driven from JS through `toddles::web`. Natively this runs
//! a headless autoplay demo: `toddles [game|all] [seconds] [seed]`.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use toddles::autoplay::Autoplay;
    use toddles::consts::SIM_DT;
    use toddles::feedback::LogSink;
    use toddles::sim::GameKind;
    use toddles::{App, Settings};

    env_logger::init();
    log::info!("Toddles (native) starting...");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let games: Vec<GameKind> = match args.first().map(String::as_str) {
        None | Some("all") => GameKind::ALL.to_vec(),
        Some(name) => match name.parse::<GameKind>() {
            Ok(kind) => vec![kind],
            Err(e) => {
                eprintln!("{e} (try bubbles, colors, numbers, shapes, all)");
                std::process::exit(2);
            }
        },
    };
    let seconds: f32 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(30.0);
    let seed: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(42);

    let mut app = App::new(Settings::load(), seed);
    let mut sink = LogSink;
    let frames = (seconds / SIM_DT).round() as u32;

    println!("\n=== Toddles autoplay: {seconds}s per game, seed {seed} ===");
    for kind in games {
        app.open(kind);
        let mut bot = Autoplay::new(20);
        let mut last = None;
        for _ in 0..frames {
            let Some(snapshot) = app.frame(SIM_DT, &mut sink) else {
                break;
            };
            if let Some(touch) = bot.next(&snapshot) {
                app.touch(touch);
            }
            last = Some(snapshot);
        }

        if let Some(snapshot) = last {
            println!(
                "{:<13} score {:>4}  streak {:>3}  on screen {:>2}  phase {:?}",
                kind.as_str(),
                snapshot.score,
                snapshot.streak,
                snapshot.entities.len(),
                snapshot.phase,
            );
        }
        app.back();
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is toddles::web::start, this is just to satisfy the compiler
}
