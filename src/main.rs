//! Tap The Dot entry point
//!
//! Native builds run a headless demo round driven by a simple bot.
//! The browser host links the library directly.

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use glam::Vec2;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use tap_the_dot::persistence::MemoryStore;
    use tap_the_dot::platform::{self, NoAds, OfflineLeaderboard};
    use tap_the_dot::sim::{GameEvent, RoundState};
    use tap_the_dot::{GameSession, LevelFormula, Settings};

    /// Host frame rate the demo simulates
    const FRAME_DT: f64 = 1.0 / 60.0;

    struct Options {
        seed: u64,
        formula: LevelFormula,
        rounds: u32,
    }

    fn parse_args() -> Result<Options, String> {
        let mut options = Options {
            seed: platform::run_seed(),
            formula: LevelFormula::default(),
            rounds: 1,
        };
        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            let mut value = || args.next().ok_or_else(|| format!("{} needs a value", arg));
            match arg.as_str() {
                "--seed" => {
                    options.seed = value()?.parse().map_err(|e| format!("bad seed: {}", e))?
                }
                "--formula" => {
                    let v = value()?;
                    options.formula =
                        LevelFormula::from_str(&v).ok_or_else(|| format!("unknown formula {}", v))?
                }
                "--rounds" => {
                    options.rounds = value()?.parse().map_err(|e| format!("bad rounds: {}", e))?
                }
                other => return Err(format!("unknown argument {}", other)),
            }
        }
        Ok(options)
    }

    pub fn run() {
        platform::init_logging();
        let options = match parse_args() {
            Ok(o) => o,
            Err(e) => {
                eprintln!("{}", e);
                eprintln!("usage: tap-the-dot [--seed N] [--formula sqrt|linear] [--rounds N]");
                std::process::exit(2);
            }
        };
        log::info!(
            "Tap The Dot (native demo) seed {} formula {}",
            options.seed,
            options.formula.as_str()
        );

        let mut store = MemoryStore::new();
        if let Err(e) = Settings::with_formula(options.formula).save(&mut store) {
            log::warn!("Could not store demo settings: {}", e);
        }
        let mut session = GameSession::load(
            Box::new(store),
            Box::new(OfflineLeaderboard),
            Box::new(NoAds),
            options.seed,
        );
        let mut bot = Pcg32::seed_from_u64(options.seed ^ 0x5eed);

        for round in 1..=options.rounds {
            session.start_round();
            // Seconds until the bot taps the current dot
            let mut wait: f64 = bot.random_range(0.25..0.9);

            while session.round().state() != RoundState::Over {
                session.tick(FRAME_DT);
                wait -= FRAME_DT;
                if session.round().state() == RoundState::Active && wait <= 0.0 {
                    let now = session.round().clock();
                    let target = match session.round().dot() {
                        Some(dot) if bot.random_bool(0.9) => dot.pos,
                        _ => Vec2::new(10.0, 10.0),
                    };
                    session.tap(target, now);
                    wait = bot.random_range(0.25..0.9);
                }
                for event in session.drain_events() {
                    match event {
                        GameEvent::LevelUp(level) => println!("  level {}", level),
                        GameEvent::TimeBonus { milestone, seconds } => {
                            println!("  {} points: +{}s", milestone, seconds)
                        }
                        GameEvent::RoundOver(summary) => {
                            println!(
                                "Round {}: score {} | level {} | hits {} misses {} | max combo {} | best reaction {}",
                                round,
                                summary.score,
                                summary.level,
                                summary.stats.hits,
                                summary.stats.misses,
                                summary.stats.max_combo,
                                summary
                                    .stats
                                    .best_reaction
                                    .map(|r| format!("{:.0}ms", r * 1000.0))
                                    .unwrap_or_else(|| "-".to_string())
                            );
                        }
                        _ => {}
                    }
                }
            }
            session.save_score(&format!("Bot {}", round));
        }

        println!("Top scores:");
        for (i, entry) in session.high_scores().entries().iter().enumerate() {
            println!("{}. {}: {}", i + 1, entry.name, entry.score);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    demo::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser host drives the library; nothing to do here
}
