//! Flappy Radar headless runner
//!
//! Usage: `flappy-radar [settings.json] [seed] [max_ticks]`
//!
//! Flies one course with the reflex policy and prints a JSON summary.

use flappy_radar::Settings;
use flappy_radar::policy::{ReflexPolicy, run_session};
use flappy_radar::sim::World;

const DEFAULT_MAX_TICKS: u64 = 100_000;

fn main() {
    env_logger::init();
    log::info!("Flappy Radar (headless) starting...");

    let args: Vec<String> = std::env::args().skip(1).collect();

    let settings = match args.first() {
        Some(path) => Settings::load_or_default(path),
        None => Settings::default(),
    };

    let seed = args.get(1).and_then(|s| match s.parse::<u64>() {
        Ok(seed) => Some(seed),
        Err(e) => {
            log::warn!("Ignoring seed {:?}: {}", s, e);
            None
        }
    });

    let max_ticks = args
        .get(2)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_MAX_TICKS);

    let world = match seed {
        Some(seed) => World::new(settings, seed),
        None => World::from_entropy(settings),
    };

    let mut world = match world {
        Ok(world) => world,
        Err(e) => {
            log::error!("Could not build world: {}", e);
            std::process::exit(1);
        }
    };

    let summary = run_session(&mut world, &mut ReflexPolicy::default(), max_ticks);

    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Could not encode summary: {}", e),
    }
}
