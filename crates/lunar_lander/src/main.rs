//! Headless lunar lander
//!
//! Usage: `lunar_lander [config.toml|config.ron]`
//!
//! Flies the configured session with the autopilot aimed at the nearest pad
//! and logs progress once per simulated second.

use lander_engine::config::Config;
use lander_engine::foundation::{logging, math::utils, time::FrameTimer};
use lunar_lander::{Autopilot, GameConfig, GameSession, SessionError};

fn main() {
    logging::init();

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), SessionError> {
    let config = match std::env::args().nth(1) {
        Some(path) => GameConfig::load_from_file(path)?,
        None => {
            log::info!("No configuration given, using defaults");
            GameConfig::default()
        }
    };

    let mut session = GameSession::new(&config)?;
    let start = config.session.start_position;
    let Some(pad) = config
        .landing
        .pads
        .iter()
        .min_by(|a, b| utils::planar_distance(start, a.center).total_cmp(&utils::planar_distance(start, b.center)))
    else {
        log::warn!("No landing pads configured, nothing to fly to");
        return Ok(());
    };
    let pilot = Autopilot::new(pad.center);
    log::info!("Autopilot targeting pad at {:?} worth {}", pad.center, pad.score);

    let mut timer = FrameTimer::new();
    let frame_rate = config.session.frame_rate;
    let report_every = frame_rate.round().max(1.0) as u64;

    for tick in 1..=config.session.max_ticks {
        let intents = pilot.command(session.body(), session.last_altitude());
        let report = session.tick(frame_rate, intents);

        if tick % report_every == 0 {
            let body = session.body();
            log::info!(
                "t={:>6.1}s altitude={:>7} fuel={:>6.2} velocity=({:.2}, {:.2}, {:.2})",
                tick as f32 / frame_rate,
                session.last_altitude().map_or_else(|| "-".to_string(), |a| format!("{a:.2}")),
                body.fuel,
                body.velocity.x,
                body.velocity.y,
                body.velocity.z
            );
        }

        if let Some(outcome) = report.outcome {
            timer.update();
            log::info!("Final outcome {:?}, score {}", outcome, outcome.score());
            log::info!("Simulated {} ticks in {:.3}s wall time", tick, timer.total_time());
            return Ok(());
        }
    }

    timer.update();
    log::warn!(
        "No outcome after {} ticks ({:.3}s wall time)",
        config.session.max_ticks,
        timer.total_time()
    );
    Ok(())
}
