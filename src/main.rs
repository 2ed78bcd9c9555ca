//! Sling Duel headless runner
//!
//! Replays scripted inputs for both players through the full session driver
//! and logs the outcome. Usage: `sling-duel [TUNING.json] [--seed N] [--rounds N] [--no-test-mode]`

use std::path::{Path, PathBuf};

use clap::Parser;
use sling_duel::consts::*;
use sling_duel::sim::{GameEvent, GameState, Hero, HeroInput, PickupKind, Side, TickInput};
use sling_duel::{Session, SessionPhase, Tuning};

/// Rounds still running after this much play time are abandoned
const ROUND_TIME_LIMIT_MS: u64 = 180_000;

#[derive(clap::Parser, Debug)]
#[command(about = "Play scripted rounds of Sling Duel without a window")]
struct Cli {
    /// Tuning JSON file, defaults are used when omitted
    tuning: Option<PathBuf>,
    /// Match seed
    #[arg(long, default_value_t = 0x5EED)]
    seed: u64,
    /// Number of rounds to play
    #[arg(long, default_value_t = 3)]
    rounds: u32,
    /// Let banana carriers run dry
    #[arg(long)]
    no_test_mode: bool,
}

fn load_tuning(path: Option<&Path>) -> Tuning {
    let Some(path) = path else {
        return Tuning::default();
    };
    match std::fs::read_to_string(path) {
        Ok(json) => match Tuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(e) => {
                log::warn!("Failed to parse {}: {}, using defaults", path.display(), e);
                Tuning::default()
            }
        },
        Err(e) => {
            log::warn!("Failed to read {}: {}, using defaults", path.display(), e);
            Tuning::default()
        }
    }
}

/// Scripted input replay for one seat: walk to a banana, turn and sweep the
/// aim until the preview arc crosses the other hero, and press hook on a fixed
/// cycle. Only exists to drive the session headlessly.
fn scripted_input(state: &GameState, side: Side, tick_index: u64) -> HeroInput {
    let me = state.hero(side);
    let foe = state.hero(side.other());
    let mut input = HeroInput::default();

    // Fixed hook cycle
    let phase = (tick_index + side.index() as u64 * 90) % 240;
    input.hook = phase < 30;

    if !me.has_banana {
        let target_x = state
            .pickups
            .iter()
            .filter(|p| p.kind == PickupKind::Banana && p.on_ground())
            .map(|p| p.rect.center().x)
            .min_by(|a, b| (a - me.center().x).abs().total_cmp(&(b - me.center().x).abs()))
            .unwrap_or(foe.center().x);
        steer_toward(me, target_x, &mut input);
        return input;
    }

    // Face the opponent before aiming
    let foe_right = foe.center().x > me.center().x;
    if foe_right != me.facing_right {
        input.right = foe_right;
        input.left = !foe_right;
        return input;
    }

    let arc = me.throw_preview(&state.tuning.banana, 240);
    let target = foe.center();
    let closest = arc
        .iter()
        .map(|p| p.distance(target))
        .fold(f32::INFINITY, f32::min);
    if closest < 30.0 {
        input.throw = true;
        return input;
    }

    let falls_short = arc
        .last()
        .is_some_and(|p| (p.x - me.center().x).abs() < (target.x - me.center().x).abs());
    if falls_short {
        input.aim_up = true;
    } else {
        input.aim_down = true;
    }
    input
}

fn steer_toward(me: &Hero, x: f32, input: &mut HeroInput) {
    let dx = x - me.center().x;
    if dx.abs() > 8.0 {
        input.right = dx > 0.0;
        input.left = dx < 0.0;
    }
}

fn log_events(events: &[GameEvent]) {
    for event in events {
        match event {
            GameEvent::BananaHit { target, thrower, damage } => {
                log::info!("{} hit {} for {}", thrower.name(), target.name(), damage)
            }
            GameEvent::SelfHit { side } => log::info!("{} hit themselves!", side.name()),
            GameEvent::SplatStepped { target, .. } => log::info!("{} slipped on a splat", target.name()),
            other => log::debug!("{:?}", other),
        }
    }
}

fn main() {
    env_logger::init();
    let options = Cli::parse();
    let tuning = load_tuning(options.tuning.as_deref());

    log::info!("Sling Duel (headless) starting, seed {:#x}", options.seed);
    let mut session = Session::new(options.seed, tuning);
    session.set_test_mode(!options.no_test_mode);

    for _ in 0..options.rounds {
        // Wait out the restart delay
        while !session.start_round() {
            session.advance(TICK_MS, &TickInput::default());
        }

        let mut tick_index = 0u64;
        let started = session.now();
        while session.phase == SessionPhase::Playing {
            let input = TickInput::new(
                scripted_input(&session.state, Side::Red, tick_index),
                scripted_input(&session.state, Side::Blue, tick_index),
            );
            session.advance(TICK_MS, &input);
            log_events(&session.state.drain_events());
            tick_index += 1;

            if session.now() - started > ROUND_TIME_LIMIT_MS {
                log::warn!("round {} hit the time limit, abandoning", session.state.round);
                session.toggle_pause();
                session.quit_to_title();
                break;
            }
        }

        match session.last_outcome {
            Some(outcome) => log::info!("round {}: {:?}", session.state.round, outcome),
            None => log::info!("round {}: no result", session.state.round),
        }
    }

    let board = &session.scoreboard;
    println!(
        "Red {} - Blue {} ({} draws, {} rounds)",
        board.red_wins,
        board.blue_wins,
        board.draws,
        board.rounds_played()
    );
}
