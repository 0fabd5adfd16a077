//! Phrasal Runner headless driver
//!
//! Runs the simulation with the demo autopilot at a fixed host frame rate,
//! logging gameplay events. Rendering hosts drive the same `tick` loop.

use std::fs;
use std::path::PathBuf;

use clap::Parser;

use phrasal_runner::consts::{MAX_FRAME_DT, SIM_DT};
use phrasal_runner::sim::{Autopilot, GameEvent, GamePhase, GameState, tick};
use phrasal_runner::{QuestionBank, Result, Settings};

/// Maximum substeps per frame to prevent spiral of death
const MAX_SUBSTEPS: u32 = 8;

#[derive(Debug, Parser)]
#[command(name = "phrasal-runner", about = "Headless phrasal verb runner")]
struct Args {
    /// Settings JSON (partial files keep defaults)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Question catalog JSON
    #[arg(long)]
    questions: Option<PathBuf>,
    /// Override the run seed
    #[arg(long)]
    seed: Option<u64>,
    /// Simulated seconds to run
    #[arg(long, default_value_t = 60.0)]
    seconds: f32,
    /// Host frame rate
    #[arg(long, default_value_t = 60.0)]
    fps: f32,
    /// Make the autopilot miss every n-th row
    #[arg(long)]
    blunder_every: Option<u32>,
    /// Stop after this many game overs
    #[arg(long, default_value_t = 1)]
    max_game_overs: u32,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut settings = match &args.config {
        Some(path) => Settings::from_json(&fs::read_to_string(path)?)?,
        None => Settings::default(),
    };
    if let Some(seed) = args.seed {
        settings.seed = seed;
    }
    let bank = match &args.questions {
        Some(path) => QuestionBank::from_json(&fs::read_to_string(path)?)?,
        None => QuestionBank::default(),
    };

    log::info!("Phrasal Runner starting with seed {}", settings.seed);
    let mut state = GameState::with_bank(settings, bank)?;
    let pilot = Autopilot::new(args.blunder_every);

    let frame_dt = (1.0 / args.fps.max(1.0)).min(MAX_FRAME_DT);
    let frames = (args.seconds / frame_dt).ceil() as u64;
    let mut accumulator = 0.0;
    let mut game_overs = 0;
    let mut cleared = 0u32;
    let mut best_score = 0;

    'frames: for _ in 0..frames {
        accumulator += frame_dt;
        let mut substeps = 0;
        while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = pilot.input(&state, SIM_DT);
            tick(&mut state, &input, SIM_DT)?;
            accumulator -= SIM_DT;
            substeps += 1;

            for event in state.drain_events() {
                match event {
                    GameEvent::RowCleared { row_id } => {
                        cleared += 1;
                        log::debug!("Row {row_id} cleared");
                    }
                    GameEvent::GameOver { score } => {
                        game_overs += 1;
                        best_score = best_score.max(score);
                        log::info!("Game over #{game_overs}: score {score}");
                    }
                    GameEvent::RowSpawned { row_id, prompt, .. } => {
                        log::trace!("Row {row_id}: {prompt}");
                    }
                    _ => {}
                }
            }
            if game_overs >= args.max_game_overs && state.phase == GamePhase::GameOver {
                break 'frames;
            }
        }
    }

    let frame = state.frame();
    best_score = best_score.max(frame.score);
    println!(
        "rows cleared: {cleared}, game overs: {game_overs}, best score: {best_score}, final y: {:.1}, speed: {:.2}",
        frame.player_pos.y, frame.speed
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["phrasal-runner"]).unwrap();
        assert_eq!(args.seconds, 60.0);
        assert_eq!(args.fps, 60.0);
        assert_eq!(args.max_game_overs, 1);
        assert!(args.seed.is_none());
        assert!(args.blunder_every.is_none());
    }

    #[test]
    fn test_args_flags() {
        let args = Args::try_parse_from([
            "phrasal-runner",
            "--seed",
            "7",
            "--seconds",
            "10",
            "--fps",
            "30",
            "--blunder-every",
            "3",
            "--max-game-overs",
            "2",
        ])
        .unwrap();
        assert_eq!(args.seed, Some(7));
        assert_eq!(args.seconds, 10.0);
        assert_eq!(args.fps, 30.0);
        assert_eq!(args.blunder_every, Some(3));
        assert_eq!(args.max_game_overs, 2);
    }

    #[test]
    fn test_args_reject_unknown_dt_flag() {
        assert!(Args::try_parse_from(["phrasal-runner", "--dt", "0.016"]).is_err());
    }
}
