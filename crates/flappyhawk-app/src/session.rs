//! One headless run from settings to log line.

use std::time::Duration;

use log::{info, warn};

use flappyhawk_core::commands::PlayerCommand;
use flappyhawk_core::config::Tuning;
use flappyhawk_core::constants::TICK_RATE;
use flappyhawk_core::enums::GameMode;
use flappyhawk_core::state::RunSummary;
use flappyhawk_persistence::{RunLog, RunRecord, SettingsStore};
use flappyhawk_sim::engine::SimConfig;

use crate::autopilot::{Autopilot, Controller};
use crate::cli::Args;
use crate::game_loop::{spawn_game_loop, LoopOptions, Pacing};
use crate::AppError;

const DEFAULT_PLAYER_NAME: &str = "Player";
const PROGRESS_INTERVAL: Duration = Duration::from_secs(1);

/// Persist the difficulty and name choices given on the command line.
pub fn apply_overrides(args: &Args, settings: &mut SettingsStore) -> Result<(), AppError> {
    if let Some(difficulty) = args.difficulty {
        settings.set_difficulty(difficulty.into())?;
    }
    if let Some(difficulty) = args.game_day_difficulty {
        settings.set_game_day_difficulty(difficulty.into())?;
    }
    if let Some(name) = &args.player_name {
        settings.set_player_name(name)?;
    }
    Ok(())
}

pub fn build_config(args: &Args, settings: &SettingsStore) -> Result<SimConfig, AppError> {
    let tuning = match &args.tuning {
        Some(path) => {
            info!("Loading tuning from {path:?}");
            Tuning::from_file(path)?
        }
        None => Tuning::default(),
    };
    let saved = settings.settings();
    Ok(SimConfig {
        seed: args.seed,
        time_scale: args.time_scale,
        tuning,
        practice_mode: args.practice,
        mode: args.mode.into(),
        difficulty: saved.difficulty,
        game_day_difficulty: saved.game_day_difficulty,
    })
}

pub fn loop_options(args: &Args) -> LoopOptions {
    LoopOptions {
        pacing: if args.realtime {
            Pacing::Realtime
        } else {
            Pacing::Unthrottled
        },
        max_ticks: Some(args.seconds * u64::from(TICK_RATE)),
        stop_on_game_over: true,
    }
}

/// Start a run on the game loop thread and block until it ends.
pub fn play(
    config: SimConfig,
    options: LoopOptions,
    controller: Option<Box<dyn Controller>>,
) -> Result<RunSummary, AppError> {
    let mode = config.mode;
    let handle = spawn_game_loop(config, options, controller);
    handle.send(PlayerCommand::StartRun);

    if options.pacing == Pacing::Realtime {
        while !handle.is_finished() {
            std::thread::sleep(PROGRESS_INTERVAL);
            if let Some(snapshot) = handle.latest_snapshot() {
                match mode {
                    GameMode::Iowa => info!(
                        "t={:.0}s score {}",
                        snapshot.time.elapsed_secs, snapshot.score.player
                    ),
                    GameMode::GameDay => info!(
                        "t={:.0}s Iowa {} - {} opponent",
                        snapshot.time.elapsed_secs, snapshot.score.player, snapshot.score.opponent
                    ),
                }
            }
        }
    }
    handle.join().ok_or(AppError::GameLoopPanicked)
}

pub fn default_controller(args: &Args) -> Option<Box<dyn Controller>> {
    (!args.no_autopilot).then(|| Box::new(Autopilot::new(0.0)) as Box<dyn Controller>)
}

/// Assign the next run id and append the run to the log.
pub fn record_run(
    summary: RunSummary,
    settings: &mut SettingsStore,
    log: &RunLog,
) -> Result<RunRecord, AppError> {
    let run_id = settings.next_run_id()?;
    let name = settings.settings().player_name.trim();
    let name = if name.is_empty() {
        DEFAULT_PLAYER_NAME
    } else {
        name
    };
    let record = RunRecord::new(run_id, name, summary);
    if let Err(e) = log.append(&record) {
        warn!("Run {run_id} was not logged: {e}");
        return Err(e.into());
    }
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use flappyhawk_core::enums::{Difficulty, GameDayDifficulty};
    use std::fs;
    use std::path::PathBuf;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("flappyhawk_test_{name}"));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn overrides_are_saved_and_used() {
        let dir = temp_dir("session_overrides");
        let args = Args::try_parse_from([
            "flappyhawk",
            "--difficulty",
            "hard",
            "--game-day-difficulty",
            "pro",
            "--seed",
            "7",
        ])
        .unwrap();
        let mut settings = SettingsStore::load(&dir);
        apply_overrides(&args, &mut settings).unwrap();

        let reloaded = SettingsStore::load(&dir);
        let config = build_config(&args, &reloaded).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.difficulty, Difficulty::Hard);
        assert_eq!(config.game_day_difficulty, GameDayDifficulty::Pro);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn saved_difficulty_used_without_flag() {
        let dir = temp_dir("session_saved_difficulty");
        let mut settings = SettingsStore::load(&dir);
        settings.set_difficulty(Difficulty::Normal).unwrap();

        let args = Args::try_parse_from(["flappyhawk"]).unwrap();
        let config = build_config(&args, &SettingsStore::load(&dir)).unwrap();
        assert_eq!(config.difficulty, Difficulty::Normal);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_tuning_file_is_an_error() {
        let args = Args::try_parse_from(["flappyhawk", "--tuning", "/nonexistent/tuning.json"])
            .unwrap();
        let settings = SettingsStore::load(&temp_dir("session_tuning"));
        assert!(matches!(
            build_config(&args, &settings),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn full_run_is_logged_with_increasing_ids() {
        let dir = temp_dir("session_full_run");
        let args = Args::try_parse_from(["flappyhawk", "--seconds", "5"]).unwrap();
        let mut settings = SettingsStore::load(&dir.join("settings"));
        let log = RunLog::in_dir(dir.join("logs")).unwrap();

        for expected_id in 1..=2 {
            let config = build_config(&args, &settings).unwrap();
            let summary = play(config, loop_options(&args), default_controller(&args)).unwrap();
            assert!(summary.round_seconds <= 5.0 + 1e-6);
            let record = record_run(summary, &mut settings, &log).unwrap();
            assert_eq!(record.run_id, expected_id);
            assert_eq!(record.player_name, DEFAULT_PLAYER_NAME);
        }

        let contents = fs::read_to_string(log.path()).unwrap();
        assert_eq!(contents.lines().count(), 3);
        let _ = fs::remove_dir_all(&dir);
    }
}
