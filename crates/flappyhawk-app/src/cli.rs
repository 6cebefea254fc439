//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use flappyhawk_core::constants::MAX_TIME_SCALE;
use flappyhawk_core::enums::{Difficulty, GameDayDifficulty, GameMode};

fn parse_time_scale(value: &str) -> Result<f64, String> {
    let scale = value
        .trim()
        .parse::<f64>()
        .map_err(|error| format!("invalid time scale: {error}"))?;
    if !scale.is_finite() || scale <= 0.0 || scale > MAX_TIME_SCALE {
        return Err(format!(
            "time scale must be greater than 0 and at most {MAX_TIME_SCALE}"
        ));
    }
    Ok(scale)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Iowa,
    GameDay,
}

impl From<ModeArg> for GameMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Iowa => GameMode::Iowa,
            ModeArg::GameDay => GameMode::GameDay,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DifficultyArg {
    Easy,
    Normal,
    Hard,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Normal => Difficulty::Normal,
            DifficultyArg::Hard => Difficulty::Hard,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GameDayDifficultyArg {
    College,
    Pro,
}

impl From<GameDayDifficultyArg> for GameDayDifficulty {
    fn from(arg: GameDayDifficultyArg) -> Self {
        match arg {
            GameDayDifficultyArg::College => GameDayDifficulty::College,
            GameDayDifficultyArg::Pro => GameDayDifficulty::Pro,
        }
    }
}

/// Play one FlappyHawk run headlessly and append it to the run log.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Game to play.
    #[arg(short, long, value_enum, default_value_t = ModeArg::Iowa)]
    pub mode: ModeArg,
    /// Iowa difficulty. Saved as the new default when given.
    #[arg(short, long, value_enum)]
    pub difficulty: Option<DifficultyArg>,
    /// GameDay difficulty. Saved as the new default when given.
    #[arg(long = "game-day-difficulty", value_enum)]
    pub game_day_difficulty: Option<GameDayDifficultyArg>,
    /// RNG seed; the same seed and input replay the same run.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
    /// Longest run length in simulated seconds.
    #[arg(
        long,
        value_name = "SECONDS",
        default_value_t = 60,
        value_parser = clap::value_parser!(u64).range(1..=3_600)
    )]
    pub seconds: u64,
    /// JSON tuning file overriding the built-in gameplay constants.
    #[arg(long, value_name = "FILE")]
    pub tuning: Option<PathBuf>,
    /// Name written to the run log. Saved when given.
    #[arg(long = "player-name", value_name = "NAME")]
    pub player_name: Option<String>,
    /// Directory for game_runs.csv instead of the platform default.
    #[arg(long = "log-dir", value_name = "DIR")]
    pub log_dir: Option<PathBuf>,
    /// Directory for settings.json instead of the platform default.
    #[arg(long = "settings-dir", value_name = "DIR")]
    pub settings_dir: Option<PathBuf>,
    /// Pace the loop at 60 ticks per wall-clock second.
    #[arg(long)]
    pub realtime: bool,
    /// Reaching zero health does not end the run.
    #[arg(long)]
    pub practice: bool,
    /// Simulation speed multiplier, greater than 0 and at most 4.
    #[arg(
        long = "time-scale",
        value_name = "FACTOR",
        default_value_t = 1.0,
        value_parser = parse_time_scale
    )]
    pub time_scale: f64,
    /// Do not fly the hawk automatically.
    #[arg(long = "no-autopilot")]
    pub no_autopilot: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["flappyhawk"]).unwrap();
        assert_eq!(args.mode, ModeArg::Iowa);
        assert_eq!(args.seed, 42);
        assert_eq!(args.seconds, 60);
        assert!(args.difficulty.is_none());
        assert!(!args.realtime);
    }

    #[test]
    fn parses_game_day_options() {
        let args = Args::try_parse_from([
            "flappyhawk",
            "--mode",
            "game-day",
            "--game-day-difficulty",
            "pro",
            "--player-name",
            "Herky",
            "--seconds",
            "30",
        ])
        .unwrap();
        assert_eq!(GameMode::from(args.mode), GameMode::GameDay);
        assert_eq!(
            args.game_day_difficulty.map(GameDayDifficulty::from),
            Some(GameDayDifficulty::Pro)
        );
        assert_eq!(args.player_name.as_deref(), Some("Herky"));
        assert_eq!(args.seconds, 30);
    }

    #[test]
    fn time_scale_must_be_positive_and_bounded() {
        for bad in ["-1", "0", "NaN", "inf", "4.5", "fast"] {
            assert!(
                Args::try_parse_from(["flappyhawk", "--time-scale", bad]).is_err(),
                "{bad} should be rejected"
            );
        }
        let args = Args::try_parse_from(["flappyhawk", "--time-scale", "2.5"]).unwrap();
        assert_eq!(args.time_scale, 2.5);
    }

    #[test]
    fn rejects_zero_seconds() {
        assert!(Args::try_parse_from(["flappyhawk", "--seconds", "0"]).is_err());
    }
}
