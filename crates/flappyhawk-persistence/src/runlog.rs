//! Append-only CSV log of finished runs.
//!
//! One line per run, header written only when the file is created. The
//! directory is picked once per `RunLog`: the user's documents folder when it
//! is writable, otherwise the app-private data directory.

use std::borrow::Cow;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use flappyhawk_core::enums::GameMode;
use flappyhawk_core::state::RunSummary;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::PersistenceError;

pub const FILE_NAME: &str = "game_runs.csv";

pub const HEADER: &str = "run_id,player_name,game_mode,difficulty,score,player_score,enemy_score,\
round_seconds,obstacles_spawned,jumps,helmets_collected,\
offense_drives,defense_rounds_won,defense_rounds_failed";

const WRITE_CHECK_FILE: &str = ".write_check.tmp";

/// A finished run as it appears in the log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRecord {
    pub run_id: u32,
    pub player_name: String,
    pub summary: RunSummary,
}

impl RunRecord {
    pub fn new(run_id: u32, player_name: impl Into<String>, summary: RunSummary) -> Self {
        Self {
            run_id,
            player_name: player_name.into(),
            summary,
        }
    }

    /// The CSV line for this run, without the trailing newline.
    pub fn to_csv_line(&self) -> String {
        let s = &self.summary;
        [
            self.run_id.to_string(),
            escape(&self.player_name).into_owned(),
            mode_label(s.game_mode).to_string(),
            escape(&s.difficulty).into_owned(),
            s.score.to_string(),
            s.player_score.to_string(),
            s.enemy_score.to_string(),
            format_seconds(s.round_seconds),
            s.obstacles_spawned.to_string(),
            s.jumps.to_string(),
            s.helmets_collected.to_string(),
            s.offense_drives.to_string(),
            s.defense_rounds_won.to_string(),
            s.defense_rounds_failed.to_string(),
        ]
        .join(",")
    }
}

pub fn mode_label(mode: GameMode) -> &'static str {
    match mode {
        GameMode::Iowa => "Iowa",
        GameMode::GameDay => "GameDay",
    }
}

/// Quote a field if it contains a comma, quote or newline. Embedded quotes
/// are doubled.
pub fn escape(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

/// Seconds with at most three decimals and no trailing zeros (`12.5`, `3`).
pub fn format_seconds(secs: f64) -> String {
    let fixed = format!("{secs:.3}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() || trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Creates `dir` if needed and checks a file can be written inside it.
fn ensure_writable(dir: &Path) -> bool {
    if fs::create_dir_all(dir).is_err() {
        return false;
    }
    let scratch = dir.join(WRITE_CHECK_FILE);
    if fs::write(&scratch, "ok").is_err() {
        return false;
    }
    let _ = fs::remove_file(&scratch);
    true
}

pub fn preferred_dir() -> Option<PathBuf> {
    dirs::document_dir().map(|dir| dir.join("FlappyHawk").join("Logs"))
}

pub fn fallback_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join("flappyhawk").join("logs"))
}

#[derive(Debug, Clone)]
pub struct RunLog {
    path: PathBuf,
}

impl RunLog {
    /// Log into an explicit directory.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Result<Self, PersistenceError> {
        let dir = dir.into();
        if !ensure_writable(&dir) {
            return Err(PersistenceError::NoDirectory("run log"));
        }
        Ok(Self {
            path: dir.join(FILE_NAME),
        })
    }

    /// Log into the best writable platform directory.
    pub fn resolve() -> Result<Self, PersistenceError> {
        if let Some(dir) = preferred_dir() {
            if ensure_writable(&dir) {
                return Ok(Self {
                    path: dir.join(FILE_NAME),
                });
            }
            warn!("Run log directory {dir:?} is not writable, using fallback");
        }
        let dir = fallback_dir().ok_or(PersistenceError::NoDirectory("run log"))?;
        Self::in_dir(dir)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one run, writing the header first if the file is new.
    pub fn append(&self, record: &RunRecord) -> Result<(), PersistenceError> {
        let new_file = !self.path.exists();
        let write_err = |source: std::io::Error| PersistenceError::Write {
            path: self.path.clone(),
            source,
        };
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(write_err)?;
        if new_file {
            writeln!(file, "{HEADER}").map_err(write_err)?;
        }
        writeln!(file, "{}", record.to_csv_line()).map_err(write_err)?;
        info!("Saved run {} to {:?}", record.run_id, self.path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> RunSummary {
        RunSummary {
            game_mode: GameMode::GameDay,
            difficulty: "Pro".into(),
            score: 4,
            player_score: 10,
            enemy_score: 6,
            round_seconds: 42.25,
            obstacles_spawned: 12,
            jumps: 80,
            helmets_collected: 1,
            offense_drives: 3,
            defense_rounds_won: 1,
            defense_rounds_failed: 2,
        }
    }

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("flappyhawk_test_{name}"));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn escape_plain_field_is_borrowed() {
        assert!(matches!(escape("Herky"), Cow::Borrowed("Herky")));
        assert_eq!(escape(""), "");
    }

    #[test]
    fn escape_quotes_special_fields() {
        assert_eq!(escape("Hawk, Herky"), "\"Hawk, Herky\"");
        assert_eq!(escape("the \"Hawk\""), "\"the \"\"Hawk\"\"\"");
        assert_eq!(escape("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn seconds_use_at_most_three_decimals() {
        assert_eq!(format_seconds(42.25), "42.25");
        assert_eq!(format_seconds(3.0), "3");
        assert_eq!(format_seconds(1.23456), "1.235");
        assert_eq!(format_seconds(0.0), "0");
        assert_eq!(format_seconds(10.0), "10");
    }

    #[test]
    fn csv_line_matches_header_columns() {
        let record = RunRecord::new(7, "Herky", summary());
        let line = record.to_csv_line();
        assert_eq!(line, "7,Herky,GameDay,Pro,4,10,6,42.25,12,80,1,3,1,2");
        assert_eq!(
            line.split(',').count(),
            HEADER.split(',').count(),
            "one value per column"
        );
    }

    #[test]
    fn header_written_once() {
        let dir = temp_dir("runlog_header");
        let log = RunLog::in_dir(&dir).unwrap();
        assert!(!log.path().exists());

        log.append(&RunRecord::new(1, "a", summary())).unwrap();
        log.append(&RunRecord::new(2, "b", summary())).unwrap();

        let contents = fs::read_to_string(log.path()).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], HEADER);
        assert!(lines[1].starts_with("1,a,"));
        assert!(lines[2].starts_with("2,b,"));
        assert_eq!(contents.matches("run_id").count(), 1);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn appending_to_existing_file_keeps_one_header() {
        let dir = temp_dir("runlog_reopen");
        RunLog::in_dir(&dir)
            .unwrap()
            .append(&RunRecord::new(1, "a", summary()))
            .unwrap();

        // A fresh handle on the same directory must not repeat the header.
        let log = RunLog::in_dir(&dir).unwrap();
        log.append(&RunRecord::new(2, "b", summary())).unwrap();

        let contents = fs::read_to_string(log.path()).unwrap();
        assert_eq!(contents.lines().count(), 3);
        assert_eq!(contents.matches(HEADER).count(), 1);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn write_check_file_is_removed() {
        let dir = temp_dir("runlog_write_check");
        RunLog::in_dir(&dir).unwrap();
        assert!(dir.exists());
        assert!(!dir.join(WRITE_CHECK_FILE).exists());
        let _ = fs::remove_dir_all(&dir);
    }
}
