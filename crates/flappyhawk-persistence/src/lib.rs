//! On-disk state for FlappyHawk: the append-only CSV run log and the
//! key-value settings file.

pub mod error;
pub mod runlog;
pub mod settings;

pub use error::PersistenceError;
pub use runlog::{RunLog, RunRecord};
pub use settings::{Settings, SettingsStore, VolumeChannel};
