use thiserror::Error;

/// Errors raised by configuration and setup. Gameplay itself never fails.
#[derive(Error, Debug)]
pub enum FlappyError {
    #[error("invalid tuning: {0}")]
    InvalidTuning(String),
    #[error("could not parse tuning file")]
    TuningParse(#[from] serde_json::Error),
    #[error(transparent)]
    IO(#[from] std::io::Error),
}
