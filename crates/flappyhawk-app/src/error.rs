use flappyhawk_core::FlappyError;
use flappyhawk_persistence::PersistenceError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] FlappyError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
    #[error("game loop thread panicked")]
    GameLoopPanicked,
    #[error("could not encode run summary")]
    Encode(#[from] serde_json::Error),
}
