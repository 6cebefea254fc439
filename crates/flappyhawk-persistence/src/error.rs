use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("no writable directory for {0}")]
    NoDirectory(&'static str),
    #[error("could not write {path:?}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse settings")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    IO(#[from] std::io::Error),
}
