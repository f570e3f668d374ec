use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("terminal error: {0}")]
    Terminal(#[source] io::Error),
    #[error("input error: {0}")]
    Input(#[source] io::Error),
    #[error("input stream closed")]
    InputClosed,
    #[error("cannot read asset {path}: {source}")]
    Asset {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("word list error: {0}")]
    WordList(String),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("event channel disconnected")]
    Channel,
}

pub type Result<T> = std::result::Result<T, GameError>;
