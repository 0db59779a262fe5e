//! Error types for the Rep Coach system.

use thiserror::Error;

use crate::types::Landmark;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Landmark {0} not present in joint set")]
    MissingLandmark(Landmark),

    #[error("Unknown exercise: {0}")]
    UnknownExercise(String),

    #[error("Unknown landmark: {0}")]
    UnknownLandmark(String),

    #[error("Frame source error: {0}")]
    FrameSource(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
