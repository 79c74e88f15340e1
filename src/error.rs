//! Error types for the trainer core.
//!
//! Validation failures are reported synchronously as `InvalidArgument`. Failures that
//! originate in the audio backend are wrapped in `Playback` and are the caller's to log;
//! the scheduler never retries them.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrainerError {
    /// A caller supplied an out-of-range or malformed value.
    ///
    /// # Example
    /// ```
    /// # use fret_trainer::TrainerError;
    /// let err = TrainerError::InvalidArgument("tuning must not be empty".to_string());
    /// assert_eq!(err.to_string(), "Invalid argument: tuning must not be empty");
    /// ```
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The playback backend could not accept a note.
    #[error("Playback failed: {0}")]
    Playback(String),

    /// The timer thread could not be spawned.
    #[error("Failed to start practice timer: {0}")]
    Timer(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TrainerError>;
