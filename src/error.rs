//! Error types for the blackjack Q-learning crate

use thiserror::Error;

/// Main error type for the crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid action '{input}' (expected one of: stick, hit)")]
    InvalidAction { input: String },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error(
        "state out of bounds: player sum {player_sum}, dealer card {dealer_card}, usable ace {usable_ace}"
    )]
    StateOutOfBounds {
        player_sum: u8,
        dealer_card: u8,
        usable_ace: bool,
    },

    #[error("Q-table has {actual} values, expected {expected}")]
    TableShape { expected: usize, actual: usize },

    #[error("round already finished; call reset() before stepping again")]
    RoundFinished,

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}

impl Error {
    pub(crate) fn invalid_config(message: impl Into<String>) -> Self {
        Error::InvalidConfiguration {
            message: message.into(),
        }
    }
}
