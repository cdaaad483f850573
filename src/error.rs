//! Error taxonomy shared by the loader and the statistics engine.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BikeshareError {
    #[error("data not available for city '{0}'")]
    UnknownCity(String),

    #[error("data not available for month '{0}' (only january to june, or all)")]
    InvalidMonth(String),

    #[error("invalid weekday '{0}' (expected a full weekday name, or all)")]
    InvalidWeekday(String),

    /// A cell could not be normalized. `row` is 1-based and excludes the header.
    #[error("malformed {column} on row {row}: '{value}'")]
    MalformedInput {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("cannot compute {statistic} over an empty selection")]
    EmptyInput { statistic: &'static str },

    #[error("no {column} data is available for this dataset")]
    OptionalColumnUnavailable { column: &'static str },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl BikeshareError {
    /// True for the errors a prompt loop recovers from by asking again.
    pub fn is_invalid_choice(&self) -> bool {
        matches!(
            self,
            Self::UnknownCity(_) | Self::InvalidMonth(_) | Self::InvalidWeekday(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, BikeshareError>;
