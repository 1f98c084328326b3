use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A match must be rewarded, otherwise no local alignment can ever score above zero
    #[error("match score must be greater than zero")]
    ZeroMatchScore,

    /// The best possible score of the pair does not fit in the 16-bit lanes of the striped solver
    #[error("worst-case score {bound} exceeds the striped solver's score ceiling of {limit}")]
    ScoreOverflow { bound: i64, limit: i64 },

    #[error("unknown alignment method {0:?}, expected one of naive, banded, striped")]
    UnknownMethod(String),
}
