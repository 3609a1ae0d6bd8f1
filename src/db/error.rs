//! Database error types.

use derive_more::{Display, Error};
use tracing::instrument;

/// Database error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Database error: {} at {}:{}", message, file, line)]
pub struct DbError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl DbError {
    /// Creates a new database error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<diesel::result::Error> for DbError {
    #[track_caller]
    fn from(err: diesel::result::Error) -> Self {
        Self::new(format!("Diesel error: {}", err))
    }
}

impl From<diesel::ConnectionError> for DbError {
    #[track_caller]
    fn from(err: diesel::ConnectionError) -> Self {
        Self::new(format!("Connection error: {}", err))
    }
}

/// Outcomes of the round-creation transaction that are not plain
/// database failures.
#[derive(Debug, Clone, Display, Error)]
pub enum RoundError {
    /// No game exists with the requested id.
    #[display("Game not found")]
    GameNotFound,
    /// The game already has a winner; no further rounds may be created.
    #[display("Cannot create a new round for a finished game")]
    GameFinished,
    /// Underlying database failure.
    #[display("{_0}")]
    Db(DbError),
}

impl From<DbError> for RoundError {
    fn from(err: DbError) -> Self {
        Self::Db(err)
    }
}

// Lets the round-creation transaction closure propagate Diesel errors
// with `?` while still returning domain outcomes.
impl From<diesel::result::Error> for RoundError {
    #[track_caller]
    fn from(err: diesel::result::Error) -> Self {
        Self::Db(err.into())
    }
}
