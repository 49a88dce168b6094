//! Error codes for the scorekeeper core.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All error codes are SCREAMING_SNAKE_CASE.

use core::fmt;

use crate::errors::domain::{DomainError, NotFoundKind, StateKind, ValidationKind};

/// Centralized error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation
    /// Scores array length differs from the roster size
    LengthMismatch,
    /// Dutch declarer is not part of the roster
    UnknownPlayer,
    /// Fewer than the minimum number of players
    InsufficientPlayers,
    /// More than the maximum number of players
    TooManyPlayers,
    /// Blank player name
    InvalidPlayerName,
    /// Score limit must be positive
    InvalidScoreLimit,
    /// Running total does not fit the score type
    ScoreOverflow,

    // State
    /// Nothing to undo
    NoRoundsToUndo,
    /// No game in the local store
    NoActiveGame,

    // Not found
    /// Remote store has no such game
    GameNotFound,

    // Session & sync
    /// Operation needs a signed-in session
    NotAuthenticated,
    /// Remote read or write failed
    SyncFailed,
    /// Remote rejected the write
    SyncRejected,

    // Infrastructure
    /// Local persistence failed
    StorageError,
    /// Persisted payload could not be decoded
    CorruptRecord,
    /// Invalid configuration
    ConfigError,
}

impl ErrorCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::LengthMismatch => "LENGTH_MISMATCH",
            Self::UnknownPlayer => "UNKNOWN_PLAYER",
            Self::InsufficientPlayers => "INSUFFICIENT_PLAYERS",
            Self::TooManyPlayers => "TOO_MANY_PLAYERS",
            Self::InvalidPlayerName => "INVALID_PLAYER_NAME",
            Self::InvalidScoreLimit => "INVALID_SCORE_LIMIT",
            Self::ScoreOverflow => "SCORE_OVERFLOW",
            Self::NoRoundsToUndo => "NO_ROUNDS_TO_UNDO",
            Self::NoActiveGame => "NO_ACTIVE_GAME",
            Self::GameNotFound => "GAME_NOT_FOUND",
            Self::NotAuthenticated => "NOT_AUTHENTICATED",
            Self::SyncFailed => "SYNC_FAILED",
            Self::SyncRejected => "SYNC_REJECTED",
            Self::StorageError => "STORAGE_ERROR",
            Self::CorruptRecord => "CORRUPT_RECORD",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&DomainError> for ErrorCode {
    fn from(err: &DomainError) -> Self {
        match err {
            DomainError::Validation(kind, _) => match kind {
                ValidationKind::LengthMismatch => Self::LengthMismatch,
                ValidationKind::UnknownPlayer => Self::UnknownPlayer,
                ValidationKind::InsufficientPlayers => Self::InsufficientPlayers,
                ValidationKind::TooManyPlayers => Self::TooManyPlayers,
                ValidationKind::InvalidPlayerName => Self::InvalidPlayerName,
                ValidationKind::InvalidScoreLimit => Self::InvalidScoreLimit,
                ValidationKind::ScoreOverflow => Self::ScoreOverflow,
            },
            DomainError::State(kind, _) => match kind {
                StateKind::NoRoundsToUndo => Self::NoRoundsToUndo,
                StateKind::NoActiveGame => Self::NoActiveGame,
            },
            DomainError::NotFound(kind, _) => match kind {
                NotFoundKind::Game => Self::GameNotFound,
            },
        }
    }
}
