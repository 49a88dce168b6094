//! Domain-level error type used by the ledger and the local store.
//!
//! This error type is storage- and transport-agnostic. Callers that also talk
//! to persistence or the remote mirror return `crate::error::AppError`, which
//! converts from `DomainError`.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Caller mistakes: reported immediately, state unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    LengthMismatch,
    UnknownPlayer,
    InsufficientPlayers,
    TooManyPlayers,
    InvalidPlayerName,
    InvalidScoreLimit,
    ScoreOverflow,
}

/// Precondition violations against the current game state.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StateKind {
    NoRoundsToUndo,
    NoActiveGame,
}

/// Missing resource in domain terms
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Game,
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Input validation or business rule violation
    Validation(ValidationKind, String),
    /// Operation not allowed in the current state
    State(StateKind, String),
    /// Missing resource in domain terms
    NotFound(NotFoundKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "validation error {kind:?}: {d}"),
            DomainError::State(kind, d) => write!(f, "state error {kind:?}: {d}"),
            DomainError::NotFound(kind, d) => write!(f, "not found {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }
    pub fn state(kind: StateKind, detail: impl Into<String>) -> Self {
        Self::State(kind, detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }

    pub fn validation_kind(&self) -> Option<&ValidationKind> {
        match self {
            DomainError::Validation(kind, _) => Some(kind),
            _ => None,
        }
    }

    pub fn state_kind(&self) -> Option<&StateKind> {
        match self {
            DomainError::State(kind, _) => Some(kind),
            _ => None,
        }
    }
}
