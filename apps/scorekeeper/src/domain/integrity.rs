//! Integrity auditor: read-only consistency checks over a roster.
//!
//! Audits never fail and never mutate. The report lists what is wrong and,
//! for drifted totals, what `ledger::reconcile` would write instead.

use std::fmt;

use serde::Serialize;

use crate::domain::ledger::expected_total;
use crate::domain::player::{position_of, Player, PlayerId};
use crate::domain::state::GameState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum IntegrityIssue {
    /// `total_score` differs from the sum of the player's rounds.
    TotalMismatch {
        player_id: PlayerId,
        expected: i32,
        actual: i32,
    },
    /// A player's round count differs from the history length.
    RoundCountMismatch {
        player_id: PlayerId,
        expected: usize,
        actual: usize,
    },
    /// A history entry does not carry one score per player.
    ScoresLengthMismatch {
        round_index: usize,
        expected: usize,
        actual: usize,
    },
    /// A history entry names a Dutch declarer who is not seated.
    UnknownDutchPlayer {
        round_index: usize,
        player_id: PlayerId,
    },
    /// A player's Dutch flag disagrees with the history entry.
    DutchFlagMismatch {
        round_index: usize,
        player_id: PlayerId,
        flagged: bool,
    },
    /// A player's round score disagrees with the history entry.
    RoundScoreMismatch {
        round_index: usize,
        player_id: PlayerId,
        history: i32,
        round: i32,
    },
}

impl fmt::Display for IntegrityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TotalMismatch {
                player_id,
                expected,
                actual,
            } => write!(f, "{player_id}: total {actual} but rounds sum to {expected}"),
            Self::RoundCountMismatch {
                player_id,
                expected,
                actual,
            } => write!(f, "{player_id}: {actual} rounds but history has {expected}"),
            Self::ScoresLengthMismatch {
                round_index,
                expected,
                actual,
            } => write!(
                f,
                "round {round_index}: {actual} scores for {expected} players"
            ),
            Self::UnknownDutchPlayer {
                round_index,
                player_id,
            } => write!(f, "round {round_index}: unknown dutch player {player_id}"),
            Self::DutchFlagMismatch {
                round_index,
                player_id,
                flagged,
            } => write!(
                f,
                "round {round_index}: {player_id} dutch flag is {flagged}, history disagrees"
            ),
            Self::RoundScoreMismatch {
                round_index,
                player_id,
                history,
                round,
            } => write!(
                f,
                "round {round_index}: {player_id} scored {round} but history says {history}"
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CorrectedField {
    TotalScore,
}

/// A value `reconcile` would rewrite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Correction {
    pub player_id: PlayerId,
    pub field: CorrectedField,
    pub current: i32,
    pub expected: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrityReport {
    pub is_valid: bool,
    pub errors: Vec<IntegrityIssue>,
    pub corrections: Vec<Correction>,
}

impl IntegrityReport {
    fn from_parts(errors: Vec<IntegrityIssue>, corrections: Vec<Correction>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
            corrections,
        }
    }

    /// True when `reconcile` has something to fix.
    pub fn needs_reconcile(&self) -> bool {
        !self.corrections.is_empty()
    }
}

/// Roster-level audit: every total must equal the sum of its rounds.
pub fn audit_integrity(players: &[Player]) -> IntegrityReport {
    let mut errors = Vec::new();
    let mut corrections = Vec::new();

    for player in players {
        let expected = expected_total(player);
        if player.total_score != expected {
            errors.push(IntegrityIssue::TotalMismatch {
                player_id: player.id.clone(),
                expected,
                actual: player.total_score,
            });
            corrections.push(Correction {
                player_id: player.id.clone(),
                field: CorrectedField::TotalScore,
                current: player.total_score,
                expected,
            });
        }
    }

    IntegrityReport::from_parts(errors, corrections)
}

/// Full audit: roster totals plus every history entry against the rounds.
pub fn audit_game(state: &GameState) -> IntegrityReport {
    let IntegrityReport {
        mut errors,
        corrections,
        ..
    } = audit_integrity(&state.players);

    let players = &state.players;
    let history = &state.round_history;

    for player in players {
        if player.rounds.len() != history.len() {
            errors.push(IntegrityIssue::RoundCountMismatch {
                player_id: player.id.clone(),
                expected: history.len(),
                actual: player.rounds.len(),
            });
        }
    }

    for (round_index, entry) in history.iter().enumerate() {
        if entry.scores.len() != players.len() {
            errors.push(IntegrityIssue::ScoresLengthMismatch {
                round_index,
                expected: players.len(),
                actual: entry.scores.len(),
            });
        }

        if let Some(id) = &entry.dutch_player_id {
            if position_of(players, id).is_none() {
                errors.push(IntegrityIssue::UnknownDutchPlayer {
                    round_index,
                    player_id: id.clone(),
                });
            }
        }

        for (seat, player) in players.iter().enumerate() {
            let Some(round) = player.rounds.get(round_index) else {
                continue;
            };

            let should_be_dutch = entry.dutch_player_id.as_ref() == Some(&player.id);
            if round.is_dutch != should_be_dutch {
                errors.push(IntegrityIssue::DutchFlagMismatch {
                    round_index,
                    player_id: player.id.clone(),
                    flagged: round.is_dutch,
                });
            }

            if let Some(&history_score) = entry.scores.get(seat) {
                if history_score != round.score {
                    errors.push(IntegrityIssue::RoundScoreMismatch {
                        round_index,
                        player_id: player.id.clone(),
                        history: history_score,
                        round: round.score,
                    });
                }
            }
        }
    }

    IntegrityReport::from_parts(errors, corrections)
}
