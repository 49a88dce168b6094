//! Score ledger: pure functions over a roster snapshot.
//!
//! Nothing here touches storage or the network. Every function takes the
//! roster by reference and returns a fresh copy, so a failed call leaves the
//! caller's state exactly as it was.

use crate::domain::player::{position_of, Player, PlayerId, Round};
use crate::domain::state::RoundHistoryEntry;
use crate::errors::domain::{DomainError, StateKind, ValidationKind};

/// Result of recomputing totals from rounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciled {
    pub players: Vec<Player>,
    /// True when at least one `total_score` was rewritten.
    pub changed: bool,
}

/// Sum of a player's rounds, widened so corrupted data cannot overflow.
pub fn rounds_sum(player: &Player) -> i64 {
    player.rounds.iter().map(|r| i64::from(r.score)).sum()
}

/// The total a player should carry given their rounds.
///
/// Saturates at the `i32` bounds; a sum that large cannot come out of
/// `apply_round` and only shows up on tampered data.
pub fn expected_total(player: &Player) -> i32 {
    let sum = rounds_sum(player);
    i32::try_from(sum).unwrap_or(if sum < 0 { i32::MIN } else { i32::MAX })
}

/// Append one round to every player.
///
/// `scores[i]` belongs to `players[i]`. When `dutch_player_id` is given the
/// matching player's round is flagged as the Dutch declaration.
pub fn apply_round(
    players: &[Player],
    scores: &[i32],
    dutch_player_id: Option<&PlayerId>,
) -> Result<Vec<Player>, DomainError> {
    if scores.len() != players.len() {
        return Err(DomainError::validation(
            ValidationKind::LengthMismatch,
            format!(
                "expected {} scores, got {}",
                players.len(),
                scores.len()
            ),
        ));
    }

    if let Some(id) = dutch_player_id {
        if position_of(players, id).is_none() {
            return Err(DomainError::validation(
                ValidationKind::UnknownPlayer,
                format!("dutch player {id} is not in the roster"),
            ));
        }
    }

    players
        .iter()
        .zip(scores)
        .map(|(player, &score)| {
            let total = player.total_score.checked_add(score).ok_or_else(|| {
                DomainError::validation(
                    ValidationKind::ScoreOverflow,
                    format!("total for {} overflows", player.id),
                )
            })?;
            let mut next = player.clone();
            next.rounds.push(Round {
                score,
                is_dutch: dutch_player_id == Some(&player.id),
            });
            next.total_score = total;
            Ok(next)
        })
        .collect()
}

/// Pop the last round from every player and take it off their total.
pub fn reverse_last_round(players: &[Player]) -> Result<Vec<Player>, DomainError> {
    if players.is_empty() || players.iter().any(|p| p.rounds.is_empty()) {
        return Err(DomainError::state(
            StateKind::NoRoundsToUndo,
            "every player needs at least one round to undo",
        ));
    }

    players
        .iter()
        .map(|player| {
            let mut next = player.clone();
            let popped = next.rounds.pop().map(|r| r.score).unwrap_or_default();
            next.total_score = player.total_score.checked_sub(popped).ok_or_else(|| {
                DomainError::validation(
                    ValidationKind::ScoreOverflow,
                    format!("total for {} underflows", player.id),
                )
            })?;
            Ok(next)
        })
        .collect()
}

/// Recompute every total from its rounds.
///
/// This is the only place allowed to repair a total that drifted away from
/// the rounds it is supposed to sum.
pub fn reconcile(players: &[Player]) -> Reconciled {
    let mut changed = false;
    let players = players
        .iter()
        .map(|player| {
            let expected = expected_total(player);
            let mut next = player.clone();
            if next.total_score != expected {
                changed = true;
                next.total_score = expected;
            }
            next
        })
        .collect();

    Reconciled { players, changed }
}

/// Game-over predicate: somebody reached the limit.
pub fn is_game_over(players: &[Player], score_limit: i32) -> bool {
    players.iter().any(|p| p.total_score >= score_limit)
}

/// Rebuild rounds and totals by replaying `history` from an all-zero start.
pub fn replay_history(
    roster: &[Player],
    history: &[RoundHistoryEntry],
) -> Result<Vec<Player>, DomainError> {
    let start: Vec<Player> = roster
        .iter()
        .map(|p| Player {
            total_score: 0,
            rounds: Vec::new(),
            ..p.clone()
        })
        .collect();

    history.iter().try_fold(start, |players, entry| {
        apply_round(&players, &entry.scores, entry.dutch_player_id.as_ref())
    })
}
