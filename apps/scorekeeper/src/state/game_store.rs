//! Local game state store.
//!
//! Holds the authoritative working copy of one game. Every transition runs
//! under the store mutex, is persisted to the slot, and is then published to
//! subscribers outside the lock.

use std::sync::Arc;

use parking_lot::Mutex;
use time::OffsetDateTime;
use tracing::{debug, info, warn};

use crate::domain::integrity::{audit_game, IntegrityReport};
use crate::domain::ledger;
use crate::domain::player::{Player, PlayerId};
use crate::domain::rules::{MAX_PLAYERS, MIN_PLAYERS};
use crate::domain::state::{GameState, RoundHistoryEntry};
use crate::error::AppError;
use crate::errors::domain::{DomainError, StateKind, ValidationKind};
use crate::errors::ErrorCode;
use crate::repos::game_slot::{self, GameSlot};
use crate::state::observers::{ObserverList, SubscriptionId};

/// Outcome of a committed transition.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreCommit {
    /// Local mutation counter after this transition.
    pub revision: u64,
    pub state: GameState,
}

struct StoreInner {
    state: GameState,
    revision: u64,
}

pub struct GameStore {
    inner: Mutex<StoreInner>,
    slot: Arc<dyn GameSlot>,
    observers: ObserverList<GameState>,
    default_score_limit: i32,
}

impl GameStore {
    pub fn new(slot: Arc<dyn GameSlot>, default_score_limit: i32) -> Self {
        Self {
            inner: Mutex::new(StoreInner {
                state: GameState::empty(default_score_limit),
                revision: 0,
            }),
            slot,
            observers: ObserverList::new(),
            default_score_limit,
        }
    }

    pub fn snapshot(&self) -> GameState {
        self.inner.lock().state.clone()
    }

    pub fn revision(&self) -> u64 {
        self.inner.lock().revision
    }

    /// Roster seated and not yet over.
    pub fn is_active(&self) -> bool {
        self.inner.lock().state.is_active()
    }

    pub fn default_score_limit(&self) -> i32 {
        self.default_score_limit
    }

    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&GameState) + Send + Sync + 'static,
    {
        self.observers.subscribe(listener)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    pub fn create_game(&self, names: &[String]) -> Result<StoreCommit, AppError> {
        self.create_game_with_limit(names, self.default_score_limit)
    }

    /// Seat a fresh roster and start the clock.
    pub fn create_game_with_limit(
        &self,
        names: &[String],
        score_limit: i32,
    ) -> Result<StoreCommit, AppError> {
        let players = seat_players(names)?;
        if score_limit <= 0 {
            return Err(DomainError::validation(
                ValidationKind::InvalidScoreLimit,
                format!("score limit must be positive, got {score_limit}"),
            )
            .into());
        }

        let commit = self.commit("create_game", |_| {
            let mut next = GameState::empty(score_limit);
            next.players = players;
            next.game_start_time = Some(OffsetDateTime::now_utc());
            Ok(next)
        })?;

        info!(
            players = commit.state.players.len(),
            score_limit,
            "Game created"
        );
        Ok(commit)
    }

    /// Record one round for every player.
    pub fn add_round(
        &self,
        scores: &[i32],
        dutch_player_id: Option<&PlayerId>,
    ) -> Result<StoreCommit, AppError> {
        let commit = self.commit("add_round", |current| {
            if !current.has_game() {
                return Err(DomainError::state(StateKind::NoActiveGame, "no game to score").into());
            }
            let players = ledger::apply_round(&current.players, scores, dutch_player_id)?;
            let mut next = current.clone();
            next.is_game_over = ledger::is_game_over(&players, next.score_limit);
            next.players = players;
            next.round_history.push(RoundHistoryEntry {
                scores: scores.to_vec(),
                dutch_player_id: dutch_player_id.cloned(),
            });
            Ok(next)
        })?;

        debug!(
            round = commit.state.round_history.len(),
            dutch = ?dutch_player_id,
            game_over = commit.state.is_game_over,
            "Round added"
        );
        if commit.state.is_game_over {
            info!(rounds = commit.state.round_history.len(), "Score limit reached");
        }
        Ok(commit)
    }

    /// Take back the most recent round. Always leaves the game in progress.
    pub fn undo_last_round(&self) -> Result<StoreCommit, AppError> {
        let commit = self.commit("undo_last_round", |current| {
            if current.round_history.is_empty() {
                return Err(
                    DomainError::state(StateKind::NoRoundsToUndo, "round history is empty").into(),
                );
            }

            let players = ledger::reverse_last_round(&current.players)?;
            let mut next = current.clone();
            next.players = players;
            next.round_history.pop();
            next.is_game_over = false;
            Ok(next)
        })?;

        debug!(round = commit.state.round_history.len(), "Round undone");
        Ok(commit)
    }

    /// Drop the game from memory and from the slot.
    pub fn reset_game(&self) -> Result<StoreCommit, AppError> {
        let commit = {
            let mut inner = self.inner.lock();
            inner.state = GameState::empty(self.default_score_limit);
            inner.revision += 1;
            if let Err(err) = game_slot::clear_state(self.slot.as_ref()) {
                warn!(error = %err, slot = %self.slot.describe(), "Failed to clear persisted game");
            }
            StoreCommit {
                revision: inner.revision,
                state: inner.state.clone(),
            }
        };

        info!("Game reset");
        self.observers.notify(&commit.state);
        Ok(commit)
    }

    /// Restore the persisted game, repairing drifted totals before anyone sees it.
    ///
    /// Returns `Ok(false)` when there is nothing to restore (empty slot, no
    /// players, or an unreadable record).
    pub fn load_from_storage(&self) -> Result<bool, AppError> {
        let loaded = match game_slot::load_state(self.slot.as_ref()) {
            Ok(Some(state)) => state,
            Ok(None) => return Ok(false),
            Err(err) if err.code() == ErrorCode::CorruptRecord => {
                warn!(error = %err, slot = %self.slot.describe(), "Ignoring unreadable persisted game");
                return Ok(false);
            }
            Err(err) => return Err(err),
        };

        let commit = {
            let mut inner = self.inner.lock();
            let mut state = loaded;
            let repaired = ledger::reconcile(&state.players);
            if repaired.changed {
                warn!(slot = %self.slot.describe(), "Persisted totals drifted; corrected on load");
                state.players = repaired.players;
                self.persist(&state);
            }
            inner.state = state;
            inner.revision += 1;
            StoreCommit {
                revision: inner.revision,
                state: inner.state.clone(),
            }
        };

        info!(
            players = commit.state.players.len(),
            rounds = commit.state.round_history.len(),
            "Game restored from storage"
        );
        self.observers.notify(&commit.state);
        Ok(true)
    }

    /// Audit the active game and repair drifted totals.
    ///
    /// Returns `None` when no game is active. Issues that `reconcile` cannot
    /// fix are only reported.
    ///
    /// Every check persists the `last_integrity_check` stamp. Only a check that
    /// rewrites totals bumps the revision and notifies subscribers.
    pub fn run_integrity_check(&self) -> Option<IntegrityReport> {
        let (report, corrected) = {
            let mut inner = self.inner.lock();
            if !inner.state.is_active() {
                return None;
            }

            let report = audit_game(&inner.state);
            inner.state.last_integrity_check = Some(OffsetDateTime::now_utc());

            let corrected = if report.needs_reconcile() {
                let repaired = ledger::reconcile(&inner.state.players);
                inner.state.players = repaired.players;
                inner.revision += 1;
                Some(inner.state.clone())
            } else {
                None
            };
            self.persist(&inner.state);
            (report, corrected)
        };

        if !report.is_valid {
            for issue in &report.errors {
                warn!(%issue, "Integrity issue");
            }
        }
        if let Some(state) = corrected {
            warn!(
                corrections = report.corrections.len(),
                "Integrity drift corrected"
            );
            self.observers.notify(&state);
        } else {
            debug!(valid = report.is_valid, "Integrity check complete");
        }

        Some(report)
    }

    /// Swap in a whole game (used when hydrating from the remote store).
    pub(crate) fn replace_with(&self, state: GameState) -> Result<StoreCommit, AppError> {
        self.commit("replace_with", move |_| {
            let mut next = state;
            next.players = ledger::reconcile(&next.players).players;
            Ok(next)
        })
    }

    /// Mutate the working copy directly, bypassing the ledger.
    #[cfg(test)]
    pub(crate) fn inner_for_tests(&self, f: impl FnOnce(&mut GameState)) {
        f(&mut self.inner.lock().state);
    }

    fn commit<F>(&self, op: &'static str, f: F) -> Result<StoreCommit, AppError>
    where
        F: FnOnce(&GameState) -> Result<GameState, AppError>,
    {
        let commit = {
            let mut inner = self.inner.lock();
            let next = match f(&inner.state) {
                Ok(next) => next,
                Err(err) => {
                    debug!(op, error = %err, "Store transition rejected");
                    return Err(err);
                }
            };
            inner.state = next;
            inner.revision += 1;
            self.persist(&inner.state);
            StoreCommit {
                revision: inner.revision,
                state: inner.state.clone(),
            }
        };

        self.observers.notify(&commit.state);
        Ok(commit)
    }

    /// Local persistence is best effort: the in-memory copy stays authoritative.
    fn persist(&self, state: &GameState) {
        if let Err(err) = game_slot::save_state(self.slot.as_ref(), state) {
            warn!(error = %err, slot = %self.slot.describe(), "Failed to persist game");
        }
    }
}

fn seat_players(names: &[String]) -> Result<Vec<Player>, DomainError> {
    if names.len() < MIN_PLAYERS {
        return Err(DomainError::validation(
            ValidationKind::InsufficientPlayers,
            format!("need at least {MIN_PLAYERS} players, got {}", names.len()),
        ));
    }
    if names.len() > MAX_PLAYERS {
        return Err(DomainError::validation(
            ValidationKind::TooManyPlayers,
            format!("at most {MAX_PLAYERS} players, got {}", names.len()),
        ));
    }

    names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let name = name.trim();
            if name.is_empty() {
                return Err(DomainError::validation(
                    ValidationKind::InvalidPlayerName,
                    format!("player {} has a blank name", i + 1),
                ));
            }
            Ok(Player::seated(i, name))
        })
        .collect()
}
