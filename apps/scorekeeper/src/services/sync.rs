//! Sync coordinator: local-first replication of the game to a remote store.
//!
//! Every mutation commits to the local store first and always succeeds or
//! fails on local grounds alone. When a session is present and the game is
//! linked to a remote id, the new state is then pushed to the remote store.
//! Remote failures only move `sync_status` to `Error`; they never roll back
//! the local commit.
//!
//! Signing in does not link an existing game. A game played before the session
//! started stays `Local` until `migrate_local_to_cloud` gives it a remote id;
//! only games created under a session or loaded from the remote store are
//! mirrored automatically.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use time::OffsetDateTime;
use tracing::{debug, info, warn};

use crate::auth::{Session, UserId};
use crate::domain::player::{Player, PlayerId};
use crate::domain::state::{GameState, RoundHistoryEntry};
use crate::error::AppError;
use crate::errors::domain::{DomainError, NotFoundKind, StateKind};
use crate::repos::remote_games::{GameDocument, GameId, RemoteGameStore};
use crate::state::game_store::{GameStore, StoreCommit};
use crate::state::observers::{ObserverList, SubscriptionId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncStatus {
    /// No session, or nothing pushed yet.
    Local,
    /// A remote read or write is in flight.
    Syncing,
    /// The last remote operation succeeded.
    Synced,
    /// The last remote operation failed.
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncState {
    pub current_game_id: Option<GameId>,
    pub sync_status: SyncStatus,
    #[serde(with = "time::serde::rfc3339::option")]
    pub last_sync: Option<OffsetDateTime>,
    pub last_error: Option<String>,
}

impl Default for SyncState {
    fn default() -> Self {
        Self {
            current_game_id: None,
            sync_status: SyncStatus::Local,
            last_sync: None,
            last_error: None,
        }
    }
}

/// Where mutations go besides the local store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplicationPolicy {
    LocalOnly,
    Mirrored { user_id: UserId },
}

/// Read-only view handed to subscribers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameView {
    pub players: Vec<Player>,
    pub round_history: Vec<RoundHistoryEntry>,
    pub score_limit: i32,
    pub is_game_over: bool,
    pub sync_status: SyncStatus,
}

impl GameView {
    fn from_parts(state: &GameState, sync_status: SyncStatus) -> Self {
        Self {
            players: state.players.clone(),
            round_history: state.round_history.clone(),
            score_limit: state.score_limit,
            is_game_over: state.is_game_over,
            sync_status,
        }
    }
}

#[derive(Default)]
struct SyncTracker {
    state: SyncState,
    /// Newest revision whose remote write has been started.
    latest_started: u64,
    /// Newest revision whose remote write has completed.
    latest_applied: u64,
}

/// State shared with the store listener.
#[derive(Default)]
struct SyncShared {
    tracker: Mutex<SyncTracker>,
    observers: ObserverList<GameView>,
}

impl SyncShared {
    fn status(&self) -> SyncStatus {
        self.tracker.lock().state.sync_status
    }

    fn publish(&self, state: &GameState) {
        let view = GameView::from_parts(state, self.status());
        self.observers.notify(&view);
    }
}

pub struct SyncCoordinator {
    store: Arc<GameStore>,
    remote: Arc<dyn RemoteGameStore>,
    session: RwLock<Option<Session>>,
    shared: Arc<SyncShared>,
    store_subscription: SubscriptionId,
}

impl SyncCoordinator {
    pub fn new(store: Arc<GameStore>, remote: Arc<dyn RemoteGameStore>) -> Self {
        let shared = Arc::new(SyncShared::default());
        let forward = Arc::clone(&shared);
        let store_subscription = store.subscribe(move |state| forward.publish(state));

        Self {
            store,
            remote,
            session: RwLock::new(None),
            shared,
            store_subscription,
        }
    }

    pub fn store(&self) -> &Arc<GameStore> {
        &self.store
    }

    pub fn policy(&self) -> ReplicationPolicy {
        match self.session.read().as_ref() {
            Some(session) => ReplicationPolicy::Mirrored {
                user_id: session.user_id.clone(),
            },
            None => ReplicationPolicy::LocalOnly,
        }
    }

    pub fn sync_state(&self) -> SyncState {
        self.shared.tracker.lock().state.clone()
    }

    pub fn sync_status(&self) -> SyncStatus {
        self.shared.status()
    }

    pub fn view(&self) -> GameView {
        GameView::from_parts(&self.store.snapshot(), self.sync_status())
    }

    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&GameView) + Send + Sync + 'static,
    {
        self.shared.observers.subscribe(listener)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.shared.observers.unsubscribe(id)
    }

    pub fn sign_in(&self, session: Session) {
        info!(user_id = %session.user_id, "Session started");
        *self.session.write() = Some(session);
    }

    /// Drop the session; the local game stays, unlinked from any remote id.
    pub fn sign_out(&self) {
        *self.session.write() = None;
        self.update_tracker(|t| {
            t.state.current_game_id = None;
            t.state.sync_status = SyncStatus::Local;
            t.state.last_error = None;
        });
        info!("Session ended");
    }

    pub async fn create_game(&self, names: &[String]) -> Result<(), AppError> {
        let commit = self.store.create_game(names)?;

        match self.policy() {
            ReplicationPolicy::Mirrored { user_id } => {
                let game_id = GameId::generate();
                self.update_tracker(|t| t.state.current_game_id = Some(game_id.clone()));
                let _ = self.push(&user_id, &game_id, commit).await;
            }
            ReplicationPolicy::LocalOnly => {
                self.update_tracker(|t| {
                    t.state.current_game_id = None;
                    t.state.sync_status = SyncStatus::Local;
                });
            }
        }
        Ok(())
    }

    pub async fn add_round(
        &self,
        scores: &[i32],
        dutch_player_id: Option<&PlayerId>,
    ) -> Result<(), AppError> {
        let commit = self.store.add_round(scores, dutch_player_id)?;
        self.mirror(commit).await;
        Ok(())
    }

    pub async fn undo_last_round(&self) -> Result<(), AppError> {
        let commit = self.store.undo_last_round()?;
        self.mirror(commit).await;
        Ok(())
    }

    /// Local reset; the remote copy is left as it is.
    pub fn reset_game(&self) -> Result<(), AppError> {
        self.store.reset_game()?;
        self.update_tracker(|t| {
            t.state.current_game_id = None;
            t.state.sync_status = SyncStatus::Local;
            t.state.last_error = None;
        });
        Ok(())
    }

    /// Upload the current local-only game and link it to a new remote id.
    pub async fn migrate_local_to_cloud(&self) -> Result<GameId, AppError> {
        let user_id = self.require_user()?;
        let state = self.store.snapshot();
        if !state.has_game() {
            return Err(DomainError::state(StateKind::NoActiveGame, "nothing to migrate").into());
        }

        let game_id = GameId::generate();
        let commit = StoreCommit {
            revision: self.store.revision(),
            state,
        };
        self.push(&user_id, &game_id, commit).await?;

        self.update_tracker(|t| t.state.current_game_id = Some(game_id.clone()));
        info!(game_id = %game_id, "Local game migrated to remote store");
        Ok(game_id)
    }

    /// Replace the local game with the remote snapshot `game_id`.
    pub async fn load_game_from_cloud(&self, game_id: &GameId) -> Result<(), AppError> {
        self.require_user()?;

        let previous = self.sync_status();
        self.update_tracker(|t| t.state.sync_status = SyncStatus::Syncing);

        let document = match self.remote.load_game(game_id).await {
            Ok(Some(document)) => document,
            Ok(None) => {
                self.update_tracker(|t| t.state.sync_status = previous);
                return Err(DomainError::not_found(
                    NotFoundKind::Game,
                    format!("remote game {game_id} does not exist"),
                )
                .into());
            }
            Err(err) => {
                warn!(game_id = %game_id, error = %err, "Remote load failed");
                self.update_tracker(|t| {
                    t.state.sync_status = SyncStatus::Error;
                    t.state.last_error = Some(err.to_string());
                });
                return Err(err);
            }
        };

        let remote = document.state;
        let created = match self
            .store
            .create_game_with_limit(&remote.player_names(), remote.score_limit)
        {
            Ok(commit) => commit,
            Err(err) => {
                self.update_tracker(|t| t.state.sync_status = previous);
                return Err(err);
            }
        };

        let mut overlay = created.state;
        overlay.players = remote.players;
        overlay.round_history = remote.round_history;
        overlay.score_limit = remote.score_limit;
        overlay.is_game_over = remote.is_game_over;
        overlay.game_start_time = remote.game_start_time.or(overlay.game_start_time);
        overlay.last_integrity_check = remote.last_integrity_check;
        let commit = self.store.replace_with(overlay)?;

        self.update_tracker(|t| {
            t.state.current_game_id = Some(game_id.clone());
            t.state.sync_status = SyncStatus::Synced;
            t.state.last_sync = Some(OffsetDateTime::now_utc());
            t.state.last_error = None;
            t.latest_started = commit.revision;
            t.latest_applied = commit.revision;
        });
        info!(game_id = %game_id, rounds = commit.state.round_history.len(), "Game loaded from remote store");
        Ok(())
    }

    /// Push the current state again; migrates first if the game is not linked yet.
    pub async fn retry_sync(&self) -> Result<(), AppError> {
        let user_id = self.require_user()?;
        let linked = self.shared.tracker.lock().state.current_game_id.clone();
        match linked {
            Some(game_id) => {
                let commit = StoreCommit {
                    revision: self.store.revision(),
                    state: self.store.snapshot(),
                };
                self.push(&user_id, &game_id, commit).await
            }
            None => self.migrate_local_to_cloud().await.map(|_| ()),
        }
    }

    pub async fn list_user_games(&self) -> Result<Vec<GameDocument>, AppError> {
        let user_id = self.require_user()?;
        self.remote.list_user_games(&user_id).await
    }

    fn require_user(&self) -> Result<UserId, AppError> {
        match self.policy() {
            ReplicationPolicy::Mirrored { user_id } => Ok(user_id),
            ReplicationPolicy::LocalOnly => Err(AppError::NotAuthenticated),
        }
    }

    /// Mirror a committed mutation when the game is linked and a session exists.
    async fn mirror(&self, commit: StoreCommit) {
        let ReplicationPolicy::Mirrored { user_id } = self.policy() else {
            return;
        };
        let linked = self.shared.tracker.lock().state.current_game_id.clone();
        let Some(game_id) = linked else {
            debug!("Game not linked to a remote id; staying local");
            return;
        };
        let _ = self.push(&user_id, &game_id, commit).await;
    }

    /// Write one revision to the remote store and settle the status.
    ///
    /// Completions older than one already applied do not touch the status.
    async fn push(
        &self,
        user_id: &UserId,
        game_id: &GameId,
        commit: StoreCommit,
    ) -> Result<(), AppError> {
        let revision = commit.revision;
        self.update_tracker(|t| {
            t.latest_started = t.latest_started.max(revision);
            t.state.sync_status = SyncStatus::Syncing;
        });

        let document = GameDocument {
            id: game_id.clone(),
            owner_id: user_id.clone(),
            revision,
            state: commit.state,
            updated_at: OffsetDateTime::now_utc(),
        };

        let outcome = match self.remote.save_game(game_id, &document).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(AppError::sync_rejected(format!(
                "remote store declined game {game_id}"
            ))),
            Err(err) => Err(err),
        };

        let mut changed = false;
        {
            let mut tracker = self.shared.tracker.lock();
            if revision < tracker.latest_applied {
                debug!(revision, applied = tracker.latest_applied, "Stale remote completion ignored");
            } else {
                tracker.latest_applied = revision;
                changed = true;
                match &outcome {
                    Ok(()) => {
                        tracker.state.last_sync = Some(OffsetDateTime::now_utc());
                        tracker.state.last_error = None;
                        tracker.state.sync_status = if revision < tracker.latest_started {
                            SyncStatus::Syncing
                        } else {
                            SyncStatus::Synced
                        };
                    }
                    Err(err) => {
                        tracker.state.sync_status = SyncStatus::Error;
                        tracker.state.last_error = Some(err.to_string());
                    }
                }
            }
        }
        if changed {
            self.shared.publish(&self.store.snapshot());
        }

        match &outcome {
            Ok(()) => debug!(game_id = %game_id, revision, "Remote write complete"),
            Err(err) => warn!(game_id = %game_id, revision, error = %err, "Remote write failed"),
        }
        outcome
    }

    fn update_tracker<F>(&self, f: F)
    where
        F: FnOnce(&mut SyncTracker),
    {
        let changed = {
            let mut tracker = self.shared.tracker.lock();
            let before = tracker.state.clone();
            f(&mut *tracker);
            tracker.state != before
        };
        if changed {
            self.shared.publish(&self.store.snapshot());
        }
    }
}

impl Drop for SyncCoordinator {
    fn drop(&mut self) {
        self.store.unsubscribe(self.store_subscription);
    }
}
