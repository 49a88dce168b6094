use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;

use crate::auth::UserId;
use crate::error::AppError;
use crate::repos::remote_games::{GameDocument, GameId, RemoteGameStore};

/// In-process remote store with switchable failure modes.
#[derive(Debug, Default)]
pub struct InMemoryRemoteStore {
    games: DashMap<GameId, GameDocument>,
    failing: AtomicBool,
    rejecting: AtomicBool,
    saves: AtomicUsize,
}

impl InMemoryRemoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call fails with a sync error while set.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Saves answer `false` while set.
    pub fn set_rejecting(&self, rejecting: bool) {
        self.rejecting.store(rejecting, Ordering::SeqCst);
    }

    /// Number of accepted saves.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn get(&self, game_id: &GameId) -> Option<GameDocument> {
        self.games.get(game_id).map(|doc| doc.value().clone())
    }

    pub fn insert(&self, document: GameDocument) {
        self.games.insert(document.id.clone(), document);
    }

    fn check_available(&self) -> Result<(), AppError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::sync("remote store unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl RemoteGameStore for InMemoryRemoteStore {
    async fn save_game(
        &self,
        game_id: &GameId,
        document: &GameDocument,
    ) -> Result<bool, AppError> {
        self.check_available()?;
        if self.rejecting.load(Ordering::SeqCst) {
            return Ok(false);
        }
        self.games.insert(game_id.clone(), document.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(true)
    }

    async fn load_game(&self, game_id: &GameId) -> Result<Option<GameDocument>, AppError> {
        self.check_available()?;
        Ok(self.get(game_id))
    }

    async fn list_user_games(&self, user_id: &UserId) -> Result<Vec<GameDocument>, AppError> {
        self.check_available()?;
        let mut games: Vec<GameDocument> = self
            .games
            .iter()
            .filter(|entry| &entry.value().owner_id == user_id)
            .map(|entry| entry.value().clone())
            .collect();
        games.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(games)
    }
}
