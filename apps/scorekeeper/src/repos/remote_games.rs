//! Remote game store contract.
//!
//! Transport, auth and encoding are owned by the implementation. The core only
//! relies on request/response semantics and that calls may fail on their own.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::auth::UserId;
use crate::domain::state::GameState;
use crate::error::AppError;

/// Durable identifier of a game in the remote store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(String);

impl GameId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A game as stored remotely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameDocument {
    pub id: GameId,
    pub owner_id: UserId,
    /// Local mutation counter at the time of the write.
    pub revision: u64,
    pub state: GameState,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[async_trait]
pub trait RemoteGameStore: Send + Sync {
    /// Store `document` under `game_id`. `Ok(false)` means the store declined it.
    async fn save_game(&self, game_id: &GameId, document: &GameDocument)
        -> Result<bool, AppError>;

    async fn load_game(&self, game_id: &GameId) -> Result<Option<GameDocument>, AppError>;

    async fn list_user_games(&self, user_id: &UserId) -> Result<Vec<GameDocument>, AppError>;
}
