use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::player::{Player, PlayerId};
use crate::domain::rules::DEFAULT_SCORE_LIMIT;

/// Position-aligned scores for one turn, plus who declared Dutch (if anyone).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundHistoryEntry {
    pub scores: Vec<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dutch_player_id: Option<PlayerId>,
}

/// The whole game, exactly as it is persisted in the local slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    #[serde(default)]
    pub players: Vec<Player>,
    /// Canonical replay log.
    #[serde(default)]
    pub round_history: Vec<RoundHistoryEntry>,
    #[serde(default = "default_score_limit")]
    pub score_limit: i32,
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub game_start_time: Option<OffsetDateTime>,
    #[serde(default)]
    pub is_game_over: bool,
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_integrity_check: Option<OffsetDateTime>,
}

fn default_score_limit() -> i32 {
    DEFAULT_SCORE_LIMIT
}

impl GameState {
    /// Empty state: no roster, nothing played.
    pub fn empty(score_limit: i32) -> Self {
        Self {
            players: Vec::new(),
            round_history: Vec::new(),
            score_limit,
            game_start_time: None,
            is_game_over: false,
            last_integrity_check: None,
        }
    }

    /// A game exists once a roster has been seated.
    pub fn has_game(&self) -> bool {
        !self.players.is_empty()
    }

    /// A game is active while it has a roster and has not ended.
    pub fn is_active(&self) -> bool {
        self.has_game() && !self.is_game_over
    }

    pub fn rounds_played(&self) -> usize {
        self.round_history.len()
    }

    pub fn player_names(&self) -> Vec<String> {
        self.players.iter().map(|p| p.name.clone()).collect()
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::empty(DEFAULT_SCORE_LIMIT)
    }
}
