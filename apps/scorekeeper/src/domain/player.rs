use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::rules::{color_for_index, emoji_for_index};

/// Opaque player identifier, stable for the lifetime of a game.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Deterministic id for the player seated at `index` (0-based).
    pub fn for_seat(index: usize) -> Self {
        Self(format!("player-{}", index + 1))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One scoring entry for a single player in a single turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Round {
    pub score: i32,
    #[serde(default)]
    pub is_dutch: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub emoji: String,
    pub color: String,
    #[serde(default)]
    pub total_score: i32,
    /// Append-only; rounds are only pushed or popped from the tail.
    #[serde(default)]
    pub rounds: Vec<Round>,
}

impl Player {
    /// Fresh player for roster position `index`: zero score, no rounds.
    pub fn seated(index: usize, name: impl Into<String>) -> Self {
        Self {
            id: PlayerId::for_seat(index),
            name: name.into(),
            emoji: emoji_for_index(index).to_string(),
            color: color_for_index(index).to_string(),
            total_score: 0,
            rounds: Vec::new(),
        }
    }

    pub fn last_round(&self) -> Option<&Round> {
        self.rounds.last()
    }
}

/// Index of the player with `id`, if present.
pub fn position_of(players: &[Player], id: &PlayerId) -> Option<usize> {
    players.iter().position(|p| &p.id == id)
}
