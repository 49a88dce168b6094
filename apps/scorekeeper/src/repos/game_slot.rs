//! Persisted local slot: one named document holding the current game.

use tracing::debug;

use crate::domain::state::GameState;
use crate::error::AppError;

/// Raw storage for the single persisted game document.
///
/// Implementations only move bytes; (de)serialization lives in the free
/// functions below so every backend shares the same record format.
pub trait GameSlot: Send + Sync {
    /// Stored payload, or `None` when the slot is empty.
    fn read(&self) -> Result<Option<String>, AppError>;

    /// Replace the stored payload.
    fn write(&self, payload: &str) -> Result<(), AppError>;

    /// Remove the stored payload; clearing an empty slot is not an error.
    fn clear(&self) -> Result<(), AppError>;

    /// Human-readable location for logs.
    fn describe(&self) -> String;
}

/// Load the persisted game.
///
/// An empty slot and a record without players both mean "no active game".
/// A payload that is not a valid record is reported as `CorruptRecord`.
pub fn load_state(slot: &dyn GameSlot) -> Result<Option<GameState>, AppError> {
    let Some(payload) = slot.read()? else {
        return Ok(None);
    };

    let state: GameState = serde_json::from_str(&payload).map_err(|err| {
        AppError::corrupt_record(
            format!("persisted game in {} is not a valid record", slot.describe()),
            err,
        )
    })?;

    if !state.has_game() {
        debug!(slot = %slot.describe(), "Persisted game has no players; treating as absent");
        return Ok(None);
    }

    Ok(Some(state))
}

pub fn save_state(slot: &dyn GameSlot, state: &GameState) -> Result<(), AppError> {
    let payload = serde_json::to_string(state).map_err(|err| {
        AppError::storage("failed to serialize game state", err)
    })?;
    slot.write(&payload)
}

pub fn clear_state(slot: &dyn GameSlot) -> Result<(), AppError> {
    slot.clear()
}
