//! Domain layer: pure scoring types, the ledger and the integrity auditor.

pub mod integrity;
pub mod ledger;
pub mod player;
pub mod rules;
pub mod state;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod tests_integrity;
#[cfg(test)]
mod tests_ledger;

// Re-exports for ergonomics
pub use integrity::{audit_game, audit_integrity, Correction, IntegrityIssue, IntegrityReport};
pub use ledger::{apply_round, is_game_over, reconcile, replay_history, reverse_last_round, Reconciled};
pub use player::{Player, PlayerId, Round};
pub use state::{GameState, RoundHistoryEntry};
