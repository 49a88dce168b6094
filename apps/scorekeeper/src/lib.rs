#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod auth;
pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod repos;
pub mod services;
pub mod state;
pub mod telemetry;


// Re-exports for public API
pub use auth::{Session, UserId};
pub use config::StoreConfig;
pub use domain::{GameState, IntegrityReport, Player, PlayerId, Round, RoundHistoryEntry};
pub use error::AppError;
pub use errors::ErrorCode;
pub use repos::remote_games::{GameDocument, GameId, RemoteGameStore};
pub use services::sync::{GameView, SyncCoordinator, SyncStatus};
pub use state::app_state::{build_state, AppState};
pub use state::game_store::GameStore;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
