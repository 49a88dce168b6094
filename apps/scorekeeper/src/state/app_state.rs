//! Composition root: wires slot, store, remote store and coordinator.

use std::sync::Arc;

use tracing::info;

use crate::adapters::{FileSlot, InMemoryRemoteStore};
use crate::config::StoreConfig;
use crate::error::AppError;
use crate::repos::game_slot::GameSlot;
use crate::repos::remote_games::RemoteGameStore;
use crate::services::sync::SyncCoordinator;
use crate::state::game_store::GameStore;
use crate::state::integrity_sweep::IntegritySweep;

/// Application state shared by every caller.
pub struct AppState {
    config: StoreConfig,
    store: Arc<GameStore>,
    sync: Arc<SyncCoordinator>,
}

impl AppState {
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<GameStore> {
        &self.store
    }

    pub fn sync(&self) -> &Arc<SyncCoordinator> {
        &self.sync
    }

    /// Start the background sweep with the configured period.
    pub fn start_integrity_sweep(&self) -> IntegritySweep {
        IntegritySweep::spawn(Arc::clone(&self.store), self.config.integrity_interval)
    }
}

/// Builder for creating AppState instances (used in both tests and binaries)
pub struct StateBuilder {
    config: StoreConfig,
    slot: Option<Arc<dyn GameSlot>>,
    remote: Option<Arc<dyn RemoteGameStore>>,
    restore: bool,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            config: StoreConfig::default(),
            slot: None,
            remote: None,
            restore: true,
        }
    }

    pub fn with_config(mut self, config: StoreConfig) -> Self {
        self.config = config;
        self
    }

    /// Use this slot instead of a file at `config.storage_path`.
    pub fn with_slot(mut self, slot: Arc<dyn GameSlot>) -> Self {
        self.slot = Some(slot);
        self
    }

    pub fn with_remote(mut self, remote: Arc<dyn RemoteGameStore>) -> Self {
        self.remote = Some(remote);
        self
    }

    /// Skip restoring the persisted game during `build`.
    pub fn without_restore(mut self) -> Self {
        self.restore = false;
        self
    }

    pub fn build(self) -> Result<AppState, AppError> {
        let slot = self
            .slot
            .unwrap_or_else(|| Arc::new(FileSlot::new(self.config.storage_path.clone())));
        let remote = self
            .remote
            .unwrap_or_else(|| Arc::new(InMemoryRemoteStore::new()));

        let store = Arc::new(GameStore::new(slot, self.config.score_limit));
        if self.restore {
            let restored = store.load_from_storage()?;
            info!(restored, "Local game store ready");
        }
        let sync = Arc::new(SyncCoordinator::new(Arc::clone(&store), remote));

        Ok(AppState {
            config: self.config,
            store,
            sync,
        })
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
