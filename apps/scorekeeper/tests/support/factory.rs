use std::sync::Arc;

use scorekeeper::adapters::{InMemoryRemoteStore, MemorySlot};
use scorekeeper::repos::remote_games::RemoteGameStore;
use scorekeeper::{build_state, AppState, GameState};

pub fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

pub fn totals(state: &GameState) -> Vec<i32> {
    state.players.iter().map(|p| p.total_score).collect()
}

/// App wired to in-memory slot and remote store.
pub struct TestApp {
    pub slot: Arc<MemorySlot>,
    pub remote: Arc<InMemoryRemoteStore>,
    pub state: AppState,
}

pub fn build_test_app() -> TestApp {
    let slot = Arc::new(MemorySlot::new());
    let remote = Arc::new(InMemoryRemoteStore::new());
    build_test_app_with(slot, remote)
}

pub fn build_test_app_with(slot: Arc<MemorySlot>, remote: Arc<InMemoryRemoteStore>) -> TestApp {
    let state = build_state()
        .with_slot(slot.clone())
        .with_remote(remote.clone() as Arc<dyn RemoteGameStore>)
        .build()
        .expect("in-memory app state should build");
    TestApp {
        slot,
        remote,
        state,
    }
}
