pub mod app_state;
pub mod game_store;
pub mod integrity_sweep;
pub mod observers;

pub use app_state::{build_state, AppState, StateBuilder};
pub use game_store::{GameStore, StoreCommit};
pub use integrity_sweep::IntegritySweep;
pub use observers::{ObserverList, SubscriptionId};
