pub mod sync;

pub use sync::{GameView, ReplicationPolicy, SyncCoordinator, SyncState, SyncStatus};
