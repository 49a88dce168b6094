//! Concrete backends for the slot and remote-store seams in `repos`.

pub mod file_slot;
pub mod memory_remote;
pub mod memory_slot;

pub use file_slot::FileSlot;
pub use memory_remote::InMemoryRemoteStore;
pub use memory_slot::MemorySlot;
