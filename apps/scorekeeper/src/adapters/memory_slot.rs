use parking_lot::Mutex;

use crate::error::AppError;
use crate::repos::game_slot::GameSlot;

/// Process-local slot; used by tests and by callers that opt out of disk.
#[derive(Debug, Default)]
pub struct MemorySlot {
    payload: Mutex<Option<String>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            payload: Mutex::new(Some(payload.into())),
        }
    }

    /// Current payload, bypassing the store.
    pub fn raw(&self) -> Option<String> {
        self.payload.lock().clone()
    }

    /// Overwrite the payload behind the store's back, as a second writer would.
    pub fn overwrite(&self, payload: impl Into<String>) {
        *self.payload.lock() = Some(payload.into());
    }
}

impl GameSlot for MemorySlot {
    fn read(&self) -> Result<Option<String>, AppError> {
        Ok(self.payload.lock().clone())
    }

    fn write(&self, payload: &str) -> Result<(), AppError> {
        *self.payload.lock() = Some(payload.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), AppError> {
        self.payload.lock().take();
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
