//! File-backed slot.
//!
//! The record lives in a single JSON file. Every access takes an exclusive OS
//! lock on `<file>.lock`; writes go to `<file>.tmp` and are renamed into place
//! so readers never observe a half-written record.

use std::fs::{self, File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::AppError;
use crate::repos::game_slot::GameSlot;

#[derive(Debug, Clone)]
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(suffix);
        self.path.with_file_name(name)
    }

    /// Hold the exclusive lock until the returned file is dropped.
    fn lock(&self) -> Result<File, AppError> {
        use fs4::fs_std::FileExt;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| {
                AppError::storage(
                    format!("failed to create directory {}", parent.display()),
                    err,
                )
            })?;
        }

        let lock_path = self.sibling(".lock");
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .read(true)
            .write(true)
            .open(&lock_path)
            .map_err(|err| {
                AppError::storage(format!("failed to open {}", lock_path.display()), err)
            })?;

        file.lock_exclusive().map_err(|err| {
            AppError::storage(format!("failed to lock {}", lock_path.display()), err)
        })?;

        Ok(file)
    }
}

impl GameSlot for FileSlot {
    fn read(&self) -> Result<Option<String>, AppError> {
        let _guard = self.lock()?;
        match fs::read_to_string(&self.path) {
            Ok(payload) => Ok(Some(payload)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(AppError::storage(
                format!("failed to read {}", self.path.display()),
                err,
            )),
        }
    }

    fn write(&self, payload: &str) -> Result<(), AppError> {
        let _guard = self.lock()?;
        let tmp = self.sibling(".tmp");
        fs::write(&tmp, payload).map_err(|err| {
            AppError::storage(format!("failed to write {}", tmp.display()), err)
        })?;
        fs::rename(&tmp, &self.path).map_err(|err| {
            AppError::storage(format!("failed to replace {}", self.path.display()), err)
        })?;
        debug!(path = %self.path.display(), bytes = payload.len(), "Game slot written");
        Ok(())
    }

    fn clear(&self) -> Result<(), AppError> {
        let _guard = self.lock()?;
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(AppError::storage(
                format!("failed to remove {}", self.path.display()),
                err,
            )),
        }
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
