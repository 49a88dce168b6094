use thiserror::Error;

use crate::errors::domain::DomainError;
use crate::errors::ErrorCode;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Domain(#[from] DomainError),
    #[error("Not authenticated")]
    NotAuthenticated,
    #[error("Sync error: {detail}")]
    Sync { code: ErrorCode, detail: String },
    #[error("Storage error: {detail}")]
    Storage {
        code: ErrorCode,
        detail: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
}

impl AppError {
    /// Stable error code for any variant
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Domain(err) => ErrorCode::from(err),
            AppError::NotAuthenticated => ErrorCode::NotAuthenticated,
            AppError::Sync { code, .. } => *code,
            AppError::Storage { code, .. } => *code,
            AppError::Config { .. } => ErrorCode::ConfigError,
        }
    }

    /// The wrapped domain error, if this is one
    pub fn as_domain(&self) -> Option<&DomainError> {
        match self {
            AppError::Domain(err) => Some(err),
            _ => None,
        }
    }

    pub fn sync(detail: impl Into<String>) -> Self {
        Self::Sync {
            code: ErrorCode::SyncFailed,
            detail: detail.into(),
        }
    }

    pub fn sync_rejected(detail: impl Into<String>) -> Self {
        Self::Sync {
            code: ErrorCode::SyncRejected,
            detail: detail.into(),
        }
    }

    pub fn storage(
        detail: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Storage {
            code: ErrorCode::StorageError,
            detail: detail.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn corrupt_record(
        detail: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Storage {
            code: ErrorCode::CorruptRecord,
            detail: detail.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }
}
