//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::memory::MemoryError;
use quiz_core::quiz::QuizError;
use storage::catalog::CatalogLoadError;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `PreferencesService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PreferencesServiceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `SessionController`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("a session is already running; restart first")]
    AlreadyRunning,
    #[error("question count must be > 0")]
    InvalidQuestionCount,
    #[error("time limit per question must be > 0")]
    InvalidTimeLimit,
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    Memory(#[from] MemoryError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Catalog(#[from] CatalogLoadError),
    #[error(transparent)]
    Preferences(#[from] PreferencesServiceError),
}
