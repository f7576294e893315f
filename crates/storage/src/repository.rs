use async_trait::async_trait;
use chrono::{DateTime, Utc};
use quiz_core::model::PreferenceKey;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Persisted shape for one preference flag.
///
/// Values are stored as their canonical string form (`"dark"`, `"fr"`), so
/// an unknown value written by another version can be detected and ignored
/// by the caller instead of failing the read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferenceRecord {
    pub key: PreferenceKey,
    pub value: String,
    pub updated_at: DateTime<Utc>,
}

/// Key-value store for the theme and language flags.
#[async_trait]
pub trait PreferenceRepository: Send + Sync {
    /// Fetch a stored preference.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read. A missing key is
    /// `Ok(None)`.
    async fn get_preference(&self, key: PreferenceKey)
    -> Result<Option<PreferenceRecord>, StorageError>;

    /// Insert or overwrite a preference.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be stored.
    async fn set_preference(&self, record: &PreferenceRecord) -> Result<(), StorageError>;

    /// Remove a preference so the next read falls back to defaults.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if nothing was stored under `key`.
    async fn clear_preference(&self, key: PreferenceKey) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    preferences: Arc<Mutex<HashMap<PreferenceKey, PreferenceRecord>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            preferences: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl PreferenceRepository for InMemoryRepository {
    async fn get_preference(
        &self,
        key: PreferenceKey,
    ) -> Result<Option<PreferenceRecord>, StorageError> {
        let guard = self
            .preferences
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(&key).cloned())
    }

    async fn set_preference(&self, record: &PreferenceRecord) -> Result<(), StorageError> {
        let mut guard = self
            .preferences
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(record.key, record.clone());
        Ok(())
    }

    async fn clear_preference(&self, key: PreferenceKey) -> Result<(), StorageError> {
        let mut guard = self
            .preferences
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.remove(&key).map(|_| ()).ok_or(StorageError::NotFound)
    }
}

/// Aggregates repositories for injection into services.
#[derive(Clone)]
pub struct Storage {
    pub preferences: Arc<dyn PreferenceRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let preferences: Arc<dyn PreferenceRepository> = Arc::new(InMemoryRepository::new());
        Self { preferences }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::time::fixed_now;

    fn record(key: PreferenceKey, value: &str) -> PreferenceRecord {
        PreferenceRecord {
            key,
            value: value.to_string(),
            updated_at: fixed_now(),
        }
    }

    #[tokio::test]
    async fn in_memory_set_then_get() {
        let repo = InMemoryRepository::new();
        assert!(repo.get_preference(PreferenceKey::Theme).await.unwrap().is_none());

        repo.set_preference(&record(PreferenceKey::Theme, "dark"))
            .await
            .unwrap();
        repo.set_preference(&record(PreferenceKey::Language, "de"))
            .await
            .unwrap();

        let theme = repo.get_preference(PreferenceKey::Theme).await.unwrap();
        assert_eq!(theme.unwrap().value, "dark");
        let language = repo.get_preference(PreferenceKey::Language).await.unwrap();
        assert_eq!(language.unwrap().value, "de");
    }

    #[tokio::test]
    async fn in_memory_overwrites_and_clears() {
        let storage = Storage::in_memory();
        storage
            .preferences
            .set_preference(&record(PreferenceKey::Theme, "dark"))
            .await
            .unwrap();
        storage
            .preferences
            .set_preference(&record(PreferenceKey::Theme, "light"))
            .await
            .unwrap();

        let theme = storage
            .preferences
            .get_preference(PreferenceKey::Theme)
            .await
            .unwrap();
        assert_eq!(theme.unwrap().value, "light");

        storage
            .preferences
            .clear_preference(PreferenceKey::Theme)
            .await
            .unwrap();
        let err = storage
            .preferences
            .clear_preference(PreferenceKey::Theme)
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::NotFound));
    }
}
