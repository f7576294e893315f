use async_trait::async_trait;
use chrono::{DateTime, Utc};
use quiz_core::model::PreferenceKey;
use sqlx::Row;

use crate::repository::{PreferenceRecord, PreferenceRepository, StorageError};

use super::SqliteRepository;

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

fn conn<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

#[async_trait]
impl PreferenceRepository for SqliteRepository {
    async fn get_preference(
        &self,
        key: PreferenceKey,
    ) -> Result<Option<PreferenceRecord>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT value, updated_at
            FROM preferences
            WHERE key = ?1
            ",
        )
        .bind(key.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let value: String = row.try_get("value").map_err(ser)?;
        let updated_at: DateTime<Utc> = row.try_get("updated_at").map_err(ser)?;
        Ok(Some(PreferenceRecord {
            key,
            value,
            updated_at,
        }))
    }

    async fn set_preference(&self, record: &PreferenceRecord) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO preferences (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            ",
        )
        .bind(record.key.as_str())
        .bind(&record.value)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        Ok(())
    }

    async fn clear_preference(&self, key: PreferenceKey) -> Result<(), StorageError> {
        let result = sqlx::query("DELETE FROM preferences WHERE key = ?1")
            .bind(key.as_str())
            .execute(&self.pool)
            .await
            .map_err(conn)?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }
}
