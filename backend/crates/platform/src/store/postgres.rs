//! PostgreSQL Document Store
//!
//! All collections share one `documents` table keyed by
//! `(collection, id)` with a JSONB body. See
//! `database/migrations/*_create_documents.sql`.

use std::future::Future;
use std::time::Duration;

use serde_json::{Map, Value};
use sqlx::PgPool;
use uuid::Uuid;

use super::{DocumentStore, StoreConfig, StoreError, StoreResult};

/// PostgreSQL-backed store
#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
    timeout: Duration,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool, config: &StoreConfig) -> Self {
        Self {
            pool,
            timeout: config.timeout,
        }
    }

    /// Run one statement under the store deadline
    ///
    /// A statement that is dropped mid-flight is rolled back by Postgres,
    /// so a timeout never leaves a partial write.
    async fn bounded<T, F>(&self, operation: &'static str, query: F) -> StoreResult<T>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        match tokio::time::timeout(self.timeout, query).await {
            Ok(result) => result.map_err(StoreError::from),
            Err(_) => {
                tracing::warn!(operation, timeout = ?self.timeout, "Store call timed out");
                Err(StoreError::Timeout(self.timeout))
            }
        }
    }
}

impl DocumentStore for PgDocumentStore {
    async fn insert(&self, collection: &str, id: Uuid, body: Value) -> StoreResult<()> {
        let inserted = self
            .bounded(
                "insert",
                sqlx::query(
                    r#"
                    INSERT INTO documents (collection, id, body)
                    VALUES ($1, $2, $3)
                    ON CONFLICT (collection, id) DO NOTHING
                    "#,
                )
                .bind(collection)
                .bind(id)
                .bind(&body)
                .execute(&self.pool),
            )
            .await?
            .rows_affected();

        if inserted == 0 {
            return Err(StoreError::Duplicate(id));
        }

        tracing::debug!(collection, id = %id, "Document inserted");
        Ok(())
    }

    async fn find_by_id(&self, collection: &str, id: Uuid) -> StoreResult<Option<Value>> {
        self.bounded(
            "find_by_id",
            sqlx::query_scalar::<_, Value>(
                "SELECT body FROM documents WHERE collection = $1 AND id = $2",
            )
            .bind(collection)
            .bind(id)
            .fetch_optional(&self.pool),
        )
        .await
    }

    async fn find_one_by(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> StoreResult<Option<Value>> {
        self.bounded(
            "find_one_by",
            sqlx::query_scalar::<_, Value>(
                r#"
                SELECT body FROM documents
                WHERE collection = $1 AND body ->> $2 = $3
                ORDER BY inserted_at, id
                LIMIT 1
                "#,
            )
            .bind(collection)
            .bind(field)
            .bind(value)
            .fetch_optional(&self.pool),
        )
        .await
    }

    async fn find_all(&self, collection: &str) -> StoreResult<Vec<Value>> {
        self.bounded(
            "find_all",
            sqlx::query_scalar::<_, Value>(
                "SELECT body FROM documents WHERE collection = $1 ORDER BY inserted_at, id",
            )
            .bind(collection)
            .fetch_all(&self.pool),
        )
        .await
    }

    async fn update(
        &self,
        collection: &str,
        id: Uuid,
        patch: Map<String, Value>,
    ) -> StoreResult<Option<Value>> {
        let patch = Value::Object(patch);

        // `||` on two JSONB objects is a shallow merge, right side wins
        let updated = self
            .bounded(
                "update",
                sqlx::query_scalar::<_, Value>(
                    r#"
                    UPDATE documents
                    SET body = body || ($3::jsonb - '_id')
                    WHERE collection = $1 AND id = $2
                    RETURNING body
                    "#,
                )
                .bind(collection)
                .bind(id)
                .bind(&patch)
                .fetch_optional(&self.pool),
            )
            .await?;

        if updated.is_some() {
            tracing::debug!(collection, id = %id, "Document updated");
        }
        Ok(updated)
    }

    async fn delete(&self, collection: &str, id: Uuid) -> StoreResult<u64> {
        let deleted = self
            .bounded(
                "delete",
                sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
                    .bind(collection)
                    .bind(id)
                    .execute(&self.pool),
            )
            .await?
            .rows_affected();

        tracing::debug!(collection, id = %id, deleted, "Document deleted");
        Ok(deleted)
    }
}
