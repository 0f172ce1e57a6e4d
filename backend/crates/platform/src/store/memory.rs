//! In-memory document store for tests and local runs

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde_json::{Map, Value};
use uuid::Uuid;

use super::{DocumentStore, StoreError, StoreResult, merge_fields};

type Collections = HashMap<String, Vec<(Uuid, Value)>>;

/// Process-local store; clones share the same data
#[derive(Debug, Clone, Default)]
pub struct MemoryDocumentStore {
    collections: Arc<RwLock<Collections>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    // A poisoned lock only means a panicking test thread; the map itself is intact.
    fn read(&self) -> RwLockReadGuard<'_, Collections> {
        self.collections
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Collections> {
        self.collections
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl DocumentStore for MemoryDocumentStore {
    async fn insert(&self, collection: &str, id: Uuid, body: Value) -> StoreResult<()> {
        let mut collections = self.write();
        let documents = collections.entry(collection.to_string()).or_default();

        if documents.iter().any(|(existing, _)| *existing == id) {
            return Err(StoreError::Duplicate(id));
        }
        documents.push((id, body));
        Ok(())
    }

    async fn find_by_id(&self, collection: &str, id: Uuid) -> StoreResult<Option<Value>> {
        Ok(self.read().get(collection).and_then(|documents| {
            documents
                .iter()
                .find(|(existing, _)| *existing == id)
                .map(|(_, body)| body.clone())
        }))
    }

    async fn find_one_by(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> StoreResult<Option<Value>> {
        Ok(self.read().get(collection).and_then(|documents| {
            documents
                .iter()
                .find(|(_, body)| body.get(field).and_then(Value::as_str) == Some(value))
                .map(|(_, body)| body.clone())
        }))
    }

    async fn find_all(&self, collection: &str) -> StoreResult<Vec<Value>> {
        Ok(self
            .read()
            .get(collection)
            .map(|documents| documents.iter().map(|(_, body)| body.clone()).collect())
            .unwrap_or_default())
    }

    async fn update(
        &self,
        collection: &str,
        id: Uuid,
        patch: Map<String, Value>,
    ) -> StoreResult<Option<Value>> {
        let mut collections = self.write();
        let Some(documents) = collections.get_mut(collection) else {
            return Ok(None);
        };
        let Some((_, body)) = documents.iter_mut().find(|(existing, _)| *existing == id) else {
            return Ok(None);
        };

        merge_fields(body, patch);
        Ok(Some(body.clone()))
    }

    async fn delete(&self, collection: &str, id: Uuid) -> StoreResult<u64> {
        let mut collections = self.write();
        let Some(documents) = collections.get_mut(collection) else {
            return Ok(0);
        };

        let before = documents.len();
        documents.retain(|(existing, _)| *existing != id);
        Ok((before - documents.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_insert_rejects_duplicate_id() {
        let store = MemoryDocumentStore::new();
        let id = Uuid::new_v4();

        store.insert("items", id, json!({"_id": id})).await.unwrap();
        let err = store
            .insert("items", id, json!({"_id": id}))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(dup) if dup == id));
    }

    #[tokio::test]
    async fn test_find_all_keeps_insertion_order() {
        let store = MemoryDocumentStore::new();
        for n in 0..3 {
            store
                .insert("orders", Uuid::new_v4(), json!({"table_id": n}))
                .await
                .unwrap();
        }

        let tables: Vec<_> = store
            .find_all("orders")
            .await
            .unwrap()
            .iter()
            .map(|doc| doc["table_id"].as_i64().unwrap())
            .collect();
        assert_eq!(tables, vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn test_update_merges_fields() {
        let store = MemoryDocumentStore::new();
        let id = Uuid::new_v4();
        store
            .insert("items", id, json!({"_id": id, "item_name": "tea", "item_price": 2.0}))
            .await
            .unwrap();

        let Value::Object(patch) = json!({"item_price": 2.5}) else {
            unreachable!()
        };
        let updated = store.update("items", id, patch).await.unwrap().unwrap();

        assert_eq!(updated["item_name"], "tea");
        assert_eq!(updated["item_price"], 2.5);
    }

    #[tokio::test]
    async fn test_update_unknown_id_returns_none() {
        let store = MemoryDocumentStore::new();
        store
            .insert("items", Uuid::new_v4(), json!({}))
            .await
            .unwrap();

        assert!(
            store
                .update("items", Uuid::new_v4(), Map::new())
                .await
                .unwrap()
                .is_none()
        );
        assert!(
            store
                .update("missing", Uuid::new_v4(), Map::new())
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_clones_share_data() {
        let store = MemoryDocumentStore::new();
        let other = store.clone();
        let id = Uuid::new_v4();

        store.insert("guests", id, json!({"email": "a@b.c"})).await.unwrap();
        assert!(other.find_one_by("guests", "email", "a@b.c").await.unwrap().is_some());
        assert_eq!(other.delete("guests", id).await.unwrap(), 1);
        assert!(store.find_by_id("guests", id).await.unwrap().is_none());
    }
}
