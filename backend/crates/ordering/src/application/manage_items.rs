//! Manage Items Use Case
//!
//! CRUD over the menu.

use std::sync::Arc;

use chrono::Utc;
use kernel::id::ItemId;
use platform::store::{DocumentStore, DocumentStoreExt};
use serde::Serialize;

use crate::domain::entities::Item;
use crate::domain::services::is_valid_price;
use crate::error::{OrderingError, OrderingResult};

/// Create item input
pub struct NewItem {
    pub item_name: String,
    pub item_description: String,
    pub item_type: String,
    pub item_img: String,
    pub item_price: f64,
    pub estimate_prepare_time: i64,
}

/// Partial item update; `None` fields are left unchanged
#[derive(Debug, Clone, Default, Serialize)]
pub struct ItemChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_img: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimate_prepare_time: Option<i64>,
}

#[derive(Serialize)]
struct ItemPatch {
    #[serde(flatten)]
    changes: ItemChanges,
    updated_at: i64,
}

pub struct ItemsUseCase<S>
where
    S: DocumentStore + Sync,
{
    store: Arc<S>,
}

impl<S> ItemsUseCase<S>
where
    S: DocumentStore + Sync,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn create(&self, input: NewItem) -> OrderingResult<ItemId> {
        if !is_valid_price(input.item_price) {
            return Err(OrderingError::InvalidPrice);
        }

        let item = Item::new(
            input.item_name,
            input.item_description,
            input.item_type,
            input.item_img,
            input.item_price,
            input.estimate_prepare_time,
        );
        self.store.collection::<Item>().insert(&item).await?;

        tracing::info!(id = %item.id, name = %item.item_name, "Menu item created");

        Ok(item.id)
    }

    pub async fn list(&self) -> OrderingResult<Vec<Item>> {
        Ok(self.store.collection::<Item>().find_all().await?)
    }

    pub async fn get(&self, id: ItemId) -> OrderingResult<Item> {
        self.store
            .collection::<Item>()
            .find_by_id(id.into_uuid())
            .await?
            .ok_or(OrderingError::ItemNotFound)
    }

    /// Orders placed earlier keep their own snapshot of the item.
    pub async fn update(&self, id: ItemId, changes: ItemChanges) -> OrderingResult<Item> {
        if changes.item_price.is_some_and(|price| !is_valid_price(price)) {
            return Err(OrderingError::InvalidPrice);
        }

        let patch = ItemPatch {
            changes,
            updated_at: Utc::now().timestamp(),
        };

        let item = self
            .store
            .collection::<Item>()
            .update(id.into_uuid(), &patch)
            .await?
            .ok_or(OrderingError::ItemNotFound)?;

        tracing::info!(id = %id, "Menu item updated");

        Ok(item)
    }

    pub async fn delete(&self, id: ItemId) -> OrderingResult<u64> {
        let deleted = self.store.collection::<Item>().delete(id.into_uuid()).await?;
        if deleted == 0 {
            return Err(OrderingError::ItemNotFound);
        }

        tracing::info!(id = %id, "Menu item deleted");

        Ok(deleted)
    }
}
