//! Manage Orders Use Case
//!
//! CRUD over table orders. `total_price` is never taken from the client:
//! it is computed on create and recomputed whenever the items change.

use std::sync::Arc;

use chrono::Utc;
use kernel::id::{GuestUserId, OrderId, StaffUserId};
use platform::store::{DocumentStore, DocumentStoreExt};
use serde::Serialize;

use crate::domain::entities::{ItemSnapshot, Order};
use crate::domain::services::checked_total_price;
use crate::error::{OrderingError, OrderingResult};

/// Create order input
pub struct NewOrder {
    pub table_id: i32,
    pub staff_user_id: Option<StaffUserId>,
    pub guest_user_id: Option<GuestUserId>,
    pub items: Vec<ItemSnapshot>,
}

/// Partial order update; `None` fields are left unchanged
#[derive(Debug, Clone, Default, Serialize)]
pub struct OrderChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub staff_user_id: Option<StaffUserId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_user_id: Option<GuestUserId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<ItemSnapshot>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ready_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivered_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payed_at: Option<i64>,
}

#[derive(Serialize)]
struct OrderPatch {
    #[serde(flatten)]
    changes: OrderChanges,
    #[serde(skip_serializing_if = "Option::is_none")]
    total_price: Option<f64>,
    updated_at: i64,
}

pub struct OrdersUseCase<S>
where
    S: DocumentStore + Sync,
{
    store: Arc<S>,
}

impl<S> OrdersUseCase<S>
where
    S: DocumentStore + Sync,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn create(&self, input: NewOrder) -> OrderingResult<OrderId> {
        checked_total_price(&input.items).ok_or(OrderingError::InvalidPrice)?;

        let order = Order::new(
            input.table_id,
            input.staff_user_id,
            input.guest_user_id,
            input.items,
        );
        self.store.collection::<Order>().insert(&order).await?;

        tracing::info!(
            id = %order.id,
            table_id = order.table_id,
            items = order.items.len(),
            total_price = order.total_price,
            "Order created"
        );

        Ok(order.id)
    }

    pub async fn list(&self) -> OrderingResult<Vec<Order>> {
        Ok(self.store.collection::<Order>().find_all().await?)
    }

    pub async fn get(&self, id: OrderId) -> OrderingResult<Order> {
        self.store
            .collection::<Order>()
            .find_by_id(id.into_uuid())
            .await?
            .ok_or(OrderingError::OrderNotFound)
    }

    pub async fn update(&self, id: OrderId, changes: OrderChanges) -> OrderingResult<Order> {
        let total_price = changes
            .items
            .as_deref()
            .map(|items| checked_total_price(items).ok_or(OrderingError::InvalidPrice))
            .transpose()?;

        let patch = OrderPatch {
            total_price,
            changes,
            updated_at: Utc::now().timestamp(),
        };

        let order = self
            .store
            .collection::<Order>()
            .update(id.into_uuid(), &patch)
            .await?
            .ok_or(OrderingError::OrderNotFound)?;

        tracing::info!(id = %id, total_price = order.total_price, "Order updated");

        Ok(order)
    }

    pub async fn delete(&self, id: OrderId) -> OrderingResult<u64> {
        let deleted = self.store.collection::<Order>().delete(id.into_uuid()).await?;
        if deleted == 0 {
            return Err(OrderingError::OrderNotFound);
        }

        tracing::info!(id = %id, "Order deleted");

        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::store::MemoryDocumentStore;

    fn use_case() -> OrdersUseCase<MemoryDocumentStore> {
        OrdersUseCase::new(Arc::new(MemoryDocumentStore::new()))
    }

    fn dish(name: &str, price: f64) -> ItemSnapshot {
        ItemSnapshot {
            id: None,
            item_name: name.into(),
            item_description: String::new(),
            item_type: String::new(),
            item_img: String::new(),
            item_price: price,
            estimate_prepare_time: 10,
        }
    }

    fn new_order(items: Vec<ItemSnapshot>) -> NewOrder {
        NewOrder {
            table_id: 7,
            staff_user_id: Some(StaffUserId::new()),
            guest_user_id: None,
            items,
        }
    }

    #[tokio::test]
    async fn test_create_computes_total() {
        let orders = use_case();
        let id = orders
            .create(new_order(vec![dish("soup", 4.5), dish("bread", 1.25)]))
            .await
            .unwrap();

        let order = orders.get(id).await.unwrap();
        assert_eq!(order.total_price, 5.75);
        assert_eq!(order.table_id, 7);
        assert_eq!(orders.list().await.unwrap(), vec![order]);
    }

    #[tokio::test]
    async fn test_update_items_recomputes_total() {
        let orders = use_case();
        let id = orders.create(new_order(vec![dish("soup", 4.5)])).await.unwrap();

        let updated = orders
            .update(
                id,
                OrderChanges {
                    items: Some(vec![dish("steak", 20.0), dish("wine", 8.5)]),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.items.len(), 2);
        assert_eq!(updated.total_price, 28.5);
    }

    #[tokio::test]
    async fn test_update_without_items_keeps_total() {
        let orders = use_case();
        let id = orders.create(new_order(vec![dish("soup", 4.5)])).await.unwrap();

        let updated = orders
            .update(
                id,
                OrderChanges {
                    ready_at: Some(1_700_000_000),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.total_price, 4.5);
        assert_eq!(updated.ready_at, Some(1_700_000_000));
        assert_eq!(updated.table_id, 7);
    }

    #[tokio::test]
    async fn test_overflowing_total_is_rejected() {
        let orders = use_case();
        let id = orders.create(new_order(vec![])).await.unwrap();

        let err = orders
            .create(new_order(vec![dish("gold leaf", 1e308), dish("caviar", 1e308)]))
            .await
            .unwrap_err();
        assert!(matches!(err, OrderingError::InvalidPrice));

        let err = orders
            .update(
                id,
                OrderChanges {
                    items: Some(vec![dish("gold leaf", 1e308), dish("caviar", 1e308)]),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, OrderingError::InvalidPrice));

        // Nothing was written, and the stored orders still decode
        let all = orders.list().await.unwrap();
        assert_eq!(all.len(), 1);
        assert!(all[0].items.is_empty());
        assert_eq!(all[0].total_price, 0.0);
        assert!(all[0].total_price.is_sign_positive());
    }

    #[tokio::test]
    async fn test_delete() {
        let orders = use_case();
        let id = orders.create(new_order(vec![])).await.unwrap();

        assert_eq!(orders.delete(id).await.unwrap(), 1);
        assert!(matches!(orders.delete(id).await, Err(OrderingError::OrderNotFound)));
        assert!(matches!(orders.get(id).await, Err(OrderingError::OrderNotFound)));
    }
}
