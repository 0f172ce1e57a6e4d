//! Domain Entities
//!
//! Menu items and the orders that embed them.

use chrono::Utc;
use kernel::id::{GuestUserId, ItemId, OrderId, StaffUserId};
use platform::store::Document;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::services::total_price;

/// Menu item (`items`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(rename = "_id")]
    pub id: ItemId,
    pub item_name: String,
    #[serde(default)]
    pub item_description: String,
    #[serde(default)]
    pub item_type: String,
    #[serde(default)]
    pub item_img: String,
    pub item_price: f64,
    /// Minutes
    #[serde(default)]
    pub estimate_prepare_time: i64,
    pub created_at: i64,
    pub updated_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<i64>,
}

impl Item {
    pub fn new(
        item_name: String,
        item_description: String,
        item_type: String,
        item_img: String,
        item_price: f64,
        estimate_prepare_time: i64,
    ) -> Self {
        let now = Utc::now().timestamp();

        Self {
            id: ItemId::new(),
            item_name,
            item_description,
            item_type,
            item_img,
            item_price,
            estimate_prepare_time,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }
}

impl Document for Item {
    const COLLECTION: &'static str = "items";

    fn id(&self) -> Uuid {
        self.id.into_uuid()
    }
}

/// Copy of an item as it was when ordered
///
/// Later menu changes do not touch orders already placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSnapshot {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ItemId>,
    pub item_name: String,
    #[serde(default)]
    pub item_description: String,
    #[serde(default)]
    pub item_type: String,
    #[serde(default)]
    pub item_img: String,
    pub item_price: f64,
    #[serde(default)]
    pub estimate_prepare_time: i64,
}

impl From<&Item> for ItemSnapshot {
    fn from(item: &Item) -> Self {
        Self {
            id: Some(item.id),
            item_name: item.item_name.clone(),
            item_description: item.item_description.clone(),
            item_type: item.item_type.clone(),
            item_img: item.item_img.clone(),
            item_price: item.item_price,
            estimate_prepare_time: item.estimate_prepare_time,
        }
    }
}

/// Table order (`orders`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: OrderId,
    #[serde(default)]
    pub table_id: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staff_user_id: Option<StaffUserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_user_id: Option<GuestUserId>,
    #[serde(default)]
    pub items: Vec<ItemSnapshot>,
    /// Sum of `item_price` over `items`
    pub total_price: f64,
    pub created_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ready_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivered_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payed_at: Option<i64>,
    pub updated_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<i64>,
}

impl Order {
    /// New order with its total computed from `items`
    pub fn new(
        table_id: i32,
        staff_user_id: Option<StaffUserId>,
        guest_user_id: Option<GuestUserId>,
        items: Vec<ItemSnapshot>,
    ) -> Self {
        let now = Utc::now().timestamp();

        Self {
            id: OrderId::new(),
            table_id,
            staff_user_id,
            guest_user_id,
            total_price: total_price(&items),
            items,
            created_at: now,
            ready_at: None,
            delivered_at: None,
            payed_at: None,
            updated_at: now,
            deleted_at: None,
        }
    }
}

impl Document for Order {
    const COLLECTION: &'static str = "orders";

    fn id(&self) -> Uuid {
        self.id.into_uuid()
    }
}
