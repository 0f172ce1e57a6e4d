//! API DTOs (Data Transfer Objects)
//!
//! `total_price` is not accepted on any request; unknown fields are
//! ignored, so a client-sent total is dropped here.

use kernel::id::{GuestUserId, StaffUserId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::{ItemChanges, NewItem, NewOrder, OrderChanges};
use crate::domain::entities::ItemSnapshot;

// ============================================================================
// Items
// ============================================================================

/// Create item request
#[derive(Debug, Clone, Deserialize)]
pub struct CreateItemRequest {
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

impl From<CreateItemRequest> for NewItem {
    fn from(req: CreateItemRequest) -> Self {
        Self {
            item_name: req.item_name,
            item_description: req.item_description,
            item_type: req.item_type,
            item_img: req.item_img,
            item_price: req.item_price,
            estimate_prepare_time: req.estimate_prepare_time,
        }
    }
}

/// Item update request; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateItemRequest {
    pub item_name: Option<String>,
    pub item_description: Option<String>,
    pub item_type: Option<String>,
    pub item_img: Option<String>,
    pub item_price: Option<f64>,
    pub estimate_prepare_time: Option<i64>,
}

impl From<UpdateItemRequest> for ItemChanges {
    fn from(req: UpdateItemRequest) -> Self {
        Self {
            item_name: req.item_name,
            item_description: req.item_description,
            item_type: req.item_type,
            item_img: req.item_img,
            item_price: req.item_price,
            estimate_prepare_time: req.estimate_prepare_time,
        }
    }
}

// ============================================================================
// Orders
// ============================================================================

/// Create order request
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub table_id: i32,
    #[serde(default)]
    pub staff_user_id: Option<StaffUserId>,
    #[serde(default)]
    pub guest_user_id: Option<GuestUserId>,
    #[serde(default)]
    pub items: Vec<ItemSnapshot>,
}

impl From<CreateOrderRequest> for NewOrder {
    fn from(req: CreateOrderRequest) -> Self {
        Self {
            table_id: req.table_id,
            staff_user_id: req.staff_user_id,
            guest_user_id: req.guest_user_id,
            items: req.items,
        }
    }
}

/// Order update request; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateOrderRequest {
    pub table_id: Option<i32>,
    pub staff_user_id: Option<StaffUserId>,
    pub guest_user_id: Option<GuestUserId>,
    pub items: Option<Vec<ItemSnapshot>>,
    pub ready_at: Option<i64>,
    pub delivered_at: Option<i64>,
    pub payed_at: Option<i64>,
}

impl From<UpdateOrderRequest> for OrderChanges {
    fn from(req: UpdateOrderRequest) -> Self {
        Self {
            table_id: req.table_id,
            staff_user_id: req.staff_user_id,
            guest_user_id: req.guest_user_id,
            items: req.items,
            ready_at: req.ready_at,
            delivered_at: req.delivered_at,
            payed_at: req.payed_at,
        }
    }
}

// ============================================================================
// Responses
// ============================================================================

/// Create response (201)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsertedResponse {
    pub inserted_id: Uuid,
}

/// Delete response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub deleted_count: u64,
}
