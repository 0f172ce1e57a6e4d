//! HTTP Handlers

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use kernel::id::{ItemId, OrderId};
use platform::store::DocumentStore;
use std::sync::Arc;

use crate::application::{ItemsUseCase, OrdersUseCase};
use crate::domain::entities::{Item, Order};
use crate::error::OrderingResult;
use crate::presentation::dto::{
    CreateItemRequest, CreateOrderRequest, DeleteResponse, InsertedResponse, UpdateItemRequest,
    UpdateOrderRequest,
};

/// Shared state for ordering handlers
pub struct OrderingAppState<S>
where
    S: DocumentStore + Send + Sync + 'static,
{
    pub store: Arc<S>,
}

impl<S> Clone for OrderingAppState<S>
where
    S: DocumentStore + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S> OrderingAppState<S>
where
    S: DocumentStore + Send + Sync + 'static,
{
    fn items(&self) -> ItemsUseCase<S> {
        ItemsUseCase::new(self.store.clone())
    }

    fn orders(&self) -> OrdersUseCase<S> {
        OrdersUseCase::new(self.store.clone())
    }
}

// ============================================================================
// Items
// ============================================================================

/// POST /api/items
pub async fn create_item<S>(
    State(state): State<OrderingAppState<S>>,
    payload: Result<Json<CreateItemRequest>, JsonRejection>,
) -> OrderingResult<(StatusCode, Json<InsertedResponse>)>
where
    S: DocumentStore + Send + Sync + 'static,
{
    let Json(req) = payload?;
    let id = state.items().create(req.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(InsertedResponse {
            inserted_id: id.into_uuid(),
        }),
    ))
}

/// GET /api/items
pub async fn list_items<S>(State(state): State<OrderingAppState<S>>) -> OrderingResult<Json<Vec<Item>>>
where
    S: DocumentStore + Send + Sync + 'static,
{
    Ok(Json(state.items().list().await?))
}

/// GET /api/items/{id}
pub async fn get_item<S>(
    State(state): State<OrderingAppState<S>>,
    Path(id): Path<String>,
) -> OrderingResult<Json<Item>>
where
    S: DocumentStore + Send + Sync + 'static,
{
    let id = ItemId::parse_str(&id)?;
    Ok(Json(state.items().get(id).await?))
}

/// PUT /api/items/{id}
pub async fn update_item<S>(
    State(state): State<OrderingAppState<S>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateItemRequest>, JsonRejection>,
) -> OrderingResult<Json<Item>>
where
    S: DocumentStore + Send + Sync + 'static,
{
    let id = ItemId::parse_str(&id)?;
    let Json(req) = payload?;
    Ok(Json(state.items().update(id, req.into()).await?))
}

/// DELETE /api/items/{id}
pub async fn delete_item<S>(
    State(state): State<OrderingAppState<S>>,
    Path(id): Path<String>,
) -> OrderingResult<Json<DeleteResponse>>
where
    S: DocumentStore + Send + Sync + 'static,
{
    let id = ItemId::parse_str(&id)?;
    let deleted_count = state.items().delete(id).await?;
    Ok(Json(DeleteResponse { deleted_count }))
}

// ============================================================================
// Orders
// ============================================================================

/// POST /api/orders
pub async fn create_order<S>(
    State(state): State<OrderingAppState<S>>,
    payload: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> OrderingResult<(StatusCode, Json<InsertedResponse>)>
where
    S: DocumentStore + Send + Sync + 'static,
{
    let Json(req) = payload?;
    let id = state.orders().create(req.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(InsertedResponse {
            inserted_id: id.into_uuid(),
        }),
    ))
}

/// GET /api/orders
pub async fn list_orders<S>(
    State(state): State<OrderingAppState<S>>,
) -> OrderingResult<Json<Vec<Order>>>
where
    S: DocumentStore + Send + Sync + 'static,
{
    Ok(Json(state.orders().list().await?))
}

/// GET /api/orders/{id}
pub async fn get_order<S>(
    State(state): State<OrderingAppState<S>>,
    Path(id): Path<String>,
) -> OrderingResult<Json<Order>>
where
    S: DocumentStore + Send + Sync + 'static,
{
    let id = OrderId::parse_str(&id)?;
    Ok(Json(state.orders().get(id).await?))
}

/// PUT /api/orders/{id}
pub async fn update_order<S>(
    State(state): State<OrderingAppState<S>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateOrderRequest>, JsonRejection>,
) -> OrderingResult<Json<Order>>
where
    S: DocumentStore + Send + Sync + 'static,
{
    let id = OrderId::parse_str(&id)?;
    let Json(req) = payload?;
    Ok(Json(state.orders().update(id, req.into()).await?))
}

/// DELETE /api/orders/{id}
pub async fn delete_order<S>(
    State(state): State<OrderingAppState<S>>,
    Path(id): Path<String>,
) -> OrderingResult<Json<DeleteResponse>>
where
    S: DocumentStore + Send + Sync + 'static,
{
    let id = OrderId::parse_str(&id)?;
    let deleted_count = state.orders().delete(id).await?;
    Ok(Json(DeleteResponse { deleted_count }))
}
