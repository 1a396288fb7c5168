//! Order management handlers.

use axum::Json;
use axum::extract::{Path, State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cakestack_core::access::Action;
use cakestack_core::lifecycle::check_transition;
use cakestack_core::{OrderId, OrderStatus};
use cakestack_store::models::Order;
use cakestack_store::repos::OrderRepo;

use crate::error::{AppError, Result};
use crate::extract::CurrentActor;
use crate::state::AppState;

use super::catalog::scoped;

/// Status change request.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: OrderStatus,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusResponse {
    pub order_id: OrderId,
    pub status: OrderStatus,
    pub updated_at: DateTime<Utc>,
}

/// The shop's orders, newest first.
#[tracing::instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    current: CurrentActor,
    Path(shop_id): Path<String>,
) -> Result<Json<Vec<Order>>> {
    let shop_id = scoped(&state, &current, Action::ReadOrders, &shop_id).await?;
    let orders = OrderRepo::new(state.store()).list(&shop_id).await?;
    Ok(Json(orders))
}

/// One order's full detail.
#[tracing::instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    current: CurrentActor,
    Path((shop_id, order_id)): Path<(String, String)>,
) -> Result<Json<Order>> {
    let shop_id = scoped(&state, &current, Action::ReadOrders, &shop_id).await?;
    let order_id = OrderId::new(order_id);
    let order = OrderRepo::new(state.store())
        .get(&shop_id, &order_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order {order_id}")))?;
    Ok(Json(order))
}

/// Advance an order through its lifecycle.
///
/// The transition is validated against the order's current status at write
/// time; a repeat of the current status is an idempotent no-op. Only
/// `status` and `updatedAt` change - the snapshot lines and totals are
/// immutable.
#[tracing::instrument(skip(state))]
pub async fn update_status(
    State(state): State<AppState>,
    current: CurrentActor,
    Path((shop_id, order_id)): Path<(String, String)>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<UpdateStatusResponse>> {
    let shop_id = scoped(&state, &current, Action::UpdateOrderStatus, &shop_id).await?;
    let order_id = OrderId::new(order_id);
    let repo = OrderRepo::new(state.store());
    let order = repo
        .get(&shop_id, &order_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order {order_id}")))?;

    check_transition(order.doc.status, request.status)?;

    let now = Utc::now();
    if order.doc.status == request.status {
        // Idempotent repeat: acknowledge without writing.
        return Ok(Json(UpdateStatusResponse {
            order_id,
            status: request.status,
            updated_at: order.doc.updated_at.unwrap_or(now),
        }));
    }

    repo.set_status(&shop_id, &order_id, request.status, now)
        .await?;
    tracing::info!(
        shop = %shop_id,
        order = %order_id,
        from = %order.doc.status,
        to = %request.status,
        "order status changed"
    );

    Ok(Json(UpdateStatusResponse {
        order_id,
        status: request.status,
        updated_at: now,
    }))
}
