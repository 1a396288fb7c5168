//! Quote, checkout, and order tracking handlers.
//!
//! Checkout snapshots every price into the order document. Later catalog
//! edits (or deleted toppings) never change what the customer agreed to.

use axum::Json;
use axum::extract::{Path, State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cakestack_core::pricing::{self, ToppingPrice};
use cakestack_core::{CakeId, Money, OrderId, OrderStatus, TierId};
use cakestack_store::models::{Cake, OrderDoc, OrderLineDoc, SettingsDoc};
use cakestack_store::repos::{CakeRepo, OrderRepo, ToppingRepo};

use crate::error::{AppError, Result};
use crate::extract::ShopScope;
use crate::state::AppState;

/// A requested cake configuration.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    /// Absent for legacy flat-priced cakes; defaults to the first tier.
    pub tier: Option<TierId>,
    /// Chosen base, one of the cake's `flavors`. Flavors carry no price.
    #[serde(default)]
    pub flavor: Option<String>,
    #[serde(default)]
    pub toppings: Vec<String>,
    pub quantity: u32,
}

/// Quote request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    #[serde(flatten)]
    pub configuration: Configuration,
}

/// Quote response: the price breakdown for one configuration.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub tier_label: String,
    pub tier_price: Money,
    pub toppings_price: Money,
    pub unit_price: Money,
    pub line_total: Money,
}

/// Checkout request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub customer_name: String,
    pub customer_email: String,
    #[serde(default)]
    pub customer_phone: String,
    #[serde(default)]
    pub is_pickup: bool,
    #[serde(default)]
    pub delivery_address: Option<String>,
    #[serde(default)]
    pub requested_date: Option<String>,
    #[serde(default)]
    pub requested_time: Option<String>,
    #[serde(default)]
    pub special_instructions: Option<String>,
    pub items: Vec<CheckoutLine>,
}

/// One cart line in a checkout request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutLine {
    pub cake_id: CakeId,
    #[serde(flatten)]
    pub configuration: Configuration,
}

/// Checkout response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub order_id: OrderId,
    pub total_amount: Money,
    pub status: OrderStatus,
}

/// Public tracking response: status plus the snapshot lines.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackResponse {
    pub order_id: OrderId,
    pub status: OrderStatus,
    pub items: Vec<OrderLineDoc>,
    pub total_amount: Money,
    pub is_pickup: bool,
    pub requested_date: Option<String>,
    pub requested_time: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Price a cake configuration against the live catalog.
#[tracing::instrument(skip(state, request))]
pub async fn quote(
    State(state): State<AppState>,
    scope: ShopScope,
    Path((_, cake_id)): Path<(String, String)>,
    Json(request): Json<QuoteRequest>,
) -> Result<Json<QuoteResponse>> {
    require_active_shop(&state, &scope).await?;
    let cake_id = CakeId::new(cake_id);
    let cakes = state.shop_cakes(&scope.0).await?;
    let cake = cakes
        .iter()
        .find(|cake| cake.id == cake_id)
        .ok_or_else(|| AppError::NotFound(format!("cake {cake_id}")))?;
    let available = ToppingRepo::new(state.store()).prices(&scope.0).await?;

    let quoted = price_line(cake, &request.configuration, &available)?;
    Ok(Json(quoted.breakdown))
}

/// Place an order.
#[tracing::instrument(skip(state, request), fields(shop = %scope.0))]
pub async fn checkout(
    State(state): State<AppState>,
    scope: ShopScope,
    Json(request): Json<CheckoutRequest>,
) -> Result<Json<CheckoutResponse>> {
    let snapshot = state
        .shop_snapshot(&scope.0)
        .await?
        .filter(|s| s.shop.doc.active)
        .ok_or_else(|| AppError::NotFound(format!("shop {}", scope.0)))?;

    validate_checkout(&request, &snapshot.settings)?;

    // Price against the live catalog, bypassing the read cache: the amounts
    // written here become the order's permanent snapshot.
    let cake_repo = CakeRepo::new(state.store());
    let available = ToppingRepo::new(state.store()).prices(&scope.0).await?;
    let mut items = Vec::with_capacity(request.items.len());
    for line in &request.items {
        let cake = cake_repo
            .get(&scope.0, &line.cake_id)
            .await?
            .ok_or_else(|| AppError::BadRequest(format!("unknown cake: {}", line.cake_id)))?;
        let quoted = price_line(&cake, &line.configuration, &available)?;
        items.push(OrderLineDoc {
            cake_name: cake.doc.name.clone(),
            tier_label: quoted.breakdown.tier_label,
            flavor: line.configuration.flavor.clone(),
            toppings: line.configuration.toppings.clone(),
            quantity: line.configuration.quantity,
            unit_price: quoted.breakdown.unit_price,
            line_total: quoted.breakdown.line_total,
        });
    }

    let subtotal = pricing::order_total(items.iter().map(|line| line.line_total))?;
    if subtotal.amount() < snapshot.settings.minimum_order.amount() {
        return Err(AppError::BadRequest(format!(
            "order total below the shop minimum of {}",
            snapshot.settings.minimum_order
        )));
    }
    let total = if request.is_pickup {
        subtotal
    } else {
        subtotal
            .checked_add(snapshot.settings.delivery_fee)
            .map_err(pricing::PricingError::from)?
    };

    let now = Utc::now();
    let doc = OrderDoc {
        customer_name: request.customer_name,
        customer_email: request.customer_email,
        customer_phone: request.customer_phone,
        is_pickup: request.is_pickup,
        delivery_address: request.delivery_address,
        requested_date: request.requested_date,
        requested_time: request.requested_time,
        special_instructions: request.special_instructions,
        items,
        total_amount: total,
        status: OrderStatus::PendingApproval,
        created_at: Some(now),
        updated_at: Some(now),
    };
    let order_id = OrderRepo::new(state.store()).create(&scope.0, &doc).await?;
    tracing::info!(shop = %scope.0, order = %order_id, total = %total, "order placed");

    Ok(Json(CheckoutResponse {
        order_id,
        total_amount: total,
        status: doc.status,
    }))
}

/// Public order tracking.
#[tracing::instrument(skip(state))]
pub async fn track(
    State(state): State<AppState>,
    scope: ShopScope,
    Path((_, order_id)): Path<(String, String)>,
) -> Result<Json<TrackResponse>> {
    require_active_shop(&state, &scope).await?;
    let order_id = OrderId::new(order_id);
    let order = OrderRepo::new(state.store())
        .get(&scope.0, &order_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order {order_id}")))?;
    Ok(Json(TrackResponse {
        order_id: order.id,
        status: order.doc.status,
        items: order.doc.items,
        total_amount: order.doc.total_amount,
        is_pickup: order.doc.is_pickup,
        requested_date: order.doc.requested_date,
        requested_time: order.doc.requested_time,
        created_at: order.doc.created_at,
        updated_at: order.doc.updated_at,
    }))
}

struct QuotedLine {
    breakdown: QuoteResponse,
}

/// Price one configuration. Unresolvable topping names contribute zero; a
/// flavor the cake does not offer rejects the request.
fn price_line(
    cake: &Cake,
    configuration: &Configuration,
    available: &[ToppingPrice],
) -> Result<QuotedLine> {
    if let Some(flavor) = configuration.flavor.as_deref() {
        if !cake.doc.flavors.iter().any(|f| f == flavor) {
            return Err(AppError::BadRequest(format!(
                "cake {} does not offer the {flavor} flavor",
                cake.doc.name
            )));
        }
    }
    let cake_pricing = cake.doc.pricing()?;
    let tier = configuration.tier.unwrap_or(TierId::FIRST);
    let tier_price = cake_pricing.tier_price(tier)?;
    let toppings_price = pricing::toppings_price(
        configuration.toppings.iter().map(String::as_str),
        available,
    )?;
    let unit_price = tier_price
        .checked_add(toppings_price)
        .map_err(pricing::PricingError::from)?;
    let line_total = pricing::line_total(tier_price, toppings_price, configuration.quantity)?;
    Ok(QuotedLine {
        breakdown: QuoteResponse {
            tier_label: cake_pricing.tier_label(tier),
            tier_price,
            toppings_price,
            unit_price,
            line_total,
        },
    })
}

fn validate_checkout(request: &CheckoutRequest, settings: &SettingsDoc) -> Result<()> {
    if request.items.is_empty() {
        return Err(AppError::BadRequest("cart is empty".to_string()));
    }
    if request.customer_name.trim().is_empty() {
        return Err(AppError::BadRequest("customer name is required".to_string()));
    }
    if request.customer_email.trim().is_empty() {
        return Err(AppError::BadRequest("customer email is required".to_string()));
    }
    if request.is_pickup {
        if !settings.pickup_enabled {
            return Err(AppError::BadRequest(
                "this shop does not offer pickup".to_string(),
            ));
        }
    } else {
        if !settings.delivery_enabled {
            return Err(AppError::BadRequest(
                "this shop does not offer delivery".to_string(),
            ));
        }
        let has_address = request
            .delivery_address
            .as_deref()
            .is_some_and(|addr| !addr.trim().is_empty());
        if !has_address {
            return Err(AppError::BadRequest(
                "delivery orders require a delivery address".to_string(),
            ));
        }
    }
    Ok(())
}

async fn require_active_shop(state: &AppState, scope: &ShopScope) -> Result<()> {
    let visible = state
        .shop_snapshot(&scope.0)
        .await?
        .is_some_and(|s| s.shop.doc.active);
    if visible {
        Ok(())
    } else {
        Err(AppError::NotFound(format!("shop {}", scope.0)))
    }
}
