//! Shop directory and profile handlers.

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use cakestack_store::models::{SettingsDoc, Shop};
use cakestack_store::repos::ShopRepo;

use crate::error::{AppError, Result};
use crate::extract::ShopScope;
use crate::state::AppState;

/// Shop profile response: branding plus fulfillment settings.
#[derive(Debug, Serialize)]
pub struct ShopProfile {
    #[serde(flatten)]
    pub shop: Shop,
    pub settings: SettingsDoc,
}

/// The public shop directory. Deactivated shops are not listed.
#[tracing::instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Shop>>> {
    let shops = ShopRepo::new(state.store()).list_active().await?;
    Ok(Json(shops))
}

/// A single shop's profile and settings.
#[tracing::instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    ShopScope(shop_id): ShopScope,
) -> Result<Json<ShopProfile>> {
    let snapshot = state
        .shop_snapshot(&shop_id)
        .await?
        .filter(|s| s.shop.doc.active)
        .ok_or_else(|| AppError::NotFound(format!("shop {shop_id}")))?;
    Ok(Json(ShopProfile {
        shop: snapshot.shop.clone(),
        settings: snapshot.settings.clone(),
    }))
}
