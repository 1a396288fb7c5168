//! Catalog read handlers: cakes and toppings.

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;

use cakestack_core::CakeId;
use cakestack_store::models::{Cake, Topping};
use cakestack_store::repos::ToppingRepo;

use crate::error::{AppError, Result};
use crate::extract::ShopScope;
use crate::state::AppState;

/// Catalog listing filters.
#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    /// Restrict the listing to cakes carrying this tag.
    pub tag: Option<String>,
}

/// Confirm the scoped shop exists and is open for browsing.
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

/// The shop's cake catalog, optionally filtered by tag.
#[tracing::instrument(skip(state))]
pub async fn cakes(
    State(state): State<AppState>,
    scope: ShopScope,
    Query(query): Query<CatalogQuery>,
) -> Result<Json<Vec<Cake>>> {
    require_active_shop(&state, &scope).await?;
    let cakes = state.shop_cakes(&scope.0).await?;
    let filtered = match &query.tag {
        Some(tag) => cakes
            .iter()
            .filter(|cake| cake.doc.tags.iter().any(|t| t == tag))
            .cloned()
            .collect(),
        None => cakes.as_ref().clone(),
    };
    Ok(Json(filtered))
}

/// One cake's detail.
#[tracing::instrument(skip(state))]
pub async fn cake(
    State(state): State<AppState>,
    scope: ShopScope,
    Path((_, cake_id)): Path<(String, String)>,
) -> Result<Json<Cake>> {
    require_active_shop(&state, &scope).await?;
    let cake_id = CakeId::new(cake_id);
    let cakes = state.shop_cakes(&scope.0).await?;
    let cake = cakes
        .iter()
        .find(|cake| cake.id == cake_id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("cake {cake_id}")))?;
    Ok(Json(cake))
}

/// The shop's selectable toppings.
#[tracing::instrument(skip(state))]
pub async fn toppings(
    State(state): State<AppState>,
    scope: ShopScope,
) -> Result<Json<Vec<Topping>>> {
    require_active_shop(&state, &scope).await?;
    let toppings = ToppingRepo::new(state.store()).list(&scope.0).await?;
    Ok(Json(toppings))
}
