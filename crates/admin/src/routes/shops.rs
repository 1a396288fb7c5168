//! Shop management and onboarding handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;

use cakestack_core::ShopId;
use cakestack_core::access::{Action, Actor, authorize};
use cakestack_store::models::{AdminDoc, Shop, ShopDoc};
use cakestack_store::repos::{AdminRepo, ShopRepo};

use crate::error::{AppError, Result, require};
use crate::extract::CurrentActor;
use crate::routes::parse_shop;
use crate::state::AppState;

/// Shop creation request (platform route and onboarding).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateShopRequest {
    /// The URL slug the shop will live under.
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub cover_image_url: Option<String>,
    #[serde(default)]
    pub primary_color: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateShopResponse {
    pub id: ShopId,
}

/// Shops visible to the caller: all of them for a superadmin, the
/// assignment set for shop staff.
#[tracing::instrument(skip(state))]
pub async fn my_shops(
    State(state): State<AppState>,
    current: CurrentActor,
) -> Result<Json<Vec<Shop>>> {
    let repo = ShopRepo::new(state.store());
    let shops = match &current.actor {
        Actor::SuperAdmin { .. } => repo.list_all().await?,
        Actor::Admin { assigned_shops, .. } => {
            let mut shops = Vec::with_capacity(assigned_shops.len());
            for shop_id in assigned_shops {
                // A stale assignment to a deleted shop is skipped, not an error.
                if let Some(shop) = repo.get(shop_id).await? {
                    shops.push(shop);
                }
            }
            shops
        }
        Actor::Anonymous => Vec::new(),
    };
    Ok(Json(shops))
}

/// Every shop on the platform. Superadmin only.
#[tracing::instrument(skip(state))]
pub async fn index(State(state): State<AppState>, current: CurrentActor) -> Result<Json<Vec<Shop>>> {
    require(authorize(&current.actor, Action::ListAllShops, None))?;
    let shops = ShopRepo::new(state.store()).list_all().await?;
    Ok(Json(shops))
}

/// Create a shop. Superadmin only.
#[tracing::instrument(skip(state, request))]
pub async fn create(
    State(state): State<AppState>,
    current: CurrentActor,
    Json(request): Json<CreateShopRequest>,
) -> Result<(StatusCode, Json<CreateShopResponse>)> {
    require(authorize(&current.actor, Action::CreateShop, None))?;
    let shop_id = create_shop(&state, &request).await?;
    Ok((StatusCode::CREATED, Json(CreateShopResponse { id: shop_id })))
}

/// Delete a shop and everything beneath it. Superadmin only.
#[tracing::instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    current: CurrentActor,
    Path(shop_id): Path<String>,
) -> Result<StatusCode> {
    let shop_id = parse_shop(&shop_id)?;
    require(authorize(&current.actor, Action::DeleteShop, Some(&shop_id)))?;
    let repo = ShopRepo::new(state.store());
    if !repo.exists(&shop_id).await? {
        return Err(AppError::NotFound(format!("shop {shop_id}")));
    }
    repo.delete_cascade(&shop_id).await?;
    tracing::info!(shop = %shop_id, "shop deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Self-service onboarding: create a shop and assign the caller to it.
///
/// Open to any authenticated account, including ones with no admin record
/// yet - this is where the record comes from.
#[tracing::instrument(skip(state, request))]
pub async fn onboarding(
    State(state): State<AppState>,
    current: CurrentActor,
    Json(request): Json<CreateShopRequest>,
) -> Result<(StatusCode, Json<CreateShopResponse>)> {
    let shop_id = create_shop(&state, &request).await?;

    let admin_repo = AdminRepo::new(state.store());
    let now = Utc::now();
    match admin_repo.get(&current.uid).await? {
        Some(existing) => {
            let mut assigned = existing.doc.assigned_shops;
            if !assigned.contains(&shop_id) {
                assigned.push(shop_id.clone());
            }
            admin_repo
                .update(
                    &current.uid,
                    json!({ "assignedShops": assigned, "updatedAt": now }),
                )
                .await?;
        }
        None => {
            let doc = AdminDoc::new(
                current.email.clone().unwrap_or_default(),
                vec![shop_id.clone()],
                now,
            );
            admin_repo.create(&current.uid, &doc).await?;
        }
    }
    tracing::info!(shop = %shop_id, uid = %current.uid, "shop onboarded");

    Ok((StatusCode::CREATED, Json(CreateShopResponse { id: shop_id })))
}

async fn create_shop(state: &AppState, request: &CreateShopRequest) -> Result<ShopId> {
    let shop_id = ShopId::parse(&request.id)
        .map_err(|e| AppError::BadRequest(format!("invalid shop id: {e}")))?;
    let doc = ShopDoc::new(
        request.name.clone(),
        request.description.clone(),
        request.logo_url.clone(),
        request.cover_image_url.clone(),
        request.primary_color.clone(),
        Utc::now(),
    );
    ShopRepo::new(state.store()).create(&shop_id, &doc).await?;
    Ok(shop_id)
}
