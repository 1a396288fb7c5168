//! Catalog, topping, and settings management handlers.

use std::collections::BTreeMap;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use cakestack_core::access::{Action, authorize};
use cakestack_core::pricing::CakePricing;
use cakestack_core::{CakeId, Money, ShopId, TierId, ToppingId};
use cakestack_store::models::{Cake, CakeDoc, SettingsDoc, Topping, ToppingDoc};
use cakestack_store::repos::{CakeRepo, SettingsRepo, ShopRepo, ToppingRepo};

use crate::error::{AppError, Result, require};
use crate::extract::CurrentActor;
use crate::routes::parse_shop;
use crate::state::AppState;

/// Cake creation request.
///
/// Either a tier price table or a legacy flat `basePrice` must be supplied.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCakeRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub flavors: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub base_price: Option<Money>,
    #[serde(default)]
    pub tier_pricing: Option<BTreeMap<TierId, Money>>,
    #[serde(default)]
    pub tier_names: Option<BTreeMap<TierId, String>>,
}

/// Cake update request: only supplied fields change.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCakeRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub flavors: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub image_url: Option<String>,
    pub base_price: Option<Money>,
    pub tier_pricing: Option<BTreeMap<TierId, Money>>,
    pub tier_names: Option<BTreeMap<TierId, String>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedResponse<T> {
    pub id: T,
}

/// Topping creation request.
#[derive(Debug, Deserialize)]
pub struct CreateToppingRequest {
    pub name: String,
    pub price: Money,
}

/// Topping update request.
#[derive(Debug, Deserialize)]
pub struct UpdateToppingRequest {
    pub name: Option<String>,
    pub price: Option<Money>,
}

/// Settings update request: only supplied fields change.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsRequest {
    pub delivery_enabled: Option<bool>,
    pub pickup_enabled: Option<bool>,
    pub delivery_fee: Option<Money>,
    pub minimum_order: Option<Money>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
}

/// Authorize a shop-scoped action, then confirm the shop exists.
///
/// Order matters: the policy runs first, so an unassigned staff member's
/// denial is identical whether or not the shop exists.
pub(crate) async fn scoped(
    state: &AppState,
    current: &CurrentActor,
    action: Action,
    slug: &str,
) -> Result<ShopId> {
    let shop_id = parse_shop(slug)?;
    require(authorize(&current.actor, action, Some(&shop_id)))?;
    if !ShopRepo::new(state.store()).exists(&shop_id).await? {
        return Err(AppError::NotFound(format!("shop {shop_id}")));
    }
    Ok(shop_id)
}

// ---- Cakes ----

#[tracing::instrument(skip(state))]
pub async fn list_cakes(
    State(state): State<AppState>,
    current: CurrentActor,
    Path(shop_id): Path<String>,
) -> Result<Json<Vec<Cake>>> {
    let shop_id = scoped(&state, &current, Action::ManageCatalog, &shop_id).await?;
    let cakes = CakeRepo::new(state.store()).list(&shop_id).await?;
    Ok(Json(cakes))
}

#[tracing::instrument(skip(state, request))]
pub async fn create_cake(
    State(state): State<AppState>,
    current: CurrentActor,
    Path(shop_id): Path<String>,
    Json(request): Json<CreateCakeRequest>,
) -> Result<(StatusCode, Json<CreatedResponse<CakeId>>)> {
    let shop_id = scoped(&state, &current, Action::ManageCatalog, &shop_id).await?;
    let pricing = build_pricing(request.tier_pricing, request.tier_names, request.base_price)?;
    let doc = CakeDoc::new(
        request.name,
        request.description,
        request.flavors,
        request.tags,
        request.image_url,
        &pricing,
        Utc::now(),
    );
    let id = CakeRepo::new(state.store()).create(&shop_id, &doc).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

#[tracing::instrument(skip(state, request))]
pub async fn update_cake(
    State(state): State<AppState>,
    current: CurrentActor,
    Path((shop_id, cake_id)): Path<(String, String)>,
    Json(request): Json<UpdateCakeRequest>,
) -> Result<StatusCode> {
    let shop_id = scoped(&state, &current, Action::ManageCatalog, &shop_id).await?;
    let patch = cake_patch(request)?;
    CakeRepo::new(state.store())
        .update(&shop_id, &CakeId::new(cake_id), patch)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[tracing::instrument(skip(state))]
pub async fn delete_cake(
    State(state): State<AppState>,
    current: CurrentActor,
    Path((shop_id, cake_id)): Path<(String, String)>,
) -> Result<StatusCode> {
    let shop_id = scoped(&state, &current, Action::ManageCatalog, &shop_id).await?;
    CakeRepo::new(state.store())
        .delete(&shop_id, &CakeId::new(cake_id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---- Toppings ----

#[tracing::instrument(skip(state))]
pub async fn list_toppings(
    State(state): State<AppState>,
    current: CurrentActor,
    Path(shop_id): Path<String>,
) -> Result<Json<Vec<Topping>>> {
    let shop_id = scoped(&state, &current, Action::ManageToppings, &shop_id).await?;
    let toppings = ToppingRepo::new(state.store()).list(&shop_id).await?;
    Ok(Json(toppings))
}

#[tracing::instrument(skip(state, request))]
pub async fn create_topping(
    State(state): State<AppState>,
    current: CurrentActor,
    Path(shop_id): Path<String>,
    Json(request): Json<CreateToppingRequest>,
) -> Result<(StatusCode, Json<CreatedResponse<ToppingId>>)> {
    let shop_id = scoped(&state, &current, Action::ManageToppings, &shop_id).await?;
    let doc = ToppingDoc::new(request.name, request.price, Utc::now());
    let id = ToppingRepo::new(state.store()).create(&shop_id, &doc).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

#[tracing::instrument(skip(state, request))]
pub async fn update_topping(
    State(state): State<AppState>,
    current: CurrentActor,
    Path((shop_id, topping_id)): Path<(String, String)>,
    Json(request): Json<UpdateToppingRequest>,
) -> Result<StatusCode> {
    let shop_id = scoped(&state, &current, Action::ManageToppings, &shop_id).await?;
    let mut patch = Map::new();
    if let Some(name) = request.name {
        patch.insert("name".to_string(), json!(name));
    }
    if let Some(price) = request.price {
        patch.insert("price".to_string(), json!(price));
    }
    patch.insert("updatedAt".to_string(), json!(Utc::now()));
    ToppingRepo::new(state.store())
        .update(&shop_id, &ToppingId::new(topping_id), Value::Object(patch))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[tracing::instrument(skip(state))]
pub async fn delete_topping(
    State(state): State<AppState>,
    current: CurrentActor,
    Path((shop_id, topping_id)): Path<(String, String)>,
) -> Result<StatusCode> {
    let shop_id = scoped(&state, &current, Action::ManageToppings, &shop_id).await?;
    ToppingRepo::new(state.store())
        .delete(&shop_id, &ToppingId::new(topping_id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---- Settings ----

#[tracing::instrument(skip(state))]
pub async fn get_settings(
    State(state): State<AppState>,
    current: CurrentActor,
    Path(shop_id): Path<String>,
) -> Result<Json<SettingsDoc>> {
    let shop_id = scoped(&state, &current, Action::ManageSettings, &shop_id).await?;
    let settings = SettingsRepo::new(state.store()).get(&shop_id).await?;
    Ok(Json(settings))
}

#[tracing::instrument(skip(state, request))]
pub async fn update_settings(
    State(state): State<AppState>,
    current: CurrentActor,
    Path(shop_id): Path<String>,
    Json(request): Json<UpdateSettingsRequest>,
) -> Result<StatusCode> {
    let shop_id = scoped(&state, &current, Action::ManageSettings, &shop_id).await?;
    let mut patch = Map::new();
    if let Some(v) = request.delivery_enabled {
        patch.insert("deliveryEnabled".to_string(), json!(v));
    }
    if let Some(v) = request.pickup_enabled {
        patch.insert("pickupEnabled".to_string(), json!(v));
    }
    if let Some(v) = request.delivery_fee {
        patch.insert("deliveryFee".to_string(), json!(v));
    }
    if let Some(v) = request.minimum_order {
        patch.insert("minimumOrder".to_string(), json!(v));
    }
    if let Some(v) = request.contact_email {
        patch.insert("contactEmail".to_string(), json!(v));
    }
    if let Some(v) = request.contact_phone {
        patch.insert("contactPhone".to_string(), json!(v));
    }
    SettingsRepo::new(state.store())
        .upsert(&shop_id, Value::Object(patch))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---- Helpers ----

fn build_pricing(
    tier_pricing: Option<BTreeMap<TierId, Money>>,
    tier_names: Option<BTreeMap<TierId, String>>,
    base_price: Option<Money>,
) -> Result<CakePricing> {
    match tier_pricing {
        Some(prices) if !prices.is_empty() => {
            Ok(CakePricing::tiered(prices, tier_names.unwrap_or_default())?)
        }
        _ => {
            let base = base_price.ok_or_else(|| {
                AppError::BadRequest(
                    "a cake needs tierPricing or a basePrice".to_string(),
                )
            })?;
            Ok(CakePricing::flat(base))
        }
    }
}

fn cake_patch(request: UpdateCakeRequest) -> Result<Value> {
    let mut patch = Map::new();
    if let Some(name) = request.name {
        patch.insert("name".to_string(), json!(name));
    }
    if let Some(description) = request.description {
        patch.insert("description".to_string(), json!(description));
    }
    if let Some(flavors) = request.flavors {
        patch.insert("flavors".to_string(), json!(flavors));
    }
    if let Some(tags) = request.tags {
        patch.insert("tags".to_string(), json!(tags));
    }
    if let Some(image_url) = request.image_url {
        patch.insert("imageUrl".to_string(), json!(image_url));
    }
    if let Some(prices) = request.tier_pricing {
        // Changing the tier table re-mirrors the legacy basePrice field.
        let pricing = CakePricing::tiered(prices.clone(), request.tier_names.clone().unwrap_or_default())?;
        patch.insert("tierPricing".to_string(), json!(prices));
        patch.insert("basePrice".to_string(), json!(pricing.base_price()));
        if let Some(names) = request.tier_names {
            patch.insert("tierNames".to_string(), json!(names));
        }
    } else if let Some(base) = request.base_price {
        patch.insert("basePrice".to_string(), json!(base));
    }
    patch.insert("updatedAt".to_string(), json!(Utc::now()));
    Ok(Value::Object(patch))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn money(amount: i64) -> Money {
        Money::new(amount).expect("valid amount")
    }

    #[test]
    fn pricing_requires_a_table_or_base_price() {
        let err = build_pricing(None, None, None).expect_err("nothing supplied");
        assert!(matches!(err, AppError::BadRequest(_)));

        let flat = build_pricing(None, None, Some(money(450))).expect("flat");
        assert_eq!(flat, CakePricing::flat(money(450)));
    }

    #[test]
    fn tier_table_updates_mirror_base_price() {
        let tier1 = TierId::new(1).expect("tier");
        let tier2 = TierId::new(2).expect("tier");
        let request = UpdateCakeRequest {
            name: None,
            description: None,
            flavors: None,
            tags: None,
            image_url: None,
            base_price: None,
            tier_pricing: Some(BTreeMap::from([
                (tier1, money(500)),
                (tier2, money(700)),
            ])),
            tier_names: None,
        };
        let patch = cake_patch(request).expect("valid patch");
        assert_eq!(patch["basePrice"], 500);
        assert_eq!(patch["tierPricing"]["tier2"], 700);
        assert!(patch.get("name").is_none());
    }
}
