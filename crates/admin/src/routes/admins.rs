//! Admin account management handlers. Superadmin only.
//!
//! Account provisioning is server-side: the provider account is created
//! through the identity API, never through a client sign-up flow, so the
//! calling superadmin's own session is untouched.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;

use cakestack_core::access::{Action, authorize};
use cakestack_core::{AdminUid, ShopId};
use cakestack_store::models::{Admin, AdminDoc};
use cakestack_store::repos::AdminRepo;

use crate::error::{Result, require};
use crate::extract::CurrentActor;
use crate::state::AppState;

/// Admin creation request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAdminRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub assigned_shops: Vec<ShopId>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAdminResponse {
    pub uid: AdminUid,
}

/// Assignment replacement request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignShopsRequest {
    pub assigned_shops: Vec<ShopId>,
}

/// Every admin record.
#[tracing::instrument(skip(state))]
pub async fn index(State(state): State<AppState>, current: CurrentActor) -> Result<Json<Vec<Admin>>> {
    require(authorize(&current.actor, Action::CreateAdmin, None))?;
    let admins = AdminRepo::new(state.store()).list().await?;
    Ok(Json(admins))
}

/// Create a provider account and its admin record.
#[tracing::instrument(skip(state, request))]
pub async fn create(
    State(state): State<AppState>,
    current: CurrentActor,
    Json(request): Json<CreateAdminRequest>,
) -> Result<(StatusCode, Json<CreateAdminResponse>)> {
    require(authorize(&current.actor, Action::CreateAdmin, None))?;
    let uid = state
        .verifier()
        .create_user(&request.email, &request.password)
        .await?;
    let doc = AdminDoc::new(request.email, request.assigned_shops, Utc::now());
    AdminRepo::new(state.store()).create(&uid, &doc).await?;
    tracing::info!(uid = %uid, "admin created");
    Ok((StatusCode::CREATED, Json(CreateAdminResponse { uid })))
}

/// Delete an admin record and its provider account.
#[tracing::instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    current: CurrentActor,
    Path(uid): Path<String>,
) -> Result<StatusCode> {
    require(authorize(&current.actor, Action::DeleteAdmin, None))?;
    let uid = AdminUid::new(uid);
    AdminRepo::new(state.store()).delete(&uid).await?;
    state.verifier().delete_user(&uid).await?;
    tracing::info!(uid = %uid, "admin deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Replace an admin's shop assignment set.
#[tracing::instrument(skip(state, request))]
pub async fn assign(
    State(state): State<AppState>,
    current: CurrentActor,
    Path(uid): Path<String>,
    Json(request): Json<AssignShopsRequest>,
) -> Result<StatusCode> {
    require(authorize(&current.actor, Action::CreateAdmin, None))?;
    let uid = AdminUid::new(uid);
    AdminRepo::new(state.store())
        .update(
            &uid,
            json!({
                "assignedShops": request.assigned_shops,
                "updatedAt": Utc::now(),
            }),
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
