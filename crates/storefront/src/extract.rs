//! Request extractors.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use cakestack_core::ShopId;
use cakestack_core::tenant::resolve_shop;

use crate::error::AppError;
use crate::state::AppState;

/// The shop a `/shop/{shopId}/...` request is scoped to.
///
/// Resolution is strict: a malformed slug rejects the request rather than
/// guessing a tenant. Whether the shop actually exists is the handler's
/// concern.
#[derive(Debug)]
pub struct ShopScope(pub ShopId);

impl FromRequestParts<AppState> for ShopScope {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        resolve_shop(parts.uri.path())
            .map(Self)
            .ok_or_else(|| AppError::NotFound("shop".to_string()))
    }
}
