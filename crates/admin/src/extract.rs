//! Authentication extractor.
//!
//! Builds the per-request [`Actor`] snapshot: bearer token claims from the
//! identity provider plus the caller's `admins/{uid}` record, fetched once.
//! Handlers never re-fetch the actor mid-request.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use cakestack_core::AdminUid;
use cakestack_core::access::Actor;
use cakestack_store::repos::AdminRepo;

use crate::error::AppError;
use crate::state::AppState;

/// The authenticated caller.
///
/// `actor` is what the access policy evaluates. An authenticated account
/// with no admin record and no superadmin claim is role-less: it maps to
/// `Actor::Anonymous` and every staff action denies with `NoRole`. The
/// claims stay available for flows that precede role assignment
/// (onboarding).
#[derive(Debug)]
pub struct CurrentActor {
    pub uid: AdminUid,
    pub email: Option<String>,
    pub actor: Actor,
}

impl FromRequestParts<AppState> for CurrentActor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or_else(|| AppError::Unauthorized("missing bearer token".to_string()))?;

        let claims = state.verifier().verify(token).await?;

        let actor = if claims.super_admin {
            Actor::SuperAdmin {
                uid: claims.uid.clone(),
            }
        } else {
            match AdminRepo::new(state.store()).get(&claims.uid).await? {
                Some(admin) => Actor::Admin {
                    uid: claims.uid.clone(),
                    assigned_shops: admin.doc.assigned_shops,
                },
                None => Actor::Anonymous,
            }
        };

        Ok(Self {
            uid: claims.uid,
            email: claims.email,
            actor,
        })
    }
}
