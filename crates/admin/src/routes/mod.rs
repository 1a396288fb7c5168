//! HTTP route handlers for the staff console.
//!
//! # Route Structure
//!
//! All routes require a bearer token. Shop-scoped management is gated by
//! the access policy against the caller's assignment set; platform routes
//! require the superadmin claim.
//!
//! ```text
//! GET    /admin/my-shops                                - Shops visible to the caller
//! POST   /admin/onboarding                              - Create a shop and self-assign
//!
//! # Platform (superadmin)
//! GET    /admin/shops                                   - List every shop
//! POST   /admin/shops                                   - Create a shop
//! DELETE /admin/shops/{shopId}                          - Delete a shop (cascade)
//! GET    /admin/admins                                  - List admin records
//! POST   /admin/admins                                  - Create account + record
//! DELETE /admin/admins/{uid}                            - Delete record + account
//! PUT    /admin/admins/{uid}/shops                      - Replace assignment set
//!
//! # Shop management
//! GET    /admin/shops/{shopId}/cakes                    - List cakes
//! POST   /admin/shops/{shopId}/cakes                    - Create cake
//! PUT    /admin/shops/{shopId}/cakes/{cakeId}           - Update cake
//! DELETE /admin/shops/{shopId}/cakes/{cakeId}           - Delete cake
//! GET    /admin/shops/{shopId}/toppings                 - List toppings
//! POST   /admin/shops/{shopId}/toppings                 - Create topping
//! PUT    /admin/shops/{shopId}/toppings/{toppingId}     - Update topping
//! DELETE /admin/shops/{shopId}/toppings/{toppingId}     - Delete topping
//! GET    /admin/shops/{shopId}/settings                 - Read settings
//! PUT    /admin/shops/{shopId}/settings                 - Update settings
//! GET    /admin/shops/{shopId}/orders                   - List orders
//! GET    /admin/shops/{shopId}/orders/{orderId}         - Order detail
//! PUT    /admin/shops/{shopId}/orders/{orderId}/status  - Advance the lifecycle
//! ```

pub mod admins;
pub mod catalog;
pub mod orders;
pub mod shops;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use cakestack_core::ShopId;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Create all routes for the admin console.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin/my-shops", get(shops::my_shops))
        .route("/admin/onboarding", post(shops::onboarding))
        .route("/admin/shops", get(shops::index).post(shops::create))
        .route("/admin/shops/{shop_id}", delete(shops::remove))
        .route(
            "/admin/shops/{shop_id}/cakes",
            get(catalog::list_cakes).post(catalog::create_cake),
        )
        .route(
            "/admin/shops/{shop_id}/cakes/{cake_id}",
            put(catalog::update_cake).delete(catalog::delete_cake),
        )
        .route(
            "/admin/shops/{shop_id}/toppings",
            get(catalog::list_toppings).post(catalog::create_topping),
        )
        .route(
            "/admin/shops/{shop_id}/toppings/{topping_id}",
            put(catalog::update_topping).delete(catalog::delete_topping),
        )
        .route(
            "/admin/shops/{shop_id}/settings",
            get(catalog::get_settings).put(catalog::update_settings),
        )
        .route("/admin/shops/{shop_id}/orders", get(orders::index))
        .route("/admin/shops/{shop_id}/orders/{order_id}", get(orders::show))
        .route(
            "/admin/shops/{shop_id}/orders/{order_id}/status",
            put(orders::update_status),
        )
        .route("/admin/admins", get(admins::index).post(admins::create))
        .route("/admin/admins/{uid}", delete(admins::remove))
        .route("/admin/admins/{uid}/shops", put(admins::assign))
}

/// Parse a shop path segment.
///
/// A slug that cannot exist maps to 404, the same as a slug that does not.
pub(crate) fn parse_shop(slug: &str) -> Result<ShopId> {
    ShopId::parse(slug).map_err(|_| AppError::NotFound(format!("shop {slug}")))
}
