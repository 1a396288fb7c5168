//! HTTP route handlers for the public storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                            - Liveness check
//! GET  /health/ready                      - Readiness check
//!
//! # Directory
//! GET  /shops                             - Active shop directory
//!
//! # Shop-scoped (tenant in the path)
//! GET  /shop/{shopId}                     - Shop profile + settings
//! GET  /shop/{shopId}/cakes               - Catalog listing (?tag= filter)
//! GET  /shop/{shopId}/cake/{cakeId}       - Cake detail
//! GET  /shop/{shopId}/toppings            - Selectable add-ons
//! POST /shop/{shopId}/cake/{cakeId}/quote - Price a configuration
//! POST /shop/{shopId}/checkout            - Place an order
//! GET  /shop/{shopId}/track/{orderId}     - Public order tracking
//! ```
//!
//! The cart itself is client-local; the server only prices configurations
//! and accepts the final checkout payload.

pub mod catalog;
pub mod orders;
pub mod shops;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create all routes for the storefront.
///
/// No authorization layer is mounted: every route here corresponds to one of
/// the anonymous grants in `cakestack_core::access` (`read-catalog`,
/// `read-toppings`, `read-options`, `create-order`), so openness is the
/// policy rather than a bypass of it.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/shops", get(shops::index))
        .route("/shop/{shop_id}", get(shops::show))
        .route("/shop/{shop_id}/cakes", get(catalog::cakes))
        .route("/shop/{shop_id}/cake/{cake_id}", get(catalog::cake))
        .route("/shop/{shop_id}/toppings", get(catalog::toppings))
        .route("/shop/{shop_id}/cake/{cake_id}/quote", post(orders::quote))
        .route("/shop/{shop_id}/checkout", post(orders::checkout))
        .route("/shop/{shop_id}/track/{order_id}", get(orders::track))
}
