//! Console authentication and tenant isolation.
//!
//! Staff assigned to one shop must be indistinguishable from staff assigned
//! to none when they probe another tenant: the denial comes back before any
//! shop lookup, so it never reveals whether the target exists.

use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::json;

use cakestack_admin::identity::StaticTokenVerifier;
use cakestack_integration_tests::{
    admin_router, read_json, register_token, request, seed_admin, seed_shop, send,
};
use cakestack_store::MemoryStore;

#[tokio::test]
async fn requests_without_a_valid_token_are_unauthorized() {
    let store = Arc::new(MemoryStore::new());
    let verifier = Arc::new(StaticTokenVerifier::new());
    let app = admin_router(store, verifier);

    let response = send(&app, request("GET", "/admin/my-shops", None, None)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = send(
        &app,
        request("GET", "/admin/my-shops", Some("bogus-token"), None),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn authenticated_accounts_without_a_role_are_denied() {
    let store = Arc::new(MemoryStore::new());
    let verifier = Arc::new(StaticTokenVerifier::new());
    seed_shop(&store, "sweet-treats").await;
    register_token(&verifier, "visitor-token", "visitor-uid", false);
    let app = admin_router(store, verifier);

    let response = send(
        &app,
        request(
            "GET",
            "/admin/shops/sweet-treats/orders",
            Some("visitor-token"),
            None,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = read_json(response).await;
    assert_eq!(body["reason"], "no-role");

    // A role-less caller still gets an empty my-shops listing, not an error.
    let response = send(
        &app,
        request("GET", "/admin/my-shops", Some("visitor-token"), None),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await, json!([]));
}

#[tokio::test]
async fn staff_cannot_reach_shops_outside_their_assignment() {
    let store = Arc::new(MemoryStore::new());
    let verifier = Arc::new(StaticTokenVerifier::new());
    let mine = seed_shop(&store, "sweet-treats").await;
    seed_shop(&store, "rival-bakery").await;
    seed_admin(&store, "staff-uid", &[&mine.shop_id]).await;
    register_token(&verifier, "staff-token", "staff-uid", false);
    let app = admin_router(store, verifier);

    let response = send(
        &app,
        request(
            "GET",
            "/admin/shops/sweet-treats/orders",
            Some("staff-token"),
            None,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(
        &app,
        request(
            "GET",
            "/admin/shops/rival-bakery/orders",
            Some("staff-token"),
            None,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = read_json(response).await;
    assert_eq!(body["reason"], "shop-not-assigned");
}

#[tokio::test]
async fn denials_do_not_reveal_whether_a_shop_exists() {
    let store = Arc::new(MemoryStore::new());
    let verifier = Arc::new(StaticTokenVerifier::new());
    let mine = seed_shop(&store, "sweet-treats").await;
    seed_shop(&store, "rival-bakery").await;
    seed_admin(&store, "staff-uid", &[&mine.shop_id]).await;
    register_token(&verifier, "staff-token", "staff-uid", false);
    let app = admin_router(store, verifier);

    let existing = send(
        &app,
        request(
            "GET",
            "/admin/shops/rival-bakery/cakes",
            Some("staff-token"),
            None,
        ),
    )
    .await;
    let missing = send(
        &app,
        request(
            "GET",
            "/admin/shops/no-such-shop/cakes",
            Some("staff-token"),
            None,
        ),
    )
    .await;

    // Both probes see the same 403 with the same reason code.
    assert_eq!(existing.status(), StatusCode::FORBIDDEN);
    assert_eq!(missing.status(), StatusCode::FORBIDDEN);
    assert_eq!(read_json(existing).await, read_json(missing).await);
}

#[tokio::test]
async fn platform_routes_require_the_superadmin_claim() {
    let store = Arc::new(MemoryStore::new());
    let verifier = Arc::new(StaticTokenVerifier::new());
    let mine = seed_shop(&store, "sweet-treats").await;
    seed_admin(&store, "staff-uid", &[&mine.shop_id]).await;
    register_token(&verifier, "staff-token", "staff-uid", false);
    register_token(&verifier, "root-token", "root-uid", true);
    let app = admin_router(store, verifier);

    let response = send(
        &app,
        request("GET", "/admin/shops", Some("staff-token"), None),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = read_json(response).await;
    assert_eq!(body["reason"], "superadmin-required");

    let response = send(&app, request("GET", "/admin/shops", Some("root-token"), None)).await;
    assert_eq!(response.status(), StatusCode::OK);

    // Shop staff cannot delete shops, not even their own.
    let response = send(
        &app,
        request(
            "DELETE",
            "/admin/shops/sweet-treats",
            Some("staff-token"),
            None,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn my_shops_reflects_the_callers_role() {
    let store = Arc::new(MemoryStore::new());
    let verifier = Arc::new(StaticTokenVerifier::new());
    let mine = seed_shop(&store, "sweet-treats").await;
    seed_shop(&store, "rival-bakery").await;
    seed_admin(&store, "staff-uid", &[&mine.shop_id]).await;
    register_token(&verifier, "staff-token", "staff-uid", false);
    register_token(&verifier, "root-token", "root-uid", true);
    let app = admin_router(store, verifier);

    let response = send(
        &app,
        request("GET", "/admin/my-shops", Some("staff-token"), None),
    )
    .await;
    let body = read_json(response).await;
    let shops = body.as_array().expect("array body");
    assert_eq!(shops.len(), 1);
    assert_eq!(shops[0]["id"], "sweet-treats");

    let response = send(
        &app,
        request("GET", "/admin/my-shops", Some("root-token"), None),
    )
    .await;
    let body = read_json(response).await;
    assert_eq!(body.as_array().expect("array body").len(), 2);
}
