//! Storefront browsing: directory, profiles, and the catalog.

use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::Value;

use cakestack_integration_tests::{read_json, request, seed_shop, send, storefront_router};
use cakestack_store::MemoryStore;
use cakestack_store::repos::ShopRepo;

fn get(path: &str) -> axum::http::Request<axum::body::Body> {
    request("GET", path, None, None)
}

#[tokio::test]
async fn directory_lists_only_active_shops() {
    let store = Arc::new(MemoryStore::new());
    seed_shop(&store, "sweet-treats").await;
    let closed = seed_shop(&store, "closed-bakery").await;
    ShopRepo::new(store.as_ref())
        .set_active(&closed.shop_id, false)
        .await
        .expect("deactivate");

    let app = storefront_router(store);
    let response = send(&app, get("/shops")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let shops = read_json(response).await;
    let shops = shops.as_array().expect("array body");
    assert_eq!(shops.len(), 1);
    assert_eq!(shops[0]["id"], "sweet-treats");
}

#[tokio::test]
async fn profile_includes_branding_and_settings() {
    let store = Arc::new(MemoryStore::new());
    seed_shop(&store, "sweet-treats").await;

    let app = storefront_router(store);
    let response = send(&app, get("/shop/sweet-treats")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    assert_eq!(body["id"], "sweet-treats");
    assert_eq!(body["name"], "Sweet Treats Bakery");
    assert_eq!(body["primaryColor"], "#ec4899");
    assert_eq!(body["settings"]["minimumOrder"], 300);
    assert_eq!(body["settings"]["deliveryFee"], 100);
}

#[tokio::test]
async fn unknown_and_deactivated_shops_are_not_found() {
    let store = Arc::new(MemoryStore::new());
    let closed = seed_shop(&store, "closed-bakery").await;
    ShopRepo::new(store.as_ref())
        .set_active(&closed.shop_id, false)
        .await
        .expect("deactivate");

    let app = storefront_router(store);
    let response = send(&app, get("/shop/no-such-shop")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Deactivated shops look exactly like missing ones.
    let response = send(&app, get("/shop/closed-bakery")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(&app, get("/shop/closed-bakery/cakes")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn catalog_lists_cakes_and_filters_by_tag() {
    let store = Arc::new(MemoryStore::new());
    seed_shop(&store, "sweet-treats").await;

    let app = storefront_router(store);
    let response = send(&app, get("/shop/sweet-treats/cakes")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let cakes = read_json(response).await;
    assert_eq!(cakes.as_array().expect("array body").len(), 2);

    let response = send(&app, get("/shop/sweet-treats/cakes?tag=bestseller")).await;
    let cakes = read_json(response).await;
    let cakes = cakes.as_array().expect("array body");
    assert_eq!(cakes.len(), 1);
    assert_eq!(cakes[0]["name"], "Chocolate Fudge Cake");
}

#[tokio::test]
async fn cake_detail_carries_the_tier_table_and_mirrored_base_price() {
    let store = Arc::new(MemoryStore::new());
    let seeded = seed_shop(&store, "sweet-treats").await;

    let app = storefront_router(store);
    let response = send(
        &app,
        get(&format!("/shop/sweet-treats/cake/{}", seeded.tiered_cake)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    assert_eq!(body["tierPricing"]["tier1"], 500);
    assert_eq!(body["tierPricing"]["tier2"], 700);
    assert_eq!(body["tierNames"]["tier2"], "8-inch");
    // basePrice mirrors the lowest tier for legacy readers.
    assert_eq!(body["basePrice"], 500);

    let response = send(&app, get("/shop/sweet-treats/cake/no-such-cake")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn toppings_listing_is_in_creation_order() {
    let store = Arc::new(MemoryStore::new());
    seed_shop(&store, "sweet-treats").await;

    let app = storefront_router(store);
    let response = send(&app, get("/shop/sweet-treats/toppings")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let toppings = read_json(response).await;
    let names: Vec<&str> = toppings
        .as_array()
        .expect("array body")
        .iter()
        .map(|t| t["name"].as_str().expect("name"))
        .collect();
    assert_eq!(names, ["Fresh Strawberries", "Chocolate Drip"]);
    assert_eq!(toppings[0]["price"], 50);
}

#[tokio::test]
async fn an_empty_platform_has_an_empty_directory() {
    let store = Arc::new(MemoryStore::new());
    let app = storefront_router(store);

    let response = send(&app, get("/shops")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await, Value::Array(vec![]));
}
