//! Storefront quoting, checkout, and public tracking.

use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::json;

use cakestack_integration_tests::{read_json, request, seed_shop, send, storefront_router};
use cakestack_store::MemoryStore;
use cakestack_store::repos::SettingsRepo;

#[tokio::test]
async fn quote_prices_a_tiered_configuration() {
    let store = Arc::new(MemoryStore::new());
    let seeded = seed_shop(&store, "sweet-treats").await;
    let app = storefront_router(store);

    let response = send(
        &app,
        request(
            "POST",
            &format!("/shop/sweet-treats/cake/{}/quote", seeded.tiered_cake),
            None,
            Some(&json!({
                "tier": "tier2",
                "toppings": ["Fresh Strawberries", "Chocolate Drip"],
                "quantity": 2,
            })),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    assert_eq!(body["tierLabel"], "8-inch");
    assert_eq!(body["tierPrice"], 700);
    assert_eq!(body["toppingsPrice"], 125);
    assert_eq!(body["unitPrice"], 825);
    assert_eq!(body["lineTotal"], 1650);
}

#[tokio::test]
async fn quote_ignores_unknown_toppings_and_defaults_the_tier() {
    let store = Arc::new(MemoryStore::new());
    let seeded = seed_shop(&store, "sweet-treats").await;
    let app = storefront_router(store);

    // No tier given: the first tier answers. Unknown topping names price
    // at zero rather than failing the quote.
    let response = send(
        &app,
        request(
            "POST",
            &format!("/shop/sweet-treats/cake/{}/quote", seeded.tiered_cake),
            None,
            Some(&json!({
                "toppings": ["Gold Leaf"],
                "quantity": 1,
            })),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    assert_eq!(body["tierPrice"], 500);
    assert_eq!(body["toppingsPrice"], 0);
    assert_eq!(body["lineTotal"], 500);
}

#[tokio::test]
async fn flat_priced_cakes_answer_every_tier_request() {
    let store = Arc::new(MemoryStore::new());
    let seeded = seed_shop(&store, "sweet-treats").await;
    let app = storefront_router(store);

    let response = send(
        &app,
        request(
            "POST",
            &format!("/shop/sweet-treats/cake/{}/quote", seeded.flat_cake),
            None,
            Some(&json!({ "tier": "tier3", "quantity": 1 })),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    assert_eq!(body["tierPrice"], 450);
    assert_eq!(body["tierLabel"], "3-Tier Cake");
}

#[tokio::test]
async fn requesting_a_missing_tier_is_a_bad_request() {
    let store = Arc::new(MemoryStore::new());
    let seeded = seed_shop(&store, "sweet-treats").await;
    let app = storefront_router(store);

    let response = send(
        &app,
        request(
            "POST",
            &format!("/shop/sweet-treats/cake/{}/quote", seeded.tiered_cake),
            None,
            Some(&json!({ "tier": "tier5", "quantity": 1 })),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn pickup_checkout_snapshots_prices_and_tracks() {
    let store = Arc::new(MemoryStore::new());
    let seeded = seed_shop(&store, "sweet-treats").await;
    let app = storefront_router(store);

    let response = send(
        &app,
        request(
            "POST",
            "/shop/sweet-treats/checkout",
            None,
            Some(&json!({
                "customerName": "Maria Santos",
                "customerEmail": "maria@example.com",
                "isPickup": true,
                "requestedDate": "2026-09-01",
                "items": [
                    {
                        "cakeId": seeded.tiered_cake,
                        "tier": "tier2",
                        "toppings": ["Chocolate Drip"],
                        "quantity": 1,
                    },
                    {
                        "cakeId": seeded.flat_cake,
                        "quantity": 2,
                    },
                ],
            })),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    // (700 + 75) + 450 * 2 = 1675; pickup pays no delivery fee.
    assert_eq!(body["totalAmount"], 1675);
    assert_eq!(body["status"], "pending-approval");
    let order_id = body["orderId"].as_str().expect("order id").to_owned();

    let response = send(
        &app,
        request(
            "GET",
            &format!("/shop/sweet-treats/track/{order_id}"),
            None,
            None,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let tracked = read_json(response).await;
    assert_eq!(tracked["status"], "pending-approval");
    assert_eq!(tracked["totalAmount"], 1675);
    assert_eq!(tracked["isPickup"], true);
    let items = tracked["items"].as_array().expect("items");
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["cakeName"], "Chocolate Fudge Cake");
    assert_eq!(items[0]["tierLabel"], "8-inch");
    assert_eq!(items[0]["unitPrice"], 775);
    assert_eq!(items[1]["lineTotal"], 900);
}

#[tokio::test]
async fn the_chosen_flavor_is_snapshotted_into_the_order() {
    let store = Arc::new(MemoryStore::new());
    let seeded = seed_shop(&store, "sweet-treats").await;
    let app = storefront_router(store);

    let response = send(
        &app,
        request(
            "POST",
            "/shop/sweet-treats/checkout",
            None,
            Some(&json!({
                "customerName": "Maria Santos",
                "customerEmail": "maria@example.com",
                "isPickup": true,
                "items": [{
                    "cakeId": seeded.tiered_cake,
                    "tier": "tier1",
                    "flavor": "Mocha",
                    "quantity": 1,
                }],
            })),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let order_id = read_json(response).await["orderId"]
        .as_str()
        .expect("order id")
        .to_owned();

    let response = send(
        &app,
        request(
            "GET",
            &format!("/shop/sweet-treats/track/{order_id}"),
            None,
            None,
        ),
    )
    .await;
    let tracked = read_json(response).await;
    assert_eq!(tracked["items"][0]["flavor"], "Mocha");
}

#[tokio::test]
async fn a_flavor_the_cake_does_not_offer_is_a_bad_request() {
    let store = Arc::new(MemoryStore::new());
    let seeded = seed_shop(&store, "sweet-treats").await;
    let app = storefront_router(store);

    // "Mocha" belongs to the tiered cake, not the vanilla one.
    let response = send(
        &app,
        request(
            "POST",
            &format!("/shop/sweet-treats/cake/{}/quote", seeded.flat_cake),
            None,
            Some(&json!({ "flavor": "Mocha", "quantity": 1 })),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send(
        &app,
        request(
            "POST",
            "/shop/sweet-treats/checkout",
            None,
            Some(&json!({
                "customerName": "Maria Santos",
                "customerEmail": "maria@example.com",
                "isPickup": true,
                "items": [{
                    "cakeId": seeded.flat_cake,
                    "flavor": "Mocha",
                    "quantity": 1,
                }],
            })),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delivery_checkout_adds_the_fee_and_requires_an_address() {
    let store = Arc::new(MemoryStore::new());
    let seeded = seed_shop(&store, "sweet-treats").await;
    let app = storefront_router(store);

    let line = json!({ "cakeId": seeded.flat_cake, "quantity": 1 });

    // Missing address is rejected before any pricing happens.
    let response = send(
        &app,
        request(
            "POST",
            "/shop/sweet-treats/checkout",
            None,
            Some(&json!({
                "customerName": "Maria Santos",
                "customerEmail": "maria@example.com",
                "isPickup": false,
                "items": [line],
            })),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send(
        &app,
        request(
            "POST",
            "/shop/sweet-treats/checkout",
            None,
            Some(&json!({
                "customerName": "Maria Santos",
                "customerEmail": "maria@example.com",
                "isPickup": false,
                "deliveryAddress": "123 Mango St",
                "items": [line],
            })),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    // 450 subtotal clears the 300 minimum, then the 100 fee lands on top.
    assert_eq!(body["totalAmount"], 550);
}

#[tokio::test]
async fn minimum_order_is_checked_against_the_subtotal() {
    let store = Arc::new(MemoryStore::new());
    let seeded = seed_shop(&store, "sweet-treats").await;
    SettingsRepo::new(store.as_ref())
        .upsert(&seeded.shop_id, json!({ "minimumOrder": 1000 }))
        .await
        .expect("raise the minimum");
    let app = storefront_router(store);

    let response = send(
        &app,
        request(
            "POST",
            "/shop/sweet-treats/checkout",
            None,
            Some(&json!({
                "customerName": "Maria Santos",
                "customerEmail": "maria@example.com",
                "isPickup": true,
                "items": [{ "cakeId": seeded.flat_cake, "quantity": 1 }],
            })),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn disabled_fulfillment_methods_are_rejected() {
    let store = Arc::new(MemoryStore::new());
    let seeded = seed_shop(&store, "sweet-treats").await;
    SettingsRepo::new(store.as_ref())
        .upsert(&seeded.shop_id, json!({ "pickupEnabled": false }))
        .await
        .expect("disable pickup");
    let app = storefront_router(store);

    let response = send(
        &app,
        request(
            "POST",
            "/shop/sweet-treats/checkout",
            None,
            Some(&json!({
                "customerName": "Maria Santos",
                "customerEmail": "maria@example.com",
                "isPickup": true,
                "items": [{ "cakeId": seeded.flat_cake, "quantity": 1 }],
            })),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn empty_carts_and_unknown_cakes_are_rejected() {
    let store = Arc::new(MemoryStore::new());
    seed_shop(&store, "sweet-treats").await;
    let app = storefront_router(store);

    let response = send(
        &app,
        request(
            "POST",
            "/shop/sweet-treats/checkout",
            None,
            Some(&json!({
                "customerName": "Maria Santos",
                "customerEmail": "maria@example.com",
                "isPickup": true,
                "items": [],
            })),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send(
        &app,
        request(
            "POST",
            "/shop/sweet-treats/checkout",
            None,
            Some(&json!({
                "customerName": "Maria Santos",
                "customerEmail": "maria@example.com",
                "isPickup": true,
                "items": [{ "cakeId": "no-such-cake", "quantity": 1 }],
            })),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn tracking_an_unknown_order_is_not_found() {
    let store = Arc::new(MemoryStore::new());
    seed_shop(&store, "sweet-treats").await;
    let app = storefront_router(store);

    let response = send(
        &app,
        request("GET", "/shop/sweet-treats/track/no-such-order", None, None),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
