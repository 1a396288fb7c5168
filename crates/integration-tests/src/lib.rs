//! In-process integration harness for the HTTP surfaces.
//!
//! The storefront and admin routers are exercised with
//! `tower::ServiceExt::oneshot` over the in-memory document store and a
//! static token table - no sockets, no database, no identity provider.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p cakestack-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::missing_panics_doc)]

use std::collections::BTreeMap;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, header};
use axum::response::Response;
use chrono::Utc;
use http_body_util::BodyExt;
use secrecy::SecretString;
use serde_json::Value;
use tower::ServiceExt;

use cakestack_admin::config::{AdminConfig, IdentityConfig};
use cakestack_admin::identity::{StaticTokenVerifier, TokenClaims};
use cakestack_core::pricing::CakePricing;
use cakestack_core::{AdminUid, CakeId, Money, ShopId, TierId};
use cakestack_store::MemoryStore;
use cakestack_store::models::{AdminDoc, CakeDoc, ShopDoc, ToppingDoc};
use cakestack_store::repos::{AdminRepo, CakeRepo, SettingsRepo, ShopRepo, ToppingRepo};

/// Storefront router over an in-memory store.
#[must_use]
pub fn storefront_router(store: Arc<MemoryStore>) -> Router {
    let config = cakestack_storefront::config::StorefrontConfig {
        database_url: SecretString::from("postgres://unused"),
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        sentry_dsn: None,
        sentry_environment: None,
    };
    let state = cakestack_storefront::state::AppState::new(config, store, None);
    cakestack_storefront::routes::routes().with_state(state)
}

/// Admin router over an in-memory store and a static token table.
#[must_use]
pub fn admin_router(store: Arc<MemoryStore>, verifier: Arc<StaticTokenVerifier>) -> Router {
    let config = AdminConfig {
        database_url: SecretString::from("postgres://unused"),
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        identity: IdentityConfig {
            api_url: "http://identity.invalid".to_owned(),
            api_key: SecretString::from("unused"),
        },
        sentry_dsn: None,
        sentry_environment: None,
    };
    let state = cakestack_admin::state::AppState::new(config, store, verifier, None);
    cakestack_admin::routes::routes().with_state(state)
}

/// Build a request. A JSON body sets the content type; a token becomes a
/// bearer `Authorization` header.
#[must_use]
pub fn request(method: &str, path: &str, token: Option<&str>, body: Option<&Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    builder.body(body).expect("request builds")
}

/// Fire one request at a router.
pub async fn send(router: &Router, req: Request<Body>) -> Response {
    router.clone().oneshot(req).await.expect("router is infallible")
}

/// Collect a response body as JSON.
pub async fn read_json(response: Response) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body collects")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body is JSON")
}

/// Register a bearer token for the given account.
pub fn register_token(verifier: &StaticTokenVerifier, token: &str, uid: &str, super_admin: bool) {
    verifier.insert(
        token,
        TokenClaims {
            uid: AdminUid::new(uid),
            email: Some(format!("{uid}@example.com")),
            super_admin,
        },
    );
}

/// Create an admin record assigned to the given shops.
pub async fn seed_admin(store: &MemoryStore, uid: &str, shops: &[&ShopId]) {
    let doc = AdminDoc::new(
        format!("{uid}@example.com"),
        shops.iter().map(|&s| s.clone()).collect(),
        Utc::now(),
    );
    AdminRepo::new(store)
        .create(&AdminUid::new(uid), &doc)
        .await
        .expect("admin record created");
}

#[must_use]
pub fn money(amount: i64) -> Money {
    Money::new(amount).expect("non-negative amount")
}

#[must_use]
pub fn tier(number: u32) -> TierId {
    TierId::new(number).expect("positive tier number")
}

/// IDs of the documents created by [`seed_shop`].
pub struct SeededShop {
    pub shop_id: ShopId,
    /// "Chocolate Fudge Cake": tier1 500 ("6-inch"), tier2 700 ("8-inch").
    pub tiered_cake: CakeId,
    /// "Vanilla Dream Cake": legacy flat 450.
    pub flat_cake: CakeId,
}

/// Seed a shop with a small catalog: two cakes, two toppings
/// ("Fresh Strawberries" 50, "Chocolate Drip" 75), and settings with a
/// delivery fee of 100 and a minimum order of 300.
pub async fn seed_shop(store: &MemoryStore, slug: &str) -> SeededShop {
    let shop_id = ShopId::parse(slug).expect("valid slug");
    // Listings order by createdAt, so seeded documents get distinct stamps.
    let now = Utc::now();
    let mut stamp = {
        let mut next = now;
        move || {
            next = next + chrono::Duration::seconds(1);
            next
        }
    };

    ShopRepo::new(store)
        .create(
            &shop_id,
            &ShopDoc::new(
                "Sweet Treats Bakery".to_owned(),
                "Homemade cakes baked fresh to order.".to_owned(),
                None,
                None,
                None,
                now,
            ),
        )
        .await
        .expect("shop created");

    let cakes = CakeRepo::new(store);
    let tiered = CakePricing::tiered(
        BTreeMap::from([(tier(1), money(500)), (tier(2), money(700))]),
        BTreeMap::from([(tier(1), "6-inch".to_owned()), (tier(2), "8-inch".to_owned())]),
    )
    .expect("valid tier table");
    let tiered_cake = cakes
        .create(
            &shop_id,
            &CakeDoc::new(
                "Chocolate Fudge Cake".to_owned(),
                "Rich chocolate sponge with fudge frosting.".to_owned(),
                vec!["Chocolate".to_owned(), "Mocha".to_owned()],
                vec!["bestseller".to_owned()],
                None,
                &tiered,
                stamp(),
            ),
        )
        .await
        .expect("tiered cake created");
    let flat_cake = cakes
        .create(
            &shop_id,
            &CakeDoc::new(
                "Vanilla Dream Cake".to_owned(),
                "Classic vanilla sponge with buttercream.".to_owned(),
                vec!["Vanilla".to_owned()],
                vec![],
                None,
                &CakePricing::flat(money(450)),
                stamp(),
            ),
        )
        .await
        .expect("flat cake created");

    let toppings = ToppingRepo::new(store);
    toppings
        .create(
            &shop_id,
            &ToppingDoc::new("Fresh Strawberries".to_owned(), money(50), stamp()),
        )
        .await
        .expect("topping created");
    toppings
        .create(
            &shop_id,
            &ToppingDoc::new("Chocolate Drip".to_owned(), money(75), stamp()),
        )
        .await
        .expect("topping created");

    SettingsRepo::new(store)
        .upsert(
            &shop_id,
            serde_json::json!({
                "deliveryEnabled": true,
                "pickupEnabled": true,
                "deliveryFee": 100,
                "minimumOrder": 300,
            }),
        )
        .await
        .expect("settings written");

    SeededShop {
        shop_id,
        tiered_cake,
        flat_cake,
    }
}
