//! Demo data seeding command.
//!
//! Creates a shop with a small catalog so a fresh environment has something
//! to browse: one tier-priced cake, one legacy flat-priced cake, two
//! toppings, and storefront settings.
//!
//! # Usage
//!
//! ```bash
//! cake-cli seed
//! cake-cli seed --shop my-bakery
//! ```

use std::collections::BTreeMap;

use chrono::Utc;
use serde_json::json;
use thiserror::Error;

use cakestack_core::pricing::{CakePricing, PricingError};
use cakestack_core::{Money, MoneyError, ShopId, ShopIdError, TierId, TierIdError};
use cakestack_store::models::{CakeDoc, ShopDoc, ToppingDoc};
use cakestack_store::repos::{CakeRepo, SettingsRepo, ShopRepo, ToppingRepo};
use cakestack_store::{PgDocumentStore, StoreError};

use super::ConnectError;

/// Errors that can occur during seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    /// Connection setup error.
    #[error(transparent)]
    Connect(#[from] ConnectError),

    /// Document store error.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Invalid shop slug passed on the command line.
    #[error("Invalid shop slug: {0}")]
    Slug(#[from] ShopIdError),

    /// Invalid seed data (should not happen with the built-in fixtures).
    #[error("Invalid seed data: {0}")]
    Money(#[from] MoneyError),

    /// Invalid seed data (should not happen with the built-in fixtures).
    #[error("Invalid seed data: {0}")]
    Tier(#[from] TierIdError),

    /// Invalid seed data (should not happen with the built-in fixtures).
    #[error("Invalid seed data: {0}")]
    Pricing(#[from] PricingError),
}

/// Seed a demo shop under the given slug.
pub async fn run(slug: &str) -> Result<(), SeedError> {
    let shop_id = ShopId::parse(slug)?;
    let pool = super::connect().await?;
    let store = PgDocumentStore::new(pool);
    let now = Utc::now();

    tracing::info!("Seeding shop: {}", shop_id);

    let shops = ShopRepo::new(&store);
    shops
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
        .await?;

    let cakes = CakeRepo::new(&store);

    let mut tier_prices = BTreeMap::new();
    tier_prices.insert(TierId::FIRST, Money::new(500)?);
    tier_prices.insert(TierId::new(2)?, Money::new(700)?);
    let mut tier_labels = BTreeMap::new();
    tier_labels.insert(TierId::FIRST, "6-inch".to_owned());
    tier_labels.insert(TierId::new(2)?, "8-inch".to_owned());
    let tiered = CakePricing::tiered(tier_prices, tier_labels)?;

    cakes
        .create(
            &shop_id,
            &CakeDoc::new(
                "Chocolate Fudge Cake".to_owned(),
                "Rich chocolate sponge with fudge frosting.".to_owned(),
                vec!["Chocolate".to_owned(), "Mocha".to_owned()],
                vec!["bestseller".to_owned()],
                None,
                &tiered,
                now,
            ),
        )
        .await?;

    cakes
        .create(
            &shop_id,
            &CakeDoc::new(
                "Vanilla Dream Cake".to_owned(),
                "Classic vanilla sponge with buttercream.".to_owned(),
                vec!["Vanilla".to_owned()],
                vec![],
                None,
                &CakePricing::flat(Money::new(450)?),
                now,
            ),
        )
        .await?;

    let toppings = ToppingRepo::new(&store);
    toppings
        .create(
            &shop_id,
            &ToppingDoc::new("Fresh Strawberries".to_owned(), Money::new(50)?, now),
        )
        .await?;
    toppings
        .create(
            &shop_id,
            &ToppingDoc::new("Chocolate Drip".to_owned(), Money::new(75)?, now),
        )
        .await?;

    SettingsRepo::new(&store)
        .upsert(
            &shop_id,
            json!({
                "deliveryEnabled": true,
                "pickupEnabled": true,
                "deliveryFee": 100,
                "minimumOrder": 300,
                "contactEmail": "hello@sweet-treats.example",
            }),
        )
        .await?;

    tracing::info!("Seed complete: 2 cakes, 2 toppings, settings");
    Ok(())
}
