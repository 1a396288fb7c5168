//! Catalog item (cake) documents.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cakestack_core::pricing::CakePricing;
use cakestack_core::{CakeId, Money, TierId};

use crate::error::StoreError;

/// A cake document at `shops/{shopId}/cakes/{cakeId}`.
///
/// Two pricing representations coexist in stored data: modern records carry
/// a `tierPricing` table (with optional `tierNames` labels), legacy records
/// carry only `basePrice`. Writes always mirror the lowest tier's price into
/// `basePrice` so older readers keep working; reads normalize both shapes
/// into [`CakePricing`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CakeDoc {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub flavors: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub base_price: Option<Money>,
    #[serde(default)]
    pub tier_pricing: Option<BTreeMap<TierId, Money>>,
    #[serde(default)]
    pub tier_names: Option<BTreeMap<TierId, String>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl CakeDoc {
    /// Build a cake document from validated pricing, mirroring the base
    /// price field.
    #[must_use]
    pub fn new(
        name: String,
        description: String,
        flavors: Vec<String>,
        tags: Vec<String>,
        image_url: Option<String>,
        pricing: &CakePricing,
        now: DateTime<Utc>,
    ) -> Self {
        let (tier_pricing, tier_names) = match pricing {
            CakePricing::Tiered { prices, labels } => {
                (Some(prices.clone()), Some(labels.clone()))
            }
            CakePricing::Flat { .. } => (None, None),
        };
        Self {
            name,
            description,
            flavors,
            tags,
            image_url,
            base_price: Some(pricing.base_price()),
            tier_pricing,
            tier_names,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    /// Normalize the stored pricing fields into the variant type.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::DataCorruption` if the record carries neither a
    /// usable tier table nor a base price.
    pub fn pricing(&self) -> Result<CakePricing, StoreError> {
        if let Some(prices) = &self.tier_pricing
            && !prices.is_empty()
        {
            let labels = self.tier_names.clone().unwrap_or_default();
            return CakePricing::tiered(prices.clone(), labels).map_err(|e| {
                StoreError::DataCorruption(format!("cake {:?}: {e}", self.name))
            });
        }
        match self.base_price {
            Some(base) => Ok(CakePricing::flat(base)),
            None => Err(StoreError::DataCorruption(format!(
                "cake {:?}: no tier pricing and no base price",
                self.name
            ))),
        }
    }
}

/// A cake together with its identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cake {
    pub id: CakeId,
    #[serde(flatten)]
    pub doc: CakeDoc,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn money(amount: i64) -> Money {
        Money::new(amount).expect("valid amount")
    }

    #[test]
    fn tiered_document_decodes_and_normalizes() {
        let doc: CakeDoc = serde_json::from_value(json!({
            "name": "Chocolate Fudge Cake",
            "basePrice": 500,
            "tierPricing": {"tier1": 500, "tier2": 700},
            "tierNames": {"tier1": "6-inch", "tier2": "8-inch"},
        }))
        .expect("decodes");
        let pricing = doc.pricing().expect("valid pricing");
        assert_eq!(
            pricing.tier_price(TierId::FIRST).expect("tier1"),
            money(500)
        );
        assert_eq!(pricing.tier_label(TierId::FIRST), "6-inch");
    }

    #[test]
    fn legacy_document_falls_back_to_base_price() {
        let doc: CakeDoc = serde_json::from_value(json!({
            "name": "Vanilla Dream Cake",
            "basePrice": 450,
        }))
        .expect("decodes");
        let pricing = doc.pricing().expect("valid pricing");
        assert_eq!(pricing, CakePricing::flat(money(450)));
    }

    #[test]
    fn priceless_document_is_corrupt() {
        let doc: CakeDoc = serde_json::from_value(json!({
            "name": "Mystery Cake",
        }))
        .expect("decodes");
        assert!(matches!(
            doc.pricing(),
            Err(StoreError::DataCorruption(_))
        ));
    }

    #[test]
    fn writes_mirror_base_price_from_lowest_tier() {
        let pricing = CakePricing::tiered(
            BTreeMap::from([
                (TierId::new(1).expect("tier"), money(500)),
                (TierId::new(2).expect("tier"), money(700)),
            ]),
            BTreeMap::new(),
        )
        .expect("valid table");
        let doc = CakeDoc::new(
            "Chocolate Fudge Cake".to_owned(),
            String::new(),
            vec!["Chocolate".to_owned()],
            vec!["Birthday".to_owned()],
            None,
            &pricing,
            Utc::now(),
        );
        assert_eq!(doc.base_price, Some(money(500)));
        let value = serde_json::to_value(&doc).expect("serialize");
        assert_eq!(value["tierPricing"]["tier2"], 700);
    }
}
