//! Topping documents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cakestack_core::pricing::ToppingPrice;
use cakestack_core::{Money, ToppingId};

/// A topping document at `shops/{shopId}/toppings/{toppingId}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToppingDoc {
    pub name: String,
    pub price: Money,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ToppingDoc {
    /// A new topping stamped at `now`.
    #[must_use]
    pub const fn new(name: String, price: Money, now: DateTime<Utc>) -> Self {
        Self {
            name,
            price,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    /// View as a name/price pair for quoting.
    #[must_use]
    pub fn as_price(&self) -> ToppingPrice {
        ToppingPrice {
            name: self.name.clone(),
            price: self.price,
        }
    }
}

/// A topping together with its identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Topping {
    pub id: ToppingId,
    #[serde(flatten)]
    pub doc: ToppingDoc,
}
