//! Deterministic price computation for cake configurations.
//!
//! Pure functions with no side effects or I/O: the calling surface loads the
//! catalog data, this module turns a configuration (tier + toppings +
//! quantity) into amounts. Placed orders snapshot the computed prices into
//! their line items, so later catalog edits never change historical totals.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Money, MoneyError, TierId};

/// Pricing input errors. All caller-fixable, never retried.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    /// The requested tier is absent from the price table or carries a
    /// non-positive amount.
    #[error("invalid tier: {0}")]
    InvalidTier(TierId),
    /// Quantity below 1.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(u32),
    /// A negative amount was supplied.
    #[error("invalid amount: {0}")]
    InvalidAmount(i64),
    /// Checked arithmetic overflowed.
    #[error("amount overflow")]
    Overflow,
}

impl From<MoneyError> for PricingError {
    fn from(err: MoneyError) -> Self {
        match err {
            MoneyError::InvalidAmount(amount) => Self::InvalidAmount(amount),
            MoneyError::Overflow => Self::Overflow,
        }
    }
}

/// How a cake is priced.
///
/// Older catalog records carry only a flat `basePrice`; newer records carry a
/// tier price table. The two shapes are one variant type here so call sites
/// never null-check a map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CakePricing {
    /// Ordered tier price table plus optional human labels per tier.
    Tiered {
        prices: BTreeMap<TierId, Money>,
        labels: BTreeMap<TierId, String>,
    },
    /// Legacy single price; every tier request resolves to it.
    Flat { base_price: Money },
}

impl CakePricing {
    /// Build a tiered price table.
    ///
    /// # Errors
    ///
    /// Returns `PricingError::InvalidTier` if no tier carries a positive
    /// price (the table would be unsellable).
    pub fn tiered(
        prices: BTreeMap<TierId, Money>,
        labels: BTreeMap<TierId, String>,
    ) -> Result<Self, PricingError> {
        if !prices.values().any(|price| price.amount() > 0) {
            return Err(PricingError::InvalidTier(TierId::FIRST));
        }
        Ok(Self::Tiered { prices, labels })
    }

    /// Build a legacy flat price.
    #[must_use]
    pub const fn flat(base_price: Money) -> Self {
        Self::Flat { base_price }
    }

    /// Price for the requested tier.
    ///
    /// Flat-priced cakes resolve every tier request to the base price
    /// (legacy compatibility: records predating tier pricing are treated as
    /// a single tier regardless of the identifier passed).
    ///
    /// # Errors
    ///
    /// Returns `PricingError::InvalidTier` if a tiered table has no entry
    /// for `tier`, or the entry is not a positive amount.
    pub fn tier_price(&self, tier: TierId) -> Result<Money, PricingError> {
        match self {
            Self::Tiered { prices, .. } => {
                let price = prices
                    .get(&tier)
                    .copied()
                    .ok_or(PricingError::InvalidTier(tier))?;
                if price.amount() <= 0 {
                    return Err(PricingError::InvalidTier(tier));
                }
                Ok(price)
            }
            Self::Flat { base_price } => Ok(*base_price),
        }
    }

    /// Human label for a tier, falling back to the `N-Tier Cake` convention.
    #[must_use]
    pub fn tier_label(&self, tier: TierId) -> String {
        match self {
            Self::Tiered { labels, .. } => labels
                .get(&tier)
                .cloned()
                .unwrap_or_else(|| format!("{}-Tier Cake", tier.number())),
            Self::Flat { .. } => format!("{}-Tier Cake", tier.number()),
        }
    }

    /// The lowest-numbered tier's price.
    ///
    /// Mirrored into the legacy `basePrice` field on write so records stay
    /// readable by anything predating tier pricing.
    #[must_use]
    pub fn base_price(&self) -> Money {
        match self {
            Self::Tiered { prices, .. } => prices
                .iter()
                .find(|(_, price)| price.amount() > 0)
                .map_or(Money::ZERO, |(_, price)| *price),
            Self::Flat { base_price } => *base_price,
        }
    }

    /// Tiers available for selection, in numeric order.
    #[must_use]
    pub fn tiers(&self) -> Vec<TierId> {
        match self {
            Self::Tiered { prices, .. } => prices.keys().copied().collect(),
            Self::Flat { .. } => vec![TierId::FIRST],
        }
    }
}

/// A topping name/price pair for live pricing lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToppingPrice {
    pub name: String,
    pub price: Money,
}

/// Sum the prices of the selected toppings.
///
/// A selected name that no longer resolves to a catalog topping contributes
/// zero rather than failing: historic configurations must remain priceable
/// after staff delete a topping.
///
/// # Errors
///
/// Returns `PricingError::Overflow` on arithmetic overflow.
pub fn toppings_price<'a>(
    selected: impl IntoIterator<Item = &'a str>,
    available: &[ToppingPrice],
) -> Result<Money, PricingError> {
    let mut total = Money::ZERO;
    for name in selected {
        if let Some(topping) = available.iter().find(|t| t.name == name) {
            total = total.checked_add(topping.price)?;
        }
    }
    Ok(total)
}

/// `(tier_price + toppings_price) * quantity`.
///
/// # Errors
///
/// Returns `PricingError::InvalidQuantity` if `quantity` is below 1, or
/// `PricingError::Overflow` on arithmetic overflow.
pub fn line_total(
    tier_price: Money,
    toppings_price: Money,
    quantity: u32,
) -> Result<Money, PricingError> {
    if quantity < 1 {
        return Err(PricingError::InvalidQuantity(quantity));
    }
    let unit = tier_price.checked_add(toppings_price)?;
    Ok(unit.checked_mul(quantity)?)
}

/// Sum of line totals. An empty list yields zero, not an error; rejecting
/// empty carts is a checkout concern.
///
/// # Errors
///
/// Returns `PricingError::Overflow` on arithmetic overflow.
pub fn order_total(line_totals: impl IntoIterator<Item = Money>) -> Result<Money, PricingError> {
    Ok(Money::checked_sum(line_totals)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn money(amount: i64) -> Money {
        Money::new(amount).expect("valid amount")
    }

    fn tier(n: u32) -> TierId {
        TierId::new(n).expect("valid tier")
    }

    fn two_tier_table() -> CakePricing {
        CakePricing::tiered(
            BTreeMap::from([(tier(1), money(500)), (tier(2), money(700))]),
            BTreeMap::from([(tier(1), "6-inch".to_owned()), (tier(2), "8-inch".to_owned())]),
        )
        .expect("valid table")
    }

    #[test]
    fn tier_price_reads_the_table() {
        let pricing = two_tier_table();
        assert_eq!(pricing.tier_price(tier(1)), Ok(money(500)));
        assert_eq!(pricing.tier_price(tier(2)), Ok(money(700)));
    }

    #[test]
    fn absent_tier_is_invalid() {
        let pricing = two_tier_table();
        assert_eq!(
            pricing.tier_price(tier(3)),
            Err(PricingError::InvalidTier(tier(3)))
        );
    }

    #[test]
    fn zero_priced_tier_is_invalid() {
        let pricing = CakePricing::tiered(
            BTreeMap::from([(tier(1), money(450)), (tier(2), Money::ZERO)]),
            BTreeMap::new(),
        )
        .expect("one positive tier");
        assert_eq!(
            pricing.tier_price(tier(2)),
            Err(PricingError::InvalidTier(tier(2)))
        );
    }

    #[test]
    fn all_zero_table_is_rejected() {
        let result = CakePricing::tiered(
            BTreeMap::from([(tier(1), Money::ZERO)]),
            BTreeMap::new(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn flat_pricing_answers_every_tier() {
        // Scenario D: basePrice=450, no tier table.
        let pricing = CakePricing::flat(money(450));
        assert_eq!(pricing.tier_price(tier(1)), Ok(money(450)));
        assert_eq!(pricing.tier_price(tier(2)), Ok(money(450)));
    }

    #[test]
    fn base_price_mirrors_lowest_tier() {
        assert_eq!(two_tier_table().base_price(), money(500));
        assert_eq!(CakePricing::flat(money(450)).base_price(), money(450));
    }

    #[test]
    fn tier_labels_fall_back_to_convention() {
        let pricing = two_tier_table();
        assert_eq!(pricing.tier_label(tier(1)), "6-inch");
        assert_eq!(pricing.tier_label(tier(3)), "3-Tier Cake");
    }

    #[test]
    fn missing_toppings_cost_nothing() {
        let available = vec![
            ToppingPrice {
                name: "Strawberry".to_owned(),
                price: money(50),
            },
            ToppingPrice {
                name: "Chocolate Drip".to_owned(),
                price: money(75),
            },
        ];
        let total = toppings_price(
            ["Strawberry", "Deleted Topping", "Chocolate Drip"],
            &available,
        )
        .expect("no overflow");
        assert_eq!(total, money(125));
    }

    #[test]
    fn line_total_multiplies_unit_price() {
        // Scenario A: tier2=700, toppings 50+75, quantity 2 -> 825 * 2.
        let pricing = CakePricing::tiered(
            BTreeMap::from([(tier(1), money(500)), (tier(2), money(700))]),
            BTreeMap::new(),
        )
        .expect("valid table");
        let tier_price = pricing.tier_price(tier(2)).expect("tier2 exists");
        let toppings = money(125);
        let unit = tier_price.checked_add(toppings).expect("no overflow");
        assert_eq!(unit, money(825));
        assert_eq!(line_total(tier_price, toppings, 2), Ok(money(1650)));
    }

    #[test]
    fn zero_quantity_is_invalid() {
        assert_eq!(
            line_total(money(500), money(50), 0),
            Err(PricingError::InvalidQuantity(0))
        );
    }

    #[test]
    fn order_total_of_nothing_is_zero() {
        assert_eq!(order_total([]), Ok(Money::ZERO));
    }

    #[test]
    fn order_total_is_order_independent() {
        let lines = [money(1650), money(450), money(30)];
        let reversed: Vec<Money> = lines.iter().rev().copied().collect();
        assert_eq!(order_total(lines), order_total(reversed));
        assert_eq!(order_total(lines), Ok(money(2130)));
    }
}
