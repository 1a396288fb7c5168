//! Newtype IDs for type-safe entity references.
//!
//! Document IDs in the hosted store are opaque strings, so every ID here
//! wraps a `String`. The `define_doc_id!` macro prevents accidentally mixing
//! IDs from different entity types; `ShopId` additionally validates its slug
//! shape because shop IDs appear in URLs and storage paths.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Macro to define a type-safe document ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `as_str()`
/// - `Display` and `From<&str>`/`From<String>` implementations
macro_rules! define_doc_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

define_doc_id!(CakeId);
define_doc_id!(ToppingId);
define_doc_id!(OrderId);

/// Identity-provider user ID for staff accounts.
define_doc_id!(AdminUid);

/// Error produced when a shop slug fails validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShopIdError {
    #[error("shop id must not be empty")]
    Empty,
    #[error("shop id contains invalid character: {0:?}")]
    InvalidCharacter(char),
}

/// A shop (tenant) identifier.
///
/// Shop IDs are URL slugs (`sweet-treats`), so unlike the other document IDs
/// they are validated on construction: lowercase ASCII alphanumerics and
/// hyphens only, never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShopId(String);

impl ShopId {
    /// Parse and validate a shop slug.
    ///
    /// # Errors
    ///
    /// Returns `ShopIdError` if the slug is empty or contains characters
    /// outside `[a-z0-9-]`.
    pub fn parse(slug: &str) -> Result<Self, ShopIdError> {
        if slug.is_empty() {
            return Err(ShopIdError::Empty);
        }
        if let Some(c) = slug
            .chars()
            .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-'))
        {
            return Err(ShopIdError::InvalidCharacter(c));
        }
        Ok(Self(slug.to_owned()))
    }

    /// Get the underlying slug.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ShopId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ShopId {
    type Err = ShopIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// A cake tier identifier.
///
/// Tiers are numbered from 1 and serialized in the legacy `tierN` key format
/// used by the tier price table (`tier1`, `tier2`, ...). The numeric wrapper
/// gives tiers a total order, so a `BTreeMap<TierId, Money>` iterates in
/// tier order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TierId(u32);

/// Error produced when a tier key fails to parse.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid tier key: {0}")]
pub struct TierIdError(pub String);

impl TierId {
    /// The lowest tier. Flat-priced legacy cakes are treated as having only
    /// this tier.
    pub const FIRST: Self = Self(1);

    /// Create a tier ID from its 1-based number.
    ///
    /// # Errors
    ///
    /// Returns `TierIdError` for tier number 0.
    pub fn new(number: u32) -> Result<Self, TierIdError> {
        if number == 0 {
            return Err(TierIdError("tier0".to_owned()));
        }
        Ok(Self(number))
    }

    /// The 1-based tier number.
    #[must_use]
    pub const fn number(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for TierId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "tier{}", self.0)
    }
}

impl std::str::FromStr for TierId {
    type Err = TierIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let number = s
            .strip_prefix("tier")
            .and_then(|n| n.parse::<u32>().ok())
            .ok_or_else(|| TierIdError(s.to_owned()))?;
        Self::new(number).map_err(|_| TierIdError(s.to_owned()))
    }
}

impl TryFrom<String> for TierId {
    type Error = TierIdError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<TierId> for String {
    fn from(tier: TierId) -> Self {
        tier.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shop_id_accepts_slugs() {
        assert!(ShopId::parse("sweet-treats").is_ok());
        assert!(ShopId::parse("shop1").is_ok());
    }

    #[test]
    fn shop_id_rejects_bad_input() {
        assert_eq!(ShopId::parse(""), Err(ShopIdError::Empty));
        assert_eq!(
            ShopId::parse("Sweet Treats"),
            Err(ShopIdError::InvalidCharacter('S'))
        );
        assert_eq!(
            ShopId::parse("shop.one"),
            Err(ShopIdError::InvalidCharacter('.'))
        );
    }

    #[test]
    fn tier_id_round_trips_legacy_keys() {
        let tier: TierId = "tier2".parse().expect("valid tier");
        assert_eq!(tier.number(), 2);
        assert_eq!(tier.to_string(), "tier2");
    }

    #[test]
    fn tier_id_rejects_malformed_keys() {
        assert!("tier".parse::<TierId>().is_err());
        assert!("tier0".parse::<TierId>().is_err());
        assert!("size-6".parse::<TierId>().is_err());
    }

    #[test]
    fn tier_ids_sort_numerically() {
        let mut tiers: Vec<TierId> = ["tier10", "tier2", "tier1"]
            .iter()
            .map(|s| s.parse().expect("valid tier"))
            .collect();
        tiers.sort();
        assert_eq!(
            tiers.iter().map(ToString::to_string).collect::<Vec<_>>(),
            vec!["tier1", "tier2", "tier10"]
        );
    }
}
