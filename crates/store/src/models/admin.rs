//! Admin role documents at `admins/{uid}`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cakestack_core::{AdminUid, ShopId};

/// A shop-admin role record.
///
/// Presence of the document grants the admin role; `assignedShops` scopes it.
/// Superadmins carry no document here, their standing comes from the token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminDoc {
    pub email: String,
    #[serde(default)]
    pub assigned_shops: Vec<ShopId>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl AdminDoc {
    /// A new admin record stamped at `now`.
    #[must_use]
    pub const fn new(email: String, assigned_shops: Vec<ShopId>, now: DateTime<Utc>) -> Self {
        Self {
            email,
            assigned_shops,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }
}

/// An admin record together with the account identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Admin {
    pub uid: AdminUid,
    #[serde(flatten)]
    pub doc: AdminDoc,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_with_assigned_shops() {
        let doc: AdminDoc = serde_json::from_value(json!({
            "email": "staff@sweet-treats.example",
            "assignedShops": ["sweet-treats", "crumb-and-co"],
        }))
        .expect("decodes");
        assert_eq!(doc.assigned_shops.len(), 2);
        assert_eq!(doc.assigned_shops[0].as_str(), "sweet-treats");
    }

    #[test]
    fn missing_assignments_default_to_empty() {
        let doc: AdminDoc = serde_json::from_value(json!({
            "email": "staff@sweet-treats.example",
        }))
        .expect("decodes");
        assert!(doc.assigned_shops.is_empty());
    }
}
