//! Per-shop fulfillment settings, stored at `shops/{shopId}/settings/general`.

use serde::{Deserialize, Serialize};

use cakestack_core::Money;

/// Shop fulfillment and ordering settings.
///
/// A shop with no settings document behaves as if every field took its
/// default: both fulfillment modes enabled, no fees or minimums.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsDoc {
    #[serde(default = "default_enabled")]
    pub delivery_enabled: bool,
    #[serde(default = "default_enabled")]
    pub pickup_enabled: bool,
    #[serde(default)]
    pub delivery_fee: Money,
    #[serde(default)]
    pub minimum_order: Money,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub contact_phone: Option<String>,
}

const fn default_enabled() -> bool {
    true
}

impl Default for SettingsDoc {
    fn default() -> Self {
        Self {
            delivery_enabled: true,
            pickup_enabled: true,
            delivery_fee: Money::ZERO,
            minimum_order: Money::ZERO,
            contact_email: None,
            contact_phone: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_document_defaults_are_permissive() {
        let doc = SettingsDoc::default();
        assert!(doc.delivery_enabled);
        assert!(doc.pickup_enabled);
        assert_eq!(doc.minimum_order, Money::ZERO);
    }

    #[test]
    fn partial_document_keeps_unset_defaults() {
        let doc: SettingsDoc = serde_json::from_value(json!({
            "deliveryEnabled": false,
            "minimumOrder": 500,
        }))
        .expect("decodes");
        assert!(!doc.delivery_enabled);
        assert!(doc.pickup_enabled);
        assert_eq!(doc.minimum_order, Money::new(500).expect("valid"));
        assert_eq!(doc.delivery_fee, Money::ZERO);
    }
}
