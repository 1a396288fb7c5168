//! Order documents.
//!
//! Line items are price snapshots taken at checkout: names, labels, and
//! amounts are copied out of the catalog so later edits or deletions never
//! change what a customer was quoted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cakestack_core::{Money, OrderId, OrderStatus};

/// One configured cake within an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineDoc {
    pub cake_name: String,
    pub tier_label: String,
    #[serde(default)]
    pub flavor: Option<String>,
    #[serde(default)]
    pub toppings: Vec<String>,
    pub quantity: u32,
    pub unit_price: Money,
    pub line_total: Money,
}

/// An order document at `shops/{shopId}/orders/{orderId}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDoc {
    pub customer_name: String,
    pub customer_email: String,
    #[serde(default)]
    pub customer_phone: String,
    #[serde(default)]
    pub is_pickup: bool,
    #[serde(default)]
    pub delivery_address: Option<String>,
    #[serde(default)]
    pub requested_date: Option<String>,
    #[serde(default)]
    pub requested_time: Option<String>,
    #[serde(default)]
    pub special_instructions: Option<String>,
    pub items: Vec<OrderLineDoc>,
    pub total_amount: Money,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// An order together with its identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    pub id: OrderId,
    #[serde(flatten)]
    pub doc: OrderDoc,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_full_document() {
        let doc: OrderDoc = serde_json::from_value(json!({
            "customerName": "Maria Santos",
            "customerEmail": "maria@example.com",
            "customerPhone": "+63 917 555 0101",
            "isPickup": false,
            "deliveryAddress": "12 Mabini St, Quezon City",
            "requestedDate": "2026-09-01",
            "requestedTime": "14:00",
            "items": [{
                "cakeName": "Chocolate Fudge Cake",
                "tierLabel": "8-inch",
                "toppings": ["Fresh Strawberries"],
                "quantity": 2,
                "unitPrice": 825,
                "lineTotal": 1650,
            }],
            "totalAmount": 1650,
            "status": "pending-approval",
            "createdAt": "2026-08-25T09:00:00Z",
        }))
        .expect("decodes");
        assert_eq!(doc.status, OrderStatus::PendingApproval);
        assert_eq!(doc.items[0].line_total, Money::new(1650).expect("valid"));
    }

    #[test]
    fn missing_status_defaults_to_pending_approval() {
        let doc: OrderDoc = serde_json::from_value(json!({
            "customerName": "Maria Santos",
            "customerEmail": "maria@example.com",
            "items": [],
            "totalAmount": 0,
        }))
        .expect("decodes");
        assert_eq!(doc.status, OrderStatus::PendingApproval);
    }
}
