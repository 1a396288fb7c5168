//! Shop (tenant) documents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cakestack_core::ShopId;

/// A shop document at `shops/{shopId}`.
///
/// Shops are soft-deactivated via `active` once orders reference them; hard
/// deletion is a superadmin-only cascade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopDoc {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub cover_image_url: Option<String>,
    #[serde(default = "default_primary_color")]
    pub primary_color: String,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_primary_color() -> String {
    "#ec4899".to_owned()
}

const fn default_active() -> bool {
    true
}

impl ShopDoc {
    /// A new active shop with the given branding, stamped at `now`.
    #[must_use]
    pub fn new(
        name: String,
        description: String,
        logo_url: Option<String>,
        cover_image_url: Option<String>,
        primary_color: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            name,
            description,
            logo_url,
            cover_image_url,
            primary_color: primary_color.unwrap_or_else(default_primary_color),
            active: true,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }
}

/// A shop together with its identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Shop {
    pub id: ShopId,
    #[serde(flatten)]
    pub doc: ShopDoc,
}
