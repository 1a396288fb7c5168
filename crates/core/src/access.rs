//! Capability-based authorization for tenant-scoped actions.
//!
//! `authorize` is a pure function of the actor snapshot, the action, and the
//! target shop - no hidden lookups. The surface builds the [`Actor`] once per
//! request from the identity provider (token claims plus the caller's admin
//! record) and does not re-fetch it mid-request.
//!
//! A denial is a value, not an error: merely-unauthorized requests return
//! [`Decision::Deny`] with a reason code, and the surface decides how to
//! present it. `ShopNotAssigned` in particular must not be collapsed into
//! "not found" or vice versa - the response must neither confirm nor deny
//! that another tenant's shop exists.

use serde::{Deserialize, Serialize};

use crate::types::{AdminUid, ShopId};

/// The caller identity evaluated by the access policy.
///
/// Snapshot semantics: `assigned_shops` is whatever the caller's admin
/// record contained at the start of the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Actor {
    /// Unauthenticated customer traffic.
    Anonymous,
    /// Shop staff: full management of the shops in their assignment set.
    Admin {
        uid: AdminUid,
        assigned_shops: Vec<ShopId>,
    },
    /// Platform operator, distinguished by a token claim rather than a
    /// store document.
    SuperAdmin { uid: AdminUid },
}

impl Actor {
    /// The identity-provider uid, if authenticated.
    #[must_use]
    pub const fn uid(&self) -> Option<&AdminUid> {
        match self {
            Self::Anonymous => None,
            Self::Admin { uid, .. } | Self::SuperAdmin { uid } => Some(uid),
        }
    }
}

/// Actions evaluated against a target shop (or the platform as a whole).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    // Anonymous storefront capabilities.
    ReadCatalog,
    ReadToppings,
    ReadOptions,
    CreateOrder,
    // Shop staff capabilities, scoped to the assignment set.
    ManageCatalog,
    ManageToppings,
    ManageSettings,
    ReadOrders,
    UpdateOrderStatus,
    // Platform operator capabilities.
    CreateShop,
    DeleteShop,
    CreateAdmin,
    DeleteAdmin,
    ListAllShops,
}

impl Action {
    /// Actions anonymous customers may perform against any shop.
    const fn is_public(self) -> bool {
        matches!(
            self,
            Self::ReadCatalog | Self::ReadToppings | Self::ReadOptions | Self::CreateOrder
        )
    }

    /// Actions reserved for platform operators regardless of shop scope.
    const fn is_super_admin_only(self) -> bool {
        matches!(
            self,
            Self::CreateShop
                | Self::DeleteShop
                | Self::CreateAdmin
                | Self::DeleteAdmin
                | Self::ListAllShops
        )
    }
}

/// Why a request was denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DenyReason {
    /// The caller is not an authenticated staff member.
    NoRole,
    /// The caller is staff, but the target shop is outside their assignment
    /// set.
    ShopNotAssigned,
    /// The action is reserved for platform operators.
    SuperAdminRequired,
}

/// The outcome of an authorization check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(DenyReason),
}

impl Decision {
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Evaluate whether `actor` may perform `action` against `shop`.
///
/// `shop` is `None` for platform-level actions that have no tenant target
/// (e.g. `list-all-shops`).
#[must_use]
pub fn authorize(actor: &Actor, action: Action, shop: Option<&ShopId>) -> Decision {
    match actor {
        Actor::SuperAdmin { .. } => Decision::Allow,
        Actor::Anonymous => {
            if action.is_public() {
                Decision::Allow
            } else {
                Decision::Deny(DenyReason::NoRole)
            }
        }
        Actor::Admin { assigned_shops, .. } => {
            if action.is_public() {
                return Decision::Allow;
            }
            if action.is_super_admin_only() {
                return Decision::Deny(DenyReason::SuperAdminRequired);
            }
            match shop {
                Some(shop) if assigned_shops.contains(shop) => Decision::Allow,
                _ => Decision::Deny(DenyReason::ShopNotAssigned),
            }
        }
    }
}
