//! Order status enumeration.
//!
//! The wire format uses the kebab-case strings stored in order documents
//! (`pending-approval`, `pending`, `baking`, `completed`, `cancelled`).
//! Transition rules live in [`crate::lifecycle`].

use serde::{Deserialize, Serialize};

/// Order status.
///
/// Statuses form a single forward-moving path so the tracking UI can render
/// one linear progress bar; `Cancelled` is the only escape hatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    /// Initial status set by customer checkout, awaiting staff review.
    #[default]
    PendingApproval,
    /// Confirmed by staff, ready to start.
    Pending,
    /// Currently being prepared.
    Baking,
    /// Ready for pickup/delivery. Terminal.
    Completed,
    /// Aborted by staff. Terminal.
    Cancelled,
}

impl OrderStatus {
    /// All statuses in progress order (cancelled last).
    pub const ALL: [Self; 5] = [
        Self::PendingApproval,
        Self::Pending,
        Self::Baking,
        Self::Completed,
        Self::Cancelled,
    ];

    /// Whether no further transitions are possible from this status.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// The kebab-case document representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PendingApproval => "pending-approval",
            Self::Pending => "pending",
            Self::Baking => "baking",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending-approval" => Ok(Self::PendingApproval),
            "pending" => Ok(Self::Pending),
            "baking" => Ok(Self::Baking),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}
