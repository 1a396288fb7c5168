//! Order status state machine.
//!
//! Statuses move along a single forward path:
//!
//! ```text
//! pending-approval -> pending -> baking -> completed
//! ```
//!
//! `cancelled` is reachable from any non-terminal status so staff can always
//! abort an order. Re-applying the current status is a no-op, which makes
//! idempotent retries safe. Everything else is rejected - a second
//! "mark baking" after an order completed fails instead of silently
//! succeeding, which is the only concurrency safety net between two admins
//! editing the same order.

use thiserror::Error;

use crate::types::OrderStatus;

/// A rejected status change.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("illegal transition: {from} -> {to}")]
pub struct IllegalTransition {
    pub from: OrderStatus,
    pub to: OrderStatus,
}

/// Whether `from -> to` is a legal status change.
///
/// Legal edges are: the same status (idempotent no-op), the next step on the
/// forward path, and cancellation from any non-terminal status.
#[must_use]
pub const fn can_transition(from: OrderStatus, to: OrderStatus) -> bool {
    use OrderStatus::{Baking, Cancelled, Completed, Pending, PendingApproval};

    if from as u8 == to as u8 {
        return true;
    }
    match (from, to) {
        (PendingApproval, Pending) | (Pending, Baking) | (Baking, Completed) => true,
        (PendingApproval | Pending | Baking, Cancelled) => true,
        _ => false,
    }
}

/// Validate a status change, returning the rejected edge on failure.
///
/// # Errors
///
/// Returns [`IllegalTransition`] if [`can_transition`] rejects the edge.
pub const fn check_transition(
    from: OrderStatus,
    to: OrderStatus,
) -> Result<(), IllegalTransition> {
    if can_transition(from, to) {
        Ok(())
    } else {
        Err(IllegalTransition { from, to })
    }
}

/// Statuses reachable from `from` in one step, excluding the no-op edge.
///
/// Used by the console to offer only legal next statuses.
#[must_use]
pub fn next_statuses(from: OrderStatus) -> Vec<OrderStatus> {
    OrderStatus::ALL
        .into_iter()
        .filter(|to| *to != from && can_transition(from, *to))
        .collect()
}
