//! Pure reconciliation of user/category association edges.
//!
//! Given the link set currently stored for a user and the complete set
//! the caller wants, [`reconcile`] computes the minimal plan that turns
//! one into the other. The plan never touches links present in both
//! sets, so reconciling against an identical desired set is a no-op.

use std::collections::BTreeSet;

use bookstack_core::CategoryId;

/// Edge changes needed to move the stored link set to the desired one.
///
/// Disconnects must be applied before connects; the service enforces
/// that ordering when it executes a plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcilePlan {
    /// Links present in storage but absent from the desired set.
    pub to_disconnect: BTreeSet<CategoryId>,
    /// Links in the desired set not yet present in storage.
    pub to_connect: BTreeSet<CategoryId>,
}

impl ReconcilePlan {
    /// True when the plan changes nothing.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.to_disconnect.is_empty() && self.to_connect.is_empty()
    }
}

/// Diffs the stored link set against the desired one.
///
/// `to_disconnect` is `existing − desired`, `to_connect` is
/// `desired − existing`. Applying the plan to `existing` yields exactly
/// `desired`.
#[must_use]
pub fn reconcile(
    existing: &BTreeSet<CategoryId>,
    desired: &BTreeSet<CategoryId>,
) -> ReconcilePlan {
    ReconcilePlan {
        to_disconnect: existing.difference(desired).copied().collect(),
        to_connect: desired.difference(existing).copied().collect(),
    }
}
