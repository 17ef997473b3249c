use crate::model::{ItemId, Money};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalculationError {
    /// Every share of the item points at a participant that is not on the bill.
    #[error("Item '{item_name}' has no valid consumers")]
    OrphanedItem { item_id: ItemId, item_name: String },
    /// A running total left the `i64` cent range.
    #[error("Amount of '{name}' is too large to add to the bill")]
    AmountOverflow { name: String },
    /// Participant totals failed to reconcile with the bill total. Always a bug.
    #[error(
        "Participant totals ({participant_sum}) do not match items ({items_total}) plus extras ({extras_total})"
    )]
    InvariantViolation {
        participant_sum: Money,
        items_total: Money,
        extras_total: Money,
    },
}

impl CalculationError {
    /// Whether the caller can fix this by editing the bill.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::OrphanedItem { .. } | Self::AmountOverflow { .. }
        )
    }
}
