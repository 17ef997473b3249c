use crate::{
    error::CalculationError,
    model::{
        BillSnapshot, CalculationResult, Money, ParticipantBreakdown, ParticipantId, PlatformFees,
    },
    services::{ExtraTotals, ExtrasAllocator, ItemAllocator, ItemTotals, ParticipantIndex},
};
use indexmap::IndexMap;

/// Runs the whole allocation pipeline over one bill snapshot.
pub struct BillCalculator;

impl BillCalculator {
    /// Allocates items, then extras, then checks that every cent is accounted for.
    ///
    /// # Errors
    /// * [`CalculationError::OrphanedItem`] when an item has no valid consumer.
    /// * [`CalculationError::AmountOverflow`] when a total leaves the cent range.
    /// * [`CalculationError::InvariantViolation`] when participant totals do not
    ///   add up to the bill total. This signals a defect, not bad input.
    pub fn calculate(
        &self,
        bill: BillSnapshot<'_>,
        fees: PlatformFees,
    ) -> Result<CalculationResult, CalculationError> {
        let index = ParticipantIndex::new(bill.participants);

        tracing::debug!(
            participant_count = index.len(),
            item_count = bill.items.len(),
            share_count = bill.shares.len(),
            extra_count = bill.extras.len(),
            "Bill calculation started"
        );

        let item_totals = ItemAllocator.allocate(&index, bill.items, bill.shares)?;
        let extra_totals = ExtrasAllocator.allocate(&index, bill.extras, &item_totals)?;

        let items_total = item_totals.items_total;
        let extras_total = extra_totals.extras_total;
        // Bounds every participant total as well.
        let grand_total = checked_sum(items_total, extras_total, "grand total")?;
        let platform_total = fees
            .checked_total()
            .ok_or_else(|| overflow("platform fees"))?;
        let final_amount = checked_sum(grand_total, platform_total, "final amount")?;

        let breakdown = assemble_breakdown(&index, &item_totals, &extra_totals);
        let participant_totals: IndexMap<ParticipantId, Money> = breakdown
            .iter()
            .map(|(id, entry)| (*id, entry.total))
            .collect();

        verify_reconciliation(&participant_totals, items_total, extras_total)?;

        tracing::debug!(
            items_total = items_total.amount(),
            extras_total = extras_total.amount(),
            grand_total = grand_total.amount(),
            platform_total = platform_total.amount(),
            "Bill calculation finished"
        );

        Ok(CalculationResult {
            participant_totals,
            breakdown,
            exact_values: None,
            items: item_totals.allocations,
            extras: extra_totals.allocations,
            items_total,
            extras_total,
            grand_total,
            platform_fee: fees.platform_fee.unwrap_or_default(),
            payment_fee: fees.payment_fee.unwrap_or_default(),
            platform_total,
            final_amount,
        })
    }
}

fn overflow(name: &str) -> CalculationError {
    CalculationError::AmountOverflow {
        name: name.to_string(),
    }
}

fn checked_sum(lhs: Money, rhs: Money, name: &str) -> Result<Money, CalculationError> {
    lhs.checked_add(rhs).ok_or_else(|| overflow(name))
}

fn assemble_breakdown(
    index: &ParticipantIndex<'_>,
    items: &ItemTotals,
    extras: &ExtraTotals,
) -> IndexMap<ParticipantId, ParticipantBreakdown> {
    (0..index.len())
        .map(|position| {
            let id = index.id_at(position);
            let item_cents = items.cents[position];
            let extra_cents = extras.cents[position];
            let entry = ParticipantBreakdown {
                participant_id: id,
                items: item_cents,
                extras: extra_cents,
                total: item_cents + extra_cents,
                exact_total: &items.exact[position] + &extras.exact[position],
            };
            (id, entry)
        })
        .collect()
}

/// Checks `sum(participant totals) == items_total + extras_total`.
pub fn verify_reconciliation(
    participant_totals: &IndexMap<ParticipantId, Money>,
    items_total: Money,
    extras_total: Money,
) -> Result<(), CalculationError> {
    let participant_sum: Money = participant_totals.values().sum();
    if participant_sum == items_total + extras_total {
        return Ok(());
    }

    tracing::error!(
        reject_reason = "reconciliation_invariant_violation",
        participant_sum = participant_sum.amount(),
        items_total = items_total.amount(),
        extras_total = extras_total.amount(),
        participant_totals = ?participant_totals,
        "Participant totals do not reconcile with the bill total"
    );
    Err(CalculationError::InvariantViolation {
        participant_sum,
        items_total,
        extras_total,
    })
}
