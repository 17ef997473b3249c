use crate::{
    error::CalculationError,
    model::{Item, ItemAllocation, ItemId, Money, Share},
    services::ParticipantIndex,
};
use fxhash::{FxHashMap, FxHashSet};
use racha_calc::{EvenSplit, Ratio, split_evenly};
use std::num::NonZeroU64;

/// Item-only consumption per participant, indexed by canonical position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemTotals {
    pub cents: Vec<Money>,
    pub exact: Vec<Ratio>,
    pub items_total: Money,
    pub allocations: Vec<ItemAllocation>,
}

impl ItemTotals {
    pub fn consumed_total(&self) -> Money {
        self.cents.iter().sum()
    }
}

/// Splits every item's cost among its consumers.
pub struct ItemAllocator;

impl ItemAllocator {
    /// Allocates items in input order.
    ///
    /// Each consumer receives `amount / count` rounded down. The leftover cents
    /// go to the consumers with the lowest item total accumulated so far, with
    /// canonical order breaking ties, so the extra cent rotates across items
    /// instead of always landing on the first participant.
    ///
    /// The items total is checked before any cent is handed out, which bounds
    /// every participant's running total by it.
    pub fn allocate(
        &self,
        index: &ParticipantIndex<'_>,
        items: &[Item],
        shares: &[Share],
    ) -> Result<ItemTotals, CalculationError> {
        let consumers_by_item = group_consumers(index, shares);

        let mut cents = vec![Money::ZERO; index.len()];
        let mut exact = vec![Ratio::zero(); index.len()];
        let mut items_total = Money::ZERO;
        let mut allocations = Vec::with_capacity(items.len());

        for item in items {
            let consumers = consumers_by_item
                .get(&item.id)
                .map(Vec::as_slice)
                .unwrap_or_default();

            let Some(count) = NonZeroU64::new(consumers.len() as u64) else {
                tracing::warn!(
                    reject_reason = "orphaned_item",
                    item_id = item.id.0,
                    item_name = %item.name,
                    amount = item.amount.amount(),
                    "Item has no valid consumers"
                );
                return Err(orphaned_item(item));
            };
            items_total = items_total
                .checked_add(item.amount)
                .ok_or_else(|| CalculationError::AmountOverflow {
                    name: item.name.clone(),
                })?;
            let EvenSplit { base, remainder } =
                split_evenly(item.amount.amount(), consumers.len())
                    .map_err(|_| orphaned_item(item))?;

            let mut ranked = consumers.to_vec();
            ranked.sort_by_key(|&position| (cents[position], position));
            let remainder_recipients: FxHashSet<usize> =
                ranked.into_iter().take(remainder).collect();

            let exact_share = Ratio::from_quotient(item.amount.amount(), count);
            let mut item_shares = Vec::with_capacity(consumers.len());
            for &position in consumers {
                let share = if remainder_recipients.contains(&position) {
                    Money::from_i64(base + 1)
                } else {
                    Money::from_i64(base)
                };
                cents[position] += share;
                exact[position] += &exact_share;
                item_shares.push((index.id_at(position), share));
            }

            allocations.push(ItemAllocation {
                item_id: item.id,
                shares: item_shares,
            });
        }

        Ok(ItemTotals {
            cents,
            exact,
            items_total,
            allocations,
        })
    }
}

fn orphaned_item(item: &Item) -> CalculationError {
    CalculationError::OrphanedItem {
        item_id: item.id,
        item_name: item.name.clone(),
    }
}

/// Consumer positions per item, ascending (canonical) and deduplicated.
fn group_consumers(
    index: &ParticipantIndex<'_>,
    shares: &[Share],
) -> FxHashMap<ItemId, Vec<usize>> {
    let mut consumers: FxHashMap<ItemId, Vec<usize>> = FxHashMap::default();
    let mut dropped = 0usize;
    for share in shares {
        match index.position(share.participant_id) {
            Some(position) => consumers.entry(share.item_id).or_default().push(position),
            None => dropped += 1,
        }
    }
    if dropped > 0 {
        tracing::debug!(
            dropped_share_count = dropped,
            "Dropped shares referencing participants outside the bill"
        );
    }
    for positions in consumers.values_mut() {
        positions.sort_unstable();
        positions.dedup();
    }
    consumers
}
