use crate::{
    error::CalculationError,
    model::{AllocationMode, Extra, ExtraAllocation, ExtraKind, ExtraStatus, Money},
    services::{ItemTotals, ParticipantIndex},
};
use racha_calc::{ApportionError, Ratio, distribute_evenly, largest_remainder};
use std::num::NonZeroU64;

const BASIS_POINTS_PER_UNIT: i128 = 10_000;

/// Extra charges per participant, indexed by canonical position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtraTotals {
    pub cents: Vec<Money>,
    pub exact: Vec<Ratio>,
    /// Distributed extras only; skipped extras keep their amount in
    /// `allocations` but are not counted here.
    pub extras_total: Money,
    pub allocations: Vec<ExtraAllocation>,
}

/// Distributes bill-wide extras on top of item consumption.
pub struct ExtrasAllocator;

impl ExtrasAllocator {
    /// Integer amount of an extra. Percentages always apply to the items
    /// total, never to a total that already includes other extras.
    ///
    /// `None` when a percentage yields more cents than [`Money`] can hold.
    pub fn extra_amount(extra: &Extra, items_total: Money) -> Option<Money> {
        match extra.kind {
            ExtraKind::Fixed { value } => Some(value.unwrap_or_default()),
            ExtraKind::ServicePercent { basis_points } => {
                let scaled = i128::from(items_total.amount())
                    * i128::from(basis_points.unwrap_or_default());
                let amount = scaled.div_euclid(BASIS_POINTS_PER_UNIT);
                i64::try_from(amount).ok().map(Money::from_i64)
            }
        }
    }

    /// Allocates extras in input order.
    ///
    /// The proportional base is `items`, which holds item-only consumption and
    /// is never updated here, so one extra cannot shift the base of another.
    ///
    /// # Errors
    /// [`CalculationError::AmountOverflow`] when an extra's amount or the
    /// running extras total leaves the cent range.
    pub fn allocate(
        &self,
        index: &ParticipantIndex<'_>,
        extras: &[Extra],
        items: &ItemTotals,
    ) -> Result<ExtraTotals, CalculationError> {
        let mut cents = vec![Money::ZERO; index.len()];
        let mut exact = vec![Ratio::zero(); index.len()];
        let mut extras_total = Money::ZERO;
        let mut allocations = Vec::with_capacity(extras.len());

        for extra in extras {
            let amount =
                Self::extra_amount(extra, items.items_total).ok_or_else(|| overflow(extra))?;
            let distribution = if amount.is_positive() {
                match extra.allocation_mode {
                    AllocationMode::Equal => equal_distribution(amount, index.len()),
                    AllocationMode::Proportional => proportional_distribution(amount, items),
                }
            } else {
                Err(ExtraStatus::ZeroAmount)
            };

            let allocation = match distribution {
                Ok((shares, exact_shares)) => {
                    extras_total = extras_total
                        .checked_add(amount)
                        .ok_or_else(|| overflow(extra))?;
                    let mut recorded = Vec::with_capacity(shares.len());
                    for (position, (share, exact_share)) in
                        shares.into_iter().zip(exact_shares).enumerate()
                    {
                        let share = Money::from_i64(share);
                        cents[position] += share;
                        exact[position] += exact_share;
                        recorded.push((index.id_at(position), share));
                    }
                    ExtraAllocation {
                        extra_id: extra.id,
                        allocation_mode: extra.allocation_mode,
                        amount,
                        status: ExtraStatus::Distributed,
                        shares: recorded,
                    }
                }
                Err(status) => {
                    if status != ExtraStatus::ZeroAmount {
                        tracing::warn!(
                            extra_id = extra.id.0,
                            extra_name = %extra.name,
                            amount = amount.amount(),
                            status = ?status,
                            "Extra could not be distributed and was left out of the total"
                        );
                    }
                    ExtraAllocation {
                        extra_id: extra.id,
                        allocation_mode: extra.allocation_mode,
                        amount,
                        status,
                        shares: Vec::new(),
                    }
                }
            };

            allocations.push(allocation);
        }

        Ok(ExtraTotals {
            cents,
            exact,
            extras_total,
            allocations,
        })
    }
}

fn overflow(extra: &Extra) -> CalculationError {
    CalculationError::AmountOverflow {
        name: extra.name.clone(),
    }
}

type Distribution = (Vec<i64>, Vec<Ratio>);

fn equal_distribution(
    amount: Money,
    participant_count: usize,
) -> Result<Distribution, ExtraStatus> {
    let shares = distribute_evenly(amount.amount(), participant_count).map_err(skip_status)?;
    let count = NonZeroU64::new(participant_count as u64).ok_or(ExtraStatus::NoParticipants)?;
    let exact_share = Ratio::from_quotient(amount.amount(), count);
    Ok((shares, vec![exact_share; participant_count]))
}

fn proportional_distribution(
    amount: Money,
    items: &ItemTotals,
) -> Result<Distribution, ExtraStatus> {
    let weights: Vec<i64> = items.cents.iter().map(|money| money.amount()).collect();
    let shares = largest_remainder(amount.amount(), &weights).map_err(skip_status)?;

    // Exact consumption sums to the same total as the integer consumption.
    let consumed = u64::try_from(items.consumed_total().amount())
        .ok()
        .and_then(NonZeroU64::new)
        .ok_or(ExtraStatus::NoConsumption)?;
    let exact_shares = items
        .exact
        .iter()
        .map(|consumption| consumption.scaled(amount.amount(), consumed))
        .collect();
    Ok((shares, exact_shares))
}

fn skip_status(err: ApportionError) -> ExtraStatus {
    match err {
        ApportionError::NoRecipients => ExtraStatus::NoParticipants,
        ApportionError::ZeroTotalWeight | ApportionError::NegativeWeight { .. } => {
            ExtraStatus::NoConsumption
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::{ExtraId, Item, ItemId, Participant, ParticipantId, Share},
        services::ItemAllocator,
    };
    use rstest::rstest;

    fn participants(count: u64) -> Vec<Participant> {
        (0..count)
            .map(|idx| Participant {
                id: ParticipantId(idx + 1),
                name: format!("P{idx}"),
                sort_order: idx as i32,
            })
            .collect()
    }

    fn fixed(id: u64, cents: i64, mode: AllocationMode) -> Extra {
        Extra {
            id: ExtraId(id),
            name: format!("Fixed {id}"),
            kind: ExtraKind::Fixed {
                value: Some(Money::from_i64(cents)),
            },
            allocation_mode: mode,
        }
    }

    fn service(id: u64, basis_points: u32, mode: AllocationMode) -> Extra {
        Extra {
            id: ExtraId(id),
            name: format!("Service {id}"),
            kind: ExtraKind::ServicePercent {
                basis_points: Some(basis_points),
            },
            allocation_mode: mode,
        }
    }

    fn run(participant_count: u64, consumption: &[i64], extras: &[Extra]) -> ExtraTotals {
        try_run(participant_count, consumption, extras).expect("extras should allocate")
    }

    /// `consumption[i]` is a private item for participant `i + 1`.
    fn try_run(
        participant_count: u64,
        consumption: &[i64],
        extras: &[Extra],
    ) -> Result<ExtraTotals, CalculationError> {
        let people = participants(participant_count);
        let index = ParticipantIndex::new(&people);
        let mut items = Vec::new();
        let mut shares = Vec::new();
        for (idx, amount) in consumption.iter().enumerate() {
            if *amount == 0 {
                continue;
            }
            let item_id = ItemId(idx as u64 + 1);
            items.push(Item {
                id: item_id,
                name: format!("Item {idx}"),
                amount: Money::from_i64(*amount),
            });
            shares.push(Share {
                item_id,
                participant_id: ParticipantId(idx as u64 + 1),
            });
        }
        let item_totals = ItemAllocator
            .allocate(&index, &items, &shares)
            .expect("items should allocate");
        ExtrasAllocator.allocate(&index, extras, &item_totals)
    }

    fn cents(totals: &ExtraTotals) -> Vec<i64> {
        totals.cents.iter().map(|money| money.amount()).collect()
    }

    #[rstest]
    #[case::fixed(fixed(1, 250, AllocationMode::Equal), 5000, 250)]
    #[case::ten_percent(service(1, 1000, AllocationMode::Proportional), 5000, 500)]
    #[case::percent_rounds_down(service(1, 1000, AllocationMode::Proportional), 999, 99)]
    #[case::missing_fixed_value(
        Extra {
            id: ExtraId(1),
            name: "Couvert".to_string(),
            kind: ExtraKind::Fixed { value: None },
            allocation_mode: AllocationMode::Equal,
        },
        5000,
        0
    )]
    #[case::missing_rate(
        Extra {
            id: ExtraId(1),
            name: "Service".to_string(),
            kind: ExtraKind::ServicePercent { basis_points: None },
            allocation_mode: AllocationMode::Equal,
        },
        5000,
        0
    )]
    fn computes_extra_amount(
        #[case] extra: Extra,
        #[case] items_total: i64,
        #[case] expected: i64,
    ) {
        assert_eq!(
            ExtrasAllocator::extra_amount(&extra, Money::from_i64(items_total)),
            Some(Money::from_i64(expected))
        );
    }

    #[test]
    fn percent_beyond_cent_range_has_no_amount() {
        let extra = service(1, 30_000, AllocationMode::Proportional);
        assert_eq!(
            ExtrasAllocator::extra_amount(&extra, Money::from_i64(i64::MAX)),
            None
        );
    }

    #[rstest]
    #[case::oversized_percent(
        vec![i64::MAX],
        vec![service(1, 30_000, AllocationMode::Proportional)],
        "Service 1"
    )]
    #[case::running_total(
        vec![100],
        vec![
            fixed(1, i64::MAX, AllocationMode::Equal),
            fixed(2, 1, AllocationMode::Proportional),
        ],
        "Fixed 2"
    )]
    fn extras_beyond_cent_range_are_rejected(
        #[case] consumption: Vec<i64>,
        #[case] extras: Vec<Extra>,
        #[case] expected_name: &str,
    ) {
        assert_eq!(
            try_run(1, &consumption, &extras),
            Err(CalculationError::AmountOverflow {
                name: expected_name.to_string(),
            })
        );
    }

    #[rstest]
    #[case::service_on_single_consumer(
        1, vec![5000], vec![service(1, 1000, AllocationMode::Proportional)], vec![500]
    )]
    #[case::exact_proportions(
        2, vec![700, 300], vec![fixed(1, 100, AllocationMode::Proportional)], vec![70, 30]
    )]
    #[case::largest_remainder_tie(
        3, vec![100, 100, 100], vec![fixed(1, 100, AllocationMode::Proportional)], vec![34, 33, 33]
    )]
    #[case::equal_includes_non_consumers(
        3, vec![900, 0, 0], vec![fixed(1, 200, AllocationMode::Equal)], vec![67, 67, 66]
    )]
    #[case::base_isolation(
        2,
        vec![1000, 0],
        vec![
            fixed(1, 200, AllocationMode::Equal),
            fixed(2, 100, AllocationMode::Proportional),
        ],
        vec![200, 100]
    )]
    fn distributes_extras(
        #[case] participant_count: u64,
        #[case] consumption: Vec<i64>,
        #[case] extras: Vec<Extra>,
        #[case] expected: Vec<i64>,
    ) {
        let totals = run(participant_count, &consumption, &extras);
        assert_eq!(cents(&totals), expected);
        for allocation in &totals.allocations {
            assert_eq!(allocation.status, ExtraStatus::Distributed);
            assert_eq!(allocation.allocated(), allocation.amount);
        }
    }

    #[test]
    fn proportional_without_consumption_is_skipped() {
        let totals = run(2, &[0, 0], &[fixed(1, 100, AllocationMode::Proportional)]);
        assert_eq!(cents(&totals), vec![0, 0]);
        assert_eq!(totals.extras_total, Money::ZERO);
        assert_eq!(totals.allocations[0].status, ExtraStatus::NoConsumption);
        assert_eq!(totals.allocations[0].amount, Money::from_i64(100));
    }

    #[test]
    fn equal_without_participants_is_skipped() {
        let totals = run(0, &[], &[fixed(1, 100, AllocationMode::Equal)]);
        assert!(totals.cents.is_empty());
        assert_eq!(totals.extras_total, Money::ZERO);
        assert_eq!(totals.allocations[0].status, ExtraStatus::NoParticipants);
    }

    #[test]
    fn zero_amount_contributes_nothing() {
        let totals = run(2, &[500, 500], &[fixed(1, 0, AllocationMode::Equal)]);
        assert_eq!(cents(&totals), vec![0, 0]);
        assert_eq!(totals.allocations[0].status, ExtraStatus::ZeroAmount);
        assert!(totals.allocations[0].shares.is_empty());
    }

    #[test]
    fn proportional_share_ignores_preceding_extras() {
        let proportional = fixed(9, 100, AllocationMode::Proportional);
        let alone = run(3, &[300, 200, 0], std::slice::from_ref(&proportional));
        let after_equal = run(
            3,
            &[300, 200, 0],
            &[fixed(1, 999, AllocationMode::Equal), proportional],
        );

        let alone_shares = &alone.allocations[0].shares;
        let after_equal_shares = &after_equal.allocations[1].shares;
        assert_eq!(alone_shares, after_equal_shares);
    }

    #[test]
    fn exact_shares_follow_unrounded_proportion() {
        let totals = run(3, &[100, 100, 100], &[fixed(1, 100, AllocationMode::Proportional)]);
        let third = Ratio::new(100, 3).expect("non-zero");
        assert!(totals.exact.iter().all(|exact| *exact == third));
        assert_eq!(cents(&totals), vec![34, 33, 33]);
    }
}
