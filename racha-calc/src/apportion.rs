//! Integer apportionment: every unit of an amount lands on exactly one recipient.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ApportionError {
    #[error("Cannot apportion across zero recipients")]
    NoRecipients,
    #[error("Total weight must be positive")]
    ZeroTotalWeight,
    #[error("Weight at index {index} is negative ({weight})")]
    NegativeWeight { index: usize, weight: i64 },
}

/// Result of dividing an amount into `count` equal integer parts.
///
/// Every recipient gets `base`; `remainder` recipients get one more unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvenSplit {
    pub base: i64,
    pub remainder: usize,
}

pub fn split_evenly(amount: i64, count: usize) -> Result<EvenSplit, ApportionError> {
    if count == 0 {
        return Err(ApportionError::NoRecipients);
    }
    let divisor = count as i64;
    Ok(EvenSplit {
        base: amount.div_euclid(divisor),
        remainder: amount.rem_euclid(divisor) as usize,
    })
}

/// Splits `amount` into `count` parts; the remainder goes to the lowest indexes.
pub fn distribute_evenly(amount: i64, count: usize) -> Result<Vec<i64>, ApportionError> {
    let EvenSplit { base, remainder } = split_evenly(amount, count)?;
    Ok((0..count)
        .map(|idx| if idx < remainder { base + 1 } else { base })
        .collect())
}

/// Largest-remainder (Hamilton) apportionment of `amount` by `weights`.
///
/// Each index receives `floor(amount * w / W)`; the leftover units go one each
/// to the largest fractional parts. Fractional parts share the denominator `W`,
/// so they are compared as exact integer remainders. Equal remainders keep index
/// order, so callers pass weights already sorted by their tie-break order.
pub fn largest_remainder(amount: i64, weights: &[i64]) -> Result<Vec<i64>, ApportionError> {
    if weights.is_empty() {
        return Err(ApportionError::NoRecipients);
    }
    if let Some((index, &weight)) = weights.iter().enumerate().find(|(_, w)| **w < 0) {
        return Err(ApportionError::NegativeWeight { index, weight });
    }

    let total_weight: i128 = weights.iter().map(|&w| i128::from(w)).sum();
    if total_weight == 0 {
        return Err(ApportionError::ZeroTotalWeight);
    }

    let amount_wide = i128::from(amount);
    let mut shares = Vec::with_capacity(weights.len());
    let mut remainders = Vec::with_capacity(weights.len());
    for &weight in weights {
        let scaled = amount_wide * i128::from(weight);
        shares.push(scaled.div_euclid(total_weight));
        remainders.push(scaled.rem_euclid(total_weight));
    }

    let floor_sum: i128 = shares.iter().sum();
    let leftover = (amount_wide - floor_sum) as usize;
    debug_assert!(leftover < weights.len());

    let mut ranked: Vec<usize> = (0..weights.len()).collect();
    ranked.sort_by(|&a, &b| remainders[b].cmp(&remainders[a]).then_with(|| a.cmp(&b)));
    for &idx in ranked.iter().take(leftover) {
        shares[idx] += 1;
    }

    // Each share is bounded by `amount`, so narrowing back is lossless.
    Ok(shares.into_iter().map(|share| share as i64).collect())
}
