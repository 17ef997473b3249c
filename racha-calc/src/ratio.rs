//! Exact rational numbers over arbitrary-precision integers.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};
use std::{
    cmp::Ordering,
    fmt,
    iter::Sum,
    num::NonZeroU64,
    ops::{Add, AddAssign},
};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RatioError {
    #[error("Denominator must be non-zero")]
    ZeroDenominator,
}

/// A fraction kept in lowest terms with a positive denominator.
///
/// Because the representation is canonical, two ratios describing the same
/// value always compare equal field by field and hash identically.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Ratio {
    numer: BigInt,
    denom: BigInt,
}

impl Ratio {
    pub fn zero() -> Self {
        Self {
            numer: BigInt::zero(),
            denom: BigInt::one(),
        }
    }

    pub fn from_integer(value: impl Into<BigInt>) -> Self {
        Self {
            numer: value.into(),
            denom: BigInt::one(),
        }
    }

    pub fn new(numer: impl Into<BigInt>, denom: impl Into<BigInt>) -> Result<Self, RatioError> {
        let denom = denom.into();
        if denom.is_zero() {
            return Err(RatioError::ZeroDenominator);
        }
        Ok(Self::normalized(numer.into(), denom))
    }

    /// `numer / denom` for a denominator known to be non-zero.
    pub fn from_quotient(numer: impl Into<BigInt>, denom: NonZeroU64) -> Self {
        Self::normalized(numer.into(), BigInt::from(denom.get()))
    }

    // Caller guarantees `denom != 0`.
    fn normalized(numer: BigInt, denom: BigInt) -> Self {
        let divisor = numer.gcd(&denom);
        let (mut numer, mut denom) = if divisor.is_one() || divisor.is_zero() {
            (numer, denom)
        } else {
            (numer / &divisor, denom / &divisor)
        };
        if denom.is_negative() {
            numer = -numer;
            denom = -denom;
        }
        if numer.is_zero() {
            denom = BigInt::one();
        }
        Self { numer, denom }
    }

    pub fn numer(&self) -> &BigInt {
        &self.numer
    }

    pub fn denom(&self) -> &BigInt {
        &self.denom
    }

    pub fn is_zero(&self) -> bool {
        self.numer.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.numer.is_negative()
    }

    /// Largest integer not greater than the value.
    pub fn floor(&self) -> BigInt {
        self.numer.div_floor(&self.denom)
    }

    pub fn mul_integer(&self, factor: impl Into<BigInt>) -> Self {
        Self::normalized(&self.numer * factor.into(), self.denom.clone())
    }

    pub fn div_integer(&self, divisor: impl Into<BigInt>) -> Result<Self, RatioError> {
        let divisor = divisor.into();
        if divisor.is_zero() {
            return Err(RatioError::ZeroDenominator);
        }
        Ok(Self::normalized(self.numer.clone(), &self.denom * divisor))
    }

    /// `self * numer / denom`.
    pub fn scaled(&self, numer: impl Into<BigInt>, denom: NonZeroU64) -> Self {
        Self::normalized(
            &self.numer * numer.into(),
            &self.denom * BigInt::from(denom.get()),
        )
    }
}

impl Default for Ratio {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<i64> for Ratio {
    fn from(value: i64) -> Self {
        Self::from_integer(value)
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denom.is_one() {
            write!(f, "{}", self.numer)
        } else {
            write!(f, "{}/{}", self.numer, self.denom)
        }
    }
}

impl Add<&Ratio> for &Ratio {
    type Output = Ratio;

    fn add(self, rhs: &Ratio) -> Self::Output {
        if self.denom == rhs.denom {
            return Ratio::normalized(&self.numer + &rhs.numer, self.denom.clone());
        }
        Ratio::normalized(
            &self.numer * &rhs.denom + &rhs.numer * &self.denom,
            &self.denom * &rhs.denom,
        )
    }
}

impl Add for Ratio {
    type Output = Ratio;

    fn add(self, rhs: Self) -> Self::Output {
        &self + &rhs
    }
}

impl AddAssign<&Ratio> for Ratio {
    fn add_assign(&mut self, rhs: &Ratio) {
        *self = &*self + rhs;
    }
}

impl AddAssign for Ratio {
    fn add_assign(&mut self, rhs: Self) {
        *self += &rhs;
    }
}

impl Sum for Ratio {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Ratio::zero(), |acc, value| acc + value)
    }
}

impl<'a> Sum<&'a Ratio> for Ratio {
    fn sum<I: Iterator<Item = &'a Ratio>>(iter: I) -> Self {
        iter.fold(Ratio::zero(), |acc, value| &acc + value)
    }
}

impl PartialOrd for Ratio {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ratio {
    // Denominators are positive, so cross-multiplication preserves order.
    fn cmp(&self, other: &Self) -> Ordering {
        if self.denom == other.denom {
            return self.numer.cmp(&other.numer);
        }
        (&self.numer * &other.denom).cmp(&(&other.numer * &self.denom))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn ratio(numer: i64, denom: i64) -> Ratio {
        Ratio::new(numer, denom).expect("non-zero denominator")
    }

    #[rstest]
    #[case::already_reduced(1, 3, 1, 3)]
    #[case::common_factor(6, 9, 2, 3)]
    #[case::negative_denominator(3, -4, -3, 4)]
    #[case::both_negative(-10, -4, 5, 2)]
    #[case::zero_numerator(0, -7, 0, 1)]
    #[case::whole_number(100, 50, 2, 1)]
    fn new_normalizes(
        #[case] numer: i64,
        #[case] denom: i64,
        #[case] expected_numer: i64,
        #[case] expected_denom: i64,
    ) {
        let value = ratio(numer, denom);
        assert_eq!(value.numer(), &BigInt::from(expected_numer));
        assert_eq!(value.denom(), &BigInt::from(expected_denom));
    }

    #[test]
    fn zero_denominator_is_rejected() {
        assert_eq!(Ratio::new(5, 0), Err(RatioError::ZeroDenominator));
        assert_eq!(
            Ratio::from_integer(5).div_integer(0),
            Err(RatioError::ZeroDenominator)
        );
    }

    #[rstest]
    #[case::thirds(ratio(1, 3), ratio(1, 3), ratio(2, 3))]
    #[case::to_whole(ratio(1, 3), ratio(2, 3), Ratio::from_integer(1))]
    #[case::mixed_denominators(ratio(1, 6), ratio(1, 4), ratio(5, 12))]
    #[case::with_negative(ratio(1, 2), ratio(-3, 4), ratio(-1, 4))]
    fn addition_reduces(#[case] lhs: Ratio, #[case] rhs: Ratio, #[case] expected: Ratio) {
        assert_eq!(lhs + rhs, expected);
    }

    #[rstest]
    #[case::positive(ratio(7, 3), 2)]
    #[case::exact(ratio(6, 3), 2)]
    #[case::below_one(ratio(1, 3), 0)]
    #[case::negative(ratio(-7, 3), -3)]
    fn floor_rounds_toward_negative_infinity(#[case] value: Ratio, #[case] expected: i64) {
        assert_eq!(value.floor(), BigInt::from(expected));
    }

    #[test]
    fn integer_scaling() {
        assert_eq!(ratio(1, 3).mul_integer(6), Ratio::from_integer(2));
        assert_eq!(
            ratio(1000, 1).div_integer(3).expect("non-zero"),
            ratio(1000, 3)
        );
    }

    #[test]
    fn quotient_and_scaling_with_non_zero_divisors() {
        let three = NonZeroU64::new(3).expect("non-zero");
        assert_eq!(Ratio::from_quotient(1000, three), ratio(1000, 3));
        assert_eq!(ratio(1000, 3).scaled(3, three), ratio(1000, 3));
        let thousand = NonZeroU64::new(1000).expect("non-zero");
        assert_eq!(ratio(700, 1).scaled(100, thousand), ratio(70, 1));
    }

    #[test]
    fn ordering_uses_exact_values() {
        assert!(ratio(1, 3) < ratio(334, 1000));
        assert!(ratio(-1, 2) < ratio(0, 1));
        assert_eq!(ratio(2, 4).cmp(&ratio(1, 2)), Ordering::Equal);
    }

    #[test]
    fn display_omits_unit_denominator() {
        assert_eq!(ratio(10, 5).to_string(), "2");
        assert_eq!(ratio(1000, 3).to_string(), "1000/3");
    }

    proptest! {
        #[test]
        fn thirds_accumulate_without_drift(count in 1usize..=200) {
            let third = ratio(1, 3);
            let total: Ratio = std::iter::repeat_n(&third, count * 3).sum();
            prop_assert_eq!(total, Ratio::from_integer(count as i64));
        }

        #[test]
        fn addition_is_order_independent(
            values in prop::collection::vec((-10_000i64..=10_000, 1i64..=997), 1..=12),
        ) {
            let forward: Ratio = values.iter().map(|&(n, d)| ratio(n, d)).sum();
            let backward: Ratio = values.iter().rev().map(|&(n, d)| ratio(n, d)).sum();
            prop_assert_eq!(forward, backward);
        }
    }
}
