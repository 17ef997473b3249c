use indexmap::IndexMap;
use racha_calc::Ratio;
use rust_decimal::Decimal;
use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
};

/// Amount in cents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Self = Self(0);

    /// Number of fractional digits of the major unit.
    pub const SCALE: u32 = 2;

    pub fn from_i64(value: i64) -> Self {
        Self(value)
    }

    pub fn amount(self) -> i64 {
        self.0
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Value in major units (e.g. 1234 cents -> 12.34).
    pub fn to_major_units(self) -> Decimal {
        Decimal::new(self.0, Self::SCALE)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ParticipantId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExtraId(pub u64);

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ExtraId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    pub sort_order: i32,
}

impl Participant {
    /// Key of the canonical `(sort_order, id)` order used for every tie-break.
    pub fn canonical_key(&self) -> (i32, ParticipantId) {
        (self.sort_order, self.id)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub amount: Money,
}

/// "This participant consumes this item."
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Share {
    pub item_id: ItemId,
    pub participant_id: ParticipantId,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExtraKind {
    /// Flat amount; a missing value counts as zero.
    Fixed { value: Option<Money> },
    /// Rate in basis points (10000 = 100%) applied to the items total.
    ServicePercent { basis_points: Option<u32> },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AllocationMode {
    /// Same amount for every participant, consumer or not.
    Equal,
    /// Weighted by each participant's item-only consumption.
    Proportional,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Extra {
    pub id: ExtraId,
    pub name: String,
    pub kind: ExtraKind,
    pub allocation_mode: AllocationMode,
}

/// Read-only view of a bill for a single calculation.
#[derive(Clone, Copy, Debug)]
pub struct BillSnapshot<'a> {
    pub participants: &'a [Participant],
    pub items: &'a [Item],
    pub shares: &'a [Share],
    pub extras: &'a [Extra],
}

/// Flat fees owed to the platform, never split among participants.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlatformFees {
    pub platform_fee: Option<Money>,
    pub payment_fee: Option<Money>,
}

impl PlatformFees {
    /// Sum of both fees, or `None` when it does not fit in [`Money`].
    pub fn checked_total(self) -> Option<Money> {
        self.platform_fee
            .unwrap_or_default()
            .checked_add(self.payment_fee.unwrap_or_default())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemAllocation {
    pub item_id: ItemId,
    pub shares: Vec<(ParticipantId, Money)>,
}

impl ItemAllocation {
    pub fn allocated(&self) -> Money {
        self.shares.iter().map(|(_, amount)| *amount).sum()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExtraStatus {
    Distributed,
    /// Computed amount was zero or negative.
    ZeroAmount,
    /// Proportional extra on a bill where nobody consumed anything.
    NoConsumption,
    NoParticipants,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtraAllocation {
    pub extra_id: ExtraId,
    pub allocation_mode: AllocationMode,
    /// Amount computed from the extra's kind, before distribution.
    pub amount: Money,
    pub status: ExtraStatus,
    pub shares: Vec<(ParticipantId, Money)>,
}

impl ExtraAllocation {
    pub fn allocated(&self) -> Money {
        self.shares.iter().map(|(_, amount)| *amount).sum()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParticipantBreakdown {
    pub participant_id: ParticipantId,
    pub items: Money,
    pub extras: Money,
    pub total: Money,
    /// Unrounded share in cents; informational only.
    pub exact_total: Ratio,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CalculationResult {
    /// Integer cents owed, in canonical participant order.
    pub participant_totals: IndexMap<ParticipantId, Money>,
    pub breakdown: IndexMap<ParticipantId, ParticipantBreakdown>,
    /// Rendered exact values, attached by the caller when requested.
    pub exact_values: Option<IndexMap<ParticipantId, String>>,
    pub items: Vec<ItemAllocation>,
    pub extras: Vec<ExtraAllocation>,
    pub items_total: Money,
    /// Sum of distributed extras only. An extra skipped as `NoConsumption` or
    /// `NoParticipants` is reported in `extras` but not counted here.
    pub extras_total: Money,
    /// `items_total + extras_total`, so skipped extras are not part of it either.
    pub grand_total: Money,
    pub platform_fee: Money,
    pub payment_fee: Money,
    pub platform_total: Money,
    /// `grand_total` plus platform fees.
    pub final_amount: Money,
}
