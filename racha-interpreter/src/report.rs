use crate::snapshot::Bill;
use racha_domain::{AllocationMode, CalculationResult, ExtraStatus, Money, ParticipantId};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoneyReport {
    pub cents: i64,
    pub amount: Decimal,
}

impl From<Money> for MoneyReport {
    fn from(money: Money) -> Self {
        Self {
            cents: money.amount(),
            amount: money.to_major_units(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ParticipantReport {
    pub id: u64,
    pub name: String,
    pub items: MoneyReport,
    pub extras: MoneyReport,
    pub total: MoneyReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exact_value: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ShareReport {
    pub participant_id: u64,
    pub amount: MoneyReport,
}

#[derive(Debug, Serialize)]
pub struct ItemReport {
    pub id: u64,
    pub shares: Vec<ShareReport>,
}

#[derive(Debug, Serialize)]
pub struct ExtraReport {
    pub id: u64,
    pub allocation_mode: &'static str,
    pub status: &'static str,
    pub amount: MoneyReport,
    pub distributed: MoneyReport,
    pub shares: Vec<ShareReport>,
}

#[derive(Debug, Serialize)]
pub struct BillReport {
    pub participants: Vec<ParticipantReport>,
    pub items: Vec<ItemReport>,
    pub extras: Vec<ExtraReport>,
    pub items_total: MoneyReport,
    pub extras_total: MoneyReport,
    pub grand_total: MoneyReport,
    pub platform_fee: MoneyReport,
    pub payment_fee: MoneyReport,
    pub platform_total: MoneyReport,
    pub final_amount: MoneyReport,
}

impl BillReport {
    pub fn new(bill: &Bill, result: &CalculationResult) -> Self {
        let participants = result
            .breakdown
            .values()
            .map(|entry| ParticipantReport {
                id: entry.participant_id.0,
                name: bill
                    .participant_name(entry.participant_id)
                    .unwrap_or_default()
                    .to_string(),
                items: entry.items.into(),
                extras: entry.extras.into(),
                total: entry.total.into(),
                exact_value: result
                    .exact_values
                    .as_ref()
                    .and_then(|values| values.get(&entry.participant_id))
                    .cloned(),
            })
            .collect();

        let items = result
            .items
            .iter()
            .map(|allocation| ItemReport {
                id: allocation.item_id.0,
                shares: share_reports(&allocation.shares),
            })
            .collect();

        let extras = result
            .extras
            .iter()
            .map(|allocation| ExtraReport {
                id: allocation.extra_id.0,
                allocation_mode: match allocation.allocation_mode {
                    AllocationMode::Equal => "EQUAL",
                    AllocationMode::Proportional => "PROPORTIONAL",
                },
                status: match allocation.status {
                    ExtraStatus::Distributed => "DISTRIBUTED",
                    ExtraStatus::ZeroAmount => "ZERO_AMOUNT",
                    ExtraStatus::NoConsumption => "NO_CONSUMPTION",
                    ExtraStatus::NoParticipants => "NO_PARTICIPANTS",
                },
                amount: allocation.amount.into(),
                distributed: allocation.allocated().into(),
                shares: share_reports(&allocation.shares),
            })
            .collect();

        Self {
            participants,
            items,
            extras,
            items_total: result.items_total.into(),
            extras_total: result.extras_total.into(),
            grand_total: result.grand_total.into(),
            platform_fee: result.platform_fee.into(),
            payment_fee: result.payment_fee.into(),
            platform_total: result.platform_total.into(),
            final_amount: result.final_amount.into(),
        }
    }
}

fn share_reports(shares: &[(ParticipantId, Money)]) -> Vec<ShareReport> {
    shares
        .iter()
        .map(|(participant_id, amount)| ShareReport {
            participant_id: participant_id.0,
            amount: (*amount).into(),
        })
        .collect()
}
