use racha_domain::{
    AllocationMode, BillSnapshot, Extra, ExtraId, ExtraKind, Item, ItemId, Money, Participant,
    ParticipantId, PlatformFees, Share,
};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{field} must not be negative (got {value})")]
    NegativeAmount { field: String, value: i64 },
}

/// Bill file as read from disk. Amounts are integer cents.
#[derive(Debug, Deserialize)]
pub struct BillFile {
    participants: Vec<ParticipantEntry>,
    #[serde(default)]
    items: Vec<ItemEntry>,
    #[serde(default)]
    shares: Vec<ShareEntry>,
    #[serde(default)]
    extras: Vec<ExtraEntry>,
    #[serde(default)]
    platform_fee_cents: Option<i64>,
    #[serde(default)]
    payment_fee_cents: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct ParticipantEntry {
    id: u64,
    name: String,
    #[serde(default)]
    sort_order: i32,
}

#[derive(Debug, Deserialize)]
struct ItemEntry {
    id: u64,
    name: String,
    amount_cents: i64,
}

#[derive(Debug, Deserialize)]
struct ShareEntry {
    item_id: u64,
    participant_id: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
enum ExtraType {
    Fixed,
    ServicePercent,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
enum AllocationModeEntry {
    Equal,
    Proportional,
}

#[derive(Debug, Deserialize)]
struct ExtraEntry {
    id: u64,
    name: String,
    #[serde(rename = "type")]
    extra_type: ExtraType,
    #[serde(default)]
    value_cents: Option<i64>,
    #[serde(default)]
    value_percent_bp: Option<u32>,
    allocation_mode: AllocationModeEntry,
}

/// Owned bill data backing a [`BillSnapshot`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bill {
    pub participants: Vec<Participant>,
    pub items: Vec<Item>,
    pub shares: Vec<Share>,
    pub extras: Vec<Extra>,
    pub fees: PlatformFees,
}

impl Bill {
    pub fn snapshot(&self) -> BillSnapshot<'_> {
        BillSnapshot {
            participants: &self.participants,
            items: &self.items,
            shares: &self.shares,
            extras: &self.extras,
        }
    }

    pub fn participant_name(&self, id: ParticipantId) -> Option<&str> {
        self.participants
            .iter()
            .find(|participant| participant.id == id)
            .map(|participant| participant.name.as_str())
    }
}

impl BillFile {
    pub fn from_json(source: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn into_bill(self) -> Result<Bill, SnapshotError> {
        let participants = self
            .participants
            .into_iter()
            .map(|entry| Participant {
                id: ParticipantId(entry.id),
                name: entry.name,
                sort_order: entry.sort_order,
            })
            .collect();

        let items = self
            .items
            .into_iter()
            .map(|entry| {
                let field = format!("items[{}].amount_cents", entry.id);
                Ok(Item {
                    id: ItemId(entry.id),
                    name: entry.name,
                    amount: non_negative(field, entry.amount_cents)?,
                })
            })
            .collect::<Result<Vec<_>, SnapshotError>>()?;

        let shares = self
            .shares
            .into_iter()
            .map(|entry| Share {
                item_id: ItemId(entry.item_id),
                participant_id: ParticipantId(entry.participant_id),
            })
            .collect();

        let extras = self
            .extras
            .into_iter()
            .map(|entry| {
                let kind = match entry.extra_type {
                    ExtraType::Fixed => ExtraKind::Fixed {
                        value: entry
                            .value_cents
                            .map(|cents| {
                                non_negative(format!("extras[{}].value_cents", entry.id), cents)
                            })
                            .transpose()?,
                    },
                    ExtraType::ServicePercent => ExtraKind::ServicePercent {
                        basis_points: entry.value_percent_bp,
                    },
                };
                let allocation_mode = match entry.allocation_mode {
                    AllocationModeEntry::Equal => AllocationMode::Equal,
                    AllocationModeEntry::Proportional => AllocationMode::Proportional,
                };
                Ok(Extra {
                    id: ExtraId(entry.id),
                    name: entry.name,
                    kind,
                    allocation_mode,
                })
            })
            .collect::<Result<Vec<_>, SnapshotError>>()?;

        let fees = PlatformFees {
            platform_fee: self
                .platform_fee_cents
                .map(|cents| non_negative("platform_fee_cents".to_string(), cents))
                .transpose()?,
            payment_fee: self
                .payment_fee_cents
                .map(|cents| non_negative("payment_fee_cents".to_string(), cents))
                .transpose()?,
        };

        Ok(Bill {
            participants,
            items,
            shares,
            extras,
            fees,
        })
    }
}

fn non_negative(field: String, value: i64) -> Result<Money, SnapshotError> {
    if value < 0 {
        return Err(SnapshotError::NegativeAmount { field, value });
    }
    Ok(Money::from_i64(value))
}
