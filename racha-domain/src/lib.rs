#![warn(clippy::uninlined_format_args)]

pub mod error;
pub mod model;
pub mod services;

pub use error::CalculationError;
pub use model::{
    AllocationMode, BillSnapshot, CalculationResult, Extra, ExtraAllocation, ExtraId, ExtraKind,
    ExtraStatus, Item, ItemAllocation, ItemId, Money, Participant, ParticipantBreakdown,
    ParticipantId, PlatformFees, Share,
};
pub use racha_calc::Ratio;
pub use services::{BillCalculator, ExtrasAllocator, ItemAllocator, ParticipantIndex};
