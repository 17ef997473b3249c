pub mod bill_calculator;
pub mod extras_allocator;
pub mod item_allocator;
pub mod participant_index;

pub use bill_calculator::{BillCalculator, verify_reconciliation};
pub use extras_allocator::{ExtraTotals, ExtrasAllocator};
pub use item_allocator::{ItemAllocator, ItemTotals};
pub use participant_index::ParticipantIndex;
