#![warn(clippy::uninlined_format_args)]

pub mod bill_processor;
pub mod error;
pub mod ports;

pub use bill_processor::{BillProcessor, ProcessingOutcome};
pub use error::{FailureKind, ProcessingError};
pub use ports::ExactValueFormatter;
