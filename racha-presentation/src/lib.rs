#![warn(clippy::uninlined_format_args)]

pub mod error_presenter;
pub mod exact_value;

pub use error_presenter::format_processing_error;
pub use exact_value::{ExactValueFormat, RachaExactValueFormatter, format_exact_value};
