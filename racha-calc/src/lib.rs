#![warn(clippy::uninlined_format_args)]

mod apportion;
mod ratio;

pub use apportion::{ApportionError, EvenSplit, distribute_evenly, largest_remainder, split_evenly};
pub use ratio::{Ratio, RatioError};
