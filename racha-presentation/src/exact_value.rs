use num_integer::Integer;
use num_traits::{Signed, Zero};
use racha_application::ExactValueFormatter;
use racha_domain::Ratio;

const CENTS_PER_UNIT: u32 = 100;
const MINOR_DIGITS: usize = 2;

/// Rendering rules for unrounded amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExactValueFormat {
    pub decimal_separator: char,
    pub thousands_separator: char,
    /// Appended when the value does not terminate within the printed digits.
    pub continuation_marker: &'static str,
    /// Fractional digits printed past the cents.
    pub extra_digits: u32,
}

impl ExactValueFormat {
    pub const DEFAULT_EXTRA_DIGITS: u32 = 6;

    pub fn with_extra_digits(self, extra_digits: u32) -> Self {
        Self {
            extra_digits,
            ..self
        }
    }
}

impl Default for ExactValueFormat {
    fn default() -> Self {
        Self {
            decimal_separator: racha_i18n::DECIMAL_SEPARATOR,
            thousands_separator: racha_i18n::THOUSANDS_SEPARATOR,
            continuation_marker: racha_i18n::CONTINUATION_MARKER,
            extra_digits: Self::DEFAULT_EXTRA_DIGITS,
        }
    }
}

/// Formats an amount given in cents as a major-unit decimal string.
///
/// Long division stops after `2 + extra_digits` fractional digits. A value that
/// terminates earlier loses its trailing zeros past the cents; one that does
/// not gets the continuation marker.
pub fn format_exact_value(exact_cents: &Ratio, format: &ExactValueFormat) -> String {
    let numer = exact_cents.numer().abs();
    let denom = exact_cents.denom() * CENTS_PER_UNIT;
    let (integer, mut remainder) = numer.div_rem(&denom);

    let digit_count = MINOR_DIGITS + format.extra_digits as usize;
    let mut fraction = String::with_capacity(digit_count);
    for _ in 0..digit_count {
        remainder *= 10u32;
        let (digit, rest) = remainder.div_rem(&denom);
        fraction.push_str(&digit.to_string());
        remainder = rest;
    }

    let truncated = !remainder.is_zero();
    if !truncated {
        while fraction.len() > MINOR_DIGITS && fraction.ends_with('0') {
            fraction.pop();
        }
    }

    let mut rendered = String::new();
    if exact_cents.is_negative() {
        rendered.push('-');
    }
    rendered.push_str(&group_thousands(
        &integer.to_string(),
        format.thousands_separator,
    ));
    rendered.push(format.decimal_separator);
    rendered.push_str(&fraction);
    if truncated {
        rendered.push_str(format.continuation_marker);
    }
    rendered
}

fn group_thousands(digits: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RachaExactValueFormatter {
    format: ExactValueFormat,
}

impl RachaExactValueFormatter {
    pub fn new(format: ExactValueFormat) -> Self {
        Self { format }
    }
}

impl ExactValueFormatter for RachaExactValueFormatter {
    fn format(&self, exact_cents: &Ratio) -> String {
        format_exact_value(exact_cents, &self.format)
    }
}
