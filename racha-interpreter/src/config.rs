use racha_domain::{Money, PlatformFees};
use racha_presentation::ExactValueFormat;
use std::env;
use thiserror::Error;

const EXACT_VALUES: &str = "RACHA_EXACT_VALUES";
const EXACT_DIGITS: &str = "RACHA_EXACT_DIGITS";
const PLATFORM_FEE: &str = "RACHA_PLATFORM_FEE";
const PAYMENT_FEE: &str = "RACHA_PAYMENT_FEE";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{}", racha_i18n::invalid_setting(.key, .value))]
    InvalidValue { key: &'static str, value: String },
}

/// Interpreter settings read from the environment (and `.env`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterpreterConfig {
    pub exact_values: bool,
    pub exact_digits: u32,
    /// Overrides the fee found in the bill file when set.
    pub platform_fee: Option<Money>,
    pub payment_fee: Option<Money>,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            exact_values: true,
            exact_digits: ExactValueFormat::DEFAULT_EXTRA_DIGITS,
            platform_fee: None,
            payment_fee: None,
        }
    }
}

impl InterpreterConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let exact_values = match lookup(EXACT_VALUES) {
            Some(raw) => parse_flag(EXACT_VALUES, &raw)?,
            None => defaults.exact_values,
        };
        let exact_digits = match lookup(EXACT_DIGITS) {
            Some(raw) => raw.trim().parse::<u32>().map_err(|_| invalid(EXACT_DIGITS, &raw))?,
            None => defaults.exact_digits,
        };
        let platform_fee = lookup(PLATFORM_FEE)
            .map(|raw| parse_fee(PLATFORM_FEE, &raw))
            .transpose()?;
        let payment_fee = lookup(PAYMENT_FEE)
            .map(|raw| parse_fee(PAYMENT_FEE, &raw))
            .transpose()?;

        Ok(Self {
            exact_values,
            exact_digits,
            platform_fee,
            payment_fee,
        })
    }

    pub fn apply_fees(&self, fees: PlatformFees) -> PlatformFees {
        PlatformFees {
            platform_fee: self.platform_fee.or(fees.platform_fee),
            payment_fee: self.payment_fee.or(fees.payment_fee),
        }
    }
}

fn invalid(key: &'static str, raw: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key,
        value: raw.to_string(),
    }
}

fn parse_flag(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(invalid(key, raw)),
    }
}

fn parse_fee(key: &'static str, raw: &str) -> Result<Money, ConfigError> {
    match raw.trim().parse::<i64>() {
        Ok(cents) if cents >= 0 => Ok(Money::from_i64(cents)),
        _ => Err(invalid(key, raw)),
    }
}
