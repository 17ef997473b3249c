#![warn(clippy::uninlined_format_args)]

#[cfg(all(feature = "pt", feature = "en"))]
compile_error!("Cannot enable both 'pt' and 'en' features at the same time");

#[cfg(feature = "pt")]
pub mod strings {
    pub const DECIMAL_SEPARATOR: char = ',';
    pub const THOUSANDS_SEPARATOR: char = '.';
    pub const CONTINUATION_MARKER: &str = "…";
    pub const CALCULATION_FAILED: &str = "Falha ao calcular a divisão da conta";
    pub const INTERNAL_ERROR: &str =
        "Erro interno: os totais dos participantes não fecham com o total da conta";
    pub const USAGE: &str = "Uso: racha-interpreter <conta.json>";
}

#[cfg(feature = "en")]
pub mod strings {
    pub const DECIMAL_SEPARATOR: char = '.';
    pub const THOUSANDS_SEPARATOR: char = ',';
    pub const CONTINUATION_MARKER: &str = "…";
    pub const CALCULATION_FAILED: &str = "Bill split calculation failed";
    pub const INTERNAL_ERROR: &str =
        "Internal error: participant totals do not reconcile with the bill total";
    pub const USAGE: &str = "Usage: racha-interpreter <bill.json>";
}

#[cfg(not(any(feature = "pt", feature = "en")))]
pub mod strings {
    pub const DECIMAL_SEPARATOR: char = '.';
    pub const THOUSANDS_SEPARATOR: char = ',';
    pub const CONTINUATION_MARKER: &str = "…";
    pub const CALCULATION_FAILED: &str = "Bill split calculation failed";
    pub const INTERNAL_ERROR: &str =
        "Internal error: participant totals do not reconcile with the bill total";
    pub const USAGE: &str = "Usage: racha-interpreter <bill.json>";
}

pub use strings::*;

#[cfg(feature = "pt")]
pub fn orphaned_item(name: impl std::fmt::Display) -> String {
    format!("O item '{name}' não tem consumidores válidos")
}

#[cfg(feature = "pt")]
pub fn amount_overflow(name: impl std::fmt::Display) -> String {
    format!("O valor de '{name}' é grande demais para a conta")
}

#[cfg(feature = "pt")]
pub fn invalid_setting(key: impl std::fmt::Display, value: impl std::fmt::Display) -> String {
    format!("Valor inválido para {key}: '{value}'")
}

#[cfg(feature = "pt")]
pub fn failed_to_read(path: impl std::fmt::Display, detail: impl std::fmt::Display) -> String {
    format!("Falha ao ler '{path}': {detail}")
}

#[cfg(feature = "pt")]
pub fn invalid_bill(detail: impl std::fmt::Display) -> String {
    format!("Conta inválida: {detail}")
}

#[cfg(feature = "en")]
pub fn orphaned_item(name: impl std::fmt::Display) -> String {
    format!("Item '{name}' has no valid consumers")
}

#[cfg(feature = "en")]
pub fn amount_overflow(name: impl std::fmt::Display) -> String {
    format!("Amount of '{name}' is too large for the bill")
}

#[cfg(feature = "en")]
pub fn invalid_setting(key: impl std::fmt::Display, value: impl std::fmt::Display) -> String {
    format!("Invalid value for {key}: '{value}'")
}

#[cfg(feature = "en")]
pub fn failed_to_read(path: impl std::fmt::Display, detail: impl std::fmt::Display) -> String {
    format!("Failed to read '{path}': {detail}")
}

#[cfg(feature = "en")]
pub fn invalid_bill(detail: impl std::fmt::Display) -> String {
    format!("Invalid bill: {detail}")
}

#[cfg(not(any(feature = "pt", feature = "en")))]
pub fn orphaned_item(name: impl std::fmt::Display) -> String {
    format!("Item '{name}' has no valid consumers")
}

#[cfg(not(any(feature = "pt", feature = "en")))]
pub fn amount_overflow(name: impl std::fmt::Display) -> String {
    format!("Amount of '{name}' is too large for the bill")
}

#[cfg(not(any(feature = "pt", feature = "en")))]
pub fn invalid_setting(key: impl std::fmt::Display, value: impl std::fmt::Display) -> String {
    format!("Invalid value for {key}: '{value}'")
}

#[cfg(not(any(feature = "pt", feature = "en")))]
pub fn failed_to_read(path: impl std::fmt::Display, detail: impl std::fmt::Display) -> String {
    format!("Failed to read '{path}': {detail}")
}

#[cfg(not(any(feature = "pt", feature = "en")))]
pub fn invalid_bill(detail: impl std::fmt::Display) -> String {
    format!("Invalid bill: {detail}")
}
