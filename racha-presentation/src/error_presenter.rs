use racha_application::ProcessingError;
use racha_domain::CalculationError;

pub fn format_processing_error(error: &ProcessingError) -> String {
    match error.calculation_error() {
        CalculationError::OrphanedItem { item_name, .. } => {
            format!(
                "{}: {}",
                racha_i18n::CALCULATION_FAILED,
                racha_i18n::orphaned_item(item_name)
            )
        }
        CalculationError::AmountOverflow { name } => {
            format!(
                "{}: {}",
                racha_i18n::CALCULATION_FAILED,
                racha_i18n::amount_overflow(name)
            )
        }
        CalculationError::InvariantViolation {
            participant_sum,
            items_total,
            extras_total,
        } => {
            format!(
                "{} ({participant_sum} != {items_total} + {extras_total})",
                racha_i18n::INTERNAL_ERROR
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use racha_domain::{ItemId, Money};
    use rstest::rstest;

    #[rstest]
    #[case::orphaned_item(
        CalculationError::OrphanedItem {
            item_id: ItemId(4),
            item_name: "Caipirinha".to_string(),
        },
        "Caipirinha"
    )]
    #[case::amount_overflow(
        CalculationError::AmountOverflow {
            name: "Gorjeta".to_string(),
        },
        "Gorjeta"
    )]
    #[case::invariant_violation(
        CalculationError::InvariantViolation {
            participant_sum: Money::from_i64(999),
            items_total: Money::from_i64(1000),
            extras_total: Money::from_i64(0),
        },
        "999 != 1000 + 0"
    )]
    fn message_includes_details(#[case] error: CalculationError, #[case] expected: &str) {
        let message = format_processing_error(&ProcessingError::from(error));
        assert!(message.contains(expected), "{message}");
    }
}
