use crate::{
    error::{FailureKind, ProcessingError},
    ports::ExactValueFormatter,
};
use indexmap::IndexMap;
use racha_domain::{BillCalculator, BillSnapshot, CalculationResult, PlatformFees};

#[derive(Clone, Copy)]
pub struct BillProcessor<'a> {
    formatter: Option<&'a dyn ExactValueFormatter>,
}

#[derive(Debug)]
pub enum ProcessingOutcome {
    Success(CalculationResult),
    Failure(ProcessingError),
}

impl ProcessingOutcome {
    pub fn into_result(self) -> Result<CalculationResult, ProcessingError> {
        match self {
            ProcessingOutcome::Success(result) => Ok(result),
            ProcessingOutcome::Failure(err) => Err(err),
        }
    }
}

impl<'a> BillProcessor<'a> {
    /// Processor that attaches exact-value strings rendered by `formatter`.
    pub fn new(formatter: &'a dyn ExactValueFormatter) -> Self {
        Self {
            formatter: Some(formatter),
        }
    }

    pub fn without_exact_values() -> Self {
        Self { formatter: None }
    }

    pub fn process(&self, bill: BillSnapshot<'_>, fees: PlatformFees) -> ProcessingOutcome {
        let mut result = match BillCalculator.calculate(bill, fees) {
            Ok(result) => result,
            Err(err) => {
                let err = ProcessingError::from(err);
                match err.kind() {
                    FailureKind::UserInput => {
                        tracing::info!(error = %err, "Bill rejected");
                    }
                    FailureKind::Internal => {
                        tracing::error!(error = %err, "Bill calculation failed");
                    }
                }
                return ProcessingOutcome::Failure(err);
            }
        };

        if let Some(formatter) = self.formatter {
            let exact_values: IndexMap<_, _> = result
                .breakdown
                .iter()
                .map(|(id, entry)| (*id, formatter.format(&entry.exact_total)))
                .collect();
            result.exact_values = Some(exact_values);
        }

        ProcessingOutcome::Success(result)
    }
}
