use racha_domain::CalculationError;
use thiserror::Error;

/// Who has to act on a failed calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The bill itself is malformed and must be edited.
    UserInput,
    /// The engine produced an inconsistent result.
    Internal,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{source}")]
pub struct ProcessingError {
    kind: FailureKind,
    source: CalculationError,
}

impl ProcessingError {
    pub fn kind(&self) -> FailureKind {
        self.kind
    }

    pub fn calculation_error(&self) -> &CalculationError {
        &self.source
    }
}

impl From<CalculationError> for ProcessingError {
    fn from(source: CalculationError) -> Self {
        let kind = if source.is_user_error() {
            FailureKind::UserInput
        } else {
            FailureKind::Internal
        };
        Self { kind, source }
    }
}
