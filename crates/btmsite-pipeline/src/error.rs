use btmsite_core::{CheckResult, Step, StepOutcome};
use btmsite_places::PlacesError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Places(#[from] PlacesError),

    #[error("Could not find a valid ZIP code.")]
    MissingPostalCode,
}

/// A single-address run that aborted part way through.
///
/// `completed` holds the outcomes of the steps that finished before `step`.
#[derive(Debug, Error)]
#[error("{} failed: {error}", .step.title())]
pub struct QualifyFailure {
    pub step: Step,
    pub completed: Vec<StepOutcome>,
    #[source]
    pub error: PipelineError,
}

impl QualifyFailure {
    /// Completed outcomes followed by the aborted step marked failed.
    #[must_use]
    pub fn outcomes(&self) -> Vec<StepOutcome> {
        let mut outcomes = self.completed.clone();
        outcomes.push(StepOutcome {
            step: self.step,
            result: CheckResult::fail(self.error.to_string()),
        });
        outcomes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use btmsite_core::CheckStatus;

    #[test]
    fn outcomes_append_the_failed_step() {
        let failure = QualifyFailure {
            step: Step::Population,
            completed: vec![StepOutcome {
                step: Step::Geocode,
                result: CheckResult::success("ZIP: 30301 / Found: Joe's Corner"),
            }],
            error: PipelineError::Places(PlacesError::NoData("30301".to_string())),
        };

        let outcomes = failure.outcomes();
        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[1].step, Step::Population);
        assert_eq!(outcomes[1].result.status, CheckStatus::Fail);
        assert!(outcomes[1].result.message.contains("30301"));
        assert!(failure.to_string().starts_with("Population density failed"));
    }

    #[test]
    fn missing_postal_code_message() {
        assert_eq!(
            PipelineError::MissingPostalCode.to_string(),
            "Could not find a valid ZIP code."
        );
    }
}
