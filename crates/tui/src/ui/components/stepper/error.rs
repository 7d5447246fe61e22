use thiserror::Error;

/// Message carried by the configuration error raised for a missing current step.
pub const CURRENT_STEP_REQUIRED: &str = "currentStep is required";

/// Fatal stepper errors. Unresolvable label lookups are not errors; see
/// [`StepperState::bind_current_step`](super::StepperState::bind_current_step).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StepperError {
    /// Mandatory input was missing when the stepper was created or updated.
    #[error("configuration error: {0}")]
    Configuration(&'static str),
}

impl StepperError {
    pub(crate) fn missing_current_step() -> Self {
        StepperError::Configuration(CURRENT_STEP_REQUIRED)
    }
}
