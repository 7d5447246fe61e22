//! Host view state: the page that embeds three steppers.
//!
//! The host owns the "current step" of every instance. Each stepper reports
//! user selections here and the host stores the reported step verbatim; the
//! stored value is then bound back into the stepper, which applies it without
//! emitting again.

use std::time::Duration;

use stepline_types::{Direction, Step, StepperSlot};
use tracing::debug;

use crate::ui::components::stepper::DEFAULT_TRANSITION;

/// Step labels shown by the demo host.
pub const DEMO_LABELS: [&str; 6] = ["Role", "Email", "Settings", "Role", "Email", "Settings"];

/// Step initially bound to every instance.
pub const DEMO_INITIAL_LABEL: &str = "Email";

/// Static configuration of the host view.
#[derive(Debug, Clone, PartialEq)]
pub struct HostConfig {
    pub steps: Vec<Step>,
    /// Label bound as the initial current step of every instance. `None`
    /// leaves the instances without a current step.
    pub initial_label: Option<String>,
    pub directions: [Direction; 3],
    pub animation: Duration,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            steps: DEMO_LABELS.iter().map(|label| Step::new(*label)).collect(),
            initial_label: Some(DEMO_INITIAL_LABEL.to_string()),
            directions: [Direction::Horizontal, Direction::Vertical, Direction::Horizontal],
            animation: DEFAULT_TRANSITION,
        }
    }
}

impl HostConfig {
    pub fn with_steps(mut self, steps: Vec<Step>, initial_label: Option<String>) -> Self {
        self.steps = steps;
        self.initial_label = initial_label;
        self
    }

    /// Uses `direction` for all three instances.
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.directions = [direction; 3];
        self
    }

    pub fn with_animation(mut self, animation: Duration) -> Self {
        self.animation = animation;
        self
    }
}

/// Per-instance current steps held by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostState {
    current_steps: [Option<Step>; 3],
}

impl HostState {
    pub fn new(config: &HostConfig) -> Self {
        let initial = config.initial_label.as_deref().map(Step::new);
        Self {
            current_steps: [initial.clone(), initial.clone(), initial],
        }
    }

    pub fn current_step(&self, slot: StepperSlot) -> Option<&Step> {
        self.current_steps[slot.index()].as_ref()
    }

    /// Stores the step reported by the stepper in `slot`. Nothing else.
    pub fn on_stepper_change(&mut self, slot: StepperSlot, step: Step) {
        debug!(%slot, %step, "Host received step change");
        self.current_steps[slot.index()] = Some(step);
    }
}
