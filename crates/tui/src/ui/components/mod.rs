//! UI components: the stepper widget and the component trait.

pub mod component;
pub mod stepper;

pub(crate) use component::Component;
pub use stepper::StepperComponent;
