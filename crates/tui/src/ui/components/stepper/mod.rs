//! Multi-step navigation widget.
//!
//! A stepper shows a list of labeled steps, highlights the active one with a
//! sliding indicator, and reports user selections as
//! [`Effect::StepChanged`](stepline_types::Effect::StepChanged). The active
//! step can also be bound from outside; such updates are applied silently so
//! a host that echoes every change back cannot loop.
//!
//! - [`StepperState`]: selection state machine and geometry, held by `App`.
//! - [`StepperComponent`]: rendering and input handling for one instance.
//!
//! # Usage
//!
//! ```ignore
//! let mut state = StepperState::new(steps, Direction::Horizontal, Some(&Step::new("Email")))?;
//! state.sync_layout(area); // mounts on the first render
//! if let Some(step) = state.select(2) {
//!     // report `step` to the host
//! }
//! ```

mod animation;
mod error;
mod layout;
mod state;
mod stepper_component;

pub use animation::DEFAULT_TRANSITION;
pub use error::{CURRENT_STEP_REQUIRED, StepperError};
pub use state::StepperState;
pub use stepper_component::StepperComponent;
