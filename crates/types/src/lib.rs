//! Shared data model for the stepline workspace.
//!
//! The TUI, the configuration helpers and the binary all speak in terms of
//! the types defined here: the [`Step`] entries a stepper displays, the
//! layout [`Direction`], the [`StepperSlot`] naming each hosted instance, and
//! the [`Msg`]/[`Effect`] pair exchanged between components and the runtime.

mod messages;
mod step;

pub use messages::{Effect, Msg, StepperSlot};
pub use step::{Direction, ParseDirectionError, Step};
