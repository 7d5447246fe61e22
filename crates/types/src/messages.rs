use std::fmt;

use crate::Step;

/// Identifies one of the stepper instances embedded in the host view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepperSlot {
    First,
    Second,
    Third,
}

impl StepperSlot {
    /// All slots in render order.
    pub const ALL: [StepperSlot; 3] = [StepperSlot::First, StepperSlot::Second, StepperSlot::Third];

    /// Zero-based position of the slot, usable to index per-slot arrays.
    pub fn index(self) -> usize {
        match self {
            StepperSlot::First => 0,
            StepperSlot::Second => 1,
            StepperSlot::Third => 2,
        }
    }

    /// Title shown on the block surrounding the instance.
    pub fn title(self) -> &'static str {
        match self {
            StepperSlot::First => "First stepper",
            StepperSlot::Second => "Second stepper",
            StepperSlot::Third => "Third stepper",
        }
    }
}

impl fmt::Display for StepperSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Messages delivered to views by the runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Msg {
    /// Periodic UI tick (animation frames)
    Tick,
    /// Terminal resized
    Resize(u16, u16),
}

/// Side effects reported by components and executed by the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// The user selected a different step in the given stepper instance.
    StepChanged { slot: StepperSlot, step: Step },
    /// Leave the event loop and restore the terminal.
    Quit,
}
