//! Application state for the stepper TUI.
//!
//! `App` owns everything the views read and mutate: the shared theme context,
//! the host state, the three stepper states and the rat-focus tree. Views get
//! `&mut App` and report side effects as [`Effect`]s.

use std::time::Instant;

use rat_focus::{Focus, FocusBuilder, FocusFlag, HasFocus};
use ratatui::layout::Rect;
use stepline_types::{Msg, Step, StepperSlot};
use tracing::debug;

use crate::{
    host::{HostConfig, HostState},
    ui::{
        components::stepper::{StepperError, StepperState},
        theme::{LoadedTheme, Theme},
    },
};

/// Cross-cutting shared context owned by the App.
#[derive(Debug)]
pub struct SharedCtx {
    /// Active UI theme
    pub theme: Box<dyn Theme>,
}

impl SharedCtx {
    pub fn new(theme: LoadedTheme) -> Self {
        debug!(theme = theme.definition.id, "Using theme");
        Self { theme: theme.theme }
    }
}

#[derive(Debug)]
pub struct App {
    /// Shared, cross-cutting context (theme)
    pub ctx: SharedCtx,
    /// Host view state holding each instance's current step
    pub host: HostState,
    /// Stepper states indexed by [`StepperSlot::index`]
    pub steppers: [StepperState; 3],
    /// Global focus tree
    pub focus: Focus,
    container_focus: FocusFlag,
}

impl App {
    /// Builds the host and binds its initial current step into every stepper.
    ///
    /// # Errors
    ///
    /// Fails when the host has no current step for an instance.
    pub fn new(config: HostConfig, theme: LoadedTheme) -> Result<Self, StepperError> {
        let host = HostState::new(&config);
        let steppers = [
            Self::build_stepper(&config, &host, StepperSlot::First, "stepper.first")?,
            Self::build_stepper(&config, &host, StepperSlot::Second, "stepper.second")?,
            Self::build_stepper(&config, &host, StepperSlot::Third, "stepper.third")?,
        ];

        let mut app = Self {
            ctx: SharedCtx::new(theme),
            host,
            steppers,
            focus: Focus::default(),
            container_focus: FocusFlag::named("app"),
        };
        app.focus = FocusBuilder::build_for(&app);
        app.focus.first();
        Ok(app)
    }

    fn build_stepper(config: &HostConfig, host: &HostState, slot: StepperSlot, name: &'static str) -> Result<StepperState, StepperError> {
        let direction = config.directions[slot.index()];
        Ok(StepperState::new(config.steps.clone(), direction, host.current_step(slot))?
            .named(name)
            .with_animation_duration(config.animation))
    }

    pub fn stepper(&self, slot: StepperSlot) -> &StepperState {
        &self.steppers[slot.index()]
    }

    pub fn stepper_mut(&mut self, slot: StepperSlot) -> &mut StepperState {
        &mut self.steppers[slot.index()]
    }

    /// Delivers a stepper's change event to the host, then binds the host's
    /// value back into the same stepper. The rebind never emits, so the
    /// round trip ends here.
    pub fn apply_step_change(&mut self, slot: StepperSlot, step: Step) -> Result<(), StepperError> {
        self.host.on_stepper_change(slot, step);
        let current = self.host.current_step(slot).cloned();
        let applied = self.steppers[slot.index()].bind_current_step(current.as_ref())?;
        debug!(%slot, ?applied, "Re-bound host step into stepper");
        Ok(())
    }

    pub fn is_animating(&self) -> bool {
        self.steppers.iter().any(StepperState::is_animating)
    }

    /// Returns whether any stepper needs a redraw, clearing the flags.
    pub fn take_dirty(&mut self) -> bool {
        self.steppers.iter_mut().fold(false, |dirty, stepper| stepper.take_dirty() || dirty)
    }

    /// Applies a runtime message. Returns whether a redraw is needed.
    pub fn update(&mut self, msg: &Msg) -> bool {
        match msg {
            Msg::Tick => {
                let now = Instant::now();
                let animating = self.steppers.iter_mut().fold(false, |animating, stepper| stepper.tick(now) || animating);
                animating | self.take_dirty()
            }
            // The next render pass hands every stepper its new area.
            Msg::Resize(..) => true,
        }
    }
}

impl HasFocus for App {
    fn build(&self, builder: &mut FocusBuilder) {
        for stepper in &self.steppers {
            builder.widget(stepper);
        }
    }

    fn focus(&self) -> FocusFlag {
        self.container_focus.clone()
    }

    fn area(&self) -> Rect {
        Rect::default()
    }
}
