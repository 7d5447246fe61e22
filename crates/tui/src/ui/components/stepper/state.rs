use std::time::{Duration, Instant};

use rat_focus::{FocusBuilder, FocusFlag, HasFocus};
use ratatui::layout::Rect;
use stepline_types::{Direction, Step};
use tracing::{debug, warn};

use super::{
    animation::{AnimationHint, DEFAULT_TRANSITION, PanelFrame, SlideTransition},
    error::StepperError,
    layout::{IndicatorGeometry, StepperLayout},
};

/// Selection state of one stepper instance.
///
/// The state is created with its step list and the externally bound current
/// step, and afterwards changes only through:
///
/// - [`bind_current_step`](Self::bind_current_step): the host supplied a new
///   current step. Applied silently; the host already knows about it.
/// - [`select`](Self::select) and its keyboard variants: the user picked a
///   step. Returns the step to report back to the host.
/// - [`sync_layout`](Self::sync_layout): the render pass delivered the
///   container area. The first call mounts the stepper, later calls with a
///   different area re-measure the indicator.
#[derive(Debug, Clone)]
pub struct StepperState {
    steps: Vec<Step>,
    direction: Direction,
    /// `None` until a step has been resolved; index 0 is a real selection.
    current_index: Option<usize>,
    indicator: IndicatorGeometry,
    hint: AnimationHint,
    transition: Option<SlideTransition>,
    layout: StepperLayout,
    mounted: bool,
    dirty: bool,
    animation_duration: Duration,
    /// Focus flag for the stepper in the global focus tree.
    pub container_focus: FocusFlag,
}

impl StepperState {
    /// Creates a stepper, assigning each step its position as `index`, then
    /// binds the initial current step.
    ///
    /// # Errors
    ///
    /// Returns [`StepperError::Configuration`] when `current_step` is `None`.
    pub fn new(steps: Vec<Step>, direction: Direction, current_step: Option<&Step>) -> Result<Self, StepperError> {
        let steps = steps
            .into_iter()
            .enumerate()
            .map(|(index, step)| Step::with_index(step.label, index))
            .collect();
        let mut state = Self {
            steps,
            direction,
            current_index: None,
            indicator: IndicatorGeometry::default(),
            hint: AnimationHint::default(),
            transition: None,
            layout: StepperLayout::default(),
            mounted: false,
            dirty: false,
            animation_duration: DEFAULT_TRANSITION,
            container_focus: FocusFlag::named("stepper"),
        };
        state.bind_current_step(current_step)?;
        Ok(state)
    }

    /// Replaces the focus flag with one registered under `name`.
    pub fn named(mut self, name: &'static str) -> Self {
        self.container_focus = FocusFlag::named(name);
        self
    }

    pub fn with_animation_duration(mut self, duration: Duration) -> Self {
        self.animation_duration = duration;
        self
    }

    // ===== SELECTORS =====

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    pub fn current_step(&self) -> Option<&Step> {
        self.current_index.and_then(|index| self.steps.get(index))
    }

    /// Settled indicator geometry for the active step.
    pub fn indicator(&self) -> IndicatorGeometry {
        self.indicator
    }

    pub fn animation_hint(&self) -> AnimationHint {
        self.hint
    }

    pub fn transition(&self) -> Option<&SlideTransition> {
        self.transition.as_ref()
    }

    pub fn layout(&self) -> &StepperLayout {
        &self.layout
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    /// Resolves the list position for `step`: its `index` when in range,
    /// otherwise the first step with the same label.
    pub fn resolve_index(&self, step: &Step) -> Option<usize> {
        step.index
            .filter(|index| *index < self.steps.len())
            .or_else(|| self.steps.iter().position(|candidate| candidate.label == step.label))
    }

    /// Indicator geometry for the frame drawn at `now`.
    pub fn indicator_at(&self, now: Instant) -> IndicatorGeometry {
        match &self.transition {
            Some(transition) => transition.indicator_at(now, self.indicator),
            None => self.indicator,
        }
    }

    /// Panel offsets for the frame drawn at `now`; `None` without a selection.
    pub fn panel_offsets_at(&self, now: Instant) -> Option<PanelFrame> {
        let current = self.current_index?;
        Some(match &self.transition {
            Some(transition) => transition.panel_frame(now),
            None => PanelFrame {
                incoming: (current, 0.0),
                outgoing: None,
            },
        })
    }

    /// Index of the label under the given terminal cell.
    pub fn hit_test(&self, column: u16, row: u16) -> Option<usize> {
        self.layout.hit_test(column, row)
    }

    // ===== REDUCERS =====

    /// Applies a current step supplied by the host. Never reports a change
    /// back, so a host echoing its own state cannot loop.
    ///
    /// Returns the applied index, or `None` when no step matches; the
    /// selection and geometry are then left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`StepperError::Configuration`] when `step` is `None`.
    pub fn bind_current_step(&mut self, step: Option<&Step>) -> Result<Option<usize>, StepperError> {
        let step = step.ok_or_else(StepperError::missing_current_step)?;
        match self.resolve_index(step) {
            Some(index) => {
                debug!(step = %step, index, "Applying externally bound step");
                self.set_active(index, Instant::now());
                Ok(Some(index))
            }
            None => {
                warn!(label = %step.label, "No step matches the bound current step; keeping the previous selection");
                Ok(None)
            }
        }
    }

    /// Selects the step at `index` on behalf of the user.
    ///
    /// Returns the newly active step when the selection changed; `None` for an
    /// out-of-range index or the already active step.
    pub fn select(&mut self, index: usize) -> Option<Step> {
        if index >= self.steps.len() || self.current_index == Some(index) {
            return None;
        }
        self.set_active(index, Instant::now());
        let step = self.steps[index].clone();
        debug!(step = %step, "User selected step");
        Some(step)
    }

    pub fn select_next(&mut self) -> Option<Step> {
        let next = self.current_index.map_or(0, |index| index + 1);
        self.select(next)
    }

    pub fn select_previous(&mut self) -> Option<Step> {
        let previous = self.current_index?.checked_sub(1)?;
        self.select(previous)
    }

    pub fn select_first(&mut self) -> Option<Step> {
        self.select(0)
    }

    pub fn select_last(&mut self) -> Option<Step> {
        let last = self.steps.len().checked_sub(1)?;
        self.select(last)
    }

    /// Receives the container area from the render pass. Returns `true` when
    /// the geometry changed.
    pub fn sync_layout(&mut self, area: Rect) -> bool {
        if !self.mounted {
            self.mount(area);
            return true;
        }
        if area == self.layout.area {
            return false;
        }
        self.relayout(area);
        true
    }

    /// Drops a finished transition. Returns whether an animation is still running.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.transition.as_ref().is_some_and(|transition| transition.is_finished(now)) {
            self.transition = None;
            self.dirty = true;
        }
        self.transition.is_some()
    }

    /// Returns and clears the pending-redraw flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    fn mount(&mut self, area: Rect) {
        self.layout = StepperLayout::compute(area, &self.steps, self.direction);
        self.mounted = true;
        if self.steps.is_empty() {
            return;
        }
        let target = match self.current_index {
            Some(index) => index,
            None => {
                debug!("No current step resolved before mount; selecting the first step");
                0
            }
        };
        self.set_active(target, Instant::now());
    }

    fn relayout(&mut self, area: Rect) {
        self.layout = StepperLayout::compute(area, &self.steps, self.direction);
        if let Some(geometry) = self.current_index.and_then(|index| self.layout.measure(index)) {
            self.indicator = geometry;
        }
        self.transition = None;
        self.dirty = true;
    }

    fn set_active(&mut self, index: usize, now: Instant) {
        let previous = self.current_index;
        if let Some(hint) = previous.and_then(|from| AnimationHint::between(from, index)) {
            self.hint = hint;
        }

        if let Some(geometry) = self.layout.measure(index) {
            if let Some(from_index) = previous.filter(|from| *from != index) {
                // Start from what is on screen, which differs from the settled
                // geometry while a slide is still running.
                let (from_indicator, from_offset) = match &self.transition {
                    Some(running) => (running.indicator_at(now, self.indicator), running.panel_frame(now).incoming.1),
                    None => (self.indicator, 0.0),
                };
                self.transition = Some(SlideTransition {
                    from_index,
                    to_index: index,
                    from_indicator,
                    from_offset,
                    hint: self.hint,
                    started_at: now,
                    duration: self.animation_duration,
                });
            }
            self.indicator = geometry;
        }

        self.current_index = Some(index);
        self.dirty = true;
    }
}

impl HasFocus for StepperState {
    fn build(&self, builder: &mut FocusBuilder) {
        builder.leaf_widget(self);
    }

    fn focus(&self) -> FocusFlag {
        self.container_focus.clone()
    }

    fn area(&self) -> Rect {
        self.layout.area
    }
}
