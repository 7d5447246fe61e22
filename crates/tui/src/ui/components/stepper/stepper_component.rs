use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    Frame,
    layout::{Position, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::Paragraph,
};
use stepline_types::{Direction, Effect, Step, StepperSlot};

use super::{StepperState, layout::label_text};
use crate::{
    app::App,
    ui::{
        components::Component,
        theme::{Theme, theme_helpers as th},
    },
};

const HORIZONTAL_INDICATOR: &str = "━";
const VERTICAL_INDICATOR: &str = "┃";

/// Renders one stepper instance and turns input into step selections.
///
/// The state lives on [`App`] under the component's slot so the host can
/// push externally bound steps into it between frames.
#[derive(Debug, Clone, Copy)]
pub struct StepperComponent {
    pub slot: StepperSlot,
}

impl StepperComponent {
    pub fn new(slot: StepperSlot) -> Self {
        Self { slot }
    }

    fn changed(&self, step: Option<Step>) -> Vec<Effect> {
        step.map(|step| Effect::StepChanged { slot: self.slot, step }).into_iter().collect()
    }

    fn render_labels(frame: &mut Frame, state: &StepperState, theme: &dyn Theme, focused: bool) {
        let current = state.current_index();
        for (position, (step, rect)) in state.steps().iter().zip(&state.layout().items).enumerate() {
            if rect.is_empty() {
                continue;
            }
            let style = th::step_label_style(theme, current == Some(position), focused);
            frame.render_widget(Paragraph::new(label_text(position, &step.label)).style(style), *rect);
        }
    }

    fn render_indicator(frame: &mut Frame, state: &StepperState, theme: &dyn Theme, now: Instant) {
        if state.current_index().is_none() {
            return;
        }
        let layout = state.layout();
        let rect = layout.indicator_rect(state.indicator_at(now));
        if rect.is_empty() {
            return;
        }
        let lines: Vec<Line> = match layout.direction {
            Direction::Horizontal => vec![Line::from(HORIZONTAL_INDICATOR.repeat(usize::from(rect.width)))],
            Direction::Vertical => (0..rect.height).map(|_| Line::from(VERTICAL_INDICATOR)).collect(),
        };
        frame.render_widget(Paragraph::new(lines).style(theme.indicator_style()), rect);
    }

    fn render_panels(frame: &mut Frame, state: &StepperState, theme: &dyn Theme, now: Instant) {
        let Some(panels) = state.panel_offsets_at(now) else {
            return;
        };
        let outgoing = panels.outgoing.map(|(index, offset)| (index, offset, false));
        let incoming = Some((panels.incoming.0, panels.incoming.1, true));
        for (index, offset, is_incoming) in outgoing.into_iter().chain(incoming) {
            let Some(step) = state.steps().get(index) else {
                continue;
            };
            let Some((rect, scroll)) = state.layout().slide_rect(offset) else {
                continue;
            };
            let style = th::step_panel_style(theme, is_incoming);
            let lines = vec![
                Line::from(Span::styled(format!(" {}", step.label), style.add_modifier(Modifier::BOLD))),
                Line::from(format!(" Step {} of {}", index + 1, state.steps().len())),
            ];
            frame.render_widget(Paragraph::new(lines).style(style).scroll(scroll), rect);
        }
    }
}

impl Component for StepperComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        if key.kind != KeyEventKind::Press {
            return Vec::new();
        }
        let state = app.stepper_mut(self.slot);
        let vertical = state.direction().is_vertical();
        let step = match key.code {
            KeyCode::Right if !vertical => state.select_next(),
            KeyCode::Left if !vertical => state.select_previous(),
            KeyCode::Down if vertical => state.select_next(),
            KeyCode::Up if vertical => state.select_previous(),
            KeyCode::Home => state.select_first(),
            KeyCode::End => state.select_last(),
            KeyCode::Char(c @ '1'..='9') => c
                .to_digit(10)
                .and_then(|digit| state.select(digit as usize - 1)),
            _ => None,
        };
        self.changed(step)
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Vec::new();
        }
        let state = app.stepper(self.slot);
        if !state.layout().area.contains(Position::new(mouse.column, mouse.row)) {
            return Vec::new();
        }
        let target = state.hit_test(mouse.column, mouse.row);
        app.focus.focus(app.stepper(self.slot));

        let step = target.and_then(|index| app.stepper_mut(self.slot).select(index));
        self.changed(step)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        let now = Instant::now();
        let App { ctx, steppers, .. } = app;
        let theme = &*ctx.theme;
        let state = &mut steppers[self.slot.index()];
        let focused = state.container_focus.get();

        let block = th::block(theme, Some(self.slot.title()), focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        state.sync_layout(inner);

        Self::render_labels(frame, state, theme, focused);
        Self::render_indicator(frame, state, theme, now);
        Self::render_panels(frame, state, theme, now);
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        let navigate = if app.stepper(self.slot).direction().is_vertical() {
            " ↑/↓"
        } else {
            " ←/→"
        };
        th::build_hint_spans(
            &*app.ctx.theme,
            &[(navigate, " Step "), (" Home/End", " First/last "), (" 1-9", " Jump ")],
        )
    }
}
