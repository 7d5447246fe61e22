use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent};
use ratatui::{
    prelude::*,
    style::Style,
    widgets::Paragraph,
};
use stepline_types::{Effect, Msg, StepperSlot};

use super::components::{Component, StepperComponent};
use super::theme::theme_helpers as th;
use crate::app::App;

/// Rows given to a horizontal stepper: borders, labels, indicator and a
/// three-row panel.
const HORIZONTAL_HEIGHT: u16 = 7;

/// Top-level view of the host page: the three steppers stacked vertically
/// with a hints bar underneath.
#[derive(Debug)]
pub struct MainView {
    pub steppers: [StepperComponent; 3],
}

impl Default for MainView {
    fn default() -> Self {
        Self::new()
    }
}

impl MainView {
    pub fn new() -> Self {
        Self {
            steppers: StepperSlot::ALL.map(StepperComponent::new),
        }
    }

    /// Slot of the stepper holding focus, if any.
    fn focused_slot(app: &App) -> Option<StepperSlot> {
        StepperSlot::ALL
            .into_iter()
            .find(|slot| app.stepper(*slot).container_focus.get())
    }

    fn is_quit_key(key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => true,
            KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
            _ => false,
        }
    }
}

impl Component for MainView {
    fn handle_message(&mut self, app: &mut App, msg: Msg) -> Vec<Effect> {
        app.update(&msg);
        Vec::new()
    }

    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        if key.kind != KeyEventKind::Press {
            return Vec::new();
        }
        if Self::is_quit_key(&key) {
            return vec![Effect::Quit];
        }

        match key.code {
            KeyCode::Tab => {
                app.focus.next();
                Vec::new()
            }
            KeyCode::BackTab => {
                app.focus.prev();
                Vec::new()
            }
            _ => match Self::focused_slot(app) {
                Some(slot) => self.steppers[slot.index()].handle_key_events(app, key),
                None => Vec::new(),
            },
        }
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        self.steppers
            .iter_mut()
            .flat_map(|stepper| stepper.handle_mouse_events(app, mouse))
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        // Fill the entire background with the theme's background color for consistency
        let bg_fill = Paragraph::new("").style(Style::default().bg(app.ctx.theme.roles().background));
        frame.render_widget(bg_fill, area);

        let layout = self.get_preferred_layout(app, area);
        for (stepper, stepper_area) in self.steppers.iter_mut().zip(layout.iter().copied()) {
            stepper.render(frame, stepper_area, app);
        }

        let hint_spans: Vec<Span> = self.get_hint_spans(app);
        let hints_widget = Paragraph::new(Line::from(hint_spans)).style(app.ctx.theme.text_muted_style());
        frame.render_widget(hints_widget, layout[3]);
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        let mut hint_spans: Vec<Span> = vec![Span::styled("Hints: ", app.ctx.theme.text_muted_style())];

        if let Some(slot) = Self::focused_slot(app) {
            hint_spans.extend(self.steppers[slot.index()].get_hint_spans(app));
        }

        hint_spans.extend(th::build_hint_spans(
            &*app.ctx.theme,
            &[(" Tab", " Next stepper "), (" q", " Quit ")],
        ));

        hint_spans
    }

    fn get_preferred_layout(&self, app: &App, area: Rect) -> Vec<Rect> {
        let mut constraints: Vec<Constraint> = StepperSlot::ALL
            .iter()
            .map(|slot| {
                if app.stepper(*slot).direction().is_vertical() {
                    Constraint::Fill(1)
                } else {
                    Constraint::Length(HORIZONTAL_HEIGHT)
                }
            })
            .collect();
        constraints.push(Constraint::Length(1)); // Hints bar

        Layout::vertical(constraints).split(area).to_vec()
    }
}

#[cfg(test)]
mod tests {
    use ratatui::{Terminal, backend::TestBackend};
    use stepline_types::Step;

    use super::*;
    use crate::{
        host::HostConfig,
        ui::theme::{LoadedTheme, catalog},
    };

    fn app() -> App {
        App::new(HostConfig::default(), LoadedTheme::from_definition(catalog::default_truecolor())).unwrap()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn quit_keys_request_exit() {
        let mut app = app();
        let mut view = MainView::new();
        for event in [key(KeyCode::Char('q')), key(KeyCode::Esc), KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)] {
            assert_eq!(view.handle_key_events(&mut app, event), vec![Effect::Quit]);
        }
    }

    #[test]
    fn tab_cycles_focus_and_keys_reach_the_focused_stepper() {
        let mut app = app();
        let mut view = MainView::new();
        assert_eq!(MainView::focused_slot(&app), Some(StepperSlot::First));

        view.handle_key_events(&mut app, key(KeyCode::Tab));
        assert_eq!(MainView::focused_slot(&app), Some(StepperSlot::Second));

        let effects = view.handle_key_events(&mut app, key(KeyCode::Down));
        assert_eq!(
            effects,
            vec![Effect::StepChanged {
                slot: StepperSlot::Second,
                step: Step::with_index("Settings", 2),
            }]
        );
        assert_eq!(app.stepper(StepperSlot::First).current_index(), Some(1));

        view.handle_key_events(&mut app, key(KeyCode::BackTab));
        assert_eq!(MainView::focused_slot(&app), Some(StepperSlot::First));
    }

    #[test]
    fn only_key_presses_are_routed() {
        let mut app = app();
        let mut view = MainView::new();
        let release = KeyEvent::new_with_kind(KeyCode::Tab, KeyModifiers::NONE, KeyEventKind::Release);
        assert!(view.handle_key_events(&mut app, release).is_empty());
        assert_eq!(MainView::focused_slot(&app), Some(StepperSlot::First));

        let release = KeyEvent::new_with_kind(KeyCode::Char('q'), KeyModifiers::NONE, KeyEventKind::Release);
        assert!(view.handle_key_events(&mut app, release).is_empty());
    }

    #[test]
    fn layout_gives_horizontal_instances_a_fixed_height() {
        let app = app();
        let view = MainView::new();
        let areas = view.get_preferred_layout(&app, Rect::new(0, 0, 80, 30));
        assert_eq!(areas.len(), 4);
        assert_eq!(areas[0].height, HORIZONTAL_HEIGHT);
        assert_eq!(areas[2].height, HORIZONTAL_HEIGHT);
        assert_eq!(areas[3], Rect::new(0, 29, 80, 1));
        assert_eq!(areas[1].height, 30 - 2 * HORIZONTAL_HEIGHT - 1);
    }

    #[test]
    fn render_mounts_every_stepper() {
        let mut app = app();
        let mut view = MainView::new();
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                view.render(frame, area, &mut app);
            })
            .unwrap();

        for slot in StepperSlot::ALL {
            assert!(app.stepper(slot).is_mounted());
        }
        let buffer = terminal.backend().buffer();
        let hints: String = (0..80).map(|x| buffer[(x, 29)].symbol()).collect();
        assert!(hints.starts_with("Hints:"));
        assert!(hints.contains("Quit"));
    }
}
