//! Component system for the stepper TUI.
//!
//! Components are self-contained UI elements. Their state lives on [`App`] so
//! the focus tree and the host can reach it; the component itself handles
//! events, renders into a provided `Rect`, and reports side effects back to
//! the runtime as [`Effect`]s.

use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{Frame, layout::Rect, text::Span};
use stepline_types::{Effect, Msg};

use crate::app::App;

/// A UI component with its own rendering and input behavior.
///
/// Implementations should keep `render` free of side effects other than frame
/// drawing and recording the geometry needed for later hit-testing.
pub(crate) trait Component {
    /// Handle an application-level message the component cares about.
    fn handle_message(&mut self, _app: &mut App, _msg: Msg) -> Vec<Effect> {
        Vec::new()
    }

    /// Handle key events when this component has focus.
    fn handle_key_events(&mut self, _app: &mut App, _key: KeyEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// Handle mouse events. Components hit-test against their own areas.
    fn handle_mouse_events(&mut self, _app: &mut App, _mouse: MouseEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// Render the component into the given area.
    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App);

    /// Key hints shown in the hints bar while the component has focus.
    fn get_hint_spans(&self, _app: &App) -> Vec<Span<'_>> {
        Vec::new()
    }

    /// Splits `area` into the sub-areas the component renders into.
    fn get_preferred_layout(&self, _app: &App, area: Rect) -> Vec<Rect> {
        vec![area]
    }
}
