use ratatui::{
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders},
};

use super::roles::{Theme, ThemeRoles};

/// Build a standard Block with theme surfaces and borders.
pub fn block<'a, T: Theme + ?Sized>(theme: &'a T, title: Option<&'a str>, focused: bool) -> Block<'a> {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(if focused { BorderType::Thick } else { BorderType::Plain })
        .border_style(theme.border_style(focused))
        .style(panel_style(theme));
    if let Some(t) = title {
        block = block.title(Span::styled(t, theme.text_secondary_style().add_modifier(Modifier::BOLD)));
    }
    block
}

/// Style for panel-like containers (set background on widget using `.style`).
pub fn panel_style<T: Theme + ?Sized>(theme: &T) -> Style {
    let ThemeRoles { surface, text, .. } = *theme.roles();
    Style::default().bg(surface).fg(text)
}

/// Style for the sliding content panel of a stepper.
pub fn step_panel_style<T: Theme + ?Sized>(theme: &T, incoming: bool) -> Style {
    let ThemeRoles {
        surface_muted,
        text,
        text_muted,
        ..
    } = *theme.roles();
    let fg = if incoming { text } else { text_muted };
    Style::default().bg(surface_muted).fg(fg)
}

/// Style for a step label. The active step is accented; when the stepper
/// has focus the active label also takes the selection background.
pub fn step_label_style<T: Theme + ?Sized>(theme: &T, active: bool, focused: bool) -> Style {
    match (active, focused) {
        (true, true) => theme.selection_style().add_modifier(Modifier::BOLD),
        (true, false) => theme.accent_emphasis_style(),
        (false, _) => theme.text_secondary_style(),
    }
}

/// Builds `key description` hint pairs styled for the hints bar.
pub fn build_hint_spans<'a, T: Theme + ?Sized>(theme: &T, hints: &[(&'a str, &'a str)]) -> Vec<Span<'a>> {
    hints
        .iter()
        .flat_map(|(key, description)| {
            [
                Span::styled(*key, theme.accent_primary_style()),
                Span::styled(*description, theme.text_muted_style()),
            ]
        })
        .collect()
}
