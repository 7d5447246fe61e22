//! Theme styling module for the TUI UI layer.
//!
//! This module defines the color palettes (Dracula, Nord), an ANSI 256-color
//! fallback, semantic theme roles, and helper builders for Ratatui widgets
//! and styles. Prefer these helpers over hard-coding colors.

use std::env;

use tracing::debug;

pub mod ansi256;
pub mod catalog;
pub mod dracula;
pub mod nord;
pub mod roles;
pub mod theme_helpers;

pub use ansi256::Ansi256Theme;
pub use catalog::ThemeDefinition;
pub use dracula::DraculaTheme;
pub use nord::NordTheme;
pub use roles::Theme;

/// Environment variable naming a theme; wins over every other source.
pub const THEME_ENV: &str = "TUI_THEME";

/// Theme plus metadata describing how it was selected.
pub struct LoadedTheme {
    pub definition: &'static ThemeDefinition,
    pub theme: Box<dyn Theme>,
}

impl LoadedTheme {
    pub fn from_definition(definition: &'static ThemeDefinition) -> Self {
        Self {
            definition,
            theme: definition.build(),
        }
    }
}

impl std::fmt::Debug for LoadedTheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedTheme").field("id", &self.definition.id).finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColorCapability {
    Truecolor,
    Ansi256,
}

/// Selects a theme from `TUI_THEME`, then the explicit request, then the
/// persisted preference, falling back to the capability default.
pub fn load(requested: Option<&str>, preferred: Option<&str>) -> LoadedTheme {
    let env_theme = env::var(THEME_ENV).ok();
    select(detect_color_capability(), env_theme.as_deref(), requested, preferred)
}

fn select(capability: ColorCapability, env_theme: Option<&str>, requested: Option<&str>, preferred: Option<&str>) -> LoadedTheme {
    if matches!(capability, ColorCapability::Ansi256) {
        debug!("ANSI-only terminal detected; ignoring theme overrides and forcing fallback palette.");
        return LoadedTheme::from_definition(catalog::default_ansi());
    }

    for name in [env_theme, requested, preferred].into_iter().flatten() {
        if let Some(definition) = catalog::resolve(name) {
            return LoadedTheme::from_definition(definition);
        }
        debug!(theme = name, "Unknown theme name; trying next source");
    }

    LoadedTheme::from_definition(catalog::default_truecolor())
}

fn detect_color_capability() -> ColorCapability {
    if let Some(mode) = env::var("TUI_COLOR_MODE").ok().and_then(|value| parse_color_mode(value.trim())) {
        return mode;
    }

    let color_term = env::var("COLORTERM").unwrap_or_default().to_ascii_lowercase();
    if color_term.contains("truecolor") || color_term.contains("24bit") {
        return ColorCapability::Truecolor;
    }

    let term = env::var("TERM").unwrap_or_default().to_ascii_lowercase();
    if term.contains("truecolor") || term.contains("direct") {
        return ColorCapability::Truecolor;
    }

    ColorCapability::Ansi256
}

fn parse_color_mode(value: &str) -> Option<ColorCapability> {
    match value.to_ascii_lowercase().as_str() {
        "truecolor" | "24bit" => Some(ColorCapability::Truecolor),
        "ansi256" | "256" | "8bit" => Some(ColorCapability::Ansi256),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_beats_request_and_preference() {
        let loaded = select(ColorCapability::Truecolor, Some("nord"), Some("dracula"), Some("dracula"));
        assert_eq!(loaded.definition.id, "nord");
    }

    #[test]
    fn unknown_names_fall_through_to_next_source() {
        let loaded = select(ColorCapability::Truecolor, Some("solarized"), None, Some("nord"));
        assert_eq!(loaded.definition.id, "nord");

        let loaded = select(ColorCapability::Truecolor, None, None, None);
        assert_eq!(loaded.definition.id, "dracula");
    }

    #[test]
    fn ansi_terminals_always_get_the_fallback() {
        let loaded = select(ColorCapability::Ansi256, Some("nord"), None, None);
        assert_eq!(loaded.definition.id, "ansi256");
    }

    #[test]
    fn parses_color_modes() {
        assert_eq!(parse_color_mode("24BIT"), Some(ColorCapability::Truecolor));
        assert_eq!(parse_color_mode("8bit"), Some(ColorCapability::Ansi256));
        assert_eq!(parse_color_mode("mono"), None);
    }
}
