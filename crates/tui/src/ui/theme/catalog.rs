use super::{Ansi256Theme, DraculaTheme, NordTheme, Theme};

/// Describes a selectable theme.
#[derive(Clone, Copy, Debug)]
pub struct ThemeDefinition {
    /// Canonical identifier used for persistence.
    pub id: &'static str,
    /// Theme aliases (e.g., env overrides) that map back to this definition.
    pub aliases: &'static [&'static str],
    /// Whether the palette targets ANSI/8-bit terminals.
    pub is_ansi_fallback: bool,
    factory: fn() -> Box<dyn Theme>,
}

impl ThemeDefinition {
    /// Instantiate the theme represented by this definition.
    pub fn build(&self) -> Box<dyn Theme> {
        (self.factory)()
    }
}

/// Ordered list of known themes.
pub const THEME_DEFINITIONS: &[ThemeDefinition] = &[
    ThemeDefinition {
        id: "dracula",
        aliases: &["dracula", "default"],
        is_ansi_fallback: false,
        factory: || Box::new(DraculaTheme::new()),
    },
    ThemeDefinition {
        id: "nord",
        aliases: &["nord"],
        is_ansi_fallback: false,
        factory: || Box::new(NordTheme::new()),
    },
    ThemeDefinition {
        id: "ansi256",
        aliases: &["ansi256", "ansi", "256"],
        is_ansi_fallback: true,
        factory: || Box::new(Ansi256Theme::new()),
    },
];

/// Locate a definition by id or alias (case-insensitive).
pub fn resolve(name: &str) -> Option<&'static ThemeDefinition> {
    let normalized = name.trim().to_ascii_lowercase();
    THEME_DEFINITIONS
        .iter()
        .find(|definition| definition.id == normalized || definition.aliases.iter().any(|alias| *alias == normalized))
}

/// Preferred default for truecolor terminals.
pub fn default_truecolor() -> &'static ThemeDefinition {
    &THEME_DEFINITIONS[0]
}

/// Preferred default for ANSI-only terminals.
pub fn default_ansi() -> &'static ThemeDefinition {
    &THEME_DEFINITIONS[2]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_ids_and_aliases_case_insensitively() {
        assert_eq!(resolve("NORD").map(|d| d.id), Some("nord"));
        assert_eq!(resolve(" default ").map(|d| d.id), Some("dracula"));
        assert_eq!(resolve("256").map(|d| d.id), Some("ansi256"));
        assert!(resolve("solarized").is_none());
    }

    #[test]
    fn defaults_match_capabilities() {
        assert!(!default_truecolor().is_ansi_fallback);
        assert!(default_ansi().is_ansi_fallback);
        assert_eq!(default_truecolor().id, "dracula");
    }
}
