use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single labeled entry in a stepper's sequence.
///
/// `index` is assigned by the stepper once it receives its step list and is
/// what disambiguates steps sharing a label. Hosts usually construct steps by
/// label only and get the indexed copy back through change events.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Step {
    /// Text rendered for the step (e.g., "Email").
    pub label: String,
    /// Position in the owning step list, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
}

impl Step {
    /// Creates a step identified by label only.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            index: None,
        }
    }

    /// Creates a step with an explicit list position.
    pub fn with_index(label: impl Into<String>, index: usize) -> Self {
        Self {
            label: label.into(),
            index: Some(index),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(index) => write!(f, "{}#{}", self.label, index),
            None => f.write_str(&self.label),
        }
    }
}

/// Layout and animation axis of a stepper.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Horizontal,
    Vertical,
}

impl Direction {
    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::Vertical)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Horizontal => f.write_str("horizontal"),
            Direction::Vertical => f.write_str("vertical"),
        }
    }
}

/// Error returned when a direction name cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown direction '{0}' (expected 'horizontal' or 'vertical')")]
pub struct ParseDirectionError(pub String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "horizontal" | "h" => Ok(Direction::Horizontal),
            "vertical" | "v" => Ok(Direction::Vertical),
            other => Err(ParseDirectionError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_without_index_omits_the_field() {
        let json = serde_json::to_string(&Step::new("Email")).expect("serialize step");
        assert_eq!(json, r#"{"label":"Email"}"#);

        let parsed: Step = serde_json::from_str(r#"{"label":"Role","index":3}"#).expect("deserialize step");
        assert_eq!(parsed, Step::with_index("Role", 3));
    }

    #[test]
    fn direction_parses_short_and_long_names() {
        assert_eq!("horizontal".parse::<Direction>(), Ok(Direction::Horizontal));
        assert_eq!(" V ".parse::<Direction>(), Ok(Direction::Vertical));
        assert!("diagonal".parse::<Direction>().is_err());
        assert_eq!(Direction::default(), Direction::Horizontal);
    }

    #[test]
    fn direction_deserializes_lowercase() {
        let direction: Direction = serde_yaml::from_str("vertical").expect("deserialize direction");
        assert!(direction.is_vertical());
    }
}
