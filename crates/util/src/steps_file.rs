//! Loading step lists from JSON or YAML files.
//!
//! A steps file lists the labels a host should display and, optionally, the
//! label selected when the host starts:
//!
//! ```yaml
//! current: Email
//! steps:
//!   - label: Role
//!   - label: Email
//!   - label: Settings
//! ```
//!
//! The format is chosen by extension (`.json`, `.yaml`, `.yml`).

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use stepline_types::Step;
use thiserror::Error;
use tracing::debug;

/// Errors raised while reading a steps file.
#[derive(Debug, Error)]
pub enum StepsFileError {
    #[error("failed to read steps file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON in steps file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid YAML in steps file: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("unsupported steps file extension for {0} (expected .json, .yaml or .yml)")]
    UnsupportedFormat(PathBuf),
    #[error("step {position} has an empty label")]
    EmptyLabel { position: usize },
}

/// Parsed contents of a steps file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StepsFile {
    /// Steps in display order. Any `index` present in the file is ignored by
    /// the stepper, which assigns positions itself.
    #[serde(default)]
    pub steps: Vec<Step>,
    /// Label of the step selected at startup. A label matching no step is
    /// kept; the stepper then starts on its first step.
    #[serde(default)]
    pub current: Option<String>,
}

impl StepsFile {
    /// Label the host should select first: the explicit `current`, else the
    /// first step's label. `None` only for an empty list.
    pub fn initial_label(&self) -> Option<&str> {
        self.current.as_deref().or_else(|| self.steps.first().map(|step| step.label.as_str()))
    }

    fn validate(self) -> Result<Self, StepsFileError> {
        if let Some(position) = self.steps.iter().position(|step| step.label.trim().is_empty()) {
            return Err(StepsFileError::EmptyLabel { position });
        }
        Ok(self)
    }
}

/// Reads and validates a steps file.
pub fn load_steps_file(path: impl AsRef<Path>) -> Result<StepsFile, StepsFileError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| StepsFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    let parsed: StepsFile = match extension.as_str() {
        "json" => serde_json::from_str(&contents)?,
        "yaml" | "yml" => serde_yaml::from_str(&contents)?,
        _ => return Err(StepsFileError::UnsupportedFormat(path.to_path_buf())),
    };
    debug!(path = %path.display(), steps = parsed.steps.len(), "Loaded steps file");
    parsed.validate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn loads_yaml_with_current_label() {
        let dir = tempdir().unwrap();
        let path = write(
            dir.path(),
            "steps.yaml",
            "current: Email\nsteps:\n  - label: Role\n  - label: Email\n  - label: Settings\n",
        );

        let file = load_steps_file(&path).unwrap();
        assert_eq!(file.steps.len(), 3);
        assert_eq!(file.steps[1], Step::new("Email"));
        assert_eq!(file.initial_label(), Some("Email"));
    }

    #[test]
    fn json_without_current_defaults_to_first_label() {
        let dir = tempdir().unwrap();
        let path = write(dir.path(), "steps.json", r#"{"steps":[{"label":"Plan"},{"label":"Ship"}]}"#);

        let file = load_steps_file(&path).unwrap();
        assert_eq!(file.initial_label(), Some("Plan"));
    }

    #[test]
    fn empty_list_has_no_initial_label() {
        let dir = tempdir().unwrap();
        let path = write(dir.path(), "steps.yml", "steps: []\n");

        let file = load_steps_file(&path).unwrap();
        assert!(file.steps.is_empty());
        assert_eq!(file.initial_label(), None);
    }

    #[test]
    fn rejects_blank_labels() {
        let dir = tempdir().unwrap();
        let blank = write(dir.path(), "blank.yaml", "steps:\n  - label: Role\n  - label: '  '\n");
        assert!(matches!(load_steps_file(&blank), Err(StepsFileError::EmptyLabel { position: 1 })));
    }

    #[test]
    fn unmatched_current_label_still_loads() {
        let dir = tempdir().unwrap();
        let unknown = write(dir.path(), "unknown.yaml", "current: Billing\nsteps:\n  - label: Role\n");

        let file = load_steps_file(&unknown).unwrap();
        assert_eq!(file.steps, vec![Step::new("Role")]);
        assert_eq!(file.initial_label(), Some("Billing"));
    }

    #[test]
    fn rejects_unknown_extension_and_missing_file() {
        let dir = tempdir().unwrap();
        let toml = write(dir.path(), "steps.toml", "steps = []");
        assert!(matches!(load_steps_file(&toml), Err(StepsFileError::UnsupportedFormat(_))));
        assert!(matches!(
            load_steps_file(dir.path().join("missing.yaml")),
            Err(StepsFileError::Io { .. })
        ));
    }
}
