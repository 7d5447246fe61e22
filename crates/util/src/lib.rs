//! Configuration loading and small helpers shared by the stepline crates.

pub mod path_processing;
pub mod preferences;
pub mod steps_file;

pub use path_processing::{APP_DIR_NAME, app_config_dir, app_data_dir, expand_tilde};
pub use preferences::{PreferencesError, PreferencesPayload, UserPreferences};
pub use steps_file::{StepsFile, StepsFileError, load_steps_file};
