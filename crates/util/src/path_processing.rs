use std::path::PathBuf;

use dirs_next::{config_dir, data_local_dir, home_dir};

/// Name of the per-application directory created under the platform
/// config and data directories.
pub const APP_DIR_NAME: &str = "stepline";

/// Expands a leading `~` into the current user's home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    let p = path.trim();
    if p == "~" {
        return home_dir().unwrap_or_else(|| PathBuf::from("~"));
    }
    if let Some(rest) = p.strip_prefix("~/").or_else(|| p.strip_prefix("~\\")) {
        return home_dir().unwrap_or_else(|| PathBuf::from("~")).join(rest);
    }
    PathBuf::from(p)
}

/// `~/.config/stepline` on most platforms; falls back to `./stepline`.
pub fn app_config_dir() -> PathBuf {
    config_dir().unwrap_or_else(|| PathBuf::from(".")).join(APP_DIR_NAME)
}

/// `~/.local/share/stepline` on most platforms; falls back to `./stepline`.
pub fn app_data_dir() -> PathBuf {
    data_local_dir().unwrap_or_else(|| PathBuf::from(".")).join(APP_DIR_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_home_prefixes_only() {
        let home = home_dir().unwrap_or_else(|| PathBuf::from("~"));
        assert_eq!(expand_tilde("~"), home);
        assert_eq!(expand_tilde(" ~/logs/app.log "), home.join("logs/app.log"));
        assert_eq!(expand_tilde("/tmp/~/x"), PathBuf::from("/tmp/~/x"));
        assert_eq!(expand_tilde("relative/path"), PathBuf::from("relative/path"));
    }

    #[test]
    fn app_directories_end_with_app_name() {
        assert!(app_config_dir().ends_with(APP_DIR_NAME));
        assert!(app_data_dir().ends_with(APP_DIR_NAME));
    }
}
