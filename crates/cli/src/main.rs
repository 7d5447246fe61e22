use std::{
    env,
    fs::{self, OpenOptions},
    path::{Path, PathBuf},
    sync::Mutex,
    time::Duration,
};

use anyhow::{Context, Result};
use clap::Parser;
use stepline_tui::HostConfig;
use stepline_types::Direction;
use stepline_util::{UserPreferences, app_data_dir, expand_tilde, load_steps_file};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable overriding the log file location.
const LOG_PATH_ENV: &str = "STEPLINE_LOG_PATH";
const LOG_FILE_NAME: &str = "stepline.log";

/// Interactive multi-step navigation demo for the terminal.
#[derive(Parser, Debug)]
#[command(name = "stepline", version, about)]
struct Args {
    /// JSON or YAML file listing the steps and the initially selected one
    #[arg(long, value_name = "FILE")]
    steps: Option<PathBuf>,

    /// Theme to use (dracula, nord, ansi256); TUI_THEME takes precedence
    #[arg(long, value_name = "NAME")]
    theme: Option<String>,

    /// Duration of a step transition in milliseconds
    #[arg(long, value_name = "MS")]
    animation_ms: Option<u64>,

    /// Direction applied to every stepper (horizontal or vertical)
    #[arg(long, value_name = "DIR")]
    direction: Option<Direction>,

    /// Log file path; defaults to STEPLINE_LOG_PATH or the data directory
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Persist --theme and --animation-ms as preferences
    #[arg(long)]
    remember: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_file.as_deref());

    let preferences = UserPreferences::new().unwrap_or_else(|error| {
        warn!("Preferences unavailable, using defaults: {}", error);
        UserPreferences::ephemeral()
    });
    if args.remember {
        remember(&preferences, &args);
    }

    let config = host_config(&args, &preferences)?;
    let preferred_theme = preferences.preferred_theme();
    let theme = stepline_tui::load_theme(args.theme.as_deref(), preferred_theme.as_deref());
    info!(theme = theme.definition.id, "Launching stepline");

    stepline_tui::run(config, theme).await
}

fn host_config(args: &Args, preferences: &UserPreferences) -> Result<HostConfig> {
    let mut config = HostConfig::default();
    if let Some(path) = args.steps.as_deref() {
        let file = load_steps_file(path).with_context(|| format!("failed to load steps from {}", path.display()))?;
        let initial = file.initial_label().map(str::to_string);
        config = config.with_steps(file.steps, initial);
    }
    if let Some(direction) = args.direction {
        config = config.with_direction(direction);
    }
    if let Some(animation_ms) = args.animation_ms.or_else(|| preferences.animation_ms()) {
        config = config.with_animation(Duration::from_millis(animation_ms));
    }
    Ok(config)
}

fn remember(preferences: &UserPreferences, args: &Args) {
    if let Some(theme) = args.theme.as_ref()
        && let Err(error) = preferences.set_preferred_theme(Some(theme.clone()))
    {
        warn!("Failed to persist theme preference: {}", error);
    }
    if let Some(animation_ms) = args.animation_ms
        && let Err(error) = preferences.set_animation_ms(Some(animation_ms))
    {
        warn!("Failed to persist animation preference: {}", error);
    }
}

/// Installs a file-backed subscriber. The TUI owns the terminal, so nothing is
/// written to stdout or stderr.
fn init_tracing(log_file: Option<&Path>) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let path = log_file_path(log_file);

    match open_log_file(&path) {
        Ok(file) => {
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
                .with(filter)
                .try_init();
            info!(path = %path.display(), "Logging initialized");
        }
        Err(_) => {
            let _ = tracing_subscriber::registry().with(filter).try_init();
        }
    }
}

fn log_file_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    match env::var(LOG_PATH_ENV) {
        Ok(value) if !value.trim().is_empty() => expand_tilde(&value),
        _ => app_data_dir().join(LOG_FILE_NAME),
    }
}

fn open_log_file(path: &Path) -> std::io::Result<fs::File> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_option() {
        let args = Args::try_parse_from([
            "stepline",
            "--steps",
            "steps.yaml",
            "--theme",
            "nord",
            "--animation-ms",
            "120",
            "--direction",
            "v",
            "--log-file",
            "/tmp/stepline.log",
            "--remember",
        ])
        .unwrap();
        assert_eq!(args.steps, Some(PathBuf::from("steps.yaml")));
        assert_eq!(args.theme.as_deref(), Some("nord"));
        assert_eq!(args.animation_ms, Some(120));
        assert_eq!(args.direction, Some(Direction::Vertical));
        assert!(args.remember);
    }

    #[test]
    fn rejects_unknown_direction() {
        assert!(Args::try_parse_from(["stepline", "--direction", "diagonal"]).is_err());
    }

    #[test]
    fn explicit_log_file_wins() {
        let path = log_file_path(Some(Path::new("/tmp/explicit.log")));
        assert_eq!(path, PathBuf::from("/tmp/explicit.log"));
    }

    #[test]
    fn command_line_overrides_preferences() {
        let preferences = UserPreferences::ephemeral();
        preferences.set_animation_ms(Some(900)).unwrap();

        let args = Args::try_parse_from(["stepline", "--direction", "vertical"]).unwrap();
        let config = host_config(&args, &preferences).unwrap();
        assert_eq!(config.animation, Duration::from_millis(900));
        assert_eq!(config.directions, [Direction::Vertical; 3]);

        let args = Args::try_parse_from(["stepline", "--animation-ms", "50"]).unwrap();
        assert_eq!(host_config(&args, &preferences).unwrap().animation, Duration::from_millis(50));
    }
}
