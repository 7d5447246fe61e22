//! # Stepline TUI Library
//!
//! A terminal rendition of a multi-step navigation widget. The host view
//! embeds three stepper instances (horizontal, vertical, horizontal), each
//! bound to a current step held by the host. Selecting a step reports the
//! change to the host, which stores it and binds it back without the stepper
//! emitting again.
//!
//! ## Architecture
//!
//! - `app`: application state (theme, host state, stepper states, focus)
//! - `host`: the host page's configuration and per-instance current steps
//! - `ui::components::stepper`: the stepper state machine and its renderer
//! - `ui::runtime`: terminal lifecycle and the async event loop

mod app;
mod host;
mod ui;

use anyhow::{Context, Result};

pub use host::{DEMO_INITIAL_LABEL, DEMO_LABELS, HostConfig, HostState};
pub use ui::components::stepper::{CURRENT_STEP_REQUIRED, DEFAULT_TRANSITION, StepperError, StepperState};
pub use ui::theme::{LoadedTheme, THEME_ENV, load as load_theme};

/// Runs the stepper TUI until the user quits.
///
/// # Errors
///
/// Fails when a stepper rejects its configuration (no current step), or on
/// terminal setup and I/O errors.
pub async fn run(config: HostConfig, theme: LoadedTheme) -> Result<()> {
    let app = app::App::new(config, theme).context("invalid stepper configuration")?;
    ui::runtime::run_app(app).await
}
