//! Runtime: unified event loop and input routing for the TUI.
//!
//! Responsibilities
//! - Own the terminal lifecycle (enter/leave alternate screen, raw mode, mouse
//!   capture).
//! - Drive a single event loop that handles input and animation frames.
//! - Route input to `MainView` and execute the returned `Effect`s.
//!
//! Event Loop Strategy
//! - A dedicated blocking task reads `crossterm` events and forwards them over
//!   a channel.
//! - Smart ticking: a frame interval (16 ms) only while a stepper animates; a
//!   long interval (1 s) when idle. `App::update(Msg::Tick)` reports whether a
//!   redraw is needed.
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, prelude::*};
use stepline_types::{Effect, Msg};
use tokio::{
    signal,
    sync::mpsc,
    time::{self, MissedTickBehavior},
};
use tracing::{debug, info, warn};

use crate::app::App;
use crate::ui::components::Component;
use crate::ui::main_component::MainView;

const FRAME_INTERVAL: Duration = Duration::from_millis(16);
const IDLE_INTERVAL: Duration = Duration::from_millis(1000);

/// Spawn a dedicated blocking reader that forwards `crossterm` events over a
/// Tokio channel. The reader stops once the receiver is dropped.
fn spawn_input_thread() -> mpsc::Receiver<Event> {
    let (sender, receiver) = mpsc::channel(500);
    tokio::task::spawn_blocking(move || {
        while !sender.is_closed() {
            match event::poll(FRAME_INTERVAL) {
                Ok(false) => continue,
                Ok(true) => {}
                Err(error) => {
                    warn!("Failed to poll terminal events: {}", error);
                    break;
                }
            }
            match event::read() {
                Ok(event) => {
                    if sender.blocking_send(event).is_err() {
                        break;
                    }
                }
                Err(error) => {
                    warn!("Failed to read event: {}", error);
                    break;
                }
            }
        }
    });
    receiver
}

/// Put the terminal into raw mode and enter the alternate screen.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture).context("failed to enter the alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal settings and leave the alternate screen.
fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}

fn render(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>, app: &mut App, main_view: &mut MainView) -> Result<()> {
    terminal.draw(|frame| {
        let area = frame.area();
        main_view.render(frame, area, app);
    })?;
    Ok(())
}

fn handle_input_event(app: &mut App, main_view: &mut MainView, input_event: Event) -> Vec<Effect> {
    match input_event {
        Event::Key(key_event) => main_view.handle_key_events(app, key_event),
        Event::Mouse(mouse_event) => main_view.handle_mouse_events(app, mouse_event),
        Event::Resize(width, height) => main_view.handle_message(app, Msg::Resize(width, height)),
        Event::FocusGained | Event::FocusLost | Event::Paste(_) => Vec::new(),
    }
}

/// Outcome of executing a batch of effects.
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

fn process_effects(app: &mut App, effects: Vec<Effect>) -> Result<Flow> {
    for effect in effects {
        match effect {
            Effect::StepChanged { slot, step } => {
                app.apply_step_change(slot, step)
                    .with_context(|| format!("failed to bind the host step into the {slot}"))?;
            }
            Effect::Quit => return Ok(Flow::Exit),
        }
    }
    Ok(Flow::Continue)
}

/// Entry point for the TUI runtime: sets up the terminal, runs the event
/// loop, and restores the terminal on every exit path.
pub async fn run_app(mut app: App) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = event_loop(&mut terminal, &mut app).await;
    if let Err(error) = cleanup_terminal(&mut terminal) {
        warn!("Failed to restore the terminal: {}", error);
    }
    result
}

async fn event_loop(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>, app: &mut App) -> Result<()> {
    let mut input_receiver = spawn_input_thread();
    let mut main_view = MainView::new();

    let mut current_interval = IDLE_INTERVAL;
    let mut ticker = time::interval(current_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    render(terminal, app, &mut main_view)?;
    info!("Stepper TUI started");

    loop {
        let target_interval = if app.is_animating() { FRAME_INTERVAL } else { IDLE_INTERVAL };
        if target_interval != current_interval {
            current_interval = target_interval;
            ticker = time::interval(current_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        }

        let needs_render = tokio::select! {
            maybe_event = input_receiver.recv() => {
                let Some(event) = maybe_event else {
                    debug!("Input channel closed");
                    break;
                };
                let effects = handle_input_event(app, &mut main_view, event);
                if process_effects(app, effects)? == Flow::Exit {
                    break;
                }
                true
            }
            _ = ticker.tick() => app.update(&Msg::Tick),
            _ = signal::ctrl_c() => break,
        };

        if needs_render {
            render(terminal, app, &mut main_view)?;
        }
    }

    info!("Stepper TUI stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use ratatui::backend::TestBackend;
    use stepline_types::{Step, StepperSlot};

    use super::*;
    use crate::{
        host::HostConfig,
        ui::theme::{LoadedTheme, catalog},
    };

    fn app() -> App {
        App::new(HostConfig::default(), LoadedTheme::from_definition(catalog::default_truecolor())).unwrap()
    }

    #[test]
    fn step_changes_are_applied_until_quit() {
        let mut app = app();
        let effects = vec![
            Effect::StepChanged {
                slot: StepperSlot::Third,
                step: Step::with_index("Settings", 5),
            },
            Effect::Quit,
            Effect::StepChanged {
                slot: StepperSlot::First,
                step: Step::new("Role"),
            },
        ];

        assert_eq!(process_effects(&mut app, effects).unwrap(), Flow::Exit);
        assert_eq!(app.stepper(StepperSlot::Third).current_index(), Some(5));
        assert_eq!(app.stepper(StepperSlot::First).current_index(), Some(1));
    }

    #[test]
    fn external_binds_produce_no_step_changes() {
        let mut app = app();
        let mut view = MainView::new();
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();

        for step in [Step::new("Settings"), Step::new("Settings"), Step::with_index("Email", 4)] {
            app.stepper_mut(StepperSlot::First).bind_current_step(Some(&step)).unwrap();
        }
        let mut effects = Vec::new();
        for _ in 0..3 {
            terminal
                .draw(|frame| {
                    let area = frame.area();
                    view.render(frame, area, &mut app);
                })
                .unwrap();
            effects.extend(view.handle_message(&mut app, Msg::Tick));
        }

        assert!(!effects.iter().any(|effect| matches!(effect, Effect::StepChanged { .. })));
        assert_eq!(process_effects(&mut app, effects).unwrap(), Flow::Continue);
        assert_eq!(app.stepper(StepperSlot::First).current_index(), Some(4));
        assert_eq!(app.host.current_step(StepperSlot::First), Some(&Step::new("Email")));
    }
}
