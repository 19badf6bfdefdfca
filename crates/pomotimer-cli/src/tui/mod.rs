//! Terminal User Interface (TUI) for pomotimer.
//!
//! Shows the countdown, session label, completed-work count, the four
//! controls and the settings form. Built with ratatui and crossterm.

mod app;
mod event;
mod ui;

use app::App;

use std::io;
use std::time::Duration;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use pomotimer_core::error::Result;
use pomotimer_core::{Chime, TimerEngine};
use ratatui::prelude::*;
use tokio::runtime::Handle;

/// Run the interactive timer until the user quits.
///
/// `poll` bounds how long the loop waits for a key before checking for ticks
/// and redrawing.
///
/// # Errors
///
/// Returns an error if the terminal cannot be set up or drawn to.
pub fn run(handle: &Handle, engine: TimerEngine, chime: Box<dyn Chime>, poll: Duration) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        disable_raw_mode().ok();
        return Err(e.into());
    }

    let backend = CrosstermBackend::new(stdout);
    let result = Terminal::new(backend).and_then(|mut terminal| {
        let mut app = App::new(engine, chime, handle.clone());
        let result = run_app(&mut terminal, &mut app, poll);
        terminal.show_cursor().ok();
        result
    });

    // Restore terminal
    disable_raw_mode().ok();
    execute!(io::stdout(), LeaveAlternateScreen).ok();

    tracing::info!("interactive timer closed");
    result.map_err(Into::into)
}

/// Run the main application loop.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App, poll: Duration) -> io::Result<()> {
    loop {
        app.drain_ticks();

        terminal.draw(|frame| ui::render(frame, app))?;

        if let Some(action) = event::poll_action(poll, app.is_editing())? {
            app.dispatch(action);
        }
        if app.should_quit {
            break;
        }
    }

    tracing::debug!(state = ?app.engine.snapshot(), "final state");

    Ok(())
}
