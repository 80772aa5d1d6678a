//! Terminal rendering and event loop for dirview.
//!
//! Handles setup/teardown of raw mode, alternate screen, redraws,
//! and events (keypress, resize) to app logic.

use crate::app::{AppState, KeypressResult};
use crate::core::Workers;
use crate::ui;
use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use std::{io, time::Duration};

/// Initializes the terminal in raw mode and alternate screen and runs the main event loop.
///
/// Blocks until quit. Handles all input and UI rendering.
/// Returns an std::io::Error if terminal setup or teardown fails.
pub(crate) fn run_terminal(app: &mut AppState, workers: &Workers) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, Hide)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = event_loop(&mut terminal, app, workers);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, Show)?;
    result
}

/// Main event loop of dirview: draws UI, polls for events and dispatches them to the app.
/// Returns on quit
fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    workers: &Workers,
) -> io::Result<()>
where
    io::Error: From<<B as Backend>::Error>,
{
    let (width, height) = crossterm::terminal::size()?;
    app.handle_resize(width, height, workers);
    terminal.draw(|f| ui::render(f, app))?;

    loop {
        if app.tick(workers) {
            terminal.draw(|f| ui::render(f, app))?;
        }

        // Event Polling
        if event::poll(Duration::from_millis(16))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    match app.handle_keypress(key, workers) {
                        KeypressResult::Quit => break,
                        KeypressResult::Consumed => {
                            terminal.draw(|f| ui::render(f, app))?;
                        }
                        KeypressResult::Continue => {}
                    }
                }

                Event::Resize(width, height) => {
                    app.handle_resize(width, height, workers);
                    terminal.draw(|f| ui::render(f, app))?;
                }

                _ => {}
            }
        }
    }
    Ok(())
}
