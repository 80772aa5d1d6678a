//! main.rs
//! Entry point for dirview

pub(crate) mod app;
pub(crate) mod config;
pub(crate) mod core;
pub(crate) mod ui;
pub(crate) mod utils;

use crate::app::AppState;
use crate::config::Config;
use crate::core::{Workers, terminal};
use crate::utils::cli::{CliAction, handle_args};
use crate::utils::log::init_logging;
use crate::utils::{is_browsable_dir, resolve_initial_dir};

/// Identity of the single browser the binary runs.
const BROWSER_ID: u64 = 1;

fn main() -> std::io::Result<()> {
    std::panic::set_hook(Box::new(|info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let mut stdout = std::io::stdout();
        let _ = crossterm::execute!(
            stdout,
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::cursor::Show
        );

        eprintln!("\n[dirview] Error occurred: {}", info);

        #[cfg(debug_assertions)]
        {
            let bt = std::backtrace::Backtrace::force_capture();
            eprintln!("\nStack Backtrace:\n{}", bt);
        }
    }));

    let path_arg = match handle_args() {
        CliAction::Exit => return Ok(()),
        CliAction::RunApp => ".".to_string(),
        CliAction::RunAppAtPath(path) => path,
    };

    init_logging();
    let config = Config::load();

    let start_dir = resolve_initial_dir(&path_arg);
    if !is_browsable_dir(&start_dir) {
        eprintln!("\n[dirview] Error: Path '{}' cannot be opened.", path_arg);
        std::process::exit(1);
    }

    let workers = Workers::spawn();
    let mut app = AppState::new(&config, BROWSER_ID, &start_dir, &workers);
    app.start(&workers);
    terminal::run_terminal(&mut app, &workers)
}
