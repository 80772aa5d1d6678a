//! Application state and main controller module for dirview.
//!
//! [AppState] ties one browser's [NavState] to the outside world:
//! - key events are looked up in the [Keymap] and fed to the navigator as actions
//! - terminal sizes are fed in as resize events
//! - directory listings for its identity are drained from its own [Workers] subscription
//! - load requests the navigator hands back are submitted to the workers
//!
//! This is the context object passed to the terminal loop and the UI.

use crate::app::keymap::{Action, Keymap, SystemAction};
use crate::app::nav::{NavEvent, NavState};
use crate::config::Config;
use crate::core::{WorkerResponse, Workers};
use crate::ui::perms::Renderer;

use crossbeam_channel::Receiver;
use crossterm::event::KeyEvent;

use std::path::Path;

/// Result of a processed keypress, tells the terminal loop what to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeypressResult {
    /// Key had no binding.
    Continue,
    /// Key was handled by the navigator, redraw.
    Consumed,
    Quit,
}

/// Main struct which holds the state of one running browser.
pub struct AppState<'a> {
    config: &'a Config,
    keymap: Keymap,
    renderer: Renderer,
    nav: NavState,
    responses: Receiver<WorkerResponse>,
}

impl<'a> AppState<'a> {
    /// Creates a browser at `path` and subscribes it to the workers under `identity`.
    /// Nothing is loaded until [AppState::start].
    pub fn new(config: &'a Config, identity: u64, path: &Path, workers: &Workers) -> Self {
        Self {
            config,
            keymap: Keymap::from_config(config),
            renderer: Renderer::from_config(config),
            nav: NavState::new(identity, path, config.general().margin()),
            responses: workers.subscribe(identity),
        }
    }

    // Getters

    #[inline]
    pub fn config(&self) -> &Config {
        self.config
    }

    #[inline]
    pub fn nav(&self) -> &NavState {
        &self.nav
    }

    #[inline]
    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Issues the read of the starting directory.
    pub fn start(&mut self, workers: &Workers) {
        workers.submit(self.nav.init());
    }

    pub fn handle_keypress(&mut self, key: KeyEvent, workers: &Workers) -> KeypressResult {
        match self.keymap.lookup(key) {
            Some(Action::System(SystemAction::Quit)) => KeypressResult::Quit,
            Some(Action::Nav(action)) => {
                self.dispatch(NavEvent::Action(action), workers);
                KeypressResult::Consumed
            }
            None => KeypressResult::Continue,
        }
    }

    pub fn handle_resize(&mut self, width: u16, height: u16, workers: &Workers) {
        self.dispatch(
            NavEvent::Resize {
                width: width as usize,
                height: height as usize,
            },
            workers,
        );
    }

    /// Drains finished directory reads for this browser.
    ///
    /// Returns `true` if anything arrived and the screen needs a redraw. Superseded requests
    /// are dropped by the navigator.
    pub fn tick(&mut self, workers: &Workers) -> bool {
        let mut changed = false;
        while let Ok(response) = self.responses.try_recv() {
            self.dispatch(NavEvent::from(response), workers);
            changed = true;
        }
        changed
    }

    fn dispatch(&mut self, event: NavEvent, workers: &Workers) {
        if let Some(load) = self.nav.update(event) {
            workers.submit(load);
        }
    }
}
