//! Application layer of dirview.
//!
//! - [nav]: the navigation state machine (selection, scroll window, load requests).
//! - [viewport]: the scroll window and its re-centering rule.
//! - [keymap]: physical keys to logical actions.
//! - [state]: [AppState], glue between the navigator, the workers and the terminal loop.

pub mod keymap;
pub mod nav;
pub mod state;
pub mod viewport;

pub use keymap::{Action, Keymap, NavAction, SystemAction};
pub use nav::{DEFAULT_MARGIN, NavEvent, NavState, parent_of};
pub use state::{AppState, KeypressResult};
pub use viewport::Viewport;
