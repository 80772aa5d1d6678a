//! Core runtime logic for dirview.
//!
//! This module contains the non-UI “engine” pieces used by the application:
//! - [fm]: directory reading and the [Entry] type (see [browse_dir]).
//! - [formatter]: POSIX mode strings from file metadata.
//! - [worker]: the background directory loader and its message types.
//! - [terminal]: terminal setup/teardown and the main crossterm/ratatui event loop.

pub mod fm;
pub mod formatter;
pub mod terminal;
pub mod worker;

pub use fm::{Entry, EntryKind, browse_dir};
pub use formatter::{UNKNOWN_MODE, format_mode, format_mode_bits};
pub use worker::{PendingLoad, WorkerResponse, WorkerTask, Workers};
