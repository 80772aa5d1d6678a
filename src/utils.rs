//! Miscellaneous utility functions for dirview.
//!
//! - [helpers]: color parsing, home directory handling, start directory resolution and
//!   header fitting.
//! - [cli]: command-line argument handling.
//! - [log]: tracing subscriber setup.

pub mod cli;
pub mod helpers;
pub mod log;

pub use helpers::{
    expand_home_path, fit_to_width_left, get_home, is_browsable_dir, parse_color,
    resolve_initial_dir, shorten_home_path,
};
