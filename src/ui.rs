//! Terminal UI for dirview.
//!
//! - [perms]: the entry row renderer (permission coloring, selection highlight).
//! - [render]: frame composition, path header above the rows.

pub mod perms;
pub mod render;

pub(crate) use render::render;
