//! Configuration for dirview.
//!
//! Everything is read once at startup from `dirview.toml` and passed down as an immutable
//! [Config]:
//! - [general]: layout settings such as the header margin.
//! - [theme]: permission and selection colors.
//! - [input]: key bindings.
//! - [load]: file discovery, parsing and default generation.

pub mod general;
pub mod input;
pub mod load;
pub mod theme;

pub use general::General;
pub use input::Keys;
pub use load::{Config, RawConfig};
pub use theme::Theme;
