//! The general configuration settings for dirview.
//!
//! This module defines the [General] struct for deserializing the `[general]` section of the
//! dirview.toml configuration file.

use crate::app::DEFAULT_MARGIN;

use serde::Deserialize;

/// Lower bound for the header margin, the path header needs one row.
pub const MIN_MARGIN: usize = 1;
/// Upper bound for the header margin, anything above leaves no room for rows.
pub const MAX_MARGIN: usize = 16;

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct General {
    margin: usize,
}

impl Default for General {
    fn default() -> Self {
        General {
            margin: DEFAULT_MARGIN,
        }
    }
}

impl General {
    /// Rows reserved above the entry list, clamped to [MIN_MARGIN]..=[MAX_MARGIN].
    #[inline]
    pub fn margin(&self) -> usize {
        self.margin.clamp(MIN_MARGIN, MAX_MARGIN)
    }
}
