//! Theme configuration options for dirview
//!
//! This module defines the `[theme]` section read from the dirview.toml configuration file
//! and turns it into the [PermStyles] table the renderer is built with.

use crate::ui::perms::PermStyles;
use crate::utils::parse_color;

use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

/// Theme configuration options
/// Holds one color per permission class plus the selection background.
/// # Examples
/// ```toml
/// [theme]
/// directory = "#5f87ff"
/// write = "red"
/// selection = "238"
/// ```
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Theme {
    #[serde(deserialize_with = "deserialize_color_field")]
    directory: Color,
    #[serde(deserialize_with = "deserialize_color_field")]
    file: Color,
    #[serde(deserialize_with = "deserialize_color_field")]
    symlink: Color,
    #[serde(deserialize_with = "deserialize_color_field")]
    read: Color,
    #[serde(deserialize_with = "deserialize_color_field")]
    write: Color,
    #[serde(deserialize_with = "deserialize_color_field")]
    exec: Color,
    #[serde(deserialize_with = "deserialize_color_field")]
    none: Color,
    #[serde(deserialize_with = "deserialize_color_field")]
    special: Color,
    #[serde(deserialize_with = "deserialize_color_field")]
    selection: Color,
    #[serde(deserialize_with = "deserialize_color_field")]
    path: Color,
    bold_directory: bool,
    bold_symlink: bool,
    bold_special: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            directory: Color::Indexed(69),
            file: Color::Indexed(252),
            symlink: Color::Indexed(81),
            read: Color::Indexed(214),
            write: Color::Indexed(196),
            exec: Color::Indexed(76),
            none: Color::Indexed(240),
            special: Color::Indexed(197),
            selection: Color::Indexed(238),
            path: Color::Reset,
            bold_directory: true,
            bold_symlink: true,
            bold_special: true,
        }
    }
}

impl Theme {
    /// Background applied to the whole selected row.
    pub fn selection(&self) -> Color {
        self.selection
    }

    pub fn path_style(&self) -> Style {
        Style::default().fg(self.path)
    }

    /// Builds the style table the renderer works with.
    pub fn perm_styles(&self) -> PermStyles {
        let fg = |color: Color, bold: bool| {
            let style = Style::default().fg(color);
            if bold {
                style.add_modifier(Modifier::BOLD)
            } else {
                style
            }
        };

        PermStyles {
            dir: fg(self.directory, self.bold_directory),
            file: fg(self.file, false),
            symlink: fg(self.symlink, self.bold_symlink),
            read: fg(self.read, false),
            write: fg(self.write, false),
            exec: fg(self.exec, false),
            none: fg(self.none, false),
            special: fg(self.special, self.bold_special),
        }
    }
}

/// Helper function to deserialize a color field from a string
fn deserialize_color_field<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(parse_color(&s))
}
