//! Helpers for dirview.
//!
//! Small utilities used throughout dirview:
//! - Color parsing from names, hex codes or palette indices
//! - Home directory lookup, `~` expansion and shortening
//! - Resolving and validating the starting directory
//! - Fitting the path header into the terminal width

use ratatui::style::Color;
use std::fs;
use std::path::{MAIN_SEPARATOR, Path, PathBuf};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Parses a string (color name, hex or 256 palette index) into a ratatui::style::Color
///
/// Supports standard names (red, green, etc.), hex values (#RRGGBB or #RGB) and indices
/// (`"69"`). Anything else falls back to [Color::Reset].
pub fn parse_color(s: &str) -> Color {
    match s.to_lowercase().as_str() {
        "default" | "reset" => Color::Reset,
        "yellow" => Color::Yellow,
        "red" => Color::Red,
        "blue" => Color::Blue,
        "green" => Color::Green,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "white" => Color::White,
        "black" => Color::Black,
        "gray" | "grey" => Color::Gray,
        "darkgray" | "darkgrey" => Color::DarkGray,
        _ => {
            if let Ok(idx) = s.parse::<u8>() {
                return Color::Indexed(idx);
            }
            if let Some(color) = s.strip_prefix('#') {
                let expanded = match color.len() {
                    6 => color.to_string(),
                    3 => color.chars().flat_map(|c| [c, c]).collect(),
                    _ => String::new(),
                };
                if let Ok(rgb) = u32::from_str_radix(&expanded, 16) {
                    return Color::Rgb(
                        ((rgb >> 16) & 0xFF) as u8,
                        ((rgb >> 8) & 0xFF) as u8,
                        (rgb & 0xFF) as u8,
                    );
                }
            }
            // fallback
            Color::Reset
        }
    }
}

pub fn get_home() -> Option<PathBuf> {
    dirs::home_dir()
}

/// Expands a leading `~` to the home directory.
pub fn expand_home_path(path: &str) -> PathBuf {
    if path == "~" {
        return get_home().unwrap_or_else(|| PathBuf::from(path));
    }
    if let Some(rest) = path
        .strip_prefix("~/")
        .or_else(|| path.strip_prefix("~\\"))
        && let Some(home) = get_home()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}

/// Displays paths under the home directory with a leading `~`.
pub fn shorten_home_path<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();
    if let Some(home_dir) = get_home()
        && let Ok(stripped) = path.strip_prefix(&home_dir)
    {
        if stripped.as_os_str().is_empty() {
            return "~".to_string();
        } else {
            let mut short = stripped.display().to_string();
            if short.starts_with(MAIN_SEPARATOR) {
                short.remove(0);
            }
            return format!("~{}{}", MAIN_SEPARATOR, short);
        }
    }
    path.display().to_string()
}

/// Turns the command line path into the starting directory.
///
/// Expands `~` and canonicalizes, so the header shows a full path and going to the parent
/// walks real directories. Falls back to the path as given if canonicalization fails.
pub fn resolve_initial_dir(arg: &str) -> PathBuf {
    let expanded = expand_home_path(arg);
    fs::canonicalize(&expanded).unwrap_or(expanded)
}

/// Whether `path` is a directory we can actually list.
pub fn is_browsable_dir(path: &Path) -> bool {
    path.is_dir() && fs::read_dir(path).is_ok()
}

/// Fits `s` into `width` terminal columns by cutting from the left.
///
/// The end of a path is the interesting part, so `/very/long/path` becomes `…ong/path`.
pub fn fit_to_width_left(s: &str, width: usize) -> String {
    if UnicodeWidthStr::width(s) <= width {
        return s.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let budget = width - 1;
    let mut used = 0;
    let mut tail: Vec<char> = Vec::new();
    for c in s.chars().rev() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        tail.push(c);
    }

    let mut out = String::with_capacity(tail.len() + 3);
    out.push('…');
    out.extend(tail.iter().rev());
    out
}
