//! Entry row renderer for dirview.
//!
//! Turns the visible slice of a [NavState] into styled text: a colored mode string, a
//! separator and the entry name per row. Rendering never mutates state.
//!
//! Coloring of the mode string is purely positional:
//! - the first character picks directory, symlink or file color (`d`, `l`, anything else)
//! - each following character picks its color by class: `r`, `w`, `x`, `s`/`S`/`t`/`T`, `-`
//! - any other character is passed through unstyled

use crate::app::NavState;
use crate::config::Config;
use crate::core::{Entry, EntryKind};

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span, Text};

/// Styles used for the mode string and the entry name.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PermStyles {
    pub dir: Style,
    pub file: Style,
    pub symlink: Style,
    pub read: Style,
    pub write: Style,
    pub exec: Style,
    pub none: Style,
    pub special: Style,
}

impl PermStyles {
    /// Same foreground rules, every style with `bg` added.
    pub fn with_background(&self, bg: Color) -> Self {
        PermStyles {
            dir: self.dir.bg(bg),
            file: self.file.bg(bg),
            symlink: self.symlink.bg(bg),
            read: self.read.bg(bg),
            write: self.write.bg(bg),
            exec: self.exec.bg(bg),
            none: self.none.bg(bg),
            special: self.special.bg(bg),
        }
    }

    /// Style of the leading type character.
    pub fn type_style(&self, c: char) -> Style {
        match c {
            'd' => self.dir,
            'l' => self.symlink,
            _ => self.file,
        }
    }

    /// Style of one permission character, `None` for characters outside every class.
    pub fn class_style(&self, c: char) -> Option<Style> {
        match c {
            'r' => Some(self.read),
            'w' => Some(self.write),
            'x' => Some(self.exec),
            's' | 'S' | 't' | 'T' => Some(self.special),
            '-' => Some(self.none),
            _ => None,
        }
    }

    /// Style of the entry name. Symlinks share the file styling.
    pub fn name_style(&self, kind: EntryKind) -> Style {
        match kind {
            EntryKind::Directory => self.dir,
            EntryKind::File | EntryKind::Symlink => self.file,
        }
    }
}

/// Splits a mode string into styled spans, one per character.
///
/// `fallback` is used for characters outside every class.
pub fn mode_spans(mode: &str, styles: &PermStyles, fallback: Style) -> Vec<Span<'static>> {
    let mut chars = mode.chars();
    let mut spans = Vec::with_capacity(10);

    if let Some(first) = chars.next() {
        spans.push(Span::styled(first.to_string(), styles.type_style(first)));
    }
    for c in chars {
        let style = styles.class_style(c).unwrap_or(fallback);
        spans.push(Span::styled(c.to_string(), style));
    }
    spans
}

/// Renders entry rows with a fixed pair of style tables.
///
/// Built once from the theme, so several browsers can each carry their own renderer.
#[derive(Debug, Clone)]
pub struct Renderer {
    normal: PermStyles,
    selected: PermStyles,
    highlight: Style,
}

impl Renderer {
    pub fn new(styles: PermStyles, selection_bg: Color) -> Self {
        Self {
            normal: styles,
            selected: styles.with_background(selection_bg),
            highlight: Style::default().bg(selection_bg),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(*config.styles(), config.theme().selection())
    }

    /// One row: mode string, a space, the name. The selected row carries the background on
    /// every span, including the separator.
    pub fn render_row(&self, entry: &Entry, is_selected: bool) -> Line<'static> {
        let (styles, base) = if is_selected {
            (&self.selected, self.highlight)
        } else {
            (&self.normal, Style::default())
        };

        let mut spans = mode_spans(entry.mode(), styles, base);
        spans.push(Span::styled(" ", base));
        spans.push(Span::styled(
            entry.name_str().into_owned(),
            styles.name_style(entry.kind()),
        ));
        Line::from(spans)
    }

    /// The rows inside the scroll window, in ascending index order. Never the full list.
    pub fn render(&self, nav: &NavState) -> Text<'static> {
        let selected = nav.selected_idx();
        let lines: Vec<Line<'static>> = nav
            .visible_entries()
            .map(|(idx, entry)| self.render_row(entry, idx == selected))
            .collect();
        Text::from(lines)
    }
}
