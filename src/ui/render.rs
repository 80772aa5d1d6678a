//! UI renderer implementation.
//!
//! Contains the top-level `render` entry point used by the terminal loop. It places the path
//! header inside the margin and the entry rows beneath it.
//!
//! This module should stay “pure rendering”: it reads state + config and produces widgets,
//! without owning any navigation logic.

use crate::app::AppState;
use crate::utils::{fit_to_width_left, shorten_home_path};

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::Paragraph,
};

/// Render function which draws the whole screen on each frame.
pub(crate) fn render(frame: &mut Frame, app: &AppState) {
    let nav = app.nav();

    if !nav.is_ready() {
        frame.render_widget(Paragraph::new("Loading..."), frame.area());
        return;
    }

    let [header, rows] = layout_chunks(frame.area(), nav.margin(), nav.viewport().height());

    let path = shorten_home_path(nav.cwd());
    let path = fit_to_width_left(&path, nav.viewport().width());
    frame.render_widget(
        Paragraph::new(Line::styled(path, app.config().theme().path_style())),
        header,
    );

    frame.render_widget(Paragraph::new(app.renderer().render(nav)), rows);
}

/// Splits the screen into the header line and the row block.
///
/// The header sits in the upper half of the margin, with one blank line between it and the
/// rows once the margin has room for it.
pub fn layout_chunks(area: Rect, margin: usize, rows: usize) -> [Rect; 2] {
    let pad = (margin / 2).saturating_sub(1);
    let gap = usize::from(margin >= 3);
    let to_u16 = |n: usize| u16::try_from(n).unwrap_or(u16::MAX);

    let [_, header, _, rows, _] = Layout::vertical([
        Constraint::Length(to_u16(pad)),
        Constraint::Length(1),
        Constraint::Length(to_u16(gap)),
        Constraint::Length(to_u16(rows)),
        Constraint::Min(0),
    ])
    .areas(area);
    [header, rows]
}
