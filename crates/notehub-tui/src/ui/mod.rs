// ABOUTME: UI rendering module for notehub-tui
// ABOUTME: Lays out the main screen and draws the modal overlay last

mod header;
mod notes;
mod overlay;
mod pagination;
mod status;

use crate::app::App;
use ratatui::prelude::*;
use ratatui::Frame;

pub fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(3), // Brand + search
        Constraint::Min(3),    // Notes
        Constraint::Length(1), // Pagination
        Constraint::Length(1), // Status bar
    ])
    .split(f.area());

    header::render(f, chunks[0], app);
    notes::render(f, chunks[1], app);
    pagination::render(f, chunks[2], app);
    status::render(f, chunks[3], app);

    // Modal sits on top of everything
    if app.modal.is_open() {
        overlay::render(f, app);
    }
}

/// Flatten a test buffer into one string per row
#[cfg(test)]
pub(crate) fn buffer_lines(buffer: &Buffer) -> Vec<String> {
    let area = buffer.area;
    (area.top()..area.bottom())
        .map(|y| {
            (area.left()..area.right())
                .map(|x| buffer[(x, y)].symbol())
                .collect::<String>()
        })
        .collect()
}
