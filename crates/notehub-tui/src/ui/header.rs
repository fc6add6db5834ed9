// ABOUTME: Top bar with the NoteHub brand and the search box
// ABOUTME: Shows a pending marker while a search term waits out its debounce

use crate::app::App;
use crate::types::Focus;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Focus::Search && !app.modal.is_open();
    let border_style = if focused {
        Style::default().cyan()
    } else {
        Style::default().dim()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Span::styled(" NoteHub ", Style::default().cyan().bold()));

    let mut spans = vec![Span::styled("Search: ", Style::default().dim())];
    if app.search_input.is_empty() && !focused {
        spans.push(Span::styled("press / to search", Style::default().dim().italic()));
    } else {
        spans.push(Span::raw(app.search_input.as_str()));
    }
    if focused {
        spans.push(Span::styled("█", Style::default().cyan()));
    }
    if app.search.is_pending() {
        spans.push(Span::styled(
            format!(" {}", app.throbber_char()),
            Style::default().yellow(),
        ));
    }

    f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}
