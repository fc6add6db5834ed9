// ABOUTME: Bottom status bar rendering
// ABOUTME: Shows the last outcome message, the quit hint, and keybinds

use crate::app::App;
use crate::types::{Focus, StatusMessage};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let mut spans: Vec<Span> = vec![];

    if app.show_ctrl_c_hint() {
        spans.push(Span::styled(
            " Press Ctrl+C again to quit ",
            Style::default().yellow(),
        ));
    } else {
        match &app.status {
            Some(StatusMessage::Info(msg)) => {
                spans.push(Span::styled(format!(" ✓ {msg} "), Style::default().green()));
            }
            Some(StatusMessage::Error(msg)) => {
                spans.push(Span::styled(format!(" ✗ {msg} "), Style::default().red()));
            }
            None if app.error.is_some() && app.shown.is_some() => {
                spans.push(Span::styled(
                    " ✗ Refresh failed, showing cached notes ",
                    Style::default().red(),
                ));
            }
            None => {}
        }
    }

    if let Some(list) = &app.shown {
        spans.push(Span::styled(
            format!("│ Page {}/{} ", app.key.page, list.total_pages.max(1)),
            Style::default().bold(),
        ));
    }

    let keys = match (app.modal.is_open(), app.focus) {
        (true, _) => "│ Esc: close ",
        (false, Focus::Search) => "│ Esc: back to list │ Ctrl+Q: quit ",
        (false, Focus::List) => {
            "│ /: search │ ←→: page │ Enter: open │ Ctrl+N: new │ d: delete │ q: quit "
        }
    };
    spans.push(Span::styled(keys, Style::default().dim()));

    let para = Paragraph::new(Line::from(spans)).style(Style::default().on_dark_gray());
    f.render_widget(para, area);
}
