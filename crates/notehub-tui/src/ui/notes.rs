// ABOUTME: Notes list rendering
// ABOUTME: Loading, error, empty and populated states, with the selected row highlighted

use crate::app::App;
use crate::types::{Focus, NotesState};
use notehub_client::Note;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

const PREVIEW_CHARS: usize = 60;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Focus::List && !app.modal.is_open();
    let mut title = vec![Span::raw(" Notes ")];
    if app.cache.is_fetching(&app.key) && app.shown.is_some() {
        title.push(Span::styled(
            format!("{} ", app.throbber_char()),
            Style::default().yellow(),
        ));
    }
    if !app.key.search.is_empty() {
        title.push(Span::styled(
            format!("matching \"{}\" ", app.key.search),
            Style::default().dim(),
        ));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if focused {
            Style::default().cyan()
        } else {
            Style::default()
        })
        .title(Line::from(title));

    match app.notes_state() {
        NotesState::Loading => {
            let text = format!("{} Loading notes...", app.throbber_char());
            f.render_widget(
                Paragraph::new(text).style(Style::default().dim()).block(block),
                area,
            );
        }
        NotesState::Error(err) => {
            let lines = vec![
                Line::styled("✗ Could not load notes", Style::default().red().bold()),
                Line::styled(err, Style::default().red()),
                Line::styled("Press r to retry", Style::default().dim()),
            ];
            f.render_widget(
                Paragraph::new(lines)
                    .wrap(Wrap { trim: true })
                    .block(block),
                area,
            );
        }
        NotesState::Empty => {
            let text = if app.shown_key.search.is_empty() {
                "No notes yet. Press Ctrl+N to create one.".to_string()
            } else {
                format!("No notes match \"{}\"", app.shown_key.search)
            };
            f.render_widget(
                Paragraph::new(text).style(Style::default().dim()).block(block),
                area,
            );
        }
        NotesState::Populated => {
            let items: Vec<ListItem> = app.notes().iter().map(note_row).collect();
            let list = List::new(items)
                .block(block)
                .highlight_style(Style::default().reversed());
            let mut state = ListState::default()
                .with_offset(app.scroll.offset)
                .with_selected(Some(app.scroll.selected));
            f.render_stateful_widget(list, area, &mut state);
        }
    }
}

fn note_row(note: &Note) -> ListItem<'_> {
    let preview: String = note
        .content
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(PREVIEW_CHARS)
        .collect();
    ListItem::new(Line::from(vec![
        Span::styled(format!(" {:<9}", note.tag.as_str()), Style::default().magenta()),
        Span::styled(note.title.as_str(), Style::default().bold()),
        Span::styled(format!("  {preview}"), Style::default().dim()),
    ]))
}

#[cfg(test)]
mod tests {
    use crate::query::QueryKey;
    use crate::ui::test_support::*;
    use insta::assert_snapshot;

    #[test]
    fn test_loading_state() {
        let screen = draw(&app());
        assert!(screen.contains("Loading notes..."));
    }

    #[test]
    fn test_error_state_without_data() {
        let mut app = app();
        app.error = Some("Connection failed: refused".into());
        let screen = draw(&app);
        assert!(screen.contains("Could not load notes"));
        assert!(screen.contains("refused"));
    }

    #[test]
    fn test_error_hidden_when_data_shown() {
        let mut app = app_showing(&["Kept"], 1);
        app.error = Some("Connection failed: refused".into());
        let screen = draw(&app);
        assert!(screen.contains("Kept"));
        assert!(!screen.contains("Could not load notes"));
    }

    #[test]
    fn test_empty_state() {
        let screen = draw(&app_showing(&[], 1));
        assert!(screen.contains("No notes yet"));
    }

    #[test]
    fn test_empty_message_names_loaded_search() {
        let mut app = app_showing(&[], 1);
        app.key = QueryKey::new(1, "milk");
        let screen = draw(&app);
        assert!(!screen.contains("No notes match"));

        app.shown_key = app.key.clone();
        assert!(draw(&app).contains("No notes match \"milk\""));
    }

    #[test]
    fn test_row_layout_snapshot() {
        let screen = draw(&app_showing(&["Quarterly plan", "Standup"], 1));
        // Rows start under the header and the list's top border
        let rows: Vec<&str> = screen
            .lines()
            .skip(4)
            .take(2)
            .map(|l| l.trim_matches(|c| c == '│' || c == ' '))
            .collect();
        assert_snapshot!(rows.join("\n"), @r"
        Work     Quarterly plan  content of Quarterly plan
        Work     Standup  content of Standup
        ");
    }

    #[test]
    fn test_rows_show_tag_and_preview() {
        let screen = draw(&app_showing(&["Quarterly plan"], 1));
        assert!(screen.contains("Work"));
        assert!(screen.contains("Quarterly plan"));
        assert!(screen.contains("content of Quarterly plan"));
    }
}
