// ABOUTME: Modal overlay rendering: dimmed backdrop, cleared box, and the hosted content
// ABOUTME: Draws the create form, note detail, and delete confirmation

use crate::app::App;
use crate::form::{Field, FormFocus, NoteForm};
use crate::types::{DetailState, Overlay};
use notehub_client::{Note, Tag};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

pub fn render(f: &mut Frame, app: &App) {
    let (Some(overlay), Some(area)) = (app.modal.content(), app.modal.content_area(f.area()))
    else {
        return;
    };

    // Backdrop
    let screen = f.area();
    f.buffer_mut()
        .set_style(screen, Style::default().add_modifier(Modifier::DIM));
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().cyan())
        .title(overlay.title());
    let inner = block.inner(area);
    f.render_widget(block, area);

    match overlay {
        Overlay::Create(form) => render_form(f, inner, form),
        Overlay::Detail { state, .. } => render_detail(f, inner, state, app.throbber_char()),
        Overlay::ConfirmDelete {
            title,
            pending,
            failure,
            ..
        } => render_confirm(f, inner, title, *pending, failure.as_deref()),
    }
}

fn field_block(label: &'static str, focused: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .title(label)
        .border_style(if focused {
            Style::default().cyan()
        } else {
            Style::default().dim()
        })
}

fn error_line(message: Option<&str>) -> Paragraph<'_> {
    Paragraph::new(message.unwrap_or_default()).style(Style::default().red())
}

fn render_form(f: &mut Frame, area: Rect, form: &NoteForm) {
    let chunks = Layout::vertical([
        Constraint::Length(3), // Title
        Constraint::Length(1), // Title error
        Constraint::Min(3),    // Content
        Constraint::Length(1), // Content error
        Constraint::Length(1), // Tag
        Constraint::Length(1), // Tag error
        Constraint::Length(1), // Submit failure
        Constraint::Length(1), // Buttons
    ])
    .split(area);
    let errors = form.errors();

    let title_block = field_block(" Title ", form.focus == FormFocus::Title);
    let title_area = title_block.inner(chunks[0]);
    f.render_widget(title_block, chunks[0]);
    f.render_widget(&form.title, title_area);
    f.render_widget(error_line(errors.get(Field::Title)), chunks[1]);

    let content_block = field_block(" Content ", form.focus == FormFocus::Content);
    let content_area = content_block.inner(chunks[2]);
    f.render_widget(content_block, chunks[2]);
    f.render_widget(&form.content, content_area);
    f.render_widget(error_line(errors.get(Field::Content)), chunks[3]);

    let mut tags = vec![Span::styled(
        "Tag: ",
        if form.focus == FormFocus::Tag {
            Style::default().cyan()
        } else {
            Style::default().dim()
        },
    )];
    for tag in Tag::ALL {
        let style = if tag == form.tag {
            Style::default().reversed()
        } else {
            Style::default().dim()
        };
        tags.push(Span::styled(format!(" {tag} "), style));
        tags.push(Span::raw(" "));
    }
    f.render_widget(Paragraph::new(Line::from(tags)), chunks[4]);
    f.render_widget(error_line(errors.get(Field::Tag)), chunks[5]);

    f.render_widget(error_line(form.failure()), chunks[6]);

    let button = |label: &'static str, focused: bool, enabled: bool| {
        let style = match (focused, enabled) {
            (_, false) => Style::default().dim(),
            (true, true) => Style::default().cyan().reversed(),
            (false, true) => Style::default(),
        };
        Span::styled(format!("[ {label} ]"), style)
    };
    let buttons = Line::from(vec![
        button("Cancel", form.focus == FormFocus::Cancel, true),
        Span::raw("  "),
        button(
            form.submit_label(),
            form.focus == FormFocus::Submit,
            !form.is_pending(),
        ),
        Span::styled("   Ctrl+S: submit", Style::default().dim()),
    ]);
    f.render_widget(Paragraph::new(buttons), chunks[7]);
}

fn render_detail(f: &mut Frame, area: Rect, state: &DetailState, throbber: char) {
    match state {
        DetailState::Loading => {
            f.render_widget(
                Paragraph::new(format!("{throbber} Loading note...")).style(Style::default().dim()),
                area,
            );
        }
        DetailState::Failed(err) => {
            f.render_widget(
                Paragraph::new(format!("✗ {err}"))
                    .style(Style::default().red())
                    .wrap(Wrap { trim: true }),
                area,
            );
        }
        DetailState::Loaded(note) => f.render_widget(detail_text(note), area),
    }
}

fn detail_text(note: &Note) -> Paragraph<'_> {
    let mut lines = vec![
        Line::styled(note.title.as_str(), Style::default().bold()),
        Line::from(vec![
            Span::styled(note.tag.as_str(), Style::default().magenta()),
            Span::styled(
                format!("  created {}", note.created_at.format("%Y-%m-%d %H:%M")),
                Style::default().dim(),
            ),
        ]),
        Line::raw(""),
    ];
    if note.content.is_empty() {
        lines.push(Line::styled("(no content)", Style::default().dim().italic()));
    } else {
        lines.extend(note.content.lines().map(Line::raw));
    }
    Paragraph::new(lines).wrap(Wrap { trim: false })
}

fn render_confirm(f: &mut Frame, area: Rect, title: &str, pending: bool, failure: Option<&str>) {
    let mut lines = vec![
        Line::from(vec![
            Span::raw("Delete "),
            Span::styled(format!("\"{title}\""), Style::default().bold()),
            Span::raw("?"),
        ]),
        Line::raw(""),
    ];
    if pending {
        lines.push(Line::styled("Deleting...", Style::default().yellow()));
    } else {
        lines.push(Line::styled(
            "y: delete   n / Esc: keep",
            Style::default().dim(),
        ));
    }
    if let Some(err) = failure {
        lines.push(Line::styled(format!("✗ {err}"), Style::default().red()));
    }
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
}

#[cfg(test)]
mod tests {
    use crate::types::{DetailState, Overlay};
    use crate::ui::test_support::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn test_form_shows_all_tags() {
        let mut app = app();
        app.open_create();
        let screen = draw(&app);
        for tag in ["Todo", "Work", "Personal", "Meeting", "Shopping"] {
            assert!(screen.contains(tag), "missing tag {tag}");
        }
    }

    #[test]
    fn test_form_shows_validation_error_after_submit() {
        let mut app = app();
        app.open_create();
        for c in "ab".chars() {
            app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
        }
        app.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));
        let screen = draw(&app);
        assert!(screen.contains("Minimum 3 characters"));
    }

    #[test]
    fn test_confirm_shows_title() {
        let mut app = app_showing(&["Old plan"], 1);
        app.handle_key(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::NONE));
        let screen = draw(&app);
        assert!(screen.contains("Delete \"Old plan\"?"));
    }

    #[test]
    fn test_detail_loaded() {
        let mut app = app_showing(&["Trip"], 1);
        app.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
        let note = app.notes()[0].clone();
        if let Some(Overlay::Detail { state, .. }) = app.modal.content_mut() {
            *state = DetailState::Loaded(Box::new(note));
        }
        let screen = draw(&app);
        assert!(screen.contains("content of Trip"));
        assert!(screen.contains("created 2023-11-14"));
    }
}
