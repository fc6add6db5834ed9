// ABOUTME: Page selector row below the notes list
// ABOUTME: Renders nothing unless there is more than one page

use crate::app::App;
use crate::pagination::PageItem;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let Some(pagination) = app.pagination() else {
        return;
    };

    let arrow = |enabled: bool, glyph: &'static str| {
        if enabled {
            Span::raw(glyph)
        } else {
            Span::styled(glyph, Style::default().dim())
        }
    };

    let mut spans = vec![arrow(pagination.prev().is_some(), "‹ ")];
    for item in pagination.items() {
        match item {
            PageItem::Page(page) if page == pagination.current() => {
                spans.push(Span::styled(
                    format!("[{page}]"),
                    Style::default().cyan().bold(),
                ));
            }
            PageItem::Page(page) => spans.push(Span::raw(format!(" {page} "))),
            PageItem::Gap => spans.push(Span::styled(" … ", Style::default().dim())),
        }
    }
    spans.push(arrow(pagination.next().is_some(), " ›"));

    f.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}

#[cfg(test)]
mod tests {
    use crate::ui::test_support::*;
    use insta::assert_snapshot;

    #[test]
    fn test_hidden_for_single_page() {
        let screen = draw(&app_showing(&["Only"], 1));
        assert!(!screen.contains("[1]"));
        assert!(!screen.contains('‹'));
    }

    /// The selector row sits directly above the status bar
    fn selector_row(screen: &str) -> String {
        screen.lines().rev().nth(1).unwrap_or_default().trim().to_string()
    }

    #[test]
    fn test_selector_row_snapshot() {
        let screen = draw(&app_showing(&["First"], 3));
        assert_snapshot!(selector_row(&screen), @"‹ [1] 2  3  ›");
    }

    #[test]
    fn test_selector_row_with_gap_snapshot() {
        let mut app = app_showing(&["First"], 20);
        app.key.page = 10;
        assert_snapshot!(selector_row(&draw(&app)), @"‹  1  …  8  9 [10] 11  12  …  20  ›");
    }

    #[test]
    fn test_marks_current_page() {
        let screen = draw(&app_showing(&["First"], 3));
        assert!(screen.contains("[1]"));
        assert!(screen.contains(" 2 "));
        assert!(screen.contains(" 3 "));
    }
}
