// ABOUTME: Generic modal shell: open/closed state, scroll containment, and close triggers
// ABOUTME: Esc and backdrop clicks close it; content clicks never do

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Constraint, Layout, Rect};

/// Scroll state of the list behind the modal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollPosition {
    pub selected: usize,
    pub offset: usize,
}

/// Outcome of offering an input event to the shell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalInput {
    /// The shell wants to close; the host calls `close`
    Close,
    /// Not consumed by the shell; hand it to the content
    Pass,
}

/// Size of the content box as percentages of the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalSize {
    pub width_pct: u16,
    pub height_pct: u16,
}

impl ModalSize {
    pub const fn new(width_pct: u16, height_pct: u16) -> Self {
        Self {
            width_pct,
            height_pct,
        }
    }
}

/// Create a centered rect using percentages of the parent rect
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(r);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}

fn rect_contains(r: Rect, column: u16, row: u16) -> bool {
    column >= r.x
        && column < r.x.saturating_add(r.width)
        && row >= r.y
        && row < r.y.saturating_add(r.height)
}

struct Open<T> {
    content: T,
    size: ModalSize,
    restore: ScrollPosition,
}

/// Host-controlled overlay holding one piece of content at a time
pub struct Modal<T> {
    open: Option<Open<T>>,
}

impl<T> Modal<T> {
    pub fn new() -> Self {
        Self { open: None }
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Show `content`, remembering the scroll position to hand back on close.
    ///
    /// Replacing the content of an already open modal keeps the original
    /// restore point.
    pub fn open(&mut self, content: T, size: ModalSize, scroll: ScrollPosition) {
        let restore = self.open.as_ref().map(|o| o.restore).unwrap_or(scroll);
        self.open = Some(Open {
            content,
            size,
            restore,
        });
    }

    /// Close and return the content and saved scroll position.
    ///
    /// Returns `None` when already closed, so each open yields exactly one close.
    pub fn close(&mut self) -> Option<(T, ScrollPosition)> {
        self.open.take().map(|o| (o.content, o.restore))
    }

    pub fn content(&self) -> Option<&T> {
        self.open.as_ref().map(|o| &o.content)
    }

    pub fn content_mut(&mut self) -> Option<&mut T> {
        self.open.as_mut().map(|o| &mut o.content)
    }

    /// Where the content box sits on a screen of the given size
    pub fn content_area(&self, screen: Rect) -> Option<Rect> {
        self.open
            .as_ref()
            .map(|o| centered_rect(o.size.width_pct, o.size.height_pct, screen))
    }

    pub fn on_key(&self, key: &KeyEvent) -> ModalInput {
        if self.is_open() && key.code == KeyCode::Esc {
            ModalInput::Close
        } else {
            ModalInput::Pass
        }
    }

    /// Left press on the backdrop closes; anything inside the content box passes through
    pub fn on_mouse(&self, event: &MouseEvent, screen: Rect) -> ModalInput {
        let Some(area) = self.content_area(screen) else {
            return ModalInput::Pass;
        };
        match event.kind {
            MouseEventKind::Down(MouseButton::Left)
                if !rect_contains(area, event.column, event.row) =>
            {
                ModalInput::Close
            }
            _ => ModalInput::Pass,
        }
    }
}

impl<T> Default for Modal<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    const SIZE: ModalSize = ModalSize::new(50, 50);

    fn screen() -> Rect {
        Rect::new(0, 0, 100, 40)
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn esc() -> KeyEvent {
        KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)
    }

    #[test]
    fn test_escape_closes_once_and_restores_scroll() {
        let mut modal = Modal::new();
        let before = ScrollPosition {
            selected: 7,
            offset: 3,
        };
        modal.open("form", SIZE, before);

        let mut closes = 0;
        let mut restored = None;
        for _ in 0..3 {
            if modal.on_key(&esc()) == ModalInput::Close {
                if let Some((_, scroll)) = modal.close() {
                    closes += 1;
                    restored = Some(scroll);
                }
            }
        }
        assert_eq!(closes, 1);
        assert_eq!(restored, Some(before));
        assert!(!modal.is_open());
    }

    #[test]
    fn test_close_when_closed_is_none() {
        let mut modal: Modal<()> = Modal::new();
        assert!(modal.close().is_none());
        assert_eq!(modal.on_key(&esc()), ModalInput::Pass);
    }

    #[test]
    fn test_other_keys_pass() {
        let mut modal = Modal::new();
        modal.open(1, SIZE, ScrollPosition::default());
        let key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert_eq!(modal.on_key(&key), ModalInput::Pass);
    }

    #[test]
    fn test_backdrop_click_closes() {
        let mut modal = Modal::new();
        modal.open((), SIZE, ScrollPosition::default());
        assert_eq!(modal.on_mouse(&click(0, 0), screen()), ModalInput::Close);
        assert_eq!(modal.on_mouse(&click(99, 39), screen()), ModalInput::Close);
    }

    #[test]
    fn test_content_click_does_not_close() {
        let mut modal = Modal::new();
        modal.open((), SIZE, ScrollPosition::default());
        let area = modal.content_area(screen()).unwrap();
        assert_eq!(
            modal.on_mouse(&click(area.x, area.y), screen()),
            ModalInput::Pass
        );
        assert_eq!(
            modal.on_mouse(
                &click(area.x + area.width - 1, area.y + area.height - 1),
                screen()
            ),
            ModalInput::Pass
        );
        // One cell outside the content edge is backdrop
        assert_eq!(
            modal.on_mouse(&click(area.x + area.width, area.y), screen()),
            ModalInput::Close
        );
    }

    #[test]
    fn test_non_press_mouse_events_pass() {
        let mut modal = Modal::new();
        modal.open((), SIZE, ScrollPosition::default());
        let mut moved = click(0, 0);
        moved.kind = MouseEventKind::Moved;
        assert_eq!(modal.on_mouse(&moved, screen()), ModalInput::Pass);
    }

    #[test]
    fn test_reopen_keeps_first_restore_point() {
        let mut modal = Modal::new();
        let first = ScrollPosition {
            selected: 2,
            offset: 0,
        };
        modal.open("detail", SIZE, first);
        modal.open("confirm", SIZE, ScrollPosition::default());
        assert_eq!(modal.content(), Some(&"confirm"));
        assert_eq!(modal.close().map(|(_, s)| s), Some(first));
    }

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 100);
        let centered = centered_rect(50, 50, area);
        assert!(centered.x > 0);
        assert!(centered.y > 0);
        assert!(centered.width < 100);
        assert!(centered.height < 100);
    }
}
