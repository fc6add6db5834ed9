// ABOUTME: Central application state and event handling
// ABOUTME: Single struct holds all state, mutations happen in handle_* methods

use crate::app_event::AppEvent;
use crate::debounce::Debouncer;
use crate::form::{FormEvent, NoteForm};
use crate::modal::{Modal, ModalInput, ScrollPosition};
use crate::pagination::Pagination;
use crate::query::{QueryCache, QueryKey};
use crate::types::{DetailState, Focus, NotesState, Overlay, StatusMessage};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use notehub_client::{NewNote, Note, NoteList};
use ratatui::layout::Rect;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Rows taken by the header, list borders, pagination and status bar
const CHROME_ROWS: u16 = 7;

/// Actions that need async handling (returned from handle_*)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    FetchNotes(QueryKey),
    CreateNote(NewNote),
    LoadNote(String),
    DeleteNote(String),
}

/// Central application state
pub struct App {
    pub cache: QueryCache,

    // Search
    pub focus: Focus,
    pub search_input: String,
    pub search: Debouncer,

    // Active query and what is on screen for it
    pub key: QueryKey,
    pub shown: Option<Arc<NoteList>>,
    /// The key `shown` was loaded for; lags `key` while a new query loads
    pub shown_key: QueryKey,
    pub error: Option<String>,

    // List scroll
    pub scroll: ScrollPosition,
    pub screen: Rect,

    pub modal: Modal<Overlay>,
    pub status: Option<StatusMessage>,

    // Quit handling
    pub last_ctrl_c: Option<Instant>,

    // Throbber animation frame
    pub throbber_frame: usize,
}

impl App {
    pub fn new(cache: QueryCache) -> Self {
        Self {
            cache,
            focus: Focus::List,
            search_input: String::new(),
            search: Debouncer::default(),
            key: QueryKey::default(),
            shown: None,
            shown_key: QueryKey::default(),
            error: None,
            scroll: ScrollPosition::default(),
            screen: Rect::new(0, 0, 80, 24),
            modal: Modal::new(),
            status: None,
            last_ctrl_c: None,
            throbber_frame: 0,
        }
    }

    /// First fetch for the initial key
    pub fn start(&mut self) -> Option<Action> {
        Some(Action::FetchNotes(self.key.clone()))
    }

    /// Advance throbber animation
    pub fn tick(&mut self) {
        self.throbber_frame = (self.throbber_frame + 1) % 8;
    }

    /// Get current throbber character
    pub fn throbber_char(&self) -> char {
        const THROBBER: [char; 8] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧'];
        THROBBER[self.throbber_frame]
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.screen = Rect::new(0, 0, width, height);
    }

    fn viewport_rows(&self) -> usize {
        self.screen.height.saturating_sub(CHROME_ROWS).max(1) as usize
    }

    // ------------------------------------------------------------------
    // Derived view state
    // ------------------------------------------------------------------

    pub fn notes_state(&self) -> NotesState {
        match (&self.shown, &self.error) {
            (Some(list), _) if list.notes.is_empty() => NotesState::Empty,
            (Some(_), _) => NotesState::Populated,
            (None, Some(err)) => NotesState::Error(err.clone()),
            (None, None) => NotesState::Loading,
        }
    }

    pub fn notes(&self) -> &[Note] {
        self.shown.as_deref().map(|l| l.notes.as_slice()).unwrap_or(&[])
    }

    pub fn selected_note(&self) -> Option<&Note> {
        self.notes().get(self.scroll.selected)
    }

    /// Page selector for the shown result, only when there is more than one page
    pub fn pagination(&self) -> Option<Pagination> {
        self.shown
            .as_ref()
            .map(|l| Pagination::new(self.key.page, l.total_pages))
            .filter(Pagination::is_visible)
    }

    pub fn search_deadline(&self) -> Option<Instant> {
        self.search.deadline()
    }

    /// Check if Ctrl+C hint should be shown
    pub fn show_ctrl_c_hint(&self) -> bool {
        self.last_ctrl_c
            .map(|t| t.elapsed() < Duration::from_millis(500))
            .unwrap_or(false)
    }

    // ------------------------------------------------------------------
    // Query key changes
    // ------------------------------------------------------------------

    /// Make `key` current, keeping the previous result on screen until its data arrives
    fn set_key(&mut self, key: QueryKey) -> Option<Action> {
        if key == self.key {
            return None;
        }
        debug!(page = key.page, search = %key.search, "Query key changed");
        self.key = key;
        self.error = None;
        self.scroll = ScrollPosition::default();
        if let Some(cached) = self.cache.peek(&self.key) {
            self.shown = Some(cached);
            self.shown_key = self.key.clone();
        }
        if self.cache.is_fresh(&self.key) {
            None
        } else {
            Some(Action::FetchNotes(self.key.clone()))
        }
    }

    fn go_to_page(&mut self, page: Option<u32>) -> Option<Action> {
        let page = page?;
        self.set_key(QueryKey::new(page, self.key.search.clone()))
    }

    /// Release the debounced search term once its quiet period is over
    pub fn flush_search(&mut self, now: Instant) -> Option<Action> {
        let term = self.search.poll(now)?;
        self.set_key(QueryKey::new(1, term))
    }

    fn search_changed(&mut self) {
        self.search.input(self.search_input.clone(), Instant::now());
    }

    /// Drop all cached lists and refetch the current one
    fn invalidate_and_refetch(&mut self) -> Option<Action> {
        self.cache.invalidate_all();
        Some(Action::FetchNotes(self.key.clone()))
    }

    // ------------------------------------------------------------------
    // Modal
    // ------------------------------------------------------------------

    fn open_overlay(&mut self, overlay: Overlay) {
        let size = overlay.size();
        self.modal.open(overlay, size, self.scroll);
    }

    fn close_modal(&mut self) {
        if let Some((_, scroll)) = self.modal.close() {
            self.scroll = scroll;
        }
    }

    pub fn open_create(&mut self) {
        self.open_overlay(Overlay::Create(NoteForm::new()));
    }

    // ------------------------------------------------------------------
    // Input
    // ------------------------------------------------------------------

    /// Handle a key event, returning an action if needed
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        // Outcome messages last until the next interaction
        self.status = None;
        self.dispatch_key(key).or_else(|| self.retry_failed_fetch())
    }

    /// A failed refresh behind stale data is retried on the next interaction
    fn retry_failed_fetch(&mut self) -> Option<Action> {
        let retry = self.error.is_some()
            && self.shown.is_some()
            && !self.cache.is_fresh(&self.key)
            && !self.cache.is_fetching(&self.key);
        retry.then(|| Action::FetchNotes(self.key.clone()))
    }

    fn dispatch_key(&mut self, key: KeyEvent) -> Option<Action> {
        // Global keys
        match key.code {
            KeyCode::Char('q') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Some(Action::Quit);
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                if let Some(last) = self.last_ctrl_c {
                    if last.elapsed() < Duration::from_millis(500) {
                        return Some(Action::Quit);
                    }
                }
                self.last_ctrl_c = Some(Instant::now());
                return None;
            }
            KeyCode::Char('n') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                if !self.modal.is_open() {
                    self.open_create();
                }
                return None;
            }
            _ => {}
        }

        if self.modal.is_open() {
            return self.handle_modal_key(key);
        }

        match self.focus {
            Focus::Search => self.handle_search_key(key),
            Focus::List => self.handle_list_key(key),
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Esc | KeyCode::Tab | KeyCode::Down | KeyCode::Enter => {
                self.focus = Focus::List;
            }
            KeyCode::Backspace => {
                if self.search_input.pop().is_some() {
                    self.search_changed();
                }
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.search_input.push(c);
                self.search_changed();
            }
            _ => {}
        }
        None
    }

    fn handle_list_key(&mut self, key: KeyEvent) -> Option<Action> {
        let pagination = self.pagination();
        match key.code {
            KeyCode::Char('q') => return Some(Action::Quit),
            KeyCode::Char('/') | KeyCode::Tab => self.focus = Focus::Search,
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
            KeyCode::Left => return self.go_to_page(pagination.and_then(|p| p.prev())),
            KeyCode::Right => return self.go_to_page(pagination.and_then(|p| p.next())),
            KeyCode::Home => return self.go_to_page(pagination.and_then(|p| p.first())),
            KeyCode::End => return self.go_to_page(pagination.and_then(|p| p.last())),
            KeyCode::Char('n') => self.open_create(),
            KeyCode::Char('r') => return self.invalidate_and_refetch(),
            KeyCode::Enter => {
                let id = self.selected_note()?.id.clone();
                self.open_overlay(Overlay::Detail {
                    id: id.clone(),
                    state: DetailState::Loading,
                });
                return Some(Action::LoadNote(id));
            }
            KeyCode::Char('d') => {
                let note = self.selected_note()?;
                let overlay = Overlay::ConfirmDelete {
                    id: note.id.clone(),
                    title: note.title.clone(),
                    pending: false,
                    failure: None,
                };
                self.open_overlay(overlay);
            }
            _ => {}
        }
        None
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.notes().len();
        if len == 0 {
            self.scroll = ScrollPosition::default();
            return;
        }
        let selected = self
            .scroll
            .selected
            .saturating_add_signed(delta)
            .min(len - 1);
        let rows = self.viewport_rows();
        let mut offset = self.scroll.offset;
        if selected < offset {
            offset = selected;
        } else if selected >= offset + rows {
            offset = selected + 1 - rows;
        }
        self.scroll = ScrollPosition { selected, offset };
    }

    fn handle_modal_key(&mut self, key: KeyEvent) -> Option<Action> {
        if self.modal.on_key(&key) == ModalInput::Close {
            self.close_modal();
            return None;
        }

        let overlay = self.modal.content_mut()?;
        match overlay {
            Overlay::Create(form) => match form.handle_key(key)? {
                FormEvent::Submit(note) => Some(Action::CreateNote(note)),
                FormEvent::Cancel => {
                    self.close_modal();
                    None
                }
            },
            Overlay::Detail { .. } => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Char('q')) {
                    self.close_modal();
                }
                None
            }
            Overlay::ConfirmDelete {
                id,
                pending,
                failure,
                ..
            } => match key.code {
                KeyCode::Char('y') | KeyCode::Enter if !*pending => {
                    *pending = true;
                    *failure = None;
                    Some(Action::DeleteNote(id.clone()))
                }
                KeyCode::Char('n') if !*pending => {
                    self.close_modal();
                    None
                }
                _ => None,
            },
        }
    }

    pub fn handle_mouse(&mut self, event: MouseEvent) -> Option<Action> {
        if self.modal.on_mouse(&event, self.screen) == ModalInput::Close {
            self.close_modal();
        }
        None
    }

    // ------------------------------------------------------------------
    // Background results
    // ------------------------------------------------------------------

    /// Handle a result from a background task
    pub fn handle_event(&mut self, event: AppEvent) -> Option<Action> {
        match event {
            AppEvent::NotesLoaded {
                key,
                generation,
                result,
            } => {
                if key != self.key {
                    debug!(page = key.page, search = %key.search, "Discarding superseded notes result");
                    return None;
                }
                if generation < self.cache.generation() {
                    // Requested before a create or delete; the refetch after it wins
                    debug!(
                        generation,
                        page = key.page,
                        "Discarding pre-invalidation notes result"
                    );
                    return None;
                }
                match result {
                    Ok(list) => {
                        let total = list.total_pages.max(1);
                        let overshot = list.notes.is_empty() && key.page > total;
                        self.shown = Some(list);
                        self.shown_key = key.clone();
                        self.error = None;
                        if overshot {
                            // The last page emptied out underneath us
                            return self.set_key(QueryKey::new(total, key.search));
                        }
                        if !self.modal.is_open() {
                            self.clamp_scroll();
                        }
                    }
                    Err(err) => {
                        warn!(error = %err, page = key.page, "Failed to load notes");
                        self.error = Some(err.to_string());
                    }
                }
                None
            }
            AppEvent::NoteLoaded { id, result } => {
                if let Some(Overlay::Detail { id: open_id, state }) = self.modal.content_mut() {
                    if *open_id == id {
                        *state = match result {
                            Ok(note) => DetailState::Loaded(Box::new(note)),
                            Err(err) => DetailState::Failed(err.to_string()),
                        };
                    }
                }
                None
            }
            AppEvent::NoteCreated(result) => match result {
                Ok(note) => {
                    if matches!(self.modal.content(), Some(Overlay::Create(_))) {
                        self.close_modal();
                    }
                    self.status = Some(StatusMessage::Info(format!("Created \"{}\"", note.title)));
                    self.invalidate_and_refetch()
                }
                Err(err) => {
                    warn!(error = %err, "Failed to create note");
                    match self.modal.content_mut() {
                        Some(Overlay::Create(form)) => form.submit_failed(err.to_string()),
                        _ => self.status = Some(StatusMessage::Error(err.to_string())),
                    }
                    None
                }
            },
            AppEvent::NoteDeleted { id, result } => {
                let confirming = matches!(
                    self.modal.content(),
                    Some(Overlay::ConfirmDelete { id: open_id, .. }) if *open_id == id
                );
                match result {
                    Ok(note) => {
                        if confirming {
                            self.close_modal();
                        }
                        self.status =
                            Some(StatusMessage::Info(format!("Deleted \"{}\"", note.title)));
                        self.invalidate_and_refetch()
                    }
                    Err(err) => {
                        warn!(error = %err, %id, "Failed to delete note");
                        if let Some(Overlay::ConfirmDelete {
                            pending, failure, ..
                        }) = self.modal.content_mut().filter(|_| confirming)
                        {
                            *pending = false;
                            *failure = Some(err.to_string());
                        } else {
                            self.status = Some(StatusMessage::Error(err.to_string()));
                        }
                        None
                    }
                }
            }
        }
    }

    fn clamp_scroll(&mut self) {
        let len = self.notes().len();
        if self.scroll.selected >= len {
            self.scroll.selected = len.saturating_sub(1);
        }
        if self.scroll.offset > self.scroll.selected {
            self.scroll.offset = self.scroll.selected;
        }
    }
}
