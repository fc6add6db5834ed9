// ABOUTME: Core view types for notehub-tui
// ABOUTME: Focus, list view state, status messages, and the overlays hosted by the modal

use crate::form::NoteForm;
use crate::modal::ModalSize;
use notehub_client::Note;

/// Which part of the main screen receives keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Search,
    List,
}

/// What the notes list shows for the current query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotesState {
    /// No data of any kind yet
    Loading,
    /// Fetch failed and nothing is displayable
    Error(String),
    /// Successful fetch with zero notes
    Empty,
    /// One or more notes
    Populated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    Info(String),
    Error(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Loading,
    Loaded(Box<Note>),
    Failed(String),
}

/// Content hosted by the modal shell
pub enum Overlay {
    Create(NoteForm),
    Detail {
        id: String,
        state: DetailState,
    },
    ConfirmDelete {
        id: String,
        title: String,
        pending: bool,
        failure: Option<String>,
    },
}

impl Overlay {
    pub fn size(&self) -> ModalSize {
        match self {
            Overlay::Create(_) => ModalSize::new(70, 80),
            Overlay::Detail { .. } => ModalSize::new(70, 70),
            Overlay::ConfirmDelete { .. } => ModalSize::new(50, 30),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Overlay::Create(_) => " New note ",
            Overlay::Detail { .. } => " Note ",
            Overlay::ConfirmDelete { .. } => " Delete note ",
        }
    }
}
