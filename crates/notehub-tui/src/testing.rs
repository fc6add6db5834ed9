// ABOUTME: In-memory NotesApi used by unit tests
// ABOUTME: Paginates and searches like the real service, with switches for failures and stalls

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use notehub_client::{ApiError, ListParams, NewNote, Note, NoteList, NotesApi, Result, Tag};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;

#[derive(Default)]
pub struct FakeNotes {
    notes: Mutex<Vec<Note>>,
    next_id: AtomicUsize,
    list_calls: AtomicUsize,
    create_calls: AtomicUsize,
    fail_lists: AtomicBool,
    fail_creates: AtomicBool,
    list_gate: Mutex<Option<Arc<Semaphore>>>,
}

impl FakeNotes {
    pub fn with_notes(count: usize) -> Arc<Self> {
        let fake = Arc::new(Self::default());
        for i in 0..count {
            fake.insert(&format!("Note {i}"), Tag::ALL[i % Tag::ALL.len()]);
        }
        fake
    }

    pub fn insert(&self, title: &str, tag: Tag) -> Note {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let at = Utc.timestamp_opt(1_700_000_000 + id as i64, 0).unwrap();
        let note = Note {
            id: format!("note-{id}"),
            title: title.to_string(),
            content: format!("content of {title}"),
            tag,
            created_at: at,
            updated_at: at,
        };
        self.notes.lock().unwrap().push(note.clone());
        note
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn fail_lists(&self, fail: bool) {
        self.fail_lists.store(fail, Ordering::SeqCst);
    }

    pub fn fail_creates(&self, fail: bool) {
        self.fail_creates.store(fail, Ordering::SeqCst);
    }

    /// Make every list call wait for a permit on the returned semaphore
    pub fn hold_lists(&self) -> Arc<Semaphore> {
        let gate = Arc::new(Semaphore::new(0));
        *self.list_gate.lock().unwrap() = Some(gate.clone());
        gate
    }
}

#[async_trait]
impl NotesApi for FakeNotes {
    async fn list_notes(&self, params: &ListParams) -> Result<NoteList> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.list_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            if let Ok(permit) = gate.acquire().await {
                permit.forget();
            }
        }
        if self.fail_lists.load(Ordering::SeqCst) {
            return Err(ApiError::Transport("connection refused".into()));
        }

        let needle = params.search.to_lowercase();
        let notes = self.notes.lock().unwrap();
        let matching: Vec<&Note> = notes
            .iter()
            .filter(|n| {
                needle.is_empty()
                    || n.title.to_lowercase().contains(&needle)
                    || n.content.to_lowercase().contains(&needle)
            })
            .collect();

        let per_page = params.per_page.max(1) as usize;
        let start = (params.page.max(1) as usize - 1) * per_page;
        Ok(NoteList {
            notes: matching
                .iter()
                .skip(start)
                .take(per_page)
                .map(|n| (*n).clone())
                .collect(),
            total_pages: matching.len().div_ceil(per_page).max(1) as u32,
        })
    }

    async fn get_note(&self, id: &str) -> Result<Note> {
        self.notes
            .lock()
            .unwrap()
            .iter()
            .find(|n| n.id == id)
            .cloned()
            .ok_or_else(|| ApiError::Status {
                status: 404,
                message: "Note not found".into(),
            })
    }

    async fn create_note(&self, note: &NewNote) -> Result<Note> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_creates.load(Ordering::SeqCst) {
            return Err(ApiError::Status {
                status: 500,
                message: "Internal Server Error".into(),
            });
        }
        let mut created = self.insert(&note.title, note.tag);
        created.content = note.content.clone();
        if let Some(stored) = self
            .notes
            .lock()
            .unwrap()
            .iter_mut()
            .find(|n| n.id == created.id)
        {
            stored.content = note.content.clone();
        }
        Ok(created)
    }

    async fn delete_note(&self, id: &str) -> Result<Note> {
        let mut notes = self.notes.lock().unwrap();
        let pos = notes
            .iter()
            .position(|n| n.id == id)
            .ok_or_else(|| ApiError::Status {
                status: 404,
                message: "Note not found".into(),
            })?;
        Ok(notes.remove(pos))
    }
}
