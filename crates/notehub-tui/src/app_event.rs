// ABOUTME: Defines the AppEvent enum for results coming back from background tasks.
// ABOUTME: Every network outcome reaches the event loop through this enum.

use crate::query::{QueryKey, QueryResult};
use notehub_client::{ApiError, Note};

#[derive(Debug)]
pub enum AppEvent {
    /// A list query finished; applied only if `key` is still current and no
    /// invalidation happened after `generation` was read
    NotesLoaded {
        key: QueryKey,
        generation: u64,
        result: QueryResult,
    },
    NoteLoaded {
        id: String,
        result: Result<Note, ApiError>,
    },
    NoteCreated(Result<Note, ApiError>),
    NoteDeleted {
        id: String,
        result: Result<Note, ApiError>,
    },
}
