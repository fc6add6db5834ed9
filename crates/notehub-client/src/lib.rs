// ABOUTME: NoteHub API client library shared by the TUI and CLI commands
// ABOUTME: Provides configuration, typed models, and the NotesApi trait

mod client;
mod config;
mod error;
mod models;

pub use client::{NoteHubClient, NotesApi};
pub use config::{ApiConfig, DEFAULT_BASE_URL};
pub use error::{ApiError, Result};
pub use models::*;
