// ABOUTME: Authenticated HTTP access to the NoteHub notes endpoints
// ABOUTME: NotesApi is the seam the TUI depends on; NoteHubClient is the reqwest implementation

use crate::config::ApiConfig;
use crate::error::{ApiError, Result};
use crate::models::{ListParams, NewNote, Note, NoteList};
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

/// Operations offered by the remote notes service
#[async_trait]
pub trait NotesApi: Send + Sync {
    /// GET /notes?page&perPage&search
    async fn list_notes(&self, params: &ListParams) -> Result<NoteList>;

    /// GET /notes/{id}
    async fn get_note(&self, id: &str) -> Result<Note>;

    /// POST /notes
    async fn create_note(&self, note: &NewNote) -> Result<Note>;

    /// DELETE /notes/{id}
    async fn delete_note(&self, id: &str) -> Result<Note>;
}

/// reqwest-backed NotesApi
#[derive(Clone)]
pub struct NoteHubClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl NoteHubClient {
    pub fn new(config: ApiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("notehub/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Config(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { http, config })
    }

    /// Append path segments to the base URL, percent-encoding each one
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.config.base_url().clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::Config("Base URL cannot carry a path".into()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder> {
        let url = self.endpoint(segments)?;
        debug!(%method, %url, "NoteHub request");
        Ok(self
            .http
            .request(method, url)
            .bearer_auth(self.config.token()))
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let resp = request.send().await?;
        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let message = rejection_message(&body)
                .or_else(|| status.canonical_reason().map(str::to_string))
                .unwrap_or_else(|| "request failed".to_string());
            warn!(status = status.as_u16(), %message, "NoteHub rejected request");
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        resp.json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Pull a human-readable message out of an error body
fn rejection_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => value
            .get("message")
            .or_else(|| value.get("error"))
            .and_then(|m| m.as_str())
            .map(str::to_string),
        Err(_) => Some(body.chars().take(200).collect()),
    }
}

#[async_trait]
impl NotesApi for NoteHubClient {
    async fn list_notes(&self, params: &ListParams) -> Result<NoteList> {
        let request = self.request(Method::GET, &["notes"])?.query(params);
        let list: NoteList = self.send(request).await?;
        debug!(
            page = params.page,
            search = %params.search,
            count = list.notes.len(),
            total_pages = list.total_pages,
            "Fetched notes"
        );
        Ok(list)
    }

    async fn get_note(&self, id: &str) -> Result<Note> {
        let request = self.request(Method::GET, &["notes", id])?;
        self.send(request).await
    }

    async fn create_note(&self, note: &NewNote) -> Result<Note> {
        let request = self.request(Method::POST, &["notes"])?.json(note);
        let created: Note = self.send(request).await?;
        debug!(id = %created.id, "Created note");
        Ok(created)
    }

    async fn delete_note(&self, id: &str) -> Result<Note> {
        let request = self.request(Method::DELETE, &["notes", id])?;
        let deleted: Note = self.send(request).await?;
        debug!(id = %deleted.id, "Deleted note");
        Ok(deleted)
    }
}
