// ABOUTME: Main event loop for the notes browser
// ABOUTME: Multiplexes terminal input, background results, and the search debounce timer

use crate::app::{Action, App};
use crate::app_event::AppEvent;
use crate::error::Result;
use crate::query::QueryCache;
use crate::tui::event::TuiEvent;
use crate::tui::Tui;
use crate::ui;
use notehub_client::NotesApi;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tokio_stream::StreamExt;

/// Spawns the async work behind each `Action` and reports back over a channel
#[derive(Clone)]
pub struct Dispatcher {
    api: Arc<dyn NotesApi>,
    cache: QueryCache,
    tx: mpsc::UnboundedSender<AppEvent>,
}

impl Dispatcher {
    pub fn new(
        api: Arc<dyn NotesApi>,
        cache: QueryCache,
        tx: mpsc::UnboundedSender<AppEvent>,
    ) -> Self {
        Self { api, cache, tx }
    }

    /// Start the work for `action`. Returns false for `Quit`.
    pub fn dispatch(&self, action: Action) -> bool {
        let tx = self.tx.clone();
        match action {
            Action::Quit => return false,
            Action::FetchNotes(key) => {
                let cache = self.cache.clone();
                let generation = cache.generation();
                tokio::spawn(async move {
                    let result = cache.resolve(key.clone()).await;
                    let _ = tx.send(AppEvent::NotesLoaded {
                        key,
                        generation,
                        result,
                    });
                });
            }
            Action::LoadNote(id) => {
                let api = self.api.clone();
                tokio::spawn(async move {
                    let result = api.get_note(&id).await;
                    let _ = tx.send(AppEvent::NoteLoaded { id, result });
                });
            }
            Action::CreateNote(note) => {
                let api = self.api.clone();
                tokio::spawn(async move {
                    let result = api.create_note(&note).await;
                    let _ = tx.send(AppEvent::NoteCreated(result));
                });
            }
            Action::DeleteNote(id) => {
                let api = self.api.clone();
                tokio::spawn(async move {
                    let result = api.delete_note(&id).await;
                    let _ = tx.send(AppEvent::NoteDeleted { id, result });
                });
            }
        }
        true
    }
}

/// Sleep until the debounce deadline, or forever when nothing is pending
async fn wait_for_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(at.into()).await,
        None => std::future::pending().await,
    }
}

/// Take over the terminal and browse notes until the user quits
pub async fn run_browser(api: Arc<dyn NotesApi>) -> Result<()> {
    let mut tui = Tui::new()?;
    let (tx, mut rx) = mpsc::unbounded_channel();

    let cache = QueryCache::new(api.clone());
    let dispatcher = Dispatcher::new(api, cache.clone(), tx);
    let mut app = App::new(cache);

    let size = tui.size()?;
    app.resize(size.width, size.height);

    if let Some(action) = app.start() {
        dispatcher.dispatch(action);
    }

    let mut events = tui.event_stream();

    loop {
        tui.terminal_mut().draw(|frame| ui::render(frame, &app))?;

        let deadline = app.search_deadline();
        let action = tokio::select! {
            Some(event) = rx.recv() => app.handle_event(event),
            Some(event) = events.next() => match event {
                TuiEvent::Key(key) => app.handle_key(key),
                TuiEvent::Mouse(mouse) => app.handle_mouse(mouse),
                TuiEvent::Resize(w, h) => {
                    app.resize(w, h);
                    None
                }
                TuiEvent::Tick => {
                    app.tick();
                    None
                }
            },
            _ = wait_for_deadline(deadline) => app.flush_search(Instant::now()),
        };

        if let Some(action) = action {
            tracing::debug!(?action, "Dispatching");
            if !dispatcher.dispatch(action) {
                break;
            }
        }
    }

    tui.restore()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::QueryKey;
    use crate::testing::FakeNotes;
    use notehub_client::{NewNote, Tag};
    use std::time::Duration;

    fn dispatcher(api: &Arc<FakeNotes>) -> (Dispatcher, mpsc::UnboundedReceiver<AppEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let cache = QueryCache::new(api.clone());
        (Dispatcher::new(api.clone(), cache, tx), rx)
    }

    #[tokio::test]
    async fn test_fetch_reports_loaded_key() {
        let api = FakeNotes::with_notes(3);
        let (d, mut rx) = dispatcher(&api);
        assert!(d.dispatch(Action::FetchNotes(QueryKey::new(1, ""))));

        match rx.recv().await {
            Some(AppEvent::NotesLoaded {
                key,
                generation,
                result,
            }) => {
                assert_eq!(key, QueryKey::new(1, ""));
                assert_eq!(generation, 0);
                assert_eq!(result.unwrap().notes.len(), 3);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_reports_result() {
        let api = FakeNotes::with_notes(0);
        let (d, mut rx) = dispatcher(&api);
        d.dispatch(Action::CreateNote(NewNote {
            title: "Buy milk".into(),
            content: String::new(),
            tag: Tag::Shopping,
        }));

        match rx.recv().await {
            Some(AppEvent::NoteCreated(Ok(note))) => assert_eq!(note.title, "Buy milk"),
            other => panic!("unexpected event: {other:?}"),
        }
        assert_eq!(api.create_calls(), 1);
    }

    #[tokio::test]
    async fn test_fetch_tagged_with_generation_at_dispatch() {
        let api = FakeNotes::with_notes(3);
        let (tx, mut rx) = mpsc::unbounded_channel();
        let cache = QueryCache::new(api.clone());
        let d = Dispatcher::new(api.clone(), cache.clone(), tx);

        cache.invalidate_all();
        d.dispatch(Action::FetchNotes(QueryKey::default()));
        match rx.recv().await {
            Some(AppEvent::NotesLoaded { generation, .. }) => assert_eq!(generation, 1),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_quit_stops_loop() {
        let api = FakeNotes::with_notes(0);
        let (d, mut rx) = dispatcher(&api);
        assert!(!d.dispatch(Action::Quit));
        drop(d);
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_deadline_wait() {
        let start = Instant::now();
        wait_for_deadline(Some(start + Duration::from_millis(20))).await;
        assert!(start.elapsed() >= Duration::from_millis(20));

        let never = tokio::time::timeout(Duration::from_millis(20), wait_for_deadline(None)).await;
        assert!(never.is_err());
    }
}
