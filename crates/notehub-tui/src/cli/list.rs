// ABOUTME: List command implementation.
// ABOUTME: Prints one page of notes, optionally filtered by a search term.

use std::io::Write;

use anyhow::{Context, Result};
use notehub_client::{ListParams, NotesApi};

use super::note_line;

pub async fn run(
    api: &dyn NotesApi,
    page: u32,
    search: &str,
    json: bool,
    out: &mut impl Write,
) -> Result<()> {
    let params = ListParams::new(page, search.trim());
    let list = api
        .list_notes(&params)
        .await
        .context("Failed to fetch notes")?;

    if json {
        serde_json::to_writer_pretty(&mut *out, &list)?;
        writeln!(out)?;
        return Ok(());
    }

    if list.notes.is_empty() {
        if params.search.is_empty() {
            writeln!(out, "No notes.")?;
        } else {
            writeln!(out, "No notes match \"{}\".", params.search)?;
        }
        return Ok(());
    }

    for note in &list.notes {
        writeln!(out, "{}", note_line(note))?;
    }
    writeln!(out, "\nPage {} of {}", params.page, list.total_pages.max(1))?;
    Ok(())
}
