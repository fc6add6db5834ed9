// ABOUTME: Show command implementation.
// ABOUTME: Prints a single note with its metadata.

use std::io::Write;

use anyhow::{Context, Result};
use notehub_client::NotesApi;

pub async fn run(api: &dyn NotesApi, id: &str, json: bool, out: &mut impl Write) -> Result<()> {
    let note = api
        .get_note(id)
        .await
        .with_context(|| format!("Failed to fetch note {id}"))?;

    if json {
        serde_json::to_writer_pretty(&mut *out, &note)?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(out, "{}", note.title)?;
    writeln!(out, "Tag:     {}", note.tag)?;
    writeln!(out, "Created: {}", note.created_at.format("%Y-%m-%d %H:%M"))?;
    writeln!(out, "Updated: {}", note.updated_at.format("%Y-%m-%d %H:%M"))?;
    if !note.content.is_empty() {
        writeln!(out, "\n{}", note.content)?;
    }
    Ok(())
}
