// ABOUTME: Delete command implementation.

use std::io::Write;

use anyhow::{Context, Result};
use notehub_client::NotesApi;

pub async fn run(api: &dyn NotesApi, id: &str, out: &mut impl Write) -> Result<()> {
    let deleted = api
        .delete_note(id)
        .await
        .with_context(|| format!("Failed to delete note {id}"))?;
    tracing::info!(id = %deleted.id, "Deleted note");
    writeln!(out, "Deleted {} ({})", deleted.title, deleted.id)?;
    Ok(())
}
