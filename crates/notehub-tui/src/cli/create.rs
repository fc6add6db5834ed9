// ABOUTME: Create command implementation.
// ABOUTME: Validates with the same rules as the form before sending anything.

use std::io::Write;

use anyhow::{Context, Result};
use notehub_client::NotesApi;

use crate::error::AppError;
use crate::form::{validate, Field, FormValues};

pub async fn run(api: &dyn NotesApi, values: FormValues, out: &mut impl Write) -> Result<()> {
    let note = match validate(&values) {
        Ok(note) => note,
        Err(errors) => {
            let problems: Vec<String> = [Field::Title, Field::Content, Field::Tag]
                .into_iter()
                .filter_map(|field| errors.get(field).map(|msg| format!("{field}: {msg}")))
                .collect();
            return Err(AppError::Validation(problems.join("; ")).into());
        }
    };

    let created = api
        .create_note(&note)
        .await
        .context("Failed to create note")?;
    tracing::info!(id = %created.id, "Created note");
    writeln!(out, "Created {} ({})", created.title, created.id)?;
    Ok(())
}
