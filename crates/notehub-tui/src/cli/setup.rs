// ABOUTME: First-time configuration wizard.
// ABOUTME: Prompts for API URL and token, tests the connection, and saves config.toml.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use notehub_client::{ApiConfig, ApiError, ListParams, NoteHubClient, NotesApi};

use crate::config::Config;

/// Ask for a value, falling back to `default` on an empty answer
fn prompt(
    input: &mut impl BufRead,
    out: &mut impl Write,
    label: &str,
    default: Option<&str>,
) -> Result<String> {
    match default {
        Some(d) => write!(out, "{label} [{d}]: ")?,
        None => write!(out, "{label}: ")?,
    }
    out.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let answer = line.trim();

    Ok(if answer.is_empty() {
        default.unwrap_or_default().to_string()
    } else {
        answer.to_string()
    })
}

/// Collect answers on top of `existing` and return the config to save
pub(crate) fn ask(
    input: &mut impl BufRead,
    out: &mut impl Write,
    existing: &Config,
) -> Result<Config> {
    writeln!(out, "NoteHub Setup")?;
    writeln!(out, "=============\n")?;

    let base_url = prompt(input, out, "API base URL", Some(&existing.api.base_url))?;
    let token_hint = existing.api.token.as_ref().map(|_| "keep current");
    let token = prompt(input, out, "API token", token_hint)?;

    let mut config = existing.clone();
    config.api.base_url = base_url;
    if token != "keep current" {
        config.api.token = Some(token).filter(|t| !t.is_empty());
    }
    Ok(config)
}

/// Run the setup wizard
pub async fn run() -> Result<()> {
    let existing = Config::load_from(&Config::config_path()?)?;
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let config = ask(&mut stdin.lock(), &mut stdout, &existing)?;

    let api_config = config
        .api_config()
        .context("Setup needs a valid base URL and a token")?;

    // Test connection
    println!("\nTesting connection to {}...", api_config.base_url());
    check_connection(api_config).await?;

    let path = config.save().context("Failed to save configuration")?;
    println!("\nConfiguration saved to {}", path.display());
    println!("\nYou're all set! Run 'notehub' to start browsing.");

    Ok(())
}

async fn check_connection(api_config: ApiConfig) -> Result<()> {
    let client = NoteHubClient::new(api_config)?;
    match client.list_notes(&ListParams::new(1, "")).await {
        Ok(list) => {
            println!("Connected successfully!");
            println!("  {} page(s) of notes", list.total_pages);
            Ok(())
        }
        Err(e) => {
            eprintln!("\nPlease check:");
            for hint in connection_hints(&e) {
                eprintln!("  - {hint}");
            }
            Err(anyhow::Error::new(e).context("Connection failed"))
        }
    }
}

/// What to suggest after a failed connection test
fn connection_hints(err: &ApiError) -> &'static [&'static str] {
    if err.is_rejection() {
        &["Is the token valid?", "Does the URL point at the notes API?"]
    } else {
        &["Is the URL correct?", "Is the server reachable?"]
    }
}
