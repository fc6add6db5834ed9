// ABOUTME: Entry point for the notehub binary
// ABOUTME: Parses CLI args, resolves config, then opens the browser or runs a subcommand

use std::io;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use notehub_client::{NoteHubClient, NotesApi};
use notehub_tui::cli::{self, Cli, Command};
use notehub_tui::config::Config;
use notehub_tui::form::FormValues;

#[tokio::main]
async fn main() -> Result<()> {
    // .env must be in the environment before clap reads NOTEHUB_* vars
    let _ = dotenvy::dotenv();
    let args = Cli::parse();

    match &args.command {
        None => notehub_log::init_file("notehub"),
        Some(_) => notehub_log::init(),
    }

    let overrides = args.overrides();
    let command = match args.command {
        Some(Command::Setup) => return cli::setup::run().await,
        other => other,
    };

    let config = Config::load(&overrides)?;
    let api_config = config.api_config()?;
    let client = NoteHubClient::new(api_config).context("Failed to create API client")?;
    let api: Arc<dyn NotesApi> = Arc::new(client);

    let mut stdout = io::stdout();
    match command {
        None => notehub_tui::run_browser(api).await?,
        Some(Command::List { page, search, json }) => {
            cli::list::run(api.as_ref(), page, &search, json, &mut stdout).await?
        }
        Some(Command::Show { id, json }) => {
            cli::show::run(api.as_ref(), &id, json, &mut stdout).await?
        }
        Some(Command::Create {
            title,
            content,
            tag,
        }) => {
            let values = FormValues {
                title,
                content,
                tag,
            };
            cli::create::run(api.as_ref(), values, &mut stdout).await?
        }
        Some(Command::Delete { id }) => cli::delete::run(api.as_ref(), &id, &mut stdout).await?,
        Some(Command::Setup) => {}
    }

    Ok(())
}
