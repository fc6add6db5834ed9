// ABOUTME: CLI command definitions using clap.
// ABOUTME: Handles non-interactive subcommands: list, show, create, delete, setup.

pub mod create;
pub mod delete;
pub mod list;
pub mod setup;
pub mod show;

use crate::config::Overrides;
use clap::{Parser, Subcommand};
use notehub_client::Note;

#[derive(Parser, Debug)]
#[command(
    name = "notehub",
    version,
    about = "NoteHub - browse, search, and create notes from the terminal"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// API base URL override
    #[arg(long, global = true, env = "NOTEHUB_BASE_URL")]
    pub base_url: Option<String>,

    /// API token override
    #[arg(long, global = true, env = "NOTEHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            base_url: self.base_url.clone(),
            token: self.token.clone(),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Interactive setup wizard
    Setup,
    /// List one page of notes
    List {
        /// Page number, starting at 1
        #[arg(short, long, default_value_t = 1)]
        page: u32,
        /// Only notes whose title or content matches
        #[arg(short, long, default_value = "")]
        search: String,
        /// Print the raw page as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a single note
    Show {
        id: String,
        /// Print the note as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create a note
    Create {
        #[arg(short, long)]
        title: String,
        #[arg(short, long, default_value = "")]
        content: String,
        /// One of Todo, Work, Personal, Meeting, Shopping
        #[arg(long, default_value = "Todo")]
        tag: String,
    },
    /// Delete a note
    Delete { id: String },
}

/// One-line summary used by list output
pub(crate) fn note_line(note: &Note) -> String {
    format!(
        "{:<12} {:<9} {}",
        note.id,
        note.tag.as_str(),
        note.title
    )
}
