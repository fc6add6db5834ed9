// ABOUTME: Library interface for notehub-tui.
// ABOUTME: Exposes the notes browser runner, configuration, and CLI commands for the notehub binary.

pub mod app;
pub mod app_event;
pub mod cli;
pub mod config;
pub mod debounce;
pub mod error;
pub mod form;
pub mod modal;
pub mod pagination;
pub mod query;
pub mod run;
pub mod types;
mod tui;
mod ui;

#[cfg(test)]
mod testing;

pub use run::run_browser;
