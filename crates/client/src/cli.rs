// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cache::Page;

/// Parse a string that must not be empty or whitespace-only.
fn non_empty_string(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        Err("cannot be empty".to_string())
    } else {
        Ok(s.to_string())
    }
}

/// Output format for commands supporting structured output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "notekeep")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Keep notes and checklists on a notekeep server")]
pub struct Cli {
    /// Server URL (overrides the config file)
    #[arg(long, global = true, value_name = "url")]
    pub server: Option<String>,

    /// Directory holding config.toml and session.json
    #[arg(long, global = true, value_name = "path", hide = true)]
    pub config_dir: Option<PathBuf>,

    /// Log requests to stderr
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Where a status command takes notes from.
#[derive(clap::Args, Debug, Clone, PartialEq, Eq)]
pub struct Targets {
    /// Note ID(s)
    #[arg(required = true)]
    pub ids: Vec<String>,

    /// Page the notes are on (looked up per note when omitted)
    #[arg(long, value_name = "page")]
    pub from: Option<Page>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create an account on the server
    Register {
        email: String,

        /// Password (read from stdin when omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// Sign in as <email> and keep the token
    Login {
        email: String,

        /// Password (read from stdin when omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// Change the signed-in account's password
    Passwd {
        #[arg(long, value_name = "password")]
        current: String,

        #[arg(long = "new", value_name = "password", value_parser = non_empty_string)]
        new_password: String,
    },

    /// Sign out and forget the session
    Logout,

    /// Show the signed-in account
    Whoami,

    /// List notes on a page
    #[command(after_help = "\
Examples:
  notekeep list                      Home notes
  notekeep list archive              Archived notes
  notekeep list --search milk        Home notes mentioning milk")]
    List {
        /// home, archive or trash
        #[arg(default_value = "home")]
        page: Page,

        /// Case-insensitive match on title and content
        #[arg(long, short)]
        search: Option<String>,

        #[arg(long, short, value_enum, default_value_t)]
        output: OutputFormat,
    },

    /// Show one note
    Show {
        id: String,

        #[arg(long, short, value_enum, default_value_t)]
        output: OutputFormat,
    },

    /// Create a note
    #[command(after_help = "\
Examples:
  notekeep new \"Plan\" --content \"Ship it\"
  notekeep new \"Groceries\" --item Milk --item Eggs")]
    New {
        #[arg(value_parser = non_empty_string)]
        title: String,

        /// Body of a plain note
        #[arg(long, short, conflicts_with = "items")]
        content: Option<String>,

        /// Checklist item (repeatable); makes a checklist note
        #[arg(long = "item", short = 'i', value_name = "text")]
        items: Vec<String>,

        #[arg(long, short, value_enum, default_value_t)]
        output: OutputFormat,
    },

    /// Change a note's title or content
    Edit {
        id: String,

        #[arg(long, value_parser = non_empty_string)]
        title: Option<String>,

        #[arg(long, value_parser = non_empty_string)]
        content: Option<String>,
    },

    /// Archive notes (un-archives notes already archived)
    Archive(Targets),

    /// Move notes to the trash (un-trashes notes already trashed)
    Trash(Targets),

    /// Move notes back to home
    Restore(Targets),

    /// Permanently delete notes
    Delete(Targets),

    /// Edit checklist items
    Todo {
        #[command(subcommand)]
        command: TodoCommand,
    },

    /// Permanently delete everything in the trash
    EmptyTrash,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum TodoCommand {
    /// Append an item
    Add {
        id: String,
        #[arg(value_parser = non_empty_string)]
        text: String,
    },

    /// Toggle an item's completion
    Check { id: String, item: String },

    /// Replace an item's text
    Text {
        id: String,
        item: String,
        #[arg(value_parser = non_empty_string)]
        text: String,
    },

    /// Remove an item
    Remove { id: String, item: String },
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
