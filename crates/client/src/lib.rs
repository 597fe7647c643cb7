// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! nkrs - Client library for the notekeep note service.
//!
//! # Main Components
//!
//! - [`Transport`] - Note requests over HTTP, or a mock in tests
//! - [`QueryCache`] - Per-view note collections with in-flight request sharing
//! - [`Dispatcher`] - Sends note actions and invalidates the affected views
//! - [`Session`] - The signed-in account
//! - [`Accounts`] - Registration, login and password changes
//!
//! ```rust,ignore
//! use nkrs::{Dispatcher, HttpTransport, NoteAction, Page, QueryCache, Session};
//!
//! let accounts = HttpAccounts::new("http://localhost:5000", timeout)?;
//! let token = accounts.login(Credentials::new("ann@example.com", "hunter2")).await?;
//! let session = Session::new("ann@example.com", Some(token))?;
//! let transport = Arc::new(HttpTransport::new("http://localhost:5000", session, timeout)?);
//! let cache = Arc::new(QueryCache::new(transport.clone()));
//! let dispatcher = Dispatcher::new(transport, cache);
//! dispatcher.dispatch("n-1a2b3c4d", Page::Home, NoteAction::Archive).await?;
//! ```

pub mod accounts;
pub mod cache;
mod cli;
mod commands;
pub mod config;
pub mod dispatcher;
mod display;
pub mod error;
pub mod session;
#[cfg(test)]
mod test_support;
pub mod transport;

pub use accounts::{Accounts, HttpAccounts};
pub use cache::{Page, QueryCache, ViewKey};
pub use cli::{Cli, Command, OutputFormat, Targets, TodoCommand};
pub use config::Config;
pub use dispatcher::{Dispatcher, NoteAction};
pub use error::{Error, Result};
pub use session::{Session, SessionStore};
pub use transport::{HttpTransport, Transport};

use std::io::{BufRead, Write};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

use commands::App;

/// Execute a CLI command. This is the main entry point for library users
/// and provides a testable way to run commands without process execution.
pub async fn run(cli: Cli, out: &mut dyn Write) -> Result<()> {
    let config_dir = match cli.config_dir {
        Some(dir) => dir,
        None => config::config_dir()?,
    };
    let store = SessionStore::new(&config_dir);

    match cli.command {
        Command::Register { email, password } => {
            let accounts = http_accounts(&config_dir, cli.server)?;
            let password = password_or_stdin(password)?;
            commands::register(&accounts, &email, &password, out).await
        }
        Command::Login { email, password } => {
            let accounts = http_accounts(&config_dir, cli.server)?;
            let password = password_or_stdin(password)?;
            commands::login(&accounts, &store, &email, &password, out).await
        }
        Command::Passwd { current, new_password } => {
            let accounts = http_accounts(&config_dir, cli.server)?;
            commands::passwd(&accounts, &store, current, new_password, out).await
        }
        Command::Logout => commands::logout(&store, out),
        Command::Whoami => commands::whoami(&store, out),
        command => {
            let session = store.require()?;
            let config = load_config(&config_dir, cli.server)?;
            debug!("using {} as {}", config.server_url, session.email);

            let transport = HttpTransport::new(&config.server_url, session, config.timeout())?;
            let app = App::new(Arc::new(transport));
            commands::execute(&app, command, out).await
        }
    }
}

fn load_config(config_dir: &Path, server: Option<String>) -> Result<Config> {
    let mut config = Config::load(config_dir)?;
    if let Some(server) = server {
        config.server_url = server;
    }
    Ok(config)
}

fn http_accounts(config_dir: &Path, server: Option<String>) -> Result<HttpAccounts> {
    let config = load_config(config_dir, server)?;
    debug!("using {} for account requests", config.server_url);
    Ok(HttpAccounts::new(&config.server_url, config.timeout())?)
}

/// The `--password` value, or the first line of stdin.
fn password_or_stdin(password: Option<String>) -> Result<String> {
    if let Some(password) = password {
        return Ok(password);
    }
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    let password = line.trim_end_matches(['\r', '\n']).to_string();
    if password.is_empty() {
        return Err(Error::Validation("Password is required".to_string()));
    }
    Ok(password)
}
