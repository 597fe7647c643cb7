// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Signed-in account state.
//!
//! A [`Session`] is loaded once at startup and handed to the transport. The
//! session file lives next to the client config as `session.json`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

const SESSION_FILE_NAME: &str = "session.json";

/// The account requests are made for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Owner email sent with every note request.
    pub email: String,
    /// Bearer token from the auth provider, forwarded as-is.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Session {
    pub fn new(email: &str, token: Option<String>) -> Result<Self> {
        let email = email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(Error::InvalidEmail(email.to_string()));
        }
        Ok(Session { email: email.to_string(), token })
    }
}

/// Reads and writes the persisted session.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(config_dir: &Path) -> Self {
        SessionStore { path: config_dir.join(SESSION_FILE_NAME) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the saved session, or `None` when logged out.
    pub fn load(&self) -> Result<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    /// Like [`SessionStore::load`], failing with [`Error::NotLoggedIn`].
    pub fn require(&self) -> Result<Session> {
        self.load()?.ok_or(Error::NotLoggedIn)
    }

    pub fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(session)?)?;
        Ok(())
    }

    /// Removes the saved session. Returns whether one existed.
    pub fn clear(&self) -> Result<bool> {
        if !self.path.exists() {
            return Ok(false);
        }
        fs::remove_file(&self.path)?;
        Ok(true)
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
