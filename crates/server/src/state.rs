// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Server state management.
//!
//! Wraps the note database, the password hasher and the token issuer for
//! shared access from request handlers.

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::warn;

use nk_core::Database;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::hasher::{Argon2Hasher, Hasher};
use crate::token::TokenIssuer;

/// Shared server state.
#[derive(Clone)]
pub struct ServerState {
    inner: Arc<ServerStateInner>,
}

struct ServerStateInner {
    /// The note database. Every request holds the lock for its whole store call.
    db: Mutex<Database>,
    hasher: Arc<dyn Hasher>,
    tokens: TokenIssuer,
    require_token: bool,
    started_at: Instant,
}

impl ServerState {
    pub fn new(db: Database, hasher: Arc<dyn Hasher>, tokens: TokenIssuer, require_token: bool) -> Self {
        ServerState {
            inner: Arc::new(ServerStateInner {
                db: Mutex::new(db),
                hasher,
                tokens,
                require_token,
                started_at: Instant::now(),
            }),
        }
    }

    /// Opens `notes.db` in the configured data directory.
    pub fn open(config: &Config) -> Result<Self> {
        let db = Database::open(&config.data_dir.join("notes.db"))?;
        let hasher = Argon2Hasher::from_config(&config.hasher)?;
        let tokens = match &config.token_secret {
            Some(secret) => TokenIssuer::from_secret(secret.as_bytes(), config.token_ttl())?,
            None => {
                warn!("no token_secret configured; tokens will not survive a restart");
                TokenIssuer::random(config.token_ttl())?
            }
        };
        Ok(Self::new(db, Arc::new(hasher), tokens, config.require_token))
    }

    /// Runs `f` with exclusive access to the database.
    pub async fn with_db<T>(&self, f: impl FnOnce(&Database) -> nk_core::Result<T>) -> nk_core::Result<T> {
        let db = self.inner.db.lock().await;
        f(&db)
    }

    pub fn tokens(&self) -> &TokenIssuer {
        &self.inner.tokens
    }

    pub fn require_token(&self) -> bool {
        self.inner.require_token
    }

    /// Hashes on the blocking pool.
    pub async fn hash_password(&self, password: String) -> Result<String> {
        let hasher = Arc::clone(&self.inner.hasher);
        tokio::task::spawn_blocking(move || hasher.generate_hash(&password))
            .await
            .map_err(|e| Error::Hash(e.to_string()))?
    }

    pub async fn check_password(&self, hash: String, password: String) -> Result<bool> {
        let hasher = Arc::clone(&self.inner.hasher);
        tokio::task::spawn_blocking(move || hasher.check_hash(&hash, &password))
            .await
            .map_err(|e| Error::Hash(e.to_string()))
    }

    /// Time since the state was created.
    pub fn uptime(&self) -> Duration {
        self.inner.started_at.elapsed()
    }
}
