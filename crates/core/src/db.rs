// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! SQLite-backed note and account store.
//!
//! Every read and write is scoped by `(owner, id)`; a note that exists under
//! another owner is reported as not found. Checklist items are kept as a JSON
//! array in the `todos` column.

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use std::path::Path;

use crate::checklist::Checklist;
use crate::error::{Error, Result};
use crate::id::generate_unique_id;
use crate::note::Note;
use crate::protocol::ListFilter;
use crate::user::User;

/// SQL schema for the note store.
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS notes (
    id TEXT PRIMARY KEY,
    owner TEXT NOT NULL,
    title TEXT NOT NULL,
    content TEXT NOT NULL DEFAULT '',
    is_checklist INTEGER NOT NULL DEFAULT 0,
    todos TEXT NOT NULL DEFAULT '[]',
    status TEXT NOT NULL DEFAULT 'home'
        CHECK (status IN ('home', 'archived', 'trashed')),
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_notes_owner_status ON notes(owner, status);
CREATE INDEX IF NOT EXISTS idx_notes_owner_created ON notes(owner, created_at DESC);

CREATE TABLE IF NOT EXISTS users (
    email TEXT PRIMARY KEY,
    password_hash TEXT NOT NULL,
    created_at TEXT NOT NULL
);
"#;

const NOTE_COLUMNS: &str =
    "id, owner, title, content, is_checklist, todos, status, created_at, updated_at";

/// Parse a string value from the database, returning a rusqlite error on parse failure.
fn parse_db<T: std::str::FromStr>(
    value: &str,
    column: &str,
) -> std::result::Result<T, rusqlite::Error> {
    value.parse().map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(Error::CorruptedData(format!(
                "invalid value '{value}' in column '{column}'"
            ))),
        )
    })
}

/// Parse an RFC3339 timestamp from the database.
fn parse_timestamp(
    value: &str,
    column: &str,
) -> std::result::Result<DateTime<Utc>, rusqlite::Error> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::new(Error::CorruptedData(format!(
                    "invalid timestamp '{value}' in column '{column}'"
                ))),
            )
        })
}

/// Parse the JSON checklist column.
fn parse_todos(value: &str) -> std::result::Result<Checklist, rusqlite::Error> {
    serde_json::from_str(value).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(
            5,
            rusqlite::types::Type::Text,
            Box::new(Error::CorruptedData(format!("invalid todos: {e}"))),
        )
    })
}

/// Fixed-width UTC timestamps so that text order is time order.
fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn note_from_row(row: &Row<'_>) -> std::result::Result<Note, rusqlite::Error> {
    let todos_str: String = row.get(5)?;
    let status_str: String = row.get(6)?;
    let created_str: String = row.get(7)?;
    let updated_str: String = row.get(8)?;

    Ok(Note {
        id: row.get(0)?,
        owner: row.get(1)?,
        title: row.get(2)?,
        content: row.get(3)?,
        is_checklist: row.get(4)?,
        todos: parse_todos(&todos_str)?,
        status: parse_db(&status_str, "status")?,
        created_at: parse_timestamp(&created_str, "created_at")?,
        updated_at: parse_timestamp(&updated_str, "updated_at")?,
    })
}

/// Apply the schema to a database connection. Idempotent.
pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}

/// SQLite database connection with note store operations.
pub struct Database {
    /// The underlying SQLite connection.
    pub conn: Connection,
}

impl Database {
    /// Open a database connection at the given path, creating and migrating if needed.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA busy_timeout = 5000;",
        )?;

        let db = Database { conn };
        run_migrations(&db.conn)?;
        Ok(db)
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Database { conn };
        run_migrations(&db.conn)?;
        Ok(db)
    }

    /// Check if a note id is taken, under any owner.
    pub fn note_exists(&self, id: &str) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM notes WHERE id = ?1",
            params![id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Insert a note, assigning it a fresh id. Returns the stored note.
    ///
    /// Any id already set on `note` is replaced.
    pub fn create_note(&self, mut note: Note) -> Result<Note> {
        let mut lookup_error = None;
        note.id = generate_unique_id(&note.owner, &note.title, &note.created_at, |id| {
            match self.note_exists(id) {
                Ok(exists) => exists,
                Err(e) => {
                    lookup_error.get_or_insert(e);
                    false
                }
            }
        });
        if let Some(e) = lookup_error {
            return Err(e);
        }

        self.conn.execute(
            "INSERT INTO notes (id, owner, title, content, is_checklist, todos, status,
             created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                note.id,
                note.owner,
                note.title,
                note.content,
                note.is_checklist,
                serde_json::to_string(&note.todos)?,
                note.status.as_str(),
                format_timestamp(&note.created_at),
                format_timestamp(&note.updated_at),
            ],
        )?;
        Ok(note)
    }

    /// Get one note by owner and id.
    pub fn get_note(&self, owner: &str, id: &str) -> Result<Note> {
        let sql = format!("SELECT {NOTE_COLUMNS} FROM notes WHERE id = ?1 AND owner = ?2");
        let note = self
            .conn
            .query_row(&sql, params![id, owner], note_from_row)
            .optional()?;

        note.ok_or_else(|| Error::NotFound(id.to_string()))
    }

    /// List an owner's notes, newest first.
    ///
    /// The status filter runs in SQL. The search term is matched in Rust so
    /// case folding is Unicode-aware (SQLite's `lower` only folds ASCII).
    pub fn list_notes(&self, owner: &str, filter: &ListFilter) -> Result<Vec<Note>> {
        let mut sql = format!("SELECT {NOTE_COLUMNS} FROM notes WHERE owner = ?1");
        let mut args = vec![owner];
        if let Some(status) = filter.status {
            args.push(status.as_str());
            sql.push_str(&format!(" AND status = ?{}", args.len()));
        }
        if let Some(excluded) = filter.excluded {
            args.push(excluded.as_str());
            sql.push_str(&format!(" AND status != ?{}", args.len()));
        }
        sql.push_str(" ORDER BY created_at DESC, rowid DESC");

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(args), note_from_row)?;
        let notes = rows.collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(match &filter.search {
            Some(term) => notes.into_iter().filter(|n| n.matches_search(term)).collect(),
            None => notes,
        })
    }

    /// Overwrite a stored note's mutable fields, scoped by owner and id.
    pub fn update_note(&self, note: &Note) -> Result<()> {
        let affected = self.conn.execute(
            "UPDATE notes SET title = ?1, content = ?2, is_checklist = ?3, todos = ?4,
             status = ?5, updated_at = ?6
             WHERE id = ?7 AND owner = ?8",
            params![
                note.title,
                note.content,
                note.is_checklist,
                serde_json::to_string(&note.todos)?,
                note.status.as_str(),
                format_timestamp(&note.updated_at),
                note.id,
                note.owner,
            ],
        )?;

        if affected == 0 {
            return Err(Error::NotFound(note.id.clone()));
        }
        Ok(())
    }

    /// Permanently remove a note.
    pub fn delete_note(&self, owner: &str, id: &str) -> Result<()> {
        let affected = self.conn.execute(
            "DELETE FROM notes WHERE id = ?1 AND owner = ?2",
            params![id, owner],
        )?;

        if affected == 0 {
            return Err(Error::NotFound(id.to_string()));
        }
        Ok(())
    }
}

impl Database {
    pub fn user_exists(&self, email: &str) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM users WHERE email = ?1",
            params![email],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Insert an account. Fails with [`Error::Conflict`] if the email is taken.
    pub fn create_user(&self, user: &User) -> Result<()> {
        if self.user_exists(&user.email)? {
            return Err(Error::Conflict(user.email.clone()));
        }
        self.conn.execute(
            "INSERT INTO users (email, password_hash, created_at) VALUES (?1, ?2, ?3)",
            params![user.email, user.password_hash, format_timestamp(&user.created_at)],
        )?;
        Ok(())
    }

    pub fn get_user(&self, email: &str) -> Result<User> {
        let user = self
            .conn
            .query_row(
                "SELECT email, password_hash, created_at FROM users WHERE email = ?1",
                params![email],
                |row| {
                    let created_str: String = row.get(2)?;
                    Ok(User {
                        email: row.get(0)?,
                        password_hash: row.get(1)?,
                        created_at: parse_timestamp(&created_str, "created_at")?,
                    })
                },
            )
            .optional()?;

        user.ok_or_else(|| Error::UserNotFound(email.to_string()))
    }

    /// Replace an account's password hash.
    pub fn set_password_hash(&self, email: &str, password_hash: &str) -> Result<()> {
        let affected = self.conn.execute(
            "UPDATE users SET password_hash = ?1 WHERE email = ?2",
            params![password_hash, email],
        )?;

        if affected == 0 {
            return Err(Error::UserNotFound(email.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "db_tests.rs"]
mod tests;
