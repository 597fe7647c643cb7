// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Note operations behind the HTTP routes.
//!
//! Each function validates its input completely before touching the store,
//! so a rejected request never leaves a partial write behind. The current
//! time is passed in by the caller.

use chrono::{DateTime, Utc};
use tracing::debug;

use nk_core::protocol::{CreateNoteRequest, ListFilter};
use nk_core::{status, Checklist, Database, Error, Note, NotePatch, Result, Status};

/// Creates a note in the home view and returns it with its assigned id.
/// The owner must be a registered account.
pub fn create_note(
    db: &Database,
    owner: &str,
    request: CreateNoteRequest,
    now: DateTime<Utc>,
) -> Result<Note> {
    if !db.user_exists(owner)? {
        return Err(Error::UserNotFound(owner.to_string()));
    }

    let title = request.title.trim();
    if title.is_empty() {
        return Err(Error::validation("Title is required"));
    }

    let todos = if request.is_checklist {
        let todos = request.todos.fill_missing_ids();
        todos.validate(true)?;
        todos
    } else {
        Checklist::new()
    };
    if todos.is_empty() && request.content.trim().is_empty() {
        return Err(Error::validation("Title and content/todos are required"));
    }

    let mut note = Note::new(String::new(), owner.to_string(), title.to_string(), now);
    // A checklist request without items keeps its body as a plain note.
    if todos.is_empty() {
        note.content = request.content;
    } else {
        note.is_checklist = true;
        note.todos = todos;
    }

    let note = db.create_note(note)?;
    debug!(id = %note.id, owner, "note created");
    Ok(note)
}

/// Lists the owner's notes matching `filter`, newest first.
pub fn list_notes(db: &Database, owner: &str, filter: &ListFilter) -> Result<Vec<Note>> {
    db.list_notes(owner, filter)
}

pub fn get_note(db: &Database, owner: &str, id: &str) -> Result<Note> {
    db.get_note(owner, id)
}

/// Applies a partial update and returns the stored note.
///
/// Present fields replace the stored ones. A note keeps its kind once it has
/// a body: content goes only to plain notes and todos only to checklist
/// notes. Status moves go through the transition table or, for legacy
/// clients, the raw flag pair. `updated_at` is always stamped.
pub fn update_note(
    db: &Database,
    owner: &str,
    id: &str,
    patch: NotePatch,
    now: DateTime<Utc>,
) -> Result<Note> {
    let mut note = db.get_note(owner, id)?;

    if let Some(title) = patch.title {
        if title.trim().is_empty() {
            return Err(Error::validation("Title cannot be empty"));
        }
        note.title = title;
    }
    if let Some(is_checklist) = patch.is_checklist {
        if is_checklist != note.is_checklist && note.has_body() {
            return Err(Error::validation("Cannot change the type of a note that has content"));
        }
        note.is_checklist = is_checklist;
    }
    if let Some(content) = patch.content {
        if note.is_checklist {
            return Err(Error::validation("Checklist notes have no content"));
        }
        if content.trim().is_empty() {
            return Err(Error::validation("Content cannot be empty"));
        }
        note.content = content;
    }
    if let Some(todos) = patch.todos {
        if !note.is_checklist {
            return Err(Error::validation("Plain notes have no todo items"));
        }
        note.todos = todos.fill_missing_ids();
    }
    note.todos.validate(note.is_checklist)?;
    if !note.has_body() {
        return Err(Error::validation("Title and content/todos are required"));
    }

    note.status = status::resolve(note.status, patch.action, patch.is_archived, patch.is_trashed)?;
    let (archived, trashed) = note.status.flags();
    Status::from_flags(archived, trashed)?;

    note.updated_at = now;
    db.update_note(&note)?;
    debug!(id, owner, status = %note.status, "note updated");
    Ok(note)
}

pub fn delete_note(db: &Database, owner: &str, id: &str) -> Result<()> {
    db.delete_note(owner, id)?;
    debug!(id, owner, "note deleted");
    Ok(())
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
