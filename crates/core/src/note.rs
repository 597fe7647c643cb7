// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The note entity and its wire representation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::checklist::Checklist;
use crate::error::Error;
use crate::status::Status;

/// A plain or checklist note owned by one account.
///
/// Serializes through [`NoteRecord`], which carries the status as the
/// `isArchived`/`isTrashed` flag pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "NoteRecord", try_from = "NoteRecord")]
pub struct Note {
    /// Store-assigned identifier.
    pub id: String,
    /// Account the note belongs to (email).
    pub owner: String,
    pub title: String,
    /// Body text. Empty for checklist notes.
    pub content: String,
    /// Selects `todos` over `content`.
    pub is_checklist: bool,
    /// Empty for plain notes.
    pub todos: Checklist,
    pub status: Status,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Creates a home-status note stamped with `created_at`.
    pub fn new(
        id: String,
        owner: String,
        title: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Note {
            id,
            owner,
            title,
            content: String::new(),
            is_checklist: false,
            todos: Checklist::new(),
            status: Status::Home,
            created_at,
            updated_at: created_at,
        }
    }

    pub fn is_archived(&self) -> bool {
        self.status == Status::Archived
    }

    pub fn is_trashed(&self) -> bool {
        self.status == Status::Trashed
    }

    /// True when the field selected by `is_checklist` holds something.
    pub fn has_body(&self) -> bool {
        if self.is_checklist {
            !self.todos.is_empty()
        } else {
            !self.content.trim().is_empty()
        }
    }

    /// Case-insensitive substring match over title and content.
    ///
    /// Checklist item text is deliberately not searched.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.title.to_lowercase().contains(&term) || self.content.to_lowercase().contains(&term)
    }
}

/// JSON shape of a note on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteRecord {
    pub id: String,
    #[serde(alias = "email")]
    pub owner: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, alias = "isTodo")]
    pub is_checklist: bool,
    #[serde(default)]
    pub todos: Checklist,
    #[serde(default)]
    pub is_archived: bool,
    #[serde(default)]
    pub is_trashed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Note> for NoteRecord {
    fn from(note: Note) -> Self {
        let (is_archived, is_trashed) = note.status.flags();
        NoteRecord {
            id: note.id,
            owner: note.owner,
            title: note.title,
            content: note.content,
            is_checklist: note.is_checklist,
            todos: note.todos,
            is_archived,
            is_trashed,
            created_at: note.created_at,
            updated_at: note.updated_at,
        }
    }
}

impl TryFrom<NoteRecord> for Note {
    type Error = Error;

    fn try_from(record: NoteRecord) -> Result<Self, Self::Error> {
        Ok(Note {
            status: Status::from_flags(record.is_archived, record.is_trashed)?,
            id: record.id,
            owner: record.owner,
            title: record.title,
            content: record.content,
            is_checklist: record.is_checklist,
            todos: record.todos,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }
}

#[cfg(test)]
#[path = "note_tests.rs"]
mod tests;
