// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Note lifecycle: the three visible statuses and the actions that move
//! a note between them.
//!
//! Storage keeps a single [`Status`] column. The wire format exposes the pair
//! `(isArchived, isTrashed)`; [`Status::flags`] and [`Status::from_flags`] are
//! the only conversions between the two, so the "both true" pair can never be
//! produced and is rejected on input.
//!
//! Transition table (current status x requested action):
//!
//! | current  | archive  | trash   | restore |
//! |----------|----------|---------|---------|
//! | home     | archived | trashed | home    |
//! | archived | home     | trashed | home    |
//! | trashed  | archived | home    | home    |
//!
//! Archive and trash toggle when invoked from the status they represent and
//! move laterally when invoked from the other special status. Restore always
//! lands on home. Deletion is not a status; it removes the note from the store.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Where a note is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Active note, shown on the home page. Initial state.
    #[default]
    Home,
    /// Hidden from home, shown in the archive.
    Archived,
    /// Shown in the trash; the next stop is permanent deletion.
    Trashed,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Home, Status::Archived, Status::Trashed];

    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Home => "home",
            Status::Archived => "archived",
            Status::Trashed => "trashed",
        }
    }

    /// Returns the `(is_archived, is_trashed)` pair written to the wire.
    pub fn flags(self) -> (bool, bool) {
        match self {
            Status::Home => (false, false),
            Status::Archived => (true, false),
            Status::Trashed => (false, true),
        }
    }

    /// Converts a raw flag pair back into a status.
    ///
    /// Fails with a validation error when both flags are set.
    pub fn from_flags(is_archived: bool, is_trashed: bool) -> Result<Self> {
        match (is_archived, is_trashed) {
            (false, false) => Ok(Status::Home),
            (true, false) => Ok(Status::Archived),
            (false, true) => Ok(Status::Trashed),
            (true, true) => Err(Error::validation(
                "a note cannot be archived and trashed at the same time",
            )),
        }
    }

    /// Returns the status produced by applying `action` to this status.
    pub fn apply(self, action: StatusAction) -> Status {
        match (self, action) {
            (_, StatusAction::Restore) => Status::Home,
            (Status::Archived, StatusAction::Archive) => Status::Home,
            (Status::Trashed, StatusAction::Trash) => Status::Home,
            (_, StatusAction::Archive) => Status::Archived,
            (_, StatusAction::Trash) => Status::Trashed,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Status {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "home" => Ok(Status::Home),
            "archived" | "archive" => Ok(Status::Archived),
            "trashed" | "trash" => Ok(Status::Trashed),
            _ => Err(Error::InvalidStatus(s.to_string())),
        }
    }
}

/// A requested status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusAction {
    /// Archive, or un-archive an archived note.
    Archive,
    /// Trash, or un-trash a trashed note.
    Trash,
    /// Back to home from anywhere.
    Restore,
}

impl StatusAction {
    /// Returns the string representation used on the wire and in display.
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusAction::Archive => "archive",
            StatusAction::Trash => "trash",
            StatusAction::Restore => "restore",
        }
    }
}

impl fmt::Display for StatusAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for StatusAction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "archive" => Ok(StatusAction::Archive),
            "trash" => Ok(StatusAction::Trash),
            "restore" => Ok(StatusAction::Restore),
            _ => Err(Error::InvalidAction(s.to_string())),
        }
    }
}

/// Resolves the status a note should end up in after an update.
///
/// `action` is the public contract. Raw flags are the legacy form: a flag
/// missing from the request keeps its current value. Supplying both forms
/// at once is rejected.
pub fn resolve(
    current: Status,
    action: Option<StatusAction>,
    is_archived: Option<bool>,
    is_trashed: Option<bool>,
) -> Result<Status> {
    match (action, is_archived, is_trashed) {
        (Some(_), Some(_), _) | (Some(_), _, Some(_)) => Err(Error::validation(
            "status action cannot be combined with isArchived/isTrashed",
        )),
        (Some(action), None, None) => Ok(current.apply(action)),
        (None, None, None) => Ok(current),
        (None, archived, trashed) => {
            let (cur_archived, cur_trashed) = current.flags();
            Status::from_flags(
                archived.unwrap_or(cur_archived),
                trashed.unwrap_or(cur_trashed),
            )
        }
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
