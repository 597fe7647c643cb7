// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for nk-core operations.

use thiserror::Error;

/// All possible errors that can occur in nk-core operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Bad input shape: empty title, malformed checklist item, illegal flags.
    #[error("{0}")]
    Validation(String),

    #[error("note not found: {0}")]
    NotFound(String),

    #[error("User not found")]
    UserNotFound(String),

    /// An account already exists for the email.
    #[error("user already exists: {0}")]
    Conflict(String),

    #[error("invalid status: '{0}'\n  hint: valid statuses are: home, archived, trashed")]
    InvalidStatus(String),

    #[error("invalid action: '{0}'\n  hint: valid actions are: archive, trash, restore")]
    InvalidAction(String),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("corrupted data: {0}")]
    CorruptedData(String),
}

/// Coarse classification used at the API boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
    Store,
}

impl Error {
    /// Shorthand for a [`Error::Validation`] with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation(message.into())
    }

    /// Classifies this error into the API error taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validation(_) | Error::InvalidStatus(_) | Error::InvalidAction(_) => {
                ErrorKind::Validation
            }
            Error::NotFound(_) | Error::UserNotFound(_) => ErrorKind::NotFound,
            Error::Conflict(_) => ErrorKind::Conflict,
            Error::Database(_) | Error::Io(_) | Error::Json(_) | Error::CorruptedData(_) => {
                ErrorKind::Store
            }
        }
    }
}

/// A specialized Result type for nk-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
