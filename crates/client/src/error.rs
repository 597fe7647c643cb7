// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

use crate::transport::TransportError;

/// All possible errors that can occur in the nkrs library.
#[derive(Debug, Error)]
pub enum Error {
    #[error("not logged in\n  hint: run 'notekeep login <email>' first")]
    NotLoggedIn,

    #[error("invalid email: '{0}'")]
    InvalidEmail(String),

    #[error("note not found: {0}")]
    NoteNotFound(String),

    #[error("note {0} already has an action in progress")]
    Busy(String),

    #[error("invalid page: '{0}'\n  hint: valid pages are: home, archive, trash")]
    InvalidPage(String),

    #[error("note {0} is not a checklist")]
    NotAChecklist(String),

    #[error("checklist item not found: {item} in note {note}")]
    ItemNotFound { note: String, item: String },

    #[error("nothing to change\n  hint: pass --title and/or --content")]
    EmptyEdit,

    #[error("{0}")]
    Validation(String),

    #[error("server rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("some operations failed: {succeeded} succeeded, {failed} failed")]
    PartialBulkFailure {
        succeeded: usize,
        failed: usize,
        not_found: Vec<String>,
        failures: Vec<(String, String)>,
    },
}

/// A specialized Result type for nkrs operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<TransportError> for Error {
    fn from(e: TransportError) -> Self {
        match e {
            TransportError::NotFound(id) => Error::NoteNotFound(id),
            TransportError::Rejected { status, message } => Error::Rejected { status, message },
            TransportError::ConnectionFailed(msg) | TransportError::Decode(msg) => {
                Error::Transport(msg)
            }
        }
    }
}

impl From<nk_core::Error> for Error {
    fn from(e: nk_core::Error) -> Self {
        match e {
            nk_core::Error::NotFound(id) => Error::NoteNotFound(id),
            nk_core::Error::Io(e) => Error::Io(e),
            nk_core::Error::Json(e) => Error::Json(e),
            other => Error::Validation(other.to_string()),
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Config(e.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(e: toml::ser::Error) -> Self {
        Error::Config(e.to_string())
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
