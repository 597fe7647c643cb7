// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! JSON request and response bodies shared by the server and its clients.
//!
//! Every note route takes the owner as an `email` query parameter:
//! - `POST /notes` with [`CreateNoteRequest`] → [`CreateNoteResponse`]
//! - `GET /notes` with [`ListQuery`] → `Vec<Note>`, newest first
//! - `GET /notes/{id}` → `Note`
//! - `PATCH /notes/{id}` with [`NotePatch`] → [`UpdateNoteResponse`]
//! - `DELETE /notes/{id}` → [`DeleteNoteResponse`]
//!
//! Account routes:
//! - `POST /users` with [`Credentials`] → [`AccountResponse`]
//! - `POST /login` with [`Credentials`] → [`TokenResponse`]
//! - `POST /jwt` with a bearer token → a fresh [`TokenResponse`]
//! - `POST /change-password?email=` with [`ChangePasswordRequest`] → [`AccountResponse`]
//!
//! Failures carry an [`ErrorBody`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::checklist::Checklist;
use crate::error::{Error, Result};
use crate::note::Note;
use crate::status::{Status, StatusAction};

/// Body of `POST /notes`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNoteRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, alias = "isTodo")]
    pub is_checklist: bool,
    #[serde(default)]
    pub todos: Checklist,
}

impl CreateNoteRequest {
    /// A plain note with a body.
    pub fn plain(title: impl Into<String>, content: impl Into<String>) -> Self {
        CreateNoteRequest { title: title.into(), content: content.into(), ..Default::default() }
    }

    /// A checklist note.
    pub fn checklist(title: impl Into<String>, todos: Checklist) -> Self {
        CreateNoteRequest { title: title.into(), is_checklist: true, todos, ..Default::default() }
    }
}

/// Successful reply to `POST /notes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNoteResponse {
    pub acknowledged: bool,
    pub inserted_id: String,
}

/// Query string of `GET /notes` (besides `email`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_term: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_archived: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_trashed: Option<bool>,
}

impl ListQuery {
    /// Converts the raw query into a typed filter.
    ///
    /// Only the flags present constrain the listing: `isArchived=false` alone
    /// keeps home and trashed notes.
    pub fn into_filter(self) -> Result<ListFilter> {
        let (status, excluded) = match (self.is_archived, self.is_trashed) {
            (None, None) => (None, None),
            (Some(archived), Some(trashed)) => (Some(Status::from_flags(archived, trashed)?), None),
            (Some(true), None) => (Some(Status::Archived), None),
            (Some(false), None) => (None, Some(Status::Archived)),
            (None, Some(true)) => (Some(Status::Trashed), None),
            (None, Some(false)) => (None, Some(Status::Trashed)),
        };
        let search = self.search_term.filter(|term| !term.trim().is_empty());
        Ok(ListFilter { status, excluded, search })
    }
}

impl From<&ListFilter> for ListQuery {
    fn from(filter: &ListFilter) -> Self {
        let (is_archived, is_trashed) = match (filter.status, filter.excluded) {
            (Some(status), _) => {
                let (archived, trashed) = status.flags();
                (Some(archived), Some(trashed))
            }
            (None, Some(Status::Archived)) => (Some(false), None),
            (None, Some(Status::Trashed)) => (None, Some(false)),
            // Excluding home has no flag form.
            (None, _) => (None, None),
        };
        ListQuery { search_term: filter.search.clone(), is_archived, is_trashed }
    }
}

/// Typed listing filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ListFilter {
    /// Restrict to one status; `None` lists all.
    pub status: Option<Status>,
    /// Leave out one status.
    pub excluded: Option<Status>,
    /// Case-insensitive substring over title and content.
    pub search: Option<String>,
}

impl ListFilter {
    pub fn status(status: Status) -> Self {
        ListFilter { status: Some(status), ..Default::default() }
    }

    /// True when a note with `status` passes the status part of the filter.
    pub fn admits(&self, status: Status) -> bool {
        self.status.is_none_or(|s| s == status) && self.excluded != Some(status)
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        let term = term.into();
        self.search = if term.trim().is_empty() { None } else { Some(term) };
        self
    }
}

/// Body of `PATCH /notes/{id}`. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub todos: Option<Checklist>,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "isTodo")]
    pub is_checklist: Option<bool>,
    /// Status transition; the preferred way to move a note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<StatusAction>,
    /// Legacy raw flag, normalized through [`Status::from_flags`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_archived: Option<bool>,
    /// Legacy raw flag, normalized through [`Status::from_flags`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_trashed: Option<bool>,
}

impl NotePatch {
    /// A patch carrying only a status action.
    pub fn action(action: StatusAction) -> Self {
        NotePatch { action: Some(action), ..Default::default() }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn todos(mut self, todos: Checklist) -> Self {
        self.todos = Some(todos);
        self
    }

    /// True when the patch may move the note to another view.
    pub fn changes_status(&self) -> bool {
        self.action.is_some() || self.is_archived.is_some() || self.is_trashed.is_some()
    }

    /// True when the patch carries no field at all.
    pub fn is_empty(&self) -> bool {
        *self == NotePatch::default()
    }
}

/// Reply to `PATCH /notes/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateNoteResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<Note>,
}

/// Reply to `DELETE /notes/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteNoteResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Body of `POST /users` and `POST /login`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Credentials { email: email.into(), password: password.into() }
    }
}

/// Body of `POST /change-password`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[serde(default)]
    pub current_password: String,
    #[serde(default)]
    pub new_password: String,
}

/// A signed access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Reply to account changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountResponse {
    pub success: bool,
    pub message: String,
}

impl AccountResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        AccountResponse { success: true, message: message.into() }
    }
}

/// Body of every failed request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: bool,
    pub message: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        ErrorBody { error: true, message: message.into() }
    }
}

/// Reply to `GET /health`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub uptime: String,
}

/// Renders an uptime in seconds as `{d}d {h}h {m}m {s}s`.
pub fn format_uptime(total_secs: u64) -> String {
    let days = total_secs / 86_400;
    let hours = (total_secs % 86_400) / 3_600;
    let minutes = (total_secs % 3_600) / 60;
    let seconds = total_secs % 60;
    format!("{days}d {hours}h {minutes}m {seconds}s")
}

/// Parses a request body, reporting shape problems as validation errors.
pub fn parse_body<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return serde_json::from_slice(b"{}")
            .map_err(|e| Error::validation(format!("invalid request body: {e}")));
    }
    serde_json::from_slice(bytes).map_err(|e| Error::validation(format!("invalid request body: {e}")))
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;
