// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Note actions and the cache views they invalidate.
//!
//! An action is sent to the server first. Only after the server confirms it
//! are the affected views marked stale; a failed action leaves the cache
//! exactly as it was.
//!
//! The affected views are the page the action was taken from plus the page
//! showing the status the note moves to:
//!
//! | origin  | action  | stale views     |
//! |---------|---------|-----------------|
//! | home    | archive | home, archive   |
//! | home    | trash   | home, trash     |
//! | archive | trash   | archive, trash  |
//! | archive | restore | home, archive   |
//! | trash   | archive | archive, trash  |
//! | trash   | restore | home, trash     |
//! | any     | delete  | origin          |
//! | any     | edit    | origin          |

use std::collections::{BTreeSet, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, info, warn};

use nk_core::{Note, NotePatch, StatusAction};

use crate::cache::{Page, QueryCache};
use crate::error::{Error, Result};
use crate::transport::Transport;

/// Something the user can do to a single note.
#[derive(Debug, Clone, PartialEq)]
pub enum NoteAction {
    Archive,
    Trash,
    Restore,
    /// Permanent removal.
    Delete,
    /// Content change. Status fields in the patch are honored.
    Edit(NotePatch),
}

impl NoteAction {
    /// The status transition this action requests, if any.
    pub fn status_action(&self) -> Option<StatusAction> {
        match self {
            NoteAction::Archive => Some(StatusAction::Archive),
            NoteAction::Trash => Some(StatusAction::Trash),
            NoteAction::Restore => Some(StatusAction::Restore),
            NoteAction::Edit(patch) => patch.action,
            NoteAction::Delete => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            NoteAction::Archive => "archive",
            NoteAction::Trash => "trash",
            NoteAction::Restore => "restore",
            NoteAction::Delete => "delete",
            NoteAction::Edit(_) => "edit",
        }
    }
}

/// Returns the pages to mark stale after `action` succeeds on a note shown on `origin`.
pub fn invalidation_set(origin: Page, action: &NoteAction) -> BTreeSet<Page> {
    let mut pages = BTreeSet::from([origin]);
    match action {
        // Raw flags can land anywhere.
        NoteAction::Edit(patch) if patch.action.is_none() && patch.changes_status() => {
            pages.extend(Page::ALL);
        }
        _ => {
            if let Some(status_action) = action.status_action() {
                pages.insert(Page::for_status(origin.status().apply(status_action)));
            }
        }
    }
    pages
}

/// Result of a confirmed action.
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatched {
    /// The note as the server stored it. `None` after a delete.
    pub note: Option<Note>,
    pub invalidated: BTreeSet<Page>,
}

/// Sends note actions and keeps the cache in step with the server.
pub struct Dispatcher {
    transport: Arc<dyn Transport>,
    cache: Arc<QueryCache>,
    pending: Mutex<HashSet<String>>,
}

/// Holds a note's pending slot until dropped.
struct PendingGuard<'a> {
    pending: &'a Mutex<HashSet<String>>,
    id: String,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        lock(self.pending).remove(&self.id);
    }
}

fn lock(pending: &Mutex<HashSet<String>>) -> MutexGuard<'_, HashSet<String>> {
    pending.lock().unwrap_or_else(|e| e.into_inner())
}

impl Dispatcher {
    pub fn new(transport: Arc<dyn Transport>, cache: Arc<QueryCache>) -> Self {
        Dispatcher { transport, cache, pending: Mutex::new(HashSet::new()) }
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    /// True while an action on `id` is awaiting the server.
    pub fn is_pending(&self, id: &str) -> bool {
        lock(&self.pending).contains(id)
    }

    fn claim(&self, id: &str) -> Result<PendingGuard<'_>> {
        if !lock(&self.pending).insert(id.to_string()) {
            return Err(Error::Busy(id.to_string()));
        }
        Ok(PendingGuard { pending: &self.pending, id: id.to_string() })
    }

    /// Performs `action` on note `id`, shown on `origin`.
    ///
    /// Fails with [`Error::Busy`] while another action on the same note is
    /// in progress.
    pub async fn dispatch(&self, id: &str, origin: Page, action: NoteAction) -> Result<Dispatched> {
        let _guard = self.claim(id)?;
        let invalidated = invalidation_set(origin, &action);
        debug!("dispatching {} on {} from {}", action.name(), id, origin);

        let note = match action {
            NoteAction::Delete => {
                self.transport.delete_note(id).await?;
                None
            }
            NoteAction::Edit(patch) => Some(self.transport.update_note(id, patch).await?),
            other => {
                let patch = other.status_action().map(NotePatch::action).unwrap_or_default();
                Some(self.transport.update_note(id, patch).await?)
            }
        };

        for page in &invalidated {
            self.cache.invalidate(*page);
        }
        Ok(Dispatched { note, invalidated })
    }

    /// Applies `action` to each `(id, origin)` target in turn.
    ///
    /// Every target is attempted. When any fail, the error lists ids the
    /// server no longer has apart from other failures.
    pub async fn dispatch_all(
        &self,
        targets: &[(String, Page)],
        action: NoteAction,
    ) -> Result<Vec<Dispatched>> {
        let mut done = Vec::new();
        let mut not_found = Vec::new();
        let mut failures = Vec::new();

        for (id, origin) in targets {
            match self.dispatch(id, *origin, action.clone()).await {
                Ok(dispatched) => done.push(dispatched),
                Err(Error::NoteNotFound(_)) => {
                    warn!("{} {}: note no longer exists", action.name(), id);
                    not_found.push(id.clone());
                }
                Err(e) => {
                    warn!("{} {} failed: {}", action.name(), id, e);
                    failures.push((id.clone(), e.to_string()));
                }
            }
        }

        if not_found.is_empty() && failures.is_empty() {
            info!("{} applied to {} notes", action.name(), done.len());
            return Ok(done);
        }
        Err(Error::PartialBulkFailure {
            succeeded: done.len(),
            failed: not_found.len() + failures.len(),
            not_found,
            failures,
        })
    }
}

#[cfg(test)]
#[path = "dispatcher_tests.rs"]
mod tests;
