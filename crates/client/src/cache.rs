// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Client-side cache of note views.
//!
//! Each [`ViewKey`] maps to the last collection fetched for it. Entries are
//! fetched lazily on first read and again after being marked stale.
//!
//! Two rules keep the cache consistent under concurrent use:
//! - Readers of a key that is already being fetched join that fetch instead
//!   of starting another one.
//! - Every entry carries a generation. Invalidation bumps it and detaches the
//!   running fetch; when that fetch completes, its result goes back to the
//!   callers that were waiting on it but is not stored.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard};

use futures_util::future::{BoxFuture, Shared};
use futures_util::FutureExt;
use tracing::debug;

use nk_core::{ListFilter, Note, Status};

use crate::error::{Error, Result};
use crate::transport::{Transport, TransportResult};

/// One of the three note pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Page {
    Home,
    Archive,
    Trash,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Home, Page::Archive, Page::Trash];

    pub fn as_str(&self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::Archive => "archive",
            Page::Trash => "trash",
        }
    }

    /// The status of the notes this page shows.
    pub fn status(self) -> Status {
        match self {
            Page::Home => Status::Home,
            Page::Archive => Status::Archived,
            Page::Trash => Status::Trashed,
        }
    }

    /// The page a note with `status` appears on.
    pub fn for_status(status: Status) -> Page {
        match status {
            Status::Home => Page::Home,
            Status::Archived => Page::Archive,
            Status::Trashed => Page::Trash,
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Page {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "home" => Ok(Page::Home),
            "archive" | "archived" => Ok(Page::Archive),
            "trash" | "trashed" => Ok(Page::Trash),
            _ => Err(Error::InvalidPage(s.to_string())),
        }
    }
}

/// Identifies one cached collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ViewKey {
    /// Home notes, optionally narrowed by a search term.
    Home { search: Option<String> },
    Archive,
    Trash,
}

impl ViewKey {
    pub fn home() -> Self {
        ViewKey::Home { search: None }
    }

    /// Home notes matching `term`. A blank term is the plain home view.
    pub fn search(term: &str) -> Self {
        let term = term.trim();
        ViewKey::Home { search: (!term.is_empty()).then(|| term.to_string()) }
    }

    pub fn for_page(page: Page) -> Self {
        match page {
            Page::Home => ViewKey::home(),
            Page::Archive => ViewKey::Archive,
            Page::Trash => ViewKey::Trash,
        }
    }

    pub fn page(&self) -> Page {
        match self {
            ViewKey::Home { .. } => Page::Home,
            ViewKey::Archive => Page::Archive,
            ViewKey::Trash => Page::Trash,
        }
    }

    /// The listing filter that populates this view.
    pub fn filter(&self) -> ListFilter {
        let filter = ListFilter::status(self.page().status());
        match self {
            ViewKey::Home { search: Some(term) } => filter.with_search(term.as_str()),
            _ => filter,
        }
    }
}

type SharedFetch = Shared<BoxFuture<'static, TransportResult<Vec<Note>>>>;

struct Entry {
    notes: Option<Vec<Note>>,
    stale: bool,
    generation: u64,
    in_flight: Option<SharedFetch>,
}

#[derive(Default)]
struct Entries {
    map: HashMap<ViewKey, Entry>,
    /// Last generation handed out. Never reused, even across `clear`.
    generation: u64,
}

impl Entries {
    fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }
}

/// Cache of note views for one signed-in owner.
pub struct QueryCache {
    transport: Arc<dyn Transport>,
    entries: Mutex<Entries>,
}

impl QueryCache {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        QueryCache { transport, entries: Mutex::new(Entries::default()) }
    }

    fn lock(&self) -> MutexGuard<'_, Entries> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Returns the notes for `key`, fetching when missing or stale.
    pub async fn get(&self, key: &ViewKey) -> Result<Vec<Note>> {
        let (fetch, generation) = {
            let mut entries = self.lock();
            let generation = match entries.map.get(key) {
                Some(entry) => entry.generation,
                None => entries.next_generation(),
            };
            let entry = entries.map.entry(key.clone()).or_insert_with(|| Entry {
                notes: None,
                stale: false,
                generation,
                in_flight: None,
            });

            if let (Some(notes), false) = (&entry.notes, entry.stale) {
                return Ok(notes.clone());
            }
            let fetch = match &entry.in_flight {
                Some(fetch) => fetch.clone(),
                None => {
                    debug!("fetching {:?} (generation {})", key, entry.generation);
                    let fetch = self.start_fetch(key);
                    entry.in_flight = Some(fetch.clone());
                    fetch
                }
            };
            (fetch, entry.generation)
        };

        let result = fetch.await;

        let mut entries = self.lock();
        match entries.map.get_mut(key) {
            Some(entry) if entry.generation == generation => {
                entry.in_flight = None;
                if let Ok(notes) = &result {
                    entry.notes = Some(notes.clone());
                    entry.stale = false;
                }
            }
            _ => debug!("discarding superseded response for {:?}", key),
        }
        Ok(result?)
    }

    fn start_fetch(&self, key: &ViewKey) -> SharedFetch {
        let transport = Arc::clone(&self.transport);
        let filter = key.filter();
        async move { transport.list_notes(&filter).await }.boxed().shared()
    }

    /// Marks every key on `page` stale and detaches their running fetches.
    pub fn invalidate(&self, page: Page) {
        let mut entries = self.lock();
        let keys: Vec<ViewKey> = entries.map.keys().filter(|k| k.page() == page).cloned().collect();
        for key in keys {
            let generation = entries.next_generation();
            if let Some(entry) = entries.map.get_mut(&key) {
                entry.stale = true;
                entry.generation = generation;
                entry.in_flight = None;
            }
        }
        debug!("invalidated {} views", page);
    }

    /// Drops every entry. Fetches still running are discarded on completion.
    pub fn clear(&self) {
        self.lock().map.clear();
    }

    /// Returns the cached notes for `key` without fetching, stale or not.
    pub fn peek(&self, key: &ViewKey) -> Option<Vec<Note>> {
        self.lock().map.get(key).and_then(|entry| entry.notes.clone())
    }

    /// True when `key` has been invalidated since its last successful fetch.
    pub fn is_stale(&self, key: &ViewKey) -> bool {
        self.lock().map.get(key).is_some_and(|entry| entry.stale)
    }
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod tests;
