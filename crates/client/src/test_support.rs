// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory transport and accounts for unit tests.

#![allow(clippy::unwrap_used)]
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{Duration, TimeZone, Utc};
use tokio::sync::Semaphore;

use nk_core::protocol::{ChangePasswordRequest, CreateNoteRequest, Credentials};
use nk_core::{status, ListFilter, Note, NotePatch};

use crate::accounts::Accounts;
use crate::session::Session;
use crate::transport::{Transport, TransportError, TransportFuture};

pub const OWNER: &str = "ann@example.com";

/// Mock transport for testing without a server.
///
/// Keeps notes in memory and applies status changes the way the server
/// does. Listing can be held at a gate to simulate slow responses.
pub struct MockTransport {
    notes: Mutex<Vec<Note>>,
    next_id: AtomicUsize,
    list_calls: AtomicUsize,
    update_calls: AtomicUsize,
    /// Forced failures for update/delete, by note id.
    failures: Mutex<HashMap<String, TransportError>>,
    gate: Option<Arc<Semaphore>>,
    update_gate: Option<Arc<Semaphore>>,
}

impl MockTransport {
    pub fn new() -> Self {
        MockTransport {
            notes: Mutex::new(Vec::new()),
            next_id: AtomicUsize::new(1),
            list_calls: AtomicUsize::new(0),
            update_calls: AtomicUsize::new(0),
            failures: Mutex::new(HashMap::new()),
            gate: None,
            update_gate: None,
        }
    }

    /// A mock whose list calls wait for [`MockTransport::release`].
    pub fn gated() -> Self {
        MockTransport { gate: Some(Arc::new(Semaphore::new(0))), ..MockTransport::new() }
    }

    /// A mock whose update calls wait for [`MockTransport::release_updates`].
    pub fn gated_updates() -> Self {
        MockTransport { update_gate: Some(Arc::new(Semaphore::new(0))), ..MockTransport::new() }
    }

    pub fn release(&self, n: usize) {
        if let Some(gate) = &self.gate {
            gate.add_permits(n);
        }
    }

    pub fn release_updates(&self, n: usize) {
        if let Some(gate) = &self.update_gate {
            gate.add_permits(n);
        }
    }

    /// Inserts a plain home note and returns its id.
    pub fn seed(&self, title: &str) -> String {
        let n = self.next_id.fetch_add(1, Ordering::SeqCst);
        let created = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap() + Duration::minutes(n as i64);
        let id = format!("n-{n:04}");
        let mut note = Note::new(id.clone(), OWNER.to_string(), title.to_string(), created);
        note.content = format!("{title} body");
        self.notes.lock().unwrap().push(note);
        id
    }

    pub fn note(&self, id: &str) -> Option<Note> {
        self.notes.lock().unwrap().iter().find(|n| n.id == id).cloned()
    }

    pub fn fail(&self, id: &str, error: TransportError) {
        self.failures.lock().unwrap().insert(id.to_string(), error);
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    fn forced_failure(&self, id: &str) -> Option<TransportError> {
        self.failures.lock().unwrap().get(id).cloned()
    }
}

async fn pass(gate: &Option<Arc<Semaphore>>) {
    if let Some(gate) = gate {
        gate.acquire().await.unwrap().forget();
    }
}

impl Transport for MockTransport {
    fn list_notes(&self, filter: &ListFilter) -> TransportFuture<'_, Vec<Note>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let filter = filter.clone();
        Box::pin(async move {
            pass(&self.gate).await;
            let mut notes: Vec<Note> = self
                .notes
                .lock()
                .unwrap()
                .iter()
                .filter(|n| filter.admits(n.status))
                .filter(|n| filter.search.as_deref().is_none_or(|term| n.matches_search(term)))
                .cloned()
                .collect();
            notes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(notes)
        })
    }

    fn get_note(&self, id: &str) -> TransportFuture<'_, Note> {
        let id = id.to_string();
        Box::pin(async move { self.note(&id).ok_or(TransportError::NotFound(id)) })
    }

    fn create_note(&self, request: CreateNoteRequest) -> TransportFuture<'_, String> {
        Box::pin(async move {
            let id = self.seed(&request.title);
            let mut notes = self.notes.lock().unwrap();
            if let Some(note) = notes.iter_mut().find(|n| n.id == id) {
                note.content = request.content;
                note.is_checklist = request.is_checklist;
                note.todos = request.todos.fill_missing_ids();
            }
            Ok(id)
        })
    }

    fn update_note(&self, id: &str, patch: NotePatch) -> TransportFuture<'_, Note> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        let id = id.to_string();
        Box::pin(async move {
            pass(&self.update_gate).await;
            if let Some(error) = self.forced_failure(&id) {
                return Err(error);
            }
            let mut notes = self.notes.lock().unwrap();
            let note = notes
                .iter_mut()
                .find(|n| n.id == id)
                .ok_or_else(|| TransportError::NotFound(id.clone()))?;
            note.status =
                status::resolve(note.status, patch.action, patch.is_archived, patch.is_trashed)
                    .map_err(|e| TransportError::Rejected { status: 400, message: e.to_string() })?;
            if let Some(title) = patch.title {
                note.title = title;
            }
            if let Some(content) = patch.content {
                note.content = content;
            }
            if let Some(todos) = patch.todos {
                note.todos = todos;
            }
            Ok(note.clone())
        })
    }

    fn delete_note(&self, id: &str) -> TransportFuture<'_, ()> {
        let id = id.to_string();
        Box::pin(async move {
            if let Some(error) = self.forced_failure(&id) {
                return Err(error);
            }
            let mut notes = self.notes.lock().unwrap();
            let before = notes.len();
            notes.retain(|n| n.id != id);
            if notes.len() == before {
                return Err(TransportError::NotFound(id));
            }
            Ok(())
        })
    }
}

/// Accounts kept in memory. Passwords are stored as given.
pub struct MockAccounts {
    users: Mutex<HashMap<String, String>>,
}

impl MockAccounts {
    pub fn new() -> Self {
        MockAccounts { users: Mutex::new(HashMap::new()) }
    }

    pub fn with_user(email: &str, password: &str) -> Self {
        let accounts = Self::new();
        accounts.users.lock().unwrap().insert(email.to_string(), password.to_string());
        accounts
    }

    pub fn password(&self, email: &str) -> Option<String> {
        self.users.lock().unwrap().get(email).cloned()
    }
}

fn rejected(status: u16, message: &str) -> TransportError {
    TransportError::Rejected { status, message: message.to_string() }
}

impl Accounts for MockAccounts {
    fn register(&self, credentials: Credentials) -> TransportFuture<'_, ()> {
        Box::pin(async move {
            let mut users = self.users.lock().unwrap();
            if users.contains_key(&credentials.email) {
                return Err(rejected(409, "user already exists"));
            }
            users.insert(credentials.email, credentials.password);
            Ok(())
        })
    }

    fn login(&self, credentials: Credentials) -> TransportFuture<'_, String> {
        Box::pin(async move {
            match self.password(&credentials.email) {
                Some(password) if password == credentials.password => {
                    Ok(format!("token-{}", credentials.email))
                }
                _ => Err(rejected(401, "Invalid credentials")),
            }
        })
    }

    fn change_password(
        &self,
        session: &Session,
        request: ChangePasswordRequest,
    ) -> TransportFuture<'_, ()> {
        let email = session.email.clone();
        Box::pin(async move {
            let mut users = self.users.lock().unwrap();
            match users.get_mut(&email) {
                None => Err(rejected(404, "User not found")),
                Some(password) if *password != request.current_password => {
                    Err(rejected(401, "Current password does not match"))
                }
                Some(password) => {
                    *password = request.new_password;
                    Ok(())
                }
            }
        })
    }
}
